use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use imp_frontend as imp;

use imp::ast_printer::AstPrinter;
use imp::error::FrontendError;
use imp::lexer::{self, Lexer};
use imp::parser::Parser;
use imp::token::Token;

/// Program used when no file is given.
const SAMPLE_SOURCE: &str = "fnc soma (a, b) { var: res -> a + b; back res; }";

/// Exit status for any lexical or syntax error.
const EXIT_SOURCE_ERROR: i32 = 65;

#[derive(ClapParser, Debug)]
#[command(version, about = "Lexer and parser for the fnc/dum/si toy language", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: Option<PathBuf>,

        /// Print the tokens as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file and prints its AST
    Parse {
        filename: Option<PathBuf>,

        /// Print the AST as JSON instead of S-expressions
        #[arg(long)]
        json: bool,
    },
}

/// Reads a source file into a `String`.
fn read_file(filename: PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(&filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    let source = String::from_utf8(buf).map_err(FrontendError::from)?;

    Ok(source)
}

fn load_source(filename: Option<PathBuf>) -> Result<String> {
    match filename {
        Some(filename) => read_file(filename),
        None => {
            info!("No filepath provided, using the built-in sample");
            Ok(SAMPLE_SOURCE.to_string())
        }
    }
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("imp_frontend::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

/// Print a front-end failure and leave with the source-error status.
fn fail(e: &FrontendError) -> ! {
    debug!("Front end failure: {:?}", e);
    eprintln!("{}", e);
    std::process::exit(EXIT_SOURCE_ERROR);
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .parse_default_env()
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Commands::Tokenize { filename, json } => {
            info!("Running Tokenize subcommand");
            let source = load_source(filename)?;

            if json {
                let tokens: Vec<Token<'_>> = match lexer::tokenize(&source) {
                    Ok(tokens) => tokens,
                    Err(e) => fail(&e),
                };

                println!(
                    "{}",
                    serde_json::to_string_pretty(&tokens).context("Failed to encode tokens")?
                );
            } else {
                // Print tokens as they are produced; an error ends the stream.
                for token in Lexer::new(&source) {
                    match token {
                        Ok(token) => println!("{}", token),
                        Err(e) => fail(&e),
                    }
                }
            }

            info!("Tokenization completed successfully");
        }

        Commands::Parse { filename, json } => {
            info!("Running Parse subcommand");
            let source = load_source(filename)?;

            let tokens: Vec<Token<'_>> = match lexer::tokenize(&source) {
                Ok(tokens) => tokens,
                Err(e) => fail(&e),
            };

            let program = match Parser::new(tokens).parse() {
                Ok(program) => program,
                Err(e) => fail(&e),
            };

            info!("Parsed {} statements", program.len());

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&program).context("Failed to encode AST")?
                );
            } else {
                println!("{}", AstPrinter::print_program(&program));
            }

            info!("Parse subcommand completed");
        }
    }

    Ok(())
}
