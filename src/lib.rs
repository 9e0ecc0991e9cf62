pub mod ast;
pub mod ast_printer;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;
