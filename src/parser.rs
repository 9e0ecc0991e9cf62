/*!
Recursive-descent parser over a fully materialized token vector.

Grammar (EBNF)
--------------

```text
program        → ( funDecl | statement )* ;
funDecl        → "fnc" IDENT "(" ( IDENT ( "," IDENT )* )? ")" block ;
statement      → varDecl | printStmt | whileStmt | ifStmt | returnStmt
               | assignment | exprStmt ;
varDecl        → "var" ":" IDENT "->" expression ";" ;
printStmt      → "Imp" expression ";" ;
whileStmt      → "dum" "(" expression ")" block ;
ifStmt         → "si" "(" expression ")" block
                 ( "velsi" "(" expression ")" block )*
                 ( "nisi" block )? ;
returnStmt     → "back" expression ";" ;
assignment     → IDENT "->" expression ";" ;
exprStmt       → expression ";" ;
block          → "{" statement* "}" ;
expression     → relational ;
relational     → arithmetic ( REL_OP arithmetic )* ;
arithmetic     → primary ( ARITH_OP primary )* ;
primary        → INT | FLOAT | STRING
               | IDENT ( "(" ( expression ( "," expression )* )? ")" )? ;
```

`+ - * /` live on a single precedence level: `a + b * c` parses as
`(a + b) * c`. Relational operators form one level above it.

An identifier at the start of a statement is resolved with one extra token of
lookahead: `IDENT "->"` is an assignment, anything else an expression
statement.

There is no recovery. The first error ends the parse and no partial tree is
returned.

### Logging Policy

| Location                     | Level  | Purpose                                   |
|------------------------------|--------|-------------------------------------------|
| `Parser::new`, `parse`       | `info` | Lifecycle milestones.                     |
| `declaration`, `statement`   | `debug`| Descent into grammar branches.            |
*/

use crate::ast::{BinaryOp, ElseIf, Expr, Literal, Stmt};
use crate::error::{Construct, Found, FrontendError, Result};
use crate::lexer;
use crate::token::{Keyword, Token, TokenKind};

use log::{debug, info};

/// Deepest nesting of blocks and call argument lists the parser accepts.
/// Each level costs several stack frames, so this keeps well clear of the
/// default 2 MiB thread stack.
pub const MAX_NESTING: usize = 128;

/// Top-level parser. Owns the token vector and a cursor into it.
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    current: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Construct a new parser. Newline tokens are dropped: the grammar is
    /// delimited by punctuation only.
    pub fn new<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = Token<'a>>,
    {
        let tokens: Vec<Token<'a>> = tokens
            .into_iter()
            .filter(|token| token.kind != TokenKind::Newline)
            .collect();

        info!("Parser created with {} tokens", tokens.len());

        Self {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse an entire program and return its top-level statements.
    pub fn parse(&mut self) -> Result<Vec<Stmt>> {
        info!("Beginning parse phase");

        let mut statements: Vec<Stmt> = Vec::new();

        while !self.is_at_end() {
            statements.push(self.declaration()?);
        }

        info!("Parsed {} top-level statements", statements.len());

        Ok(statements)
    }

    // ──────────────────────── declaration rules ───────────────────

    fn declaration(&mut self) -> Result<Stmt> {
        debug!("Entering declaration");

        if self.matches_keyword(Keyword::Fnc) {
            self.function()
        } else {
            self.statement()
        }
    }

    fn function(&mut self) -> Result<Stmt> {
        let name: Token<'a> = self.consume(TokenKind::Identifier)?;

        self.consume(TokenKind::LeftParen)?;

        let mut params: Vec<String> = Vec::new();

        if !self.check(TokenKind::RightParen) {
            loop {
                params.push(self.consume(TokenKind::Identifier)?.text.to_string());

                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RightParen)?;

        let body: Vec<Stmt> = self.block()?;

        debug!("Parsed function '{}' with {} params", name.text, params.len());

        Ok(Stmt::Function {
            name: name.text.to_string(),
            params,
            body,
        })
    }

    fn var_declaration(&mut self) -> Result<Stmt> {
        self.consume(TokenKind::Colon)?;

        let name: Token<'a> = self.consume(TokenKind::Identifier)?;

        self.consume(TokenKind::Assign)?;

        let value: Expr = self.expression()?;

        self.consume(TokenKind::Semicolon)?;

        Ok(Stmt::Var {
            name: name.text.to_string(),
            value,
        })
    }

    // ───────────────────────── statement rules ────────────────────

    fn statement(&mut self) -> Result<Stmt> {
        let Some(token) = self.peek() else {
            return Err(FrontendError::unexpected("statement", Found::EndOfInput));
        };

        debug!("Entering statement at {:?} '{}'", token.kind, token.text);

        match token.kind {
            TokenKind::Keyword => match token.keyword() {
                Some(Keyword::Var) => {
                    self.advance();
                    self.var_declaration()
                }

                Some(Keyword::Imp) => {
                    self.advance();
                    self.print_statement()
                }

                Some(Keyword::Dum) => {
                    self.advance();
                    self.while_statement()
                }

                Some(Keyword::Si) => {
                    self.advance();
                    self.if_statement()
                }

                Some(Keyword::Back) => {
                    self.advance();
                    self.return_statement()
                }

                // `fnc` inside a block, a dangling `velsi`/`nisi`, and the
                // reserved `per`/`fin` all land here.
                _ => Err(FrontendError::invalid_start(
                    Construct::Statement,
                    token.text,
                    token.line,
                )),
            },

            TokenKind::Identifier => {
                let is_assignment: bool = self
                    .peek_next()
                    .is_some_and(|next| next.kind == TokenKind::Assign);

                if is_assignment {
                    self.assignment()
                } else {
                    self.expression_statement()
                }
            }

            TokenKind::Integer | TokenKind::Float | TokenKind::String => {
                self.expression_statement()
            }

            _ => Err(FrontendError::invalid_start(
                Construct::Statement,
                token.text,
                token.line,
            )),
        }
    }

    fn print_statement(&mut self) -> Result<Stmt> {
        let value: Expr = self.expression()?;

        self.consume(TokenKind::Semicolon)?;

        Ok(Stmt::Print { value })
    }

    fn while_statement(&mut self) -> Result<Stmt> {
        let condition: Expr = self.condition()?;
        let body: Vec<Stmt> = self.block()?;

        Ok(Stmt::While { condition, body })
    }

    fn if_statement(&mut self) -> Result<Stmt> {
        let condition: Expr = self.condition()?;
        let then_branch: Vec<Stmt> = self.block()?;

        let mut else_ifs: Vec<ElseIf> = Vec::new();

        while self.matches_keyword(Keyword::Velsi) {
            let condition: Expr = self.condition()?;
            let body: Vec<Stmt> = self.block()?;

            else_ifs.push(ElseIf { condition, body });
        }

        let else_branch: Option<Vec<Stmt>> = if self.matches_keyword(Keyword::Nisi) {
            Some(self.block()?)
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_ifs,
            else_branch,
        })
    }

    fn return_statement(&mut self) -> Result<Stmt> {
        let value: Expr = self.expression()?;

        self.consume(TokenKind::Semicolon)?;

        Ok(Stmt::Return { value })
    }

    fn assignment(&mut self) -> Result<Stmt> {
        let name: Token<'a> = self.consume(TokenKind::Identifier)?;

        self.consume(TokenKind::Assign)?;

        let value: Expr = self.expression()?;

        self.consume(TokenKind::Semicolon)?;

        Ok(Stmt::Assign {
            name: name.text.to_string(),
            value,
        })
    }

    fn expression_statement(&mut self) -> Result<Stmt> {
        let expr: Expr = self.expression()?;

        self.consume(TokenKind::Semicolon)?;

        Ok(Stmt::Expression { expr })
    }

    /// `"(" expression ")"` as used by `dum`, `si` and `velsi`.
    fn condition(&mut self) -> Result<Expr> {
        self.consume(TokenKind::LeftParen)?;

        let condition: Expr = self.expression()?;

        self.consume(TokenKind::RightParen)?;

        Ok(condition)
    }

    fn block(&mut self) -> Result<Vec<Stmt>> {
        self.consume(TokenKind::LeftBrace)?;

        self.nested(|parser| {
            let mut statements: Vec<Stmt> = Vec::new();

            while !parser.check(TokenKind::RightBrace) && !parser.is_at_end() {
                statements.push(parser.statement()?);
            }

            parser.consume(TokenKind::RightBrace)?;

            Ok(statements)
        })
    }

    // ─────────────────────── expression rules ─────────────────────

    fn expression(&mut self) -> Result<Expr> {
        self.relational()
    }

    fn relational(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.arithmetic()?;

        while let Some(operator) = self.match_operator(TokenKind::Relational, BinaryOp::relational)
        {
            let right: Expr = self.arithmetic()?;

            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn arithmetic(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.primary()?;

        while let Some(operator) = self.match_operator(TokenKind::Arithmetic, BinaryOp::arithmetic)
        {
            let right: Expr = self.primary()?;

            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr> {
        let Some(token) = self.peek() else {
            return Err(FrontendError::unexpected("expression", Found::EndOfInput));
        };

        match token.kind {
            TokenKind::Integer => {
                self.advance();

                let n: i64 = token
                    .text
                    .parse()
                    .map_err(|_| FrontendError::invalid_literal(token.text, token.line))?;

                Ok(Expr::Literal {
                    value: Literal::Int(n),
                })
            }

            TokenKind::Float => {
                self.advance();

                let n: f64 = token
                    .text
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| FrontendError::invalid_literal(token.text, token.line))?;

                Ok(Expr::Literal {
                    value: Literal::Float(n),
                })
            }

            TokenKind::String => {
                self.advance();

                let inner: &str = token
                    .text
                    .strip_prefix('"')
                    .and_then(|s| s.strip_suffix('"'))
                    .unwrap_or(token.text);

                Ok(Expr::Literal {
                    value: Literal::Str(inner.to_string()),
                })
            }

            TokenKind::Identifier => {
                self.advance();

                if self.matches(TokenKind::LeftParen) {
                    return self.finish_call(token);
                }

                Ok(Expr::Variable {
                    name: token.text.to_string(),
                })
            }

            _ => Err(FrontendError::invalid_start(
                Construct::Expression,
                token.text,
                token.line,
            )),
        }
    }

    fn finish_call(&mut self, callee: Token<'a>) -> Result<Expr> {
        let arguments: Vec<Expr> = self.nested(|parser| {
            let mut arguments: Vec<Expr> = Vec::new();

            if !parser.check(TokenKind::RightParen) {
                loop {
                    arguments.push(parser.expression()?);

                    if !parser.matches(TokenKind::Comma) {
                        break;
                    }
                }
            }

            Ok(arguments)
        })?;

        self.consume(TokenKind::RightParen)?;

        Ok(Expr::Call {
            callee: callee.text.to_string(),
            arguments,
        })
    }

    // ────────────────────── utility helpers ───────────────────────

    /// Run `rule` one nesting level deeper, refusing to go past
    /// [`MAX_NESTING`].
    fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING {
            let line: usize = self
                .peek()
                .or_else(|| self.tokens.last().copied())
                .map_or(1, |token| token.line);

            return Err(FrontendError::too_deep(MAX_NESTING, line));
        }

        self.depth += 1;
        let result: Result<T> = rule(self);
        self.depth -= 1;

        result
    }

    /// Consume the current token if it has `kind` and spells a known
    /// operator.
    fn match_operator(
        &mut self,
        kind: TokenKind,
        operator: fn(&str) -> Option<BinaryOp>,
    ) -> Option<BinaryOp> {
        let op: BinaryOp = self
            .peek()
            .filter(|token| token.kind == kind)
            .and_then(|token| operator(token.text))?;

        self.advance();

        Some(op)
    }

    #[inline(always)]
    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();

            return true;
        }

        false
    }

    #[inline(always)]
    fn matches_keyword(&mut self, keyword: Keyword) -> bool {
        if self.peek().is_some_and(|token| token.is_keyword(keyword)) {
            self.advance();

            return true;
        }

        false
    }

    fn consume(&mut self, kind: TokenKind) -> Result<Token<'a>> {
        if self.check(kind) {
            return Ok(self.advance());
        }

        debug!("Expected {:?}, found {:?}", kind, self.peek());

        Err(FrontendError::unexpected(kind.to_string(), self.found()))
    }

    #[inline(always)]
    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|token| token.kind == kind)
    }

    /// Step past the current token and return it. Callers check first.
    #[inline(always)]
    fn advance(&mut self) -> Token<'a> {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    #[inline(always)]
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.current).copied()
    }

    #[inline(always)]
    fn peek_next(&self) -> Option<Token<'a>> {
        self.tokens.get(self.current + 1).copied()
    }

    #[inline(always)]
    fn previous(&self) -> Token<'a> {
        self.tokens[self.current - 1]
    }

    fn found(&self) -> Found {
        match self.peek() {
            Some(token) => Found::Token {
                kind: token.kind,
                line: token.line,
            },
            None => Found::EndOfInput,
        }
    }
}

/// Tokenize and parse `src` in one go.
pub fn parse_source(src: &str) -> Result<Vec<Stmt>> {
    let tokens: Vec<Token<'_>> = lexer::tokenize(src)?;

    Parser::new(tokens).parse()
}
