//! Abstract syntax tree produced by [`crate::parser::Parser`].
//!
//! The tree owns all of its data, so it outlives both the source buffer and
//! the token vector. Every node serializes as a tagged mapping
//! (`{"type": "Var", "name": ..., "value": ...}`).

use serde::Serialize;
use std::fmt;

/// A literal constant, already converted from its token text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    /// Decimal integer literal.
    Int(i64),

    /// Decimal literal with a fractional part.
    Float(f64),

    /// String literal without its surrounding quotes.
    Str(String),
}

/// Binary operators. All arithmetic operators share one precedence level,
/// and so do all relational ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    /// Operator spelled by an arithmetic token.
    pub fn arithmetic(text: &str) -> Option<Self> {
        match text {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            _ => None,
        }
    }

    /// Operator spelled by a relational token.
    pub fn relational(text: &str) -> Option<Self> {
        match text {
            "==" => Some(BinaryOp::Eq),
            "!=" => Some(BinaryOp::Ne),
            "<" => Some(BinaryOp::Lt),
            "<=" => Some(BinaryOp::Le),
            ">" => Some(BinaryOp::Gt),
            ">=" => Some(BinaryOp::Ge),
            _ => None,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Expression nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expr {
    /// `42`, `3.5`, `"text"`
    Literal { value: Literal },

    /// A bare identifier.
    Variable { name: String },

    /// `name(arg, ...)`; the callee is always a plain identifier.
    Call {
        callee: String,
        arguments: Vec<Expr>,
    },

    /// `left op right`, built left-associatively.
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(left: Expr, operator: BinaryOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }
}

/// One `velsi (...) { ... }` arm of an [`Stmt::If`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElseIf {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

/// Statement nodes. A program is a `Vec<Stmt>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Stmt {
    /// `fnc name(params) { body }`, only at top level.
    Function {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
    },

    /// `var: name -> value;`
    Var { name: String, value: Expr },

    /// `Imp value;`
    Print { value: Expr },

    /// `dum (condition) { body }`
    While { condition: Expr, body: Vec<Stmt> },

    /// `si (..) { .. } velsi (..) { .. } nisi { .. }`
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_ifs: Vec<ElseIf>,
        else_branch: Option<Vec<Stmt>>,
    },

    /// `back value;`
    Return { value: Expr },

    /// `name -> value;`
    Assign { name: String, value: Expr },

    /// Any other expression followed by `;`.
    Expression { expr: Expr },
}
