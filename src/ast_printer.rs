use crate::ast::{Expr, Literal, Stmt};

/// Renders the tree in a parenthesised prefix form, one string per node.
///
/// `a + b - c` prints as `(- (+ a b) c)`; `Imp soma(2, 3);` as
/// `(print (call soma 2 3))`.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print_program(statements: &[Stmt]) -> String {
        statements
            .iter()
            .map(Self::print_stmt)
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn print_stmt(stmt: &Stmt) -> String {
        match stmt {
            Stmt::Function { name, params, body } => format!(
                "(fnc {} ({}) {})",
                name,
                params.join(" "),
                Self::print_block(body)
            ),

            Stmt::Var { name, value } => format!("(var {} {})", name, Self::print(value)),

            Stmt::Print { value } => format!("(print {})", Self::print(value)),

            Stmt::While { condition, body } => format!(
                "(while {} {})",
                Self::print(condition),
                Self::print_block(body)
            ),

            Stmt::If {
                condition,
                then_branch,
                else_ifs,
                else_branch,
            } => {
                let mut s = format!(
                    "(if {} {}",
                    Self::print(condition),
                    Self::print_block(then_branch)
                );

                for arm in else_ifs {
                    s.push_str(&format!(
                        " (elif {} {})",
                        Self::print(&arm.condition),
                        Self::print_block(&arm.body)
                    ));
                }

                if let Some(body) = else_branch {
                    s.push_str(&format!(" (else {})", Self::print_block(body)));
                }

                s.push(')');
                s
            }

            Stmt::Return { value } => format!("(return {})", Self::print(value)),

            Stmt::Assign { name, value } => format!("(-> {} {})", name, Self::print(value)),

            Stmt::Expression { expr } => format!("(expr {})", Self::print(expr)),
        }
    }

    pub fn print(expr: &Expr) -> String {
        match expr {
            // ── literals ────────────────────────────────────────────────
            Expr::Literal { value } => match value {
                Literal::Int(n) => n.to_string(),

                Literal::Float(n) => {
                    if n.fract() == 0.0 {
                        format!("{:.1}", n)
                    } else {
                        n.to_string()
                    }
                }

                Literal::Str(s) => format!("{:?}", s),
            },

            Expr::Variable { name } => name.clone(),

            Expr::Binary {
                left,
                operator,
                right,
            } => format!(
                "({} {} {})",
                operator,
                Self::print(left),
                Self::print(right)
            ),

            Expr::Call { callee, arguments } => {
                let mut s = format!("(call {}", callee);
                for arg in arguments {
                    s.push(' ');
                    s.push_str(&Self::print(arg));
                }
                s.push(')');
                s
            }
        }
    }

    fn print_block(body: &[Stmt]) -> String {
        let mut s = String::from("(block");
        for stmt in body {
            s.push(' ');
            s.push_str(&Self::print_stmt(stmt));
        }
        s.push(')');
        s
    }
}
