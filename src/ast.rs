//! The typed AST contract this crate consumes. \
//! The grammar front end that produces a [`Program`] is an external collaborator
//! (see crate root docs): this module only defines the tree shape, it never parses
//! source text. Everything downstream — [`crate::preprocessor`], [`crate::compiler`] —
//! takes a `Program` as a black-box input.

/// A full script-language program: an ordered sequence of labelled blocks. \
/// The external parser guarantees at least one child; normalization
/// ([`crate::preprocessor::normalize`]) guarantees the first and last children
/// are labelled blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub children: Vec<TopLevel>,
}

/// A raw top-level child as handed to us by the parser, before normalization
/// wraps bare blocks/labels into [`LabelledBlock`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum TopLevel {
    Labelled(LabelledBlock),
    /// A bare leading code block with no label (only legal as the first child).
    Bare(Vec<Statement>),
    /// A bare trailing label with no body (only legal as the last child).
    BareLabel(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelledBlock {
    pub label: String,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

/// A variable declaration, as found inline in a parsed block. Removed by
/// [`crate::preprocessor::normalize`] and hoisted into the variable table.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclaration {
    pub name: String,
    pub initial: i64,
    pub maximum: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Pass,
    Push(String),
    Move(MoveDirection),
    Halt(String),
    Goto(String),
    VarDeclaration(VarDeclaration),
    VarAssignment { name: String, expr: Expr },
    IfRead { symbol: String, body: Vec<Statement> },
    IfComparison {
        lhs: Expr,
        comparator: Comparator,
        rhs: Expr,
        body: Vec<Statement>,
    },
}

/// A tagged expression tree. Per the design notes, the source's dynamic closures
/// become this static sum type; evaluation is a separate explicit step
/// ([`crate::expression::evaluate`]) over a valuation slice rather than a captured
/// closure.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(i64),
    Var(String),
    BinOp(Box<Expr>, BinOp, Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Small builder helpers standing in for the external parser in tests and demos.
/// Exists only so this crate is exercisable without a grammar front end.
pub mod builder {
    use super::*;

    pub fn program(children: Vec<LabelledBlock>) -> Program {
        Program {
            children: children.into_iter().map(TopLevel::Labelled).collect(),
        }
    }

    pub fn program_raw(children: Vec<TopLevel>) -> Program {
        Program { children }
    }

    pub fn block(label: &str, statements: Vec<Statement>) -> LabelledBlock {
        LabelledBlock {
            label: label.to_string(),
            statements,
        }
    }

    pub fn var(name: &str, initial: i64, maximum: i64) -> Statement {
        Statement::VarDeclaration(VarDeclaration {
            name: name.to_string(),
            initial,
            maximum,
        })
    }

    pub fn push(symbol: &str) -> Statement {
        Statement::Push(symbol.to_string())
    }

    pub fn mv(direction: MoveDirection) -> Statement {
        Statement::Move(direction)
    }

    pub fn halt(label: &str) -> Statement {
        Statement::Halt(label.to_string())
    }

    pub fn goto(label: &str) -> Statement {
        Statement::Goto(label.to_string())
    }

    pub fn assign(name: &str, expr: Expr) -> Statement {
        Statement::VarAssignment {
            name: name.to_string(),
            expr,
        }
    }

    pub fn ifread(symbol: &str, body: Vec<Statement>) -> Statement {
        Statement::IfRead {
            symbol: symbol.to_string(),
            body,
        }
    }

    pub fn ifcmp(lhs: Expr, comparator: Comparator, rhs: Expr, body: Vec<Statement>) -> Statement {
        Statement::IfComparison {
            lhs,
            comparator,
            rhs,
            body,
        }
    }

    pub fn num(n: i64) -> Expr {
        Expr::Number(n)
    }

    pub fn var_ref(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    pub fn binop(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
        Expr::BinOp(Box::new(lhs), op, Box::new(rhs))
    }
}
