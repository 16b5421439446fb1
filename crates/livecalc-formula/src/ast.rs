//! Formula Abstract Syntax Tree types

use crate::format::format_number;
use crate::functions::AggregateKind;
use livecalc_core::{CellAddress, CellRange};
use std::fmt;

/// A parsed formula
///
/// Parsing decides once whether the body is a whole-formula aggregate call
/// or a plain arithmetic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    /// `NAME(start:end)` and nothing else
    Aggregate { kind: AggregateKind, range: CellRange },
    /// Arithmetic over numbers and cell references
    Expression(Expr),
}

/// Arithmetic expression AST
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal
    Number(f64),
    /// Single cell reference
    CellRef(CellAddress),
    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOperator {
    /// Binding strength; higher binds tighter
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 1,
            BinaryOperator::Multiply | BinaryOperator::Divide => 2,
            BinaryOperator::Power => 3,
        }
    }

    /// The operator's symbol
    pub fn symbol(self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
            BinaryOperator::Power => '^',
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
}

impl Expr {
    /// Shorthand for building a binary node
    pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Shorthand for building a negation node
    pub fn negate(operand: Expr) -> Self {
        Expr::UnaryOp {
            op: UnaryOperator::Negate,
            operand: Box::new(operand),
        }
    }
}

// Unary minus binds tighter than every binary operator
const UNARY_PRECEDENCE: u8 = 4;

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, min_precedence: u8) -> fmt::Result {
    let precedence = match expr {
        Expr::BinaryOp { op, .. } => op.precedence(),
        Expr::UnaryOp { .. } => UNARY_PRECEDENCE,
        _ => u8::MAX,
    };
    if precedence < min_precedence {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => f.write_str(&format_number(*n, 0)),
            Expr::CellRef(addr) => write!(f, "{}", addr),
            Expr::BinaryOp { op, left, right } => {
                // All operators are left-associative, so an equal-precedence
                // right operand needs parentheses
                write_operand(f, left, op.precedence())?;
                write!(f, "{}", op.symbol())?;
                write_operand(f, right, op.precedence() + 1)
            }
            Expr::UnaryOp {
                op: UnaryOperator::Negate,
                operand,
            } => {
                f.write_str("-")?;
                write_operand(f, operand, UNARY_PRECEDENCE)
            }
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Aggregate { kind, range } => {
                write!(f, "={}({}:{})", kind.name(), range.start, range.end)
            }
            Formula::Expression(expr) => write!(f, "={}", expr),
        }
    }
}
