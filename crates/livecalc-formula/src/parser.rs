//! Formula parser
//!
//! A recursive descent parser for the simulator's formula language with
//! proper operator precedence.

use crate::ast::{BinaryOperator, Expr, Formula};
use crate::error::{FormulaError, FormulaResult};
use crate::functions::AggregateKind;
use crate::lexer::{Lexer, Token};
use livecalc_core::{CellAddress, CellRange};
use tracing::debug;

/// Deepest parenthesis/unary nesting accepted before giving up
const MAX_DEPTH: usize = 256;

/// Most binary operators one formula may contain. Operator chains build a
/// tree one level deeper per operator, and that tree is walked recursively.
const MAX_OPERATORS: usize = 1024;

/// Parse a formula string into a [`Formula`]
///
/// # Example
/// ```rust
/// use livecalc_formula::{parse_formula, Formula};
///
/// let formula = parse_formula("=1+2*A1").unwrap();
/// assert!(matches!(formula, Formula::Expression(_)));
///
/// let formula = parse_formula("=sum(A1:A10)").unwrap();
/// assert!(matches!(formula, Formula::Aggregate { .. }));
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<Formula> {
    // Formula must start with '='
    let body = formula
        .trim()
        .strip_prefix('=')
        .ok_or_else(|| FormulaError::syntax("missing leading ="))?;

    let mut parser = FormulaParser::new(body)?;
    let parsed = parser.parse_formula_body()?;

    debug!(formula = %parsed, "parsed formula");
    Ok(parsed)
}

/// Formula parser
struct FormulaParser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
    depth: usize,
    operators: usize,
}

impl<'a> FormulaParser<'a> {
    fn new(input: &'a str) -> FormulaResult<Self> {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token()?;
        Ok(Self {
            lexer,
            current_token,
            depth: 0,
            operators: 0,
        })
    }

    // === Token handling ===

    fn current_token(&self) -> &Token {
        &self.current_token
    }

    fn consume(&mut self) -> FormulaResult<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current_token, next))
    }

    fn expect(&mut self, expected: &Token) -> FormulaResult<()> {
        if self.current_token() == expected {
            self.consume()?;
            Ok(())
        } else {
            Err(self.unexpected(&format!("expected {}", expected.describe())))
        }
    }

    fn unexpected(&self, context: &str) -> FormulaError {
        FormulaError::syntax(format!(
            "{}, found {}",
            context,
            self.current_token().describe()
        ))
    }

    /// Consume a binary operator token, enforcing the operator limit
    fn consume_operator(&mut self) -> FormulaResult<()> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(FormulaError::syntax("expression too long"));
        }
        self.consume()?;
        Ok(())
    }

    fn expect_end(&mut self) -> FormulaResult<()> {
        if matches!(self.current_token(), Token::Eof) {
            Ok(())
        } else {
            Err(self.unexpected("expected end of formula"))
        }
    }

    // === Top level ===

    /// Either `NAME(ref:ref)` as the entire body, or an expression
    fn parse_formula_body(&mut self) -> FormulaResult<Formula> {
        if let Token::Identifier(name) = self.current_token().clone() {
            let kind = AggregateKind::from_name(&name)
                .ok_or_else(|| FormulaError::syntax(format!("unknown function '{}'", name)))?;
            self.consume()?;
            let range = self.parse_aggregate_argument(kind)?;
            self.expect_end()?;
            return Ok(Formula::Aggregate { kind, range });
        }

        let expr = self.parse_expression()?;
        self.expect_end()?;
        Ok(Formula::Expression(expr))
    }

    fn parse_aggregate_argument(&mut self, kind: AggregateKind) -> FormulaResult<CellRange> {
        self.expect(&Token::LeftParen)?;
        let start = self.parse_label(kind)?;
        self.expect(&Token::Colon)?;
        let end = self.parse_label(kind)?;
        self.expect(&Token::RightParen)?;
        Ok(CellRange::new(start, end))
    }

    fn parse_label(&mut self, kind: AggregateKind) -> FormulaResult<CellAddress> {
        match self.current_token().clone() {
            Token::CellRef(label) => {
                self.consume()?;
                Ok(CellAddress::parse(&label)?)
            }
            _ => Err(self.unexpected(&format!("{} expects a range like A1:B5", kind))),
        }
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Addition/Subtraction: +, -
    // 2. Multiplication/Division: *, /
    // 3. Exponentiation: ^
    // 4. Unary: -, +
    // 5. Primary: numbers, cell references, parentheses
    //
    // Every binary level is left-associative.

    fn parse_expression(&mut self) -> FormulaResult<Expr> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(FormulaError::syntax("expression nested too deeply"));
        }
        let expr = self.parse_additive();
        self.depth -= 1;
        expr
    }

    fn parse_additive(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_token() {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume_operator()?;
            let right = self.parse_multiplicative()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_exponent()?;

        loop {
            let op = match self.current_token() {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.consume_operator()?;
            let right = self.parse_exponent()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_exponent(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_unary()?;

        while matches!(self.current_token(), Token::Caret) {
            self.consume_operator()?;
            let right = self.parse_unary()?;
            left = Expr::binary(BinaryOperator::Power, left, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> FormulaResult<Expr> {
        match self.current_token() {
            Token::Minus => {
                self.consume()?;
                let operand = self.parse_nested_unary()?;
                Ok(Expr::negate(operand))
            }
            // Prefix plus (no-op)
            Token::Plus => {
                self.consume()?;
                self.parse_nested_unary()
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_nested_unary(&mut self) -> FormulaResult<Expr> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(FormulaError::syntax("expression nested too deeply"));
        }
        let expr = self.parse_unary();
        self.depth -= 1;
        expr
    }

    fn parse_primary(&mut self) -> FormulaResult<Expr> {
        match self.current_token().clone() {
            Token::Number(n) => {
                self.consume()?;
                Ok(Expr::Number(n))
            }

            Token::CellRef(label) => {
                self.consume()?;
                if matches!(self.current_token(), Token::Colon) {
                    return Err(FormulaError::syntax(format!(
                        "range {}:... is only allowed as the argument of an aggregate",
                        label
                    )));
                }
                Ok(Expr::CellRef(CellAddress::parse(&label)?))
            }

            Token::LeftParen => {
                self.consume()?;
                let expr = self.parse_expression()?;
                self.expect(&Token::RightParen)?;
                Ok(expr)
            }

            Token::Identifier(name) => Err(match AggregateKind::from_name(&name) {
                Some(kind) => FormulaError::syntax(format!(
                    "{} must be the whole formula, as in ={}(A1:A3)",
                    kind, kind
                )),
                None => FormulaError::syntax(format!("unknown name '{}'", name)),
            }),

            _ => Err(self.unexpected("expected a number, cell reference or '('")),
        }
    }
}
