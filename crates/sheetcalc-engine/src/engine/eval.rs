//! Left-to-right formula reduction.
//!
//! Formulas are reduced strictly in reading order with no operator
//! precedence: `2 * 3 + 4` is `(2 * 3) + 4` and `2 + 3 * 4` is `(2 + 3) * 4`.

use log::debug;

use super::format::format_number;
use super::token::{Token, Tokenizer};
use crate::error::{FormulaError, Result};
use crate::script::ScriptHost;

/// Supplies the displayed value of a referenced cell.
///
/// Implementations return the cell's effective value (already evaluated when
/// the cell holds a formula) and an empty string for unset cells.
pub trait Resolver {
    fn resolve(&mut self, address: &str) -> Result<String>;
}

impl<F> Resolver for F
where
    F: FnMut(&str) -> Result<String>,
{
    fn resolve(&mut self, address: &str) -> Result<String> {
        self(address)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => lhs / rhs,
        }
    }
}

/// What the reduction loop expects next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    /// Nothing consumed yet.
    Start,
    /// A value was just consumed.
    Value,
    Operator(Operator),
}

struct EvaluationState {
    acc: f64,
    pending: Pending,
}

impl EvaluationState {
    fn new() -> Self {
        EvaluationState {
            acc: 0.0,
            pending: Pending::Start,
        }
    }

    fn push_value(&mut self, value: f64, offset: usize) -> Result<()> {
        self.acc = match self.pending {
            Pending::Start => value,
            Pending::Operator(op) => op.apply(self.acc, value),
            Pending::Value => return Err(FormulaError::MissingOperator { offset }),
        };
        self.pending = Pending::Value;
        Ok(())
    }

    fn push_operator(&mut self, op: Operator, offset: usize) -> Result<()> {
        if self.pending != Pending::Value {
            return Err(FormulaError::UnexpectedOperator { offset });
        }
        self.pending = Pending::Operator(op);
        Ok(())
    }
}

fn operand<R: Resolver + ?Sized>(resolver: &mut R, address: &str) -> Result<f64> {
    let value = resolver.resolve(address)?;
    value
        .parse::<f64>()
        .map_err(|_| FormulaError::InvalidOperand {
            address: address.to_string(),
            value,
        })
}

/// Evaluate a formula (without its leading `=` or `@` marker).
///
/// Cell references are looked up through `resolver`. A function escape hands
/// the rest of the formula to `host` and returns its result as-is; without a
/// host that fails with [`FormulaError::NoScriptHost`].
pub fn evaluate<R: Resolver + ?Sized>(
    formula: &str,
    resolver: &mut R,
    host: Option<&dyn ScriptHost>,
) -> Result<String> {
    if formula.is_empty() {
        return Ok(String::new());
    }

    let mut tokenizer = Tokenizer::new(formula);
    let mut state = EvaluationState::new();

    loop {
        let more = tokenizer.read_next_token()?;
        let offset = tokenizer.offset();

        match tokenizer.current_token() {
            Token::Number(n) => state.push_value(n, offset)?,
            Token::CellReference(address) => {
                let value = operand(resolver, address)?;
                state.push_value(value, offset)?;
            }
            Token::Add => state.push_operator(Operator::Add, offset)?,
            Token::Subtract => state.push_operator(Operator::Subtract, offset)?,
            Token::Multiply => state.push_operator(Operator::Multiply, offset)?,
            Token::Divide => state.push_operator(Operator::Divide, offset)?,
            Token::FunctionEscape(source) => {
                debug!("function escape: {source:?}");
                let host = host.ok_or(FormulaError::NoScriptHost)?;
                return host.run_script(source);
            }
            Token::Whitespace | Token::End => {}
        }

        if !more {
            break;
        }
    }

    Ok(format_number(state.acc))
}

/// Strip the formula marker from stored cell text.
///
/// Returns `None` for literal text.
pub fn formula_body(raw: &str) -> Option<&str> {
    raw.strip_prefix('=').or_else(|| raw.strip_prefix('@'))
}

/// Displayed value of stored cell text: literals verbatim, formulas evaluated.
pub fn display_value<R: Resolver + ?Sized>(
    raw: &str,
    resolver: &mut R,
    host: Option<&dyn ScriptHost>,
) -> Result<String> {
    match formula_body(raw) {
        Some(formula) => evaluate(formula, resolver, host),
        None => Ok(raw.to_string()),
    }
}
