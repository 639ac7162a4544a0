use log::{debug, trace};
use thiserror::Error;

use crate::{
    format::format_number,
    lexer::{Bracket, Lexer, Token, TokenSummary},
    ops::Operator,
    steps::Steps,
    validator::{ValidationError, validate},
};

/// Errors that can occur while evaluating an expression.
///
/// Any of these aborts the whole evaluation; no partial result or step list
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// The expression was rejected before evaluation started.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// An opening bracket with no closing bracket after it was found while
    /// resolving brackets.
    #[error("Mismatched parentheses: no closing bracket after position {position}")]
    MismatchedParentheses { position: usize },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Invalid operator '{0}'")]
    InvalidOperator(char),
    /// The operands and operators of a bracket-free span do not reduce to a
    /// single value. Contains a description of the problem.
    #[error("Malformed expression: {0}")]
    MalformedExpression(String),
}

/// The outcome of a successful evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub value: f64,
    /// Every rewrite and reduction, starting with the original expression
    pub steps: Steps,
}

/// Reduces a bracket-free span to a single formatted value.
///
/// Uses operator-precedence evaluation with an operand stack and an operator
/// stack. When an operator arrives, every stacked operator of equal or
/// higher precedence is applied first, so operators of the same precedence
/// (including `^`) are evaluated left to right. Each application is recorded
/// in `steps` as `"<a> <op> <b> = <result>"`.
///
/// A `-` where an operand is expected (at the start of the span or right
/// after another operator) is read as the sign of the following number, so
/// negative sub-results spliced back into an expression can be read again.
///
/// # Errors
/// * `DivisionByZero` - a division by exactly zero
/// * `MalformedExpression` - the span contains brackets or unreadable text,
///   or its operands and operators do not pair up
///
/// # Examples
/// ```
/// use stepcalc::{Steps, evaluate_flat};
///
/// let mut steps = Steps::new();
/// let result = evaluate_flat("2 + 3 * 4", &mut steps).unwrap();
/// assert_eq!(result, "14");
/// assert_eq!(steps.into_vec(), vec!["3 * 4 = 12", "2 + 12 = 14"]);
/// ```
pub fn evaluate_flat(span: &str, steps: &mut Steps) -> Result<String, EvaluationError> {
    let tokens = Lexer::new(span)
        .tokenize()
        .map_err(|e| EvaluationError::MalformedExpression(format!("{e} in '{span}'")))?;

    let mut operands: Vec<f64> = Vec::new();
    let mut operators: Vec<Operator> = Vec::new();
    let mut expect_operand = true;
    let mut negate = false;

    for token in tokens {
        match token {
            Token::Number { value, .. } => {
                operands.push(if negate { -value } else { value });
                negate = false;
                expect_operand = false;
            }
            Token::Operator(Operator::Sub) if expect_operand && !negate => negate = true,
            Token::Operator(op) => {
                while let Some(&top) = operators.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    operators.pop();
                    reduce(top, &mut operands, steps)?;
                }
                operators.push(op);
                expect_operand = true;
            }
            Token::Open(_) | Token::Close(_) => {
                return Err(EvaluationError::MalformedExpression(format!(
                    "unexpected bracket in '{span}'"
                )));
            }
        }
    }

    if negate {
        return Err(EvaluationError::MalformedExpression(format!(
            "dangling sign in '{span}'"
        )));
    }

    while let Some(op) = operators.pop() {
        reduce(op, &mut operands, steps)?;
    }

    match operands.as_slice() {
        [value] => Ok(format_number(*value)),
        [] => Err(EvaluationError::MalformedExpression(format!(
            "nothing to evaluate in '{span}'"
        ))),
        _ => Err(EvaluationError::MalformedExpression(format!(
            "{} operands without operators in '{span}'",
            operands.len()
        ))),
    }
}

/// Pops two operands, applies `op` and pushes the result back.
fn reduce(op: Operator, operands: &mut Vec<f64>, steps: &mut Steps) -> Result<(), EvaluationError> {
    let (Some(rhs), Some(lhs)) = (operands.pop(), operands.pop()) else {
        return Err(EvaluationError::MalformedExpression(format!(
            "operator '{op}' is missing an operand"
        )));
    };

    let result = op.apply(lhs, rhs)?;
    let step = format!(
        "{} {op} {} = {}",
        format_number(lhs),
        format_number(rhs),
        format_number(result)
    );
    trace!("reduced {step}");
    steps.record(step);
    operands.push(result);
    Ok(())
}

/// Replaces every bracket pair in `current` with its formatted value,
/// innermost first, recording the rewritten text after each replacement.
///
/// The right-most opening bracket has no opener after it, so the first
/// closing bracket that follows must be its partner once the brackets are
/// known to be balanced; the pair encloses no other brackets.
fn resolve_brackets(current: &mut String, steps: &mut Steps) -> Result<(), EvaluationError> {
    while let Some(open) = current.rfind(Bracket::is_open) {
        let close = current[open..]
            .find(Bracket::is_close)
            .map(|offset| open + offset)
            .ok_or(EvaluationError::MismatchedParentheses { position: open })?;

        let inner = evaluate_flat(&current[open + 1..close], steps)?;
        current.replace_range(open..=close, &inner);
        debug!("resolved brackets at {open}..={close}: {current}");
        steps.record(current.as_str());
    }
    Ok(())
}

/// Evaluates an arithmetic expression and records how it was reduced.
///
/// The expression is validated, then bracket pairs are resolved innermost
/// first: the contents of each pair are reduced with [`evaluate_flat`] and
/// the formatted value is written back in place of the pair. Whatever
/// remains is reduced last.
///
/// Intermediate values are written back rounded to two decimal places, so
/// precision beyond that is lost at every bracket level.
///
/// # Arguments
/// * `expression` - The expression text, e.g. `"(2 + 3) * 4"`
///
/// # Returns
/// The numeric result and every step, beginning with `expression` itself.
///
/// # Errors
/// * `Validation` - the expression is not well formed (see [`validate`])
/// * `DivisionByZero` - a division by exactly zero
/// * `MalformedExpression` - operands and operators do not pair up
///
/// # Examples
/// ```
/// use stepcalc::evaluate;
///
/// let evaluation = evaluate("(2+3)*4").unwrap();
/// assert_eq!(evaluation.value, 20.0);
/// assert_eq!(
///     evaluation.steps.into_vec(),
///     vec!["(2+3)*4", "2 + 3 = 5", "5*4", "5 * 4 = 20", "20"]
/// );
/// ```
pub fn evaluate(expression: &str) -> Result<Evaluation, EvaluationError> {
    validate(expression)?;
    debug!("evaluating '{expression}' ({})", TokenSummary::scan(expression));

    let mut steps = Steps::new();
    steps.record(expression);

    let mut current = expression.to_string();
    resolve_brackets(&mut current, &mut steps)?;

    if current.contains(Operator::is_symbol) {
        let result = evaluate_flat(&current, &mut steps)?;
        steps.record(result);
    }

    let last = steps.last().unwrap_or(expression).trim();
    let value = last.parse().map_err(|_| {
        EvaluationError::MalformedExpression(format!("'{last}' is not a single number"))
    })?;

    Ok(Evaluation { value, steps })
}
