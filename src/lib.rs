pub mod engine;
pub mod format;
pub mod lexer;
pub mod ops;
pub mod steps;
pub mod validator;

use anyhow::{Context, Result};
// Re-export main types and functions for convenient use
pub use engine::{Evaluation, EvaluationError, evaluate, evaluate_flat};
pub use format::format_number;
pub use lexer::{Bracket, LexError, Lexer, Token, TokenSummary};
pub use ops::{Operator, apply};
pub use steps::Steps;
pub use validator::{ValidationError, validate};

/// Evaluate one line of user input.
///
/// This is a convenience wrapper around [`evaluate`] for interactive use: the
/// trailing line break is removed and errors are returned as `anyhow::Error`
/// carrying the offending input as context.
///
/// # Arguments
/// * `line` - One line of input, with or without its line terminator
///
/// # Returns
/// * `Ok(Evaluation)` - The numeric result and the recorded steps
/// * `Err(_)` - If validation or evaluation fails
///
/// # Errors
/// Returns an error if the expression is malformed or cannot be evaluated.
/// The underlying [`EvaluationError`] can be recovered with
/// `downcast_ref`.
///
/// # Examples
/// ```
/// use stepcalc::{EvaluationError, calculate};
///
/// let evaluation = calculate("2^3^2\n").unwrap();
/// assert_eq!(evaluation.value, 64.0);
///
/// let error = calculate("5/0").unwrap_err();
/// assert_eq!(
///     error.downcast_ref::<EvaluationError>(),
///     Some(&EvaluationError::DivisionByZero)
/// );
/// ```
pub fn calculate(line: &str) -> Result<Evaluation> {
    let expression = line.trim_end_matches(['\n', '\r']);
    let evaluation =
        evaluate(expression).with_context(|| format!("cannot evaluate '{expression}'"))?;
    Ok(evaluation)
}
