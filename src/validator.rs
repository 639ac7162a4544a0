use thiserror::Error;

use crate::lexer::{LexError, Lexer, Token};

/// Reasons an expression is rejected before evaluation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The text contains a character or literal outside the grammar, or no
    /// tokens at all.
    #[error("Invalid expression format at position {position}")]
    InvalidFormat { position: usize },
    /// A closing bracket with no open bracket, or of the wrong shape.
    #[error("Mismatched brackets at position {position}")]
    MismatchedBrackets { position: usize },
    /// Opening brackets still open at the end of the input.
    #[error("Unclosed brackets ({count} left open)")]
    UnclosedBrackets { count: usize },
}

/// Checks that `expression` can be evaluated.
///
/// The input, ignoring whitespace, must be one or more numbers, operators
/// and brackets, and every bracket must be closed by a bracket of the same
/// shape in properly nested order. Whether operators and operands alternate
/// is not checked here.
///
/// # Errors
/// * `InvalidFormat` - a character no token accepts, or an empty input
/// * `MismatchedBrackets` - a stray or wrongly shaped closing bracket
/// * `UnclosedBrackets` - an opening bracket that is never closed
///
/// # Examples
/// ```
/// use stepcalc::{ValidationError, validate};
///
/// assert!(validate("{1 + 2} * (3)").is_ok());
/// assert!(matches!(
///     validate("(1+2}"),
///     Err(ValidationError::MismatchedBrackets { position: 4 })
/// ));
/// ```
pub fn validate(expression: &str) -> Result<(), ValidationError> {
    let tokens = check_format(expression)?;
    check_brackets(&tokens)
}

fn check_format(expression: &str) -> Result<Vec<(usize, Token<'_>)>, ValidationError> {
    let tokens = Lexer::new(expression)
        .collect::<Result<Vec<_>, LexError>>()
        .map_err(|e| ValidationError::InvalidFormat {
            position: e.position,
        })?;

    if tokens.is_empty() {
        return Err(ValidationError::InvalidFormat {
            position: expression.len(),
        });
    }
    Ok(tokens)
}

fn check_brackets(tokens: &[(usize, Token<'_>)]) -> Result<(), ValidationError> {
    let mut open = Vec::new();

    for &(position, token) in tokens {
        match token {
            Token::Open(bracket) => open.push(bracket),
            Token::Close(bracket) => {
                if open.pop() != Some(bracket) {
                    return Err(ValidationError::MismatchedBrackets { position });
                }
            }
            Token::Number { .. } | Token::Operator(_) => {}
        }
    }

    if open.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::UnclosedBrackets { count: open.len() })
    }
}
