use std::str::CharIndices;

use thiserror::Error;

use crate::ops::Operator;

/// The two bracket shapes. An opener only pairs with a closer of the same
/// shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bracket {
    /// ( )
    Round,
    /// { }
    Curly,
}

impl Bracket {
    #[must_use]
    pub const fn from_open(ch: char) -> Option<Self> {
        match ch {
            '(' => Some(Self::Round),
            '{' => Some(Self::Curly),
            _ => None,
        }
    }

    #[must_use]
    pub const fn from_close(ch: char) -> Option<Self> {
        match ch {
            ')' => Some(Self::Round),
            '}' => Some(Self::Curly),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_open(ch: char) -> bool {
        Self::from_open(ch).is_some()
    }

    #[must_use]
    pub const fn is_close(ch: char) -> bool {
        Self::from_close(ch).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'input> {
    /// Integer or decimal literal, with the text it was read from
    Number { value: f64, text: &'input str },
    Operator(Operator),
    Open(Bracket),
    Close(Bracket),
}

/// A character (or malformed literal) that no token class accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unexpected character at position {position}")]
pub struct LexError {
    /// Byte offset into the scanned text
    pub position: usize,
}

/// States of the number-literal scanner: `digits ('.' digits)?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    Integer,
    Point,
    Fraction,
}

/// Splits expression text into tokens, skipping whitespace.
///
/// Iterating yields each token with the byte offset it starts at.
pub struct Lexer<'input> {
    input: &'input str,
    chars: CharIndices<'input>,
    current: Option<(usize, char)>,
}

impl<'input> Lexer<'input> {
    #[must_use]
    pub fn new(input: &'input str) -> Self {
        let mut chars = input.char_indices();
        let current = chars.next();
        Self {
            input,
            chars,
            current,
        }
    }

    /// Tokenizes the whole input.
    ///
    /// # Errors
    /// Returns a `LexError` at the first character that does not start or
    /// continue a valid token.
    ///
    /// # Examples
    /// ```
    /// use stepcalc::{Lexer, Operator, Token};
    ///
    /// let tokens = Lexer::new("1.5 * 2").tokenize().unwrap();
    /// assert_eq!(tokens[1], Token::Operator(Operator::Mul));
    /// assert!(Lexer::new("1.5.2").tokenize().is_err());
    /// ```
    pub fn tokenize(&mut self) -> Result<Vec<Token<'input>>, LexError> {
        self.map(|item| item.map(|(_, token)| token)).collect()
    }

    fn advance(&mut self) {
        self.current = self.chars.next();
    }

    fn skip_whitespace(&mut self) {
        while let Some((_, ch)) = self.current {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self, start: usize) -> Result<Token<'input>, LexError> {
        let mut state = NumberState::Integer;
        let mut end = start;

        while let Some((pos, ch)) = self.current {
            state = match (state, ch) {
                (NumberState::Integer, '0'..='9') => NumberState::Integer,
                (NumberState::Integer, '.') => NumberState::Point,
                (NumberState::Point | NumberState::Fraction, '0'..='9') => NumberState::Fraction,
                _ => break,
            };
            end = pos + ch.len_utf8();
            self.advance();
        }

        // A decimal point must be followed by at least one digit
        if state == NumberState::Point {
            return Err(LexError { position: end - 1 });
        }

        let text = &self.input[start..end];
        let value = text.parse().map_err(|_| LexError { position: start })?;
        Ok(Token::Number { value, text })
    }
}

impl<'input> Iterator for Lexer<'input> {
    type Item = Result<(usize, Token<'input>), LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();
        let (position, ch) = self.current?;

        let token = if ch.is_ascii_digit() {
            self.read_number(position)
        } else if let Some(op) = Operator::from_char(ch) {
            self.advance();
            Ok(Token::Operator(op))
        } else if let Some(bracket) = Bracket::from_open(ch) {
            self.advance();
            Ok(Token::Open(bracket))
        } else if let Some(bracket) = Bracket::from_close(ch) {
            self.advance();
            Ok(Token::Close(bracket))
        } else {
            Err(LexError { position })
        };

        if token.is_err() {
            // Stop after the first error
            self.current = None;
        }
        Some(token.map(|token| (position, token)))
    }
}

/// Every substring of an expression that belongs to each token class.
///
/// This is a diagnostic listing only; unlike [`Lexer`] it never fails and
/// simply skips characters that belong to no class.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenSummary<'input> {
    pub numbers: Vec<&'input str>,
    pub operators: Vec<char>,
    pub brackets: Vec<char>,
}

impl<'input> TokenSummary<'input> {
    /// Collects number, operator and bracket matches from `input`.
    ///
    /// # Examples
    /// ```
    /// use stepcalc::TokenSummary;
    ///
    /// let summary = TokenSummary::scan("{1.5 + x} * 20");
    /// assert_eq!(summary.numbers, vec!["1.5", "20"]);
    /// assert_eq!(summary.operators, vec!['+', '*']);
    /// assert_eq!(summary.brackets, vec!['{', '}']);
    /// ```
    #[must_use]
    pub fn scan(input: &'input str) -> Self {
        let mut summary = Self::default();
        let bytes = input.as_bytes();
        let mut i = 0;

        while i < bytes.len() {
            let ch = char::from(bytes[i]);
            if ch.is_ascii_digit() {
                let start = i;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
                    i += 1;
                    while i < bytes.len() && bytes[i].is_ascii_digit() {
                        i += 1;
                    }
                }
                summary.numbers.push(&input[start..i]);
                continue;
            }

            if Operator::is_symbol(ch) {
                summary.operators.push(ch);
            } else if Bracket::is_open(ch) || Bracket::is_close(ch) {
                summary.brackets.push(ch);
            }
            i += 1;
        }

        summary
    }
}

impl std::fmt::Display for TokenSummary<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let join = |chars: &[char]| chars.iter().map(char::to_string).collect::<Vec<_>>().join(" ");
        write!(
            f,
            "numbers: [{}] operators: [{}] brackets: [{}]",
            self.numbers.join(" "),
            join(&self.operators),
            join(&self.brackets),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn number(text: &str) -> Token<'_> {
        Token::Number {
            value: text.parse().unwrap(),
            text,
        }
    }

    #[test]
    fn test_tokenize_operators() {
        let tokens = Lexer::new("+-*/^").tokenize().unwrap();
        assert_eq!(
            tokens,
            Operator::ALL.map(Token::Operator).to_vec(),
        );
    }

    #[test]
    fn test_tokenize_brackets() {
        let tokens = Lexer::new("({})").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Open(Bracket::Round),
                Token::Open(Bracket::Curly),
                Token::Close(Bracket::Curly),
                Token::Close(Bracket::Round),
            ]
        );
    }

    #[test]
    fn test_tokenize_numbers() {
        let tokens = Lexer::new("0 42 3.14 007").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![number("0"), number("42"), number("3.14"), number("007")]
        );
    }

    #[test]
    fn test_tokenize_expression_with_whitespace() {
        let tokens = Lexer::new("  2 +\t3 ").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![number("2"), Token::Operator(Operator::Add), number("3")]
        );
    }

    #[test]
    fn test_positions() {
        let positions: Vec<usize> = Lexer::new("12 + (3)")
            .map(|item| item.unwrap().0)
            .collect();
        assert_eq!(positions, vec![0, 3, 5, 6, 7]);
    }

    #[test]
    fn test_malformed_numbers() {
        assert_eq!(
            Lexer::new("1.").tokenize(),
            Err(LexError { position: 1 })
        );
        assert_eq!(
            Lexer::new("1.+2").tokenize(),
            Err(LexError { position: 1 })
        );
        assert_eq!(
            Lexer::new(".5").tokenize(),
            Err(LexError { position: 0 })
        );
        assert_eq!(
            Lexer::new("1.2.3").tokenize(),
            Err(LexError { position: 3 })
        );
    }

    #[test]
    fn test_unexpected_character() {
        let result = Lexer::new("2 + x").tokenize();
        assert_eq!(result, Err(LexError { position: 4 }));
        assert!(result.unwrap_err().to_string().contains("Unexpected character"));
    }

    #[test]
    fn test_iteration_stops_after_error() {
        let items: Vec<_> = Lexer::new("1 a 2").collect();
        assert_eq!(items.len(), 2);
        assert!(items[1].is_err());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Lexer::new("").tokenize().unwrap(), vec![]);
        assert_eq!(Lexer::new("   ").tokenize().unwrap(), vec![]);
    }

    #[test]
    fn test_summary_finds_matches_in_invalid_text() {
        let summary = TokenSummary::scan("1.2.3 & 4.");
        assert_eq!(summary.numbers, vec!["1.2", "3", "4"]);
        assert!(summary.operators.is_empty());
        assert!(summary.brackets.is_empty());
    }

    #[test]
    fn test_summary_display() {
        let summary = TokenSummary::scan("(1+2)*3");
        assert_eq!(
            summary.to_string(),
            "numbers: [1 2 3] operators: [+ *] brackets: [( )]"
        );
    }
}
