use crate::engine::EvaluationError;

/// Binary operators understood by the calculator.
///
/// The variants, their symbols and their precedence form a fixed table; there
/// is no way to register additional operators at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// +
    Add,
    /// -
    Sub,
    /// *
    Mul,
    /// /
    Div,
    /// ^
    Pow,
}

impl Operator {
    /// Every recognised operator, in symbol order `+ - * / ^`.
    pub const ALL: [Self; 5] = [Self::Add, Self::Sub, Self::Mul, Self::Div, Self::Pow];

    /// Looks up the operator written as `symbol`.
    ///
    /// # Examples
    /// ```
    /// use stepcalc::Operator;
    ///
    /// assert_eq!(Operator::from_char('^'), Some(Operator::Pow));
    /// assert_eq!(Operator::from_char('%'), None);
    /// ```
    #[must_use]
    pub const fn from_char(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            '^' => Some(Self::Pow),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_symbol(symbol: char) -> bool {
        Self::from_char(symbol).is_some()
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }

    /// Binding strength: `^` = 3, `*` and `/` = 2, `+` and `-` = 1.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Pow => 3,
            Self::Mul | Self::Div => 2,
            Self::Add | Self::Sub => 1,
        }
    }

    /// Applies the operator to `lhs` and `rhs`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` when dividing by exactly zero.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, EvaluationError> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Sub => Ok(lhs - rhs),
            Self::Mul => Ok(lhs * rhs),
            Self::Div => {
                if rhs == 0.0 {
                    return Err(EvaluationError::DivisionByZero);
                }
                Ok(lhs / rhs)
            }
            Self::Pow => Ok(lhs.powf(rhs)),
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Applies the operator written as `op` to `a` and `b`.
///
/// # Errors
/// * `InvalidOperator` - `op` is not one of `+ - * / ^`
/// * `DivisionByZero` - `op` is `/` and `b` is zero
///
/// # Examples
/// ```
/// use stepcalc::apply;
///
/// assert_eq!(apply(2.0, 10.0, '^').unwrap(), 1024.0);
/// assert!(apply(1.0, 0.0, '/').is_err());
/// assert!(apply(1.0, 2.0, '%').is_err());
/// ```
pub fn apply(a: f64, b: f64, op: char) -> Result<f64, EvaluationError> {
    Operator::from_char(op)
        .ok_or(EvaluationError::InvalidOperator(op))?
        .apply(a, b)
}
