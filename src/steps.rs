/// Ordered log of the rewrites and reductions made during one evaluation.
///
/// A step is only appended when it differs from the step right before it;
/// identical steps further apart are kept.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Steps {
    entries: Vec<String>,
}

impl Steps {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends `step` unless it repeats the latest entry.
    ///
    /// Returns whether the step was recorded.
    ///
    /// # Examples
    /// ```
    /// use stepcalc::Steps;
    ///
    /// let mut steps = Steps::new();
    /// assert!(steps.record("1+2"));
    /// assert!(!steps.record("1+2"));
    /// assert!(steps.record("3"));
    /// assert_eq!(steps.len(), 2);
    /// ```
    pub fn record(&mut self, step: impl Into<String>) -> bool {
        let step = step.into();
        if self.last() == Some(step.as_str()) {
            return false;
        }
        log::trace!("step {}: {step}", self.entries.len() + 1);
        self.entries.push(step);
        true
    }

    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }
}

/// One step per line, numbered from 1.
impl std::fmt::Display for Steps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, step) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}. {step}", i + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_duplicates_suppressed() {
        let mut steps = Steps::new();
        steps.record("(1+2)*3");
        steps.record("1 + 2 = 3");
        steps.record("1 + 2 = 3");
        steps.record("3*3");
        assert_eq!(steps.into_vec(), vec!["(1+2)*3", "1 + 2 = 3", "3*3"]);
    }

    #[test]
    fn test_non_adjacent_duplicates_kept() {
        let mut steps = Steps::new();
        steps.record("1 + 1 = 2");
        steps.record("2 + 2 = 4");
        steps.record("1 + 1 = 2");
        assert_eq!(steps.len(), 3);
    }

    #[test]
    fn test_empty() {
        let steps = Steps::new();
        assert!(steps.is_empty());
        assert_eq!(steps.last(), None);
        assert_eq!(steps.to_string(), "");
    }

    #[test]
    fn test_display_is_one_indexed() {
        let mut steps = Steps::new();
        steps.record("2*3");
        steps.record("2 * 3 = 6");
        steps.record("6");
        assert_eq!(steps.to_string(), "1. 2*3\n2. 2 * 3 = 6\n3. 6");
    }
}
