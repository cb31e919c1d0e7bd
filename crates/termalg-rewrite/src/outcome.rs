//! Rule outcomes.

/// The result of trying a rule: it either produced something or declined.
///
/// Declining is ordinary control flow; callers move on to the next rule.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    /// The rule acted and produced a new value.
    Applied(T),
    /// The rule does not apply to this input.
    NotApplicable,
}

impl<T> Outcome<T> {
    /// Returns true if the rule acted.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    /// Maps the applied value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Applied(v) => Outcome::Applied(f(v)),
            Outcome::NotApplicable => Outcome::NotApplicable,
        }
    }

    /// Converts into an `Option`.
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(v) => Some(v),
            Outcome::NotApplicable => None,
        }
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Outcome::Applied(v),
            None => Outcome::NotApplicable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_conversions() {
        let o: Outcome<i32> = Some(3).into();
        assert!(o.is_applied());
        assert_eq!(o.clone().map(|v| v * 2), Outcome::Applied(6));
        assert_eq!(o.applied(), Some(3));

        let n: Outcome<i32> = None.into();
        assert_eq!(n.applied(), None);
    }
}
