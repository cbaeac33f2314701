//! Advisory password-strength meter. It never blocks a submission.

/// Labels indexed by score (number of checks passed).
pub const STRENGTH_LABELS: [&str; 5] = ["Very weak", "Weak", "Fair", "Good", "Strong"];

/// Minimum length counted by the length check.
pub const MIN_LENGTH: usize = 8;

/// Result of the four independent checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Strength {
    pub long_enough: bool,
    pub has_uppercase: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
}

impl Strength {
    /// Number of checks passed, 0..=4.
    pub fn score(&self) -> usize {
        [
            self.long_enough,
            self.has_uppercase,
            self.has_digit,
            self.has_symbol,
        ]
        .iter()
        .filter(|&&ok| ok)
        .count()
    }

    pub fn label(&self) -> &'static str {
        STRENGTH_LABELS[self.score()]
    }
}

pub fn evaluate(password: &str) -> Strength {
    Strength {
        long_enough: password.chars().count() >= MIN_LENGTH,
        has_uppercase: password.chars().any(char::is_uppercase),
        has_digit: password.chars().any(|c| c.is_ascii_digit()),
        has_symbol: password.chars().any(|c| !c.is_alphanumeric()),
    }
}
