//! Password strength scoring.

/// Scores `password` from 0 to 4.
///
/// One point each for: length >= 8, length >= 12, both lower and upper case
/// letters, a digit, a character that is not an ASCII letter or digit.
/// The sum is capped at 4.
pub fn password_strength(password: &str) -> u8 {
    let length = password.chars().count();

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_ascii_alphanumeric());

    let score = [
        length >= 8,
        length >= 12,
        has_lower && has_upper,
        has_digit,
        has_symbol,
    ]
    .into_iter()
    .filter(|met| *met)
    .count();

    score.min(4) as u8
}

/// Display bucket for a strength score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Fair,
    Strong,
    VeryStrong,
}

impl StrengthLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => Self::VeryWeak,
            1 => Self::Weak,
            2 => Self::Fair,
            3 => Self::Strong,
            _ => Self::VeryStrong,
        }
    }

    pub fn of(password: &str) -> Self {
        Self::from_score(password_strength(password))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryWeak => "Very Weak",
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
        }
    }
}
