//! Password strength heuristic
//!
//! Length plus character-class variety, scored the same way the
//! original app scored passwords on entry: up to 2 points for length
//! and 1 point per ASCII class present.

/// Strength classification for a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

impl Strength {
    /// Human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Weak => "weak",
            Strength::Medium => "medium",
            Strength::Strong => "strong",
        }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw strength score: length points (>=12 chars: 2, >=8: 1) plus one
/// point for each of uppercase, lowercase, digit, and other characters
/// present.
pub fn score(password: &str) -> u32 {
    let length_score = match password.len() {
        n if n >= 12 => 2,
        n if n >= 8 => 1,
        _ => 0,
    };

    let classes = [
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let complexity_score = classes.iter().filter(|present| **present).count() as u32;

    length_score + complexity_score
}

/// Classify a password: score >= 5 is strong, >= 3 medium, else weak.
pub fn evaluate(password: &str) -> Strength {
    match score(password) {
        s if s >= 5 => Strength::Strong,
        s if s >= 3 => Strength::Medium,
        _ => Strength::Weak,
    }
}
