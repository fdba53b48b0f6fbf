//! Semantic status of enumerated values and its style token.

use serde::Deserialize;

/// Semantic status attached to an enumerated value, e.g. `active → Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Status {
    Success,
    Error,
    Processing,
    Warning,
    #[default]
    Default,
}

/// Renderer-neutral style token for a badge.
///
/// The UI layer maps each token to concrete colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleToken {
    Success,
    Danger,
    Info,
    Warning,
    Neutral,
}

/// Maps a semantic status to the token a badge is painted with.
pub const fn status_to_style_token(status: Status) -> StyleToken {
    match status {
        Status::Success => StyleToken::Success,
        Status::Error => StyleToken::Danger,
        Status::Processing => StyleToken::Info,
        Status::Warning => StyleToken::Warning,
        Status::Default => StyleToken::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_status_has_a_distinct_token() {
        let tokens = [
            Status::Success,
            Status::Error,
            Status::Processing,
            Status::Warning,
            Status::Default,
        ]
        .map(status_to_style_token);

        for (i, a) in tokens.iter().enumerate() {
            for b in &tokens[i + 1..] {
                assert_ne!(a, b, "tokens must not collide");
            }
        }
    }

    #[test]
    fn default_status_is_neutral() {
        assert_eq!(status_to_style_token(Status::default()), StyleToken::Neutral);
    }
}
