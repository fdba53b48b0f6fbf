//! Shared color constants for the UI.

use egui::Color32;
use yishan_business::StyleToken;

/// Forest green color for healthy/enabled/success status.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Red color for errors, disabled status and destructive actions.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Amber color for warnings.
pub const COLOR_AMBER: Color32 = Color32::from_rgb(255, 193, 7);

/// Blue color for in-progress/informational status.
pub const COLOR_BLUE: Color32 = Color32::from_rgb(24, 144, 255);

/// Gray color for neutral status.
pub const COLOR_GRAY: Color32 = Color32::from_rgb(140, 140, 140);

/// Border color of tables and cards (subtle gray).
pub const BORDER_COLOR: Color32 = Color32::from_rgb(200, 200, 200);

/// Background of table headers and stat cards (light gray).
pub const HEADER_BG_COLOR: Color32 = Color32::from_rgb(245, 245, 245);

/// Foreground color of a badge with the given style token.
pub const fn style_token_color(token: StyleToken) -> Color32 {
    match token {
        StyleToken::Success => COLOR_GREEN,
        StyleToken::Danger => COLOR_RED,
        StyleToken::Info => COLOR_BLUE,
        StyleToken::Warning => COLOR_AMBER,
        StyleToken::Neutral => COLOR_GRAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_token_has_its_own_color() {
        let tokens = [
            StyleToken::Success,
            StyleToken::Danger,
            StyleToken::Info,
            StyleToken::Warning,
            StyleToken::Neutral,
        ];
        for (i, a) in tokens.iter().enumerate() {
            for b in &tokens[i + 1..] {
                assert_ne!(style_token_color(*a), style_token_color(*b), "{a:?} vs {b:?}");
            }
        }
    }
}
