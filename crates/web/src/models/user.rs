//! User domain types.

use chrono::{DateTime, Utc};

use globetrot_core::{Email, UserId};

/// Marker colors offered on the new-traveler form.
///
/// These are CSS named colors, applied directly to the map highlight and
/// the member chips, so every entry must be a valid CSS color keyword.
pub const USER_COLORS: &[&str] = &[
    "teal",
    "powderblue",
    "red",
    "orange",
    "olive",
    "green",
    "blue",
    "violet",
    "purple",
    "pink",
];

/// Color used when a user row carries an unknown or empty color.
pub const DEFAULT_USER_COLOR: &str = "teal";

/// Maximum display name length (matches the column width).
pub const MAX_NAME_LENGTH: usize = 64;

/// A traveler whose visits are tracked.
///
/// In ambient mode users are created from the dashboard with just a name
/// and color; `email` is only present for users registered through the
/// session-mode signup flow.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name shown on the member switcher.
    pub name: String,
    /// CSS color for this user's map highlights.
    pub color: String,
    /// Sign-in email, if this user registered an account.
    pub email: Option<Email>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns the user's marker color, falling back to the default when
    /// the stored value is not in the offered palette.
    #[must_use]
    pub fn display_color(&self) -> &str {
        if USER_COLORS.contains(&self.color.as_str()) {
            &self.color
        } else {
            DEFAULT_USER_COLOR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user_with_color(color: &str) -> User {
        User {
            id: UserId::new(1),
            name: "Laharika".to_string(),
            color: color.to_string(),
            email: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn display_color_accepts_palette_entries() {
        assert_eq!(user_with_color("powderblue").display_color(), "powderblue");
        assert_eq!(user_with_color("teal").display_color(), "teal");
    }

    #[test]
    fn display_color_falls_back_for_unknown_values() {
        assert_eq!(user_with_color("").display_color(), DEFAULT_USER_COLOR);
        assert_eq!(
            user_with_color("not-a-css-color").display_color(),
            DEFAULT_USER_COLOR
        );
    }
}
