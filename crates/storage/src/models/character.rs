use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const DEFAULT_ELO: i32 = 1000;

/// Width of the `VARCHAR` name columns in the `characters` table.
pub const MAX_NAME_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Character {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub image_path: Option<String>,
    pub elo: i32,
    pub recent_change: i32,
    pub wins: i32,
    pub losses: i32,
    pub created_at: chrono::NaiveDateTime,
}

impl Character {
    /// Full display name, e.g. "Satoru Gojo".
    pub fn name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }
}

/// A roster entry that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewCharacter {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub image_path: Option<String>,
    pub elo: i32,
    pub recent_change: i32,
    pub wins: i32,
    pub losses: i32,
}

impl NewCharacter {
    /// Builds a fresh entry from a scraped name. The first word becomes the
    /// first name and the remainder the last name.
    pub fn from_name(name: &str, image_path: Option<String>) -> Self {
        let normalized = name.split_whitespace().collect::<Vec<_>>().join(" ");
        let (first_name, last_name) = match normalized.split_once(' ') {
            Some((first, rest)) => (first.to_string(), rest.to_string()),
            None => (normalized, String::new()),
        };

        Self {
            first_name,
            last_name,
            title: String::new(),
            image_path,
            elo: DEFAULT_ELO,
            recent_change: 0,
            wins: 0,
            losses: 0,
        }
    }

    pub fn name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }

    /// Whether every name column fits the table definition.
    pub fn fits_columns(&self) -> bool {
        [&self.first_name, &self.last_name, &self.title]
            .iter()
            .all(|value| value.chars().count() <= MAX_NAME_CHARS)
    }
}

fn join_name(first: &str, last: &str) -> String {
    format!("{} {}", first, last).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_splits_on_first_space() {
        let entry = NewCharacter::from_name("Ryomen  Sukuna\n", None);
        assert_eq!(entry.first_name, "Ryomen");
        assert_eq!(entry.last_name, "Sukuna");
        assert_eq!(entry.name(), "Ryomen Sukuna");
    }

    #[test]
    fn test_from_name_keeps_multi_word_last_name() {
        let entry = NewCharacter::from_name("Kento Nanami Jr", None);
        assert_eq!(entry.first_name, "Kento");
        assert_eq!(entry.last_name, "Nanami Jr");
    }

    #[test]
    fn test_from_name_single_word() {
        let entry = NewCharacter::from_name("Mahito", Some("/img.png".into()));
        assert_eq!(entry.first_name, "Mahito");
        assert_eq!(entry.last_name, "");
        assert_eq!(entry.name(), "Mahito");
        assert_eq!(entry.image_path.as_deref(), Some("/img.png"));
    }

    #[test]
    fn test_defaults() {
        let entry = NewCharacter::from_name("Yuji Itadori", None);
        assert_eq!(entry.elo, DEFAULT_ELO);
        assert_eq!(entry.recent_change, 0);
        assert_eq!(entry.wins, 0);
        assert_eq!(entry.losses, 0);
        assert!(entry.title.is_empty());
    }

    #[test]
    fn test_fits_columns_counts_characters_per_column() {
        let at_limit = format!("{} {}", "a".repeat(MAX_NAME_CHARS), "b".repeat(MAX_NAME_CHARS));
        assert!(NewCharacter::from_name(&at_limit, None).fits_columns());

        let first_too_long = "a".repeat(MAX_NAME_CHARS + 1);
        assert!(!NewCharacter::from_name(&first_too_long, None).fits_columns());

        let last_too_long = format!("Kenjaku {}", "b".repeat(MAX_NAME_CHARS + 1));
        assert!(!NewCharacter::from_name(&last_too_long, None).fits_columns());

        // multi-byte characters count once, as in Postgres
        let wide = "ō".repeat(MAX_NAME_CHARS);
        assert!(NewCharacter::from_name(&wide, None).fits_columns());
    }
}
