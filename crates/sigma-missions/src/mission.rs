//! The mission record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Mission difficulty rating.
///
/// Stored as free-form text in practice; unknown strings parse to `Medium`
/// with a warning rather than failing the whole fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            other => {
                log::warn!("unknown difficulty '{other}', treating as medium");
                Difficulty::Medium
            },
        })
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(s)
    }
}

/// A selectable mission. Immutable once fetched for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Tag selecting the loading animation and start sound. Not part of the
    /// persisted schema everywhere, so absent tags are tolerated and resolve
    /// to "hack" at the point of use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Mission {
    /// The animation/sound selector tag, defaulting to "hack".
    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or("hack")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_known_values() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("MEDIUM".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
    }

    #[test]
    fn unknown_difficulty_falls_back_to_medium() {
        assert_eq!(
            "nightmare".parse::<Difficulty>().unwrap(),
            Difficulty::Medium
        );
    }

    #[test]
    fn difficulty_display_roundtrip() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(d.to_string().parse::<Difficulty>().unwrap(), d);
        }
    }

    #[test]
    fn kind_defaults_to_hack() {
        let m = Mission {
            id: 1,
            name: "Trace Echo".into(),
            difficulty: Difficulty::Medium,
            active: true,
            kind: None,
        };
        assert_eq!(m.kind(), "hack");
    }

    #[test]
    fn kind_passes_through_when_set() {
        let m = Mission {
            id: 2,
            name: "Core Breach".into(),
            difficulty: Difficulty::Hard,
            active: true,
            kind: Some("download".into()),
        };
        assert_eq!(m.kind(), "download");
    }

    #[test]
    fn mission_json_tolerates_missing_fields() {
        let m: Mission = serde_json::from_str(r#"{"id": 3, "name": "Firewall Reboot"}"#).unwrap();
        assert_eq!(m.difficulty, Difficulty::Medium);
        assert!(m.active);
        assert!(m.kind.is_none());
    }
}
