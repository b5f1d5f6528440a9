use std::{fmt, str::FromStr};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DatasetError;

/// Closed set of genres a game can be tagged with.
///
/// Variants are ordered by declaration so genre sets iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Genre {
    /// Action.
    Action,
    /// Adventure.
    Adventure,
    /// Arcade.
    Arcade,
    /// Casino.
    Casino,
    /// Educational.
    Educational,
    /// Fighting.
    Fighting,
    /// Hack and slash.
    HackAndSlash,
    /// Horror.
    Horror,
    /// Indie.
    Indie,
    /// Location based.
    LocationBased,
    /// Platform.
    Platform,
    /// Puzzle.
    Puzzle,
    /// Racing.
    Racing,
    /// Role playing.
    RolePlaying,
    /// Sandbox.
    Sandbox,
    /// Shooter.
    Shooter,
    /// Simulation.
    Simulation,
    /// Sports.
    Sports,
    /// Stealth.
    Stealth,
    /// Strategy.
    Strategy,
    /// Survival.
    Survival,
    /// Trivia.
    Trivia,
}

impl Genre {
    /// Every genre in declaration order.
    pub const ALL: [Genre; 22] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Arcade,
        Genre::Casino,
        Genre::Educational,
        Genre::Fighting,
        Genre::HackAndSlash,
        Genre::Horror,
        Genre::Indie,
        Genre::LocationBased,
        Genre::Platform,
        Genre::Puzzle,
        Genre::Racing,
        Genre::RolePlaying,
        Genre::Sandbox,
        Genre::Shooter,
        Genre::Simulation,
        Genre::Sports,
        Genre::Stealth,
        Genre::Strategy,
        Genre::Survival,
        Genre::Trivia,
    ];

    /// Stable identifier used in datasets (`HACK_AND_SLASH`).
    pub fn code(self) -> &'static str {
        match self {
            Genre::Action => "ACTION",
            Genre::Adventure => "ADVENTURE",
            Genre::Arcade => "ARCADE",
            Genre::Casino => "CASINO",
            Genre::Educational => "EDUCATIONAL",
            Genre::Fighting => "FIGHTING",
            Genre::HackAndSlash => "HACK_AND_SLASH",
            Genre::Horror => "HORROR",
            Genre::Indie => "INDIE",
            Genre::LocationBased => "LOCATION_BASED",
            Genre::Platform => "PLATFORM",
            Genre::Puzzle => "PUZZLE",
            Genre::Racing => "RACING",
            Genre::RolePlaying => "ROLE_PLAYING",
            Genre::Sandbox => "SANDBOX",
            Genre::Shooter => "SHOOTER",
            Genre::Simulation => "SIMULATION",
            Genre::Sports => "SPORTS",
            Genre::Stealth => "STEALTH",
            Genre::Strategy => "STRATEGY",
            Genre::Survival => "SURVIVAL",
            Genre::Trivia => "TRIVIA",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s_\-]+").expect("failed to compile genre separator regex"));

fn squash(label: &str) -> String {
    SEPARATOR_RE.replace_all(label.trim(), "").to_lowercase()
}

impl FromStr for Genre {
    type Err = DatasetError;

    /// Accepts codes and human labels alike: separators and case are ignored.
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let needle = squash(label);
        Genre::ALL
            .into_iter()
            .find(|genre| squash(genre.code()) == needle)
            .ok_or_else(|| DatasetError::UnknownGenre(label.to_string()))
    }
}

impl Serialize for Genre {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Genre {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_loose_labels() {
        for label in ["ROLE_PLAYING", "Role playing", "role-playing", "RolePlaying"] {
            assert_eq!(label.parse::<Genre>().ok(), Some(Genre::RolePlaying), "{label}");
        }
        assert_eq!("  hack and slash ".parse::<Genre>().ok(), Some(Genre::HackAndSlash));
    }

    #[test]
    fn rejects_unknown_label() {
        let err = "Dating sim".parse::<Genre>().unwrap_err();
        assert!(err.to_string().contains("Dating sim"));
    }

    #[test]
    fn serializes_as_code() -> anyhow::Result<()> {
        let encoded = serde_json::to_string(&Genre::LocationBased)?;
        assert_eq!(encoded, "\"LOCATION_BASED\"");
        let decoded: Genre = serde_json::from_str("\"Location based\"")?;
        assert_eq!(decoded, Genre::LocationBased);
        Ok(())
    }
}
