//! Catalog record types.

use std::{cmp::Ordering, collections::BTreeSet};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

mod genre;

pub use genre::Genre;

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Title, used as a case-insensitive lookup key.
    pub title: String,
    /// Studio credited with development.
    pub developer: String,
    /// Platforms the game shipped on.
    #[serde(default)]
    pub platforms: BTreeSet<String>,
    /// Genres the game is tagged with.
    #[serde(default)]
    pub genres: BTreeSet<Genre>,
    /// Estimated hours to complete.
    pub estimated_hours: u32,
    /// First release date.
    pub release_date: NaiveDate,
    /// Award nominations, in dataset order until sorted for display.
    #[serde(default)]
    pub nominations: Vec<Nomination>,
    /// Whether the game offers multiplayer.
    #[serde(default)]
    pub multiplayer: bool,
}

impl Game {
    /// Calendar year of the release date.
    pub fn release_year(&self) -> i32 {
        self.release_date.year()
    }

    /// Whether at least one nomination was won.
    pub fn has_win(&self) -> bool {
        self.nominations.iter().any(|nomination| nomination.won)
    }

    /// Number of nominations that were won.
    pub fn win_count(&self) -> usize {
        self.nominations.iter().filter(|nomination| nomination.won).count()
    }

    /// Reorder nominations for display using [`compare_nominations`].
    pub fn sort_nominations(&mut self) {
        self.nominations.sort_by(compare_nominations);
    }
}

/// An award nomination attached to a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nomination {
    /// Award or ceremony name.
    pub awards: String,
    /// Category within the ceremony.
    pub category: String,
    /// Whether the nomination was won.
    #[serde(default)]
    pub won: bool,
}

/// Display ordering for nominations: wins first, then award name, then category.
///
/// Names compare case-sensitively, so this is a total order.
pub fn compare_nominations(a: &Nomination, b: &Nomination) -> Ordering {
    b.won
        .cmp(&a.won)
        .then_with(|| a.awards.cmp(&b.awards))
        .then_with(|| a.category.cmp(&b.category))
}
