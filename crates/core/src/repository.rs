//! In-memory catalog with filtering and aggregate queries.
//!
//! The repository is filled once through [`GameRepository::add`] and is read-only
//! afterwards. Every query borrows from the stored collection and never fails:
//! missing data is reported as `None`, an empty `Vec`, or zero.
//!
//! Aggregates group records into insertion-ordered maps, so when several keys
//! share the extreme value the one seen first in stored order wins.

use std::{hash::Hash, time::Duration};

use indexmap::IndexMap;
use tracing::debug;

use crate::models::{Game, Genre};

/// A grouping key paired with its aggregated count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<K> {
    /// Group key (genre, platform, or title).
    pub key: K,
    /// Aggregated count for the group.
    pub count: usize,
}

impl<K> Tally<K> {
    fn new(key: K, count: usize) -> Self {
        Self { key, count }
    }
}

/// The rarest platforms in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlatformRarity {
    /// Lowest number of games found on any platform, `0` when there are none.
    pub min_count: usize,
    /// Platforms reaching `min_count`, sorted lexicographically.
    pub platforms: Vec<String>,
}

/// Owns the catalog records and answers queries over them.
#[derive(Debug, Clone, Default)]
pub struct GameRepository {
    games: Vec<Game>,
}

impl GameRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append records in the given order and return how many are now held.
    ///
    /// No de-duplication is performed.
    pub fn add(&mut self, games: impl IntoIterator<Item = Game>) -> usize {
        let before = self.games.len();
        self.games.extend(games);
        debug!(
            added = self.games.len() - before,
            total = self.games.len(),
            "games added to repository"
        );
        self.games.len()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether no records are stored.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Iterate over records in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, Game> {
        self.games.iter()
    }

    /// Every record, in stored order.
    pub fn get_all(&self) -> &[Game] {
        &self.games
    }

    /// First record whose title matches, ignoring case.
    pub fn get_by_title(&self, title: &str) -> Option<&Game> {
        self.games.iter().find(|game| same_text(&game.title, title))
    }

    /// Records whose developer matches exactly, ignoring case.
    pub fn get_by_developer(&self, developer: &str) -> Vec<&Game> {
        self.filter(|game| same_text(&game.developer, developer))
    }

    /// Records tagged with `genre`.
    pub fn get_by_genre(&self, genre: Genre) -> Vec<&Game> {
        self.filter(|game| game.genres.contains(&genre))
    }

    /// Records tagged with `genre` and made by `developer`.
    pub fn get_by_genre_and_developer(&self, genre: Genre, developer: &str) -> Vec<&Game> {
        self.filter(|game| game.genres.contains(&genre) && same_text(&game.developer, developer))
    }

    /// Records available on `platform`, ignoring case.
    pub fn get_by_platform(&self, platform: &str) -> Vec<&Game> {
        self.filter(|game| {
            game.platforms
                .iter()
                .any(|candidate| same_text(candidate, platform))
        })
    }

    /// Records released during `year`.
    pub fn get_by_release_year(&self, year: i32) -> Vec<&Game> {
        self.filter(|game| game.release_year() == year)
    }

    /// Records released in `year` or earlier.
    pub fn get_released_before_year(&self, year: i32) -> Vec<&Game> {
        self.filter(|game| game.release_year() <= year)
    }

    /// Records released before `before_year` (exclusive) or from `after_year` on
    /// (inclusive).
    ///
    /// This is a union of the two ranges; when `before_year > after_year` every
    /// record matches.
    pub fn get_released_before_or_after(&self, before_year: i32, after_year: i32) -> Vec<&Game> {
        self.filter(|game| {
            let year = game.release_year();
            year < before_year || year >= after_year
        })
    }

    /// Records offering multiplayer.
    pub fn get_multiplayer_games(&self) -> Vec<&Game> {
        self.filter(|game| game.multiplayer)
    }

    /// Genre appearing on the most records.
    pub fn get_favourite_genre(&self) -> Option<Tally<Genre>> {
        let counts = tally(self.games.iter().flat_map(|game| game.genres.iter().copied()));
        first_max(counts)
    }

    /// Platform appearing on the most records.
    pub fn get_favourite_platform(&self) -> Option<Tally<String>> {
        let counts = tally(self.platform_keys());
        first_max(counts).map(|best| Tally::new(best.key.to_string(), best.count))
    }

    /// Platforms shared by the fewest records.
    pub fn get_less_common_platforms(&self) -> PlatformRarity {
        let counts = tally(self.platform_keys());
        let Some(min_count) = counts.values().copied().min() else {
            return PlatformRarity::default();
        };

        let mut platforms: Vec<String> = counts
            .into_iter()
            .filter(|(_, count)| *count == min_count)
            .map(|(platform, _)| platform.to_string())
            .collect();
        platforms.sort();

        PlatformRarity {
            min_count,
            platforms,
        }
    }

    /// Mean of `estimated_hours`, `0.0` when empty.
    pub fn get_average_playing_hours(&self) -> f64 {
        if self.games.is_empty() {
            return 0.0;
        }
        let total: u64 = self
            .games
            .iter()
            .map(|game| u64::from(game.estimated_hours))
            .sum();
        total as f64 / self.games.len() as f64
    }

    /// Mean playing time as a duration, zero when empty.
    pub fn get_average_playing_time(&self) -> Duration {
        Duration::from_secs_f64(self.get_average_playing_hours() * 3600.0)
    }

    /// Record with the fewest estimated hours; the earliest stored wins a tie.
    pub fn get_shortest_game(&self) -> Option<&Game> {
        // `min_by_key` keeps the first of several equal minima.
        self.games.iter().min_by_key(|game| game.estimated_hours)
    }

    /// Title with the most nominations, summed across records sharing it.
    pub fn get_most_nominated_game(&self) -> Option<Tally<String>> {
        first_max(self.nomination_counts()).map(owned_title)
    }

    /// Up to `limit` titles ordered by nomination count, highest first.
    ///
    /// Titles with equal counts keep the order in which they were first seen.
    pub fn get_most_nominated_games(&self, limit: usize) -> Vec<Tally<String>> {
        let mut ranked: Vec<Tally<String>> = self
            .nomination_counts()
            .into_iter()
            .map(|(title, count)| Tally::new(title.to_string(), count))
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(limit);
        ranked
    }

    /// Title with the most won nominations.
    pub fn get_most_awarded_game(&self) -> Option<Tally<String>> {
        let wins = sum_by(
            self.games
                .iter()
                .filter(|game| game.has_win())
                .map(|game| (game.title.as_str(), game.win_count())),
        );
        first_max(wins).map(owned_title)
    }

    /// Title with the most wins at the ceremony named `label`, ignoring case.
    ///
    /// Titles without a win under that label are not candidates.
    pub fn get_most_awarded_game_by_award_label(&self, label: &str) -> Option<Tally<String>> {
        let wins = sum_by(self.games.iter().filter(|game| game.has_win()).map(|game| {
            let count = game
                .nominations
                .iter()
                .filter(|nomination| nomination.won && same_text(&nomination.awards, label))
                .count();
            (game.title.as_str(), count)
        }));
        let wins = wins.into_iter().filter(|(_, count)| *count > 0).collect();
        first_max(wins).map(owned_title)
    }

    /// Earliest-released multiplayer record with at least one win.
    ///
    /// Only the release year is compared; the earliest stored wins a tie.
    pub fn get_oldest_multiplayer_to_win_an_award(&self) -> Option<&Game> {
        self.games
            .iter()
            .filter(|game| game.multiplayer && game.has_win())
            .min_by_key(|game| game.release_year())
    }

    fn filter(&self, predicate: impl Fn(&Game) -> bool) -> Vec<&Game> {
        self.games.iter().filter(|game| predicate(*game)).collect()
    }

    fn platform_keys(&self) -> impl Iterator<Item = &str> {
        self.games
            .iter()
            .flat_map(|game| game.platforms.iter().map(String::as_str))
    }

    fn nomination_counts(&self) -> IndexMap<&str, usize> {
        sum_by(
            self.games
                .iter()
                .filter(|game| !game.nominations.is_empty())
                .map(|game| (game.title.as_str(), game.nominations.len())),
        )
    }
}

impl FromIterator<Game> for GameRepository {
    fn from_iter<I: IntoIterator<Item = Game>>(iter: I) -> Self {
        let mut repository = Self::new();
        repository.add(iter);
        repository
    }
}

impl<'a> IntoIterator for &'a GameRepository {
    type Item = &'a Game;
    type IntoIter = std::slice::Iter<'a, Game>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn same_text(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

fn tally<K: Hash + Eq>(keys: impl IntoIterator<Item = K>) -> IndexMap<K, usize> {
    sum_by(keys.into_iter().map(|key| (key, 1)))
}

fn sum_by<K: Hash + Eq>(pairs: impl IntoIterator<Item = (K, usize)>) -> IndexMap<K, usize> {
    let mut groups = IndexMap::new();
    for (key, amount) in pairs {
        *groups.entry(key).or_insert(0) += amount;
    }
    groups
}

/// Largest group, preferring the earliest inserted key on ties.
fn first_max<K>(groups: IndexMap<K, usize>) -> Option<Tally<K>> {
    let mut best: Option<Tally<K>> = None;
    for (key, count) in groups {
        match &best {
            Some(current) if count <= current.count => {}
            _ => best = Some(Tally::new(key, count)),
        }
    }
    best
}

fn owned_title(tally: Tally<&str>) -> Tally<String> {
    Tally::new(tally.key.to_string(), tally.count)
}
