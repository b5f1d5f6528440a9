//! Text rendering of catalog queries.

use std::time::Duration;

use vgcat_core::{Game, GameRepository, Genre, Nomination, ReportConfig};

const SEPARATOR: &str = " | ";
const WON_MARK: &str = " ★";

/// Renders every report section for a loaded catalog.
pub struct Report<'a> {
    repository: &'a GameRepository,
    config: &'a ReportConfig,
}

impl<'a> Report<'a> {
    pub fn new(repository: &'a GameRepository, config: &'a ReportConfig) -> Self {
        Self { repository, config }
    }

    /// All sections in presentation order.
    pub fn sections(&self) -> Vec<String> {
        vec![
            self.all_games(),
            self.multiplayer_games(),
            self.game_by_title(&self.config.title),
            self.games_by_genre(self.config.genre),
            self.games_by_genre_and_developer(self.config.developer_genre, &self.config.developer),
            self.favourite_genre(),
            self.favourite_platform(),
            self.games_by_platform(&self.config.platform),
            self.games_released_in(self.config.release_year),
            self.games_released_before_or_after(self.config.before_year, self.config.after_year),
            self.average_playing_time(),
            self.shortest_game(),
            self.most_awarded_game(),
            self.most_awarded_by_label(&self.config.award_label),
            self.oldest_awarded_multiplayer(),
            self.most_nominated_games(self.config.nominated_limit),
            self.less_common_platforms(),
        ]
    }

    fn all_games(&self) -> String {
        if self.repository.is_empty() {
            return "No video game found.".to_string();
        }
        let blocks: String = self
            .repository
            .iter()
            .map(|game| format!("\n{}", game_block(game)))
            .collect();
        format!("These are all the available video games:{blocks}")
    }

    fn multiplayer_games(&self) -> String {
        listing(
            "These are all the multiplayer titles:".to_string(),
            &titles(&self.repository.get_multiplayer_games()),
            "No multiplayer title found.".to_string(),
        )
    }

    fn game_by_title(&self, title: &str) -> String {
        match self.repository.get_by_title(title) {
            Some(game) => format!(
                "Here's the video game with title \"{title}\":\n{}",
                game_block(game)
            ),
            None => format!("No video game found with title \"{title}\"."),
        }
    }

    fn games_by_genre(&self, genre: Genre) -> String {
        let label = genre_label(genre);
        listing(
            format!("These are all the \"{label}\" genre video games:"),
            &titles(&self.repository.get_by_genre(genre)),
            format!("No \"{label}\" genre video game found."),
        )
    }

    fn games_by_genre_and_developer(&self, genre: Genre, developer: &str) -> String {
        let label = genre_label(genre);
        listing(
            format!("These are all the video games of \"{label}\" genre developed by \"{developer}\":"),
            &titles(&self.repository.get_by_genre_and_developer(genre, developer)),
            format!("No video game of \"{label}\" genre developed by \"{developer}\" found."),
        )
    }

    fn favourite_genre(&self) -> String {
        match self.repository.get_favourite_genre() {
            Some(tally) => format!(
                "The most common genre is \"{}\" with {} game(s).",
                genre_label(tally.key),
                tally.count
            ),
            None => "No game found.".to_string(),
        }
    }

    fn favourite_platform(&self) -> String {
        match self.repository.get_favourite_platform() {
            Some(tally) => format!(
                "The most common platform is \"{}\" with {} game(s).",
                tally.key, tally.count
            ),
            None => "No used platform found.".to_string(),
        }
    }

    fn games_by_platform(&self, platform: &str) -> String {
        listing(
            format!("These are all the games available in \"{platform}\" platform:"),
            &titles(&self.repository.get_by_platform(platform)),
            format!("No game available in \"{platform}\" platform found."),
        )
    }

    fn games_released_in(&self, year: i32) -> String {
        listing(
            format!("These are all the video games released in \"{year}\":"),
            &titles(&self.repository.get_by_release_year(year)),
            format!("No video game released in \"{year}\" found."),
        )
    }

    fn games_released_before_or_after(&self, before_year: i32, after_year: i32) -> String {
        let mut games = self
            .repository
            .get_released_before_or_after(before_year, after_year);
        games.sort_by_key(|game| game.release_year());
        let entries: Vec<String> = games
            .iter()
            .map(|game| format!("{} [{}]", game.title, game.release_year()))
            .collect();
        listing(
            format!("These are all the video games released before \"{before_year}\" or after \"{after_year}\":"),
            &entries,
            format!("No video game released before \"{before_year}\" or after \"{after_year}\" found."),
        )
    }

    fn average_playing_time(&self) -> String {
        let average = self.repository.get_average_playing_time();
        if average.is_zero() {
            return "No game or estimated playing time found.".to_string();
        }
        format!(
            "The average estimated playing time per game is {} HH:mm:ss.",
            clock(average)
        )
    }

    fn shortest_game(&self) -> String {
        match self.repository.get_shortest_game() {
            Some(game) => format!(
                "The shortest game based on the estimated playing hours is \"{}\" with {} hrs.",
                game.title, game.estimated_hours
            ),
            None => "No game found.".to_string(),
        }
    }

    fn most_awarded_game(&self) -> String {
        match self.repository.get_most_awarded_game() {
            Some(tally) => format!(
                "The most awarded game is \"{}\" with {} win(s).",
                tally.key, tally.count
            ),
            None => "No awarded game found.".to_string(),
        }
    }

    fn most_awarded_by_label(&self, label: &str) -> String {
        match self.repository.get_most_awarded_game_by_award_label(label) {
            Some(tally) => format!(
                "The most awarded game by \"{label}\" is \"{}\" with {} win(s).",
                tally.key, tally.count
            ),
            None => format!("No game awarded by {label} found."),
        }
    }

    fn oldest_awarded_multiplayer(&self) -> String {
        match self.repository.get_oldest_multiplayer_to_win_an_award() {
            Some(game) => format!(
                "The oldest multiplayer video game to win an award is \"{}\" ({}).",
                game.title,
                game.release_year()
            ),
            None => "No multiplayer awarded game found.".to_string(),
        }
    }

    fn most_nominated_games(&self, limit: usize) -> String {
        let ranked = self.repository.get_most_nominated_games(limit);
        if ranked.is_empty() {
            return "No nominated game found.".to_string();
        }
        let entries: Vec<String> = ranked
            .iter()
            .map(|tally| format!("{} [{}]", tally.key, tally.count))
            .collect();
        format!(
            "This is the top {limit} most nominated games:\n{}",
            join_capitalized(&entries)
        )
    }

    fn less_common_platforms(&self) -> String {
        let rarity = self.repository.get_less_common_platforms();
        if rarity.min_count == 0 {
            return "No used platform found.".to_string();
        }
        format!(
            "These are the less common platforms with just {} occurrence(s):\n{}",
            rarity.min_count,
            join_capitalized(&rarity.platforms)
        )
    }
}

/// Human-readable genre name, e.g. `Hack and slash`.
pub fn genre_label(genre: Genre) -> String {
    capitalize(&genre.code().replace('_', " ").to_lowercase())
}

/// Multi-line description of a game with its nominations in display order.
pub fn game_block(game: &Game) -> String {
    let mut game = game.clone();
    game.sort_nominations();

    let platforms: Vec<String> = game.platforms.iter().cloned().collect();
    let genres: Vec<String> = game.genres.iter().map(|genre| genre_label(*genre)).collect();
    let nominations = if game.nominations.is_empty() {
        "None".to_string()
    } else {
        game.nominations
            .iter()
            .map(|nomination| format!("\n\t\t{}", nomination_line(nomination)))
            .collect()
    };

    format!(
        "Title: {}\n\tDeveloper: {}\n\tPlatforms: {}\n\tGenres: {}\n\tEstimated length: {} hrs\n\tRelease date: {}\n\tNominations: {}\n\tMultiplayer: {}\n",
        game.title,
        game.developer,
        join_capitalized(&platforms),
        join_capitalized(&genres),
        game.estimated_hours,
        game.release_date.format("%d/%m/%Y"),
        nominations,
        if game.multiplayer { "Yes" } else { "No" },
    )
}

fn nomination_line(nomination: &Nomination) -> String {
    format!(
        "{}{SEPARATOR}{}{}",
        nomination.awards,
        nomination.category,
        if nomination.won { WON_MARK } else { "" }
    )
}

/// Header followed by the joined entries, or `none` when there are no entries.
fn listing(header: String, entries: &[String], none: String) -> String {
    if entries.is_empty() {
        none
    } else {
        format!("{header}\n{}", join_capitalized(entries))
    }
}

fn titles(games: &[&Game]) -> Vec<String> {
    games.iter().map(|game| game.title.clone()).collect()
}

fn join_capitalized(items: &[String]) -> String {
    items
        .iter()
        .map(|item| capitalize(item))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn clock(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}
