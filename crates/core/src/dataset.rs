//! Reads catalog records from JSON dataset files.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::{
    error::DatasetError,
    models::{Game, Genre, Nomination},
};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Loads games from a JSON file or from every `*.json` file beneath a directory.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    path: PathBuf,
}

impl DatasetLoader {
    /// Create a loader for the given file or directory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location this loader reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate every record, preserving file and array order.
    ///
    /// Directory contents are visited recursively in path order.
    pub fn load(&self) -> Result<Vec<Game>> {
        let files = dataset_files(&self.path)?;
        let mut games = Vec::new();
        for file in &files {
            let loaded = load_file(file)
                .with_context(|| format!("failed to load dataset {}", file.display()))?;
            debug!("loaded {} games from {}", loaded.len(), file.display());
            games.extend(loaded);
        }
        info!(
            "loaded {} games from {} dataset file(s) at {}",
            games.len(),
            files.len(),
            self.path.display()
        );
        Ok(games)
    }
}

fn dataset_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()).into());
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path) {
        let entry =
            entry.with_context(|| format!("failed to scan dataset directory {}", path.display()))?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "json")
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

fn load_file(path: &Path) -> Result<Vec<Game>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let raw: Vec<RawGame> =
        serde_json::from_str(&contents).map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let games = raw
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            build_game(record).map_err(|reason| DatasetError::InvalidRecord {
                path: path.to_path_buf(),
                index,
                reason: Box::new(reason),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(games)
}

fn build_game(raw: RawGame) -> Result<Game, DatasetError> {
    let title = raw.title.trim().to_string();
    if title.is_empty() {
        return Err(DatasetError::EmptyTitle);
    }

    let genres: BTreeSet<Genre> = raw
        .genres
        .iter()
        .map(|label| label.parse::<Genre>())
        .collect::<Result<_, _>>()?;

    let platforms: BTreeSet<String> = raw
        .platforms
        .into_iter()
        .map(|platform| platform.trim().to_string())
        .filter(|platform| !platform.is_empty())
        .collect();

    Ok(Game {
        title,
        developer: raw.developer.trim().to_string(),
        platforms,
        genres,
        estimated_hours: raw.estimated_hours,
        release_date: parse_release_date(&raw.release_date)?,
        nominations: raw.nominations,
        multiplayer: raw.multiplayer,
    })
}

fn parse_release_date(raw: &str) -> Result<NaiveDate, DatasetError> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| DatasetError::InvalidDate(raw.to_string()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGame {
    title: String,
    #[serde(default)]
    developer: String,
    #[serde(default)]
    platforms: Vec<String>,
    #[serde(default)]
    genres: Vec<String>,
    estimated_hours: u32,
    release_date: String,
    #[serde(default)]
    nominations: Vec<Nomination>,
    #[serde(default)]
    multiplayer: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn write_json(path: &Path, value: serde_json::Value) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec_pretty(&value)?)?;
        Ok(())
    }

    #[test]
    fn loads_single_file() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("videogames.json");
        write_json(
            &path,
            json!([
                {
                    "title": " Halo: Combat Evolved ",
                    "developer": "Bungie",
                    "platforms": ["Xbox", "PC", "Xbox", " "],
                    "genres": ["SHOOTER", "Action", "shooter"],
                    "estimatedHours": 10,
                    "releaseDate": "2001-11-15",
                    "nominations": [
                        { "awards": "DICE", "category": "Console Game of the Year", "won": true }
                    ],
                    "multiplayer": true
                },
                {
                    "title": "Celeste",
                    "developer": "Maddy Makes Games",
                    "platforms": ["Switch"],
                    "genres": ["Platform", "Indie"],
                    "estimatedHours": 8,
                    "releaseDate": "25/01/2018"
                }
            ]),
        )?;

        let loader = DatasetLoader::new(&path);
        assert_eq!(loader.path(), path.as_path());
        let games = loader.load()?;
        assert_eq!(games.len(), 2);

        let halo = &games[0];
        assert_eq!(halo.title, "Halo: Combat Evolved");
        assert_eq!(halo.platforms.len(), 2);
        assert_eq!(
            halo.genres.iter().copied().collect::<Vec<_>>(),
            vec![Genre::Action, Genre::Shooter]
        );
        assert!(halo.multiplayer);
        assert!(halo.has_win());

        let celeste = &games[1];
        assert_eq!(celeste.release_date, NaiveDate::from_ymd_opt(2018, 1, 25).unwrap());
        assert!(celeste.nominations.is_empty());
        assert!(!celeste.multiplayer);
        Ok(())
    }

    #[test]
    fn loads_directory_in_path_order() -> Result<()> {
        let temp = tempdir()?;
        let record = |title: &str| {
            json!([{
                "title": title,
                "developer": "Studio",
                "estimatedHours": 1,
                "releaseDate": "2000-01-01"
            }])
        };
        write_json(&temp.path().join("b.json"), record("Second"))?;
        write_json(&temp.path().join("a.json"), record("First"))?;
        write_json(&temp.path().join("nested/c.json"), record("Third"))?;
        fs::write(temp.path().join("notes.txt"), "ignored")?;

        let games = DatasetLoader::new(temp.path()).load()?;
        let titles: Vec<_> = games.iter().map(|game| game.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
        Ok(())
    }

    #[test]
    fn reports_invalid_record_position() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("broken.json");
        write_json(
            &path,
            json!([
                { "title": "Fine", "estimatedHours": 1, "releaseDate": "2000-01-01" },
                { "title": "Odd", "genres": ["Dating sim"], "estimatedHours": 1, "releaseDate": "2000-01-01" }
            ]),
        )?;

        let err = DatasetLoader::new(&path).load().unwrap_err();
        let dataset_err = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<DatasetError>())
            .expect("expected a dataset error in the chain");
        match dataset_err {
            DatasetError::InvalidRecord { index, reason, .. } => {
                assert_eq!(*index, 1);
                assert!(matches!(**reason, DatasetError::UnknownGenre(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[test]
    fn rejects_blank_title_and_bad_dates() {
        let raw = |title: &str, date: &str| RawGame {
            title: title.to_string(),
            developer: String::new(),
            platforms: Vec::new(),
            genres: Vec::new(),
            estimated_hours: 1,
            release_date: date.to_string(),
            nominations: Vec::new(),
            multiplayer: false,
        };
        assert!(matches!(build_game(raw("  ", "2000-01-01")), Err(DatasetError::EmptyTitle)));
        assert!(matches!(
            build_game(raw("Game", "January 2000")),
            Err(DatasetError::InvalidDate(_))
        ));
    }

    #[test]
    fn bundled_sample_answers_queries() -> Result<()> {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/videogames.json");
        let repository: crate::GameRepository = DatasetLoader::new(path).load()?.into_iter().collect();

        assert_eq!(repository.len(), 8);
        let favourite = repository.get_favourite_genre().expect("sample has genres");
        assert_eq!((favourite.key, favourite.count), (Genre::Action, 5));
        assert_eq!(
            repository.get_shortest_game().map(|game| game.title.as_str()),
            Some("Portal")
        );
        let awarded = repository
            .get_most_awarded_game_by_award_label("the game awards")
            .expect("sample has award winners");
        assert_eq!((awarded.key.as_str(), awarded.count), ("Elden Ring", 4));
        assert_eq!(
            repository
                .get_oldest_multiplayer_to_win_an_award()
                .map(|game| game.title.as_str()),
            Some("Halo: Combat Evolved")
        );
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_fails_the_load() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir()?;
        write_json(
            &temp.path().join("a.json"),
            json!([{ "title": "Visible", "estimatedHours": 1, "releaseDate": "2000-01-01" }]),
        )?;
        let locked = temp.path().join("locked");
        fs::create_dir(&locked)?;
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

        // Privileged users can still list the directory; nothing is skipped then.
        let enforced = fs::read_dir(&locked).is_err();
        let result = DatasetLoader::new(temp.path()).load();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

        if enforced {
            let err = result.unwrap_err();
            assert!(format!("{err:#}").contains("failed to scan dataset directory"));
        } else {
            assert_eq!(result?.len(), 1);
        }
        Ok(())
    }

    #[test]
    fn missing_path_is_an_error() {
        let err = DatasetLoader::new("/definitely/not/here.json").load().unwrap_err();
        assert!(err.to_string().contains("dataset not found"));
    }
}
