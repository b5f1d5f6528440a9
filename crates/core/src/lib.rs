#![warn(clippy::all, missing_docs)]

//! Core domain logic for the vgcat video-game catalog.
//!
//! This crate hosts the record models, the in-memory query repository,
//! dataset loading and configuration handling used by the report binary
//! and any future frontends.

pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod repository;

pub use config::{AppConfig, ReportConfig};
pub use dataset::DatasetLoader;
pub use error::DatasetError;
pub use models::{compare_nominations, Game, Genre, Nomination};
pub use repository::{GameRepository, PlatformRarity, Tally};
