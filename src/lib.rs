pub mod catalog;
pub mod common;
pub mod config;
pub mod error;
pub mod pipeline;

pub use catalog::{Catalog, Palette};
pub use common::Color;
pub use crate::config::Settings;
pub use error::{AppError, CatalogError, ColorParseError, DecodeError};

pub use pipeline::{
    AnalysisService, ColorExtractor, MatchResult, MoodAnalyzer, match_palette, rank_palettes,
};
