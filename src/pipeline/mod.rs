pub mod analyzer;
pub mod extraction;
pub mod matching;
pub mod services;

pub use analyzer::{Analysis, ImageSource, MoodAnalyzer};
pub use extraction::{ColorExtractor, ExtractionConfig, ResizeFilter};
pub use matching::{MatchResult, PaletteScore, match_palette, rank_palettes};
pub use services::{AnalysisReport, AnalysisRequest, AnalysisService};
