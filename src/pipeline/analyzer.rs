use crate::{
    catalog::Catalog,
    common::Color,
    error::DecodeError,
    pipeline::{
        extraction::{ColorExtractor, ExtractionConfig, decode_image, read_image},
        matching::{MatchResult, PaletteScore, match_palette, rank_palettes},
    },
};
use image::DynamicImage;
use serde::Serialize;
use std::{fmt, path::PathBuf, sync::Arc};

/// Where the image for an analysis comes from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Bytes(Vec<u8>),
    Path(PathBuf),
}

impl ImageSource {
    pub fn load(&self) -> Result<DynamicImage, DecodeError> {
        match self {
            ImageSource::Bytes(bytes) => decode_image(bytes),
            ImageSource::Path(path) => read_image(path),
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
            ImageSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub colors: Vec<Color>,
    #[serde(rename = "match")]
    pub matched: MatchResult,
    pub ranking: Vec<PaletteScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Analysis {
    fn failed(error: &DecodeError) -> Self {
        Self {
            colors: Vec::new(),
            matched: MatchResult::none(),
            ranking: Vec::new(),
            error: Some(error.user_message()),
        }
    }
}

/// Runs decode, extraction and matching against one shared catalog.
#[derive(Debug, Clone)]
pub struct MoodAnalyzer {
    extractor: ColorExtractor,
    catalog: Arc<Catalog>,
}

impl MoodAnalyzer {
    pub fn new(catalog: Arc<Catalog>, config: ExtractionConfig) -> Self {
        Self {
            extractor: ColorExtractor::new(config),
            catalog,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn analyze(&self, source: &ImageSource) -> Analysis {
        match source.load() {
            Ok(image) => self.analyze_image(&image),
            Err(e) => {
                tracing::warn!("Error extracting colors from {}: {}", source, e);
                Analysis::failed(&e)
            }
        }
    }

    pub fn analyze_image(&self, image: &DynamicImage) -> Analysis {
        let colors = self
            .extractor
            .extract(image, self.extractor.config().num_colors);
        let matched = match_palette(&colors, &self.catalog);
        let ranking = rank_palettes(&colors, &self.catalog);
        tracing::debug!(
            "Extracted {} colors, matched {:?} ({:.4})",
            colors.len(),
            matched.label,
            matched.score
        );

        Analysis {
            colors,
            matched,
            ranking,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgb};
    use std::io::Cursor;

    fn analyzer() -> MoodAnalyzer {
        MoodAnalyzer::new(Arc::new(Catalog::builtin()), ExtractionConfig::default())
    }

    #[test]
    fn analyzes_in_memory_png() {
        let joy = Catalog::builtin().get("joy").unwrap().colors()[0];
        let img = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(32, 32, Rgb::from(joy)));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let analysis = analyzer().analyze(&ImageSource::Bytes(bytes));
        assert_eq!(analysis.colors, vec![joy]);
        assert!(analysis.matched.is_match());
        assert!(analysis.error.is_none());
        assert_eq!(analysis.ranking.len(), Catalog::builtin().len());
        assert_eq!(analysis.ranking[0].score, analysis.matched.score);
    }

    #[test]
    fn decode_failure_reports_message() {
        let analysis = analyzer().analyze(&ImageSource::Bytes(vec![0, 1, 2, 3]));
        assert!(analysis.colors.is_empty());
        assert_eq!(analysis.matched, MatchResult::none());
        assert!(analysis.error.is_some());
    }

    #[test]
    fn serializes_report_fields() {
        let img = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(8, 8, Rgb([0, 0, 0])));
        let catalog = Catalog::from_entries([("void", vec![Color::new(0, 0, 0)])]).unwrap();
        let analyzer = MoodAnalyzer::new(Arc::new(catalog), ExtractionConfig::default());

        let json = serde_json::to_value(analyzer.analyze_image(&img)).unwrap();
        assert_eq!(json["colors"], serde_json::json!(["#000000"]));
        assert_eq!(json["match"]["label"], "void");
        assert_eq!(json["match"]["score"], 1.0);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn displays_source() {
        assert_eq!(ImageSource::Bytes(vec![1, 2]).to_string(), "<2 bytes>");
        assert_eq!(
            ImageSource::Path(PathBuf::from("photo.jpg")).to_string(),
            "photo.jpg"
        );
    }
}
