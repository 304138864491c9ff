use crate::{common::Color, error::DecodeError};
use image::{DynamicImage, imageops::FilterType};
use indexmap::IndexMap;
use serde::Deserialize;
use std::{cmp::Reverse, path::Path};

/// Resampling filter used to shrink the image onto the analysis grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    /// Only reuses source pixels, so no interpolated colors are counted.
    #[default]
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub num_colors: usize,
    pub grid_width: u32,
    pub grid_height: u32,
    pub resize_filter: ResizeFilter,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            num_colors: 5,
            grid_width: 100,
            grid_height: 100,
            resize_filter: ResizeFilter::Nearest,
        }
    }
}

/// Decodes an in-memory image, sniffing the format from its contents.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let image = image::load_from_memory(bytes)?;
    if image.width() == 0 || image.height() == 0 {
        return Err(DecodeError::EmptyImage(image.width(), image.height()));
    }
    Ok(image)
}

pub fn read_image(path: &Path) -> Result<DynamicImage, DecodeError> {
    let bytes = std::fs::read(path).map_err(|source| DecodeError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    decode_image(&bytes)
}

/// Reduces an image to its most frequent colors on a small fixed grid.
#[derive(Debug, Clone, Default)]
pub struct ColorExtractor {
    config: ExtractionConfig,
}

impl ColorExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Returns at most `n` colors ordered by descending pixel count.
    ///
    /// Colors with equal counts keep the order in which a row-major scan of
    /// the grid first meets them.
    pub fn extract(&self, image: &DynamicImage, n: usize) -> Vec<Color> {
        if n == 0 || image.width() == 0 || image.height() == 0 {
            return Vec::new();
        }

        let grid = image
            .resize_exact(
                self.config.grid_width.max(1),
                self.config.grid_height.max(1),
                self.config.resize_filter.into(),
            )
            .to_rgb8();

        let mut color_counts: IndexMap<Color, u32> = IndexMap::new();
        for px in grid.pixels() {
            *color_counts.entry(Color::from(px)).or_insert(0) += 1;
        }

        let mut sorted: Vec<_> = color_counts.into_iter().collect();
        // sort_by_key is stable, which preserves first-seen order on ties
        sorted.sort_by_key(|&(_, count)| Reverse(count));

        sorted
            .into_iter()
            .take(n)
            .map(|(color, _)| color)
            .collect()
    }

    /// Decodes and extracts; an undecodable image yields no colors.
    pub fn extract_bytes(&self, bytes: &[u8], n: usize) -> Vec<Color> {
        match decode_image(bytes) {
            Ok(image) => self.extract(&image, n),
            Err(e) => {
                tracing::warn!("Error extracting colors: {}", e);
                Vec::new()
            }
        }
    }

    pub fn extract_path(&self, path: &Path, n: usize) -> Vec<Color> {
        match read_image(path) {
            Ok(image) => self.extract(&image, n),
            Err(e) => {
                tracing::warn!("Error extracting colors: {}", e);
                Vec::new()
            }
        }
    }
}
