use crate::{catalog::Catalog, common::Color};
use serde::{Deserialize, Serialize};

/// Best catalog entry for a set of colors. `label` is `None` when nothing could be scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub label: Option<String>,
    pub score: f64,
}

impl MatchResult {
    pub fn none() -> Self {
        Self {
            label: None,
            score: 0.0,
        }
    }

    pub fn is_match(&self) -> bool {
        self.label.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteScore {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct RgbVector([f64; 3]);

impl RgbVector {
    /// Component-wise mean, or `None` for an empty set.
    fn centroid(colors: &[Color]) -> Option<Self> {
        if colors.is_empty() {
            return None;
        }
        let mut sum = [0.0f64; 3];
        for color in colors {
            for (acc, channel) in sum.iter_mut().zip(color.channels()) {
                *acc += f64::from(channel);
            }
        }
        let n = colors.len() as f64;
        Some(Self(sum.map(|s| s / n)))
    }

    fn dot(&self, other: &Self) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Cosine similarity in [-1, 1].
    ///
    /// A zero vector has no direction: against another zero vector the
    /// similarity is 1, against anything else it is -1.
    fn cosine_similarity(&self, other: &Self) -> f64 {
        let (a, b) = (self.magnitude(), other.magnitude());
        match (a == 0.0, b == 0.0) {
            (true, true) => 1.0,
            (true, false) | (false, true) => -1.0,
            (false, false) => (self.dot(other) / (a * b)).clamp(-1.0, 1.0),
        }
    }
}

/// Maps a similarity in [-1, 1] onto a score in [0, 1].
fn normalize(similarity: f64) -> f64 {
    ((similarity + 1.0) / 2.0).clamp(0.0, 1.0)
}

fn palette_scores<'c>(
    extracted: RgbVector,
    catalog: &'c Catalog,
) -> impl Iterator<Item = (&'c str, f64)> + 'c {
    catalog.iter().filter_map(move |(label, palette)| {
        let centroid = RgbVector::centroid(palette.colors())?;
        Some((label, normalize(extracted.cosine_similarity(&centroid))))
    })
}

/// Finds the catalog entry whose mean color points the same way as the mean
/// of `colors`. Entries with empty palettes are skipped and the first entry
/// wins a tie.
pub fn match_palette(colors: &[Color], catalog: &Catalog) -> MatchResult {
    let Some(extracted) = RgbVector::centroid(colors) else {
        return MatchResult::none();
    };

    let mut best: Option<(&str, f64)> = None;
    for (label, score) in palette_scores(extracted, catalog) {
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((label, score));
        }
    }

    match best {
        Some((label, score)) => {
            tracing::debug!("Best match: {} ({:.4})", label, score);
            MatchResult {
                label: Some(label.to_string()),
                score,
            }
        }
        None => MatchResult::none(),
    }
}

/// Scores every non-empty catalog entry, best first, ties in catalog order.
pub fn rank_palettes(colors: &[Color], catalog: &Catalog) -> Vec<PaletteScore> {
    let Some(extracted) = RgbVector::centroid(colors) else {
        return Vec::new();
    };

    let mut ranking: Vec<PaletteScore> = palette_scores(extracted, catalog)
        .map(|(label, score)| PaletteScore {
            label: label.to_string(),
            score,
        })
        .collect();
    ranking.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranking
}
