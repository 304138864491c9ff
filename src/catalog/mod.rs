//! The emotion catalog: an ordered, read-only mapping from emotion label to palette.
//!
//! A catalog is built once at startup (from the built-in palettes or from a
//! JSON/TOML file) and then shared by reference. Iteration
//! order is the order in which entries were defined, which is what makes the
//! matcher's first-match tie-break reproducible.

mod builtin;

use crate::{common::Color, error::CatalogError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use std::path::Path;

/// On-disk catalog formats: a flat table of `label = ["#rrggbb", ...]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Toml,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(CatalogFormat::Json),
            "toml" => Some(CatalogFormat::Toml),
            _ => None,
        }
    }
}

/// An ordered list of colors associated with one emotion label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl From<Vec<Color>> for Palette {
    fn from(colors: Vec<Color>) -> Self {
        Self::new(colors)
    }
}

impl From<&[Color]> for Palette {
    fn from(colors: &[Color]) -> Self {
        Self::new(colors.to_vec())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "IndexMap<String, Palette>")]
pub struct Catalog {
    entries: IndexMap<String, Palette>,
}

impl Catalog {
    /// Builds a catalog from `(label, palette)` pairs, keeping their order.
    ///
    /// Labels are trimmed and lowercased. Fails if a label is empty or if two
    /// labels are equal after normalization.
    pub fn from_entries<I, L, P>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (L, P)>,
        L: AsRef<str>,
        P: Into<Palette>,
    {
        let mut map = IndexMap::new();
        for (label, palette) in entries {
            let label = normalize_label(label.as_ref());
            if label.is_empty() {
                return Err(CatalogError::EmptyLabel);
            }
            if map.contains_key(&label) {
                return Err(CatalogError::DuplicateLabel(label));
            }
            map.insert(label, palette.into());
        }
        Ok(Self { entries: map })
    }

    /// The palettes compiled into the crate.
    pub fn builtin() -> Self {
        let entries = builtin::BUILTIN_PALETTES
            .iter()
            .map(|(label, colors)| (label.to_string(), Palette::from(*colors)))
            .collect();
        Self { entries }
    }

    /// Loads a catalog file; the format follows the extension.
    ///
    /// Labels are taken verbatim from the file, so a label such as
    /// `"deep.calm"` stays a single key.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let format = CatalogFormat::from_path(path)
            .ok_or_else(|| CatalogError::UnsupportedFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str_with_format(&content, format)
    }

    pub fn from_str_with_format(content: &str, format: CatalogFormat) -> Result<Self, CatalogError> {
        let entries: IndexMap<String, Palette> = match format {
            CatalogFormat::Json => serde_json::from_str(content)?,
            CatalogFormat::Toml => toml::from_str(content)?,
        };
        Self::from_entries(entries)
    }

    /// Case-insensitive lookup of a palette by emotion label.
    pub fn get(&self, label: &str) -> Option<&Palette> {
        self.entries.get(&normalize_label(label))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Palette)> {
        self.entries
            .iter()
            .map(|(label, palette)| (label.as_str(), palette))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<IndexMap<String, Palette>> for Catalog {
    type Error = CatalogError;

    fn try_from(entries: IndexMap<String, Palette>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}
