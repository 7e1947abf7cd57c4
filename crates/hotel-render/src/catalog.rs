//! Hotel catalogs: the ordered record sequence handed to a renderer.
//!
//! A [`Catalog`] is either the built-in sample listing or a file loaded at
//! startup. Supported formats are picked by extension:
//!
//! | Extension | Shape |
//! |-----------|-------|
//! | `.json` | array of `{name, rating, image_url}` objects |
//! | `.yaml`, `.yml` | sequence of the same mappings |
//! | `.csv` | header row `name,rating,image_url` |
//!
//! Record order in the file is the order records are rendered in.

use std::path::{Path, PathBuf};

use crate::record::Hotel;

/// Errors raised while loading a catalog file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension does not name a supported format.
    #[error("unsupported catalog format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// The file content did not parse as a list of records.
    #[error("failed to parse catalog {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// A record has an empty field.
    #[error("record {index} has an empty `{field}`")]
    EmptyField { index: usize, field: &'static str },
}

/// An ordered list of hotels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    hotels: Vec<Hotel>,
}

impl Catalog {
    /// Wraps an explicit record sequence. No validation is applied.
    pub fn new(hotels: Vec<Hotel>) -> Self {
        Self { hotels }
    }

    /// The three-hotel listing used when no catalog file is given.
    pub fn sample() -> Self {
        Self::new(vec![
            Hotel::with_stars(
                "Salon De The",
                3,
                "https://cdn.pixabay.com/photo/2012/11/21/10/24/building-66789_1280.jpg",
            ),
            Hotel::with_stars(
                "Hotel Dananas",
                5,
                "https://cdn.pixabay.com/photo/2016/09/16/12/53/hotel-1673952_1280.jpg",
            ),
            Hotel::with_stars(
                "Pizza Hawai",
                3,
                "https://cdn.pixabay.com/photo/2016/11/17/09/28/hotel-1831072_1280.jpg",
            ),
        ])
    }

    /// Loads a catalog file, choosing the format from its extension.
    ///
    /// # Errors
    ///
    /// Fails if the file is unreadable, has an unknown extension, does not
    /// parse, or contains a record with an empty field.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let format = Format::from_path(path).ok_or_else(|| CatalogError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let hotels = format.parse(&content).map_err(|message| CatalogError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        validate(&hotels)?;

        log::debug!("loaded {} hotels from {}", hotels.len(), path.display());
        Ok(Self::new(hotels))
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn into_hotels(self) -> Vec<Hotel> {
        self.hotels
    }

    pub fn len(&self) -> usize {
        self.hotels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }
}

impl From<Vec<Hotel>> for Catalog {
    fn from(hotels: Vec<Hotel>) -> Self {
        Self::new(hotels)
    }
}

impl IntoIterator for Catalog {
    type Item = Hotel;
    type IntoIter = std::vec::IntoIter<Hotel>;

    fn into_iter(self) -> Self::IntoIter {
        self.hotels.into_iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Hotel;
    type IntoIter = std::slice::Iter<'a, Hotel>;

    fn into_iter(self) -> Self::IntoIter {
        self.hotels.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
    Csv,
}

impl Format {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            "csv" => Some(Format::Csv),
            _ => None,
        }
    }

    fn parse(self, content: &str) -> Result<Vec<Hotel>, String> {
        match self {
            Format::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Format::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Format::Csv => csv::Reader::from_reader(content.as_bytes())
                .deserialize()
                .collect::<Result<Vec<Hotel>, _>>()
                .map_err(|e| e.to_string()),
        }
    }
}

fn validate(hotels: &[Hotel]) -> Result<(), CatalogError> {
    for (index, hotel) in hotels.iter().enumerate() {
        let field = if hotel.name().is_empty() {
            "name"
        } else if hotel.rating().is_empty() {
            "rating"
        } else if hotel.image_url().is_empty() {
            "image_url"
        } else {
            continue;
        };
        return Err(CatalogError::EmptyField { index, field });
    }
    Ok(())
}
