//! The hotel record passed to every renderer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One display item: a hotel name, its pre-formatted rating and an image URL.
///
/// Records are immutable once built. Templates see the fields as `name`,
/// `rating` and `image_url`.
///
/// # Example
///
/// ```rust
/// use hotel_render::Hotel;
///
/// let hotel = Hotel::with_stars("Salon De The", 3, "https://example.com/a.jpg");
/// assert_eq!(hotel.rating(), "3 Stars");
/// assert_eq!(hotel.to_string(), "Salon De The 3 Stars");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    name: String,
    rating: String,
    #[serde(alias = "image")]
    image_url: String,
}

impl Hotel {
    /// Creates a record from its three fields, stored unchanged.
    pub fn new(
        name: impl Into<String>,
        rating: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            rating: rating.into(),
            image_url: image_url.into(),
        }
    }

    /// Creates a record whose rating is formatted as `"<stars> Stars"`.
    pub fn with_stars(name: impl Into<String>, stars: u8, image_url: impl Into<String>) -> Self {
        Self::new(name, format!("{} Stars", stars), image_url)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rating(&self) -> &str {
        &self.rating
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }
}

impl fmt::Display for Hotel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.rating)
    }
}
