//! Direct placeholder substitution.
//!
//! The template is plain text containing marker tokens, by default
//! `###HOTELNAME###` and `###STARS###`. Records are consumed in order: for
//! each one, the first remaining name token is replaced by its name and the
//! first remaining rating token by its rating.
//!
//! ```text
//! Template: <li>###HOTELNAME###: ###STARS###</li><li>###HOTELNAME###: ###STARS###</li>
//! Records:  [("Salon De The", "3 Stars"), ("Pizza Hawai", "3 Stars")]
//! Output:   <li>Salon De The: 3 Stars</li><li>Pizza Hawai: 3 Stars</li>
//! ```
//!
//! ## Limitations
//!
//! Substitution never fails. A template with fewer token pairs than records
//! silently drops the extra records; one with more leaves the extra tokens
//! in place. [`Substituted::unplaced`] reports how many records were missing
//! a name or a rating token so callers can detect the mismatch.
//!
//! Replacements are applied to the running text, so a record value that
//! itself contains a token is picked up by the next substitution.

use std::path::Path;

use crate::error::RenderError;
use crate::record::Hotel;

/// Default marker replaced by a hotel name.
pub const HOTEL_NAME_TOKEN: &str = "###HOTELNAME###";

/// Default marker replaced by a hotel rating.
pub const STARS_TOKEN: &str = "###STARS###";

/// The pair of marker tokens a substitution template uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    pub name: String,
    pub rating: String,
}

impl Placeholders {
    pub fn new(name: impl Into<String>, rating: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rating: rating.into(),
        }
    }
}

impl Default for Placeholders {
    fn default() -> Self {
        Self::new(HOTEL_NAME_TOKEN, STARS_TOKEN)
    }
}

/// Result of a substitution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substituted {
    /// The rendered document.
    pub text: String,
    /// Records for which the name token, the rating token, or both had no
    /// remaining occurrence.
    pub unplaced: usize,
}

/// Substitutes records into `template`, first occurrence per token per record.
pub fn substitute(template: &str, records: &[Hotel], placeholders: &Placeholders) -> Substituted {
    let mut text = template.to_string();
    let mut unplaced = 0;

    for hotel in records {
        let named = replace_first(&mut text, &placeholders.name, hotel.name());
        let rated = replace_first(&mut text, &placeholders.rating, hotel.rating());
        if !(named && rated) {
            unplaced += 1;
        }
    }

    if unplaced > 0 {
        log::warn!(
            "{} of {} records were not fully rendered: no {} or {} placeholder left",
            unplaced,
            records.len(),
            placeholders.name,
            placeholders.rating
        );
    }

    Substituted { text, unplaced }
}

/// Reads a template document from disk and substitutes records into it.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if the document cannot be read.
pub fn render_file(
    path: impl AsRef<Path>,
    records: &[Hotel],
    placeholders: &Placeholders,
) -> Result<Substituted, RenderError> {
    let path = path.as_ref();
    let template = std::fs::read_to_string(path).map_err(|e| RenderError::io(path, e))?;
    log::debug!(
        "substituting {} records into {}",
        records.len(),
        path.display()
    );
    Ok(substitute(&template, records, placeholders))
}

/// Replaces the first occurrence of `token` in place. Returns whether one was found.
fn replace_first(text: &mut String, token: &str, value: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    match text.find(token) {
        Some(start) => {
            text.replace_range(start..start + token.len(), value);
            true
        }
        None => false,
    }
}
