//! Per-artist biographical attributes compared by the scorer.

use super::years::YearRecord;

/// Snapshot of the location and affiliation attributes of one artist.
///
/// `None` means the attribute is unknown, which is distinct from an empty
/// list: unknown attributes never contribute to the overlap score, while an
/// empty place list is known-but-empty.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeBundle {
    /// Places the artist lived or worked in. Repeated entries are kept and
    /// count once per occurrence.
    pub places: Option<Vec<String>>,
    pub birthplace: Option<String>,
    pub nationality: Option<Vec<String>>,
    pub citizenship: Option<String>,
}

impl AttributeBundle {
    pub fn with_places<I, S>(mut self, places: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.places = Some(places.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_birthplace(mut self, birthplace: impl Into<String>) -> Self {
        self.birthplace = Some(birthplace.into());
        self
    }

    pub fn with_nationality<I, S>(mut self, nationality: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nationality = Some(nationality.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_citizenship(mut self, citizenship: impl Into<String>) -> Self {
        self.citizenship = Some(citizenship.into());
        self
    }

    /// Number of known places; unknown places count as zero.
    pub fn place_count(&self) -> usize {
        self.places.as_ref().map_or(0, Vec::len)
    }
}

/// One artist as fed to batch scoring.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArtistRecord {
    pub name: String,
    pub years: YearRecord,
    pub attributes: AttributeBundle,
    /// Self-reported gender, used by population statistics only.
    pub gender: Option<String>,
}

impl ArtistRecord {
    pub fn new(name: impl Into<String>, years: YearRecord, attributes: AttributeBundle) -> Self {
        Self {
            name: name.into(),
            years,
            attributes,
            gender: None,
        }
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }
}
