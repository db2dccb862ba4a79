//! Edition (label / catalog number / year of a specific issue)

use serde::{Deserialize, Serialize};

/// A specific physical or digital issue of a release.
///
/// At least one field is set; use [`Edition::new`] to build one from
/// optional parts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Edition {
    /// Record label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Catalog number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_number: Option<String>,

    /// Year of this edition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
}

impl Edition {
    /// Build an edition, or `None` when every part is missing or blank
    pub fn new(
        label: Option<String>,
        catalog_number: Option<String>,
        year: Option<u32>,
    ) -> Option<Self> {
        let edition = Self {
            label: non_blank(label),
            catalog_number: non_blank(catalog_number),
            year: year.filter(|y| *y > 0),
        };
        (!edition.is_empty()).then_some(edition)
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.catalog_number.is_none() && self.year.is_none()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
