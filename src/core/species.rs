//! Species records and their wire projections.

use serde::{Deserialize, Serialize};

/// A single entry in the species directory.
///
/// Records are read-only from the search subsystem's perspective; the id is
/// unique and stable so suggestion items can link to the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub id: u64,
    /// Primary display name (e.g. "Chat").
    pub common_name: String,
    /// Alternate/scientific name (e.g. "Felis catus").
    pub scientific_name: String,
    /// Enum-like category label (e.g. "mammal").
    pub category: String,
}

impl Species {
    pub fn new(
        id: u64,
        common_name: impl Into<String>,
        scientific_name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            common_name: common_name.into(),
            scientific_name: scientific_name.into(),
            category: category.into(),
        }
    }
}

/// Projection of a species as it travels over the autocomplete wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesHit {
    pub id: u64,
    pub name: String,
    pub scientific: String,
    pub category: String,
}

impl From<&Species> for SpeciesHit {
    fn from(species: &Species) -> Self {
        Self {
            id: species.id,
            name: species.common_name.clone(),
            scientific: species.scientific_name.clone(),
            category: species.category.clone(),
        }
    }
}

impl From<Species> for SpeciesHit {
    fn from(species: Species) -> Self {
        Self {
            id: species.id,
            name: species.common_name,
            scientific: species.scientific_name,
            category: species.category,
        }
    }
}

/// The two suggestion tiers as serialized in the autocomplete payload.
///
/// Tiers are disjoint: a record matching as a prefix never reappears in
/// `contains`. Prefix rows always precede contains rows in the flat list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieredHits {
    #[serde(rename = "startsWith")]
    pub prefix: Vec<SpeciesHit>,
    pub contains: Vec<SpeciesHit>,
}

impl TieredHits {
    /// Number of rows across both tiers.
    pub fn total(&self) -> usize {
        self.prefix.len() + self.contains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty() && self.contains.is_empty()
    }
}
