//! Record store abstraction and the in-memory implementation.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;

use crate::core::species::Species;
use crate::error::{BestiaryError, BestiaryResult};

/// Read-only source of species records.
///
/// Implementations must be safe under concurrent invocation; both operations
/// are side-effect free. Failures surface as `StoreUnavailable` and are
/// translated at the server boundary into a generic payload.
pub trait SpeciesStore: Send + Sync {
    /// Snapshot of every record, in no particular order.
    fn all(&self) -> BestiaryResult<Vec<Species>>;

    /// Look up one record by id.
    fn by_id(&self, id: u64) -> BestiaryResult<Option<Species>>;
}

/// In-memory store backed by a plain vector of records.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<Species>,
}

impl MemoryStore {
    pub fn from_records(records: Vec<Species>) -> Self {
        Self { records }
    }

    /// Load records from a JSON array file.
    pub fn from_json_file(path: &Path) -> BestiaryResult<Self> {
        let contents = fs::read_to_string(path)?;
        let records: Vec<Species> =
            serde_json::from_str(&contents).map_err(|source| BestiaryError::DatasetParse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { records })
    }

    /// Bundled sample dataset, used when no dataset file is configured.
    pub fn sample() -> Self {
        Self {
            records: SAMPLE.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SpeciesStore for MemoryStore {
    fn all(&self) -> BestiaryResult<Vec<Species>> {
        Ok(self.records.clone())
    }

    fn by_id(&self, id: u64) -> BestiaryResult<Option<Species>> {
        Ok(self.records.iter().find(|s| s.id == id).cloned())
    }
}

static SAMPLE: Lazy<Vec<Species>> = Lazy::new(|| {
    [
        (1, "Chat", "Felis catus", "mammifère"),
        (2, "Chameau", "Camelus dromedarius", "mammifère"),
        (3, "Cheval", "Equus caballus", "mammifère"),
        (4, "Chien", "Canis lupus familiaris", "mammifère"),
        (5, "Chouette", "Tyto alba", "oiseau"),
        (6, "Chèvre", "Capra hircus", "mammifère"),
        (7, "Chimpanzé", "Pan troglodytes", "mammifère"),
        (8, "Aigle", "Aquila chrysaetos", "oiseau"),
        (9, "Baleine", "Balaenoptera musculus", "mammifère"),
        (10, "Crocodile", "Crocodylus niloticus", "reptile"),
        (11, "Dauphin", "Delphinus delphis", "mammifère"),
        (12, "Éléphant", "Loxodonta africana", "mammifère"),
        (13, "Fennec", "Vulpes zerda", "mammifère"),
        (14, "Girafe", "Giraffa camelopardalis", "mammifère"),
        (15, "Hérisson", "Erinaceus europaeus", "mammifère"),
        (16, "Loup", "Canis lupus", "mammifère"),
        (17, "Ours", "Ursus arctos", "mammifère"),
        (18, "Panda", "Ailuropoda melanoleuca", "mammifère"),
        (19, "Renard", "Vulpes vulpes", "mammifère"),
        (20, "Requin", "Carcharodon carcharias", "poisson"),
        (21, "Serpent", "Python regius", "reptile"),
        (22, "Tigre", "Panthera tigris", "mammifère"),
        (23, "Tortue", "Testudo hermanni", "reptile"),
        (24, "Vache", "Bos taurus", "mammifère"),
    ]
    .into_iter()
    .map(|(id, common, scientific, category)| Species::new(id, common, scientific, category))
    .collect()
});

/// Store that always fails, for exercising the unavailable path.
#[cfg(test)]
pub struct FailingStore;

#[cfg(test)]
impl SpeciesStore for FailingStore {
    fn all(&self) -> BestiaryResult<Vec<Species>> {
        Err(BestiaryError::StoreUnavailable("connection refused".into()))
    }

    fn by_id(&self, _id: u64) -> BestiaryResult<Option<Species>> {
        Err(BestiaryError::StoreUnavailable("connection refused".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_has_unique_ids() {
        let store = MemoryStore::sample();
        let records = store.all().unwrap();
        let mut ids: Vec<u64> = records.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn test_by_id() {
        let store = MemoryStore::sample();
        let chat = store.by_id(1).unwrap().expect("id 1 exists");
        assert_eq!(chat.common_name, "Chat");
        assert!(store.by_id(9999).unwrap().is_none());
    }

    #[test]
    fn test_failing_store_surfaces_unavailable() {
        let err = FailingStore.all().unwrap_err();
        assert!(matches!(err, BestiaryError::StoreUnavailable(_)));
    }
}
