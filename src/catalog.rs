//! Item Catalog Module
//!
//! Static mapping between numeric item ids and their English display names.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{AppraiseError, Result};

/// Stable numeric key of a tradeable item.
pub type ItemId = u32;

/// Localised names of one catalog entry. Only English is used.
#[derive(Debug, Deserialize)]
struct LocalizedName {
    en: String,
}

// == Item Catalog ==
/// Read-only id <-> name lookup, loaded once per run.
#[derive(Debug, Default)]
pub struct ItemCatalog {
    names: BTreeMap<ItemId, String>,
    ids_by_name: HashMap<String, ItemId>,
}

impl ItemCatalog {
    /// Builds a catalog from `(id, name)` pairs.
    ///
    /// When several ids share a display name the lowest id wins the reverse lookup.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ItemId, S)>,
        S: Into<String>,
    {
        let names: BTreeMap<ItemId, String> = entries
            .into_iter()
            .map(|(id, name)| (id, name.into()))
            .collect();

        let mut ids_by_name = HashMap::with_capacity(names.len());
        for (id, name) in &names {
            ids_by_name.entry(name.clone()).or_insert(*id);
        }

        Self { names, ids_by_name }
    }

    /// Parses the `{ "<id>": { "en": "<name>" } }` catalog document.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, LocalizedName> =
            serde_json::from_str(json).map_err(|e| AppraiseError::CatalogLoad(e.to_string()))?;

        let mut entries = Vec::with_capacity(raw.len());
        for (key, name) in raw {
            let id: ItemId = key
                .trim()
                .parse()
                .map_err(|_| AppraiseError::CatalogLoad(format!("invalid item id '{}'", key)))?;
            entries.push((id, name.en));
        }

        Ok(Self::from_entries(entries))
    }

    /// Loads the catalog file. A missing or malformed file is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| AppraiseError::CatalogLoad(format!("{}: {}", path.display(), e)))?;
        let catalog = Self::from_json(&json)?;
        info!("Loaded {} catalog items from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Id of the item with exactly this display name.
    pub fn id_of(&self, name: &str) -> Option<ItemId> {
        self.ids_by_name.get(name).copied()
    }

    /// Display name of an item id.
    pub fn name_of(&self, id: ItemId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
