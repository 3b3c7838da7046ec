//! # Meter Catalog — Registry Configuration
//!
//! A catalog is the ordered list of `(id, size, name, description)` entries
//! a [`MeterRegistry`](crate::MeterRegistry) is built from. It is plain
//! configuration: supplied by the caller, loaded from YAML or JSON, or taken
//! from [`MeterCatalog::sas_602`]. There is no module-level catalog, so
//! registries with different catalogs can coexist.
//!
//! ## File Format
//!
//! Either a document with a `meters` key or a bare list. Each entry is a
//! mapping or a 4-element sequence:
//!
//! ```yaml
//! meters:
//!   - id: 0
//!     size: 4
//!     name: coin_in
//!     description: Total coin in credits
//!   - [1, 4, coin_out, Total coin out credits]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use sas_core::MeterCode;

use crate::error::{CatalogError, CatalogResult};

/// One catalog entry describing a meter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EntryRepr")]
pub struct CatalogEntry {
    /// Protocol meter code.
    pub id: MeterCode,
    /// Serialization width in bytes.
    pub size: usize,
    /// Short identifier. Leading underscores are stripped at registry build.
    pub name: String,
    /// Free-text label.
    pub description: String,
}

impl CatalogEntry {
    /// Build an entry from its four parts.
    pub fn new(id: u8, size: usize, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: MeterCode(id),
            size,
            name: name.into(),
            description: description.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntryRepr {
    Tuple(MeterCode, usize, String, String),
    Map {
        id: MeterCode,
        size: usize,
        name: String,
        #[serde(default)]
        description: String,
    },
}

impl From<EntryRepr> for CatalogEntry {
    fn from(repr: EntryRepr) -> Self {
        match repr {
            EntryRepr::Tuple(id, size, name, description)
            | EntryRepr::Map {
                id,
                size,
                name,
                description,
            } => Self {
                id,
                size,
                name,
                description,
            },
        }
    }
}

/// An ordered list of meter definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CatalogRepr")]
pub struct MeterCatalog {
    /// Entries in catalog order.
    pub meters: Vec<CatalogEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogRepr {
    Document { meters: Vec<CatalogEntry> },
    List(Vec<CatalogEntry>),
}

impl From<CatalogRepr> for MeterCatalog {
    fn from(repr: CatalogRepr) -> Self {
        match repr {
            CatalogRepr::Document { meters } | CatalogRepr::List(meters) => Self { meters },
        }
    }
}

impl MeterCatalog {
    /// Wrap an ordered list of entries.
    pub fn new(meters: Vec<CatalogEntry>) -> Self {
        Self { meters }
    }

    /// The meters supported by SAS 6.02 in this workspace: cumulative coin
    /// in and coin out, four bytes each.
    pub fn sas_602() -> Self {
        Self::new(vec![
            CatalogEntry::new(0x00, 4, "coin_in", "Total coin in credits"),
            CatalogEntry::new(0x01, 4, "coin_out", "Total coin out credits"),
        ])
    }

    /// Parse a catalog from a YAML document.
    pub fn from_yaml_str(s: &str) -> CatalogResult<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Parse a catalog from a JSON document.
    pub fn from_json_str(s: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a catalog file, choosing the parser by extension.
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` for an extension other than `.yaml`, `.yml`, or
    /// `.json`; `Io` if the file cannot be read; `Yaml`/`Json` if it does not
    /// parse.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !matches!(ext.as_str(), "yaml" | "yml" | "json") {
            return Err(CatalogError::UnsupportedFormat(ext));
        }

        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = if ext == "json" {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };

        tracing::debug!(
            path = %path.display(),
            meters = catalog.len(),
            "loaded meter catalog"
        );
        Ok(catalog)
    }

    /// Entries in catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.meters
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.meters.len()
    }

    /// Returns true if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.meters.is_empty()
    }
}

impl FromIterator<CatalogEntry> for MeterCatalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
