//! Label id → human-readable name lookup.
//!
//! The built-in table is generated once from the static label table. An
//! external keyed JSON document (`{"0": "...", "1": "..."}`) can replace it;
//! ids the document leaves out resolve to [`UNKNOWN_LABEL`].

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{info, warn};

use crate::LabelError;
use crate::label::LabelId;

/// Name returned for ids missing from the table.
pub const UNKNOWN_LABEL: &str = "Unknown";

static BUILTIN: LazyLock<LabelNames> = LazyLock::new(|| LabelNames {
    names: LabelId::all()
        .map(|id| (id, id.builtin_name().to_string()))
        .collect(),
});

/// Read-only id → name table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelNames {
    names: HashMap<LabelId, String>,
}

impl Default for LabelNames {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl LabelNames {
    /// The process-wide built-in table.
    pub fn builtin() -> &'static LabelNames {
        &BUILTIN
    }

    /// Parse a keyed JSON document mapping id strings to names.
    pub fn from_json(doc: &str) -> Result<Self, LabelError> {
        let raw: HashMap<String, String> = serde_json::from_str(doc)?;
        let mut names = HashMap::with_capacity(raw.len());
        for (key, name) in raw {
            let id: i64 = key
                .trim()
                .parse()
                .map_err(|_| LabelError::InvalidLabelKey(key.clone()))?;
            names.insert(LabelId::try_from(id)?, name);
        }
        Ok(Self { names })
    }

    /// Load a keyed JSON document from disk.
    pub fn load(path: &Path) -> Result<Self, LabelError> {
        let doc = std::fs::read_to_string(path)?;
        let table = Self::from_json(&doc)?;
        info!(count = table.len(), path = %path.display(), "loaded label names");
        if table.len() < LabelId::COUNT {
            warn!(
                missing = LabelId::COUNT - table.len(),
                "label name table is incomplete; gaps resolve to \"{UNKNOWN_LABEL}\""
            );
        }
        Ok(table)
    }

    /// Name for `id`, or [`UNKNOWN_LABEL`] if the table has no entry.
    pub fn name(&self, id: LabelId) -> &str {
        match self.names.get(&id) {
            Some(name) => name.as_str(),
            None => {
                warn!(id = id.value(), code = id.code(), "label id missing from name table");
                UNKNOWN_LABEL
            }
        }
    }

    /// Reverse lookup by name.
    pub fn id_of(&self, name: &str) -> Option<LabelId> {
        self.names
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entries sorted by id.
    pub fn entries(&self) -> Vec<(LabelId, &str)> {
        let mut out: Vec<_> = self.names.iter().map(|(id, n)| (*id, n.as_str())).collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }
}

/// Serialises back to the keyed document form, ordered by id.
impl Serialize for LabelNames {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (id, name) in entries {
            map.serialize_entry(&id.value().to_string(), name)?;
        }
        map.end()
    }
}
