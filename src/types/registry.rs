//! Immutable type dictionaries with total lookups

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::go::resolve_go_type_id;

/// A scalar type known to a registry.
///
/// `id == 0` with an empty name is the unknown sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataType {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub is_numeric: bool,
}

impl DataType {
    pub fn new(id: u32, name: &str, display_name: &str, is_numeric: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            display_name: display_name.to_string(),
            is_numeric,
        }
    }

    /// Whether this is the sentinel returned on a lookup miss
    pub fn is_unknown(&self) -> bool {
        self.id == 0 && self.name.is_empty()
    }
}

/// Type lookups used by every component that needs type resolution.
///
/// Both lookups are total: a miss yields the unknown sentinel, never an error.
pub trait DataTypeGetter: Send + Sync {
    fn get_by_id(&self, id: u32) -> &DataType;
    fn get_by_name(&self, name: &str) -> &DataType;
}

/// How a registry resolves names that are not an exact entry name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameResolver {
    /// Only exact (ASCII case-insensitive) names resolve
    Exact,
    /// Physical SQL tokens are mapped onto Go types by substring convention
    GoHeuristic,
}

/// A registry built once at startup and only read afterwards
#[derive(Debug, Clone)]
pub struct DataTypeRegistry {
    by_id: BTreeMap<u32, DataType>,
    by_name: HashMap<String, u32>,
    resolver: NameResolver,
    unknown: DataType,
}

impl DataTypeRegistry {
    /// Build a registry from a fixed set of types.
    ///
    /// When two entries share a name, name lookups resolve to the first one.
    pub fn new(types: impl IntoIterator<Item = DataType>, resolver: NameResolver) -> Self {
        let mut by_id = BTreeMap::new();
        let mut by_name = HashMap::new();
        for data_type in types {
            by_name
                .entry(data_type.name.to_ascii_lowercase())
                .or_insert(data_type.id);
            by_id.insert(data_type.id, data_type);
        }
        Self {
            by_id,
            by_name,
            resolver,
            unknown: DataType::default(),
        }
    }

    /// All registered types in id order
    pub fn types(&self) -> impl Iterator<Item = &DataType> {
        self.by_id.values()
    }

    pub fn resolver(&self) -> NameResolver {
        self.resolver
    }
}

impl DataTypeGetter for DataTypeRegistry {
    fn get_by_id(&self, id: u32) -> &DataType {
        self.by_id.get(&id).unwrap_or(&self.unknown)
    }

    fn get_by_name(&self, name: &str) -> &DataType {
        let key = name.trim().to_ascii_lowercase();
        if let Some(id) = self.by_name.get(&key) {
            return self.get_by_id(*id);
        }
        match self.resolver {
            NameResolver::Exact => &self.unknown,
            NameResolver::GoHeuristic => self.get_by_id(resolve_go_type_id(&key)),
        }
    }
}
