//! Metadata store backed by a JSON snapshot file

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MetaCenterError;
use crate::model::{Enum, EnumValue, Field, Table, TableField};

use super::{EnumStore, EnumValueStore, FieldStore, TableFieldStore, TableStore};

/// On-disk layout of a store export
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSnapshot {
    pub tables: Vec<Table>,
    pub fields: Vec<Field>,
    pub enums: Vec<Enum>,
    pub enum_values: Vec<EnumValue>,
    pub table_fields: Vec<TableField>,
}

/// In-memory store loaded once from a snapshot
#[derive(Debug, Clone, Default)]
pub struct JsonStore {
    tables: Vec<Table>,
    fields: HashMap<i64, Field>,
    enums: HashMap<i64, Enum>,
    enum_values: HashMap<i64, Vec<EnumValue>>,
    table_fields: HashMap<i64, BTreeMap<i64, TableField>>,
}

impl JsonStore {
    /// Load a snapshot file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MetaCenterError::StoreLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let snapshot: StoreSnapshot =
            serde_json::from_str(&content).map_err(|e| MetaCenterError::StoreLoad {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let store = Self::from_snapshot(snapshot);
        debug!(
            path = %path.display(),
            tables = store.tables.len(),
            fields = store.fields.len(),
            "Loaded metadata store"
        );
        Ok(store)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: StoreSnapshot =
            serde_json::from_str(json).map_err(MetaCenterError::from)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let mut enum_values: HashMap<i64, Vec<EnumValue>> = HashMap::new();
        for value in snapshot.enum_values {
            enum_values.entry(value.enum_id).or_default().push(value);
        }

        let mut table_fields: HashMap<i64, BTreeMap<i64, TableField>> = HashMap::new();
        for association in snapshot.table_fields {
            table_fields
                .entry(association.table_id)
                .or_default()
                .insert(association.field_id, association);
        }

        Self {
            tables: snapshot.tables.into_iter().map(bare_table).collect(),
            fields: snapshot
                .fields
                .into_iter()
                .map(|f| (f.id, Field { enumeration: None, ..f }))
                .collect(),
            enums: snapshot
                .enums
                .into_iter()
                .map(|e| (e.id, bare_enum(&e)))
                .collect(),
            enum_values,
            table_fields,
        }
    }
}

/// Stores hand out records without their resolved children
fn bare_table(table: Table) -> Table {
    let mut bare = Table::new(table.id, table.name, table.display_name);
    bare.index = table.index;
    bare
}

fn bare_enum(enumeration: &Enum) -> Enum {
    let mut bare = Enum::new(
        enumeration.id,
        enumeration.display_name.clone(),
        enumeration.value_type_id,
    );
    bare.explain = enumeration.explain.clone();
    bare
}

impl TableStore for JsonStore {
    fn get_all(&self) -> Vec<Table> {
        self.tables.clone()
    }

    fn get_by_id(&self, id: i64) -> Option<Table> {
        self.tables.iter().find(|t| t.id == id).cloned()
    }

    fn get_by_name(&self, name: &str) -> Option<Table> {
        self.tables.iter().find(|t| t.name == name).cloned()
    }
}

impl FieldStore for JsonStore {
    fn get_by_id(&self, id: i64) -> Field {
        self.fields.get(&id).cloned().unwrap_or_default()
    }

    fn get_by_name(&self, name: &str) -> Field {
        self.fields
            .values()
            .find(|f| f.name == name)
            .cloned()
            .unwrap_or_default()
    }

    fn find_by_ids(&self, ids: &[i64]) -> HashMap<i64, Field> {
        ids.iter()
            .filter_map(|id| self.fields.get(id).map(|f| (*id, f.clone())))
            .collect()
    }

    fn find_by_names(&self, names: &[&str]) -> HashMap<String, Field> {
        self.fields
            .values()
            .filter(|f| names.contains(&f.name.as_str()))
            .map(|f| (f.name.clone(), f.clone()))
            .collect()
    }
}

impl EnumStore for JsonStore {
    fn get_by_id(&self, id: i64) -> Option<Enum> {
        self.enums.get(&id).cloned()
    }

    fn find_by_ids(&self, ids: &[i64]) -> HashMap<i64, Enum> {
        ids.iter()
            .filter_map(|id| self.enums.get(id).map(|e| (*id, e.clone())))
            .collect()
    }
}

impl EnumValueStore for JsonStore {
    fn find_by_enum_id(&self, enum_id: i64) -> Vec<EnumValue> {
        self.enum_values.get(&enum_id).cloned().unwrap_or_default()
    }
}

impl TableFieldStore for JsonStore {
    fn get_fields(&self, table_id: i64) -> BTreeMap<i64, TableField> {
        self.table_fields.get(&table_id).cloned().unwrap_or_default()
    }

    fn get_association(&self, table_id: i64, field_id: i64) -> TableField {
        self.table_fields
            .get(&table_id)
            .and_then(|fields| fields.get(&field_id))
            .cloned()
            .unwrap_or_default()
    }
}
