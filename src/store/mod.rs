//! Metadata store interfaces
//!
//! The backing store is an external collaborator. Lookups never fail: a
//! missing field or association comes back as a zero-value placeholder, and
//! tables and enums come back as `None` so callers can tell "absent" apart.

mod json_store;

use std::collections::{BTreeMap, HashMap};

use crate::model::{Enum, EnumValue, Field, Table, TableField};

pub use json_store::{JsonStore, StoreSnapshot};

pub trait TableStore: Send + Sync {
    fn get_all(&self) -> Vec<Table>;
    fn get_by_id(&self, id: i64) -> Option<Table>;
    fn get_by_name(&self, name: &str) -> Option<Table>;
}

pub trait FieldStore: Send + Sync {
    fn get_by_id(&self, id: i64) -> Field;
    fn get_by_name(&self, name: &str) -> Field;
    fn find_by_ids(&self, ids: &[i64]) -> HashMap<i64, Field>;
    fn find_by_names(&self, names: &[&str]) -> HashMap<String, Field>;
}

pub trait EnumStore: Send + Sync {
    fn get_by_id(&self, id: i64) -> Option<Enum>;
    fn find_by_ids(&self, ids: &[i64]) -> HashMap<i64, Enum>;
}

pub trait EnumValueStore: Send + Sync {
    /// Values of one enum in definition order
    fn find_by_enum_id(&self, enum_id: i64) -> Vec<EnumValue>;
}

pub trait TableFieldStore: Send + Sync {
    /// Associations of a table keyed by field id
    fn get_fields(&self, table_id: i64) -> BTreeMap<i64, TableField>;
    fn get_association(&self, table_id: i64, field_id: i64) -> TableField;
}

/// A single backend serving every record kind
pub trait MetadataStore:
    TableStore + FieldStore + EnumStore + EnumValueStore + TableFieldStore
{
}

impl<T> MetadataStore for T where
    T: TableStore + FieldStore + EnumStore + EnumValueStore + TableFieldStore
{
}

/// Store that knows nothing; every lookup misses
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

impl TableStore for NoopStore {
    fn get_all(&self) -> Vec<Table> {
        Vec::new()
    }

    fn get_by_id(&self, _id: i64) -> Option<Table> {
        None
    }

    fn get_by_name(&self, _name: &str) -> Option<Table> {
        None
    }
}

impl FieldStore for NoopStore {
    fn get_by_id(&self, _id: i64) -> Field {
        Field::default()
    }

    fn get_by_name(&self, _name: &str) -> Field {
        Field::default()
    }

    fn find_by_ids(&self, _ids: &[i64]) -> HashMap<i64, Field> {
        HashMap::new()
    }

    fn find_by_names(&self, _names: &[&str]) -> HashMap<String, Field> {
        HashMap::new()
    }
}

impl EnumStore for NoopStore {
    fn get_by_id(&self, _id: i64) -> Option<Enum> {
        None
    }

    fn find_by_ids(&self, _ids: &[i64]) -> HashMap<i64, Enum> {
        HashMap::new()
    }
}

impl EnumValueStore for NoopStore {
    fn find_by_enum_id(&self, _enum_id: i64) -> Vec<EnumValue> {
        Vec::new()
    }
}

impl TableFieldStore for NoopStore {
    fn get_fields(&self, _table_id: i64) -> BTreeMap<i64, TableField> {
        BTreeMap::new()
    }

    fn get_association(&self, _table_id: i64, _field_id: i64) -> TableField {
        TableField::default()
    }
}
