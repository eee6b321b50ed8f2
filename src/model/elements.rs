//! Metadata model element types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// `EnumValue::status` of a value that is kept for lookups but retired from new code
pub const ENUM_VALUE_RETIRED: i32 = 1;

/// A table and, once aggregated, its fields.
///
/// Fields are only added through [`Table::push_field`], which keeps the
/// name lookup in step with the field sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "TableRecord")]
pub struct Table {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub index: IndexConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<Field>,
    #[serde(skip)]
    fields_by_name: HashMap<String, usize>,
}

impl Table {
    pub fn new(id: i64, name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            display_name: display_name.into(),
            ..Default::default()
        }
    }

    /// Fields in insertion order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by name. With duplicate names the last pushed field wins.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields_by_name
            .get(name)
            .and_then(|&position| self.fields.get(position))
    }

    /// Names currently present in the lookup map
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields_by_name.keys().map(String::as_str)
    }

    pub fn push_field(&mut self, field: Field) {
        self.fields_by_name
            .insert(field.name.clone(), self.fields.len());
        self.fields.push(field);
    }

    /// Primary-key fields in field order
    pub fn primary_key_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_primary_key)
    }
}

/// Serialized shape of a table; the name lookup is rebuilt on load
#[derive(Deserialize)]
struct TableRecord {
    #[serde(default)]
    id: i64,
    name: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    index: IndexConfig,
    #[serde(default)]
    fields: Vec<Field>,
}

impl From<TableRecord> for Table {
    fn from(record: TableRecord) -> Self {
        let mut table = Table::new(record.id, record.name, record.display_name);
        table.index = record.index;
        for field in record.fields {
            table.push_field(field);
        }
        table
    }
}

/// Search index settings attached to a table. Zero means "not configured".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Index name, or the prefix when `multi_index` is set
    pub name_or_prefix: String,
    pub multi_index: bool,
    pub max_result_window: u32,
    pub number_of_shards: u32,
    pub number_of_replicas: u32,
}

/// How a string field is indexed for search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchHint {
    /// Full-text analyzed, with a keyword sub-field
    Text,
    /// Unrecognised hints index as keywords
    #[default]
    #[serde(other)]
    Keyword,
}

/// A column definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Field {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    /// Registry id of the field type
    pub type_id: u32,
    /// Non-zero when the field takes its values from an [`Enum`]
    pub enum_id: i64,
    pub is_primary_key: bool,
    pub is_auto_increment: bool,
    pub search_hint: SearchHint,
    pub explain: String,
    /// Resolved enumeration (inlined by DDL extraction or attached by aggregation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<Enum>,
}

impl Field {
    pub fn new(name: impl Into<String>, type_id: u32) -> Self {
        Self {
            name: name.into(),
            type_id,
            ..Default::default()
        }
    }
}

/// An enumeration and, once resolved, its values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "EnumRecord")]
pub struct Enum {
    pub id: i64,
    pub display_name: String,
    /// Registry id of the member literals (numeric or string)
    pub value_type_id: u32,
    pub explain: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    values: Vec<EnumValue>,
    #[serde(skip)]
    values_by_literal: HashMap<String, usize>,
}

impl Enum {
    pub fn new(id: i64, display_name: impl Into<String>, value_type_id: u32) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            value_type_id,
            ..Default::default()
        }
    }

    /// Values in definition order, retired ones included
    pub fn values(&self) -> &[EnumValue] {
        &self.values
    }

    pub fn value(&self, literal: &str) -> Option<&EnumValue> {
        self.values_by_literal
            .get(literal)
            .and_then(|&position| self.values.get(position))
    }

    pub fn push_value(&mut self, value: EnumValue) {
        self.values_by_literal
            .insert(value.literal.clone(), self.values.len());
        self.values.push(value);
    }
}

#[derive(Deserialize)]
struct EnumRecord {
    #[serde(default)]
    id: i64,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    value_type_id: u32,
    #[serde(default)]
    explain: String,
    #[serde(default)]
    values: Vec<EnumValue>,
}

impl From<EnumRecord> for Enum {
    fn from(record: EnumRecord) -> Self {
        let mut enumeration = Enum::new(record.id, record.display_name, record.value_type_id);
        enumeration.explain = record.explain;
        for value in record.values {
            enumeration.push_value(value);
        }
        enumeration
    }
}

/// A single enumeration member
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumValue {
    pub id: i64,
    pub enum_id: i64,
    /// Raw name used to derive the generated constant name
    pub symbolic_name: String,
    pub display_name: String,
    /// Stored value, e.g. `1` or `waiting`
    pub literal: String,
    pub status: i32,
    pub explain: String,
}

impl EnumValue {
    pub fn is_retired(&self) -> bool {
        self.status == ENUM_VALUE_RETIRED
    }
}

/// Link between a table and one of its fields, owned by the metadata store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableField {
    pub id: i64,
    pub table_id: i64,
    pub field_id: i64,
    /// Set when the field is joined in from another table
    pub ref_table_id: i64,
    pub is_unique: bool,
    pub is_primary_key: bool,
    pub is_encrypt: bool,
}
