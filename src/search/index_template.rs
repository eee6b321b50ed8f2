//! Elasticsearch index-template synthesis

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::MetaCenterError;
use crate::model::{Field, SearchHint, Table};
use crate::types::{DataTypeGetter, LogicalType};

pub const DEFAULT_NUMBER_OF_SHARDS: u32 = 3;
pub const DEFAULT_NUMBER_OF_REPLICAS: u32 = 0;
pub const DATE_FORMAT: &str = "yyyy-MM-dd HH:mm:ss";
pub const INDEX_ANALYZER: &str = "ik_max_word";
pub const SEARCH_ANALYZER: &str = "ik_smart";

/// Composable index template document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexTemplate {
    pub index_patterns: Vec<String>,
    pub template: TemplateBody,
    pub priority: u32,
    pub version: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateBody {
    pub settings: IndexSettings,
    pub mappings: Mappings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexSettings {
    /// Left to the cluster default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_result_window: Option<u32>,
    pub number_of_shards: u32,
    pub number_of_replicas: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mappings {
    #[serde(rename = "_source")]
    pub source: SourceConfig,
    /// Field name to mapping; ordered so output is stable
    pub properties: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceConfig {
    pub enabled: bool,
}

impl IndexTemplate {
    pub fn to_json(&self) -> Result<String, MetaCenterError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, MetaCenterError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the index template of a table.
///
/// Field types are resolved through `types`, which must use logical type
/// names (see [`DataTypeRegistry::logical`](crate::types::DataTypeRegistry::logical)).
pub fn synthesize_index_template(table: &Table, types: &dyn DataTypeGetter) -> IndexTemplate {
    let config = &table.index;
    let base = if config.name_or_prefix.is_empty() {
        table.name.as_str()
    } else {
        config.name_or_prefix.as_str()
    };
    let pattern = if config.multi_index {
        format!("{}*", base)
    } else {
        base.to_string()
    };

    let settings = IndexSettings {
        max_result_window: (config.max_result_window != 0).then_some(config.max_result_window),
        number_of_shards: non_zero_or(config.number_of_shards, DEFAULT_NUMBER_OF_SHARDS),
        number_of_replicas: non_zero_or(config.number_of_replicas, DEFAULT_NUMBER_OF_REPLICAS),
    };

    let properties = table
        .fields()
        .iter()
        .map(|field| (field.name.clone(), field_mapping(field, types)))
        .collect();

    IndexTemplate {
        index_patterns: vec![pattern],
        template: TemplateBody {
            settings,
            mappings: Mappings {
                source: SourceConfig { enabled: true },
                properties,
            },
        },
        priority: 0,
        version: 0,
    }
}

fn non_zero_or(value: u32, default: u32) -> u32 {
    if value == 0 {
        default
    } else {
        value
    }
}

fn logical_type_of(type_id: u32, types: &dyn DataTypeGetter) -> Option<LogicalType> {
    LogicalType::from_name(&types.get_by_id(type_id).name)
}

/// Mapping of one field by its logical type
pub fn field_mapping(field: &Field, types: &dyn DataTypeGetter) -> Value {
    match logical_type_of(field.type_id, types) {
        Some(LogicalType::Int) => json!({ "type": "long" }),
        Some(LogicalType::UInt) => json!({ "type": "unsigned_long" }),
        Some(LogicalType::Float64) => json!({ "type": "double" }),
        Some(LogicalType::DateTime) => json!({
            "type": "date",
            "format": DATE_FORMAT,
            "ignore_malformed": true,
        }),
        Some(LogicalType::Enum) => {
            let value_type = field
                .enumeration
                .as_ref()
                .and_then(|e| logical_type_of(e.value_type_id, types));
            match value_type {
                Some(LogicalType::Int | LogicalType::UInt) => json!({ "type": "long" }),
                _ => json!({ "type": "keyword" }),
            }
        }
        Some(LogicalType::Json) => json!({ "type": "nested" }),
        Some(LogicalType::String) | None => match field.search_hint {
            SearchHint::Text => json!({
                "type": "text",
                "analyzer": INDEX_ANALYZER,
                "search_analyzer": SEARCH_ANALYZER,
                "fields": { "keyword": { "type": "keyword" } },
            }),
            SearchHint::Keyword => json!({ "type": "keyword" }),
        },
    }
}
