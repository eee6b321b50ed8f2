//! Search-engine index templates

mod index_template;

pub use index_template::{
    field_mapping, synthesize_index_template, IndexSettings, IndexTemplate, Mappings,
    SourceConfig, TemplateBody, DATE_FORMAT, DEFAULT_NUMBER_OF_REPLICAS,
    DEFAULT_NUMBER_OF_SHARDS, INDEX_ANALYZER, SEARCH_ANALYZER,
};
