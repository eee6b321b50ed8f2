//! Metadata center facade
//!
//! Wires stores and type registries together. Every collaborator is handed
//! in through [`MetaCenterBuilder`]; unset stores fall back to [`NoopStore`].

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::codegen::{generate_files, GenerateParam, ParamOptions};
use crate::model::{MetadataAggregator, Table};
use crate::parser::parse_table;
use crate::search::synthesize_index_template;
use crate::store::{
    EnumStore, EnumValueStore, FieldStore, MetadataStore, NoopStore, TableFieldStore, TableStore,
};
use crate::types::DataTypeRegistry;

pub struct MetaCenter {
    tables: Arc<dyn TableStore>,
    table_fields: Arc<dyn TableFieldStore>,
    fields: Arc<dyn FieldStore>,
    enums: Arc<dyn EnumStore>,
    enum_values: Arc<dyn EnumValueStore>,
    logical_types: Arc<DataTypeRegistry>,
    go_types: Arc<DataTypeRegistry>,
}

impl MetaCenter {
    pub fn builder() -> MetaCenterBuilder {
        MetaCenterBuilder::default()
    }

    fn aggregator(&self) -> MetadataAggregator<'_> {
        MetadataAggregator::new(
            self.table_fields.as_ref(),
            self.fields.as_ref(),
            self.enums.as_ref(),
            self.enum_values.as_ref(),
        )
    }

    /// Fully aggregated table, `None` when the store has no such table
    pub fn table_by_name(&self, name: &str) -> Option<Table> {
        self.aggregator().aggregate(self.tables.get_by_name(name))
    }

    pub fn table_by_id(&self, id: i64) -> Option<Table> {
        self.aggregator().aggregate(self.tables.get_by_id(id))
    }

    pub fn all_tables(&self) -> Vec<Table> {
        let aggregator = self.aggregator();
        self.tables
            .get_all()
            .into_iter()
            .filter_map(|table| aggregator.aggregate(Some(table)))
            .collect()
    }

    /// Extract a table from `CREATE TABLE` text
    pub fn parse_ddl(&self, ddl: &str) -> Result<Table> {
        parse_table(ddl, self.logical_types.as_ref())
    }

    /// Compact index-template JSON for a table
    pub fn to_es_template(&self, table: &Table) -> Result<String> {
        let template = synthesize_index_template(table, self.logical_types.as_ref());
        Ok(template.to_json()?)
    }

    pub fn generate_files(
        &self,
        tables: &[Table],
        params: &[GenerateParam],
        options: &ParamOptions,
    ) -> Result<Vec<PathBuf>> {
        generate_files(tables, params, self.go_types.as_ref(), options)
    }

    pub fn logical_types(&self) -> &DataTypeRegistry {
        &self.logical_types
    }

    pub fn go_types(&self) -> &DataTypeRegistry {
        &self.go_types
    }
}

#[derive(Default)]
pub struct MetaCenterBuilder {
    tables: Option<Arc<dyn TableStore>>,
    table_fields: Option<Arc<dyn TableFieldStore>>,
    fields: Option<Arc<dyn FieldStore>>,
    enums: Option<Arc<dyn EnumStore>>,
    enum_values: Option<Arc<dyn EnumValueStore>>,
    logical_types: Option<Arc<DataTypeRegistry>>,
    go_types: Option<Arc<DataTypeRegistry>>,
}

impl MetaCenterBuilder {
    /// Use one backend for every store role
    pub fn store<S: MetadataStore + 'static>(self, store: Arc<S>) -> Self {
        self.table_store(store.clone())
            .table_field_store(store.clone())
            .field_store(store.clone())
            .enum_store(store.clone())
            .enum_value_store(store)
    }

    pub fn table_store(mut self, store: Arc<dyn TableStore>) -> Self {
        self.tables = Some(store);
        self
    }

    pub fn table_field_store(mut self, store: Arc<dyn TableFieldStore>) -> Self {
        self.table_fields = Some(store);
        self
    }

    pub fn field_store(mut self, store: Arc<dyn FieldStore>) -> Self {
        self.fields = Some(store);
        self
    }

    pub fn enum_store(mut self, store: Arc<dyn EnumStore>) -> Self {
        self.enums = Some(store);
        self
    }

    pub fn enum_value_store(mut self, store: Arc<dyn EnumValueStore>) -> Self {
        self.enum_values = Some(store);
        self
    }

    /// Registry used for DDL extraction and index templates
    pub fn logical_types(mut self, registry: Arc<DataTypeRegistry>) -> Self {
        self.logical_types = Some(registry);
        self
    }

    /// Registry used for generated code
    pub fn go_types(mut self, registry: Arc<DataTypeRegistry>) -> Self {
        self.go_types = Some(registry);
        self
    }

    pub fn build(self) -> MetaCenter {
        let noop = Arc::new(NoopStore);
        MetaCenter {
            tables: self.tables.unwrap_or_else(|| noop.clone()),
            table_fields: self.table_fields.unwrap_or_else(|| noop.clone()),
            fields: self.fields.unwrap_or_else(|| noop.clone()),
            enums: self.enums.unwrap_or_else(|| noop.clone()),
            enum_values: self.enum_values.unwrap_or(noop),
            logical_types: self
                .logical_types
                .unwrap_or_else(|| Arc::new(DataTypeRegistry::logical())),
            go_types: self
                .go_types
                .unwrap_or_else(|| Arc::new(DataTypeRegistry::go())),
        }
    }
}
