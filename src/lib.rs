//! rust-metacenter: schema metadata extraction and Go code generation
//!
//! Reads table metadata from MySQL `CREATE TABLE` statements or from a
//! metadata store, and turns it into Go constants, Go models and
//! Elasticsearch index templates.

pub mod center;
pub mod codegen;
pub mod error;
pub mod model;
pub mod parser;
pub mod search;
pub mod store;
pub mod types;
mod util;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

pub use center::{MetaCenter, MetaCenterBuilder};
pub use error::MetaCenterError;

use codegen::{GenerateParam, ParamOptions, ARTIFACT_CONST, ARTIFACT_MODEL};
use store::JsonStore;

/// Where table metadata comes from
#[derive(Debug, Clone)]
pub enum TableSource {
    /// DDL files, directories or glob patterns
    Ddl(Vec<PathBuf>),
    /// JSON store snapshot; every table in it is generated
    Store(PathBuf),
}

/// Options for a generation run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub source: TableSource,
    pub output_dir: PathBuf,
    /// Built-in artifacts to render (`const`, `model`)
    pub artifacts: Vec<String>,
    /// Extra artifacts rendered from tera templates, as (name, path)
    pub templates: Vec<(String, PathBuf)>,
    pub inject_params: BTreeMap<String, String>,
    /// Command run on every written file, e.g. `gofmt -w`
    pub formatter: Option<String>,
    pub skip_retired: bool,
}

impl GenerateOptions {
    /// One generate parameter per requested artifact.
    ///
    /// With neither artifacts nor templates given, both built-ins are rendered.
    pub fn generate_params(&self) -> Vec<GenerateParam> {
        let mut names = self.artifacts.clone();
        if names.is_empty() && self.templates.is_empty() {
            names = vec![ARTIFACT_CONST.to_string(), ARTIFACT_MODEL.to_string()];
        }

        let built_in = names.into_iter().map(|name| (name, None));
        let templated = self
            .templates
            .iter()
            .map(|(name, path)| (name.clone(), Some(path.clone())));

        built_in
            .chain(templated)
            .map(|(name, template)| GenerateParam {
                name,
                template,
                output_dir: self.output_dir.clone(),
                inject_params: self.inject_params.clone(),
                formatter: self.formatter.clone(),
            })
            .collect()
    }
}

/// Load tables from the configured source and generate every artifact
pub fn run_generate(options: &GenerateOptions) -> Result<Vec<PathBuf>> {
    let (center, tables) = match &options.source {
        TableSource::Ddl(inputs) => {
            let center = MetaCenter::builder().build();
            let files = parser::collect_ddl_files(inputs)?;
            info!(files = files.len(), "Parsing DDL files");
            let tables = parser::extract_tables_from_files(&files, center.logical_types())?;
            (center, tables)
        }
        TableSource::Store(path) => {
            let store = Arc::new(JsonStore::load(path)?);
            let center = MetaCenter::builder().store(store).build();
            let tables = center.all_tables();
            (center, tables)
        }
    };
    info!(tables = tables.len(), "Loaded tables");

    let param_options = ParamOptions {
        skip_retired: options.skip_retired,
        ..Default::default()
    };
    let written = center.generate_files(&tables, &options.generate_params(), &param_options)?;
    info!(files = written.len(), "Generation complete");
    Ok(written)
}
