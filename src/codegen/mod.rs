//! Go source generation

mod generator;
mod go_writer;
mod params;

pub use generator::{
    generate_files, render_template, run_formatter, GenerateParam, ARTIFACT_CONST, ARTIFACT_MODEL,
    DEFAULT_OUTPUT_DIR,
};
pub use go_writer::{go_quote, model_imports, render_const, render_model};
pub use params::{
    build_template_params, ParamOptions, TemplateEnumValue, TemplateField, TemplateParams,
    TemplateTable,
};
