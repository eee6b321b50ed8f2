use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use rust_metacenter::parser::{collect_ddl_files, extract_tables_from_files, read_ddl_file};
use rust_metacenter::store::JsonStore;
use rust_metacenter::types::DataTypeGetter;
use rust_metacenter::{run_generate, GenerateOptions, MetaCenter, TableSource};

#[derive(Parser)]
#[command(name = "rust-metacenter")]
#[command(author, version, about = "Schema metadata extraction and Go code generation")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract tables from DDL files and print them as JSON
    Parse {
        /// DDL files, directories or glob patterns
        #[arg(required = true)]
        ddl: Vec<PathBuf>,
    },

    /// Generate Go artifacts for tables
    Generate {
        /// DDL files, directories or glob patterns
        #[arg(long, num_args = 1.., conflicts_with = "store", required_unless_present = "store")]
        ddl: Vec<PathBuf>,

        /// JSON metadata store snapshot
        #[arg(long)]
        store: Option<PathBuf>,

        /// Output directory (defaults to ./default)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Built-in artifact to render (const, model); repeatable
        #[arg(short, long)]
        artifact: Vec<String>,

        /// Extra artifact rendered from a template, as NAME=PATH
        #[arg(long, value_parser = parse_key_value::<PathBuf>)]
        template: Vec<(String, PathBuf)>,

        /// Value passed to templates as inject_params, as KEY=VALUE
        #[arg(long, value_parser = parse_key_value::<String>)]
        inject: Vec<(String, String)>,

        /// Command run on each generated file, e.g. "gofmt -w"
        #[arg(long)]
        formatter: Option<String>,

        /// Leave retired enum values out of generated constants
        #[arg(long)]
        skip_retired: bool,
    },

    /// Print the index template of a table
    EsTemplate {
        /// DDL file holding the table
        #[arg(long, conflicts_with = "store", required_unless_present = "store")]
        ddl: Option<PathBuf>,

        /// JSON metadata store snapshot
        #[arg(long, requires = "table")]
        store: Option<PathBuf>,

        /// Table name to look up in the store
        #[arg(long)]
        table: Option<String>,

        /// Pretty-print the JSON document
        #[arg(long)]
        pretty: bool,
    },

    /// Show how a SQL type token maps onto a Go type
    ResolveType {
        /// Type token, e.g. "bigint(20) unsigned"
        token: String,
    },
}

fn parse_key_value<V>(s: &str) -> Result<(String, V), String>
where
    V: From<String>,
{
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), V::from(value.to_string())))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Parse { ddl } => {
            let center = MetaCenter::builder().build();
            let files = collect_ddl_files(&ddl)?;
            let tables = extract_tables_from_files(&files, center.logical_types())?;
            println!("{}", serde_json::to_string_pretty(&tables)?);
        }
        Commands::Generate {
            ddl,
            store,
            output,
            artifact,
            template,
            inject,
            formatter,
            skip_retired,
        } => {
            let source = match store {
                Some(path) => TableSource::Store(path),
                None => TableSource::Ddl(ddl),
            };
            let options = GenerateOptions {
                source,
                output_dir: output.unwrap_or_default(),
                artifacts: artifact,
                templates: template,
                inject_params: inject.into_iter().collect::<BTreeMap<_, _>>(),
                formatter,
                skip_retired,
            };
            for path in run_generate(&options)? {
                println!("{}", path.display());
            }
        }
        Commands::EsTemplate {
            ddl,
            store,
            table,
            pretty,
        } => {
            let (center, table) = match (ddl, store) {
                (Some(path), _) => {
                    let center = MetaCenter::builder().build();
                    let table = center.parse_ddl(&read_ddl_file(&path)?)?;
                    (center, table)
                }
                (None, Some(path)) => {
                    let center = MetaCenter::builder()
                        .store(Arc::new(JsonStore::load(&path)?))
                        .build();
                    let name = table.unwrap_or_default();
                    let Some(table) = center.table_by_name(&name) else {
                        bail!("Table '{}' not found in store", name);
                    };
                    (center, table)
                }
                (None, None) => bail!("Either --ddl or --store is required"),
            };
            let template =
                rust_metacenter::search::synthesize_index_template(&table, center.logical_types());
            let json = if pretty {
                template.to_json_pretty()?
            } else {
                template.to_json()?
            };
            println!("{}", json);
        }
        Commands::ResolveType { token } => {
            let center = MetaCenter::builder().build();
            let resolved = center.go_types().get_by_name(&token);
            println!("{} -> {} (id {})", token.trim(), resolved.name, resolved.id);
        }
    }

    Ok(())
}
