//! MySQL DDL input handling
//!
//! Reads `CREATE TABLE` files, strips dialect fragments sqlparser does not
//! know about and hands the first statement of each file to the extractor.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::Result;
use encoding_rs::GB18030;
use rayon::prelude::*;
use regex::Regex;
use sqlparser::ast::Statement;
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;
use tracing::debug;

use super::extractor::extract_table;
use crate::error::MetaCenterError;
use crate::model::Table;
use crate::types::DataTypeGetter;

/// Sharding annotation appended by some MySQL-compatible distributions
static SHARDKEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"shardkey=.*").unwrap());

/// Minimum number of files to benefit from parallel processing.
/// Below this threshold, sequential processing is faster due to rayon overhead.
const PARALLEL_THRESHOLD: usize = 8;

/// Remove the `shardkey=...` table option (to end of line)
pub fn preprocess_ddl(ddl: &str) -> Cow<'_, str> {
    SHARDKEY_RE.replace_all(ddl, "")
}

/// Parse DDL text and return its first statement
pub fn parse_ddl(ddl: &str) -> Result<Statement> {
    let ddl = preprocess_ddl(ddl);
    let statements =
        Parser::parse_sql(&MySqlDialect {}, &ddl).map_err(|e| MetaCenterError::DdlParse {
            message: e.to_string(),
        })?;

    if statements.len() > 1 {
        debug!(
            count = statements.len(),
            "Multiple statements in DDL, using the first"
        );
    }

    statements.into_iter().next().ok_or_else(|| {
        MetaCenterError::MalformedStatement {
            reason: "no statement found".to_string(),
        }
        .into()
    })
}

/// Parse DDL text and extract its table
pub fn parse_table(ddl: &str, types: &dyn DataTypeGetter) -> Result<Table> {
    let statement = parse_ddl(ddl)?;
    extract_table(&statement, types)
}

/// Read a DDL file as UTF-8, falling back to GB18030 for legacy dumps
pub fn read_ddl_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| MetaCenterError::DdlFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let content = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(err) => {
            let bytes = err.into_bytes();
            let (decoded, _, had_errors) = GB18030.decode(&bytes);
            if had_errors {
                return Err(MetaCenterError::DdlFileRead {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "File contains invalid characters",
                    ),
                }
                .into());
            }
            decoded.into_owned()
        }
    };

    // Strip UTF-8 BOM if present
    Ok(content
        .strip_prefix('\u{FEFF}')
        .map(str::to_string)
        .unwrap_or(content))
}

/// Expand inputs into a list of `.sql` files.
///
/// Each input may be a file, a directory (searched recursively) or a glob
/// pattern. Directory and glob results are sorted for a stable order.
pub fn collect_ddl_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let input_str = input.to_string_lossy();
        if input_str.contains('*') || input_str.contains('?') {
            let paths = glob::glob(&input_str).map_err(|e| MetaCenterError::DdlFileRead {
                path: input.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()),
            })?;
            let mut matched: Vec<PathBuf> = paths
                .filter_map(|p| p.ok())
                .filter(|p| p.is_file())
                .collect();
            matched.sort();
            files.extend(matched);
        } else if input.is_dir() {
            let mut found: Vec<PathBuf> = walkdir::WalkDir::new(input)
                .into_iter()
                .filter_map(|e| e.ok())
                .map(|e| e.into_path())
                .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("sql")))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }

    debug!(count = files.len(), "Collected DDL files");
    Ok(files)
}

/// Extract the table defined by a single DDL file
pub fn extract_table_from_file(path: &Path, types: &dyn DataTypeGetter) -> Result<Table> {
    let content = read_ddl_file(path)?;
    let table = parse_table(&content, types).map_err(|e| MetaCenterError::DdlFileInvalid {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(
        path = %path.display(),
        table = %table.name,
        fields = table.fields().len(),
        "Extracted table"
    );
    Ok(table)
}

/// Extract one table per file, using parallel processing for larger file sets
pub fn extract_tables_from_files(
    files: &[PathBuf],
    types: &dyn DataTypeGetter,
) -> Result<Vec<Table>> {
    if files.len() >= PARALLEL_THRESHOLD {
        // Collecting into Result keeps file order and stops at the first error
        files
            .par_iter()
            .map(|file| extract_table_from_file(file, types))
            .collect()
    } else {
        files
            .iter()
            .map(|file| extract_table_from_file(file, types))
            .collect()
    }
}
