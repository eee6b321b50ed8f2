//! Unit tests for DDL extraction
//!
//! These tests drive the parser through its public API, from raw DDL text
//! and from files on disk.

use std::io::Write;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::{NamedTempFile, TempDir};

use rust_metacenter::parser::{
    collect_ddl_files, extract_table, extract_table_from_file, extract_tables_from_files,
    parse_ddl, parse_table, read_ddl_file,
};
use rust_metacenter::types::{DataTypeRegistry, LogicalType};
use rust_metacenter::MetaCenterError;

/// Helper to create a temp SQL file with content
fn create_sql_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".sql").unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

// ============================================================================
// Table Extraction Tests
// ============================================================================

#[test]
fn test_extract_basic_table() {
    let ddl = "CREATE TABLE t (id int COMMENT 'pk-id', s char(60) COMMENT 'testcomment', \
               PRIMARY KEY(id)) COMMENT='tabletestcomment'";
    let table = parse_table(ddl, &DataTypeRegistry::logical()).unwrap();

    assert_eq!(table.name, "t");
    assert_eq!(table.display_name, "tabletestcomment");
    assert_eq!(table.fields().len(), 2);

    let id = table.field("id").unwrap();
    assert_eq!(id.display_name, "pk-id");
    assert_eq!(id.type_id, LogicalType::Int.id());
    assert!(id.is_primary_key);
    assert!(id.enumeration.is_none());

    let s = table.field("s").unwrap();
    assert_eq!(s.display_name, "testcomment");
    assert_eq!(s.type_id, LogicalType::String.id());
    assert!(!s.is_primary_key);
}

#[test]
fn test_extract_fixture_table() {
    let table =
        extract_table_from_file(&fixture("ddl/t_task.sql"), &DataTypeRegistry::logical()).unwrap();

    assert_eq!(table.name, "t_task");
    assert_eq!(table.display_name, "任务表");
    let names: Vec<_> = table.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["id", "status", "phase", "extra", "amount", "created_at"]
    );

    let id = table.field("id").unwrap();
    assert!(id.is_primary_key);
    assert!(id.is_auto_increment);
    assert_eq!(id.type_id, LogicalType::Int.id());
    assert_eq!(id.display_name, "主键");

    assert_eq!(
        table.field("amount").unwrap().type_id,
        LogicalType::Float64.id()
    );
    assert_eq!(
        table.field("created_at").unwrap().type_id,
        LogicalType::DateTime.id()
    );
}

#[test]
fn test_enum_synthesized_from_comment() {
    let table =
        extract_table_from_file(&fixture("ddl/t_task.sql"), &DataTypeRegistry::logical()).unwrap();

    let status = table.field("status").unwrap();
    assert_eq!(status.type_id, LogicalType::Enum.id());
    assert_eq!(status.display_name, "任务状态");

    let enumeration = status.enumeration.as_ref().unwrap();
    assert_eq!(enumeration.display_name, "任务状态");
    assert_eq!(enumeration.value_type_id, LogicalType::Int.id());
    let literals: Vec<_> = enumeration
        .values()
        .iter()
        .map(|v| v.literal.as_str())
        .collect();
    assert_eq!(literals, vec!["1", "2", "3", "4"]);
    assert_eq!(enumeration.value("2").unwrap().display_name, "处理中");
    assert_eq!(enumeration.values()[0].symbolic_name, "Status1");
}

#[test]
fn test_string_enum_from_colon_comment() {
    let table =
        extract_table_from_file(&fixture("ddl/t_task.sql"), &DataTypeRegistry::logical()).unwrap();

    let phase = table.field("phase").unwrap();
    let enumeration = phase.enumeration.as_ref().unwrap();
    assert_eq!(enumeration.value_type_id, LogicalType::String.id());
    let symbolic: Vec<_> = enumeration
        .values()
        .iter()
        .map(|v| v.symbolic_name.as_str())
        .collect();
    assert_eq!(symbolic, vec!["PhaseParseFile", "PhaseCollectData"]);
}

#[test]
fn test_json_comment_heuristic() {
    let table =
        extract_table_from_file(&fixture("ddl/t_task.sql"), &DataTypeRegistry::logical()).unwrap();
    let extra = table.field("extra").unwrap();
    assert_eq!(extra.type_id, LogicalType::Json.id());
    assert_eq!(extra.display_name, "Extra");
}

/// Known limitation: the JSON detection is a plain substring match, so a
/// comment that merely mentions the word flips a string column to JSON.
#[test]
fn test_json_heuristic_false_positive() {
    let ddl = "CREATE TABLE t (note varchar(64) COMMENT 'never store json here')";
    let table = parse_table(ddl, &DataTypeRegistry::logical()).unwrap();
    assert_eq!(table.field("note").unwrap().type_id, LogicalType::Json.id());
}

#[test]
fn test_json_heuristic_ignores_non_string_columns() {
    let ddl = "CREATE TABLE t (n int COMMENT 'json counter')";
    let table = parse_table(ddl, &DataTypeRegistry::logical()).unwrap();
    assert_eq!(table.field("n").unwrap().type_id, LogicalType::Int.id());
}

#[test]
fn test_display_name_defaults_to_column_name() {
    let ddl = "CREATE TABLE t (plain_col varchar(10))";
    let table = parse_table(ddl, &DataTypeRegistry::logical()).unwrap();
    assert_eq!(table.display_name, "");
    assert_eq!(table.field("plain_col").unwrap().display_name, "plain_col");
}

#[test]
fn test_inline_primary_key() {
    let ddl = "CREATE TABLE t (id bigint PRIMARY KEY, name varchar(10))";
    let table = parse_table(ddl, &DataTypeRegistry::logical()).unwrap();
    assert!(table.field("id").unwrap().is_primary_key);
    assert!(!table.field("name").unwrap().is_primary_key);
    assert_eq!(table.primary_key_fields().count(), 1);
}

#[test]
fn test_unsigned_integer_stays_int() {
    let ddl = "CREATE TABLE t (c int unsigned)";
    let table = parse_table(ddl, &DataTypeRegistry::logical()).unwrap();
    assert_eq!(table.field("c").unwrap().type_id, LogicalType::Int.id());
}

#[test]
fn test_non_create_statement_is_malformed() {
    let statement = parse_ddl("SELECT 1").unwrap();
    let err = extract_table(&statement, &DataTypeRegistry::logical()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MetaCenterError>(),
        Some(MetaCenterError::MalformedStatement { .. })
    ));
}

#[test]
fn test_only_first_statement_is_used() {
    let ddl = "CREATE TABLE first_t (a int); CREATE TABLE second_t (b int);";
    let table = parse_table(ddl, &DataTypeRegistry::logical()).unwrap();
    assert_eq!(table.name, "first_t");
}

// ============================================================================
// File Handling Tests
// ============================================================================

#[test]
fn test_read_strips_bom() {
    let mut content = "\u{FEFF}".as_bytes().to_vec();
    content.extend_from_slice(b"CREATE TABLE t (id int)");
    let file = create_sql_file(&content);
    assert_eq!(
        read_ddl_file(file.path()).unwrap(),
        "CREATE TABLE t (id int)"
    );
}

#[test]
fn test_read_falls_back_to_gb18030() {
    let text = "CREATE TABLE t (id int COMMENT '主键')";
    let (encoded, _, _) = encoding_rs::GB18030.encode(text);
    let file = create_sql_file(&encoded);

    assert_eq!(read_ddl_file(file.path()).unwrap(), text);
    let table = extract_table_from_file(file.path(), &DataTypeRegistry::logical()).unwrap();
    assert_eq!(table.field("id").unwrap().display_name, "主键");
}

#[test]
fn test_missing_file_error() {
    let err = read_ddl_file(&fixture("ddl/missing.sql")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MetaCenterError>(),
        Some(MetaCenterError::DdlFileRead { .. })
    ));
}

#[test]
fn test_collect_directory_and_glob() {
    let from_dir = collect_ddl_files(&[fixture("ddl")]).unwrap();
    let names: Vec<_> = from_dir
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["t_task.sql", "t_test.sql"]);

    let pattern = fixture("ddl").join("t_t*.sql");
    let from_glob = collect_ddl_files(&[pattern]).unwrap();
    assert_eq!(from_glob, from_dir);
}

#[test]
fn test_parallel_extraction_keeps_order() {
    let dir = TempDir::new().unwrap();
    let files: Vec<PathBuf> = (0..12)
        .map(|i| {
            let path = dir.path().join(format!("t{:02}.sql", i));
            std::fs::write(&path, format!("CREATE TABLE table_{} (id int)", i)).unwrap();
            path
        })
        .collect();

    let tables = extract_tables_from_files(&files, &DataTypeRegistry::logical()).unwrap();
    let names: Vec<_> = tables.iter().map(|t| t.name.clone()).collect();
    let expected: Vec<_> = (0..12).map(|i| format!("table_{}", i)).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_extraction_error_names_file() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.sql");
    let bad = dir.path().join("bad.sql");
    std::fs::write(&good, "CREATE TABLE ok (id int)").unwrap();
    std::fs::write(&bad, "CREATE VIEW v AS SELECT 1").unwrap();

    let err = extract_tables_from_files(&[good, bad.clone()], &DataTypeRegistry::logical())
        .unwrap_err();
    match err.downcast_ref::<MetaCenterError>() {
        Some(MetaCenterError::DdlFileInvalid { path, .. }) => assert_eq!(path, &bad),
        other => panic!("Expected DdlFileInvalid, got {:?}", other),
    }
}
