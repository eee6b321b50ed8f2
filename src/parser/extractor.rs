//! Convert a `CREATE TABLE` AST into a bare [`Table`] with inlined enums

use std::collections::HashSet;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use sqlparser::ast::{ColumnDef, ColumnOption, CreateTable, Statement, TableConstraint};
use sqlparser::tokenizer::Token;

use super::comment_parser::parse_comment;
use crate::error::MetaCenterError;
use crate::model::{Enum, EnumValue, Field, Table};
use crate::types::{DataTypeGetter, LogicalType};
use crate::util::{contains_ci, to_pascal_case};

/// Leading type word, e.g. `DECIMAL` in `DECIMAL(10,2)` or `INT` in `INT UNSIGNED`
static BASE_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*([A-Za-z]+)").unwrap());

/// Table `COMMENT` clause in a rendered statement, used when the AST does not carry it
static TABLE_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\)\s*COMMENT\s*=?\s*'((?:[^']|'')*)'").unwrap());

const INTEGER_TYPES: &[&str] = &[
    "tinyint",
    "smallint",
    "mediumint",
    "int",
    "integer",
    "bigint",
];
const DECIMAL_TYPES: &[&str] = &["decimal", "dec", "numeric", "float", "double", "real"];
const DATETIME_TYPES: &[&str] = &["datetime", "timestamp", "date", "time", "year"];

/// Map a rendered SQL column type onto its logical family.
///
/// Unsigned integers stay in the `int` family.
pub fn logical_type_for_sql(sql_type: &str) -> LogicalType {
    let Some(caps) = BASE_TYPE_RE.captures(sql_type) else {
        return LogicalType::String;
    };
    let base = caps[1].to_ascii_lowercase();
    let base = base.as_str();
    if INTEGER_TYPES.contains(&base) {
        LogicalType::Int
    } else if DECIMAL_TYPES.contains(&base) {
        LogicalType::Float64
    } else if DATETIME_TYPES.contains(&base) {
        LogicalType::DateTime
    } else {
        LogicalType::String
    }
}

/// Extract table metadata from a parsed statement
pub fn extract_table(statement: &Statement, types: &dyn DataTypeGetter) -> Result<Table> {
    let Statement::CreateTable(create) = statement else {
        return Err(MetaCenterError::MalformedStatement {
            reason: "not a CREATE TABLE statement".to_string(),
        }
        .into());
    };

    let name = create
        .name
        .0
        .last()
        .map(|ident| ident.value.clone())
        .unwrap_or_default();
    let display_name = table_comment(statement, create);

    let mut table = Table::new(0, name, display_name);
    let primary_keys = primary_key_columns(create);

    for column in &create.columns {
        let mut field = extract_field(column, types);
        if primary_keys.contains(column.name.value.as_str()) {
            field.is_primary_key = true;
        }
        table.push_field(field);
    }

    Ok(table)
}

fn table_comment(statement: &Statement, create: &CreateTable) -> String {
    if let Some(comment) = &create.comment {
        return comment.to_string();
    }
    let rendered = statement.to_string();
    TABLE_COMMENT_RE
        .captures(&rendered)
        .map(|caps| caps[1].replace("''", "'"))
        .unwrap_or_default()
}

/// Columns named by table-level or inline `PRIMARY KEY` definitions
fn primary_key_columns(create: &CreateTable) -> HashSet<&str> {
    let mut keys = HashSet::new();
    for constraint in &create.constraints {
        if let TableConstraint::PrimaryKey { columns, .. } = constraint {
            keys.extend(columns.iter().map(|c| c.value.as_str()));
        }
    }
    for column in &create.columns {
        let inline_pk = column.options.iter().any(|opt| {
            matches!(
                opt.option,
                ColumnOption::Unique {
                    is_primary: true,
                    ..
                }
            )
        });
        if inline_pk {
            keys.insert(column.name.value.as_str());
        }
    }
    keys
}

fn extract_field(column: &ColumnDef, types: &dyn DataTypeGetter) -> Field {
    let name = column.name.value.clone();
    let family = logical_type_for_sql(&column.data_type.to_string());
    let mut field = Field::new(name, types.get_by_name(family.name()).id);

    for option in &column.options {
        match &option.option {
            ColumnOption::Comment(comment) => apply_comment(&mut field, comment, types),
            ColumnOption::DialectSpecific(tokens) if is_auto_increment(tokens) => {
                field.is_auto_increment = true;
            }
            _ => {}
        }
    }

    if field.display_name.is_empty() {
        field.display_name = field.name.clone();
    }
    field
}

fn apply_comment(field: &mut Field, comment: &str, types: &dyn DataTypeGetter) {
    let parsed = parse_comment(comment);
    field.display_name = parsed.display_name.clone();

    if !parsed.has_enum() {
        // Any string column whose comment mentions "json" is treated as JSON
        let string_id = types.get_by_name(LogicalType::String.name()).id;
        if field.type_id == string_id && contains_ci(comment, "json") {
            field.type_id = types.get_by_name(LogicalType::Json.name()).id;
        }
        return;
    }

    let mut enumeration = Enum::new(0, parsed.display_name, field.type_id);
    let field_part = to_pascal_case(&field.name);
    for pair in parsed.enum_pairs {
        enumeration.push_value(EnumValue {
            enum_id: enumeration.id,
            symbolic_name: format!("{}{}", field_part, to_pascal_case(&pair.literal)),
            display_name: pair.description,
            literal: pair.literal,
            ..Default::default()
        });
    }
    field.type_id = types.get_by_name(LogicalType::Enum.name()).id;
    field.enumeration = Some(enumeration);
}

/// MySQL `AUTO_INCREMENT` arrives as a dialect-specific column option
fn is_auto_increment(tokens: &[Token]) -> bool {
    tokens
        .iter()
        .any(|t| matches!(t, Token::Word(w) if w.value.eq_ignore_ascii_case("AUTO_INCREMENT")))
}
