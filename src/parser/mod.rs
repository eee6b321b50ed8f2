//! MySQL DDL parsing and comment heuristics

mod comment_parser;
mod ddl_parser;
mod extractor;

pub use comment_parser::{
    parse_comment, DelimiterStrategy, EnumPair, ParsedComment, DELIMITER_STRATEGIES,
};
pub use ddl_parser::{
    collect_ddl_files, extract_table_from_file, extract_tables_from_files, parse_ddl, parse_table,
    preprocess_ddl, read_ddl_file,
};
pub use extractor::{extract_table, logical_type_for_sql};
