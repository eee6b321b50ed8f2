//! Go host-language type registry
//!
//! Logical type ids map onto the Go type used in generated code, and a few
//! host-only variants (32-bit integers, decimals) get their own ids so a
//! metadata store can reference them directly.
//!
//! The name resolver is approximate. It maps physical SQL type tokens such as
//! `bigint(20) unsigned` or `decimal(10,2)` onto Go types by substring
//! convention, checked in this order:
//!
//! 1. `int` (then `big` selects 64-bit, `unsigned` selects unsigned)
//! 2. `float` or `double`
//! 3. `time`
//! 4. `decimal`
//! 5. anything else is a string
//!
//! It is a convention-matching heuristic, not a type-system contract:
//! `point` resolves to `int32` because it contains `int`, and `date` resolves
//! to `string` because it does not contain `time`.

use super::{DataType, DataTypeRegistry, LogicalType, NameResolver};
use crate::util::contains_ci;

pub const GO_INT32: &str = "int32";
pub const GO_INT64: &str = "int64";
pub const GO_UINT32: &str = "uint32";
pub const GO_UINT64: &str = "uint64";
pub const GO_FLOAT64: &str = "float64";
pub const GO_STRING: &str = "string";
pub const GO_TIME: &str = "time.Time";
pub const GO_JSON: &str = "json.RawMessage";
pub const GO_DECIMAL: &str = "decimal.Decimal";

/// Ids of the host-only variants, above the logical id range
pub const GO_INT32_ID: u32 = 8;
pub const GO_UINT32_ID: u32 = 9;
pub const GO_DECIMAL_ID: u32 = 10;

impl DataTypeRegistry {
    /// Go type names keyed by logical id, plus host-only variants.
    ///
    /// The logical enum id has no entry: an enum field is generated with the
    /// type of its values.
    pub fn go() -> Self {
        Self::new(
            [
                DataType::new(LogicalType::Int.id(), GO_INT64, "int64", true),
                DataType::new(LogicalType::UInt.id(), GO_UINT64, "uint64", true),
                DataType::new(LogicalType::String.id(), GO_STRING, "string", false),
                DataType::new(LogicalType::Float64.id(), GO_FLOAT64, "float64", true),
                DataType::new(LogicalType::DateTime.id(), GO_TIME, "time", false),
                DataType::new(LogicalType::Json.id(), GO_JSON, "json", false),
                DataType::new(GO_INT32_ID, GO_INT32, "int32", true),
                DataType::new(GO_UINT32_ID, GO_UINT32, "uint32", true),
                DataType::new(GO_DECIMAL_ID, GO_DECIMAL, "decimal", true),
            ],
            NameResolver::GoHeuristic,
        )
    }
}

/// Best-effort mapping of a physical type token to a Go registry id
pub(crate) fn resolve_go_type_id(token: &str) -> u32 {
    if contains_ci(token, "int") {
        let is_big = contains_ci(token, "big");
        let is_unsigned = contains_ci(token, "unsigned");
        return match (is_big, is_unsigned) {
            (true, true) => LogicalType::UInt.id(),
            (true, false) => LogicalType::Int.id(),
            (false, true) => GO_UINT32_ID,
            (false, false) => GO_INT32_ID,
        };
    }
    if contains_ci(token, "float") || contains_ci(token, "double") {
        return LogicalType::Float64.id();
    }
    if contains_ci(token, "time") {
        return LogicalType::DateTime.id();
    }
    if contains_ci(token, "decimal") {
        return GO_DECIMAL_ID;
    }
    LogicalType::String.id()
}
