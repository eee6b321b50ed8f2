//! Canonical logical types

use super::{DataType, DataTypeRegistry, NameResolver};

/// Abstract scalar kinds, independent of any host language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Int,
    UInt,
    String,
    Float64,
    DateTime,
    Enum,
    Json,
}

impl LogicalType {
    pub const ALL: [LogicalType; 7] = [
        LogicalType::Int,
        LogicalType::UInt,
        LogicalType::String,
        LogicalType::Float64,
        LogicalType::DateTime,
        LogicalType::Enum,
        LogicalType::Json,
    ];

    /// Stable registry id
    pub fn id(self) -> u32 {
        match self {
            LogicalType::Int => 1,
            LogicalType::UInt => 2,
            LogicalType::String => 3,
            LogicalType::Float64 => 4,
            LogicalType::DateTime => 5,
            LogicalType::Enum => 6,
            LogicalType::Json => 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LogicalType::Int => "int",
            LogicalType::UInt => "uint",
            LogicalType::String => "string",
            LogicalType::Float64 => "float64",
            LogicalType::DateTime => "datetime",
            LogicalType::Enum => "enum",
            LogicalType::Json => "json",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LogicalType::Int => "Integer",
            LogicalType::UInt => "Unsigned integer",
            LogicalType::String => "String",
            LogicalType::Float64 => "Float",
            LogicalType::DateTime => "Datetime",
            LogicalType::Enum => "Enum",
            LogicalType::Json => "JSON",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            LogicalType::Int | LogicalType::UInt | LogicalType::Float64
        )
    }

    /// Match a registry type name back to a logical type
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    pub fn data_type(self) -> DataType {
        DataType::new(self.id(), self.name(), self.display_name(), self.is_numeric())
    }
}

impl DataTypeRegistry {
    /// The seven canonical logical types, resolved by exact name only
    pub fn logical() -> Self {
        Self::new(
            LogicalType::ALL.into_iter().map(LogicalType::data_type),
            NameResolver::Exact,
        )
    }
}
