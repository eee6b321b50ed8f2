//! Data type registries

mod go;
mod logical;
mod registry;

pub use go::{
    GO_DECIMAL, GO_DECIMAL_ID, GO_FLOAT64, GO_INT32, GO_INT32_ID, GO_INT64, GO_JSON, GO_STRING,
    GO_TIME, GO_UINT32, GO_UINT32_ID, GO_UINT64,
};
pub use logical::LogicalType;
pub use registry::{DataType, DataTypeGetter, DataTypeRegistry, NameResolver};
