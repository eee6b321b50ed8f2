//! Assemble a table aggregate from separately stored records
//!
//! Aggregation appends to the table it is given. It is meant to run once per
//! freshly loaded table: aggregating the same table twice appends every
//! field a second time.

use tracing::debug;

use crate::store::{EnumStore, EnumValueStore, FieldStore, TableFieldStore};

use super::{Field, Table};

/// Resolves fields, enums and enum values for bare tables
pub struct MetadataAggregator<'a> {
    table_fields: &'a dyn TableFieldStore,
    fields: &'a dyn FieldStore,
    enums: &'a dyn EnumStore,
    enum_values: &'a dyn EnumValueStore,
}

impl<'a> MetadataAggregator<'a> {
    pub fn new(
        table_fields: &'a dyn TableFieldStore,
        fields: &'a dyn FieldStore,
        enums: &'a dyn EnumStore,
        enum_values: &'a dyn EnumValueStore,
    ) -> Self {
        Self {
            table_fields,
            fields,
            enums,
            enum_values,
        }
    }

    /// Resolve every field of `table`; an absent table stays absent
    pub fn aggregate(&self, table: Option<Table>) -> Option<Table> {
        let mut table = table?;
        self.aggregate_into(&mut table);
        Some(table)
    }

    /// Append the resolved fields of `table` in field-id order
    pub fn aggregate_into(&self, table: &mut Table) {
        let associations = self.table_fields.get_fields(table.id);
        for field_id in associations.keys() {
            let field = self.resolve_field(*field_id);
            table.push_field(field);
        }
        debug!(
            table = %table.name,
            fields = table.fields().len(),
            "Aggregated table"
        );
    }

    fn resolve_field(&self, field_id: i64) -> Field {
        let mut field = self.fields.get_by_id(field_id);
        if field.enum_id == 0 {
            return field;
        }
        if let Some(mut enumeration) = self.enums.get_by_id(field.enum_id) {
            for value in self.enum_values.find_by_enum_id(enumeration.id) {
                enumeration.push_value(value);
            }
            field.enumeration = Some(enumeration);
        }
        field
    }
}
