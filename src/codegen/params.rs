//! Template parameters derived from a table aggregate

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::Table;
use crate::types::{DataTypeGetter, GO_DECIMAL};
use crate::util::{package_ident, to_pascal_case};

/// Everything a generator needs to render one table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateParams {
    pub package_name: String,
    pub table: TemplateTable,
    pub fields: Vec<TemplateField>,
    /// Primary-key subset of `fields`, in field order
    pub pk_fields: Vec<TemplateField>,
    pub has_enum: bool,
    pub has_decimal: bool,
    /// Caller-supplied values passed through to templates untouched
    pub inject_params: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateTable {
    pub var_name: String,
    pub display_name: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateField {
    pub var_name: String,
    /// Host-language type; for enum fields, the type of the enum values
    pub type_name: String,
    pub name: String,
    pub display_name: String,
    pub is_enum: bool,
    pub is_numeric: bool,
    pub is_primary_key: bool,
    pub is_auto_increment: bool,
    pub enum_values: Vec<TemplateEnumValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateEnumValue {
    pub var_name: String,
    pub description: String,
    pub literal: String,
}

/// Knobs for parameter building
#[derive(Debug, Clone, Default)]
pub struct ParamOptions {
    /// Leave retired enum values out of the generated constants
    pub skip_retired: bool,
    pub inject_params: BTreeMap<String, String>,
}

/// Build template parameters for `table`, resolving types through `types`
pub fn build_template_params(
    table: &Table,
    types: &dyn DataTypeGetter,
    options: &ParamOptions,
) -> TemplateParams {
    let mut params = TemplateParams {
        package_name: package_ident(&table.name, table.id),
        table: TemplateTable {
            var_name: to_pascal_case(&table.name),
            display_name: table.display_name.clone(),
            name: table.name.clone(),
        },
        inject_params: options.inject_params.clone(),
        ..Default::default()
    };

    for field in table.fields() {
        let data_type = types.get_by_id(field.type_id);
        let mut tpl_field = TemplateField {
            var_name: to_pascal_case(&field.name),
            type_name: data_type.name.clone(),
            name: field.name.clone(),
            display_name: field.display_name.clone(),
            is_enum: false,
            is_numeric: data_type.is_numeric,
            is_primary_key: field.is_primary_key,
            is_auto_increment: field.is_auto_increment,
            enum_values: Vec::new(),
        };

        if let Some(enumeration) = &field.enumeration {
            let value_type = types.get_by_id(enumeration.value_type_id);
            params.has_enum = true;
            tpl_field.is_enum = true;
            tpl_field.type_name = value_type.name.clone();
            tpl_field.is_numeric = value_type.is_numeric;
            tpl_field.enum_values = enumeration
                .values()
                .iter()
                .filter(|v| !(options.skip_retired && v.is_retired()))
                .map(|v| TemplateEnumValue {
                    var_name: to_pascal_case(&v.symbolic_name),
                    description: v.display_name.clone(),
                    literal: v.literal.clone(),
                })
                .collect();
        }

        if tpl_field.type_name == GO_DECIMAL {
            params.has_decimal = true;
        }
        if tpl_field.is_primary_key {
            params.pk_fields.push(tpl_field.clone());
        }
        params.fields.push(tpl_field);
    }

    params
}
