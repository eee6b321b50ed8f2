//! Built-in Go artifacts rendered with plain string builders

use super::params::{TemplateField, TemplateParams};

const IMPORT_TIME: &str = "time";
const IMPORT_JSON: &str = "encoding/json";
const IMPORT_DECIMAL: &str = "github.com/shopspring/decimal";

/// Quote a string as a Go interpreted string literal
pub fn go_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Enum literal as it appears on the right of a constant
fn enum_literal(field: &TemplateField, literal: &str) -> String {
    if field.is_numeric && is_numeric_literal(literal) {
        literal.to_string()
    } else {
        go_quote(literal)
    }
}

/// Decimal integer or fraction; rejects `inf`, `nan` and exponents
fn is_numeric_literal(literal: &str) -> bool {
    let digits = literal.strip_prefix('-').unwrap_or(literal);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.map_or(true, all_digits)
}

/// Single-line trailing comment, empty when there is nothing to say
fn line_comment(text: &str) -> String {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        String::new()
    } else {
        format!(" // {}", text)
    }
}

fn go_type(field: &TemplateField) -> &str {
    if field.type_name.is_empty() {
        "any"
    } else {
        &field.type_name
    }
}

/// Import paths needed by the model struct, standard library first
pub fn model_imports(params: &TemplateParams) -> Vec<&'static str> {
    let uses = |prefix: &str| params.fields.iter().any(|f| f.type_name.starts_with(prefix));
    let mut imports = Vec::new();
    if uses("json.") {
        imports.push(IMPORT_JSON);
    }
    if uses("time.") {
        imports.push(IMPORT_TIME);
    }
    if uses("decimal.") {
        imports.push(IMPORT_DECIMAL);
    }
    imports
}

/// Table name, field names and enum members as constants
pub fn render_const(params: &TemplateParams) -> String {
    let table = &params.table;
    let mut out = format!("package {}\n\n", params.package_name);

    out.push_str(&format!("// {} {}\n", table.var_name, table.display_name));
    out.push_str("const (\n");
    out.push_str(&format!(
        "\t{}TableName = {}\n",
        table.var_name,
        go_quote(&table.name)
    ));
    out.push_str(&format!(
        "\t{}DisplayName = {}\n",
        table.var_name,
        go_quote(&table.display_name)
    ));
    out.push_str(")\n");

    if !params.fields.is_empty() {
        out.push_str(&format!("\n// Field names of {}\n", table.name));
        out.push_str("const (\n");
        for field in &params.fields {
            out.push_str(&format!(
                "\t{}Field{} = {}{}\n",
                table.var_name,
                field.var_name,
                go_quote(&field.name),
                line_comment(&field.display_name)
            ));
        }
        out.push_str(")\n");
    }

    for field in params.fields.iter().filter(|f| f.is_enum) {
        if field.enum_values.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "\n// {} {}\n",
            field.var_name,
            field.display_name.trim()
        ));
        out.push_str("const (\n");
        for value in &field.enum_values {
            out.push_str(&format!(
                "\t{} = {}{}\n",
                value.var_name,
                enum_literal(field, &value.literal),
                line_comment(&value.description)
            ));
        }
        out.push_str(")\n");
    }

    out
}

/// Row struct with JSON tags and a `TableName` method
pub fn render_model(params: &TemplateParams) -> String {
    let table = &params.table;
    let mut out = format!("package {}\n", params.package_name);

    let imports = model_imports(params);
    if !imports.is_empty() {
        out.push_str("\nimport (\n");
        let mut third_party = false;
        for import in imports {
            if import.contains('.') && !third_party {
                out.push('\n');
                third_party = true;
            }
            out.push_str(&format!("\t{}\n", go_quote(import)));
        }
        out.push_str(")\n");
    }

    out.push_str(&format!(
        "\n// {} {}\n",
        table.var_name,
        table.display_name.trim()
    ));
    out.push_str(&format!("type {} struct {{\n", table.var_name));
    for field in &params.fields {
        out.push_str(&format!(
            "\t{} {} `json:\"{}\"`{}\n",
            field.var_name,
            go_type(field),
            field.name,
            line_comment(&field.display_name)
        ));
    }
    out.push_str("}\n");

    out.push_str(&format!(
        "\n// TableName returns the name of the backing table\nfunc ({}) TableName() string {{\n\treturn {}\n}}\n",
        table.var_name,
        go_quote(&table.name)
    ));

    out
}
