//! Integration tests for the generation workflow

use pretty_assertions::assert_eq;

use rust_metacenter::TableSource;

use crate::common::TestContext;

// ============================================================================
// DDL Source Tests
// ============================================================================

#[test]
fn test_generate_from_ddl_directory() {
    let ctx = TestContext::with_fixtures();
    let options = ctx.options(TableSource::Ddl(vec![ctx.path("ddl")]));
    let files = ctx.generate_successfully(&options);

    let relative: Vec<_> = files
        .iter()
        .map(|p| {
            p.strip_prefix(ctx.output_dir())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    assert_eq!(
        relative,
        vec![
            "ttask0/t_task_const.go",
            "t0/t_const.go",
            "ttask0/t_task_model.go",
            "t0/t_model.go",
        ]
    );
}

#[test]
fn test_generated_model_from_ddl() {
    let ctx = TestContext::with_fixtures();
    let options = ctx.options(TableSource::Ddl(vec![ctx.path("ddl/t_task.sql")]));
    ctx.generate_successfully(&options);

    let model = ctx.read_output("ttask0/t_task_model.go");
    assert!(model.starts_with("package ttask0\n"));
    assert!(model.contains("import (\n\t\"encoding/json\"\n\t\"time\"\n)\n"));
    assert!(model.contains("\tExtra json.RawMessage `json:\"extra\"` // Extra\n"));
    assert!(model.contains("\tAmount float64 `json:\"amount\"` // 金额\n"));
    assert!(model.contains("\tStatus int64 `json:\"status\"` // 任务状态\n"));

    let constants = ctx.read_output("ttask0/t_task_const.go");
    assert!(constants.contains("\tTTaskTableName = \"t_task\"\n"));
    assert!(constants.contains("\tPhaseCollectData = \"collect_data\" // Collect\n"));
}

#[test]
fn test_generate_with_glob_input() {
    let ctx = TestContext::with_fixtures();
    let pattern = ctx.path("ddl").join("*_test.sql");
    let mut options = ctx.options(TableSource::Ddl(vec![pattern]));
    options.artifacts = vec!["const".to_string()];
    let files = ctx.generate_successfully(&options);

    assert_eq!(files.len(), 1);
    let constants = ctx.read_output("t0/t_const.go");
    assert!(constants.contains("\tTDisplayName = \"tabletestcomment\"\n"));
    assert!(constants.contains("\tTFieldS = \"s\" // testcomment\n"));
}

// ============================================================================
// Store Source Tests
// ============================================================================

#[test]
fn test_generate_from_store() {
    let ctx = TestContext::with_fixtures();
    let options = ctx.options(TableSource::Store(ctx.path("store.json")));
    let files = ctx.generate_successfully(&options);
    assert_eq!(files.len(), 4);

    let constants = ctx.read_output("ttask1/t_task_const.go");
    assert!(constants.contains("\tWait = 1 // 待执行\n"));
    assert!(constants.contains("\tLegacy = 9 // 已废弃\n"));
    assert!(constants.contains("\tParseFile = \"parse_file\" // 解析文件\n"));

    let empty = ctx.read_output("tempty2/t_empty_model.go");
    assert!(empty.contains("type TEmpty struct {\n}\n"));
}

#[test]
fn test_generate_skips_retired_values() {
    let ctx = TestContext::with_fixtures();
    let mut options = ctx.options(TableSource::Store(ctx.path("store.json")));
    options.artifacts = vec!["const".to_string()];
    options.skip_retired = true;
    ctx.generate_successfully(&options);

    let constants = ctx.read_output("ttask1/t_task_const.go");
    assert!(constants.contains("\tRunning = 2 // 执行中\n"));
    assert!(!constants.contains("Legacy"));
}

// ============================================================================
// Template Tests
// ============================================================================

#[test]
fn test_generate_from_user_template() {
    let ctx = TestContext::with_fixtures();
    let template = ctx.write(
        "templates/dao.tera",
        "package {{ package_name }}\n// by {{ inject_params.author }}\n\
         {% for f in pk_fields %}// pk {{ f.var_name }} {{ f.type_name }}\n{% endfor %}",
    );
    let mut options = ctx.options(TableSource::Store(ctx.path("store.json")));
    options.artifacts = vec![];
    options.templates = vec![("dao".to_string(), template)];
    options
        .inject_params
        .insert("author".to_string(), "metacenter".to_string());
    ctx.generate_successfully(&options);

    assert_eq!(
        ctx.read_output("ttask1/t_task_dao.go"),
        "package ttask1\n// by metacenter\n// pk Id int64\n"
    );
    assert_eq!(
        ctx.read_output("tempty2/t_empty_dao.go"),
        "package tempty2\n// by metacenter\n"
    );
}

#[test]
fn test_template_error_is_reported() {
    let ctx = TestContext::with_fixtures();
    let template = ctx.write("templates/bad.tera", "{% for x in %}");
    let mut options = ctx.options(TableSource::Store(ctx.path("store.json")));
    options.templates = vec![("bad".to_string(), template)];
    options.artifacts = vec![];

    let result = ctx.generate(&options);
    assert!(!result.success);
    assert!(
        result.errors[0].contains("artifact 'bad'"),
        "Unexpected error: {:?}",
        result.errors
    );
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn test_unknown_artifact_aborts_remaining() {
    let ctx = TestContext::with_fixtures();
    let mut options = ctx.options(TableSource::Store(ctx.path("store.json")));
    options.artifacts = vec!["const".to_string(), "bogus".to_string(), "model".to_string()];

    let result = ctx.generate(&options);
    assert!(!result.success);
    assert!(result.errors[0].contains("Unknown artifact 'bogus'"));

    // Artifacts written before the failure stay on disk
    assert!(ctx.output_dir().join("ttask1/t_task_const.go").exists());
    assert!(!ctx.output_dir().join("ttask1/t_task_model.go").exists());
}

#[test]
fn test_empty_artifact_name_rejected() {
    let ctx = TestContext::with_fixtures();
    let mut options = ctx.options(TableSource::Store(ctx.path("store.json")));
    options.artifacts = vec![String::new()];

    let result = ctx.generate(&options);
    assert!(!result.success);
    assert!(result.errors[0].contains("Invalid generate parameter"));
}

#[test]
fn test_missing_formatter_fails_after_write() {
    let ctx = TestContext::with_fixtures();
    let mut options = ctx.options(TableSource::Store(ctx.path("store.json")));
    options.artifacts = vec!["const".to_string()];
    options.formatter = Some("rust-metacenter-no-such-formatter -w".to_string());

    let result = ctx.generate(&options);
    assert!(!result.success);
    assert!(result.errors[0].contains("rust-metacenter-no-such-formatter"));
    assert!(ctx.output_dir().join("ttask1/t_task_const.go").exists());
}

#[cfg(unix)]
#[test]
fn test_formatter_runs_on_each_file() {
    let ctx = TestContext::with_fixtures();
    let mut options = ctx.options(TableSource::Store(ctx.path("store.json")));
    options.formatter = Some("true".to_string());
    let files = ctx.generate_successfully(&options);
    assert_eq!(files.len(), 4);
}

#[test]
fn test_missing_store_file() {
    let ctx = TestContext::new();
    let options = ctx.options(TableSource::Store(ctx.path("absent.json")));
    let result = ctx.generate(&options);
    assert!(!result.success);
    assert!(result.errors[0].contains("Failed to load metadata store"));
}
