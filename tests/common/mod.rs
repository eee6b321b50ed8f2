//! Common test utilities for rust-metacenter tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use rust_metacenter::{run_generate, GenerateOptions, TableSource};

/// Test context with temporary directory for isolated test execution
pub struct TestContext {
    /// Kept to prevent temp directory cleanup until TestContext is dropped
    _temp_dir: TempDir,
    pub work_dir: PathBuf,
}

impl TestContext {
    /// Create an empty context
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let work_dir = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            work_dir,
        }
    }

    /// Create a context holding a copy of the fixtures directory
    pub fn with_fixtures() -> Self {
        let ctx = Self::new();
        copy_dir_recursive(&fixtures_dir(), &ctx.work_dir).expect("Failed to copy fixtures");
        ctx
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.work_dir.join(relative)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.work_dir.join("out")
    }

    /// Write a file relative to the work directory
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Options generating both built-ins into the context's output directory
    pub fn options(&self, source: TableSource) -> GenerateOptions {
        GenerateOptions {
            source,
            output_dir: self.output_dir(),
            artifacts: Vec::new(),
            templates: Vec::new(),
            inject_params: BTreeMap::new(),
            formatter: None,
            skip_retired: false,
        }
    }

    pub fn generate(&self, options: &GenerateOptions) -> GenerateResult {
        match run_generate(options) {
            Ok(files) => GenerateResult {
                success: true,
                files,
                errors: vec![],
            },
            Err(e) => GenerateResult {
                success: false,
                files: vec![],
                errors: vec![format!("{:#}", e)],
            },
        }
    }

    /// Generate and return the written files, panicking if generation fails
    pub fn generate_successfully(&self, options: &GenerateOptions) -> Vec<PathBuf> {
        let result = self.generate(options);
        assert!(result.success, "Generation failed: {:?}", result.errors);
        result.files
    }

    pub fn read_output(&self, relative: &str) -> String {
        let path = self.output_dir().join(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }
}

/// Result of a generation run
#[derive(Debug)]
pub struct GenerateResult {
    pub success: bool,
    pub files: Vec<PathBuf>,
    pub errors: Vec<String>,
}

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Recursively copy a directory
fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    if !dst.exists() {
        fs::create_dir_all(dst)?;
    }

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }

    Ok(())
}
