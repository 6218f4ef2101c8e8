#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use satysfi_token_gen::{Config, Generator};

pub const FIXTURE: &str = include_str!("../fixtures/grammar.js");

/// Writes `grammar.js` into a temp dir so the generator can read it.
pub fn grammar_dir(grammar_content: &str) -> tempfile::TempDir {
    let temp_dir = tempfile::tempdir().expect("Could not create temp dir");
    fs::write(temp_dir.path().join("grammar.js"), grammar_content).expect("Failed to write grammar file");
    temp_dir
}

pub struct TestEnv {
    _temp_dir: tempfile::TempDir,
    project_path: PathBuf,
    binary_path: PathBuf,
}

impl TestEnv {
    /// Generates the enum from `grammar_content` and compiles it together with `main_body`.
    pub fn new(config: Config, grammar_content: &str, main_body: &str) -> Self {
        let temp_dir = tempfile::tempdir().expect("Could not create temp dir");
        let project_path = temp_dir.path().to_path_buf();

        // 1. Setup Cargo Project Structure
        setup_cargo_project(&project_path);

        // 2. Generate the enum
        fs::write(project_path.join("grammar.js"), grammar_content).expect("Failed to write grammar file");
        let generator = Generator::new(&project_path, config);
        let rust_code = generator
            .generate_source("grammar.js", false)
            .expect("Code generation failed");

        // 3. Main wrapper around the generated items
        let main_rs = format!(
            r#"
            mod token {{
                {}
            }}
            #[allow(unused_imports)]
            use token::*;

            fn main() {{
                {}
            }}
        "#,
            rust_code, main_body
        );
        fs::write(project_path.join("src/main.rs"), main_rs).expect("Failed to write main.rs");

        // 4. Compile
        let output = Command::new("cargo")
            .arg("build")
            .arg("--quiet")
            .current_dir(&project_path)
            .output()
            .expect("Failed to execute cargo build");
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("Compilation failed:\n{}", stderr);
        }

        let binary_path = project_path.join("target/debug/token_check");
        Self { _temp_dir: temp_dir, project_path, binary_path }
    }

    /// Runs the compiled program and returns (Stdout, Success)
    pub fn run(&self) -> (String, bool) {
        let output = Command::new(&self.binary_path)
            .output()
            .expect("Failed to run compiled program");
        (
            String::from_utf8_lossy(&output.stdout).to_string(),
            output.status.success(),
        )
    }
}

fn setup_cargo_project(path: &Path) {
    let src_dir = path.join("src");
    fs::create_dir_all(&src_dir).unwrap();

    let cargo_toml = r#"
[package]
name = "token_check"
version = "0.0.1"
edition = "2021"

[workspace]

[dependencies]
"#;

    fs::write(path.join("Cargo.toml"), cargo_toml).unwrap();
}
