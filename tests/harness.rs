//! Golden-file test harness for condense.
//!
//! Discovers `.input.js` files under `tests/fixtures/`, runs the pipeline
//! (parse → expand → codegen), and compares output against the corresponding
//! `.expected.js` file. Both sides are normalized through the same
//! parse-and-reprint step so hand-written formatting in the expected files
//! never matters.
//!
//! Set `CN_UPDATE_FIXTURES=1` to overwrite expected files with actual output.

use std::path::{Path, PathBuf};

use anyhow::Result;
use cn_ast::{Diagnostics, MacroSet};
use cn_expand::expand_module;
use cn_parser::parse_source;
use swc_common::{comments::SingleThreadedComments, sync::Lrc, SourceMap};
use swc_ecma_codegen::{text_writer::JsWriter, Emitter, Node};

fn fixtures_dir() -> PathBuf {
    // CARGO_MANIFEST_DIR is crates/cn_test/, so go up two levels to workspace root.
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
}

fn collect_files(dir: &Path, suffix: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if !dir.exists() {
        return files;
    }
    for entry in walkdir(dir) {
        if entry
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(suffix))
        {
            files.push(entry);
        }
    }
    files.sort();
    files
}

fn walkdir(dir: &Path) -> Vec<PathBuf> {
    let mut result = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                result.extend(walkdir(&path));
            } else {
                result.push(path);
            }
        }
    }
    result
}

fn emit(
    module: &swc_ecma_ast::Module,
    source_map: Lrc<SourceMap>,
    comments: &SingleThreadedComments,
) -> Result<String> {
    let mut buf = Vec::new();
    {
        let writer = JsWriter::new(source_map.clone(), "\n", &mut buf, None);
        let mut emitter = Emitter {
            cfg: swc_ecma_codegen::Config::default()
                .with_target(swc_ecma_ast::EsVersion::latest()),
            cm: source_map,
            comments: Some(comments),
            wr: writer,
        };
        module.emit_with(&mut emitter)?;
    }
    Ok(String::from_utf8(buf)?)
}

fn run_pipeline(source: &str, filename: &str) -> Result<(String, Diagnostics)> {
    let mut parsed = parse_source(source, filename)?;
    let diagnostics = expand_module(&mut parsed.module, &parsed.comments, &MacroSet::default())?;
    let output = emit(&parsed.module, parsed.source_map, &parsed.comments)?;
    Ok((output, diagnostics))
}

/// Parse and reprint without expanding, so hand-written fixture formatting
/// compares equal to codegen output.
fn normalize(source: &str, filename: &str) -> Result<String> {
    let parsed = parse_source(source, filename)?;
    emit(&parsed.module, parsed.source_map, &parsed.comments)
}

#[test]
fn golden_file_tests() {
    let fixtures = fixtures_dir();
    let input_files = collect_files(&fixtures, ".input.js");

    assert!(
        !input_files.is_empty(),
        "No test fixtures found in {}",
        fixtures.display()
    );

    let update_mode = std::env::var("CN_UPDATE_FIXTURES").is_ok();
    let mut failures = Vec::new();

    for input_path in &input_files {
        let expected_path = input_path
            .to_str()
            .unwrap()
            .replace(".input.js", ".expected.js");
        let expected_path = PathBuf::from(&expected_path);

        let test_name = input_path
            .strip_prefix(&fixtures)
            .unwrap()
            .display()
            .to_string();

        let source = match std::fs::read_to_string(input_path) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{test_name}: failed to read input: {e}"));
                continue;
            }
        };

        let filename = input_path.display().to_string();
        let actual = match run_pipeline(&source, &filename) {
            Ok((s, _)) => s,
            Err(e) => {
                failures.push(format!("{test_name}: pipeline failed: {e}"));
                continue;
            }
        };

        if update_mode {
            if let Err(e) = std::fs::write(&expected_path, &actual) {
                failures.push(format!("{test_name}: failed to write expected: {e}"));
            }
            continue;
        }

        if !expected_path.exists() {
            failures.push(format!(
                "{test_name}: missing expected file: {}",
                expected_path.display()
            ));
            continue;
        }

        let expected = match std::fs::read_to_string(&expected_path) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{test_name}: failed to read expected: {e}"));
                continue;
            }
        };
        let expected = match normalize(&expected, &format!("{test_name}.expected")) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{test_name}: expected file failed to parse: {e}"));
                continue;
            }
        };
        if actual.trim() != expected.trim() {
            failures.push(format!(
                "{test_name}: output mismatch\n--- expected ---\n{}\n--- actual ---\n{}",
                expected.trim(),
                actual.trim()
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} golden test(s) failed:\n\n{}",
            failures.len(),
            failures.join("\n\n")
        );
    }
}

/// Files without directives must come through byte-identical to a plain
/// reprint, with an empty diagnostic stream.
#[test]
fn identity_tests() {
    let fixtures = fixtures_dir().join("identity");
    let input_files = collect_files(&fixtures, ".js");

    assert!(
        !input_files.is_empty(),
        "No identity fixtures found in {}",
        fixtures.display()
    );

    let mut failures = Vec::new();

    for input_path in &input_files {
        let test_name = input_path
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();

        let source = match std::fs::read_to_string(input_path) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{test_name}: failed to read: {e}"));
                continue;
            }
        };

        let filename = input_path.display().to_string();
        let (output, diagnostics) = match run_pipeline(&source, &filename) {
            Ok(r) => r,
            Err(e) => {
                failures.push(format!("{test_name}: pipeline failed: {e}"));
                continue;
            }
        };
        let reprint = match normalize(&source, &filename) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{test_name}: reprint failed: {e}"));
                continue;
            }
        };

        if !diagnostics.is_empty() {
            failures.push(format!(
                "{test_name}: expected no diagnostics, got {}",
                diagnostics.len()
            ));
        }
        if output != reprint {
            failures.push(format!(
                "{test_name}: expansion changed a directive-free file\n--- reprint ---\n{}\n--- output ---\n{}",
                reprint.trim(),
                output.trim()
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} identity test(s) failed:\n\n{}",
            failures.len(),
            failures.join("\n\n")
        );
    }
}
