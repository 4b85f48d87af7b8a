//! Vocabulary guardrail.
//!
//! Keywords and operators are recognised through the `rill_core::lang` registries (`keywords::from_str`,
//! `operators::from_str`, `Application::operator`). This test fails when front-end code compares against a reserved
//! spelling directly, e.g. `name == "otherwise"` or a `"and" =>` match arm.
//!
//! The registry sources define the spellings, and test code may quote them; both are exempt. Comment lines are
//! skipped.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use rill_core::lang::{keywords, operators};

/// A source line that spells a reserved word where a registry lookup belongs.
struct Hit {
    file: PathBuf,
    line: usize,
    text: String,
}

#[test]
fn front_end_sources_use_the_registries() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let reserved = reserved_spellings();

    let mut files = Vec::new();
    for dir in ["src", "crates"] {
        collect_rust_files(&root.join(dir), &mut files);
    }

    let hits: Vec<Hit> = files
        .iter()
        .filter(|file| !is_exempt(root, file))
        .flat_map(|file| hits_in(file, &reserved))
        .collect();

    let report: Vec<String> = hits
        .iter()
        .map(|hit| {
            let file = hit.file.strip_prefix(root).unwrap_or(&hit.file);
            format!("{}:{}: {}", file.display(), hit.line, hit.text.trim())
        })
        .collect();
    assert!(
        report.is_empty(),
        "reserved spellings compared as strings; look them up in rill_core::lang instead:\n{}",
        report.join("\n")
    );
}

#[test]
fn string_comparisons_and_arms_are_caught() {
    let reserved = reserved_spellings();
    assert!(compares_reserved(r#"if name == "otherwise" {"#, &reserved));
    assert!(compares_reserved(r#"    "and" => Some(OperatorId::And),"#, &reserved));
    assert!(!compares_reserved(r#"    // "and" => is how this used to look"#, &reserved));
    assert!(!compares_reserved(r#"let label = "filter";"#, &reserved));
    assert!(!compares_reserved(r#"if name == "filter" {"#, &reserved));
}

/// Every keyword and operator spelling.
fn reserved_spellings() -> BTreeSet<&'static str> {
    let keyword_spellings = keywords::KEYWORDS.iter().map(|k| k.canonical);
    let operator_spellings = operators::OPERATORS.iter().map(|o| o.canonical);
    keyword_spellings.chain(operator_spellings).collect()
}

fn collect_rust_files(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            collect_rust_files(&path, files);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
}

fn is_exempt(root: &Path, file: &Path) -> bool {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let registry = Path::new("crates/rill_core/src/lang");
    relative.starts_with(registry)
        || relative.components().any(|c| c.as_os_str() == "tests")
        || relative.file_name().is_some_and(|name| name == "tests.rs")
}

fn hits_in(file: &Path, reserved: &BTreeSet<&'static str>) -> Vec<Hit> {
    let Ok(source) = fs::read_to_string(file) else {
        return Vec::new();
    };
    source
        .lines()
        .enumerate()
        .filter(|(_, text)| compares_reserved(text, reserved))
        .map(|(idx, text)| Hit {
            file: file.to_path_buf(),
            line: idx + 1,
            text: text.to_string(),
        })
        .collect()
}

fn compares_reserved(text: &str, reserved: &BTreeSet<&'static str>) -> bool {
    if text.trim_start().starts_with("//") {
        return false;
    }
    reserved.iter().any(|word| {
        let quoted = format!("\"{word}\"");
        text.contains(&format!("== {quoted}")) || text.contains(&format!("{quoted} =>"))
    })
}
