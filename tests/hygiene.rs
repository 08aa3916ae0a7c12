//! Hygiene: source-level budgets for the engine crate.
//!
//! Every production file under `src/` (sibling `*_test.rs` files excluded) is
//! scanned line by line. Budgets only go down; fix an existing hit before
//! adding a new one.

use std::fs;
use std::path::{Path, PathBuf};

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

/// The engine runs inside a browser frame loop: a panic kills the page and a
/// discarded error hides a broken canvas.
const BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, why: "panics" },
    Budget { pattern: ".expect(", max: 0, why: "panics" },
    Budget { pattern: "panic!(", max: 0, why: "panics" },
    Budget { pattern: "unreachable!(", max: 0, why: "panics" },
    Budget { pattern: "todo!(", max: 0, why: "panics" },
    Budget { pattern: "unimplemented!(", max: 0, why: "panics" },
    Budget { pattern: "let _ =", max: 0, why: "discards an error unseen" },
    Budget { pattern: ".ok()", max: 0, why: "discards an error unseen" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "hides unused code" },
];

struct SourceFile {
    path: PathBuf,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if !is_rs || is_test {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|f| (f.path.display().to_string(), f.content.lines().filter(|l| l.contains(pattern)).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

#[test]
fn scans_the_engine_sources() {
    let files = source_files();
    let names: Vec<String> = files.iter().map(|f| f.path.display().to_string()).collect();
    for expected in ["engine.rs", "transformer.rs", "pattern.rs"] {
        assert!(names.iter().any(|n| n.ends_with(expected)), "{expected} not scanned: {names:?}");
    }
    assert!(names.iter().all(|n| !n.ends_with("_test.rs")));
}

#[test]
fn budgets_hold() {
    let files = source_files();
    let mut report = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let detail: Vec<String> = found.iter().map(|(path, c)| format!("    {path}: {c}")).collect();
            report.push(format!(
                "{} ({}): found {count}, max {}\n{}",
                budget.pattern,
                budget.why,
                budget.max,
                detail.join("\n")
            ));
        }
    }
    assert!(report.is_empty(), "hygiene budgets exceeded:\n{}", report.join("\n"));
}
