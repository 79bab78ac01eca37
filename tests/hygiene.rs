//! Source hygiene budgets for the production tree.
//!
//! Every pattern below is counted across `src/` (unit-test files excluded)
//! and compared against its budget. Budgets only go down.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

// Panics.
const UNWRAP: Budget = Budget { pattern: ".unwrap()", max: 0, why: "propagate with `?` instead" };
const EXPECT: Budget = Budget { pattern: ".expect(", max: 0, why: "propagate with `?` instead" };
const PANIC: Budget = Budget { pattern: "panic!(", max: 0, why: "return an error" };
const UNREACHABLE: Budget = Budget { pattern: "unreachable!(", max: 0, why: "make the state unrepresentable" };
const TODO: Budget = Budget { pattern: "todo!(", max: 0, why: "finish the stub" };
const UNIMPLEMENTED: Budget = Budget { pattern: "unimplemented!(", max: 0, why: "finish the stub" };

// Silent loss.
const SILENT_DISCARD: Budget = Budget { pattern: "let _ =", max: 0, why: "handle or log the result" };
const DOT_OK: Budget = Budget { pattern: ".ok()", max: 0, why: "handle or log the error" };

// Structure.
const ALLOW_DEAD_CODE: Budget = Budget { pattern: "#[allow(dead_code)]", max: 0, why: "delete the dead code" };

struct SourceFile {
    path: String,
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
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if path.extension().is_none_or(|e| e != "rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn check(budget: &Budget) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the crate root");

    let hits: Vec<(&str, usize)> = files
        .iter()
        .map(|f| (f.path.as_str(), f.content.lines().filter(|l| l.contains(budget.pattern)).count()))
        .filter(|(_, n)| *n > 0)
        .collect();
    let count: usize = hits.iter().map(|(_, n)| n).sum();
    let listing = hits
        .iter()
        .map(|(path, n)| format!("  {path}: {n}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(
        count <= budget.max,
        "`{}` budget exceeded: found {count}, max {} ({}).\n{listing}",
        budget.pattern,
        budget.max,
        budget.why,
    );
}

#[test]
fn unwrap_budget() {
    check(&UNWRAP);
}

#[test]
fn expect_budget() {
    check(&EXPECT);
}

#[test]
fn panic_budget() {
    check(&PANIC);
}

#[test]
fn unreachable_budget() {
    check(&UNREACHABLE);
}

#[test]
fn todo_budget() {
    check(&TODO);
}

#[test]
fn unimplemented_budget() {
    check(&UNIMPLEMENTED);
}

#[test]
fn silent_discard_budget() {
    check(&SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    check(&DOT_OK);
}

#[test]
fn allow_dead_code_budget() {
    check(&ALLOW_DEAD_CODE);
}
