//! Runs JSON case files against the propath API.
//!
//! Usage: `dev-test-runner [CASE_FILE...]` (defaults to every `*.json` under
//! `dev-test-runner/cases`).
use std::path::{Path, PathBuf};
use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use serde::Deserialize;
use serde_json::Value;

// ————————————————————————————————————————————————————————————————————————————
// CASE FORMAT
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    #[serde(default)]
    doc: Value,
    #[serde(flatten)]
    op: Op,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum Op {
    Get {
        path: String,
        #[serde(flatten)]
        expect: Expect,
    },
    Set {
        path: String,
        value: Value,
        #[serde(default)]
        vivify: propath::Vivify,
        #[serde(flatten)]
        expect: Expect,
    },
    Remove {
        paths: Vec<String>,
        #[serde(flatten)]
        expect: Expect,
    },
    Template {
        template: String,
        #[serde(flatten)]
        expect: Expect,
    },
    Parse {
        path: String,
        #[serde(flatten)]
        expect: Expect,
    },
}

/// Exactly one of these is expected to be set per case.
#[derive(Debug, Default, Deserialize)]
struct Expect {
    /// value read, document after a write, or rendered text
    #[serde(default)]
    expect: Option<Value>,
    /// the read must come back absent
    #[serde(default)]
    absent: bool,
    /// substring of the error message
    #[serde(default)]
    error: Option<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// EXECUTION
// ————————————————————————————————————————————————————————————————————————————

impl Case {
    fn run(self) -> Result<(), String> {
        let mut doc = self.doc;
        let (outcome, expect) = match self.op {
            Op::Get { path, expect } => {
                let got = propath::get(&doc, &path).map(|v| v.cloned());
                (got.map_err(|e| e.to_string()), expect)
            }
            Op::Set { path, value, vivify, expect } => {
                let got = propath::setter(&path)
                    .map_err(|e| e.to_string())
                    .and_then(|s| {
                        s.with_vivify(vivify)
                            .set(&mut doc, value)
                            .map(|root| Some(root.clone()))
                            .map_err(|e| e.to_string())
                    });
                (got, expect)
            }
            Op::Remove { paths, expect } => {
                let got = propath::multiremove(&mut doc, &paths)
                    .map(|_| Some(doc.clone()))
                    .map_err(|e| e.to_string());
                (got, expect)
            }
            Op::Template { template, expect } => {
                let got = propath::template(&template)
                    .map_err(|e| e.to_string())
                    .and_then(|t| t.render(&doc).map_err(|e| e.to_string()))
                    .map(|s| Some(Value::String(s)));
                (got, expect)
            }
            Op::Parse { path, expect } => {
                let got = propath::parse_field_names(&path)
                    .map(|names| {
                        let names = names
                            .into_iter()
                            .map(|name| match name {
                                propath::FieldName::Key(k) => Value::String(k),
                                propath::FieldName::Index(i) => Value::from(i),
                            })
                            .collect();
                        Some(Value::Array(names))
                    })
                    .map_err(|e| e.to_string());
                (got, expect)
            }
        };
        expect.check(outcome)
    }
}

impl Expect {
    fn check(&self, outcome: Result<Option<Value>, String>) -> Result<(), String> {
        match (outcome, &self.error) {
            (Err(message), Some(needle)) if message.contains(needle.as_str()) => Ok(()),
            (Err(message), _) => Err(format!("unexpected error: {message}")),
            (Ok(got), Some(needle)) => Err(format!("expected error containing {needle:?}, got {got:?}")),
            (Ok(None), None) if self.absent => Ok(()),
            (Ok(got), None) if self.absent => Err(format!("expected absent, got {got:?}")),
            (Ok(got), None) => {
                if got == self.expect {
                    Ok(())
                } else {
                    Err(format!("expected {:?}, got {got:?}", self.expect))
                }
            }
        }
    }
}

fn load_cases(path: &Path) -> Result<Vec<Case>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read case file {}", path.display()))?;
    let de = &mut serde_json::Deserializer::from_str(&source);
    serde_path_to_error::deserialize(de).map_err(|err| {
        let at = err.path().to_string();
        anyhow!("{} at JSON path {at} → {}", path.display(), err.into_inner())
    })
}

fn default_case_files() -> Result<Vec<PathBuf>> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("cases");
    let mut files = std::fs::read_dir(&dir)
        .with_context(|| format!("failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect::<Vec<_>>();
    files.sort();
    Ok(files)
}

fn main() -> Result<()> {
    let mut files = std::env::args().skip(1).map(PathBuf::from).collect::<Vec<_>>();
    if files.is_empty() {
        files = default_case_files()?;
    }

    let mut failed = 0usize;
    let mut passed = 0usize;
    for file in files {
        eprintln!("—— {} ——", file.display());
        for case in load_cases(&file)? {
            let name = case.name.clone();
            match case.run() {
                Ok(()) => {
                    passed += 1;
                    eprintln!("{} {name}", "✅".green());
                }
                Err(reason) => {
                    failed += 1;
                    eprintln!("{} {name}: {reason}", "❌".red());
                }
            }
        }
    }

    eprintln!("{passed} passed, {failed} failed");
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
