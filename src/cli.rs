//! Minimal CLI: read JSON documents → get | set | remove | template | parse
use std::io::Read;
use std::path::PathBuf;
use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;

use crate::accessor::Vivify;
use crate::field::Container;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// read, write, and delete values in JSON documents by dot/bracket path (e.g. `a.b[2].c`)
#[derive(Parser, Debug)]
#[command(name = "propath", version)]
pub struct CommandLineInterface {
    /// more logging (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print the value at each path (one JSON array per document when several paths are given)
    Get(GetOut),
    /// assign `path=value` pairs and print the modified documents
    Set(SetOut),
    /// delete each path and print the modified documents
    Remove(RemoveOut),
    /// render a `{path}` template once per document
    Template(TemplateOut),
    /// print the field descriptors a path expression parses into
    Parse(ParseOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// input (repeatable). May be a literal path, a quoted glob pattern, or '-' for stdin
    #[arg(long, short, default_value = "-")]
    input: Vec<String>,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct GetOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// path expressions
    #[arg(required = true)]
    paths: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct SetOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// which existing intermediate values get replaced by fresh containers
    #[arg(long, value_enum, default_value_t = Vivify::Falsy)]
    vivify: Vivify,

    /// `path=value`; value is parsed as JSON, or taken as a string when it isn't JSON
    #[arg(required = true)]
    assignments: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct RemoveOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// path expressions
    #[arg(required = true)]
    paths: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct TemplateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// template text, e.g. "{name.first} the {name.last}"
    template: String,

    /// text rendered for absent values
    #[arg(long, default_value = crate::template::MISSING)]
    missing: String,
}

#[derive(clap::Parser, Debug)]
struct ParseOut {
    /// path expression
    path: String,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_process(&self, mut apply: impl FnMut(Value) -> Result<String>) -> Result<()> {
        let sources = resolve_file_path_patterns(&self.input)?;
        let mut rendered = Vec::new();
        for source in sources {
            let (label, text) = source.read()?;
            let documents = if self.ndjson {
                text.lines()
                    .filter(|line| !line.trim().is_empty())
                    .map(|line| parse_document(&label, line))
                    .collect::<Result<Vec<_>>>()?
            } else {
                vec![parse_document(&label, &text)?]
            };
            tracing::debug!(source = %label, documents = documents.len(), "loaded input");
            for document in documents {
                rendered.push(apply(document).with_context(|| format!("in {label}"))?);
            }
        }
        self.write(&rendered.join("\n"))
    }

    fn write(&self, output: &str) -> Result<()> {
        if let Some(out) = self.out.as_ref() {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(out, format!("{output}\n"))
                .with_context(|| format!("failed to write {}", out.display()))?;
            eprintln!("{} {}", "wrote".green(), out.display());
        } else {
            println!("{output}");
        }
        Ok(())
    }

    /// NDJSON keeps one document per line; otherwise pretty-print.
    fn encode(&self, value: &Value) -> Result<String> {
        let encoded = if self.ndjson {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(encoded)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Get(target) => {
                let getter = crate::multigetter(&target.paths)?;
                let settings = &target.input_settings;
                settings.load_process(|document| {
                    let values = getter.get(&document)?;
                    let shown = match values.as_slice() {
                        [single] => single.cloned().unwrap_or(Value::Null),
                        many => Value::Array(
                            many.iter().map(|v| v.cloned().unwrap_or(Value::Null)).collect(),
                        ),
                    };
                    settings.encode(&shown)
                })
            }
            Command::Set(target) => {
                let entries = target
                    .assignments
                    .iter()
                    .map(|raw| parse_assignment(raw))
                    .collect::<Result<Vec<_>>>()?;
                let setter = crate::multisetter(entries)?.with_vivify(target.vivify);
                let settings = &target.input_settings;
                settings.load_process(|mut document| {
                    setter.set(&mut document)?;
                    settings.encode(&document)
                })
            }
            Command::Remove(target) => {
                let remover = crate::multiremover(&target.paths)?;
                let settings = &target.input_settings;
                settings.load_process(|mut document| {
                    remover.remove(&mut document);
                    settings.encode(&document)
                })
            }
            Command::Template(target) => {
                let template =
                    crate::template(&target.template)?.with_missing(target.missing.clone());
                target
                    .input_settings
                    .load_process(|document| Ok(template.render(&document)?))
            }
            Command::Parse(target) => {
                let fields = crate::parse_field_types(&target.path)?;
                for field in fields {
                    let container = match field.container {
                        Some(Container::Object) => "object".cyan(),
                        Some(Container::Array) => "array".yellow(),
                        None => "-".dimmed(),
                    };
                    let name = match &field.name {
                        crate::FieldName::Key(k) => format!("{k:?}"),
                        crate::FieldName::Index(i) => i.to_string(),
                    };
                    println!("{name}\t{container}");
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    fn read(&self) -> Result<(String, String)> {
        match self {
            Source::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read stdin")?;
                Ok(("<stdin>".to_string(), text))
            }
            Source::File(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read source file {}", path.display()))?;
                Ok((path.to_string_lossy().to_string(), text))
            }
        }
    }
}

fn parse_document(label: &str, text: &str) -> Result<Value> {
    crate::path_de::from_str_with_path::<Value>(text)
        .map_err(|error| anyhow!("failed to parse JSON source ({label}): {error}"))
}

/// `path=value`, splitting on the first `=`.
fn parse_assignment(raw: &str) -> Result<(String, Value)> {
    let Some((path, value)) = raw.split_once('=') else {
        bail!("expected `path=value`, got `{raw}`");
    };
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((path.to_string(), value))
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<Source>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<Source>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if pattern == "-" {
            out.push(Source::Stdin);
        } else if has_glob_chars(pattern) {
            // Treat as a glob pattern
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                matched_any = true;
                out.push(Source::File(entry?));
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            // Treat as a literal path
            out.push(Source::File(PathBuf::from(pattern)));
        }
    }

    Ok(out)
}
