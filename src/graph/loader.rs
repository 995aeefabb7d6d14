//! Bulk loading of location files.
//!
//! Each non-blank line declares one source and its outgoing edges:
//! `SOURCE:DEST1(weight1),DEST2(weight2),...`. Names may not contain
//! `:`, `,`, `(` or `)`; surrounding whitespace is ignored.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use super::{Graph, Weight};
use crate::{PathfinderError, Result};

/// What to do with a line that does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Log it, record it in the report and keep loading.
    #[default]
    Skip,
    /// Fail the whole load; the graph is left untouched.
    Abort,
}

/// A line left out of a load under [`MalformedLinePolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    pub reason: String,
}

/// Summary of one load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub lines_read: usize,
    pub sources_declared: usize,
    pub edges_added: usize,
    pub skipped: Vec<SkippedLine>,
}

/// One parsed line: a source and its edges in declaration order.
#[derive(Debug, PartialEq, Eq)]
struct Declaration {
    source: String,
    edges: Vec<(String, Weight)>,
}

fn edge_regex() -> &'static Regex {
    static EDGE: OnceLock<Regex> = OnceLock::new();
    EDGE.get_or_init(|| {
        Regex::new(r"^\s*([^:,()]*?)\s*\(\s*(\d+)\s*\)\s*$").expect("Invalid regex pattern")
    })
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains([':', ',', '(', ')'])
}

/// Parse one line. `Ok(None)` for blank lines, `Err(reason)` when malformed.
fn parse_line(line: &str) -> std::result::Result<Option<Declaration>, String> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let (source, rest) = line
        .split_once(':')
        .ok_or_else(|| "missing ':' after source name".to_string())?;
    let source = source.trim();
    if !is_valid_name(source) {
        return Err(format!("invalid source name '{}'", source));
    }

    let rest = rest.trim();
    let mut edges = Vec::new();
    if !rest.is_empty() {
        for item in rest.split(',') {
            let cap = edge_regex()
                .captures(item)
                .ok_or_else(|| format!("expected DEST(weight), found '{}'", item.trim()))?;
            let dest = &cap[1];
            if dest.is_empty() {
                return Err(format!("missing destination name in '{}'", item.trim()));
            }
            let weight: Weight = cap[2]
                .parse()
                .map_err(|_| format!("weight out of range in '{}'", item.trim()))?;
            edges.push((dest.to_string(), weight));
        }
    }

    Ok(Some(Declaration {
        source: source.to_string(),
        edges,
    }))
}

impl Graph {
    /// Load declarations from text, one source per line.
    ///
    /// Sources are (re-)added in line order, which clears any edges they
    /// had before; vertices not mentioned are left alone.
    pub fn load_from_str(&mut self, input: &str, policy: MalformedLinePolicy) -> Result<LoadReport> {
        let mut report = LoadReport::default();
        let mut declarations = Vec::new();

        for (index, line) in input.lines().enumerate() {
            report.lines_read += 1;
            let line_no = index + 1;
            match parse_line(line) {
                Ok(Some(declaration)) => declarations.push(declaration),
                Ok(None) => {}
                Err(reason) => match policy {
                    MalformedLinePolicy::Abort => {
                        return Err(PathfinderError::MalformedLine {
                            line: line_no,
                            reason,
                        });
                    }
                    MalformedLinePolicy::Skip => {
                        log::warn!("Skipping malformed line {}: {}", line_no, reason);
                        report.skipped.push(SkippedLine {
                            line: line_no,
                            reason,
                        });
                    }
                },
            }
        }

        for declaration in declarations {
            self.add_vertex(declaration.source.as_str());
            for (dest, weight) in &declaration.edges {
                self.add_edge(&declaration.source, dest, *weight)?;
            }
            report.sources_declared += 1;
            report.edges_added += declaration.edges.len();
        }

        log::debug!(
            "Loaded {} sources, {} edges ({} lines skipped)",
            report.sources_declared,
            report.edges_added,
            report.skipped.len()
        );
        Ok(report)
    }

    /// Load a location file from disk. See [`Graph::load_from_str`].
    pub fn load_from_file(&mut self, path: impl AsRef<Path>, policy: MalformedLinePolicy) -> Result<LoadReport> {
        let path = path.as_ref();
        log::debug!("Reading location file {}", path.display());
        let content = std::fs::read_to_string(path)?;
        self.load_from_str(&content, policy)
    }
}
