//! Element selectors for XML templates.
//!
//! A small ElementTree-style path language, evaluated against the chain of open
//! elements from the document root:
//!
//! | selector              | selects                                          |
//! |-----------------------|--------------------------------------------------|
//! | `.`                   | the root element                                 |
//! | `name`, `./name`      | child `name` of the root                         |
//! | `application/activity`| nested path below the root                       |
//! | `.//activity`         | `activity` at any depth below the root           |
//! | `*`                   | any element name in that position                |
//! | `preference[@name='x']` | element whose attribute `name` equals `x`      |
//!
//! Names are compared with their namespace prefix, as written in the template.

use std::fmt;

/// One element on the path from the root to the current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Qualified element name.
    pub name: String,
    /// Attributes as raw (unescaped) key/value text.
    pub attributes: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    name: Option<String>,
    predicate: Option<(String, String)>,
}

impl Step {
    fn matches(&self, frame: &Frame) -> bool {
        let name_ok = self.name.as_ref().is_none_or(|n| *n == frame.name);
        let predicate_ok = self.predicate.as_ref().is_none_or(|(key, value)| {
            frame
                .attributes
                .iter()
                .any(|(k, v)| k == key && v == value)
        });
        name_ok && predicate_ok
    }
}

/// Parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    descendant: bool,
    steps: Vec<Step>,
}

impl Selector {
    /// Parses `source`; returns `None` for syntax this grammar does not cover.
    pub fn parse(source: &str) -> Option<Self> {
        let trimmed = source.trim();
        let (descendant, rest) = if let Some(rest) = trimmed.strip_prefix(".//") {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix("//") {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix("./") {
            (false, rest)
        } else if trimmed == "." || trimmed.is_empty() {
            (false, "")
        } else {
            (false, trimmed)
        };

        let mut steps = Vec::new();
        for segment in rest.split('/') {
            if segment.is_empty() || segment == "." {
                continue;
            }
            steps.push(parse_step(segment)?);
        }

        if descendant && steps.is_empty() {
            return None;
        }

        Some(Self {
            source: source.to_string(),
            descendant,
            steps,
        })
    }

    /// Whether the innermost frame of `path` is selected.
    ///
    /// `path[0]` is the document root.
    pub fn matches(&self, path: &[Frame]) -> bool {
        let Some((_root, below)) = path.split_first() else {
            return false;
        };

        if self.descendant {
            if below.len() < self.steps.len() {
                return false;
            }
            let tail = &below[below.len() - self.steps.len()..];
            self.steps.iter().zip(tail).all(|(s, f)| s.matches(f))
        } else {
            below.len() == self.steps.len()
                && self.steps.iter().zip(below).all(|(s, f)| s.matches(f))
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_step(segment: &str) -> Option<Step> {
    let (name, predicate) = match segment.split_once('[') {
        Some((name, rest)) => {
            let inner = rest.strip_suffix(']')?.trim().strip_prefix('@')?;
            let (key, value) = inner.split_once('=')?;
            let value = value.trim();
            let value = value
                .strip_prefix('\'')
                .and_then(|v| v.strip_suffix('\''))
                .or_else(|| value.strip_prefix('"').and_then(|v| v.strip_suffix('"')))?;
            (name, Some((key.trim().to_string(), value.to_string())))
        }
        None => (segment, None),
    };

    let name = match name.trim() {
        "*" => None,
        "" => return None,
        other => Some(other.to_string()),
    };
    Some(Step { name, predicate })
}
