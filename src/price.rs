//! Price descriptor classifier.
//!
//! Menu items carry a single hand-written price field such as
//! `"Half: Oil | 100, Full: Butter | 180"`. [`classify`] turns that text
//! into a [`PriceDescriptor`] the display layer can lay out without
//! parsing anything itself.
//!
//! Classification is a priority-ordered rule chain. Each rule has a cheap
//! detection predicate and an extractor; an extractor may decline (return
//! `None`) after detection, in which case the chain continues with the
//! next rule. Anything left over becomes [`PriceDescriptor::Single`].

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Insertion-ordered `label -> options` map.
///
/// Re-inserting an existing label replaces its options in place, so the
/// label keeps the position of its first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    entries: Vec<(String, Vec<String>)>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the options for `label`.
    pub fn insert(&mut self, label: impl Into<String>, options: Vec<String>) {
        let label = label.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, slot)) => *slot = options,
            None => self.entries.push((label, options)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, options)| options.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(label, options)| (label.as_str(), options.as_slice()))
    }
}

impl<L: Into<String>> FromIterator<(L, Vec<String>)> for Sections {
    fn from_iter<I: IntoIterator<Item = (L, Vec<String>)>>(iter: I) -> Self {
        let mut sections = Sections::new();
        for (label, options) in iter {
            sections.insert(label, options);
        }
        sections
    }
}

/// Serialized as a JSON object whose key order follows insertion order.
impl Serialize for Sections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, options) in &self.entries {
            map.serialize_entry(label, options)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Descriptor
// ---------------------------------------------------------------------------

/// Structured form of a raw price string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PriceDescriptor {
    /// Explicit labels (`"Half: ..., Full: ..."`), each with several options.
    Complex { sections: Sections },
    /// Unlabeled comma-separated groups under synthetic `"Group N"` labels.
    Grouped { sections: Sections },
    /// One price for a half portion and one for a full portion.
    HalfFull { half: String, full: String },
    /// Unlabeled list of alternatives.
    Simple { options: Vec<String> },
    /// A single unstructured price.
    Single { option: String },
}

/// Variant tag of a [`PriceDescriptor`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PriceShape {
    Complex,
    Grouped,
    HalfFull,
    Simple,
    Single,
}

impl PriceShape {
    pub const ALL: [PriceShape; 5] = [
        PriceShape::Complex,
        PriceShape::Grouped,
        PriceShape::HalfFull,
        PriceShape::Simple,
        PriceShape::Single,
    ];
}

impl fmt::Display for PriceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PriceShape::Complex => "complex",
            PriceShape::Grouped => "grouped",
            PriceShape::HalfFull => "halfFull",
            PriceShape::Simple => "simple",
            PriceShape::Single => "single",
        };
        f.write_str(name)
    }
}

impl PriceDescriptor {
    pub fn shape(&self) -> PriceShape {
        match self {
            PriceDescriptor::Complex { .. } => PriceShape::Complex,
            PriceDescriptor::Grouped { .. } => PriceShape::Grouped,
            PriceDescriptor::HalfFull { .. } => PriceShape::HalfFull,
            PriceDescriptor::Simple { .. } => PriceShape::Simple,
            PriceDescriptor::Single { .. } => PriceShape::Single,
        }
    }

    /// Every string leaf of the descriptor (labels included), in display order.
    pub fn leaves(&self) -> Vec<&str> {
        match self {
            PriceDescriptor::Complex { sections } | PriceDescriptor::Grouped { sections } => {
                sections
                    .iter()
                    .flat_map(|(label, options)| {
                        std::iter::once(label).chain(options.iter().map(String::as_str))
                    })
                    .collect()
            }
            PriceDescriptor::HalfFull { half, full } => vec![half.as_str(), full.as_str()],
            PriceDescriptor::Simple { options } => options.iter().map(String::as_str).collect(),
            PriceDescriptor::Single { option } => vec![option.as_str()],
        }
    }
}

// ---------------------------------------------------------------------------
// Rule chain
// ---------------------------------------------------------------------------

/// One step of the classification chain.
struct Rule {
    name: &'static str,
    detect: fn(&str) -> bool,
    /// `None` means "detected, but nothing to extract": try the next rule.
    extract: fn(&str) -> Option<PriceDescriptor>,
}

const RULES: &[Rule] = &[
    Rule {
        name: "complex",
        detect: |s| s.contains(':') && s.contains(','),
        extract: extract_complex,
    },
    Rule {
        name: "grouped",
        detect: |s| s.contains(',') && !s.contains(':'),
        extract: extract_grouped,
    },
    Rule {
        name: "halfFull",
        detect: |s| s.contains("Half") || s.contains("Full"),
        extract: extract_half_full,
    },
    Rule {
        name: "simple",
        detect: |s| s.contains('|'),
        extract: |s| Some(PriceDescriptor::Simple { options: split_options(s) }),
    },
];

/// Classify a raw price string. Never fails.
pub fn classify(raw: &str) -> PriceDescriptor {
    let text = raw.trim();
    RULES
        .iter()
        .filter(|rule| (rule.detect)(text))
        .find_map(|rule| (rule.extract)(text))
        .unwrap_or_else(|| PriceDescriptor::Single {
            option: text.to_string(),
        })
}

/// Name of the rule that produced the result for `raw`, or `"single"`.
pub fn matched_rule(raw: &str) -> &'static str {
    let text = raw.trim();
    RULES
        .iter()
        .find(|rule| (rule.detect)(text) && (rule.extract)(text).is_some())
        .map_or("single", |rule| rule.name)
}

/// Split on `|`, trim, drop empties.
fn split_options(s: &str) -> Vec<String> {
    s.split('|')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(String::from)
        .collect()
}

fn extract_complex(text: &str) -> Option<PriceDescriptor> {
    let mut sections = Sections::new();
    for section in text.split(',').map(str::trim) {
        let Some((label, options)) = section.split_once(':') else {
            continue;
        };
        let (label, options) = (label.trim(), options.trim());
        if label.is_empty() || options.is_empty() {
            continue;
        }
        sections.insert(label, split_options(options));
    }
    Some(PriceDescriptor::Complex { sections })
}

fn extract_grouped(text: &str) -> Option<PriceDescriptor> {
    let sections = text
        .split(',')
        .map(str::trim)
        .enumerate()
        .map(|(index, group)| {
            let options = if group.contains('|') || group.is_empty() {
                split_options(group)
            } else {
                vec![group.to_string()]
            };
            (format!("Group {}", index + 1), options)
        })
        .collect();
    Some(PriceDescriptor::Grouped { sections })
}

fn extract_half_full(text: &str) -> Option<PriceDescriptor> {
    let candidates = split_options(text);
    let half = candidates.iter().find(|c| find_ignore_case(c, "half").is_some())?;
    let full = candidates.iter().find(|c| find_ignore_case(c, "full").is_some())?;
    Some(PriceDescriptor::HalfFull {
        half: remove_first_ignore_case(half, "half"),
        full: remove_first_ignore_case(full, "full"),
    })
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`.
///
/// `needle` must be ASCII, so any match starts and ends on a char boundary.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let (hay, pat) = (haystack.as_bytes(), needle.as_bytes());
    if pat.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - pat.len()).find(|&i| hay[i..i + pat.len()].eq_ignore_ascii_case(pat))
}

fn remove_first_ignore_case(haystack: &str, needle: &str) -> String {
    match find_ignore_case(haystack, needle) {
        Some(at) => {
            let mut out = String::with_capacity(haystack.len() - needle.len());
            out.push_str(&haystack[..at]);
            out.push_str(&haystack[at + needle.len()..]);
            out.trim().to_string()
        }
        None => haystack.trim().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
