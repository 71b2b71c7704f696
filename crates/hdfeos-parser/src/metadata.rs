//! StructMetadata tree and the stack-based block parser.
//!
//! The metadata text is a flat list of lines:
//!
//! ```text
//! GROUP=GridStructure
//!     GROUP=GRID_1
//!         XDim=1200
//!         ...
//!     END_GROUP=GRID_1
//! END_GROUP=GridStructure
//! END
//! ```
//!
//! Block delimiters are matched against an explicit stack of open blocks, so
//! sibling blocks sharing a name become distinct children of their parent.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{MetadataError, MetadataResult};
use crate::literal::{parse_literal, Scalar};

/// A node in the parsed metadata tree.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataNode {
    Scalar(Scalar),
    Group(Group),
}

impl MetadataNode {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            MetadataNode::Scalar(s) => Some(s),
            MetadataNode::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            MetadataNode::Group(g) => Some(g),
            MetadataNode::Scalar(_) => None,
        }
    }
}

/// Ordered children of a `GROUP` or `OBJECT` block.
///
/// Entries keep the order they appeared in. Repeated keys are all retained;
/// name lookups return the first match unless an occurrence is requested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    entries: Vec<(String, MetadataNode)>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, node: MetadataNode) {
        self.entries.push((key.into(), node));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First child with the given key.
    pub fn get(&self, key: &str) -> Option<&MetadataNode> {
        self.get_all(key).next()
    }

    /// The `occurrence`-th (0-based) child with the given key.
    pub fn get_nth(&self, key: &str, occurrence: usize) -> Option<&MetadataNode> {
        self.get_all(key).nth(occurrence)
    }

    /// Every child with the given key, in document order.
    pub fn get_all<'a, 'k>(&'a self, key: &'k str) -> impl Iterator<Item = &'a MetadataNode> + 'k
    where
        'a: 'k,
    {
        self.entries
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, node)| node)
    }

    /// First child group with the given key.
    pub fn group(&self, key: &str) -> Option<&Group> {
        self.get_all(key).find_map(MetadataNode::as_group)
    }

    /// First scalar child with the given key.
    pub fn scalar(&self, key: &str) -> Option<&Scalar> {
        self.get_all(key).find_map(MetadataNode::as_scalar)
    }

    /// Resolve a `/`-separated path of keys, e.g. `GridStructure/GRID_1/XDim`.
    pub fn path(&self, path: &str) -> Option<&MetadataNode> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let first = segments.next()?;
        let mut node = self.get(first)?;
        for segment in segments {
            node = node.as_group()?.get(segment)?;
        }
        Some(node)
    }

    /// Keys in document order (duplicates included).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// What to do with a value or line that is not part of the grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralPolicy {
    /// Fail the parse with [`MetadataError::Malformed`].
    #[default]
    Reject,
    /// Drop the offending entry and keep going.
    Ignore,
}

impl LiteralPolicy {
    /// Parse a policy name (`reject` / `ignore`), case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "reject" | "strict" => Some(Self::Reject),
            "ignore" | "skip" => Some(Self::Ignore),
            _ => None,
        }
    }
}

/// Options controlling [`parse_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub literal_policy: LiteralPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Group,
    Object,
}

impl BlockKind {
    fn keyword(self) -> &'static str {
        match self {
            BlockKind::Group => "GROUP",
            BlockKind::Object => "OBJECT",
        }
    }
}

enum Line<'a> {
    Open(BlockKind, &'a str),
    Close(BlockKind, &'a str),
    Assign(&'a str, &'a str),
}

struct OpenBlock {
    kind: BlockKind,
    name: String,
    line: usize,
    children: Group,
}

/// Parse StructMetadata text with default options (unrecognized values are rejected).
pub fn parse(text: &str) -> MetadataResult<Group> {
    parse_with(text, &ParseOptions::default())
}

/// Parse StructMetadata text into an ordered tree.
pub fn parse_with(text: &str, options: &ParseOptions) -> MetadataResult<Group> {
    let mut root = Group::new();
    let mut stack: Vec<OpenBlock> = Vec::new();
    let mut blocks = 0usize;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let cleaned: String = raw.chars().filter(|c| *c != '\t' && *c != '\0').collect();
        let line = cleaned.trim();

        if line.is_empty() || line == "END" {
            continue;
        }

        let parsed = match classify_line(line) {
            Ok(parsed) => parsed,
            Err(LineError::Structural(reason)) => {
                return Err(MetadataError::malformed(line_no, reason));
            }
            Err(LineError::Unrecognized(reason)) => {
                reject_or_skip(options.literal_policy, line_no, reason)?;
                continue;
            }
        };

        match parsed {
            Line::Open(kind, name) => {
                stack.push(OpenBlock {
                    kind,
                    name: name.to_string(),
                    line: line_no,
                    children: Group::new(),
                });
            }
            Line::Close(kind, name) => {
                let block = stack.pop().ok_or_else(|| {
                    MetadataError::malformed(
                        line_no,
                        format!("END_{}={} without a matching open block", kind.keyword(), name),
                    )
                })?;

                if block.kind != kind || block.name != name {
                    return Err(MetadataError::malformed(
                        line_no,
                        format!(
                            "END_{}={} closes {}={} opened at line {}",
                            kind.keyword(),
                            name,
                            block.kind.keyword(),
                            block.name,
                            block.line
                        ),
                    ));
                }

                blocks += 1;
                let parent = match stack.last_mut() {
                    Some(open) => &mut open.children,
                    None => &mut root,
                };
                parent.insert(block.name, MetadataNode::Group(block.children));
            }
            Line::Assign(key, value) => match parse_literal(value) {
                Ok(scalar) => {
                    let current = match stack.last_mut() {
                        Some(open) => &mut open.children,
                        None => &mut root,
                    };
                    current.insert(key, MetadataNode::Scalar(scalar));
                }
                Err(reason) => {
                    reject_or_skip(
                        options.literal_policy,
                        line_no,
                        format!("value of '{}': {}", key, reason),
                    )?;
                }
            },
        }
    }

    if let Some(open) = stack.pop() {
        return Err(MetadataError::malformed(
            open.line,
            format!("unterminated {}={}", open.kind.keyword(), open.name),
        ));
    }

    debug!(blocks, top_level = root.len(), "Parsed StructMetadata");
    Ok(root)
}

enum LineError {
    /// Broken block delimiter; never skippable.
    Structural(String),
    /// Line outside the grammar; subject to the literal policy.
    Unrecognized(String),
}

fn classify_line(line: &str) -> Result<Line<'_>, LineError> {
    let (key, value) = line
        .split_once('=')
        .ok_or_else(|| LineError::Unrecognized(format!("expected KEY=VALUE, found '{}'", line)))?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() {
        return Err(LineError::Unrecognized(format!("missing key in '{}'", line)));
    }

    let block = match key {
        "GROUP" => Some((BlockKind::Group, true)),
        "OBJECT" => Some((BlockKind::Object, true)),
        "END_GROUP" => Some((BlockKind::Group, false)),
        "END_OBJECT" => Some((BlockKind::Object, false)),
        _ => None,
    };

    match block {
        Some((kind, _)) if value.is_empty() => Err(LineError::Structural(format!(
            "{} delimiter without a block name",
            kind.keyword()
        ))),
        Some((kind, true)) => Ok(Line::Open(kind, value)),
        Some((kind, false)) => Ok(Line::Close(kind, value)),
        None => Ok(Line::Assign(key, value)),
    }
}

fn reject_or_skip(policy: LiteralPolicy, line: usize, reason: String) -> MetadataResult<()> {
    match policy {
        LiteralPolicy::Reject => Err(MetadataError::malformed(line, reason)),
        LiteralPolicy::Ignore => {
            warn!(line, reason = %reason, "Ignoring unparseable metadata entry");
            Ok(())
        }
    }
}
