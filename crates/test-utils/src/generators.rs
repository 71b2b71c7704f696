//! Generators for synthetic StructMetadata text.
//!
//! Tests describe a tree with [`MetaEntry`], render it with
//! [`render_metadata`], parse the text back and compare the result against
//! the description.

/// Block delimiter flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
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

/// Description of one metadata entry.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaEntry {
    /// `key=value`, value written verbatim.
    Leaf { key: String, value: String },
    /// A `GROUP`/`OBJECT` block and its children.
    Block {
        kind: BlockKind,
        name: String,
        children: Vec<MetaEntry>,
    },
}

impl MetaEntry {
    pub fn leaf(key: &str, value: &str) -> Self {
        MetaEntry::Leaf {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    pub fn group(name: &str, children: Vec<MetaEntry>) -> Self {
        MetaEntry::Block {
            kind: BlockKind::Group,
            name: name.to_string(),
            children,
        }
    }

    pub fn object(name: &str, children: Vec<MetaEntry>) -> Self {
        MetaEntry::Block {
            kind: BlockKind::Object,
            name: name.to_string(),
            children,
        }
    }

    /// Key under which this entry appears in its parent.
    pub fn key(&self) -> &str {
        match self {
            MetaEntry::Leaf { key, .. } => key,
            MetaEntry::Block { name, .. } => name,
        }
    }
}

/// Render entries as tab-indented StructMetadata text terminated by `END`.
pub fn render_metadata(entries: &[MetaEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        render_entry(entry, 0, &mut out);
    }
    out.push_str("END\n");
    out
}

fn render_entry(entry: &MetaEntry, depth: usize, out: &mut String) {
    let indent = "\t".repeat(depth);
    match entry {
        MetaEntry::Leaf { key, value } => {
            out.push_str(&format!("{indent}{key}={value}\n"));
        }
        MetaEntry::Block {
            kind,
            name,
            children,
        } => {
            out.push_str(&format!("{indent}{}={name}\n", kind.keyword()));
            for child in children {
                render_entry(child, depth + 1, out);
            }
            out.push_str(&format!("{indent}END_{}={name}\n", kind.keyword()));
        }
    }
}

/// Deterministic pseudo-random tree for structural round-trip tests.
///
/// Each level holds up to `breadth` entries; block names are drawn from a
/// small pool so sibling blocks frequently share a name.
pub fn generate_metadata_tree(seed: u64, depth: usize, breadth: usize) -> Vec<MetaEntry> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    generate_level(&mut state, depth, breadth.max(1))
}

fn next(state: &mut u64) -> u64 {
    // Knuth MMIX LCG
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state >> 33
}

const BLOCK_NAMES: [&str; 4] = ["GRID_1", "GRID_2", "DataField", "Dimension"];
const LEAF_VALUES: [&str; 6] = [
    "1200",
    "-1",
    "6371007.181000",
    "\"grid1km\"",
    "GCTP_SNSOID",
    "(-1111950.519667,5559752.598333)",
];

fn generate_level(state: &mut u64, depth: usize, breadth: usize) -> Vec<MetaEntry> {
    let count = 1 + (next(state) as usize) % breadth;
    (0..count)
        .map(|i| {
            let roll = next(state) % 3;
            if depth > 0 && roll == 0 {
                let name = BLOCK_NAMES[(next(state) as usize) % BLOCK_NAMES.len()];
                let children = generate_level(state, depth - 1, breadth);
                if next(state) % 2 == 0 {
                    MetaEntry::group(name, children)
                } else {
                    MetaEntry::object(name, children)
                }
            } else {
                let value = LEAF_VALUES[(next(state) as usize) % LEAF_VALUES.len()];
                MetaEntry::leaf(&format!("Field_{i}"), value)
            }
        })
        .collect()
}
