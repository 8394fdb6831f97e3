use std::fmt::Write as _;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A node in the reconstructed hierarchy. The root carries the table's
/// label as its name and no values; every other node comes from one table
/// row.
#[derive(Debug, Clone)]
pub struct HierarchyNode {
    pub name: String,
    /// Value-column entries, in column order.
    pub values: IndexMap<String, String>,
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    pub fn new(name: impl Into<String>) -> Self {
        HierarchyNode {
            name: name.into(),
            values: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Render the tree as an indented listing of node names, two spaces
    /// per level, one node per line.
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, indent: usize) {
        let _ = writeln!(out, "{}{}", "  ".repeat(indent), self.name);
        for child in &self.children {
            child.render_into(out, indent + 1);
        }
    }
}

/// Serialized as a single object: "name" first, "children" only when the
/// node has any, then the node's value columns as sibling keys. Column
/// names must not collide with the two reserved keys.
impl Serialize for HierarchyNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        if !self.children.is_empty() {
            map.serialize_entry("children", &self.children)?;
        }
        for (column, value) in &self.values {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}
