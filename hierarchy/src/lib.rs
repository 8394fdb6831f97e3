pub mod builder;
pub mod node;

pub use builder::build_hierarchy;
pub use node::HierarchyNode;

use serde::Serialize;

/// The top-level output document: the list of value columns and the
/// reconstructed hierarchy, serialized in that key order.
#[derive(Serialize)]
pub struct ReportJson<'a> {
    pub values: Vec<String>,
    pub hierarchy: &'a HierarchyNode,
}
