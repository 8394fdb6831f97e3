use report::Table;

use crate::node::HierarchyNode;

/// Reconstruct the tree encoded by a table's row order and indentation
/// depths.
///
/// A row is a child of the nearest preceding row with a strictly smaller
/// depth, so a depth jump of more than one level attaches the deeper row
/// directly (depths `[0, 2]` make the second row a child of the first).
/// The root takes `root_name` and sits at sentinel depth -1, which accepts
/// the first row unconditionally.
///
/// Iterative rather than recursive: one stack frame per open node, popped
/// and attached to its parent as soon as a row at the same or a shallower
/// depth arrives. The table is not consumed.
pub fn build_hierarchy(table: &Table, root_name: &str) -> HierarchyNode {
    let mut stack: Vec<(HierarchyNode, i64)> = vec![(HierarchyNode::new(root_name), -1)];

    for (row, &depth) in table.rows.iter().zip(&table.depths) {
        let depth = depth as i64;
        close_to_depth(&mut stack, depth);
        let mut node = HierarchyNode::new(&row.name);
        node.values = row.values.clone();
        stack.push((node, depth));
    }

    // Close everything still open; the sentinel stops the drain at the root.
    close_to_depth(&mut stack, 0);
    let (root, _) = stack.pop().expect("root frame always present");
    root
}

/// Pop frames whose depth is >= `depth`, attaching each to its parent.
fn close_to_depth(stack: &mut Vec<(HierarchyNode, i64)>, depth: i64) {
    while stack.last().is_some_and(|(_, d)| *d >= depth) {
        let (node, _) = stack.pop().expect("checked non-empty");
        let (parent, _) = stack.last_mut().expect("sentinel below every frame");
        parent.children.push(node);
    }
}
