use std::io::{Read, Seek, SeekFrom, Write};

use hierarchy::{HierarchyNode, ReportJson, build_hierarchy};
use report::{Heading, LineCursor, Table};

/// Parse the table following the utilization heading, as the driver does.
fn parse_report(source: &str) -> Table {
    let mut cursor = LineCursor::new(source);
    let headings = Heading::scan_all(&mut cursor);
    let section = headings
        .iter()
        .find(|h| h.title == "1. Utilization by Hierarchy")
        .expect("heading not found");
    cursor.seek(section.pos);
    Table::parse_next(&mut cursor, "/", 0)
        .expect("table parse failed")
        .expect("no table after heading")
}

fn parse_table(source: &str) -> Table {
    let mut cursor = LineCursor::new(source);
    Table::parse_next(&mut cursor, "/", 0)
        .expect("table parse failed")
        .expect("no table in fixture")
}

fn to_json(root: &HierarchyNode) -> serde_json::Value {
    serde_json::to_value(root).expect("serialization failed")
}

const SIBLING_TABLE: &str = "\
+------------+--------+------+
| Instance   | Module | Util |
+------------+--------+------+
| top        | m1     |   10 |
|   top.child | m2    |    5 |
+------------+--------+------+
";

#[test]
fn nests_rows_by_indentation_depth() {
    let table = parse_table(SIBLING_TABLE);
    let root = build_hierarchy(&table, "/");
    let json = to_json(&root);
    assert_eq!(json["name"], "/");
    assert_eq!(json["children"][0]["name"], "top");
    assert_eq!(json["children"][0]["children"][0]["name"], "top.child");
    assert_eq!(json["children"][0]["children"][0]["Util"], "5");
}

#[test]
fn depth_jump_attaches_directly_to_the_shallower_row() {
    let source = "\
+------------+--------+------+
| Instance   | Module | Util |
+------------+--------+------+
| top        | m1     |   10 |
|     deep   | m2     |    5 |
+------------+--------+------+
";
    let table = parse_table(source);
    assert_eq!(table.depths, [0, 2]);
    let root = build_hierarchy(&table, "/");
    // No depth-1 row exists; the depth-2 row still becomes a direct child
    // of the depth-0 row, not of the root.
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].children[0].name, "deep");
}

#[test]
fn siblings_after_a_nested_run_return_to_their_parent() {
    let source = "\
+------------+--------+------+
| Instance   | Module | Util |
+------------+--------+------+
| a          | m      |    1 |
|   a1       | m      |    2 |
|     a1x    | m      |    3 |
|   a2       | m      |    4 |
| b          | m      |    5 |
+------------+--------+------+
";
    let root = build_hierarchy(&parse_table(source), "/");
    let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
    let a = &root.children[0];
    assert_eq!(a.children.len(), 2);
    assert_eq!(a.children[0].children[0].name, "a1x");
    assert!(a.children[1].children.is_empty());
}

#[test]
fn children_key_is_emitted_only_for_non_leaves() {
    let root = build_hierarchy(&parse_table(SIBLING_TABLE), "/");
    let json = to_json(&root);
    let top = &json["children"][0];
    assert!(top.get("children").is_some());
    // Values are present on every row node, leaf or not.
    assert_eq!(top["Module"], "m1");
    let leaf = &top["children"][0];
    assert!(leaf.get("children").is_none());
    assert_eq!(leaf["Module"], "m2");
}

#[test]
fn value_keys_follow_column_order() {
    let root = build_hierarchy(&parse_table(SIBLING_TABLE), "/");
    let serialized = serde_json::to_string(&root).expect("serialization failed");
    let module = serialized.find("\"Module\"").expect("Module key");
    let util = serialized.find("\"Util\"").expect("Util key");
    assert!(module < util);
}

#[test]
fn serialization_is_idempotent() {
    let table = parse_report(END_TO_END);
    let values = table.value_columns().expect("value columns");
    let root = build_hierarchy(&table, &table.name);

    let render = |values: &[String]| {
        serde_json::to_vec_pretty(&ReportJson {
            values: values.to_vec(),
            hierarchy: &root,
        })
        .expect("serialization failed")
    };
    assert_eq!(render(&values), render(&values));

    // Same bytes through a file round trip.
    let mut file = tempfile::tempfile().expect("tempfile");
    file.write_all(&render(&values)).expect("write");
    file.seek(SeekFrom::Start(0)).expect("seek");
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).expect("read");
    assert_eq!(bytes, render(&values));
}

const END_TO_END: &str = "\
Design: top

1. Utilization by Hierarchy
---------------------------

+----------------+--------+------+-----+
| Instance       | Module | LUTs | FFs |
+----------------+--------+------+-----+
| top            | m_top  |   10 |   4 |
|   u_core       | core   |    6 |   2 |
+----------------+--------+------+-----+
";

#[test]
fn end_to_end_report_json() {
    let table = parse_report(END_TO_END);
    let values = table.value_columns().expect("value columns");
    assert_eq!(values, ["LUTs", "FFs"]);

    let root = build_hierarchy(&table, &table.name);
    let json = serde_json::to_value(&ReportJson {
        values,
        hierarchy: &root,
    })
    .expect("serialization failed");

    assert_eq!(json["values"], serde_json::json!(["LUTs", "FFs"]));
    assert_eq!(json["hierarchy"]["name"], "/");
    assert_eq!(json["hierarchy"]["children"][0]["name"], "top");
    assert_eq!(json["hierarchy"]["children"][0]["children"][0]["FFs"], "2");
}

#[test]
fn missing_heading_stops_before_any_table_parse() {
    let source = "2. Some Other Section\n---------------------\n";
    let mut cursor = LineCursor::new(source);
    let headings = Heading::scan_all(&mut cursor);
    assert!(
        !headings.iter().any(|h| h.title == "1. Utilization by Hierarchy"),
        "target heading must be absent"
    );
}

#[test]
fn renders_an_indented_tree() {
    let root = build_hierarchy(&parse_table(SIBLING_TABLE), "/");
    assert_eq!(root.render_tree(), "/\n  top\n    top.child\n");
}
