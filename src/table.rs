//! Data vs. layout table classification.
//!
//! Heuristics after <http://asurkov.blogspot.com/2011/10/data-vs-layout-table.html>,
//! reordered for distillation. Rules that need computed styles (document
//! width and height, cell borders, row colors) are not applied.

use std::fmt;

use tracing::trace;

use crate::dom::{self, NodeRef};

/// ARIA landmark roles, for both tables and their descendants.
const ARIA_ROLES: &[&str] = &[
    "application",
    "banner",
    "complementary",
    "contentinfo",
    "form",
    "main",
    "navigation",
    "search",
];

const ARIA_TABLE_ROLES: &[&str] = &["grid", "treegrid"];

const ARIA_TABLE_DESCENDANT_ROLES: &[&str] =
    &["gridcell", "columnheader", "row", "rowgroup", "rowheader"];

/// Header tags, and whether the tag only counts when it has text.
const HEADER_TAGS: &[(&str, bool)] = &[("colgroup", false), ("col", false), ("th", true)];

const OBJECT_TAGS: &[(&str, bool)] = &[
    ("embed", false),
    ("object", false),
    ("applet", false),
    ("iframe", false),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableType {
    Data,
    Layout,
}

/// The rule that decided a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    InsideEditableArea,
    RoleTable,
    RoleDescendant,
    Datatable0,
    CaptionTheadTfootColgroupColTh,
    AbbrHeadersScope,
    OnlyHasAbbr,
    Summary,
    NestedTable,
    LessEq1Row,
    LessEq1Col,
    MoreEq5Cols,
    MoreEq20Rows,
    LessEq10Cells,
    EmbedObjectAppletIframe,
    Default,
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Classify a `<table>` element.
#[must_use]
pub fn classify(table: &NodeRef) -> (TableType, Reason) {
    let (table_type, reason) = classify_inner(table);
    trace!(
        id = %dom::id(table),
        class = %dom::class_name(table),
        %table_type,
        %reason,
        "table classified"
    );
    (table_type, reason)
}

fn classify_inner(table: &NodeRef) -> (TableType, Reason) {
    use TableType::{Data, Layout};

    // Editable areas are ignored during distillation.
    let editable = table.ancestors_it(None).any(|parent| {
        parent.has_name("input")
            || dom::attribute_or_empty(&parent, "contenteditable").eq_ignore_ascii_case("true")
    });
    if editable {
        return (Layout, Reason::InsideEditableArea);
    }

    let role = dom::attribute_or_empty(table, "role").to_lowercase();
    if role == "presentation" {
        return (Layout, Reason::RoleTable);
    }
    if ARIA_ROLES.contains(&role.as_str()) || ARIA_TABLE_ROLES.contains(&role.as_str()) {
        return (Data, Reason::RoleTable);
    }

    let descendants = direct_descendants(table);
    for element in &descendants {
        let role = dom::attribute_or_empty(element, "role").to_lowercase();
        if ARIA_ROLES.contains(&role.as_str()) || ARIA_TABLE_DESCENDANT_ROLES.contains(&role.as_str())
        {
            return (Data, Reason::RoleDescendant);
        }
    }

    if dom::attribute_or_empty(table, "datatable") == "0" {
        return (Layout, Reason::Datatable0);
    }

    // Nesting and row/column counts are checked before the structural rules:
    // old pages often nest layout tables that carry <th> or <caption>.
    if has_nested_tables(table) {
        return (Layout, Reason::NestedTable);
    }

    let (rows, columns) = row_and_column_count(table);
    if rows <= 1 {
        return (Layout, Reason::LessEq1Row);
    }
    if columns <= 1 {
        return (Layout, Reason::LessEq1Col);
    }

    let has_caption = dom::first_element_by_tag_name(table, "caption").is_some_and(|c| has_valid_text(&c));
    if has_caption
        || dom::first_element_by_tag_name(table, "thead").is_some()
        || dom::first_element_by_tag_name(table, "tfoot").is_some()
        || has_one_of_elements(&descendants, HEADER_TAGS)
    {
        return (Data, Reason::CaptionTheadTfootColgroupColTh);
    }

    let cells: Vec<&NodeRef> = descendants.iter().filter(|e| e.has_name("td")).collect();
    for cell in &cells {
        if cell.has_attr("abbr") || cell.has_attr("headers") || cell.has_attr("scope") {
            return (Data, Reason::AbbrHeadersScope);
        }
        let children: Vec<NodeRef> = cell.descendants_it().filter(NodeRef::is_element).collect();
        if children.len() == 1 && children[0].has_name("abbr") {
            return (Data, Reason::OnlyHasAbbr);
        }
    }

    if table.has_attr("summary") {
        return (Data, Reason::Summary);
    }
    if columns >= 5 {
        return (Data, Reason::MoreEq5Cols);
    }
    if rows >= 20 {
        return (Data, Reason::MoreEq20Rows);
    }
    if cells.len() <= 10 {
        return (Layout, Reason::LessEq10Cells);
    }
    if has_one_of_elements(&descendants, OBJECT_TAGS) {
        return (Layout, Reason::EmbedObjectAppletIframe);
    }

    (Data, Reason::Default)
}

fn has_nested_tables(table: &NodeRef) -> bool {
    dom::first_element_by_tag_name(table, "table").is_some()
}

/// Descendant elements that belong to this table and not to a nested one.
fn direct_descendants<'a>(table: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let all = table.descendants_it().filter(NodeRef::is_element);
    if !has_nested_tables(table) {
        return all.collect();
    }
    all.filter(|element| {
        element
            .ancestors_it(None)
            .find(|a| a.has_name("table"))
            .is_some_and(|owner| owner.id == table.id)
    })
    .collect()
}

fn has_valid_text(element: &NodeRef) -> bool {
    !dom::inner_text(element).trim().is_empty()
}

/// Decided by the first element whose tag is listed.
fn has_one_of_elements(elements: &[NodeRef], tags: &[(&str, bool)]) -> bool {
    for element in elements {
        let tag = dom::tag_name(element);
        if let Some((_, needs_text)) = tags.iter().find(|(t, _)| *t == tag) {
            return !needs_text || has_valid_text(element);
        }
    }
    false
}

/// Rows (with rowspan) and the widest row's columns (with colspan).
///
/// A missing, zero or unparsable span counts as 1. Spans are read as written:
/// padded values are unparsable and negative ones are kept.
fn row_and_column_count(table: &NodeRef) -> (i64, i64) {
    let span = |node: &NodeRef, attr: &str| -> i64 {
        match dom::attribute_or_empty(node, attr).parse::<i64>() {
            Ok(0) | Err(_) => 1,
            Ok(n) => n,
        }
    };

    let mut rows = 0;
    let mut columns = 0;
    for tr in dom::elements_by_tag_name(table, "tr") {
        rows += span(&tr, "rowspan");
        let in_row: i64 = dom::elements_by_tag_name(&tr, "td")
            .iter()
            .map(|td| span(td, "colspan"))
            .sum();
        columns = columns.max(in_row);
    }
    (rows, columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_query::Document;

    fn grid(rows: usize, cols: usize) -> String {
        let row = format!("<tr>{}</tr>", "<td>cell</td>".repeat(cols));
        row.repeat(rows)
    }

    fn classify_html(html: &str) -> (TableType, Reason) {
        let doc = Document::from(html);
        let tables = doc.select("table#t").nodes().to_vec();
        match tables.first() {
            Some(table) => classify(table),
            None => panic!("no table#t"),
        }
    }

    #[test]
    fn test_content_editable() {
        let html = format!(r#"<div contenteditable="true"><table id="t"><tr><th>h</th><th>h</th></tr>{}</table></div>"#, grid(2, 2));
        assert_eq!(classify_html(&html), (TableType::Layout, Reason::InsideEditableArea));
    }

    #[test]
    fn test_roles() {
        let html = format!(r#"<table id="t" role="presentation"><tr><th>h</th></tr>{}</table>"#, grid(2, 2));
        assert_eq!(classify_html(&html), (TableType::Layout, Reason::RoleTable));

        let html = format!(r#"<table id="t" role="grid">{}</table>"#, grid(2, 2));
        assert_eq!(classify_html(&html), (TableType::Data, Reason::RoleTable));

        let html = format!(r#"<table id="t" role="treegrid">{}</table>"#, grid(2, 2));
        assert_eq!(classify_html(&html), (TableType::Data, Reason::RoleTable));

        let html = r#"<table id="t"><tr><td role="gridcell">a</td><td>b</td></tr></table>"#;
        assert_eq!(classify_html(html), (TableType::Data, Reason::RoleDescendant));

        let html = r#"<table id="t"><tr role="navigation"><td>a</td></tr></table>"#;
        assert_eq!(classify_html(html), (TableType::Data, Reason::RoleDescendant));
    }

    #[test]
    fn test_nested_role_belongs_to_inner_table() {
        let html = format!(
            r#"<table id="t"><tr><td><table id="inner"><tr><td role="gridcell">a</td></tr></table></td></tr>{}</table>"#,
            grid(2, 2)
        );
        assert_eq!(classify_html(&html), (TableType::Layout, Reason::NestedTable));
    }

    #[test]
    fn test_datatable_attribute() {
        let html = format!(r#"<table id="t" datatable="0"><tr><th>h</th></tr>{}</table>"#, grid(2, 2));
        assert_eq!(classify_html(&html), (TableType::Layout, Reason::Datatable0));
    }

    #[test]
    fn test_caption() {
        let html = format!(r#"<table id="t"><caption>Caption</caption>{}</table>"#, grid(2, 2));
        assert_eq!(classify_html(&html), (TableType::Data, Reason::CaptionTheadTfootColgroupColTh));

        let html = format!(r#"<table id="t"><caption>  </caption>{}</table>"#, grid(2, 2));
        assert_eq!(classify_html(&html), (TableType::Layout, Reason::LessEq10Cells));
    }

    #[test]
    fn test_header_structures() {
        let html = format!(r#"<table id="t"><thead><tr><td>h</td><td>h</td></tr></thead>{}</table>"#, grid(2, 2));
        assert_eq!(classify_html(&html), (TableType::Data, Reason::CaptionTheadTfootColgroupColTh));

        let html = format!(r#"<table id="t"><colgroup><col></colgroup>{}</table>"#, grid(2, 2));
        assert_eq!(classify_html(&html), (TableType::Data, Reason::CaptionTheadTfootColgroupColTh));

        let html = format!(r#"<table id="t"><tr><th>h</th><th>h</th></tr>{}</table>"#, grid(2, 2));
        assert_eq!(classify_html(&html), (TableType::Data, Reason::CaptionTheadTfootColgroupColTh));

        let html = format!(r#"<table id="t"><tr><th> </th><th></th></tr>{}</table>"#, grid(2, 2));
        assert_eq!(classify_html(&html), (TableType::Layout, Reason::LessEq10Cells));
    }

    #[test]
    fn test_cell_attributes_and_abbr() {
        let html = r#"<table id="t"><tr><td scope="row">a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>"#;
        assert_eq!(classify_html(html), (TableType::Data, Reason::AbbrHeadersScope));

        let html = r#"<table id="t"><tr><td><abbr>a</abbr></td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>"#;
        assert_eq!(classify_html(html), (TableType::Data, Reason::OnlyHasAbbr));
    }

    #[test]
    fn test_span_attributes() {
        let table = |html: &str| {
            let doc = Document::from(html);
            let node = doc.select("table").nodes()[0];
            row_and_column_count(&node)
        };

        let html = r#"<table><tr rowspan="3"><td colspan="2">a</td><td>b</td></tr></table>"#;
        assert_eq!(table(html), (3, 3));

        let html = r#"<table><tr rowspan=" 3"><td colspan="0">a</td><td colspan="x">b</td></tr></table>"#;
        assert_eq!(table(html), (1, 2));

        let html = r#"<table><tr><td colspan="-2">a</td><td colspan="5">b</td></tr><tr rowspan="-1"><td>c</td></tr></table>"#;
        assert_eq!(table(html), (0, 3));
    }

    #[test]
    fn test_row_and_column_counts() {
        let html = r#"<table id="t"></table>"#;
        assert_eq!(classify_html(html), (TableType::Layout, Reason::LessEq1Row));

        let html = format!(r#"<table id="t">{}</table>"#, grid(1, 4));
        assert_eq!(classify_html(&html), (TableType::Layout, Reason::LessEq1Row));

        let html = format!(r#"<table id="t">{}</table>"#, grid(3, 1));
        assert_eq!(classify_html(&html), (TableType::Layout, Reason::LessEq1Col));

        let html = format!(r#"<table id="t">{}</table>"#, grid(2, 5));
        assert_eq!(classify_html(&html), (TableType::Data, Reason::MoreEq5Cols));

        let html = format!(r#"<table id="t">{}</table>"#, grid(20, 2));
        assert_eq!(classify_html(&html), (TableType::Data, Reason::MoreEq20Rows));
    }

    #[test]
    fn test_summary() {
        let html = format!(r#"<table id="t" summary="Sales">{}</table>"#, grid(2, 2));
        assert_eq!(classify_html(&html), (TableType::Data, Reason::Summary));
    }

    #[test]
    fn test_embedded_objects_and_default() {
        let html = format!(r#"<table id="t">{}<tr><td><iframe src="x"></iframe></td></tr></table>"#, grid(3, 4));
        assert_eq!(classify_html(&html), (TableType::Layout, Reason::EmbedObjectAppletIframe));

        let html = format!(r#"<table id="t">{}</table>"#, grid(3, 4));
        assert_eq!(classify_html(&html), (TableType::Data, Reason::Default));
    }
}
