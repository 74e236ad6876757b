// End-to-end API tests for html-table-takeout.

use std::collections::HashMap;

use html_table_takeout::{InlineElement, LinkGroup, Matcher, ParseOptions, RowGroup};
use pretty_assertions::assert_eq;

#[test]
fn single_cell_table() {
    let tables = html_table_takeout::parse_html("<table><tr><td>1</td></tr></table>").unwrap();
    assert_eq!(tables.len(), 1);
    let t = &tables[0];
    assert_eq!(t.id, 0);
    assert_eq!(t.rows.len(), 1);
    assert_eq!(t.rows[0].group, RowGroup::Tbody);
    assert!(!t.rows[0].cells[0].header);
    assert_eq!(
        t.rows[0].cells[0].elements,
        vec![InlineElement::Text("1".into())]
    );
}

#[test]
fn combined_rowspan_and_colspan_duplicates_by_value() {
    let html = "<table><tr><td rowspan='2' colspan='2'>X</td><td>Y</td></tr><tr><td>Z</td></tr></table>";
    let tables = html_table_takeout::parse_html(html).unwrap();
    assert_eq!(tables.len(), 1);
    let grid = cell_text_grid(&tables[0]);
    assert_eq!(
        grid,
        vec![
            vec!["X".to_string(), "X".to_string(), "Y".to_string()],
            vec!["X".to_string(), "X".to_string(), "Z".to_string()],
        ]
    );
}

#[test]
fn rowspan_overflow_does_not_cross_into_a_different_row_group() {
    let html = "<table><thead><tr><td rowspan='5'>A</td><td>B</td></tr></thead><tr><td>C</td><td>D</td></tr></table>";
    let tables = html_table_takeout::parse_html(html).unwrap();
    let t = &tables[0];
    let thead: Vec<_> = t.rows.iter().filter(|r| r.group == RowGroup::Thead).collect();
    let tbody: Vec<_> = t.rows.iter().filter(|r| r.group == RowGroup::Tbody).collect();
    assert_eq!(thead.len(), 1);
    assert_eq!(tbody.len(), 1);
    assert_eq!(tbody[0].cells.len(), 2, "overflow of A must not spill into tbody");
}

#[test]
fn attrs_predicate_selects_the_matching_table() {
    let html = "<table id='x'><tr><td>1</td></tr></table><table><tr><td>2</td></tr></table>";
    let mut attrs = HashMap::new();
    attrs.insert("id".to_string(), Some("x".to_string()));
    let options = ParseOptions::new().with_attrs(attrs);
    let tables = html_table_takeout::parse_html_with(html, &options).unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].inner_text(), "1");
}

#[test]
fn link_extraction_is_opt_in_per_row_group() {
    let html = "<table><tr><td>a<a href='#h'>b</a></td></tr></table>";

    let options = ParseOptions::new().with_extract_links(LinkGroup::Tbody);
    let tables = html_table_takeout::parse_html_with(html, &options).unwrap();
    assert_eq!(
        tables[0].rows[0].cells[0].elements,
        vec![
            InlineElement::Text("a".into()),
            InlineElement::Link {
                href: "#h".into(),
                text: "b".into()
            }
        ]
    );

    let tables = html_table_takeout::parse_html(html).unwrap();
    assert_eq!(
        tables[0].rows[0].cells[0].elements,
        vec![InlineElement::Text("a".into()), InlineElement::Text("b".into())]
    );
}

#[test]
fn nested_table_is_linked_by_ref_with_innermost_id_zero() {
    let html = "<table><tr><td>outer<table><tr><td>inner</td></tr></table></td></tr></table>";
    let tables = html_table_takeout::parse_html(html).unwrap();
    assert_eq!(tables.len(), 1);
    let outer = &tables[0];
    assert_eq!(outer.id, 1);
    match &outer.rows[0].cells[0].elements[..] {
        [InlineElement::Text(t), InlineElement::Ref(inner)] => {
            assert_eq!(t, "outer");
            assert_eq!(inner.borrow().id, 0);
        }
        other => panic!("unexpected elements: {other:?}"),
    }
}

#[test]
fn colspan_is_capped_at_one_thousand() {
    let tables = html_table_takeout::parse_html("<table><tr><td colspan='1001'>0</td></tr></table>").unwrap();
    assert_eq!(tables[0].rows[0].cells.len(), 1000);
}

#[test]
fn unclosed_table_recovers_two_rows() {
    let html = "<table><tr><td>1\n<td>2\n<tr><td>3\n<td>4</table>";
    let tables = html_table_takeout::parse_html(html).unwrap();
    assert_eq!(tables[0].rows.len(), 2);
    assert_eq!(tables[0].rows[0].cells.len(), 2);
    // Trailing newline from the unclosed tag is trimmed per cell by inner_text.
    assert_eq!(tables[0].inner_text(), "1 2\n3 4");
}

#[test]
fn empty_table_properties() {
    let tables = html_table_takeout::parse_html("<table></table>").unwrap();
    let t = &tables[0];
    assert_eq!(t.to_csv(), "");
    assert_eq!(t.inner_text(), "");
    assert_eq!(t.max_width(), 0);
    assert!(!t.is_rectangular());
    assert_eq!(t.to_html(4), "<table data-table-id='0'>\n</table>");
}

#[test]
fn ragged_table_rectangify_pads_short_rows() {
    let html = "<table><tr><td>1</td><td>2</td><td>3</td></tr><tr><td>4</td></tr></table>";
    let tables = html_table_takeout::parse_html(html).unwrap();
    let mut t = tables.into_iter().next().unwrap();
    assert_eq!(t.max_width(), 3);
    assert!(!t.is_rectangular());
    t.rectangify();
    assert!(t.is_rectangular());
    assert_eq!(t.rows[1].cells.len(), 3);
}

#[test]
fn triple_nested_tables_get_ids_bottom_up_and_outer_shape_ignores_refs() {
    let html = "<table><tr><td>outer\
        <table><tr><td>middle\
            <table><tr><td>inner</td></tr></table>\
        </td></tr></table>\
    </td></tr></table>";
    let tables = html_table_takeout::parse_html(html).unwrap();
    assert_eq!(tables.len(), 1);
    let outer = &tables[0];
    assert_eq!(outer.id, 2);
    assert_eq!(outer.max_width(), 1);
    assert!(outer.is_rectangular());

    let InlineElement::Ref(middle) = &outer.rows[0].cells[0].elements[1] else {
        panic!("expected a Ref");
    };
    assert_eq!(middle.borrow().id, 1);
    let InlineElement::Ref(inner) = &middle.borrow().rows[0].cells[0].elements[1] else {
        panic!("expected a Ref");
    };
    assert_eq!(inner.borrow().id, 0);
}

#[test]
fn displayed_only_elides_hidden_rows_and_cells() {
    let html = "<table><tr><td>a</td><td style='display:none'>b</td></tr><tr style='display:none'><td>c</td></tr></table>";
    let options = ParseOptions::new().with_displayed_only(true);
    let tables = html_table_takeout::parse_html_with(html, &options).unwrap();
    assert_eq!(tables[0].rows.len(), 1);
    assert_eq!(tables[0].rows[0].cells.len(), 1);
    assert_eq!(tables[0].inner_text(), "a");
}

#[test]
fn match_predicate_keeps_ancestor_of_a_matching_nested_table() {
    let html = "<table><tr><td>outer<table><tr><td>needle</td></tr></table></td></tr></table><table><tr><td>unrelated</td></tr></table>";
    let options = ParseOptions::new().with_match(Matcher::Literal("needle".into()));
    let tables = html_table_takeout::parse_html_with(html, &options).unwrap();
    assert_eq!(tables.len(), 1);
    assert!(tables[0].inner_text().contains("outer"));
}

#[test]
fn to_csv_quotes_fields_with_commas_quotes_and_newlines() {
    let html = "<table><tr><td>a,b</td><td>say \"hi\"</td><td>line1\nline2</td></tr></table>";
    let tables = html_table_takeout::parse_html(html).unwrap();
    let csv = tables[0].to_csv();
    assert_eq!(csv, "\"a,b\",\"say \"\"hi\"\"\",\"line1\nline2\"\n");
}

#[test]
fn inner_text_preserves_interior_whitespace_and_trims_only_ends() {
    let html = "<table><tr><td>  1 2\n3\n\n4 5  </td></tr></table>";
    let tables = html_table_takeout::parse_html(html).unwrap();
    assert_eq!(tables[0].inner_text(), "1 2\n3\n\n4 5");
}

fn cell_text_grid(table: &html_table_takeout::Table) -> Vec<Vec<String>> {
    table
        .rows
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|c| {
                    c.elements
                        .iter()
                        .map(|e| match e {
                            InlineElement::Text(t) => t.clone(),
                            _ => String::new(),
                        })
                        .collect::<String>()
                })
                .collect()
        })
        .collect()
}
