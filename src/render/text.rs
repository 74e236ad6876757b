//! `inner_text`, `to_csv`, `max_width`, `is_rectangular`, `rectangify`.
//!
//! `inner_text` and `to_csv` share one cell-text flattener that descends
//! into nested `Ref` tables (a `Ref`'s contribution is that nested table's
//! own `inner_text()`); the structural helpers below do not look through
//! `Ref` at all, by contrast, and only ever consider the root table's own
//! rows.

use crate::table::{InlineElement, TCell, Table};

/// A cell's own text: its `Text`/`Link.text` runs concatenated in order,
/// with a `Ref` replaced by that nested table's `inner_text()`, then the
/// whole result trimmed of leading/trailing whitespace. Interior whitespace,
/// including blank lines, is left exactly as written.
fn cell_text(cell: &TCell) -> String {
    let mut text = String::new();
    for el in &cell.elements {
        match el {
            InlineElement::Text(t) => text.push_str(t),
            InlineElement::Link { text: t, .. } => text.push_str(t),
            InlineElement::Break => {}
            InlineElement::Ref(table) => text.push_str(&inner_text(&table.borrow())),
        }
    }
    text.trim().to_string()
}

pub(crate) fn inner_text(table: &Table) -> String {
    table
        .rows
        .iter()
        .map(|row| row.cells.iter().map(cell_text).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn to_csv(table: &Table) -> String {
    let mut out = String::new();
    for row in &table.rows {
        let fields: Vec<String> = row.cells.iter().map(|c| csv_field(&cell_text(c))).collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

pub(crate) fn max_width(table: &Table) -> usize {
    table.rows.iter().map(|row| row.cells.len()).max().unwrap_or(0)
}

pub(crate) fn is_rectangular(table: &Table) -> bool {
    let Some(first) = table.rows.first() else {
        return false;
    };
    let width = first.cells.len();
    width > 0 && table.rows.iter().all(|row| row.cells.len() == width)
}

pub(crate) fn rectangify(table: &mut Table) {
    let width = max_width(table);
    if width == 0 {
        return;
    }
    for row in &mut table.rows {
        while row.cells.len() < width {
            row.cells.push(TCell::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{RowGroup, TRow};

    fn cell(elements: Vec<InlineElement>) -> TCell {
        TCell::new(false, elements)
    }

    #[test]
    fn inner_text_trims_per_cell_but_preserves_interior_blank_lines() {
        let table = Table::new(
            0,
            vec![
                TRow::new(
                    RowGroup::Tbody,
                    vec![
                        cell(vec![InlineElement::Text("   1   \n".into())]),
                        cell(vec![InlineElement::Text("2   ".into())]),
                    ],
                ),
                TRow::new(
                    RowGroup::Tbody,
                    vec![
                        cell(vec![
                            InlineElement::Text("\n3\n\n".into()),
                            InlineElement::Text("4".into()),
                        ]),
                        cell(vec![InlineElement::Text("   5   ".into())]),
                    ],
                ),
            ],
        );
        assert_eq!(inner_text(&table), "1 2\n3\n\n4 5");
    }

    #[test]
    fn inner_text_descends_into_nested_ref() {
        let inner = Table::shared(
            0,
            vec![TRow::new(
                RowGroup::Tbody,
                vec![cell(vec![InlineElement::Text("7".into())])],
            )],
        );
        let outer = Table::new(
            1,
            vec![TRow::new(
                RowGroup::Tbody,
                vec![cell(vec![
                    InlineElement::Text("1".into()),
                    InlineElement::Ref(inner),
                ])],
            )],
        );
        assert_eq!(inner_text(&outer), "17");
    }

    #[test]
    fn to_csv_quotes_fields_with_commas_quotes_or_newlines() {
        let table = Table::new(
            0,
            vec![TRow::new(
                RowGroup::Tbody,
                vec![
                    cell(vec![InlineElement::Text("a,b".into())]),
                    cell(vec![InlineElement::Text(r#"say "hi""#.into())]),
                ],
            )],
        );
        assert_eq!(to_csv(&table), "\"a,b\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn to_csv_empty_table_is_empty_string() {
        assert_eq!(to_csv(&Table::new(0, vec![])), "");
    }

    #[test]
    fn to_csv_row_with_no_cells_still_emits_a_blank_line() {
        let table = Table::new(0, vec![TRow::new(RowGroup::Tbody, vec![])]);
        assert_eq!(to_csv(&table), "\n");
    }

    #[test]
    fn max_width_ignores_nested_ref_tables() {
        let inner = Table::shared(
            0,
            vec![TRow::new(
                RowGroup::Tbody,
                vec![cell(vec![]), cell(vec![]), cell(vec![])],
            )],
        );
        let outer = Table::new(
            1,
            vec![TRow::new(
                RowGroup::Tbody,
                vec![cell(vec![InlineElement::Ref(inner)])],
            )],
        );
        assert_eq!(max_width(&outer), 1);
    }

    #[test]
    fn is_rectangular_requires_nonempty_equal_width_rows() {
        assert!(!is_rectangular(&Table::new(0, vec![])));
        assert!(!is_rectangular(&Table::new(
            0,
            vec![TRow::new(RowGroup::Tbody, vec![])]
        )));
        assert!(is_rectangular(&Table::new(
            0,
            vec![TRow::new(RowGroup::Tbody, vec![cell(vec![])])]
        )));
    }

    #[test]
    fn rectangify_pads_ragged_rows_but_is_noop_on_all_empty_rows() {
        let mut table = Table::new(
            0,
            vec![
                TRow::new(RowGroup::Tbody, vec![cell(vec![])]),
                TRow::new(RowGroup::Tbody, vec![cell(vec![]), cell(vec![])]),
            ],
        );
        rectangify(&mut table);
        assert_eq!(table.rows[0].cells.len(), 2);

        let mut empty = Table::new(
            0,
            vec![TRow::new(RowGroup::Tbody, vec![]), TRow::new(RowGroup::Tbody, vec![])],
        );
        rectangify(&mut empty);
        assert!(empty.rows.iter().all(|r| r.cells.is_empty()));
    }
}
