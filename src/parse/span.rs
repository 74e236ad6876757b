//! Rowspan/colspan materialization.
//!
//! Takes the raw per-table row list the extractor produced (one entry per
//! source `<tr>`, cells still carrying their own span values) and emits rows
//! whose cells fill the logical grid: each source cell is copied `colspan`
//! times across a row and `rowspan` times down subsequent rows, with an
//! "overflow" grid carrying wide/tall cells forward. Overflow never survives
//! a row-group boundary.

use super::extractor::{Elem, ExCell, ExRow, RawCell, RawRow};

const MAX_COLSPAN: u32 = 1000;
const MAX_ROWSPAN: u32 = 65534;

#[derive(Clone)]
struct Overflow {
    remaining: u32,
    header: bool,
    hidden: bool,
    elements: Vec<Elem>,
}

pub(crate) fn expand(rows: Vec<RawRow>) -> Vec<ExRow> {
    let mut out = Vec::with_capacity(rows.len());
    let mut start = 0;
    while start < rows.len() {
        let group = rows[start].group;
        let mut end = start;
        while end < rows.len() && rows[end].group == group {
            end += 1;
        }
        expand_run(&rows[start..end], &mut out);
        start = end;
    }
    out
}

fn expand_run(run: &[RawRow], out: &mut Vec<ExRow>) {
    // Reset per run: overflow never crosses a thead/tbody/tfoot boundary.
    let mut overflow: Vec<Option<Overflow>> = Vec::new();

    for (row_idx, row) in run.iter().enumerate() {
        let mut cells = Vec::new();
        let mut col = 0usize;
        let mut source = row.cells.iter().peekable();

        while col < overflow.len() || source.peek().is_some() {
            if col < overflow.len() {
                if let Some(ov) = overflow[col].as_ref() {
                    cells.push(ExCell {
                        header: ov.header,
                        hidden: ov.hidden,
                        elements: ov.elements.clone(),
                    });
                    if ov.remaining > 1 {
                        overflow[col].as_mut().unwrap().remaining -= 1;
                    } else {
                        overflow[col] = None;
                    }
                    col += 1;
                    continue;
                }
            }

            let Some(cell) = source.next() else {
                // No overflow at this column, no more source cells: this is
                // an empty gap between overflowed columns, not a stopping point.
                col += 1;
                continue;
            };

            let width = cell.colspan.clamp(1, MAX_COLSPAN) as usize;
            let rows_left = (run.len() - row_idx) as u32;
            let height = if cell.rowspan == 0 {
                rows_left.min(MAX_ROWSPAN)
            } else {
                cell.rowspan.min(MAX_ROWSPAN)
            };

            for i in 0..width {
                let c = col + i;
                if c >= overflow.len() {
                    overflow.resize_with(c + 1, || None);
                }
                cells.push(ExCell {
                    header: cell.header,
                    hidden: cell.hidden,
                    elements: cell.elements.clone(),
                });
                if height > 1 {
                    overflow[c] = Some(Overflow {
                        remaining: height - 1,
                        header: cell.header,
                        hidden: cell.hidden,
                        elements: cell.elements.clone(),
                    });
                }
            }
            col += width;
        }

        out.push(ExRow {
            group: row.group,
            hidden: row.hidden,
            cells,
        });
    }
}

fn raw_cell(colspan: u32, rowspan: u32, text: &str) -> RawCell {
    RawCell {
        header: false,
        colspan,
        rowspan,
        hidden: false,
        elements: vec![Elem::Text(text.to_string())],
    }
}
