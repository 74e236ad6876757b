//! `to_html`: row-group-wrapped, indented HTML, with nested `Ref` tables
//! collapsed to a single dense line regardless of the outer indent.

use super::escape::escape;
use crate::table::{InlineElement, RowGroup, TCell, TRow, Table};

const GROUPS: [RowGroup; 3] = [RowGroup::Thead, RowGroup::Tbody, RowGroup::Tfoot];

pub(crate) fn render(table: &Table, indent: usize) -> String {
    let mut out = format!("<table data-table-id='{}'>\n", table.id);
    render_groups(&table.rows, indent, false, &mut out);
    out.push_str("</table>");
    out
}

fn render_groups(rows: &[TRow], indent: usize, dense: bool, out: &mut String) {
    for group in GROUPS {
        let matching: Vec<&TRow> = rows.iter().filter(|r| r.group == group).collect();
        if matching.is_empty() {
            continue;
        }
        out.push_str(&format!("<{}>", group.tag_name()));
        if !dense {
            out.push('\n');
        }
        for row in matching {
            render_row(row, indent, dense, out);
        }
        out.push_str(&format!("</{}>", group.tag_name()));
        if !dense {
            out.push('\n');
        }
    }
}

fn render_row(row: &TRow, indent: usize, dense: bool, out: &mut String) {
    if !dense {
        out.push_str(&" ".repeat(indent));
    }
    out.push_str("<tr>");
    if !dense {
        out.push('\n');
    }
    for cell in &row.cells {
        render_cell(cell, indent, dense, out);
    }
    if !dense {
        out.push_str(&" ".repeat(indent));
    }
    out.push_str("</tr>");
    if !dense {
        out.push('\n');
    }
}

fn render_cell(cell: &TCell, indent: usize, dense: bool, out: &mut String) {
    let tag = if cell.header { "th" } else { "td" };
    if !dense {
        out.push_str(&" ".repeat(indent * 2));
    }
    out.push_str(&format!("<{tag}>"));
    for el in &cell.elements {
        render_inline(el, out);
    }
    out.push_str(&format!("</{tag}>"));
    if !dense {
        out.push('\n');
    }
}

/// A `Text` element's embedded `\n` is equivalent to an implicit `Break` for
/// rendering purposes: it becomes a literal `<br/>`, not a raw newline.
fn render_text(text: &str, out: &mut String) {
    out.push_str(&escape(text).replace('\n', "<br/>"));
}

fn render_inline(el: &InlineElement, out: &mut String) {
    match el {
        InlineElement::Text(t) => render_text(t, out),
        InlineElement::Break => out.push_str("<br/>"),
        InlineElement::Link { href, text } => {
            out.push_str("<a href='");
            out.push_str(&escape(href));
            out.push_str("'>");
            out.push_str(&escape(text));
            out.push_str("</a>");
        }
        InlineElement::Ref(table) => {
            let table = table.borrow();
            out.push_str(&format!("<table data-table-id='{}'>", table.id));
            render_groups(&table.rows, 0, true, out);
            out.push_str("</table>");
        }
    }
}
