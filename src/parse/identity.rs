//! Materializes the surviving `BuildNode` forest into the public, `Rc`-linked
//! [`crate::table::Table`] tree, stamping ids in depth-first post-order: a
//! table only receives its id once every nested table reachable through its
//! own cells has already received one.

use super::extractor::{BuildNode, Elem};
use crate::table::{InlineElement, TCell, TRow, Table, TableRef};

pub(crate) fn link(nodes: Vec<BuildNode>, top_level: &[usize], survives: &[bool]) -> Vec<TableRef> {
    let mut nodes: Vec<Option<BuildNode>> = nodes.into_iter().map(Some).collect();
    let mut materialized: Vec<Option<TableRef>> = vec![None; nodes.len()];
    let mut next_id = 0usize;

    top_level
        .iter()
        .filter_map(|&idx| materialize(idx, &mut nodes, survives, &mut materialized, &mut next_id))
        .collect()
}

fn materialize(
    idx: usize,
    nodes: &mut [Option<BuildNode>],
    survives: &[bool],
    materialized: &mut [Option<TableRef>],
    next_id: &mut usize,
) -> Option<TableRef> {
    if let Some(existing) = &materialized[idx] {
        return Some(existing.clone());
    }
    if !survives[idx] {
        return None;
    }
    let node = nodes[idx].take().expect("a node is materialized at most once");

    let rows = node
        .rows
        .into_iter()
        .map(|row| {
            let cells = row
                .cells
                .into_iter()
                .map(|cell| {
                    let elements = cell
                        .elements
                        .into_iter()
                        .map(|el| link_elem(el, nodes, survives, materialized, next_id))
                        .collect();
                    TCell::new(cell.header, elements)
                })
                .collect();
            TRow::new(row.group, cells)
        })
        .collect();

    let id = *next_id;
    *next_id += 1;
    let table = Table::shared(id, rows);
    materialized[idx] = Some(table.clone());
    Some(table)
}

fn link_elem(
    el: Elem,
    nodes: &mut [Option<BuildNode>],
    survives: &[bool],
    materialized: &mut [Option<TableRef>],
    next_id: &mut usize,
) -> InlineElement {
    match el {
        Elem::Text(t) => InlineElement::Text(t),
        Elem::Break => InlineElement::Break,
        Elem::Link { href, text } => InlineElement::Link { href, text },
        // A filtered-out nested table leaves its placeholder dangling; the
        // link is severed, not erased from the cell's element order.
        Elem::Ref(child_idx) => match materialize(child_idx, nodes, survives, materialized, next_id) {
            Some(table) => InlineElement::Ref(table),
            None => InlineElement::Text(String::new()),
        },
    }
}
