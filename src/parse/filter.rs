//! Post-expansion filtering.
//!
//! Two independent passes: `prune_hidden` drops rows/cells whose own inline
//! `style` is `display: none` (table-level display elision is folded into
//! survival below, since it interacts with `Ref` severing the same way the
//! text/attrs predicates do); `compute_survival` decides, per table node,
//! whether it is kept at all.

use std::collections::HashMap;

use super::extractor::{BuildNode, Elem};
use crate::Matcher;

pub(crate) struct Predicates<'a> {
    pub displayed_only: bool,
    pub text_match: Option<&'a Matcher>,
    pub attrs: Option<&'a HashMap<String, Option<String>>>,
}

pub(crate) fn prune_hidden(nodes: &mut [BuildNode], displayed_only: bool) {
    if !displayed_only {
        return;
    }
    for node in nodes {
        node.rows.retain(|row| !row.hidden);
        for row in &mut node.rows {
            row.cells.retain(|cell| !cell.hidden);
        }
    }
}

/// Direct text of a table, ignoring anything reachable only through a `Ref`.
fn own_text(node: &BuildNode) -> String {
    let mut text = String::new();
    for row in &node.rows {
        for cell in &row.cells {
            for el in &cell.elements {
                match el {
                    Elem::Text(t) => text.push_str(t),
                    Elem::Link { text: t, .. } => text.push_str(t),
                    Elem::Break | Elem::Ref(_) => {}
                }
            }
        }
    }
    text
}

fn own_text_matches(node: &BuildNode, matcher: &Matcher) -> bool {
    matcher.is_match(own_text(node).trim())
}

fn own_attrs_match(node: &BuildNode, required: &HashMap<String, Option<String>>) -> bool {
    required.iter().all(|(name, expected)| {
        node.attrs
            .get(name)
            .is_some_and(|actual| actual == expected.as_deref())
    })
}

/// Computes, for every node, whether it survives all predicates.
///
/// `displayed_only` table elision is NOT propagated along the nesting chain
/// (only the table's own style matters); textual and attribute matches
/// propagate bidirectionally: a matching descendant keeps its ancestors
/// alive, and a matching ancestor keeps its descendants alive.
pub(crate) fn compute_survival(nodes: &[BuildNode], predicates: &Predicates) -> Vec<bool> {
    let n = nodes.len();

    let mut displayed_survives = vec![true; n];
    if predicates.displayed_only {
        for (i, node) in nodes.iter().enumerate() {
            if node.attrs.is_display_none() {
                displayed_survives[i] = false;
            }
        }
    }

    let text_survives = match predicates.text_match {
        Some(matcher) => {
            let own: Vec<bool> = nodes.iter().map(|n| own_text_matches(n, matcher)).collect();
            propagate(nodes, &own)
        }
        None => vec![true; n],
    };

    let attrs_survives = match predicates.attrs {
        Some(required) => {
            let own: Vec<bool> = nodes.iter().map(|n| own_attrs_match(n, required)).collect();
            propagate(nodes, &own)
        }
        None => vec![true; n],
    };

    (0..n)
        .map(|i| displayed_survives[i] && text_survives[i] && attrs_survives[i])
        .collect()
}

fn propagate(nodes: &[BuildNode], own: &[bool]) -> Vec<bool> {
    let mut survives = own.to_vec();
    for (i, &matched) in own.iter().enumerate() {
        if !matched {
            continue;
        }
        let mut parent = nodes[i].parent;
        while let Some(idx) = parent {
            survives[idx] = true;
            parent = nodes[idx].parent;
        }
        mark_descendants(nodes, i, &mut survives);
    }
    survives
}

fn mark_descendants(nodes: &[BuildNode], idx: usize, survives: &mut [bool]) {
    for &child in &nodes[idx].children {
        survives[child] = true;
        mark_descendants(nodes, child, survives);
    }
}
