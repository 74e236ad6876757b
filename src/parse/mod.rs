//! The parsing pipeline: tokenize → extract & span-expand → filter → link.
//!
//! Each stage is its own module and operates on progressively more refined
//! data: [`tokenizer`] turns bytes into a flat token stream, [`extractor`]
//! turns that into a forest of unlinked [`extractor::BuildNode`]s (rowspan
//! and colspan already materialized per table, via [`span`]), [`filter`]
//! decides which nodes survive the caller's predicates, and [`identity`]
//! stamps ids and converts survivors into the public, `Rc`-linked
//! [`crate::table::Table`] tree.

pub(crate) mod attributes;
pub(crate) mod extractor;
mod filter;
mod identity;
mod span;
mod tokenizer;

use crate::table::TableRef;
use crate::ParseOptions;

/// Runs the full pipeline over `html` according to `options`.
pub(crate) fn parse(html: &str, options: &ParseOptions) -> Vec<TableRef> {
    let (mut nodes, top_level) = extractor::extract(html, options.extract_links);
    filter::prune_hidden(&mut nodes, options.displayed_only);

    let predicates = filter::Predicates {
        displayed_only: options.displayed_only,
        text_match: options.text_match.as_ref(),
        attrs: options.attrs.as_ref(),
    };
    let survives = filter::compute_survival(&nodes, &predicates);

    #[cfg(feature = "tracing")]
    for &idx in &top_level {
        if !survives[idx] {
            tracing::debug!(table_index = idx, "top-level table discarded by filter");
        }
    }

    identity::link(nodes, &top_level, &survives)
}
