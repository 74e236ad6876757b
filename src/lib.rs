// html-table-takeout — extracts HTML `<table>` elements into a normalized,
// navigable data structure.
//
// Architecture:
//   source → acquire → HTML text → tokenizer → extractor (+ span expander)
//                                → filter → identity pass → Vec<Table>
//
// Rendering (`to_html`, `to_csv`, `inner_text`, ...) operates on the
// returned `Table` values independently of the pipeline above; see `render`.

mod acquire;
mod error;
mod parse;
pub mod table;
mod render;

use std::collections::HashMap;

pub use error::TableTakeoutError;
pub use table::{InlineElement, RowGroup, TCell, TRow, Table, TableRef};

/// Extract every table from `source` using default options.
///
/// `source` may be an `http://`/`https://` URL, a filesystem path, or
/// literal HTML text — see [`acquire`] for the exact resolution order.
///
/// # Examples
///
/// ```
/// let tables = html_table_takeout::parse_html("<table><tr><td>1</td></tr></table>").unwrap();
/// assert_eq!(tables.len(), 1);
/// ```
pub fn parse_html(source: &str) -> Result<Vec<Table>, TableTakeoutError> {
    parse_html_with(source, &ParseOptions::default())
}

/// Extract every table from `source`, applying `options`'s predicates.
///
/// # Examples
///
/// ```
/// use html_table_takeout::{parse_html_with, ParseOptions, Matcher};
///
/// let options = ParseOptions::new().with_match(Matcher::Literal("apples".into()));
/// let tables = parse_html_with(
///     "<table><tr><td>apples</td></tr></table><table><tr><td>oranges</td></tr></table>",
///     &options,
/// )
/// .unwrap();
/// assert_eq!(tables.len(), 1);
/// ```
pub fn parse_html_with(source: &str, options: &ParseOptions) -> Result<Vec<Table>, TableTakeoutError> {
    let html = acquire::acquire(source)?;
    let refs = parse::parse(&html, options);
    Ok(refs
        .into_iter()
        .map(|r| match std::rc::Rc::try_unwrap(r) {
            Ok(cell) => cell.into_inner(),
            Err(shared) => shared.borrow().clone(),
        })
        .collect())
}

/// A textual match predicate: either a plain substring test or a compiled
/// regular expression (search, not full-match, semantics).
#[derive(Debug, Clone)]
pub enum Matcher {
    Literal(String),
    Pattern(regex::Regex),
}

impl Matcher {
    /// A table's effectively-empty text never matches, even an empty literal
    /// (an empty needle otherwise matches any text, per `str::contains`).
    pub(crate) fn is_match(&self, text: &str) -> bool {
        match self {
            Matcher::Literal(needle) => !text.is_empty() && text.contains(needle.as_str()),
            Matcher::Pattern(re) => re.is_match(text),
        }
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Matcher::Literal(a), Matcher::Literal(b)) => a == b,
            (Matcher::Pattern(a), Matcher::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

/// Which row-group(s) anchors are extracted as [`InlineElement::Link`] from;
/// anchors outside the selected group(s) collapse to plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkGroup {
    Thead,
    Tbody,
    Tfoot,
    All,
}

/// Builder for [`parse_html_with`]'s predicates.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub(crate) text_match: Option<Matcher>,
    pub(crate) attrs: Option<HashMap<String, Option<String>>>,
    pub(crate) displayed_only: bool,
    pub(crate) extract_links: Option<LinkGroup>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only tables whose own text matches, or whose ancestor/descendant
    /// (through nested `Ref`s) matches.
    pub fn with_match(mut self, matcher: Matcher) -> Self {
        self.text_match = Some(matcher);
        self
    }

    /// Keep only tables whose `<table>` start tag carries every given
    /// attribute with the given value. `None` matches only a bare attribute.
    pub fn with_attrs(mut self, attrs: HashMap<String, Option<String>>) -> Self {
        self.attrs = Some(attrs);
        self
    }

    /// When `true`, elide any table/row/cell whose inline `style` parses to
    /// `display: none`.
    pub fn with_displayed_only(mut self, yes: bool) -> Self {
        self.displayed_only = yes;
        self
    }

    /// Extract anchors within the given row-group as [`InlineElement::Link`].
    pub fn with_extract_links(mut self, group: LinkGroup) -> Self {
        self.extract_links = Some(group);
        self
    }
}
