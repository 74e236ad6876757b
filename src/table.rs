//! The normalized table data model produced by [`crate::parse_html`].
//!
//! Mirrors the shape of the HTML it was extracted from: a [`Table`] holds
//! ordered [`TRow`]s, each holding ordered [`TCell`]s, each holding ordered
//! [`InlineElement`]s. Nested tables are linked by [`InlineElement::Ref`]
//! rather than copied, so a table reachable from more than one expanded cell
//! is the same shared allocation everywhere it appears.

use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a nested [`Table`].
///
/// `Rc<RefCell<_>>` gives the value-equality, shared-mutation semantics the
/// span expander relies on: duplicating a cell that holds a `Ref` duplicates
/// the handle, not the table, so later filling in the nested table's rows is
/// visible through every duplicate.
pub type TableRef = Rc<RefCell<Table>>;

/// A logical table extracted from HTML.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Stable within one `parse_html` call. Assigned depth-first, innermost
    /// nested tables first, so a table's id is always greater than every
    /// table reachable through its own cells.
    pub id: usize,
    pub rows: Vec<TRow>,
}

impl Table {
    pub fn new(id: usize, rows: Vec<TRow>) -> Self {
        Self { id, rows }
    }

    pub(crate) fn shared(id: usize, rows: Vec<TRow>) -> TableRef {
        Rc::new(RefCell::new(Self::new(id, rows)))
    }
}

/// Which row-group band a [`TRow`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowGroup {
    Thead,
    Tbody,
    Tfoot,
}

impl Default for RowGroup {
    fn default() -> Self {
        RowGroup::Tbody
    }
}

impl RowGroup {
    pub(crate) fn from_tag(name: &str) -> Option<Self> {
        match name {
            "thead" => Some(RowGroup::Thead),
            "tbody" => Some(RowGroup::Tbody),
            "tfoot" => Some(RowGroup::Tfoot),
            _ => None,
        }
    }

    pub(crate) fn tag_name(self) -> &'static str {
        match self {
            RowGroup::Thead => "thead",
            RowGroup::Tbody => "tbody",
            RowGroup::Tfoot => "tfoot",
        }
    }
}

/// One `<tr>`, after rowspan/colspan materialization.
#[derive(Debug, Clone, PartialEq)]
pub struct TRow {
    pub group: RowGroup,
    pub cells: Vec<TCell>,
}

impl Default for TRow {
    fn default() -> Self {
        Self {
            group: RowGroup::default(),
            cells: Vec::new(),
        }
    }
}

impl TRow {
    pub fn new(group: RowGroup, cells: Vec<TCell>) -> Self {
        Self { group, cells }
    }

    /// True iff the row has at least one cell and every direct cell is a
    /// header cell. Does not look through [`InlineElement::Ref`].
    pub fn contains_all_th(&self) -> bool {
        !self.cells.is_empty() && self.cells.iter().all(|c| c.header)
    }

    /// True iff this row reads like a header: it lives in `thead`, or every
    /// one of its direct cells is a header cell.
    pub fn is_header_like(&self) -> bool {
        self.group == RowGroup::Thead || self.contains_all_th()
    }
}

/// One `<td>` or `<th>`, after rowspan/colspan materialization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TCell {
    /// True iff the source tag was `<th>`.
    pub header: bool,
    pub elements: Vec<InlineElement>,
}

impl TCell {
    pub fn new(header: bool, elements: Vec<InlineElement>) -> Self {
        Self { header, elements }
    }
}

/// One piece of a cell's content, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineElement {
    /// Raw, entity-decoded character data. Whitespace is preserved verbatim.
    Text(String),
    /// A materialized `<br>`/`<br/>`.
    Break,
    /// An anchor, present only when link extraction was enabled for this
    /// cell's row group. `text` is the concatenation of all descendant text
    /// within the anchor.
    Link { href: String, text: String },
    /// A nested table. See [`TableRef`] for the sharing contract.
    Ref(TableRef),
}
