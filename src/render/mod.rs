//! Rendering operations on [`Table`]: HTML serialization, CSV export, and
//! plain-text extraction. Structural helpers (`max_width`, `is_rectangular`,
//! `rectangify`) live alongside the text-flattening ones but never look
//! through a nested `Ref`; see `text` for why `inner_text`/`to_csv` do.

mod escape;
mod html;
mod text;

use crate::table::Table;

impl Table {
    /// Serializes this table (and, inline and densely, every nested table
    /// reachable through it) to HTML. `indent` controls only this table's
    /// own `<tr>`/cell indentation; nested tables always render dense.
    pub fn to_html(&self, indent: usize) -> String {
        html::render(self, indent)
    }

    /// One CSV line per row. See [`text::to_csv`] for quoting rules.
    pub fn to_csv(&self) -> String {
        text::to_csv(self)
    }

    /// All `Text`/`Link.text` content, including that of nested tables,
    /// flattened to one string.
    pub fn inner_text(&self) -> String {
        text::inner_text(self)
    }

    /// Maximum cell count across this table's own rows. Does not look
    /// through `Ref`.
    pub fn max_width(&self) -> usize {
        text::max_width(self)
    }

    /// True iff every row of this table (not counting nested `Ref`s) has
    /// the same nonzero cell count.
    pub fn is_rectangular(&self) -> bool {
        text::is_rectangular(self)
    }

    /// Pads every row of this table up to `max_width()` with empty cells.
    /// No-op when `max_width() == 0`.
    pub fn rectangify(&mut self) {
        text::rectangify(self)
    }
}
