//! The table-context state machine: consumes a token stream and produces a
//! forest of build nodes, one per `<table>` encountered, still addressed by
//! index rather than by shared pointer. Turning surviving nodes into the
//! public, `Rc`-linked [`crate::table::Table`] tree is the job of
//! [`super::identity`]; this module only has to get the raw structure (rows,
//! row-groups, spans, nesting) right.

use super::attributes::Attributes;
use super::span;
use super::tokenizer::{Token, Tokenizer};
use crate::table::RowGroup;
use crate::LinkGroup;

/// One piece of still-unlinked cell content. `Ref` holds the index of the
/// nested table's [`BuildNode`] rather than a shared pointer — pointers are
/// only materialized once the identity pass knows which nodes survive.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Elem {
    Text(String),
    Break,
    Link { href: String, text: String },
    Ref(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct RawCell {
    pub header: bool,
    pub colspan: u32,
    pub rowspan: u32,
    pub hidden: bool,
    pub elements: Vec<Elem>,
}

#[derive(Debug, Clone)]
pub(crate) struct RawRow {
    pub group: RowGroup,
    pub hidden: bool,
    pub cells: Vec<RawCell>,
}

/// A row after span expansion: one real `<tr>` with its cells materialized.
#[derive(Debug, Clone)]
pub(crate) struct ExRow {
    pub group: RowGroup,
    pub hidden: bool,
    pub cells: Vec<ExCell>,
}

#[derive(Debug, Clone)]
pub(crate) struct ExCell {
    pub header: bool,
    pub hidden: bool,
    pub elements: Vec<Elem>,
}

/// One `<table>` as seen by the extractor, before identity/filtering.
pub(crate) struct BuildNode {
    pub attrs: Attributes,
    pub parent: Option<usize>,
    /// Nested tables reachable through this table's own cells, in document order.
    pub children: Vec<usize>,
    pub rows: Vec<ExRow>,
}

struct Anchor {
    href: String,
    text: String,
}

struct Frame {
    node_idx: usize,
    rows: Vec<RawRow>,
    current_group: RowGroup,
    current_row: Option<RawRow>,
    current_cell: Option<RawCell>,
    anchor: Option<Anchor>,
}

impl Frame {
    fn new(node_idx: usize) -> Self {
        Self {
            node_idx,
            rows: Vec::new(),
            current_group: RowGroup::Tbody,
            current_row: None,
            current_cell: None,
            anchor: None,
        }
    }

    fn ensure_row(&mut self) {
        if self.current_row.is_none() {
            self.current_row = Some(RawRow {
                group: self.current_group,
                hidden: false,
                cells: Vec::new(),
            });
        }
    }

    fn flush_cell(&mut self) {
        if let Some(cell) = self.current_cell.take() {
            self.ensure_row();
            self.current_row.as_mut().unwrap().cells.push(cell);
        }
    }

    fn flush_row(&mut self) {
        self.flush_cell();
        if let Some(row) = self.current_row.take() {
            self.rows.push(row);
        }
    }
}

fn parse_span(value: Option<&str>) -> u32 {
    match value {
        None => 1,
        Some(v) => v.trim().parse::<u32>().unwrap_or(1),
    }
}

fn link_group_matches(extract_links: Option<LinkGroup>, group: RowGroup) -> bool {
    match extract_links {
        None => false,
        Some(LinkGroup::All) => true,
        Some(LinkGroup::Thead) => group == RowGroup::Thead,
        Some(LinkGroup::Tbody) => group == RowGroup::Tbody,
        Some(LinkGroup::Tfoot) => group == RowGroup::Tfoot,
    }
}

fn resolve_anchor(extract_links: Option<LinkGroup>, group: RowGroup, anchor: Anchor) -> Elem {
    if link_group_matches(extract_links, group) {
        Elem::Link {
            href: anchor.href,
            text: anchor.text,
        }
    } else {
        Elem::Text(anchor.text)
    }
}

struct Extractor {
    nodes: Vec<BuildNode>,
    stack: Vec<Frame>,
    top_level: Vec<usize>,
    extract_links: Option<LinkGroup>,
}

impl Extractor {
    fn open_table(&mut self, attrs: Attributes) {
        let idx = self.nodes.len();
        let mut parent = None;

        if let Some(frame) = self.stack.last_mut() {
            if let Some(anchor) = frame.anchor.take() {
                if let Some(cell) = frame.current_cell.as_mut() {
                    let resolved = resolve_anchor(self.extract_links, frame.current_group, anchor);
                    cell.elements.push(resolved);
                    cell.elements.push(Elem::Ref(idx));
                    parent = Some(frame.node_idx);
                }
            } else if let Some(cell) = frame.current_cell.as_mut() {
                cell.elements.push(Elem::Ref(idx));
                parent = Some(frame.node_idx);
            }
        }

        self.nodes.push(BuildNode {
            attrs,
            parent,
            children: Vec::new(),
            rows: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p].children.push(idx),
            None => self.top_level.push(idx),
        }
        self.stack.push(Frame::new(idx));
    }

    fn close_table(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.finalize(frame);
        }
    }

    fn finalize(&mut self, mut frame: Frame) {
        frame.flush_row();
        self.nodes[frame.node_idx].rows = span::expand(frame.rows);
    }

    fn open_group(&mut self, group: RowGroup) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        frame.flush_row();
        frame.current_group = group;
    }

    fn close_group(&mut self) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        frame.flush_row();
        frame.current_group = RowGroup::Tbody;
    }

    fn open_row(&mut self, attrs: Attributes) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        frame.flush_row();
        frame.current_row = Some(RawRow {
            group: frame.current_group,
            hidden: attrs.is_display_none(),
            cells: Vec::new(),
        });
    }

    fn close_row(&mut self) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        frame.flush_row();
    }

    fn open_cell(&mut self, is_th: bool, attrs: Attributes) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        frame.flush_cell();
        frame.ensure_row();
        frame.current_cell = Some(RawCell {
            header: is_th,
            colspan: parse_span(attrs.get("colspan").flatten()),
            rowspan: parse_span(attrs.get("rowspan").flatten()),
            hidden: attrs.is_display_none(),
            elements: Vec::new(),
        });
    }

    fn close_cell(&mut self) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        frame.flush_cell();
    }

    fn open_anchor(&mut self, attrs: Attributes) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        if frame.current_cell.is_none() {
            return;
        }
        frame.anchor = Some(Anchor {
            href: attrs.get("href").flatten().unwrap_or("").to_string(),
            text: String::new(),
        });
    }

    fn close_anchor(&mut self) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        let Some(anchor) = frame.anchor.take() else {
            return;
        };
        if let Some(cell) = frame.current_cell.as_mut() {
            cell.elements
                .push(resolve_anchor(self.extract_links, frame.current_group, anchor));
        }
    }

    fn emit_break(&mut self) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        if frame.anchor.is_some() {
            return;
        }
        if let Some(cell) = frame.current_cell.as_mut() {
            cell.elements.push(Elem::Break);
        }
    }

    fn push_text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        if let Some(anchor) = frame.anchor.as_mut() {
            anchor.text.push_str(&text);
            return;
        }
        let Some(cell) = frame.current_cell.as_mut() else {
            return;
        };
        match cell.elements.last_mut() {
            Some(Elem::Text(t)) => t.push_str(&text),
            _ => cell.elements.push(Elem::Text(text)),
        }
    }

    fn handle(&mut self, token: Token) {
        match token {
            Token::StartTag { name, attrs, .. } => match name.as_str() {
                "table" => self.open_table(attrs),
                "thead" | "tbody" | "tfoot" => {
                    self.open_group(RowGroup::from_tag(&name).expect("matched above"))
                }
                "tr" => self.open_row(attrs),
                "td" | "th" => self.open_cell(name == "th", attrs),
                "a" => self.open_anchor(attrs),
                "br" => self.emit_break(),
                _ => {}
            },
            Token::EndTag { name } => match name.as_str() {
                "table" => self.close_table(),
                "thead" | "tbody" | "tfoot" => self.close_group(),
                "tr" => self.close_row(),
                "td" | "th" => self.close_cell(),
                "a" => self.close_anchor(),
                _ => {}
            },
            Token::Text(text) => self.push_text(text),
            Token::Comment(_) | Token::Doctype => {}
        }
    }
}

/// Runs the tokenizer and state machine over `html`, returning every
/// `<table>` encountered (as [`BuildNode`]s, indexed by extraction order)
/// plus the indices of the top-level ones, in document order.
pub(crate) fn extract(html: &str, extract_links: Option<LinkGroup>) -> (Vec<BuildNode>, Vec<usize>) {
    let mut extractor = Extractor {
        nodes: Vec::new(),
        stack: Vec::new(),
        top_level: Vec::new(),
        extract_links,
    };
    for token in Tokenizer::new(html) {
        extractor.handle(token);
    }
    while let Some(frame) = extractor.stack.pop() {
        extractor.finalize(frame);
    }
    (extractor.nodes, extractor.top_level)
}
