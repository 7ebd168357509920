//! Data structures describing the logical content of a statement PDF.
//!
//! The renderer produces a [`StatementDocument`] made of ordered [`Block`]
//! values.  The types deliberately avoid referencing `genpdf` so the layout can
//! be inspected in tests without loading fonts; [`crate::builder`] maps them
//! onto `genpdf` elements.

use std::path::{Path, PathBuf};

/// Horizontal placement of text inside a line or table cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
    /// Right aligned content.
    Right,
}

/// Font style and size of a text block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    bold: bool,
    italic: bool,
    size: u8,
}

impl TextStyle {
    /// Regular text at the given point size.
    pub const fn regular(size: u8) -> Self {
        Self {
            bold: false,
            italic: false,
            size,
        }
    }

    /// Bold text at the given point size.
    pub const fn bold(size: u8) -> Self {
        Self {
            bold: true,
            italic: false,
            size,
        }
    }

    /// Italic text at the given point size.
    pub const fn italic(size: u8) -> Self {
        Self {
            bold: false,
            italic: true,
            size,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn is_italic(&self) -> bool {
        self.italic
    }

    /// Font size in points.
    pub fn size(&self) -> u8 {
        self.size
    }
}

/// A run of text rendered with a single style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBlock {
    text: String,
    style: TextStyle,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }

    /// Splits the text on explicit line breaks, keeping empty lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n').map(|line| line.trim_end_matches('\r'))
    }
}

/// Logo image placed at the top of the first page.
#[derive(Clone, Debug, PartialEq)]
pub struct LogoBlock {
    path: PathBuf,
    width_mm: f64,
}

impl LogoBlock {
    pub fn new(path: impl Into<PathBuf>, width_mm: f64) -> Self {
        Self {
            path: path.into(),
            width_mm,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rendered width in millimetres; the height follows the aspect ratio.
    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }
}

/// Column definition of a [`Table`].
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    title: String,
    width_mm: f64,
    header_alignment: HorizontalAlignment,
}

impl Column {
    pub fn new(
        title: impl Into<String>,
        width_mm: f64,
        header_alignment: HorizontalAlignment,
    ) -> Self {
        Self {
            title: title.into(),
            width_mm,
            header_alignment,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }

    pub fn header_alignment(&self) -> HorizontalAlignment {
        self.header_alignment
    }
}

/// A single table cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    text: String,
    alignment: HorizontalAlignment,
}

impl Cell {
    /// Creates a left aligned cell.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alignment: HorizontalAlignment::Left,
        }
    }

    /// Creates a right aligned cell, used for monetary values.
    pub fn right(text: impl Into<String>) -> Self {
        Self::new(text).with_alignment(HorizontalAlignment::Right)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    /// Sets the alignment and returns the updated cell.
    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// A framed table with a header row that repeats on every page it spans.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
    font_size: u8,
}

impl Table {
    pub fn new(columns: Vec<Column>, font_size: u8) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            font_size,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn font_size(&self) -> u8 {
        self.font_size
    }

    /// Appends a row.  Rows shorter than the column list are padded with empty
    /// cells and longer rows are cut to the column count.
    pub fn push_row(&mut self, cells: impl IntoIterator<Item = Cell>) {
        let mut row: Vec<Cell> = cells.into_iter().take(self.columns.len()).collect();
        row.resize_with(self.columns.len(), Cell::default);
        self.rows.push(row);
    }

    /// Appends a row and returns the updated table.
    pub fn with_row(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
        self.push_row(cells);
        self
    }

    /// Header cells derived from the column definitions.
    pub fn header(&self) -> Vec<Cell> {
        self.columns
            .iter()
            .map(|column| Cell::new(column.title()).with_alignment(column.header_alignment()))
            .collect()
    }

    /// Column widths expressed as integer layout weights.
    pub fn column_weights(&self) -> Vec<usize> {
        self.columns
            .iter()
            .map(|column| column.width_mm().round().max(1.0) as usize)
            .collect()
    }
}

/// Content blocks that make up the statement, in drawing order.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Logo image.
    Logo(LogoBlock),
    /// Single line of text.
    Line(TextBlock),
    /// Multi-line text wrapped to the page width; explicit `\n` starts a new line.
    Wrapped(TextBlock),
    /// Vertical gap in millimetres.
    Spacing(f64),
    /// Framed table.
    Table(Table),
}

impl Block {
    pub fn line(text: impl Into<String>, style: TextStyle) -> Self {
        Self::Line(TextBlock::new(text, style))
    }

    pub fn wrapped(text: impl Into<String>, style: TextStyle) -> Self {
        Self::Wrapped(TextBlock::new(text, style))
    }

    /// Returns the table carried by this block, if any.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }
}

/// Complete logical content of a rendered statement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatementDocument {
    title: String,
    footer: Option<String>,
    blocks: Vec<Block>,
}

impl StatementDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Document title stored in the PDF metadata.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Footer text printed before the page number on every page.
    pub fn footer(&self) -> Option<&str> {
        self.footer.as_deref()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Sets the footer text and returns the updated document.
    pub fn with_footer(mut self, footer: impl Into<Option<String>>) -> Self {
        self.footer = footer.into();
        self
    }

    /// Appends a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Iterates over the tables in drawing order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(Block::as_table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_columns() -> Table {
        Table::new(
            vec![
                Column::new("A", 40.0, HorizontalAlignment::Center),
                Column::new("B", 70.0, HorizontalAlignment::Left),
            ],
            8,
        )
    }

    #[test]
    fn short_rows_are_padded() {
        let table = two_columns().with_row([Cell::new("only")]);
        assert_eq!(table.rows()[0], vec![Cell::new("only"), Cell::default()]);
    }

    #[test]
    fn long_rows_are_cut() {
        let table =
            two_columns().with_row([Cell::new("a"), Cell::new("b"), Cell::new("c")]);
        assert_eq!(table.rows()[0].len(), 2);
    }

    #[test]
    fn header_follows_columns() {
        let header = two_columns().header();
        assert_eq!(header[0].text(), "A");
        assert_eq!(header[0].alignment(), HorizontalAlignment::Center);
        assert_eq!(header[1].alignment(), HorizontalAlignment::Left);
    }

    #[test]
    fn weights_follow_widths() {
        assert_eq!(two_columns().column_weights(), vec![40, 70]);
    }

    #[test]
    fn wrapped_text_splits_on_newlines() {
        let block = TextBlock::new("1 Main St\r\nSpringfield\n", TextStyle::regular(12));
        assert_eq!(
            block.lines().collect::<Vec<_>>(),
            vec!["1 Main St", "Springfield", ""]
        );
    }
}
