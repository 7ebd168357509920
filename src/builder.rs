//! Turns a [`StatementDocument`] into PDF bytes with `genpdf`.

use genpdf::elements::{LinearLayout, Paragraph};
use genpdf::error::{Error, ErrorKind};
use genpdf::style::{self, Style};
use genpdf::{self, Alignment, Element, Margins, Mm, PageDecorator, PaperSize, Position, Size};
use log::debug;

use crate::elements::{self, HeaderedTable, Spacer};
use crate::error::PdfBuildError;
use crate::fonts::{self, FontOptions};
use crate::model::{Block, StatementDocument, TextBlock, TextStyle};

/// Margin applied on every side of each page, in millimetres.
pub const PAGE_MARGIN_MM: f64 = 10.0;

/// Height reserved for the page footer, in millimetres.
pub const FOOTER_HEIGHT_MM: f64 = 8.0;

const FOOTER_FONT_SIZE: u8 = 8;
const BASE_FONT_SIZE: u8 = 12;

/// Serialized PDF document.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
}

/// Builder for statement PDFs pre-configured with A4 paper and fixed margins.
#[derive(Clone, Debug)]
pub struct PdfBuilder {
    fonts: FontOptions,
    paper_size: Size,
    margins: Margins,
    footer_height: Mm,
}

impl Default for PdfBuilder {
    fn default() -> Self {
        Self {
            fonts: FontOptions::default(),
            paper_size: PaperSize::A4.into(),
            margins: Margins::all(PAGE_MARGIN_MM),
            footer_height: Mm::from(FOOTER_HEIGHT_MM),
        }
    }
}

impl PdfBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets where the font family is looked up.
    pub fn with_fonts(mut self, fonts: FontOptions) -> Self {
        self.fonts = fonts;
        self
    }

    /// Lays out `content` and serializes it to PDF bytes.
    ///
    /// Blocks are converted to elements first, so a missing logo is reported
    /// before any font is loaded.
    pub fn render(&self, content: &StatementDocument) -> Result<RenderedPdf, PdfBuildError> {
        let mut body = LinearLayout::vertical();
        for block in content.blocks() {
            push_block(&mut body, block)?;
        }

        let font_family = fonts::load_font_family(&self.fonts)
            .map_err(PdfBuildError::FontLoad)?;

        let mut document = genpdf::Document::new(font_family);
        document.set_title(content.title());
        document.set_paper_size(self.paper_size);
        document.set_font_size(BASE_FONT_SIZE);
        document.set_page_decorator(StatementPageDecorator::new(
            self.margins,
            content.footer().map(str::to_owned),
            self.footer_height,
        ));
        document.push(body);

        let mut bytes = Vec::new();
        document.render(&mut bytes).map_err(PdfBuildError::Render)?;
        debug!("Rendered '{}' ({} bytes)", content.title(), bytes.len());
        Ok(RenderedPdf { bytes })
    }
}

fn text_style(style: TextStyle) -> Style {
    let mut result = Style::new().with_font_size(style.size());
    if style.is_bold() {
        result.set_bold();
    }
    if style.is_italic() {
        result.set_italic();
    }
    result
}

fn text_line(text: &str, style: TextStyle) -> impl Element {
    Paragraph::new(text).styled(text_style(style))
}

fn push_block(layout: &mut LinearLayout, block: &Block) -> Result<(), PdfBuildError> {
    match block {
        Block::Logo(logo) => {
            let image = elements::scaled_image_from_path(logo.path(), logo.width_mm())
                .map_err(|source| PdfBuildError::Logo {
                    path: logo.path().to_path_buf(),
                    source,
                })?;
            layout.push(image);
        }
        Block::Line(text) => layout.push(text_line(text.text(), text.style())),
        Block::Wrapped(text) => push_wrapped(layout, text),
        Block::Spacing(height) => layout.push(Spacer::new(*height)),
        Block::Table(table) => {
            layout.push(HeaderedTable::new(table).map_err(PdfBuildError::Render)?);
        }
    }
    Ok(())
}

fn push_wrapped(layout: &mut LinearLayout, text: &TextBlock) {
    for line in text.lines() {
        layout.push(text_line(line, text.style()));
    }
}

/// Applies the page margins and prints the footer with the page number.
struct StatementPageDecorator {
    page: usize,
    margins: Margins,
    footer: Option<String>,
    footer_height: Mm,
}

impl StatementPageDecorator {
    fn new(margins: Margins, footer: Option<String>, footer_height: Mm) -> Self {
        Self {
            page: 0,
            margins,
            footer,
            footer_height,
        }
    }

    fn footer_text(&self) -> String {
        match self.footer.as_deref() {
            Some(footer) if !footer.is_empty() => {
                format!("{} · Page {}", footer, self.page)
            }
            _ => format!("Page {}", self.page),
        }
    }
}

impl PageDecorator for StatementPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        style: style::Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        self.page += 1;
        area.add_margins(self.margins);

        let available = area.size().height;
        if self.footer_height > available {
            return Err(Error::new(
                "Footer height exceeds available space",
                ErrorKind::InvalidData,
            ));
        }

        let mut footer_area = area.clone();
        footer_area.add_offset(Position::new(0, available - self.footer_height));
        let mut footer = Paragraph::new(self.footer_text());
        footer.set_alignment(Alignment::Right);
        let result = footer
            .styled(Style::new().italic().with_font_size(FOOTER_FONT_SIZE))
            .render(context, footer_area, style)?;
        if result.has_more {
            return Err(Error::new(
                "Footer does not fit into the reserved space",
                ErrorKind::PageSizeExceeded,
            ));
        }

        area.set_height(available - self.footer_height);
        Ok(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LogoBlock;

    #[test]
    fn footer_numbers_pages() {
        let mut decorator = StatementPageDecorator::new(
            Margins::all(PAGE_MARGIN_MM),
            Some("Current 12345678".to_owned()),
            Mm::from(FOOTER_HEIGHT_MM),
        );
        decorator.page = 3;
        assert_eq!(decorator.footer_text(), "Current 12345678 · Page 3");
    }

    #[test]
    fn empty_footer_prints_page_only() {
        let mut decorator = StatementPageDecorator::new(
            Margins::all(PAGE_MARGIN_MM),
            Some(String::new()),
            Mm::from(FOOTER_HEIGHT_MM),
        );
        decorator.page = 1;
        assert_eq!(decorator.footer_text(), "Page 1");
    }

    #[test]
    fn missing_logo_is_reported_before_fonts_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("logo.png");
        let mut document = StatementDocument::new("statement");
        document.push(Block::Logo(LogoBlock::new(&logo, 30.0)));

        let fonts = FontOptions::default()
            .with_directory(Some(dir.path().to_path_buf()))
            .with_family("Missing");
        let err = PdfBuilder::new().with_fonts(fonts).render(&document).unwrap_err();

        assert!(
            matches!(&err, PdfBuildError::Logo { path, .. } if *path == logo),
            "{err:?}"
        );
    }

    #[test]
    fn text_style_maps_flags() {
        let style = text_style(TextStyle::bold(16));
        assert!(style.is_bold());
        assert!(!style.is_italic());
        assert_eq!(style.font_size(), 16);
    }
}
