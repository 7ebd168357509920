//! Custom `genpdf` elements used by the statement layout.
//!
//! This module adds a fixed-height spacer, helpers for loading a width-scaled
//! logo image and a framed table whose header row is repeated on every page the
//! table spans.

use std::path::Path;

use image::GenericImageView;

use genpdf::elements::{FrameCellDecorator, Image, Paragraph, TableLayout};
use genpdf::error::{Context as _, Error, ErrorKind};
use genpdf::style::Style;
use genpdf::{render, Alignment, Element, Margins, Mm, Position, RenderResult, Scale, Size};

use crate::model::{Cell, HorizontalAlignment, Table};

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;

/// Vertical padding applied above and below cell text; together with the 8 pt
/// line this yields rows of roughly 10 mm.
const CELL_VERTICAL_PADDING_MM: f64 = 3.0;
const CELL_HORIZONTAL_PADDING_MM: f64 = 1.0;

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

/// Maps the content model alignment onto `genpdf`.
pub fn alignment(value: HorizontalAlignment) -> Alignment {
    match value {
        HorizontalAlignment::Left => Alignment::Left,
        HorizontalAlignment::Center => Alignment::Center,
        HorizontalAlignment::Right => Alignment::Right,
    }
}

fn estimated_image_size(image: &image::DynamicImage, dpi: f64) -> Size {
    let (px_width, px_height) = image.dimensions();
    let width_mm = MM_PER_INCH * (px_width as f64) / dpi;
    let height_mm = MM_PER_INCH * (px_height as f64) / dpi;
    Size::new(width_mm, height_mm)
}

/// Loads an image from the given path using the [`image`] crate with descriptive errors.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<image::DynamicImage, Error> {
    let path = path.as_ref();
    let reader = image::io::Reader::open(path)
        .with_context(|| format!("Failed to open image file {}", path.display()))?;
    reader
        .with_guessed_format()
        .context("Unable to determine image format")?
        .decode()
        .with_context(|| format!("Failed to decode image file {}", path.display()))
}

/// Loads the image at `path` and scales it to `width_mm`, keeping the aspect ratio.
///
/// The natural size is estimated at 300 DPI, which is what `genpdf` assumes for
/// unscaled images.
pub fn scaled_image_from_path(path: impl AsRef<Path>, width_mm: f64) -> Result<Image, Error> {
    let dynamic = decode_image_from_path(path)?;
    let natural = mm_to_f64(estimated_image_size(&dynamic, DEFAULT_IMAGE_DPI).width);
    let mut image = Image::from_dynamic_image(dynamic)?;
    image.set_alignment(Alignment::Left);
    if natural > f64::EPSILON {
        let scale = width_mm / natural;
        image.set_scale(Scale::new(scale, scale));
    }
    Ok(image)
}

/// Empty vertical space of a fixed height.
///
/// At the bottom of a page the spacer shrinks to the remaining height instead
/// of pushing the next element onto a new page.
pub struct Spacer {
    height: Mm,
}

impl Spacer {
    pub fn new(height_mm: f64) -> Self {
        Self {
            height: Mm::from(height_mm),
        }
    }
}

impl Element for Spacer {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let available = area.size().height;
        let height = if self.height > available {
            available
        } else {
            self.height
        };

        let mut result = RenderResult::default();
        result.size = Size::new(0, height);
        Ok(result)
    }
}

fn cell_element(cell: &Cell, style: Style) -> impl Element {
    let mut paragraph = Paragraph::new(cell.text());
    paragraph.set_alignment(alignment(cell.alignment()));
    paragraph.styled(style).padded(Margins::trbl(
        CELL_VERTICAL_PADDING_MM,
        CELL_HORIZONTAL_PADDING_MM,
        CELL_VERTICAL_PADDING_MM,
        CELL_HORIZONTAL_PADDING_MM,
    ))
}

fn table_layout<'a, I>(weights: &[usize], rows: I, style: Style) -> Result<TableLayout, Error>
where
    I: IntoIterator<Item = &'a [Cell]>,
{
    let mut layout = TableLayout::new(weights.to_vec());
    layout.set_cell_decorator(FrameCellDecorator::new(true, true, true));
    for cells in rows {
        let mut row = layout.row();
        for cell in cells {
            row.push_element(cell_element(cell, style));
        }
        row.push()?;
    }
    Ok(layout)
}

/// A framed table that draws its header row at the top of every page it spans.
pub struct HeaderedTable {
    weights: Vec<usize>,
    header: Vec<Cell>,
    body: TableLayout,
    style: Style,
    has_rows: bool,
    stalled: bool,
}

impl HeaderedTable {
    /// Builds the element from a content model table.
    pub fn new(table: &Table) -> Result<Self, Error> {
        let weights = table.column_weights();
        let style = Style::new().with_font_size(table.font_size());
        let body = table_layout(&weights, table.rows().iter().map(Vec::as_slice), style)?;

        Ok(Self {
            weights,
            header: table.header(),
            body,
            style,
            has_rows: !table.rows().is_empty(),
            stalled: false,
        })
    }
}

impl Element for HeaderedTable {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();

        let mut header = table_layout(&self.weights, [self.header.as_slice()], self.style)?;
        let header_result = header.render(context, area.clone(), style)?;
        if header_result.has_more {
            result.has_more = true;
            return Ok(result);
        }
        result.size = result.size.stack_vertical(header_result.size);

        if !self.has_rows {
            return Ok(result);
        }

        area.add_offset(Position::new(0, header_result.size.height));
        let body_result = self.body.render(context, area, style)?;
        result.size = result.size.stack_vertical(body_result.size);
        result.has_more = body_result.has_more;

        let progressed = mm_to_f64(body_result.size.height) > 0.0;
        if body_result.has_more && !progressed {
            if self.stalled {
                return Err(Error::new(
                    "Table row does not fit on an empty page",
                    ErrorKind::PageSizeExceeded,
                ));
            }
            self.stalled = true;
        } else {
            self.stalled = false;
        }

        Ok(result)
    }
}
