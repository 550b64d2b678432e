//! Element implementations built on top of `genpdf` primitives.
//!
//! `genpdf` has no notion of a cell background, so [`ShadedCell`] paints one with densely stacked
//! strokes before printing its text on top.

use genpdf::error::Error;
use genpdf::style::{Color, Style, StyledString};
use genpdf::{render, Element, Mm, Position, RenderResult, Size};

/// Light gray used for table header backgrounds.
pub const LIGHT_GRAY: Color = Color::Greyscale(192);

const DEFAULT_CELL_PADDING_MM: f64 = 1.0;
// Strokes are about 0.35 mm wide; a smaller step leaves no gaps.
const SHADE_STROKE_STEP_MM: f64 = 0.25;

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

/// A single line of text printed over a filled background.
///
/// Meant for short labels such as table headers.  The cell takes the full width of the area it is
/// rendered into and is as tall as one line of its text plus the padding on both sides.  Text is
/// never wrapped: anything wider than the cell runs past its right edge.
pub struct ShadedCell {
    text: StyledString,
    background: Color,
    padding: Mm,
}

impl ShadedCell {
    /// Creates a cell with the default light gray background.
    pub fn new(text: impl Into<StyledString>) -> Self {
        Self {
            text: text.into(),
            background: LIGHT_GRAY,
            padding: mm_from_f64(DEFAULT_CELL_PADDING_MM),
        }
    }

    /// Sets the background color and returns the updated cell.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Sets the padding applied on every side and returns the updated cell.
    pub fn with_padding(mut self, padding: impl Into<Mm>) -> Self {
        self.padding = padding.into();
        self
    }

    fn paint_background(&self, area: &render::Area<'_>, width: Mm, height: Mm) {
        let fill = Style::new().with_color(self.background);
        let height = mm_to_f64(height);
        let mut offset = SHADE_STROKE_STEP_MM / 2.0;
        while offset < height {
            let y = mm_from_f64(offset);
            area.draw_line(vec![Position::new(0, y), Position::new(width, y)], fill);
            offset += SHADE_STROKE_STEP_MM;
        }
    }
}

impl Element for ShadedCell {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let text_style = style.and(self.text.style);
        let line_height = text_style.line_height(&context.font_cache);
        let height = line_height + self.padding + self.padding;
        let width = area.size().width;

        if height > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        // Background first so the text lands on top of it.
        self.paint_background(&area, width, height);

        match area.text_section(
            &context.font_cache,
            Position::new(self.padding, self.padding),
            text_style,
        ) {
            Some(mut section) => section.print_str(&self.text.s, text_style)?,
            None => {
                result.has_more = true;
                return Ok(result);
            }
        }

        result.size = Size::new(width, height);
        Ok(result)
    }
}
