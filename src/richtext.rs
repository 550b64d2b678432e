//! Styled text fragments used by the report layout.
//!
//! A [`Span`] carries the handful of style attributes the destination report needs (bold weight,
//! font size and color) without referencing a rendered document.  Spans are converted into
//! [`genpdf`] styled strings right before the elements are pushed into a document.

use genpdf::style::{Color, Style, StyledString};

/// A slice of text together with inline style attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Span {
    text: String,
    bold: bool,
    font_size: Option<u8>,
    color: Option<Color>,
}

impl Span {
    /// Creates a new span with the provided text and no styles applied.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Returns the raw text contained in this span.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the span should be rendered in bold.
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Returns the explicit font size in points, if any.
    pub fn font_size(&self) -> Option<u8> {
        self.font_size
    }

    /// Returns the configured color for the span, if any.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Sets the bold flag and returns the updated span.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Sets the font size and returns the updated span.
    pub fn with_font_size(mut self, font_size: impl Into<Option<u8>>) -> Self {
        self.font_size = font_size.into();
        self
    }

    /// Sets the span color and returns the updated span.
    pub fn with_color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }

    /// Convenience shorthand that marks the span as bold.
    pub fn bold(self) -> Self {
        self.with_bold(true)
    }

    /// Convenience shorthand that assigns a font size to the span.
    pub fn sized(self, font_size: u8) -> Self {
        self.with_font_size(Some(font_size))
    }

    /// Convenience shorthand that assigns a color to the span.
    pub fn colored(self, color: Color) -> Self {
        self.with_color(Some(color))
    }

    /// Builds a [`Style`] representation for the span.
    pub fn to_style(&self) -> Style {
        let mut style = Style::new();
        if let Some(color) = self.color {
            style.set_color(color);
        }
        if let Some(font_size) = self.font_size {
            style.set_font_size(font_size);
        }
        if self.bold {
            style.set_bold();
        }
        style
    }

    /// Converts the span to a [`StyledString`].
    pub fn to_styled_string(&self) -> StyledString {
        StyledString::new(self.text.clone(), self.to_style())
    }
}

impl From<&Span> for StyledString {
    fn from(span: &Span) -> Self {
        span.to_styled_string()
    }
}

impl From<Span> for StyledString {
    fn from(span: Span) -> Self {
        span.to_styled_string()
    }
}

impl From<&str> for Span {
    fn from(text: &str) -> Self {
        Span::new(text)
    }
}

impl From<String> for Span {
    fn from(text: String) -> Self {
        Span::new(text)
    }
}
