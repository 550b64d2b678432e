//! Document construction helpers.

use std::path::{Path, PathBuf};

use genpdf::{Margins, PaperSize, SimplePageDecorator, Size};
use thiserror::Error;

use crate::fonts;

type GenpdfError = genpdf::error::Error;

const DEFAULT_MARGINS_MM: i32 = 10;

/// Failures raised while producing a PDF document.
#[derive(Debug, Error)]
pub enum PdfBuildError {
    #[error("failed to load fonts for the document")]
    FontLoad(#[source] GenpdfError),
    #[error("failed to lay out the document content")]
    Layout(#[source] GenpdfError),
    #[error("failed to serialize the document")]
    Render(#[source] GenpdfError),
}

/// Builder for `genpdf::Document` instances pre-configured with the crate defaults.
///
/// Every call to [`DocumentBuilder::build`] loads a fresh font family and returns an independent
/// document, so documents never share state.
#[derive(Clone, Debug)]
pub struct DocumentBuilder {
    paper_size: Size,
    margins: Margins,
    title: Option<String>,
    fonts_dir: Option<PathBuf>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4.into(),
            margins: Margins::from(DEFAULT_MARGINS_MM),
            title: None,
            fonts_dir: None,
        }
    }
}

impl DocumentBuilder {
    /// Creates a new builder instance with default settings (A4, 10 mm margins).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the paper size used for newly created documents.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = paper_size.into();
        self
    }

    /// Sets the page margins.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = margins.into();
        self
    }

    /// Sets the title stored in the PDF metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a font directory searched before the default locations.
    pub fn with_fonts_dir(mut self, fonts_dir: impl Into<PathBuf>) -> Self {
        self.fonts_dir = Some(fonts_dir.into());
        self
    }

    /// Returns the configured font directory override, if any.
    pub fn fonts_dir(&self) -> Option<&Path> {
        self.fonts_dir.as_deref()
    }

    /// Builds a fully configured `genpdf::Document` instance.
    pub fn build(&self) -> Result<genpdf::Document, PdfBuildError> {
        let font_family =
            fonts::default_font_family(self.fonts_dir()).map_err(PdfBuildError::FontLoad)?;
        let mut document = genpdf::Document::new(font_family);

        document.set_paper_size(self.paper_size);
        if let Some(title) = &self.title {
            document.set_title(title.clone());
        }

        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(self.margins);
        document.set_page_decorator(decorator);

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fonts_surface_as_font_load_error() {
        if fonts::fonts_available(None) {
            // A system family would be picked up regardless of the override.
            return;
        }

        let result = DocumentBuilder::new()
            .with_fonts_dir("/__destino_report_missing_fonts__")
            .build();
        assert!(matches!(result, Err(PdfBuildError::FontLoad(_))));
    }

    #[test]
    fn fonts_dir_override_is_kept() {
        let builder = DocumentBuilder::new().with_fonts_dir("/srv/fonts");
        assert_eq!(builder.fonts_dir(), Some(Path::new("/srv/fonts")));
    }
}
