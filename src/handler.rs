//! The report request boundary: fetch every destination, render, describe the download.

use std::sync::Arc;

use log::info;
use thiserror::Error;

use crate::builder::PdfBuildError;
use crate::report::DocumentRenderer;
use crate::source::{DestinationSource, SourceError};

/// Media type of the rendered report.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// File name suggested to the client for the download.
pub const REPORT_FILENAME: &str = "reporte_destinos.pdf";

/// Why a report request failed.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("fetching destinations failed")]
    Fetch(#[from] SourceError),
    #[error("building the destination report failed")]
    Document(#[from] PdfBuildError),
}

/// A finished report ready to be sent as an attachment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportPayload {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: &'static str,
}

impl ReportPayload {
    fn pdf(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_type: PDF_CONTENT_TYPE,
            filename: REPORT_FILENAME,
        }
    }

    /// Value of the `Content-Disposition` header.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

/// Serves report requests with an injected data source and renderer.
#[derive(Clone)]
pub struct ReportRequestHandler {
    source: Arc<dyn DestinationSource>,
    renderer: Arc<dyn DocumentRenderer>,
}

impl ReportRequestHandler {
    pub fn new(source: Arc<dyn DestinationSource>, renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self { source, renderer }
    }

    /// Fetches all destinations once and renders them.
    ///
    /// The renderer is not invoked when the fetch fails.  No output is returned on failure.
    pub fn handle_report_request(&self) -> Result<ReportPayload, ReportError> {
        let destinations = self.source.find_all()?;
        let bytes = self.renderer.render(&destinations)?;

        info!(
            "Generated destination report: {} destinations, {} bytes",
            destinations.len(),
            bytes.len()
        );
        Ok(ReportPayload::pdf(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Destination;
    use crate::source::InMemoryDestinations;
    use genpdf::error::{Error, ErrorKind};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FailingSource;

    impl DestinationSource for FailingSource {
        fn find_all(&self) -> Result<Vec<Destination>, SourceError> {
            Err(SourceError::Unavailable("database offline".into()))
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        calls: AtomicUsize,
        seen: Mutex<Vec<Destination>>,
    }

    impl DocumentRenderer for RecordingRenderer {
        fn render(&self, destinations: &[Destination]) -> Result<Vec<u8>, PdfBuildError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen.lock().unwrap() = destinations.to_vec();
            Ok(b"%PDF-1.3 stub".to_vec())
        }
    }

    struct BrokenRenderer;

    impl DocumentRenderer for BrokenRenderer {
        fn render(&self, _destinations: &[Destination]) -> Result<Vec<u8>, PdfBuildError> {
            Err(PdfBuildError::Render(Error::new(
                "writer closed",
                ErrorKind::InvalidData,
            )))
        }
    }

    fn destinations() -> Vec<Destination> {
        vec![
            Destination::new(1, "Machu Picchu", "Inca citadel", "Cusco", "/img/mp.jpg"),
            Destination::new(2, "Chan Chan", "Ciudad de barro", "Trujillo", "/img/cc.jpg"),
        ]
    }

    #[test]
    fn success_returns_pdf_attachment() {
        let renderer = Arc::new(RecordingRenderer::default());
        let handler = ReportRequestHandler::new(
            Arc::new(InMemoryDestinations::new(destinations())),
            renderer.clone(),
        );

        let payload = handler.handle_report_request().unwrap();

        assert_eq!(payload.bytes, b"%PDF-1.3 stub");
        assert_eq!(payload.content_type, "application/pdf");
        assert_eq!(
            payload.content_disposition(),
            "attachment; filename=\"reporte_destinos.pdf\""
        );
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*renderer.seen.lock().unwrap(), destinations());
    }

    #[test]
    fn fetch_failure_skips_rendering() {
        let renderer = Arc::new(RecordingRenderer::default());
        let handler = ReportRequestHandler::new(Arc::new(FailingSource), renderer.clone());

        let err = handler.handle_report_request().unwrap_err();

        assert!(matches!(
            err,
            ReportError::Fetch(SourceError::Unavailable(_))
        ));
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn render_failure_is_document_error() {
        let handler = ReportRequestHandler::new(
            Arc::new(InMemoryDestinations::default()),
            Arc::new(BrokenRenderer),
        );

        let err = handler.handle_report_request().unwrap_err();
        assert!(matches!(err, ReportError::Document(PdfBuildError::Render(_))));
    }

    #[test]
    fn each_request_fetches_again() {
        let renderer = Arc::new(RecordingRenderer::default());
        let handler = ReportRequestHandler::new(
            Arc::new(InMemoryDestinations::new(destinations())),
            renderer.clone(),
        );

        handler.handle_report_request().unwrap();
        handler.handle_report_request().unwrap();
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 2);
    }
}
