//! Rendering of the destination table report.

use chrono::{DateTime, Local};
use genpdf::elements::{Break, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::Element as _;
use log::debug;

use crate::builder::{DocumentBuilder, PdfBuildError};
use crate::elements::ShadedCell;
use crate::model::{Destination, DestinationReport, RichParagraph, COLUMN_COUNT, REPORT_TITLE};

const CELL_PADDING_MM: i32 = 1;

/// Turns a list of destinations into a serialized document.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, destinations: &[Destination]) -> Result<Vec<u8>, PdfBuildError>;
}

/// Produces the "Reporte de Destinos Turísticos" PDF: a centered title, a right-aligned date line
/// and a framed five-column table with a shaded header row.
#[derive(Clone, Debug)]
pub struct DestinationTableDocumentBuilder {
    document: DocumentBuilder,
}

impl Default for DestinationTableDocumentBuilder {
    fn default() -> Self {
        Self::new(DocumentBuilder::new())
    }
}

impl DestinationTableDocumentBuilder {
    /// Creates a report builder on top of the given document settings.
    pub fn new(document: DocumentBuilder) -> Self {
        Self {
            document: document.with_title(REPORT_TITLE),
        }
    }

    /// Builds the report stamped with the current local time.
    pub fn build(&self, destinations: &[Destination]) -> Result<Vec<u8>, PdfBuildError> {
        self.build_at(destinations, Local::now())
    }

    /// Builds the report stamped with `generated_at`.
    pub fn build_at(
        &self,
        destinations: &[Destination],
        generated_at: DateTime<Local>,
    ) -> Result<Vec<u8>, PdfBuildError> {
        let report = DestinationReport::new(destinations, generated_at);
        self.render_report(&report)
    }

    /// Lays out and serializes an already assembled report.
    pub fn render_report(&self, report: &DestinationReport) -> Result<Vec<u8>, PdfBuildError> {
        let mut document = self.document.build()?;

        document.push(paragraph(report.title()));
        document.push(Break::new(1));
        document.push(paragraph(report.date_line()));
        document.push(Break::new(1));
        document.push(table(report)?);

        let mut bytes = Vec::new();
        document.render(&mut bytes).map_err(PdfBuildError::Render)?;

        debug!(
            "Rendered destination report with {} rows ({} bytes)",
            report.rows().len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

impl DocumentRenderer for DestinationTableDocumentBuilder {
    fn render(&self, destinations: &[Destination]) -> Result<Vec<u8>, PdfBuildError> {
        self.build(destinations)
    }
}

fn paragraph(content: &RichParagraph) -> Paragraph {
    let mut paragraph = Paragraph::default();
    for span in content.spans() {
        paragraph.push(span.to_styled_string());
    }
    paragraph.set_alignment(content.alignment().into());
    paragraph
}

fn table(report: &DestinationReport) -> Result<TableLayout, PdfBuildError> {
    let mut table = TableLayout::new(vec![1; COLUMN_COUNT]);
    table.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    let mut header = table.row();
    for label in report.header() {
        header.push_element(ShadedCell::new(DestinationReport::header_span(label)));
    }
    header.push().map_err(PdfBuildError::Layout)?;

    for row in report.rows() {
        let mut table_row = table.row();
        for cell in row.cells() {
            table_row.push_element(Paragraph::new(cell.as_str()).padded(CELL_PADDING_MM));
        }
        table_row.push().map_err(PdfBuildError::Layout)?;
    }

    Ok(table)
}
