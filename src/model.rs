//! Data structures describing destinations and the logical content of their report.
//!
//! [`Destination`] is the record handed over by a [`crate::source::DestinationSource`].
//! [`DestinationReport`] is the renderer-independent content of one export: the title and date
//! paragraphs, the fixed header labels and one [`ReportRow`] per destination.  Keeping this layer
//! free of `genpdf` elements lets the row contents be inspected directly, which a rendered PDF with
//! embedded subset fonts does not allow.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

use crate::richtext::Span;

/// Title printed at the top of every destination report.
pub const REPORT_TITLE: &str = "Reporte de Destinos Turísticos";

/// Labels of the table header row, in column order.
pub const HEADER_LABELS: [&str; COLUMN_COUNT] =
    ["ID", "Nombre", "Descripción", "Ubicación", "Imagen"];

/// Number of columns of the destination table.
pub const COLUMN_COUNT: usize = 5;

/// Format of the timestamp printed on the date line.
pub const DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

const TITLE_FONT_SIZE: u8 = 18;
const BODY_FONT_SIZE: u8 = 12;

/// Identifier of a destination.  Records coming from JSON may use numeric or textual keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DestinationId {
    /// Numeric primary key.
    Numeric(i64),
    /// Textual key.
    Text(String),
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationId::Numeric(id) => write!(f, "{}", id),
            DestinationId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for DestinationId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for DestinationId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

impl From<String> for DestinationId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

// Missing or null text fields print as empty cells.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A tourism point of interest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    #[serde(alias = "idDestino")]
    pub id: DestinationId,
    #[serde(alias = "nombre", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(alias = "descripcion", default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(alias = "ubicacion", default, deserialize_with = "null_as_empty")]
    pub location: String,
    /// Reference to the destination picture.  Only the path text is reported.
    #[serde(alias = "imagenPath", default, deserialize_with = "null_as_empty")]
    pub image_path: String,
}

impl Destination {
    /// Creates a destination from its five fields.
    pub fn new(
        id: impl Into<DestinationId>,
        name: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        image_path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            location: location.into(),
            image_path: image_path.into(),
        }
    }
}

/// Horizontal placement of a paragraph.  Maps onto [`genpdf::Alignment`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl From<HorizontalAlignment> for genpdf::Alignment {
    fn from(alignment: HorizontalAlignment) -> Self {
        match alignment {
            HorizontalAlignment::Left => genpdf::Alignment::Left,
            HorizontalAlignment::Center => genpdf::Alignment::Center,
            HorizontalAlignment::Right => genpdf::Alignment::Right,
        }
    }
}

/// Styled paragraph with alignment metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RichParagraph {
    spans: Vec<Span>,
    alignment: HorizontalAlignment,
}

impl RichParagraph {
    /// Creates a left-aligned paragraph from the provided spans.
    pub fn new(spans: impl Into<Vec<Span>>) -> Self {
        Self {
            spans: spans.into(),
            ..Self::default()
        }
    }

    /// Returns the spans that make up the paragraph.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Returns the configured alignment.
    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    /// Returns the concatenated text of all spans.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(Span::text).collect()
    }

    /// Sets the alignment and returns the updated paragraph.
    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// One data row of the destination table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRow {
    cells: [String; COLUMN_COUNT],
}

impl ReportRow {
    /// Returns the cell texts in column order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

impl From<&Destination> for ReportRow {
    fn from(destination: &Destination) -> Self {
        Self {
            cells: [
                destination.id.to_string(),
                destination.name.clone(),
                destination.description.clone(),
                destination.location.clone(),
                destination.image_path.clone(),
            ],
        }
    }
}

/// Logical content of a destination report.
#[derive(Clone, Debug, PartialEq)]
pub struct DestinationReport {
    title: RichParagraph,
    date_line: RichParagraph,
    rows: Vec<ReportRow>,
}

impl DestinationReport {
    /// Builds the report content for `destinations`, stamped with `generated_at`.
    ///
    /// Rows keep the order of the input slice.  An empty slice yields a report with the title,
    /// the date line and the header only.
    pub fn new(destinations: &[Destination], generated_at: DateTime<Local>) -> Self {
        let title = RichParagraph::new(vec![Span::new(REPORT_TITLE).bold().sized(TITLE_FONT_SIZE)])
            .with_alignment(HorizontalAlignment::Center);

        let date_line = RichParagraph::new(vec![Span::new(format!(
            "Fecha: {}",
            generated_at.format(DATE_FORMAT)
        ))
        .sized(BODY_FONT_SIZE)])
        .with_alignment(HorizontalAlignment::Right);

        Self {
            title,
            date_line,
            rows: destinations.iter().map(ReportRow::from).collect(),
        }
    }

    pub fn title(&self) -> &RichParagraph {
        &self.title
    }

    pub fn date_line(&self) -> &RichParagraph {
        &self.date_line
    }

    /// Returns the header labels.
    pub fn header(&self) -> &'static [&'static str] {
        &HEADER_LABELS
    }

    /// Header style: bold at body size.
    pub fn header_span(label: &str) -> Span {
        Span::new(label).bold().sized(BODY_FONT_SIZE)
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 5, 17, 9, 30, 5)
            .single()
            .expect("unambiguous local time")
    }

    fn machu_picchu() -> Destination {
        Destination::new(1, "Machu Picchu", "Inca citadel", "Cusco", "/img/mp.jpg")
    }

    #[test]
    fn single_destination_scenario() {
        let report = DestinationReport::new(&[machu_picchu()], fixed_time());

        assert_eq!(report.title().plain_text(), "Reporte de Destinos Turísticos");
        assert_eq!(report.title().alignment(), HorizontalAlignment::Center);
        assert!(report.title().spans()[0].is_bold());
        assert_eq!(report.title().spans()[0].font_size(), Some(18));

        assert_eq!(report.date_line().plain_text(), "Fecha: 17/05/2024 09:30:05");
        assert_eq!(report.date_line().alignment(), HorizontalAlignment::Right);

        assert_eq!(
            report.header(),
            &["ID", "Nombre", "Descripción", "Ubicación", "Imagen"]
        );
        assert_eq!(report.rows().len(), 1);
        assert_eq!(
            report.rows()[0].cells(),
            &["1", "Machu Picchu", "Inca citadel", "Cusco", "/img/mp.jpg"]
        );
    }

    #[test]
    fn empty_input_yields_header_only() {
        let report = DestinationReport::new(&[], fixed_time());
        assert!(report.rows().is_empty());
        assert_eq!(report.header().len(), COLUMN_COUNT);
        assert!(report.date_line().plain_text().starts_with("Fecha: "));
    }

    #[test]
    fn rows_follow_input_order() {
        let destinations: Vec<_> = (1..=25)
            .rev()
            .map(|id| Destination::new(id, format!("Destino {id}"), "", "", ""))
            .collect();

        let report = DestinationReport::new(&destinations, fixed_time());

        assert_eq!(report.rows().len(), destinations.len());
        for (row, destination) in report.rows().iter().zip(&destinations) {
            assert_eq!(row.cells()[0], destination.id.to_string());
            assert_eq!(row.cells()[1], destination.name);
        }
    }

    #[test]
    fn id_cell_is_display_of_id() {
        let text = Destination::new("LIM-07", "Huacachina", "Oasis", "Ica", "");
        let negative = Destination::new(-3, "Colca", "Canyon", "Arequipa", "");

        let report = DestinationReport::new(&[text, negative], fixed_time());
        assert_eq!(report.rows()[0].cells()[0], "LIM-07");
        assert_eq!(report.rows()[1].cells()[0], "-3");
    }

    #[test]
    fn image_path_stays_literal_text() {
        let report = DestinationReport::new(&[machu_picchu()], fixed_time());
        assert_eq!(report.rows()[0].cells()[4], "/img/mp.jpg");
    }

    #[test]
    fn null_and_missing_text_fields_become_empty_cells() {
        let json = r#"[{"id": 4, "name": "Kuelap", "description": null, "location": "Amazonas"}]"#;

        let destinations: Vec<Destination> = serde_json::from_str(json).expect("valid json");
        assert_eq!(destinations[0].description, "");
        assert_eq!(destinations[0].image_path, "");

        let report = DestinationReport::new(&destinations, fixed_time());
        assert_eq!(report.rows()[0].cells(), &["4", "Kuelap", "", "Amazonas", ""]);
    }

    #[test]
    fn deserializes_english_and_spanish_field_names() {
        let json = r#"[
            {"id": 1, "name": "Machu Picchu", "description": "Inca citadel",
             "location": "Cusco", "imagePath": "/img/mp.jpg"},
            {"idDestino": "K-2", "nombre": "Kuelap", "descripcion": "Fortaleza",
             "ubicacion": "Amazonas", "imagenPath": "/img/kuelap.jpg"}
        ]"#;

        let destinations: Vec<Destination> = serde_json::from_str(json).expect("valid json");
        assert_eq!(destinations[0], machu_picchu());
        assert_eq!(destinations[1].id, DestinationId::Text("K-2".into()));
        assert_eq!(destinations[1].location, "Amazonas");
    }
}
