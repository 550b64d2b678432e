//! PDF export of tourism destination records.
//!
//! [`handler::ReportRequestHandler`] fetches every destination from an injected
//! [`source::DestinationSource`] and hands them to a [`report::DocumentRenderer`];
//! [`http::router`] exposes it as `GET /api/destino/reporte`.

pub mod builder;
pub mod elements;
pub mod fonts;
pub mod handler;
pub mod http;
pub mod model;
pub mod report;
pub mod richtext;
pub mod source;
