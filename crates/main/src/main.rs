use std::error::Error;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use destino_report::builder::DocumentBuilder;
use destino_report::fonts;
use destino_report::handler::{ReportRequestHandler, REPORT_FILENAME};
use destino_report::http;
use destino_report::report::DestinationTableDocumentBuilder;
use destino_report::source::{DestinationSource, JsonFileDestinations};
use log::{info, warn};

/// Serves or renders the destination PDF report.
///
/// Fonts are looked up in `--fonts-dir`, then `DESTINO_REPORT_FONTS_DIR`, then `assets/fonts`
/// next to the binary, then well-known system font directories.
#[derive(Parser)]
#[command(author, version, about = "Destination report exporter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve `GET /api/destino/reporte` over HTTP.
    Serve {
        /// Address to listen on.
        #[arg(long, env = "DESTINO_REPORT_BIND", default_value = "127.0.0.1:8080")]
        bind: SocketAddr,

        /// JSON file holding the destination records.
        #[arg(long, env = "DESTINO_REPORT_DATA")]
        data: PathBuf,

        /// Directory holding the Roboto font files.
        #[arg(long, env = "DESTINO_REPORT_FONTS_DIR")]
        fonts_dir: Option<PathBuf>,
    },

    /// Render the report for a data file once and write it to disk.
    Render {
        /// JSON file holding the destination records.
        #[arg(long, env = "DESTINO_REPORT_DATA")]
        data: PathBuf,

        /// Output path of the PDF.
        #[arg(long, default_value = REPORT_FILENAME)]
        output: PathBuf,

        /// Directory holding the Roboto font files.
        #[arg(long, env = "DESTINO_REPORT_FONTS_DIR")]
        fonts_dir: Option<PathBuf>,
    },
}

fn report_builder(fonts_dir: Option<PathBuf>) -> DestinationTableDocumentBuilder {
    let mut document = DocumentBuilder::new();
    if let Some(fonts_dir) = fonts_dir {
        document = document.with_fonts_dir(fonts_dir);
    }
    if !fonts::fonts_available(document.fonts_dir()) {
        warn!("No usable font family found; report requests will fail until fonts are installed");
    }
    DestinationTableDocumentBuilder::new(document)
}

async fn serve(
    bind: SocketAddr,
    data: PathBuf,
    fonts_dir: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let handler = ReportRequestHandler::new(
        Arc::new(JsonFileDestinations::new(data)),
        Arc::new(report_builder(fonts_dir)),
    );

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Listening on http://{}{}", bind, http::REPORT_ROUTE);
    axum::serve(listener, http::router(handler)).await?;
    Ok(())
}

fn render(data: PathBuf, output: PathBuf, fonts_dir: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let destinations = JsonFileDestinations::new(data).find_all()?;
    let bytes = report_builder(fonts_dir).build(&destinations)?;
    fs::write(&output, &bytes)?;
    println!(
        "Generated {} ({} destinations, {} bytes)",
        output.display(),
        destinations.len(),
        bytes.len()
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            bind,
            data,
            fonts_dir,
        } => serve(bind, data, fonts_dir).await,
        Commands::Render {
            data,
            output,
            fonts_dir,
        } => render(data, output, fonts_dir),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
