//! Font resolution for the destination report.
//!
//! `genpdf` embeds TrueType fonts and ships none of its own, so every document needs a family
//! loaded from disk.  The bundled family is searched for in this order:
//!
//! 1. the directory passed explicitly (for example through the CLI `--fonts-dir` flag),
//! 2. the `DESTINO_REPORT_FONTS_DIR` environment variable,
//! 3. `assets/fonts` next to the running executable,
//! 4. `assets/fonts` under the crate manifest directory.
//!
//! When none of them hold the bundled files, well-known system families are tried: Liberation Sans
//! on Linux distributions and Arial on Windows.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{self, FontData, FontFamily};
use log::{debug, warn};

/// Name of the bundled font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Roboto";

/// Environment variable pointing at a directory holding the bundled font files.
pub const FONTS_DIR_ENV: &str = "DESTINO_REPORT_FONTS_DIR";

const FONT_FILES: &[&str] = &[
    "Roboto-Regular.ttf",
    "Roboto-Bold.ttf",
    "Roboto-Italic.ttf",
    "Roboto-BoldItalic.ttf",
];

struct SystemFontFamily {
    name: &'static str,
    directories: &'static [&'static str],
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
}

const SYSTEM_FAMILIES: &[SystemFontFamily] = &[
    SystemFontFamily {
        name: "Liberation Sans",
        directories: &[
            "/usr/share/fonts/truetype/liberation",
            "/usr/share/fonts/truetype/liberation2",
            "/usr/share/fonts/liberation-sans",
            "/usr/share/fonts/liberation",
            "/usr/share/fonts/TTF",
        ],
        regular: "LiberationSans-Regular.ttf",
        bold: "LiberationSans-Bold.ttf",
        italic: "LiberationSans-Italic.ttf",
        bold_italic: "LiberationSans-BoldItalic.ttf",
    },
    SystemFontFamily {
        name: "Arial",
        directories: &["C:\\Windows\\Fonts"],
        regular: "arial.ttf",
        bold: "arialbd.ttf",
        italic: "ariali.ttf",
        bold_italic: "arialbi.ttf",
    },
];

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn push_unique(candidates: &mut Vec<PathBuf>, candidate: PathBuf) {
    if !candidates.iter().any(|existing| existing == &candidate) {
        candidates.push(candidate);
    }
}

fn font_directory_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = explicit {
        push_unique(&mut candidates, path.to_path_buf());
    }

    if let Some(path) = env_path(FONTS_DIR_ENV) {
        push_unique(&mut candidates, path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push_unique(&mut candidates, bin_dir.join("assets/fonts"));
        }
    }

    push_unique(
        &mut candidates,
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"),
    );

    candidates
}

fn missing_font_files(path: &Path) -> Vec<PathBuf> {
    FONT_FILES
        .iter()
        .map(|name| path.join(name))
        .filter(|candidate| !candidate.is_file())
        .collect()
}

fn resolve_font_directory(explicit: Option<&Path>) -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates(explicit) {
        let exists = candidate.is_dir();
        let missing = missing_font_files(&candidate);

        if exists && missing.is_empty() {
            return Ok(candidate);
        }

        let reason = if !exists {
            format!("directory missing at {}", candidate.display())
        } else {
            let missing_list = missing
                .iter()
                .map(|path| path.file_name().unwrap_or_default().to_string_lossy())
                .collect::<Vec<_>>()
                .join(", ");
            format!("missing files [{}]", missing_list)
        };

        attempts.push(format!("{} ({})", candidate.display(), reason));
    }

    Err(Error::new(
        format!(
            "Unable to locate bundled font directory. Checked: {}. Set {} to a directory holding {}.",
            attempts.join(", "),
            FONTS_DIR_ENV,
            FONT_FILES.join(", ")
        ),
        io::Error::new(io::ErrorKind::NotFound, "bundled fonts directory not found"),
    ))
}

fn load_bundled_font_family(explicit: Option<&Path>) -> Result<FontFamily<FontData>, Error> {
    let directory = resolve_font_directory(explicit)?;

    fonts::from_files(&directory, DEFAULT_FONT_FAMILY_NAME, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load default font family '{}' from {}: {}",
                DEFAULT_FONT_FAMILY_NAME,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

impl SystemFontFamily {
    fn directory(&self) -> Option<&'static Path> {
        self.directories.iter().map(Path::new).find(|directory| {
            [self.regular, self.bold, self.italic, self.bold_italic]
                .iter()
                .all(|file| directory.join(file).is_file())
        })
    }

    fn load(&self, directory: &Path) -> Result<FontFamily<FontData>, Error> {
        Ok(FontFamily {
            regular: load_system_font(directory, self.regular)?,
            bold: load_system_font(directory, self.bold)?,
            italic: load_system_font(directory, self.italic)?,
            bold_italic: load_system_font(directory, self.bold_italic)?,
        })
    }
}

fn load_system_font(directory: &Path, file: &str) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, None).map_err(|err| {
        Error::new(
            format!("Failed to load system font at {}: {}", path.display(), err),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

fn system_font_family() -> Result<FontFamily<FontData>, Error> {
    for family in SYSTEM_FAMILIES {
        if let Some(directory) = family.directory() {
            debug!(
                "Using system font family '{}' from {}",
                family.name,
                directory.display()
            );
            return family.load(directory);
        }
    }

    Err(Error::new(
        "No system font family found for fallback",
        io::Error::new(io::ErrorKind::NotFound, "system fonts not found"),
    ))
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Returns the bundled Roboto family, or a system family when the bundled files are missing.
///
/// `explicit` takes precedence over every other search location.
pub fn default_font_family(explicit: Option<&Path>) -> Result<FontFamily<FontData>, Error> {
    match load_bundled_font_family(explicit) {
        Ok(family) => Ok(family),
        Err(err) if fonts_missing(&err) => match system_font_family() {
            Ok(fallback) => {
                debug!("Bundled fonts unavailable ({}); using a system family.", err);
                Ok(fallback)
            }
            Err(fallback_err) => {
                warn!(
                    "Bundled fonts unavailable ({}); system fallback failed: {}",
                    err, fallback_err
                );
                Err(Error::new(
                    format!(
                        "Bundled fonts unavailable and system fallback failed: {}",
                        fallback_err
                    ),
                    io::Error::new(io::ErrorKind::NotFound, "default fonts are not available"),
                ))
            }
        },
        Err(err) => Err(err),
    }
}

/// Indicates whether any usable font family can be found without loading it.
pub fn fonts_available(explicit: Option<&Path>) -> bool {
    resolve_font_directory(explicit).is_ok()
        || SYSTEM_FAMILIES
            .iter()
            .any(|family| family.directory().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directory_is_searched_first() {
        let explicit = Path::new("/opt/report-fonts");
        let candidates = font_directory_candidates(Some(explicit));
        assert_eq!(candidates.first().map(PathBuf::as_path), Some(explicit));
    }

    #[test]
    fn candidates_are_unique() {
        let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts");
        let candidates = font_directory_candidates(Some(&manifest));
        let occurrences = candidates.iter().filter(|path| **path == manifest).count();
        assert_eq!(occurrences, 1);
    }

    #[test]
    fn missing_directory_reports_every_file() {
        let missing = missing_font_files(Path::new("/__destino_report_missing_fonts__"));
        assert_eq!(missing.len(), FONT_FILES.len());
    }

    #[test]
    fn not_found_errors_trigger_fallback() {
        let err = Error::new(
            "missing",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert!(fonts_missing(&err));

        let err = Error::new("broken", ErrorKind::InvalidData);
        assert!(!fonts_missing(&err));
    }
}
