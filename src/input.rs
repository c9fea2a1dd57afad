use std::fmt;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::report::{Report, parse_report};

/// Where a report was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSource {
    File(PathBuf),
    Stdin,
    CommandLine,
}

impl fmt::Display for ReportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportSource::File(path) => write!(f, "{}", path.display()),
            ReportSource::Stdin => write!(f, "stdin"),
            ReportSource::CommandLine => write!(f, "command line"),
        }
    }
}

impl ReportSource {
    /// Stem used to name output artifacts; `report` for non-file sources.
    pub fn artifact_stem(&self) -> String {
        match self {
            ReportSource::File(path) => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "report".to_string()),
            ReportSource::Stdin | ReportSource::CommandLine => "report".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedReport {
    pub report: Report,
    pub source: ReportSource,
}

/// Resolve the report from, in order: the located file, standard input, then
/// the argument itself as literal JSON. The first source that yields data wins;
/// `read_stdin` is only called when no file was found.
pub fn load_report<F>(input: Option<&str>, locator: &Locator, read_stdin: F) -> Result<LoadedReport>
where
    F: FnOnce() -> Option<Vec<u8>>,
{
    if let Some(token) = input
        && let Some(path) = locator.locate(token)
    {
        return load_file(&path);
    }

    if let Some(content) = read_stdin()
        && !content.trim_ascii().is_empty()
    {
        let report = parse_report(&content, "stdin")?;
        info!(tests = report.tests.len(), "report read from stdin");
        return Ok(LoadedReport {
            report,
            source: ReportSource::Stdin,
        });
    }

    let Some(token) = input else {
        return Err(Error::ReportNotFound(
            "no report path given and standard input is empty".to_string(),
        ));
    };

    match parse_report(token.as_bytes(), "command line") {
        Ok(report) => {
            info!(tests = report.tests.len(), "report read from command line");
            Ok(LoadedReport {
                report,
                source: ReportSource::CommandLine,
            })
        }
        Err(e) if looks_like_json(token) => Err(e),
        Err(_) => Err(Error::ReportNotFound(token.to_string())),
    }
}

fn load_file(path: &Path) -> Result<LoadedReport> {
    let bytes = std::fs::read(path)?;
    let report = parse_report(&bytes, &path.display().to_string())?;
    info!(path = %path.display(), tests = report.tests.len(), "report loaded");
    Ok(LoadedReport {
        report,
        source: ReportSource::File(path.to_path_buf()),
    })
}

fn looks_like_json(token: &str) -> bool {
    let trimmed = token.trim_start_matches('\u{feff}').trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

/// Entire standard input, unless it is an interactive terminal.
pub fn read_piped_stdin() -> Option<Vec<u8>> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return None;
    }
    let mut buf = Vec::new();
    match stdin.lock().read_to_end(&mut buf) {
        Ok(_) => Some(buf),
        Err(e) => {
            warn!(error = %e, "failed to read standard input");
            None
        }
    }
}
