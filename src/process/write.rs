use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::config::SUMMARY_HEADER;
use crate::error::WriteError;
use crate::process::aggregate::SummaryRow;

/// Write the summary as CSV to `path`.
///
/// The header is always written, so an empty summary still yields a valid
/// table. Rows go to a temp file next to `path` that is renamed over it once
/// complete; a failed write leaves any previous summary untouched.
#[tracing::instrument(level = "info", skip(path, rows), fields(path = %path.as_ref().display(), rows = rows.len()))]
pub fn write_summary<P: AsRef<Path>>(path: P, rows: &[SummaryRow]) -> Result<(), WriteError> {
    let path = path.as_ref();
    let tmp_path = temp_path_for(path);

    let result = write_csv(&tmp_path, rows).and_then(|()| {
        fs::rename(&tmp_path, path).map_err(|source| WriteError::Io {
            path: path.to_path_buf(),
            source,
        })
    });

    if result.is_err() {
        // best effort; the temp file may never have been created
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_csv(path: &Path, rows: &[SummaryRow]) -> Result<(), WriteError> {
    let io_err = |source: io::Error| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    wtr.write_record(SUMMARY_HEADER)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(io_err)?;

    debug!(path = %path.display(), "wrote temp summary");
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "summary.csv".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}
