//! Writing finished exports.
//!
//! Nothing is written until an export has fully succeeded, so a failed run
//! never leaves a partial file behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tunestats_core::PlaylistExport;

/// Where an export goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Explicit file path.
    File(PathBuf),
    /// `<playlist name>.csv` inside a directory.
    Directory(PathBuf),
    Stdout,
}

impl Destination {
    /// `--stdout` wins, then `--output`, then the current directory.
    pub fn from_args(output: Option<PathBuf>, stdout: bool) -> Self {
        match (stdout, output) {
            (true, _) => Destination::Stdout,
            (false, Some(path)) if path.is_dir() => Destination::Directory(path),
            (false, Some(path)) => Destination::File(path),
            (false, None) => Destination::Directory(PathBuf::from(".")),
        }
    }
}

/// File name for a playlist on disk.
///
/// Same as [`PlaylistExport::filename`] with path separators replaced so the
/// name cannot escape the target directory.
pub fn default_output_path(dir: &Path, export: &PlaylistExport) -> PathBuf {
    let name: String = export
        .filename()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();
    dir.join(name)
}

/// Write an export. Returns the path written, or `None` for stdout.
pub fn write_export(export: &PlaylistExport, destination: &Destination) -> io::Result<Option<PathBuf>> {
    let content = export.document.to_string();

    match destination {
        Destination::Stdout => {
            let mut out = io::stdout().lock();
            out.write_all(content.as_bytes())?;
            out.write_all(b"\n")?;
            Ok(None)
        }
        Destination::File(path) => {
            fs::write(path, content)?;
            Ok(Some(path.clone()))
        }
        Destination::Directory(dir) => {
            let path = default_output_path(dir, export);
            fs::write(&path, content)?;
            Ok(Some(path))
        }
    }
}
