use std::path::{Component, Path, PathBuf};

use glob::{glob, Pattern};
use regex::Regex;
use tracing::info;

use crate::error::{Error, Result};

/// Path prefixes of cloud buckets, which cannot be searched locally.
const BUCKET_PREFIXES: [&str; 2] = ["ssb-", "gs:/"];

/// Version number after the last `_v` in the file name, if any.
fn file_version(path: &Path, version_re: &Regex) -> Option<u64> {
    let name = path.file_name()?.to_str()?;
    version_re
        .captures_iter(name)
        .last()
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Lexically normalise a path: drop `.` components and resolve `..` against
/// preceding names.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Find the highest versioned file `<dir>/<name>*<extension>`.
///
/// Versions are read from a trailing `_v<N>` in the file name, e.g.
/// `dataset_v3.parquet`. Files without a version are ignored. Returns `None`
/// when nothing matches.
pub fn read_latest(dir: &str, name: &str, extension: &str) -> Result<Option<PathBuf>> {
    if BUCKET_PREFIXES.iter().any(|p| dir.starts_with(p)) {
        return Err(Error::UnsupportedLocation(dir.to_string()));
    }

    info!(name, "checking versions of file");

    let pattern = Path::new(&Pattern::escape(dir)).join(format!(
        "{}*{}",
        Pattern::escape(name),
        Pattern::escape(extension)
    ));
    let version_re = Regex::new(r"_v(\d+)")?;

    let mut versions: Vec<(u64, PathBuf)> = glob(&pattern.to_string_lossy())?
        .filter_map(|entry| entry.ok())
        .filter_map(|path| file_version(&path, &version_re).map(|v| (v, path)))
        .collect();
    versions.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    let Some((_, latest)) = versions.last() else {
        info!(name, "no files found");
        return Ok(None);
    };

    let latest = normalize(latest);
    info!(
        found = versions.len(),
        latest = %latest.file_name().map(|n| n.to_string_lossy()).unwrap_or_default(),
        "reading latest version"
    );
    Ok(Some(latest))
}
