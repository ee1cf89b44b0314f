//! Reading address lists and resolving `<file` indirection.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::ParseError;
use crate::network::descriptor::INDIRECTION_MARKER;

/// Reads one entry per line, trimmed, skipping blank lines.
///
/// Entries are not validated. A bad address in a list surfaces later as a
/// failed probe.
pub fn read_addresses(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut entries = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let entry = line.trim();
        if !entry.is_empty() {
            entries.push(entry.to_string());
        }
    }

    Ok(entries)
}

/// Like [`read_addresses`], but with the existence check and error mapping a
/// descriptor needs.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<String>, ParseError> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    if !path.is_file() {
        return Err(ParseError::FileNotFound { path: shown });
    }

    read_addresses(path).map_err(|e| ParseError::Unreadable {
        path: shown,
        reason: e.to_string(),
    })
}

/// The working descriptor list after indirection.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    pub descriptors: Vec<String>,
    /// Indirection descriptors whose file could not be read.
    pub invalid: Vec<(String, ParseError)>,
}

/// Merges the first `<file` descriptor's lines into the descriptor list.
///
/// Every descriptor carrying the marker is removed, but only the first one is
/// read. Its lines are appended after the plain descriptors, and exact
/// duplicates are then dropped keeping the first occurrence.
pub fn resolve_indirection(descriptors: &[String]) -> Resolution {
    let (indirect, direct): (Vec<&str>, Vec<&str>) = descriptors
        .iter()
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
        .partition(|d| d.starts_with(INDIRECTION_MARKER));

    let mut merged: Vec<String> = direct.into_iter().map(String::from).collect();
    let mut invalid = Vec::new();

    if let Some(first) = indirect.first() {
        if indirect.len() > 1 {
            warn!(
                "Only one descriptor file is read, ignoring: {}",
                indirect[1..].join(", ")
            );
        }

        let filename = first[INDIRECTION_MARKER.len_utf8()..].trim();
        match load(filename) {
            Ok(extra) => {
                debug!("Read {} descriptors from {filename}", extra.len());
                merged.extend(extra);
            }
            Err(e) => invalid.push((first.to_string(), e)),
        }
    }

    let mut seen = HashSet::new();
    merged.retain(|d| seen.insert(d.clone()));

    Resolution {
        descriptors: merged,
        invalid,
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
