//! # Range Descriptors
//!
//! A range descriptor is one user-supplied string naming the addresses to probe:
//! * A CIDR block (e.g., `192.168.1.0/24`), expanded to its usable hosts.
//! * A span (e.g., `192.168.1.5-192.168.1.7`), expanded inclusively.
//! * Anything else is taken as the path of a file with one address per line.
//!
//! Classification looks at syntax only: a `/` makes it CIDR, otherwise a `-`
//! makes it a span, otherwise it is a file. A descriptor starting with
//! [`INDIRECTION_MARKER`] names a file of further descriptors and is handled
//! by [`crate::network::ingest::resolve_indirection`] before classification.

use std::fmt;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;
use tracing::warn;

use crate::error::ParseError;
use crate::network::ingest;
use crate::network::range::{self, Ipv4Range};

pub const INDIRECTION_MARKER: char = '<';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeKind {
    Cidr,
    Span,
    File,
}

impl fmt::Display for RangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeKind::Cidr => f.write_str("CIDR"),
            RangeKind::Span => f.write_str("IP"),
            RangeKind::File => f.write_str("File"),
        }
    }
}

impl RangeKind {
    /// Classifies a descriptor without parsing it.
    pub fn classify(descriptor: &str) -> Self {
        if descriptor.contains('/') {
            RangeKind::Cidr
        } else if descriptor.contains('-') {
            RangeKind::Span
        } else {
            RangeKind::File
        }
    }
}

/// A parsed range descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeDescriptor {
    Cidr { network: Ipv4Network },
    Span { range: Ipv4Range },
    File { path: PathBuf },
}

/// The addresses one descriptor stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub kind: RangeKind,
    pub addresses: Vec<String>,
}

impl FromStr for RangeDescriptor {
    type Err = ParseError;

    /// Parses a trimmed descriptor.
    ///
    /// File descriptors only parse when the file exists, so a missing file is
    /// reported here rather than at expansion time.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match RangeKind::classify(s) {
            RangeKind::Cidr => parse_cidr(s),
            RangeKind::Span => parse_span(s),
            RangeKind::File => parse_file(s),
        }
    }
}

impl RangeDescriptor {
    pub fn kind(&self) -> RangeKind {
        match self {
            RangeDescriptor::Cidr { .. } => RangeKind::Cidr,
            RangeDescriptor::Span { .. } => RangeKind::Span,
            RangeDescriptor::File { .. } => RangeKind::File,
        }
    }

    pub fn addresses(&self) -> Result<Vec<String>, ParseError> {
        match self {
            RangeDescriptor::Cidr { network } => Ok(range::host_range(*network).to_strings()),
            RangeDescriptor::Span { range } => Ok(range.to_strings()),
            RangeDescriptor::File { path } => ingest::load(path),
        }
    }
}

/// Classifies and expands one descriptor.
///
/// Calling this twice on the same descriptor yields the same addresses, as
/// long as a named file does not change in between.
pub fn expand(descriptor: &str) -> Result<Expansion, ParseError> {
    let parsed = RangeDescriptor::from_str(descriptor)?;
    let addresses = parsed.addresses()?;
    Ok(Expansion {
        kind: parsed.kind(),
        addresses,
    })
}

/// Splits a comma-separated descriptor list, dropping empty entries.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

/// Parses CIDR notation like "192.168.1.0/24".
///
/// The address must be the network address itself; "192.168.1.7/24" is
/// rejected instead of being silently widened.
fn parse_cidr(s: &str) -> Result<RangeDescriptor, ParseError> {
    let invalid = |reason: String| ParseError::InvalidCidr {
        descriptor: s.to_string(),
        reason,
    };

    let network = s
        .parse::<Ipv4Network>()
        .map_err(|e| invalid(e.to_string()))?;

    if network.ip() != network.network() {
        return Err(invalid(format!("{} has host bits set", network.ip())));
    }

    Ok(RangeDescriptor::Cidr { network })
}

/// Parses a span like "10.0.0.1-10.0.0.50". Both ends must be full addresses.
fn parse_span(s: &str) -> Result<RangeDescriptor, ParseError> {
    let Some((start_str, end_str)) = s.split_once('-') else {
        return Err(ParseError::InvalidAddress {
            descriptor: s.to_string(),
            reason: "missing '-' separator".to_string(),
        });
    };

    let start_addr = parse_span_end(start_str, s)?;
    let end_addr = parse_span_end(end_str, s)?;

    let range = Ipv4Range::new(start_addr, end_addr);
    if range.is_empty() {
        warn!("Range {s} starts after it ends, nothing to probe");
    }

    Ok(RangeDescriptor::Span { range })
}

fn parse_span_end(token: &str, descriptor: &str) -> Result<Ipv4Addr, ParseError> {
    let token = token.trim();
    token
        .parse::<Ipv4Addr>()
        .map_err(|e| ParseError::InvalidAddress {
            descriptor: descriptor.to_string(),
            reason: format!("'{token}': {e}"),
        })
}

fn parse_file(s: &str) -> Result<RangeDescriptor, ParseError> {
    let path = PathBuf::from(s);
    if !path.is_file() {
        return Err(ParseError::FileNotFound {
            path: s.to_string(),
        });
    }
    Ok(RangeDescriptor::File { path })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
