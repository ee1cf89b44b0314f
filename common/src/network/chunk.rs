use std::slice::Chunks;

use crate::error::ConfigError;

/// Splits `items` into contiguous groups of `size`, the last one possibly
/// shorter.
///
/// The iterator is lazy and `Clone`, so a caller can walk it again from the
/// start.
pub fn chunk<T>(items: &[T], size: usize) -> Result<Chunks<'_, T>, ConfigError> {
    if size == 0 {
        return Err(ConfigError::ZeroChunkSize);
    }
    Ok(items.chunks(size))
}

pub fn chunk_count(len: usize, size: usize) -> usize {
    len.div_ceil(size.max(1))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
