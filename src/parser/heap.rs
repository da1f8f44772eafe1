//! Parser for valgrind massif logs.
//!
//! Massif writes `key=value` lines; every `mem_heap_B=<bytes>` line is one
//! heap-size sample. Snapshot indices are positional over the accepted
//! samples, never read from the file.

use super::schema::HeapSnapshot;
use crate::utils::config::MASSIF_HEAP_KEY;
use log::{debug, warn};
use std::path::Path;

/// Parse a massif log into heap snapshots
///
/// Heap data is optional, so an unreadable file yields an empty list.
pub fn parse_heap_snapshots(path: &Path) -> Vec<HeapSnapshot> {
    debug!("Parsing heap snapshots from: {}", path.display());

    match std::fs::read(path) {
        Ok(bytes) => parse_heap_snapshots_str(&String::from_utf8_lossy(&bytes)),
        Err(e) => {
            warn!(
                "Heap log {} unreadable ({}), using empty data",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}

pub fn parse_heap_snapshots_str(content: &str) -> Vec<HeapSnapshot> {
    let sizes = content.lines().filter_map(|line| {
        let (key, value) = line.trim().split_once('=')?;
        if key != MASSIF_HEAP_KEY {
            return None;
        }
        value.trim().parse::<u64>().ok()
    });

    let snapshots: Vec<HeapSnapshot> = sizes
        .enumerate()
        .map(|(snapshot_index, heap_bytes)| HeapSnapshot {
            snapshot_index,
            heap_bytes,
        })
        .collect();

    debug!("Parsed {} heap snapshots", snapshots.len());
    snapshots
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASSIF: &str = "desc: --time-unit=B\ncmd: ./app\n#-----------\nsnapshot=0\n#-----------\ntime=0\nmem_heap_B=0\nmem_heap_extra_B=0\nsnapshot=1\nmem_heap_B=1024\nmem_heap_B=oops\nsnapshot=2\nmem_heap_B=4096\n";

    #[test]
    fn test_indices_are_positional() {
        let snapshots = parse_heap_snapshots_str(MASSIF);
        let sizes: Vec<(usize, u64)> = snapshots
            .iter()
            .map(|s| (s.snapshot_index, s.heap_bytes))
            .collect();
        assert_eq!(sizes, vec![(0, 0), (1, 1024), (2, 4096)]);
    }

    #[test]
    fn test_extra_heap_keys_ignored() {
        let snapshots = parse_heap_snapshots_str("mem_heap_extra_B=8\nmem_stacks_B=0\n");
        assert!(snapshots.is_empty());
    }
}
