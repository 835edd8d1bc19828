//! Coordinate batch orchestration
//!
//! The batch owns the ordered collection of parsed coordinates plus their
//! optional titles and drives the two-phase pipeline: resolve every entry
//! through the grid resolver, then stream the results to the output sink
//! in the original input order.
//!
//! Resolution and writing are separate phases; entries are independent
//! during resolution and the sink is written in a single ordered pass.

use tracing::{debug, warn};

use crate::app::models::{InputRow, ParsedCoordinate, PointRecord};
use crate::app::services::ats_parser;
use crate::app::services::grid_registry::GridRegistry;
use crate::app::services::grid_resolver::GridResolver;
use crate::app::services::point_writer::PointDatasetWriter;

/// One batch entry: a parsed coordinate and its optional title
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub coordinate: ParsedCoordinate,
    pub title: Option<String>,
}

/// Statistics from the resolution phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    pub total: usize,
    pub resolved: usize,
    pub unresolved: usize,
}

/// Statistics from the write phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub records_written: usize,
    pub write_failures: usize,
}

/// Ordered batch of coordinates built once from the full input list
#[derive(Debug, Clone)]
pub struct CoordinateBatch {
    entries: Vec<BatchEntry>,
}

impl CoordinateBatch {
    /// Build a batch by parsing every input row, preserving row order
    ///
    /// Order is user-visible: it becomes the output row order.
    pub fn from_rows(rows: Vec<InputRow>) -> Self {
        debug!("Building coordinate batch from {} rows", rows.len());

        let entries = rows
            .into_iter()
            .map(|row| BatchEntry {
                coordinate: ats_parser::parse(&row.coordinate),
                title: row.title,
            })
            .collect();

        Self { entries }
    }

    /// Number of entries in the batch
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the batch is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The batch entries, in input order
    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    /// Resolve every entry's centroid against the reference grid
    ///
    /// Entries are resolved in order; each failure is already reported by
    /// the resolver and leaves that entry's centroid unset. The injected
    /// observer is called once per entry with (current, total) for
    /// progress reporting.
    pub fn resolve_all<F>(&mut self, registry: &GridRegistry, mut on_progress: F) -> ResolutionStats
    where
        F: FnMut(usize, usize),
    {
        let resolver = GridResolver::new(registry);
        let total = self.entries.len();
        let mut stats = ResolutionStats {
            total,
            ..Default::default()
        };

        for (i, entry) in self.entries.iter_mut().enumerate() {
            on_progress(i + 1, total);

            match resolver.resolve(&entry.coordinate) {
                Some(centroid) => {
                    entry.coordinate.set_centroid(centroid);
                    stats.resolved += 1;
                }
                None => stats.unresolved += 1,
            }
        }

        debug!(
            "Resolution complete: {} resolved, {} unresolved of {}",
            stats.resolved, stats.unresolved, stats.total
        );
        stats
    }

    /// Stream one record per entry to the output sink, in input order
    ///
    /// A failed append is reported with the offending row's identity and
    /// does not abort the remaining rows. The injected observer is called
    /// once per entry with (current, total).
    pub fn write_output<F>(&self, writer: &mut PointDatasetWriter, mut on_progress: F) -> WriteStats
    where
        F: FnMut(usize, usize),
    {
        let mut stats = WriteStats::default();
        let total = self.entries.len();

        for (i, entry) in self.entries.iter().enumerate() {
            on_progress(i + 1, total);

            let record = PointRecord {
                centroid: entry.coordinate.centroid(),
                ats: entry.coordinate.raw.clone(),
                title: entry.title.clone(),
            };

            match writer.append(&record) {
                Ok(()) => stats.records_written += 1,
                Err(e) => {
                    stats.write_failures += 1;
                    match &entry.title {
                        Some(title) => warn!(
                            "Entry {} : [ {} : {} ] could not be written to the output dataset: {}",
                            i + 1,
                            title,
                            entry.coordinate.raw,
                            e
                        ),
                        None => warn!(
                            "Entry {} : [ {} ] could not be written to the output dataset: {}",
                            i + 1,
                            entry.coordinate.raw,
                            e
                        ),
                    }
                }
            }
        }

        stats
    }
}
