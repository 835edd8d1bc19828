//! Parcel lookup by descriptor
//!
//! The reference grids are a true partition of the province, so a
//! descriptor should identify at most one base parcel per level. Duplicate
//! matches are not expected in well-formed reference data; if they occur
//! the first is taken and a warning is logged rather than silently
//! discarding the rest.

use tracing::warn;

use super::{GridParcel, GridRegistry};
use crate::app::models::GridLevel;

impl GridRegistry {
    /// Find the base parcel whose descriptor exactly equals the given string
    ///
    /// For the section, quarter-section and legal subdivision levels only
    /// parcels with an empty area code are considered; the township level
    /// carries no such records and is matched on descriptor alone.
    ///
    /// # Arguments
    /// * `level` - Grid level whose collection is queried
    /// * `descriptor` - Canonical ATS identity string, e.g. `TWP-110 RGE-10 MER-4`
    ///
    /// # Returns
    /// The matching base parcel, or `None` when no parcel carries the
    /// descriptor at that level
    pub fn find_base_parcel(&self, level: GridLevel, descriptor: &str) -> Option<&GridParcel> {
        let index = self.levels.get(&level)?;
        let ids = index.by_descriptor.get(descriptor)?;

        let mut matches = ids
            .iter()
            .map(|&i| &index.parcels[i])
            .filter(|parcel| !level.requires_base_filter() || parcel.area_code.is_empty());

        let first = matches.next()?;
        let extra = matches.count();
        if extra > 0 {
            warn!(
                "Descriptor '{}' matched {} {} parcels; expected at most one, taking the first",
                descriptor,
                extra + 1,
                level
            );
        }

        Some(first)
    }

    /// Whether any parcel (base or not) carries the given descriptor
    pub fn contains_descriptor(&self, level: GridLevel, descriptor: &str) -> bool {
        self.levels
            .get(&level)
            .map(|index| index.by_descriptor.contains_key(descriptor))
            .unwrap_or(false)
    }
}
