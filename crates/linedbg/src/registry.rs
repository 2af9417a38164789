//! Bidirectional bookkeeping for confirmed breakpoints.
//!
//! The registry holds two maps that are always mutual inverses: breakpoint
//! index to location, and location to index. It is a plain data structure;
//! the session decides which host tags to add or delete from the values the
//! registry returns.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::breakpoint::{Breakpoint, Location};

/// Errors raised by registry lookups that the caller must handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No breakpoint is tracked at the requested location.
    #[error("no breakpoint is tracked at {file}:{line}")]
    NotFound {
        /// File that was looked up.
        file: String,
        /// Line that was looked up.
        line: u32,
    },
}

/// Active breakpoints keyed both by index and by location.
#[derive(Debug, Default, Clone)]
pub struct BreakpointRegistry {
    by_index: BTreeMap<u32, Location>,
    by_location: HashMap<Location, u32>,
}

impl BreakpointRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a confirmed breakpoint.
    ///
    /// A previous mapping for the same index is overwritten, and a previous
    /// breakpoint at the same location is evicted, so at most one breakpoint
    /// is tracked per location. The displaced entries are returned so their
    /// host tags can be removed; the new breakpoint itself is never among
    /// them unless it was already recorded identically.
    pub fn add(&mut self, index: u32, location: Location) -> Vec<Breakpoint> {
        let mut displaced = Vec::new();

        if let Some(previous) = self.by_index.remove(&index) {
            self.by_location.remove(&previous);
            displaced.push(Breakpoint {
                index,
                location: previous,
            });
        }

        if let Some(previous_index) = self.by_location.remove(&location) {
            self.by_index.remove(&previous_index);
            displaced.push(Breakpoint {
                index: previous_index,
                location: location.clone(),
            });
        }

        self.by_location.insert(location.clone(), index);
        self.by_index.insert(index, location);
        displaced
    }

    /// Forgets the breakpoint with `index`, returning where it was set.
    ///
    /// An unknown index yields `None`; the debugger and the registry have
    /// drifted apart, which callers treat as recoverable.
    pub fn remove(&mut self, index: u32) -> Option<Location> {
        let location = self.by_index.remove(&index)?;
        self.by_location.remove(&location);
        Some(location)
    }

    /// Like [`Self::index_at`], but a miss is an error.
    ///
    /// Nothing is removed here. The mapping is dropped by [`Self::remove`]
    /// once the debugger confirms the deletion.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no breakpoint is tracked at
    /// the location.
    pub fn remove_at(&self, file: &str, line: u32) -> Result<u32, RegistryError> {
        self.index_at(file, line)
            .ok_or_else(|| RegistryError::NotFound {
                file: file.to_owned(),
                line,
            })
    }

    /// Empties both maps and returns every breakpoint that was tracked.
    pub fn clear(&mut self) -> Vec<Breakpoint> {
        self.by_location.clear();
        std::mem::take(&mut self.by_index)
            .into_iter()
            .map(|(index, location)| Breakpoint { index, location })
            .collect()
    }

    /// Location of the breakpoint with `index`.
    #[must_use]
    pub fn get(&self, index: u32) -> Option<&Location> {
        self.by_index.get(&index)
    }

    /// Index of the breakpoint at `file:line`.
    #[must_use]
    pub fn index_at(&self, file: &str, line: u32) -> Option<u32> {
        self.by_location.get(&Location::new(file, line)).copied()
    }

    /// Number of tracked breakpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    /// Whether no breakpoints are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }

    /// Iterates over tracked breakpoints in index order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Location)> {
        self.by_index.iter().map(|(index, location)| (*index, location))
    }

    /// Whether the two maps are exact inverses of each other.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.by_index.len() == self.by_location.len()
            && self
                .by_index
                .iter()
                .all(|(index, location)| self.by_location.get(location) == Some(index))
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn registry() -> BreakpointRegistry {
        BreakpointRegistry::new()
    }

    #[rstest]
    fn confirmed_breakpoint_is_found_by_location(mut registry: BreakpointRegistry) {
        let displaced = registry.add(1, Location::new("a.py", 10));

        assert!(displaced.is_empty());
        assert_eq!(registry.remove_at("a.py", 10), Ok(1));
        assert_eq!(registry.get(1), Some(&Location::new("a.py", 10)));
    }

    #[rstest]
    fn same_index_overwrites_previous_location(mut registry: BreakpointRegistry) {
        registry.add(1, Location::new("a.py", 10));
        let displaced = registry.add(1, Location::new("b.py", 3));

        assert_eq!(
            displaced,
            vec![Breakpoint {
                index: 1,
                location: Location::new("a.py", 10),
            }]
        );
        assert_eq!(registry.index_at("a.py", 10), None);
        assert_eq!(registry.index_at("b.py", 3), Some(1));
        assert!(registry.is_consistent());
    }

    #[rstest]
    fn same_location_evicts_previous_index(mut registry: BreakpointRegistry) {
        registry.add(1, Location::new("a.py", 10));
        let displaced = registry.add(2, Location::new("a.py", 10));

        assert_eq!(displaced.len(), 1);
        assert_eq!(registry.get(1), None);
        assert_eq!(registry.index_at("a.py", 10), Some(2));
        assert_eq!(registry.len(), 1);
        assert!(registry.is_consistent());
    }

    #[rstest]
    fn remove_unknown_index_is_a_noop(mut registry: BreakpointRegistry) {
        registry.add(4, Location::new("a.py", 1));

        assert_eq!(registry.remove(9), None);
        assert_eq!(registry.len(), 1);
    }

    #[rstest]
    fn remove_at_untracked_location_leaves_registry_unchanged(mut registry: BreakpointRegistry) {
        registry.add(1, Location::new("a.py", 10));

        let result = registry.remove_at("a.py", 11);

        assert_eq!(
            result,
            Err(RegistryError::NotFound {
                file: String::from("a.py"),
                line: 11,
            })
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.index_at("a.py", 10), Some(1));
    }

    #[rstest]
    fn remove_at_hit_keeps_mapping_until_confirmed(mut registry: BreakpointRegistry) {
        registry.add(3, Location::new("a.py", 10));

        assert_eq!(registry.remove_at("a.py", 10), Ok(3));
        assert_eq!(registry.remove_at("a.py", 10), Ok(3));
        assert_eq!(registry.index_at("a.py", 10), Some(3));
        assert_eq!(registry.len(), 1);

        assert_eq!(registry.remove(3), Some(Location::new("a.py", 10)));
        assert!(registry.remove_at("a.py", 10).is_err());
    }

    #[rstest]
    fn clear_returns_everything_and_later_lookups_miss(mut registry: BreakpointRegistry) {
        registry.add(2, Location::new("b.py", 7));
        registry.add(1, Location::new("a.py", 10));

        let drained = registry.clear();

        assert_eq!(
            drained.iter().map(|bp| bp.index).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert!(registry.is_empty());
        assert_eq!(registry.remove(1), None);
        assert!(registry.remove_at("a.py", 10).is_err());
    }

    #[rstest]
    fn interleaved_operations_keep_maps_inverse(mut registry: BreakpointRegistry) {
        // Deterministic pseudo-random walk over a small index/location space so
        // both overwrite paths are exercised repeatedly.
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let index = seed & 0x7;
            let line = (seed >> 8) & 0x3;
            let file = if seed & 0x10 == 0 { "a.py" } else { "b.py" };
            if seed & 0x3 == 0 {
                registry.remove(index);
            } else {
                registry.add(index, Location::new(file, line + 1));
            }
            assert!(registry.is_consistent());
        }
    }
}
