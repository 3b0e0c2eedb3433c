use crate::domain::{VersionRange, VersionTag};
use crate::error::Result;
use std::cell::{Cell, RefCell};

/// Which payload a resolve landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Entry(usize),
    Default,
    Absent,
}

/// Piecewise mapping from version ranges to payloads.
///
/// Ranges are tried in declaration order and the first one containing the
/// queried version wins; otherwise the default payload (if any) is returned.
/// The most recent resolve is remembered in a single-entry cache, so repeated
/// lookups for the version of the log being analyzed skip the range scan.
///
/// The cache uses interior mutability, so a table is `!Sync` and meant to be
/// owned by a single analysis pipeline.
#[derive(Debug)]
pub struct EvolutionTable<T> {
    entries: Vec<(VersionRange, T)>,
    default: Option<T>,
    cache: RefCell<Option<(VersionTag, Selection)>>,
    scans: Cell<usize>,
}

impl<T> EvolutionTable<T> {
    /// Build a table from `(range, payload)` pairs, parsing each range string
    ///
    /// # Errors
    /// Returns `InvalidArgument` if a range string cannot be parsed
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(range, payload)| {
                VersionRange::parse(range.as_ref()).map(|range| (range, payload))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_ranges(entries))
    }

    /// Build a table from already parsed ranges
    pub fn from_ranges(entries: Vec<(VersionRange, T)>) -> Self {
        EvolutionTable {
            entries,
            default: None,
            cache: RefCell::new(None),
            scans: Cell::new(0),
        }
    }

    /// Set the catch-all payload used when no range matches
    pub fn with_default(mut self, payload: T) -> Self {
        self.default = Some(payload);
        self.cache.replace(None);
        self
    }

    /// Resolve the payload for `version`
    pub fn resolve(&self, version: &VersionTag) -> Option<&T> {
        let cached = self
            .cache
            .borrow()
            .as_ref()
            .filter(|(cached_version, _)| cached_version == version)
            .map(|(_, selection)| *selection);

        let selection = match cached {
            Some(selection) => selection,
            None => {
                let selection = self.scan(version);
                tracing::trace!(%version, ?selection, "evolution table cache miss");
                self.cache.replace(Some((version.clone(), selection)));
                selection
            }
        };

        self.payload(selection)
    }

    fn scan(&self, version: &VersionTag) -> Selection {
        self.scans.set(self.scans.get() + 1);

        if let Some(index) = self
            .entries
            .iter()
            .position(|(range, _)| range.contains(version))
        {
            Selection::Entry(index)
        } else if self.default.is_some() {
            Selection::Default
        } else {
            Selection::Absent
        }
    }

    fn payload(&self, selection: Selection) -> Option<&T> {
        match selection {
            Selection::Entry(index) => self.entries.get(index).map(|(_, payload)| payload),
            Selection::Default => self.default.as_ref(),
            Selection::Absent => None,
        }
    }

    /// Number of times the range list has been scanned (cache misses)
    pub fn scan_count(&self) -> usize {
        self.scans.get()
    }

    /// Declared ranges and their payloads, in declaration order
    pub fn entries(&self) -> impl Iterator<Item = (&VersionRange, &T)> {
        self.entries.iter().map(|(range, payload)| (range, payload))
    }

    pub fn default_payload(&self) -> Option<&T> {
        self.default.as_ref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
