//! Outcome bookkeeping for change merges.

use livepage_core::ChangeKind;

/// Effect of applying one change record to the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// A novel document was inserted.
    Inserted,
    /// A present document was overwritten in place.
    Replaced,
    /// A present document was deleted.
    Removed,
    /// The record referenced a key in a state that made it a no-op.
    Ignored,
}

/// Summary of one merged batch.
///
/// `saw_added` is true when the batch carried at least one "added" record,
/// even if every such record referred to a document already present. Only such
/// batches may revise the end-of-data verdict.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub inserted: usize,
    pub replaced: usize,
    pub removed: usize,
    pub ignored: usize,
    pub saw_added: bool,
}

impl MergeReport {
    /// Creates an empty report.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one applied change.
    pub fn record(&mut self, kind: ChangeKind, applied: Applied) {
        if kind == ChangeKind::Added {
            self.saw_added = true;
        }
        match applied {
            Applied::Inserted => self.inserted += 1,
            Applied::Replaced => self.replaced += 1,
            Applied::Removed => self.removed += 1,
            Applied::Ignored => self.ignored += 1,
        }
    }

    /// Returns true if the batch carried an "added" record.
    #[inline]
    pub fn is_adding(&self) -> bool {
        self.saw_added
    }

    /// Returns the number of records processed.
    #[inline]
    pub fn total(&self) -> usize {
        self.inserted + self.replaced + self.removed + self.ignored
    }

    /// Returns true if the store changed.
    #[inline]
    pub fn changed(&self) -> bool {
        self.inserted + self.replaced + self.removed > 0
    }
}
