//! Mate cross-references of a filtered mapping group.
//!
//! Each mapping names its mate by index into the group as it appeared in the
//! input. After filtering, those indices are translated into the compacted
//! group; mates that were dropped leave a [`MateLink::Broken`] link behind.

use crate::error::PrepError;

/// Mate reference of a kept mapping, expressed in compacted-group indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MateLink {
    /// The mate is the kept record at this index
    Paired(usize),
    /// The mate was filtered out
    Broken,
}

impl MateLink {
    /// Value written to the mate-index column; a broken link points at itself
    #[must_use]
    pub fn resolve(self, own_index: usize) -> usize {
        match self {
            Self::Paired(target) => target,
            Self::Broken => own_index,
        }
    }
}

/// Sparse map from original in-group index to compacted index.
///
/// A miss means the record at that original index was discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexRemap {
    slots: Vec<Option<usize>>,
}

impl IndexRemap {
    #[must_use]
    pub fn with_group_len(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Size of the original group
    #[must_use]
    pub fn group_len(&self) -> usize {
        self.slots.len()
    }

    /// Record that the original record `original` is kept at `compacted`
    pub fn insert(&mut self, original: usize, compacted: usize) {
        self.slots[original] = Some(compacted);
    }

    /// Compacted index of an original record, `None` when it was discarded
    #[must_use]
    pub fn get(&self, original: usize) -> Option<usize> {
        self.slots.get(original).copied().flatten()
    }

    #[must_use]
    pub fn contains(&self, original: usize) -> bool {
        original < self.slots.len()
    }
}

/// Translates original mate indices into [`MateLink`]s and repairs one-sided pairs.
pub struct MateIndexRewriter<'a> {
    remap: &'a IndexRemap,
}

impl<'a> MateIndexRewriter<'a> {
    #[must_use]
    pub fn new(remap: &'a IndexRemap) -> Self {
        Self { remap }
    }

    /// Build the links of the kept records from their original mate indices,
    /// given in compacted order, then repair asymmetric pairs.
    ///
    /// # Errors
    ///
    /// Returns `PrepError::Consistency` if an original mate index lies outside
    /// the original group.
    pub fn rewrite(&self, original_mates: &[usize]) -> Result<Vec<MateLink>, PrepError> {
        let mut links = original_mates
            .iter()
            .map(|&mate| {
                if !self.remap.contains(mate) {
                    return Err(PrepError::consistency(format!(
                        "mate index {mate} is outside its group of {} records",
                        self.remap.group_len()
                    )));
                }
                Ok(self.remap.get(mate).map_or(MateLink::Broken, MateLink::Paired))
            })
            .collect::<Result<Vec<_>, _>>()?;

        repair_pairs(&mut links);
        Ok(links)
    }
}

/// One pass in compacted order: when record `i` points at `j` but `j` lost its
/// own mate, `j` is pointed back at `i`. Pairs are two-way, so one level suffices.
pub fn repair_pairs(links: &mut [MateLink]) {
    for i in 0..links.len() {
        if let MateLink::Paired(j) = links[i] {
            if j != i && links[j] == MateLink::Broken {
                links[j] = MateLink::Paired(i);
            }
        }
    }
}
