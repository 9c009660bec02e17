use crate::core::range::GenomicRange;
use crate::core::record::MappingRecord;
use crate::filtering::mates::IndexRemap;

/// Decides which mappings of a group fall inside the requested window.
///
/// Without a range every mapping is kept.
#[derive(Debug, Clone, Default)]
pub struct RangeSelector {
    range: Option<GenomicRange>,
}

/// The kept mappings of one group, in their original relative order,
/// together with the original-to-compacted index table
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub kept: Vec<MappingRecord>,
    pub remap: IndexRemap,
}

impl RangeSelector {
    #[must_use]
    pub fn new(range: Option<GenomicRange>) -> Self {
        Self { range }
    }

    #[must_use]
    pub fn selects(&self, record: &MappingRecord) -> bool {
        self.range
            .as_ref()
            .map_or(true, |range| range.contains(record.chromosome(), record.position()))
    }

    /// Keep the selected records of `group`, remembering where each landed
    #[must_use]
    pub fn select(&self, group: Vec<MappingRecord>) -> Selection {
        let mut remap = IndexRemap::with_group_len(group.len());
        let mut kept = Vec::with_capacity(group.len());

        for (original, record) in group.into_iter().enumerate() {
            if self.selects(&record) {
                remap.insert(original, kept.len());
                kept.push(record);
            }
        }

        Selection { kept, remap }
    }
}
