//! Partition a day's captures into per-source timelines.

use std::collections::HashMap;

use crate::{Capture, CaptureId};

/// Captures grouped by source.
///
/// Groups keep the order in which their source first appears in the input,
/// and each group is sorted by `(captured_at, id)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    groups: Vec<(String, Vec<Capture>)>,
    index: HashMap<String, usize>,
}

impl Timeline {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of groups (distinct sources).
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn total_records(&self) -> usize {
        self.groups.iter().map(|(_, g)| g.len()).sum()
    }

    /// Source keys in group order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(s, _)| s.as_str())
    }

    /// Records for `source`, earliest first. Unknown sources give an empty slice.
    pub fn group(&self, source: &str) -> &[Capture] {
        self.index
            .get(source)
            .map(|&i| self.groups[i].1.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Capture])> {
        self.groups.iter().map(|(s, g)| (s.as_str(), g.as_slice()))
    }

    pub fn find(&self, id: CaptureId) -> Option<&Capture> {
        self.groups
            .iter()
            .flat_map(|(_, g)| g.iter())
            .find(|c| c.id == id)
    }

    pub fn contains(&self, id: CaptureId) -> bool {
        self.find(id).is_some()
    }
}

/// Build the grouped timeline for a loaded record set.
///
/// The store already orders rows by source then time, so the per-group sort
/// is stable and leaves well-ordered input untouched.
pub fn group_by_source(records: &[Capture]) -> Timeline {
    let mut timeline = Timeline::default();

    for record in records {
        let slot = match timeline.index.get(&record.source) {
            Some(&i) => i,
            None => {
                timeline
                    .index
                    .insert(record.source.clone(), timeline.groups.len());
                timeline.groups.push((record.source.clone(), Vec::new()));
                timeline.groups.len() - 1
            }
        };
        timeline.groups[slot].1.push(record.clone());
    }

    for (_, group) in &mut timeline.groups {
        group.sort_by(|a, b| {
            a.captured_at
                .cmp(&b.captured_at)
                .then_with(|| a.id.cmp(&b.id))
        });
    }

    timeline
}
