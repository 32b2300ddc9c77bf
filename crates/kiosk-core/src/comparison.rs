//! Versus mode: two independent site/record selections shown side by side.
//!
//! Each [`Slot`] only ever touches its own fields. [`Comparison`] routes an
//! operation to exactly one slot and never reads the other one while doing so.

use std::collections::HashMap;

use crate::grouping::Timeline;
use crate::image::{ImageResolver, ImageView, ImageWidth, image_view};
use crate::{Capture, CaptureId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "Left Side",
            Self::Right => "Right Side",
        }
    }
}

/// One side of the comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot {
    site: Option<String>,
    record: Option<Capture>,
    /// Last record chosen per site on this side.
    remembered: HashMap<String, CaptureId>,
}

impl Slot {
    pub fn site(&self) -> Option<&str> {
        self.site.as_deref()
    }

    pub fn record(&self) -> Option<&Capture> {
        self.record.as_ref()
    }

    pub fn is_unset(&self) -> bool {
        self.site.is_none()
    }

    /// Choose a site. The record becomes the remembered selection for that
    /// site if it is still loaded, else the earliest record, else unset.
    pub fn select_site(&mut self, source: &str, timeline: &Timeline) {
        let group = timeline.group(source);
        let remembered = self
            .remembered
            .get(source)
            .and_then(|id| group.iter().find(|c| c.id == *id));
        self.record = remembered.or(group.first()).cloned();
        self.site = Some(source.to_string());
    }

    /// Choose a record directly. Membership in the site's group is the
    /// caller's responsibility.
    pub fn select_record(&mut self, record: Capture) {
        if let Some(site) = &self.site {
            self.remembered.insert(site.clone(), record.id);
        }
        self.record = Some(record);
    }

    /// Move the record cursor within the site's group, clamped at both ends.
    pub fn step_record(&mut self, delta: isize, timeline: &Timeline) {
        let Some(site) = self.site.as_deref() else {
            return;
        };
        let group = timeline.group(site);
        if group.is_empty() {
            return;
        }
        let current = self
            .record
            .as_ref()
            .and_then(|r| group.iter().position(|c| c.id == r.id));
        let target = match current {
            Some(i) => i.saturating_add_signed(delta).min(group.len() - 1),
            None => 0,
        };
        self.select_record(group[target].clone());
    }

    /// Select the neighbouring site in timeline order, wrapping around.
    pub fn cycle_site(&mut self, delta: isize, timeline: &Timeline) {
        let sources: Vec<&str> = timeline.sources().collect();
        if sources.is_empty() {
            return;
        }
        let len = sources.len() as isize;
        let current = self
            .site
            .as_deref()
            .and_then(|s| sources.iter().position(|x| *x == s));
        let target = match current {
            Some(i) => (i as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        let source = sources[target as usize].to_string();
        self.select_site(&source, timeline);
    }
}

/// Whether both panes have something to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready { left: String, right: String },
    NotReady,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    left: Slot,
    right: Slot,
    open: bool,
    show_controls: bool,
    /// Side edited by keyboard input and by the narrow-layout tab strip.
    active_side: Side,
}

impl Default for Comparison {
    fn default() -> Self {
        Self {
            left: Slot::default(),
            right: Slot::default(),
            open: false,
            show_controls: true,
            active_side: Side::Left,
        }
    }
}

impl Comparison {
    pub fn slot(&self, side: Side) -> &Slot {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut Slot {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn show_controls(&self) -> bool {
        self.show_controls
    }

    pub fn active_side(&self) -> Side {
        self.active_side
    }

    pub fn select_site(&mut self, side: Side, source: &str, timeline: &Timeline) {
        self.slot_mut(side).select_site(source, timeline);
    }

    pub fn select_record(&mut self, side: Side, record: Capture) {
        self.slot_mut(side).select_record(record);
    }

    pub fn step_record(&mut self, side: Side, delta: isize, timeline: &Timeline) {
        self.slot_mut(side).step_record(delta, timeline);
    }

    pub fn cycle_site(&mut self, side: Side, delta: isize, timeline: &Timeline) {
        self.slot_mut(side).cycle_site(delta, timeline);
    }

    /// Enter versus mode with the controls shown and any unset slot filled.
    pub fn open(&mut self, timeline: &Timeline) {
        self.open = true;
        self.show_controls = true;
        self.fill_unset(timeline);
    }

    /// Fill unset slots from the first two sources. With a single source both
    /// sides compare it against itself. Slots that already hold a site and the
    /// layout flags are left alone.
    pub fn fill_unset(&mut self, timeline: &Timeline) {
        let sources: Vec<&str> = timeline.sources().collect();
        let (first, second) = match sources.as_slice() {
            [] => return,
            [only] => (*only, *only),
            [first, second, ..] => (*first, *second),
        };
        if self.left.is_unset() {
            self.left.select_site(first, timeline);
        }
        if self.right.is_unset() {
            self.right.select_site(second, timeline);
        }
    }

    /// Leave versus mode. Selections survive until the next reset.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle_controls(&mut self) {
        self.show_controls = !self.show_controls;
    }

    pub fn set_active_side(&mut self, side: Side) {
        self.active_side = side;
    }

    /// Drop both selections. Open/closed and layout state are kept.
    pub fn reset(&mut self) {
        self.left = Slot::default();
        self.right = Slot::default();
    }

    /// Full-width image for one side.
    pub fn image(&self, side: Side, resolver: &dyn ImageResolver) -> ImageView {
        self.slot(side)
            .record()
            .map(|r| image_view(r, ImageWidth::Full, resolver))
            .unwrap_or(ImageView::Missing)
    }

    pub fn readiness(&self, resolver: &dyn ImageResolver) -> Readiness {
        match (self.image(Side::Left, resolver), self.image(Side::Right, resolver)) {
            (ImageView::Image { url: left }, ImageView::Image { url: right }) => {
                Readiness::Ready { left, right }
            }
            _ => Readiness::NotReady,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group_by_source;
    use crate::image::testing::CountingResolver;
    use crate::testutil::{capture, capture_without_image};

    fn two_sites() -> Timeline {
        group_by_source(&[
            capture(1, "a.com", 9, 0),
            capture(2, "a.com", 12, 0),
            capture(3, "a.com", 15, 0),
            capture(4, "b.com", 10, 0),
        ])
    }

    #[test]
    fn open_fills_empty_slots_with_first_two_sources() {
        let timeline = two_sites();
        let mut cmp = Comparison::default();
        cmp.open(&timeline);
        assert!(cmp.is_open());
        assert_eq!(cmp.slot(Side::Left).site(), Some("a.com"));
        assert_eq!(cmp.slot(Side::Left).record().map(|c| c.id), Some(1));
        assert_eq!(cmp.slot(Side::Right).site(), Some("b.com"));
        assert_eq!(cmp.slot(Side::Right).record().map(|c| c.id), Some(4));
    }

    #[test]
    fn open_with_single_source_compares_it_with_itself() {
        let timeline = group_by_source(&[capture(1, "a.com", 9, 0), capture(2, "a.com", 12, 0)]);
        let mut cmp = Comparison::default();
        cmp.open(&timeline);
        assert_eq!(cmp.slot(Side::Left).site(), Some("a.com"));
        assert_eq!(cmp.slot(Side::Right).site(), Some("a.com"));
        assert_eq!(
            cmp.slot(Side::Left).record(),
            cmp.slot(Side::Right).record()
        );
        assert_eq!(cmp.slot(Side::Left).record().map(|c| c.id), Some(1));
    }

    #[test]
    fn open_with_no_sources_leaves_slots_empty() {
        let mut cmp = Comparison::default();
        cmp.open(&Timeline::default());
        assert!(cmp.is_open());
        assert!(cmp.slot(Side::Left).is_unset());
        assert!(cmp.slot(Side::Right).is_unset());
    }

    #[test]
    fn reopen_keeps_previous_selection() {
        let timeline = two_sites();
        let mut cmp = Comparison::default();
        cmp.open(&timeline);
        cmp.select_site(Side::Left, "b.com", &timeline);
        cmp.select_record(Side::Right, timeline.group("b.com")[0].clone());
        cmp.close();
        cmp.open(&timeline);
        assert_eq!(cmp.slot(Side::Left).site(), Some("b.com"));
        assert_eq!(cmp.slot(Side::Right).site(), Some("b.com"));
    }

    #[test]
    fn right_side_changes_never_touch_left() {
        let timeline = two_sites();
        let mut cmp = Comparison::default();
        cmp.select_site(Side::Left, "a.com", &timeline);
        let left_before = cmp.slot(Side::Left).clone();

        cmp.select_site(Side::Right, "a.com", &timeline);
        cmp.select_record(Side::Right, timeline.group("a.com")[2].clone());
        cmp.select_site(Side::Right, "b.com", &timeline);
        cmp.step_record(Side::Right, 1, &timeline);
        cmp.cycle_site(Side::Right, 1, &timeline);
        cmp.select_record(Side::Right, capture(77, "zzz.com", 1, 0));

        assert_eq!(cmp.slot(Side::Left), &left_before);
    }

    #[test]
    fn same_site_on_both_sides_has_independent_cursors() {
        let timeline = two_sites();
        let mut cmp = Comparison::default();
        cmp.select_site(Side::Left, "a.com", &timeline);
        cmp.select_site(Side::Right, "a.com", &timeline);
        cmp.step_record(Side::Right, 2, &timeline);
        assert_eq!(cmp.slot(Side::Left).record().map(|c| c.id), Some(1));
        assert_eq!(cmp.slot(Side::Right).record().map(|c| c.id), Some(3));
    }

    #[test]
    fn select_site_restores_remembered_record() {
        let timeline = two_sites();
        let mut cmp = Comparison::default();
        cmp.select_site(Side::Left, "a.com", &timeline);
        cmp.select_record(Side::Left, timeline.group("a.com")[1].clone());
        cmp.select_site(Side::Left, "b.com", &timeline);
        cmp.select_site(Side::Left, "a.com", &timeline);
        assert_eq!(cmp.slot(Side::Left).record().map(|c| c.id), Some(2));
    }

    #[test]
    fn select_empty_site_unsets_record() {
        let timeline = two_sites();
        let mut cmp = Comparison::default();
        cmp.select_site(Side::Left, "a.com", &timeline);
        cmp.select_site(Side::Left, "gone.com", &timeline);
        assert_eq!(cmp.slot(Side::Left).site(), Some("gone.com"));
        assert!(cmp.slot(Side::Left).record().is_none());
    }

    #[test]
    fn step_record_clamps() {
        let timeline = two_sites();
        let mut slot = Slot::default();
        slot.select_site("a.com", &timeline);
        slot.step_record(-1, &timeline);
        assert_eq!(slot.record().map(|c| c.id), Some(1));
        slot.step_record(10, &timeline);
        assert_eq!(slot.record().map(|c| c.id), Some(3));
    }

    #[test]
    fn cycle_site_wraps() {
        let timeline = two_sites();
        let mut slot = Slot::default();
        slot.cycle_site(1, &timeline);
        assert_eq!(slot.site(), Some("a.com"));
        slot.cycle_site(1, &timeline);
        assert_eq!(slot.site(), Some("b.com"));
        slot.cycle_site(1, &timeline);
        assert_eq!(slot.site(), Some("a.com"));
        slot.cycle_site(-1, &timeline);
        assert_eq!(slot.site(), Some("b.com"));
    }

    #[test]
    fn readiness_requires_both_images() {
        let resolver = CountingResolver::default();
        let timeline = group_by_source(&[
            capture(1, "a.com", 9, 0),
            capture_without_image(2, "b.com", 10, 0),
        ]);
        let mut cmp = Comparison::default();
        assert_eq!(cmp.readiness(&resolver), Readiness::NotReady);

        cmp.open(&timeline);
        assert_eq!(cmp.readiness(&resolver), Readiness::NotReady);
        assert_eq!(resolver.call_count(), 1);

        cmp.select_site(Side::Right, "a.com", &timeline);
        assert!(matches!(cmp.readiness(&resolver), Readiness::Ready { .. }));
    }

    #[test]
    fn reset_clears_slots_but_keeps_mode() {
        let timeline = two_sites();
        let mut cmp = Comparison::default();
        cmp.open(&timeline);
        cmp.toggle_controls();
        cmp.reset();
        assert!(cmp.is_open());
        assert!(!cmp.show_controls());
        assert!(cmp.slot(Side::Left).is_unset());
        assert!(cmp.slot(Side::Right).record().is_none());
    }

    #[test]
    fn fill_unset_keeps_layout_flags() {
        let timeline = two_sites();
        let mut cmp = Comparison::default();
        cmp.open(&Timeline::default());
        cmp.toggle_controls();
        cmp.fill_unset(&timeline);
        assert!(cmp.is_open());
        assert!(!cmp.show_controls());
        assert_eq!(cmp.slot(Side::Left).site(), Some("a.com"));
        assert_eq!(cmp.slot(Side::Right).site(), Some("b.com"));
    }
}
