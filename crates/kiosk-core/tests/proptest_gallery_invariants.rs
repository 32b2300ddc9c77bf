//! Property-based invariant tests for the gallery engine.
//!
//! 1. Every group is ordered by capture time, ties broken by id.
//! 2. Grouping keeps every record exactly once and is repeatable.
//! 3. The flat sequence holds exactly the records of visible sources.
//! 4. `next` then `previous` from an interior focus returns to it.
//! 5. The viewer is open exactly when something is focused.
//! 6. Right-side comparison operations never change the left slot.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use kiosk_core::{
    Capture, Comparison, DeviceClass, Dismissal, FocusCursor, JobStatus, KeySignal, ModalState,
    Side, Viewer, VisibilitySet, flat_sequence, group_by_source,
};

const SOURCES: &[&str] = &["a.com", "b.com", "c.com", "d.com"];

// ── Helpers ─────────────────────────────────────────────────────────────

fn at_minute(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap() + chrono::Duration::minutes(minute.into())
}

/// Captures with few distinct sources and times, so groups and ties are common.
/// Ids may repeat.
fn capture_strategy() -> impl Strategy<Value = Capture> {
    (0i64..24, 0..SOURCES.len(), 0u32..48, any::<bool>()).prop_map(|(id, source, slot, image)| {
        Capture {
            id,
            source: SOURCES[source].to_string(),
            captured_at: at_minute(slot * 30),
            image_ref: image.then(|| format!("https://img/upload/{id}.jpg")),
            status: JobStatus::Ok,
            device: DeviceClass::Desktop,
        }
    })
}

fn records_strategy() -> impl Strategy<Value = Vec<Capture>> {
    prop::collection::vec(capture_strategy(), 0..40)
}

/// Same shape, but ids are the positions so every record is distinct.
fn unique_records_strategy() -> impl Strategy<Value = Vec<Capture>> {
    records_strategy().prop_map(|mut records| {
        for (i, record) in records.iter_mut().enumerate() {
            record.id = i as i64;
        }
        records
    })
}

fn visibility_strategy() -> impl Strategy<Value = VisibilitySet> {
    prop::collection::vec(any::<bool>(), SOURCES.len()).prop_map(|mask| {
        VisibilitySet::new(
            SOURCES
                .iter()
                .zip(mask)
                .filter(|(_, on)| *on)
                .map(|(s, _)| *s),
        )
    })
}

#[derive(Debug, Clone)]
enum ViewerOp {
    Focus(usize),
    Next,
    Previous,
    Clear,
    Dismiss(Dismissal),
    Key(KeySignal),
}

fn viewer_op_strategy() -> impl Strategy<Value = ViewerOp> {
    prop_oneof![
        (0usize..64).prop_map(ViewerOp::Focus),
        Just(ViewerOp::Next),
        Just(ViewerOp::Previous),
        Just(ViewerOp::Clear),
        prop_oneof![
            Just(Dismissal::CloseButton),
            Just(Dismissal::EscapeKey),
            Just(Dismissal::Backdrop),
        ]
        .prop_map(ViewerOp::Dismiss),
        prop_oneof![
            Just(KeySignal::MoveLeft),
            Just(KeySignal::MoveRight),
            Just(KeySignal::Dismiss),
        ]
        .prop_map(ViewerOp::Key),
    ]
}

#[derive(Debug, Clone)]
enum SlotOp {
    SelectSite(usize),
    SelectRecord(usize),
    Step(isize),
    Cycle(isize),
}

fn slot_op_strategy() -> impl Strategy<Value = SlotOp> {
    prop_oneof![
        (0..SOURCES.len() + 1).prop_map(SlotOp::SelectSite),
        (0usize..64).prop_map(SlotOp::SelectRecord),
        (-3isize..=3).prop_map(SlotOp::Step),
        (-2isize..=2).prop_map(SlotOp::Cycle),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Grouping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn groups_are_time_ordered(records in records_strategy()) {
        let timeline = group_by_source(&records);
        for (source, group) in timeline.iter() {
            for pair in group.windows(2) {
                prop_assert!(
                    (pair[0].captured_at, pair[0].id) <= (pair[1].captured_at, pair[1].id),
                    "{source}: {:?} before {:?}",
                    pair[0],
                    pair[1]
                );
            }
            prop_assert!(group.iter().all(|c| c.source == source));
        }
    }

    #[test]
    fn grouping_keeps_every_record_once(records in records_strategy()) {
        let timeline = group_by_source(&records);
        prop_assert_eq!(timeline.total_records(), records.len());
        for source in SOURCES {
            let expected = records.iter().filter(|c| c.source == *source).count();
            prop_assert_eq!(timeline.group(source).len(), expected);
        }
        prop_assert_eq!(group_by_source(&records), timeline);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Flat sequence membership
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn flat_sequence_is_exactly_the_visible_records(
        records in unique_records_strategy(),
        visibility in visibility_strategy(),
    ) {
        let timeline = group_by_source(&records);
        let flat = flat_sequence(&timeline, &visibility);

        let mut got: Vec<i64> = flat.iter().map(|c| c.id).collect();
        got.sort_unstable();
        let expected: Vec<i64> = records
            .iter()
            .filter(|c| visibility.is_visible(&c.source))
            .map(|c| c.id)
            .collect();
        prop_assert_eq!(got, expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Navigation round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn next_then_previous_returns_from_interior(
        records in unique_records_strategy(),
        visibility in visibility_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let flat = flat_sequence(&group_by_source(&records), &visibility);
        prop_assume!(flat.len() >= 2);
        // Interior: anything with a successor.
        let i = pick.index(flat.len() - 1);

        let mut cursor = FocusCursor::default();
        cursor.focus(flat[i].clone());
        cursor.next(&flat);
        prop_assert_eq!(cursor.focused().map(|c| c.id), Some(flat[i + 1].id));
        cursor.previous(&flat);
        prop_assert_eq!(cursor.focused().map(|c| c.id), Some(flat[i].id));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Viewer open iff focused
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn viewer_open_iff_focused(
        records in records_strategy(),
        ops in prop::collection::vec(viewer_op_strategy(), 0..60),
    ) {
        let flat = flat_sequence(&group_by_source(&records), &VisibilitySet::new(SOURCES.iter().copied()));
        let mut viewer = Viewer::default();

        for op in ops {
            match op {
                ViewerOp::Focus(n) => {
                    if let Some(record) = records.get(n % records.len().max(1)) {
                        viewer.focus(record.clone());
                    }
                }
                ViewerOp::Next => viewer.next(&flat),
                ViewerOp::Previous => viewer.previous(&flat),
                ViewerOp::Clear => viewer.clear(),
                ViewerOp::Dismiss(via) => viewer.dismiss(via),
                ViewerOp::Key(key) => {
                    viewer.handle_key(key, &flat);
                }
            }
            prop_assert_eq!(viewer.is_open(), viewer.focused().is_some());
            match viewer.modal() {
                ModalState::Open(record) => prop_assert_eq!(Some(record), viewer.focused()),
                ModalState::Closed => prop_assert!(viewer.focused().is_none()),
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Slot independence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn right_side_operations_leave_left_untouched(
        records in records_strategy(),
        left_site in 0..SOURCES.len(),
        ops in prop::collection::vec(slot_op_strategy(), 0..40),
    ) {
        let timeline = group_by_source(&records);
        let mut cmp = Comparison::default();
        cmp.select_site(Side::Left, SOURCES[left_site], &timeline);
        let left_before = cmp.slot(Side::Left).clone();

        for op in ops {
            match op {
                // One past the end names a site the timeline has never seen.
                SlotOp::SelectSite(n) => {
                    let site = SOURCES.get(n).copied().unwrap_or("missing.org");
                    cmp.select_site(Side::Right, site, &timeline);
                }
                SlotOp::SelectRecord(n) => {
                    if let Some(record) = records.get(n % records.len().max(1)) {
                        cmp.select_record(Side::Right, record.clone());
                    }
                }
                SlotOp::Step(delta) => cmp.step_record(Side::Right, delta, &timeline),
                SlotOp::Cycle(delta) => cmp.cycle_site(Side::Right, delta, &timeline),
            }
            prop_assert_eq!(cmp.slot(Side::Left), &left_before);
        }
    }
}
