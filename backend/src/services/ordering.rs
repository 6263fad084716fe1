//! Standard ordering of TCE result sets.

use std::cmp::Ordering;

use crate::models::DetectionRecord;

/// Compare two TCEs: TIC ascending, then sector span descending (the TCE
/// backed by the most data first), then id ascending ignoring case.
pub fn compare_tces<T: DetectionRecord + ?Sized>(a: &T, b: &T) -> Ordering {
    a.tic_id()
        .cmp(&b.tic_id())
        .then_with(|| b.sector_span().cmp(&a.sector_span()))
        .then_with(|| {
            a.display_identifier()
                .to_lowercase()
                .cmp(&b.display_identifier().to_lowercase())
        })
}

/// Sort TCEs into the standard order. The sort is stable, so records equal
/// on all three keys keep their fetch order.
pub fn sort_tces<T: DetectionRecord>(records: &mut [T]) {
    records.sort_by(|a, b| compare_tces(a, b));
}
