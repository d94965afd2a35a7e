//! Common free-window aggregation.
//!
//! The aggregator derives, per day, the maximal contiguous spans where no
//! group member is unavailable. It is a pure function of its inputs and
//! produces identical output for identical input, so it can run against any
//! immutable snapshot of records.

use crate::grid::{Day, TimeGrid};

use super::types::{DayAvailability, FreeWindow, MemberAvailabilityRecord};

/// Compute the common free windows for a group.
///
/// Per day, independently:
///
/// 1. build the day's time points from the grid;
/// 2. mark every cell `[p_i, p_{i+1})` blocked if it falls within any
///    member's unavailability interval for that day;
/// 3. scan left to right, closing a run of free cells at a blocked cell or
///    at the end of the window;
/// 4. discard runs shorter than `min_window_minutes` (exactly the minimum
///    passes, one minute less does not).
///
/// Days with no surviving windows are omitted entirely. Output is ordered by
/// week order, then ascending start within a day.
pub fn compute_free_windows(
    grid: &TimeGrid,
    records: &[MemberAvailabilityRecord],
    min_window_minutes: u16,
) -> Vec<DayAvailability> {
    let points = grid.time_points();

    Day::ALL
        .iter()
        .filter_map(|&day| {
            let blocks = free_windows_for_day(day, &points, records, min_window_minutes);
            if blocks.is_empty() {
                None
            } else {
                Some(DayAvailability {
                    day,
                    available_blocks: blocks,
                })
            }
        })
        .collect()
}

/// Scan one day's cells for maximal free runs meeting the minimum duration.
fn free_windows_for_day(
    day: Day,
    points: &[crate::grid::TimePoint],
    records: &[MemberAvailabilityRecord],
    min_window_minutes: u16,
) -> Vec<FreeWindow> {
    let cell_count = points.len().saturating_sub(1);
    let mut windows = Vec::new();
    let mut run_start: Option<usize> = None;

    for i in 0..=cell_count {
        let blocked = if i < cell_count {
            let cell_start = points[i];
            records.iter().any(|record| {
                record
                    .unavailable
                    .iter()
                    .any(|iv| iv.covers_cell(day, cell_start))
            })
        } else {
            // Sentinel past the last cell closes any open run
            true
        };

        match (blocked, run_start) {
            (false, None) => run_start = Some(i),
            (true, Some(start)) => {
                let window = FreeWindow::new(day, points[start], points[i]);
                if window.duration_minutes >= min_window_minutes {
                    windows.push(window);
                }
                run_start = None;
            }
            _ => {}
        }
    }

    windows
}
