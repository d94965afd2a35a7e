//! End-to-end scheduling workflow tests.

use std::sync::Arc;

use tokio::sync::RwLock;

use huddle::{
    AppointmentError, AvailabilityError, Day, EmbeddedGroupStore, FreeWindow, GroupMember,
    HuddleError, Interval, Scheduler, StaticMembership, TimePoint,
};

const GROUP: &str = "rust-study";

fn t(s: &str) -> TimePoint {
    TimePoint::parse(s).unwrap()
}

fn iv(day: Day, start: &str, end: &str) -> Interval {
    Interval::new(day, t(start), t(end))
}

/// Three members, one admin ("alice").
fn create_scheduler() -> Scheduler<EmbeddedGroupStore> {
    let membership = StaticMembership::new();
    membership.add_member(GROUP, GroupMember::admin("alice"));
    membership.add_member(GROUP, GroupMember::new("bob"));
    membership.add_member(GROUP, GroupMember::new("carol"));

    Scheduler::new(
        Arc::new(RwLock::new(EmbeddedGroupStore::new())),
        Arc::new(membership),
    )
}

#[tokio::test]
async fn no_submissions_yields_full_window_every_day() {
    let scheduler = create_scheduler();

    let days = scheduler.compute_free_windows(GROUP).await.unwrap();
    assert_eq!(days.len(), 7);
    for day_avail in &days {
        assert_eq!(day_avail.available_blocks.len(), 1);
        let w = day_avail.available_blocks[0];
        assert_eq!(w.start, t("09:00"));
        assert_eq!(w.end, t("21:00"));
    }
}

#[tokio::test]
async fn overlapping_blocks_split_the_day() {
    let scheduler = create_scheduler();

    // Bob blocks Monday 10:00-12:00, Carol blocks Monday 11:00-13:00.
    scheduler
        .add_unavailability(GROUP, "bob", iv(Day::Monday, "10:00", "12:00"))
        .await
        .unwrap();
    scheduler
        .add_unavailability(GROUP, "carol", iv(Day::Monday, "11:00", "13:00"))
        .await
        .unwrap();

    let days = scheduler.compute_free_windows(GROUP).await.unwrap();
    let monday = days.iter().find(|d| d.day == Day::Monday).unwrap();

    assert_eq!(monday.available_blocks.len(), 2);
    assert_eq!(monday.available_blocks[0].start, t("09:00"));
    assert_eq!(monday.available_blocks[0].end, t("10:00"));
    assert_eq!(monday.available_blocks[1].start, t("13:00"));
    assert_eq!(monday.available_blocks[1].end, t("21:00"));
}

#[tokio::test]
async fn day_below_threshold_is_omitted() {
    let scheduler = create_scheduler();

    // Only 20:30-21:00 stays free on Monday: 30 minutes, below the
    // 60-minute threshold, so Monday disappears from the result.
    scheduler
        .add_unavailability(GROUP, "bob", iv(Day::Monday, "09:00", "20:30"))
        .await
        .unwrap();

    let days = scheduler.compute_free_windows(GROUP).await.unwrap();
    assert_eq!(days.len(), 6);
    assert!(days.iter().all(|d| d.day != Day::Monday));
}

#[tokio::test]
async fn confirmation_marks_window_and_blocks_second_confirmation() {
    let scheduler = create_scheduler();
    let window = FreeWindow::new(Day::Monday, t("13:00"), t("14:00"));

    scheduler
        .confirm_appointment(GROUP, &window, "Kickoff", "alice")
        .await
        .unwrap();

    assert!(scheduler
        .is_confirmed(GROUP, Day::Monday, t("13:00"), t("14:00"))
        .await
        .unwrap());

    let err = scheduler
        .confirm_appointment(GROUP, &window, "Kickoff again", "alice")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        HuddleError::Appointment(AppointmentError::SlotAlreadyConfirmed { .. })
    ));
}

#[tokio::test]
async fn non_admin_confirmation_creates_nothing() {
    let scheduler = create_scheduler();
    let window = FreeWindow::new(Day::Monday, t("13:00"), t("14:00"));

    let err = scheduler
        .confirm_appointment(GROUP, &window, "Kickoff", "bob")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        HuddleError::Appointment(AppointmentError::PermissionDenied(_))
    ));
    assert!(scheduler.list_appointments(GROUP).await.unwrap().is_empty());
}

#[tokio::test]
async fn submission_status_tracks_members() {
    let scheduler = create_scheduler();

    let status = scheduler.submission_status(GROUP).await.unwrap();
    assert_eq!(status.percentage, 0);
    assert!(!status.all_submitted);

    scheduler
        .add_unavailability(GROUP, "alice", iv(Day::Tuesday, "18:00", "19:00"))
        .await
        .unwrap();
    let status = scheduler.submission_status(GROUP).await.unwrap();
    assert_eq!(status.submitted, 1);
    assert_eq!(status.percentage, 33);

    scheduler
        .add_unavailability(GROUP, "bob", iv(Day::Tuesday, "18:00", "19:00"))
        .await
        .unwrap();
    scheduler
        .add_unavailability(GROUP, "carol", iv(Day::Friday, "09:00", "10:30"))
        .await
        .unwrap();

    let status = scheduler.submission_status(GROUP).await.unwrap();
    assert_eq!(status.percentage, 100);
    assert!(status.all_submitted);

    // Removing the only entry takes the member back to not-submitted
    scheduler
        .remove_unavailability(GROUP, "carol", 0)
        .await
        .unwrap();
    let status = scheduler.submission_status(GROUP).await.unwrap();
    assert_eq!(status.submitted, 2);
    assert!(!status.all_submitted);
}

#[tokio::test]
async fn aggregation_is_idempotent() {
    let scheduler = create_scheduler();
    scheduler
        .add_unavailability(GROUP, "bob", iv(Day::Monday, "10:00", "12:00"))
        .await
        .unwrap();
    scheduler
        .add_unavailability(GROUP, "carol", iv(Day::Thursday, "14:00", "16:00"))
        .await
        .unwrap();

    let first = scheduler.compute_free_windows(GROUP).await.unwrap();
    let second = scheduler.compute_free_windows(GROUP).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn no_two_appointments_overlap() {
    let scheduler = create_scheduler();

    let attempts = [
        FreeWindow::new(Day::Monday, t("09:00"), t("11:00")),
        FreeWindow::new(Day::Monday, t("10:00"), t("12:00")),
        FreeWindow::new(Day::Monday, t("11:00"), t("12:00")),
        FreeWindow::new(Day::Tuesday, t("09:00"), t("10:00")),
        FreeWindow::new(Day::Monday, t("10:30"), t("13:00")),
    ];
    for (i, window) in attempts.iter().enumerate() {
        let _ = scheduler
            .confirm_appointment(GROUP, window, &format!("Session {i}"), "alice")
            .await;
    }

    let appointments = scheduler.list_appointments(GROUP).await.unwrap();
    assert!(!appointments.is_empty());
    for i in 0..appointments.len() {
        for j in (i + 1)..appointments.len() {
            let a = &appointments[i];
            let b = &appointments[j];
            assert!(!a.overlaps(b.day, b.start, b.end), "{:?} overlaps {:?}", a, b);
        }
    }
}

#[tokio::test]
async fn deleted_appointment_window_reappears() {
    let scheduler = create_scheduler();

    // Block everything on Monday except 13:00-14:00, confirm it, delete it.
    scheduler
        .add_unavailability(GROUP, "bob", iv(Day::Monday, "09:00", "13:00"))
        .await
        .unwrap();
    scheduler
        .add_unavailability(GROUP, "bob", iv(Day::Monday, "14:00", "21:00"))
        .await
        .unwrap();

    let days = scheduler.compute_free_windows(GROUP).await.unwrap();
    let monday = days.iter().find(|d| d.day == Day::Monday).unwrap();
    let window = monday.available_blocks[0];
    assert_eq!(window.start, t("13:00"));
    assert_eq!(window.end, t("14:00"));

    let appt = scheduler
        .confirm_appointment(GROUP, &window, "Kickoff", "alice")
        .await
        .unwrap();
    scheduler
        .delete_appointment(GROUP, &appt.id, "alice")
        .await
        .unwrap();

    // Aggregation tracks no history: the window is offered again and can
    // be confirmed again.
    let days = scheduler.compute_free_windows(GROUP).await.unwrap();
    let monday = days.iter().find(|d| d.day == Day::Monday).unwrap();
    assert_eq!(monday.available_blocks[0], window);
    scheduler
        .confirm_appointment(GROUP, &window, "Kickoff, take two", "alice")
        .await
        .unwrap();
}

#[tokio::test]
async fn later_unavailability_never_invalidates_appointments() {
    let scheduler = create_scheduler();
    let window = FreeWindow::new(Day::Monday, t("13:00"), t("14:00"));

    scheduler
        .confirm_appointment(GROUP, &window, "Kickoff", "alice")
        .await
        .unwrap();

    // Bob later blocks the very same slot; the appointment stands.
    scheduler
        .add_unavailability(GROUP, "bob", iv(Day::Monday, "13:00", "14:00"))
        .await
        .unwrap();

    let appointments = scheduler.list_appointments(GROUP).await.unwrap();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].title, "Kickoff");

    // But the slot no longer shows up as free.
    let days = scheduler.compute_free_windows(GROUP).await.unwrap();
    let monday = days.iter().find(|d| d.day == Day::Monday).unwrap();
    assert!(monday
        .available_blocks
        .iter()
        .all(|w| !(w.start <= t("13:00") && t("14:00") <= w.end)));
}

#[tokio::test]
async fn member_departure_frees_their_blocks() {
    let scheduler = create_scheduler();
    scheduler
        .add_unavailability(GROUP, "bob", iv(Day::Monday, "09:00", "21:00"))
        .await
        .unwrap();

    let days = scheduler.compute_free_windows(GROUP).await.unwrap();
    assert!(days.iter().all(|d| d.day != Day::Monday));

    scheduler
        .remove_member_unavailability(GROUP, "bob")
        .await
        .unwrap();

    let days = scheduler.compute_free_windows(GROUP).await.unwrap();
    let monday = days.iter().find(|d| d.day == Day::Monday).unwrap();
    assert_eq!(monday.available_blocks[0].duration_minutes, 720);
}

#[tokio::test]
async fn validation_errors_surface_through_the_engine() {
    let scheduler = create_scheduler();

    let err = scheduler
        .add_unavailability(GROUP, "bob", iv(Day::Monday, "12:00", "10:00"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        HuddleError::Availability(AvailabilityError::InvalidRange { .. })
    ));

    let err = scheduler
        .add_unavailability(GROUP, "bob", iv(Day::Monday, "10:10", "11:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, HuddleError::Grid(_)));

    let err = scheduler
        .remove_unavailability(GROUP, "bob", 0)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        HuddleError::Availability(AvailabilityError::EntryNotFound { .. })
    ));
}
