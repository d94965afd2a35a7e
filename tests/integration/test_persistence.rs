//! Persistence tests: schedules survive a store restart.

use std::sync::Arc;

use tempfile::TempDir;
use tokio::sync::RwLock;

use huddle::{
    Day, EmbeddedGroupStore, FreeWindow, GroupMember, Interval, Scheduler, StaticMembership,
    TimePoint,
};

const GROUP: &str = "rust-study";

fn t(s: &str) -> TimePoint {
    TimePoint::parse(s).unwrap()
}

fn create_membership() -> Arc<StaticMembership> {
    let membership = StaticMembership::new();
    membership.add_member(GROUP, GroupMember::admin("alice"));
    membership.add_member(GROUP, GroupMember::new("bob"));
    Arc::new(membership)
}

async fn open_scheduler(
    dir: &TempDir,
    membership: Arc<StaticMembership>,
) -> Scheduler<EmbeddedGroupStore> {
    let store = EmbeddedGroupStore::with_persistence(dir.path())
        .await
        .unwrap();
    Scheduler::new(Arc::new(RwLock::new(store)), membership)
}

#[tokio::test]
async fn schedule_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let membership = create_membership();

    {
        let scheduler = open_scheduler(&dir, membership.clone()).await;
        scheduler
            .add_unavailability(
                GROUP,
                "bob",
                Interval::new(Day::Monday, t("10:00"), t("12:00")),
            )
            .await
            .unwrap();
        scheduler
            .confirm_appointment(
                GROUP,
                &FreeWindow::new(Day::Wednesday, t("18:00"), t("19:30")),
                "Review session",
                "alice",
            )
            .await
            .unwrap();
    }

    let scheduler = open_scheduler(&dir, membership).await;

    let intervals = scheduler.list_unavailability(GROUP, "bob").await.unwrap();
    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].start, t("10:00"));

    assert!(scheduler
        .is_confirmed(GROUP, Day::Wednesday, t("18:00"), t("19:30"))
        .await
        .unwrap());

    let appointments = scheduler.list_appointments(GROUP).await.unwrap();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].title, "Review session");

    // Aggregation over the reloaded data reflects the stored blocks.
    let days = scheduler.compute_free_windows(GROUP).await.unwrap();
    let monday = days.iter().find(|d| d.day == Day::Monday).unwrap();
    assert_eq!(monday.available_blocks[0].end, t("10:00"));
}

#[tokio::test]
async fn deletions_persist_across_reopen() {
    let dir = TempDir::new().unwrap();
    let membership = create_membership();

    {
        let scheduler = open_scheduler(&dir, membership.clone()).await;
        let appt = scheduler
            .confirm_appointment(
                GROUP,
                &FreeWindow::new(Day::Friday, t("09:00"), t("10:00")),
                "Standup",
                "alice",
            )
            .await
            .unwrap();
        scheduler
            .delete_appointment(GROUP, &appt.id, "alice")
            .await
            .unwrap();
    }

    let scheduler = open_scheduler(&dir, membership).await;
    assert!(!scheduler
        .is_confirmed(GROUP, Day::Friday, t("09:00"), t("10:00"))
        .await
        .unwrap());
    assert!(scheduler.list_appointments(GROUP).await.unwrap().is_empty());
}

#[tokio::test]
async fn fresh_directory_starts_empty() {
    let dir = TempDir::new().unwrap();
    let scheduler = open_scheduler(&dir, create_membership()).await;

    assert!(scheduler.list_appointments(GROUP).await.unwrap().is_empty());
    assert!(scheduler
        .list_unavailability(GROUP, "bob")
        .await
        .unwrap()
        .is_empty());
}
