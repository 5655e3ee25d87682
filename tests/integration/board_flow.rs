//! Integration tests for the board lifecycle: initialization, CRUD,
//! drag/drop moves with WIP limits, filtering and change notification.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::similar_names)]

use std::sync::Arc;

use taskboard::seed::{NoSeed, StaticSeed};
use taskboard::store::InMemoryStore;
use taskboard::{
    Board, BoardManager, Column, ColumnId, DropEvent, FilterState, InitSource, NewTask, NoOpReason,
    Outcome, SharedBoard, Task, TaskId, TaskPatch,
};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn task(id: &str, column: &str) -> Task {
    NewTask::new(format!("Task {id}"), column).into_task(TaskId::from(id))
}

fn wip_board() -> Board {
    Board::new(
        vec![
            Column::new("todo", "To Do").with_wip_limit(2),
            Column::new("doing", "Doing").with_wip_limit(1),
        ],
        vec![task("t1", "todo"), task("t2", "todo")],
    )
}

fn team_board() -> Board {
    Board::new(
        vec![
            Column::new("backlog", "Backlog"),
            Column::new("doing", "In Progress").with_wip_limit(3),
            Column::new("done", "Done"),
        ],
        vec![
            NewTask::new("Login page", "backlog")
                .with_assignee("alice")
                .with_priority("P1")
                .with_tags(["ui"])
                .into_task("a1".into()),
            NewTask::new("Rate limiter", "doing")
                .with_assignee("bob")
                .with_priority("P2")
                .with_tags(["api", "ops"])
                .into_task("b1".into()),
            NewTask::new("Dark mode", "backlog")
                .with_assignee("alice")
                .with_tags(["ui"])
                .into_task("a2".into()),
            NewTask::new("Audit log", "done")
                .with_assignee("bob")
                .with_priority("P1")
                .into_task("b2".into()),
        ],
    )
}

async fn manager_with(board: Board) -> BoardManager<Arc<InMemoryStore>> {
    let mut manager = BoardManager::new(Arc::new(InMemoryStore::new()));
    manager.initialize(&StaticSeed::new(board)).await;
    manager
}

fn column_ids(manager: &BoardManager<Arc<InMemoryStore>>, column: &str) -> Vec<String> {
    manager
        .state()
        .tasks_by_column()
        .get(&ColumnId::from(column))
        .iter()
        .map(|t| t.id.to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn wip_limited_moves() {
    let mut manager = manager_with(wip_board()).await;

    assert!(!manager.is_at_wip_limit(&"doing".into()));
    assert!(manager.is_near_wip_limit(&"doing".into()));
    assert_eq!(
        manager.move_task(&"t1".into(), &"doing".into(), None),
        Outcome::Applied
    );
    assert!(manager.is_at_wip_limit(&"doing".into()));

    let before = manager.state().board().as_ref().clone();
    assert_eq!(
        manager.move_task(&"t2".into(), &"doing".into(), None),
        Outcome::Unchanged(NoOpReason::WipLimitReached)
    );
    assert_eq!(manager.state().board().as_ref(), &before);
}

#[tokio::test]
async fn create_on_empty_board() {
    let mut manager = BoardManager::new(InMemoryStore::new());
    assert_eq!(manager.initialize(&NoSeed).await, InitSource::Empty);

    let id = manager
        .create_task(NewTask::new("X", "todo"))
        .expect("initialized board accepts tasks");
    assert_eq!(manager.state().tasks().len(), 1);
    assert!(!id.as_str().is_empty());
}

#[tokio::test]
async fn update_missing_id_is_silent() {
    let mut manager = manager_with(wip_board()).await;
    let before = manager.state().tasks().to_vec();
    let patch = TaskPatch {
        title: Some("Renamed".into()),
        ..TaskPatch::default()
    };
    assert_eq!(
        manager.update_task(&"missing-id".into(), &patch),
        Outcome::Unchanged(NoOpReason::TaskNotFound)
    );
    assert_eq!(manager.state().tasks(), before.as_slice());
}

#[tokio::test]
async fn edit_keeps_position_and_may_change_column() {
    let mut manager = manager_with(team_board()).await;
    let patch = TaskPatch {
        title: Some("Login + SSO".into()),
        column_id: Some("done".into()),
        ..TaskPatch::default()
    };
    assert!(manager.update_task(&"a1".into(), &patch).is_applied());

    let order: Vec<&str> = manager.state().tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(order, vec!["a1", "b1", "a2", "b2"]);
    assert_eq!(column_ids(&manager, "done"), vec!["a1", "b2"]);
    assert_eq!(manager.state().tasks()[0].title, "Login + SSO");
}

#[tokio::test]
async fn drag_across_and_within_columns() {
    let mut manager = manager_with(team_board()).await;

    // Drop "Dark mode" at the top of In Progress.
    let drop = DropEvent {
        source_column_id: "backlog".into(),
        target_column_id: "doing".into(),
        task_id: "a2".into(),
        previous_index: 1,
        target_index: 0,
    };
    assert!(manager.handle_drop(&drop).is_applied());
    assert_eq!(column_ids(&manager, "doing"), vec!["a2", "b1"]);
    assert_eq!(column_ids(&manager, "backlog"), vec!["a1"]);

    // Reorder it below the rate limiter.
    let reorder = DropEvent {
        source_column_id: "doing".into(),
        target_column_id: "doing".into(),
        task_id: "a2".into(),
        previous_index: 0,
        target_index: 1,
    };
    assert!(manager.handle_drop(&reorder).is_applied());
    assert_eq!(column_ids(&manager, "doing"), vec!["b1", "a2"]);

    // Same slot: ignored.
    let idle = DropEvent {
        previous_index: 1,
        target_index: 1,
        ..reorder
    };
    assert_eq!(
        manager.handle_drop(&idle),
        Outcome::Unchanged(NoOpReason::SameIndex)
    );
}

fn shared_board() -> Board {
    let owned = |id: &str, column: &str, assignee: &str| {
        NewTask::new(format!("Task {id}"), column)
            .with_assignee(assignee)
            .into_task(TaskId::from(id))
    };
    Board::new(
        vec![Column::new("todo", "To Do"), Column::new("doing", "Doing")],
        vec![
            owned("a", "todo", "bob"),
            owned("b", "todo", "amy"),
            owned("c", "todo", "bob"),
            owned("d", "todo", "amy"),
            owned("x", "doing", "bob"),
            owned("y", "doing", "amy"),
        ],
    )
}

fn all_ids(manager: &BoardManager<Arc<InMemoryStore>>, column: &str) -> Vec<String> {
    manager
        .state()
        .board()
        .tasks_in(&ColumnId::from(column))
        .map(|t| t.id.to_string())
        .collect()
}

#[tokio::test]
async fn reorder_under_filter_moves_the_dragged_task() {
    let mut manager = manager_with(shared_board()).await;
    manager.update_filters(FilterState::new().with_assignee("amy"));
    assert_eq!(column_ids(&manager, "todo"), vec!["b", "d"]);

    let drop = DropEvent {
        source_column_id: "todo".into(),
        target_column_id: "todo".into(),
        task_id: "d".into(),
        previous_index: 1,
        target_index: 0,
    };
    assert!(manager.handle_drop(&drop).is_applied());
    assert_eq!(column_ids(&manager, "todo"), vec!["d", "b"]);
    assert_eq!(all_ids(&manager, "todo"), vec!["a", "d", "b", "c"]);

    // and back down past the end of the visible bucket
    let back = DropEvent {
        previous_index: 0,
        target_index: 1,
        ..drop
    };
    assert!(manager.handle_drop(&back).is_applied());
    assert_eq!(column_ids(&manager, "todo"), vec!["b", "d"]);
    assert_eq!(all_ids(&manager, "todo"), vec!["a", "b", "c", "d"]);
}

#[tokio::test]
async fn move_under_filter_lands_before_visible_neighbour() {
    let mut manager = manager_with(shared_board()).await;
    manager.update_filters(FilterState::new().with_assignee("amy"));
    assert_eq!(column_ids(&manager, "doing"), vec!["y"]);

    let drop = DropEvent {
        source_column_id: "todo".into(),
        target_column_id: "doing".into(),
        task_id: "b".into(),
        previous_index: 0,
        target_index: 0,
    };
    assert!(manager.handle_drop(&drop).is_applied());
    assert_eq!(column_ids(&manager, "doing"), vec!["b", "y"]);
    assert_eq!(all_ids(&manager, "doing"), vec!["x", "b", "y"]);
    assert_eq!(all_ids(&manager, "todo"), vec!["a", "c", "d"]);
}

#[tokio::test]
async fn move_with_index_beyond_count_appends() {
    let mut manager = manager_with(team_board()).await;
    assert!(manager
        .move_task(&"a1".into(), &"doing".into(), Some(99))
        .is_applied());
    assert_eq!(column_ids(&manager, "doing"), vec!["b1", "a1"]);
}

#[tokio::test]
async fn reorder_single_task_column_is_noop() {
    let mut manager = manager_with(team_board()).await;
    assert_eq!(
        manager.reorder_task(&"b1".into(), &"doing".into(), 0, 1),
        Outcome::Unchanged(NoOpReason::NothingToReorder)
    );
}

#[tokio::test]
async fn filters_compose_and_clear() {
    let mut manager = manager_with(team_board()).await;

    manager.update_filters(FilterState::new().with_assignee("alice").with_tag("ui"));
    let visible: Vec<&str> = manager
        .state()
        .filtered_tasks()
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(visible, vec!["a1", "a2"]);
    assert!(column_ids(&manager, "doing").is_empty());

    manager.update_filters(FilterState::new().with_priority("P1"));
    assert_eq!(column_ids(&manager, "backlog"), vec!["a1"]);
    assert_eq!(column_ids(&manager, "done"), vec!["b2"]);

    manager.clear_filters();
    assert_eq!(manager.state().filtered_tasks(), manager.state().tasks());
}

#[tokio::test]
async fn filter_option_lists() {
    let manager = manager_with(team_board()).await;
    assert_eq!(manager.state().unique_assignees(), vec!["alice", "bob"]);
    assert_eq!(manager.state().unique_priorities(), vec!["P1", "P2", "P3"]);
    assert_eq!(manager.state().unique_tags(), vec!["ui", "api", "ops"]);
}

#[tokio::test]
async fn delete_then_recreate() {
    let mut manager = manager_with(team_board()).await;
    assert!(manager.delete_task(&"b1".into()).is_applied());
    assert_eq!(
        manager.delete_task(&"b1".into()),
        Outcome::Unchanged(NoOpReason::TaskNotFound)
    );
    let id = manager
        .create_task_in_first_column(NewTask::new("Follow-up", "done"))
        .unwrap();
    assert_eq!(column_ids(&manager, "backlog"), vec!["a1".to_string(), "a2".into(), id.to_string()]);
}

#[tokio::test]
async fn watchers_follow_shared_board() {
    let shared = SharedBoard::new(BoardManager::new(InMemoryStore::new()));
    let mut rx = shared.subscribe().await;

    shared.initialize(&StaticSeed::new(wip_board())).await;
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().board.tasks.len(), 2);

    let drop = DropEvent {
        source_column_id: "todo".into(),
        target_column_id: "doing".into(),
        task_id: "t2".into(),
        previous_index: 1,
        target_index: 0,
    };
    assert!(shared.handle_drop(&drop).await.is_applied());
    rx.changed().await.unwrap();
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.board.task(&"t2".into()).unwrap().column_id.as_str(), "doing");
}
