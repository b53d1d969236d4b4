//! End-to-end scenarios: action → reducer → persist → render.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::sync::Arc;
use taskboard::{
    parse_line, AppState, Command, FileStorage, FrameRenderer, ListId, ParseError,
    PersistenceGateway, TaskboardAction, TaskboardEnvironment, TaskboardReducer, TaskboardShell, TaskboardStore,
};
use taskboard::persistence::{DEFAULT_LISTS_KEY, DEFAULT_SELECTED_LIST_KEY};
use taskboard::render::RenderStats;
use taskboard_core::environment::KeyValueStorage;
use taskboard_runtime::{Store, StoreError};
use taskboard_testing::{MemoryStorage, SequentialIdGenerator};

fn store_over<K: KeyValueStorage>(storage: K) -> TaskboardStore<K, FrameRenderer> {
    let gateway = PersistenceGateway::new(storage);
    let state = gateway.load().unwrap();
    let env = TaskboardEnvironment::new(Arc::new(SequentialIdGenerator::new()));
    let mut store = Store::new(
        state,
        TaskboardReducer::new(),
        env,
        TaskboardShell::new(gateway, FrameRenderer::new()),
    );
    store.render().unwrap();
    store
}

fn create_list<K: KeyValueStorage>(store: &mut TaskboardStore<K, FrameRenderer>, name: &str) {
    store
        .send(TaskboardAction::CreateList {
            name: name.to_string(),
        })
        .unwrap();
}

fn select_by_name<K: KeyValueStorage>(store: &mut TaskboardStore<K, FrameRenderer>, name: &str) {
    let list_id = store
        .state(|s| s.lists.iter().find(|l| l.name == name).map(|l| l.id.clone()))
        .unwrap();
    store.send(TaskboardAction::SelectList { list_id }).unwrap();
}

fn count_line<K: KeyValueStorage>(store: &TaskboardStore<K, FrameRenderer>) -> Option<String> {
    store.shell().renderer().frame().count_line()
}

#[test]
fn groceries_count_follows_toggle_and_clear() {
    let mut store = store_over(MemoryStorage::new());

    create_list(&mut store, "Groceries");
    select_by_name(&mut store, "Groceries");
    store
        .send(TaskboardAction::CreateTask {
            name: "Milk".to_string(),
        })
        .unwrap();
    assert_eq!(count_line(&store).as_deref(), Some("1 task remaining"));

    let task_id = store.state(|s| s.selected_list().unwrap().tasks[0].id.clone());
    store
        .send(TaskboardAction::ToggleTask {
            task_id,
            checked: true,
        })
        .unwrap();
    assert_eq!(count_line(&store).as_deref(), Some("0 tasks remaining"));

    store.send(TaskboardAction::ClearCompleteTasks).unwrap();
    assert!(store.state(|s| s.selected_list().unwrap().tasks.is_empty()));
    assert_eq!(count_line(&store).as_deref(), Some("0 tasks remaining"));
}

#[test]
fn deleting_selected_list_hides_detail_panel() {
    let mut store = store_over(MemoryStorage::new());

    create_list(&mut store, "A");
    create_list(&mut store, "B");
    select_by_name(&mut store, "A");
    assert!(store.shell().renderer().frame().detail_visible());

    store.send(TaskboardAction::DeleteList).unwrap();

    let (names, selected) = store.state(|s| {
        (
            s.lists.iter().map(|l| l.name.clone()).collect::<Vec<_>>(),
            s.selected_list_id.clone(),
        )
    });
    assert_eq!(names, vec!["B"]);
    assert_eq!(selected, None);

    let frame = store.shell().renderer().frame();
    assert!(!frame.detail_visible());
    assert_eq!(frame.lists.len(), 1);
    assert!(!frame.lists[0].active);
}

#[test]
fn invalid_list_json_loads_empty() {
    let storage = MemoryStorage::with_entries([
        (DEFAULT_LISTS_KEY, "{{ definitely not json"),
        (DEFAULT_SELECTED_LIST_KEY, "null"),
    ]);

    let store = store_over(storage);

    assert_eq!(store.state(Clone::clone), AppState::new());
    assert!(store.shell().renderer().frame().lists.is_empty());
    assert!(!store.shell().renderer().frame().detail_visible());
}

#[test]
fn toggle_redraws_count_only() {
    let mut store = store_over(MemoryStorage::new());
    create_list(&mut store, "Groceries");
    select_by_name(&mut store, "Groceries");
    store
        .send(TaskboardAction::CreateTask {
            name: "Milk".to_string(),
        })
        .unwrap();
    let before = store.shell().renderer().stats();

    let task_id = store.state(|s| s.selected_list().unwrap().tasks[0].id.clone());
    store
        .send(TaskboardAction::ToggleTask {
            task_id,
            checked: true,
        })
        .unwrap();

    assert_eq!(
        store.shell().renderer().stats(),
        RenderStats {
            task_count: before.task_count + 1,
            ..before
        }
    );
}

#[test]
fn failed_write_rolls_back_memory() {
    let storage = MemoryStorage::new();
    let mut store = store_over(storage.clone());
    create_list(&mut store, "Kept");
    let persisted = store.state(Clone::clone);
    let stats = store.shell().renderer().stats();

    storage.fail_writes(true);
    let result = store.send(TaskboardAction::CreateList {
        name: "Lost".to_string(),
    });

    assert!(matches!(result, Err(StoreError::Persist(_))));
    assert_eq!(store.state(Clone::clone), persisted);
    // Nothing is drawn for a rejected mutation
    assert_eq!(store.shell().renderer().stats(), stats);

    storage.fail_writes(false);
    create_list(&mut store, "Retried");
    assert_eq!(store.state(|s| s.lists.len()), 2);
}

#[test]
fn contract_violation_touches_nothing() {
    let storage = MemoryStorage::new();
    let mut store = store_over(storage.clone());

    let result = store.send(TaskboardAction::ClearCompleteTasks);

    assert!(matches!(result, Err(StoreError::ContractViolation(_))));
    assert_eq!(store.state(Clone::clone), AppState::new());
    assert!(storage.is_empty());
}

#[test]
fn blank_names_are_ignored_without_writes() {
    let storage = MemoryStorage::new();
    let mut store = store_over(storage.clone());

    create_list(&mut store, "   ");

    assert_eq!(store.state(|s| s.lists.len()), 0);
    assert!(storage.is_empty());
}

#[test]
fn state_survives_reload() {
    let storage = MemoryStorage::new();
    let mut store = store_over(storage.clone());
    create_list(&mut store, "Groceries");
    create_list(&mut store, "Work");
    select_by_name(&mut store, "Work");
    store
        .send(TaskboardAction::CreateTask {
            name: "Report".to_string(),
        })
        .unwrap();

    let reloaded = store_over(storage);

    assert_eq!(reloaded.state(Clone::clone), store.state(Clone::clone));
    assert_eq!(
        reloaded.shell().renderer().frame(),
        store.shell().renderer().frame()
    );
}

#[test]
fn typed_commands_drive_the_store() {
    let mut store = store_over(MemoryStorage::new());

    for line in [
        "list add Groceries",
        "list add Work",
        "list select 1",
        "task add Milk",
        "task add Eggs",
        "task check 2",
    ] {
        match store.state(|s| parse_line(line, s)).unwrap() {
            Command::Intent(intent) => store.send(intent.into()).unwrap(),
            other => panic!("{line:?} parsed as {other:?}"),
        }
    }

    assert_eq!(count_line(&store).as_deref(), Some("1 task remaining"));
    let frame = store.shell().renderer().frame();
    assert!(frame.lists[0].active);
    let detail = frame.detail.as_ref().unwrap();
    assert_eq!(detail.title, "Groceries");
    assert_eq!(detail.tasks.len(), 2);
}

#[test]
fn corrupt_storage_file_starts_empty_board() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskboard.json");
    std::fs::write(&path, "{\"task.lists\": \"[").unwrap();

    let mut store = store_over(FileStorage::open(&path).unwrap());
    assert_eq!(store.state(Clone::clone), AppState::new());

    create_list(&mut store, "Groceries");
    let reopened = PersistenceGateway::new(FileStorage::open(&path).unwrap());
    assert_eq!(reopened.load().unwrap().lists.len(), 1);
}

#[test]
fn reserved_list_id_never_reaches_storage() {
    let storage = MemoryStorage::new();
    let mut store = store_over(storage.clone());

    let result = store.send(TaskboardAction::ListCreated {
        id: ListId::new("null"),
        name: "Replayed".to_string(),
    });

    assert!(matches!(result, Err(StoreError::ContractViolation(_))));
    assert!(storage.is_empty());
}

#[test]
fn task_commands_without_selection_raise_no_intent() {
    let mut store = store_over(MemoryStorage::new());
    create_list(&mut store, "Groceries");

    for line in ["task add Milk", "task clear"] {
        assert_eq!(
            store.state(|s| parse_line(line, s)),
            Err(ParseError::NoListSelected),
            "{line}"
        );
    }
}

#[test]
fn file_storage_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskboard.json");

    let mut store = store_over(FileStorage::open(&path).unwrap());
    create_list(&mut store, "Groceries");
    select_by_name(&mut store, "Groceries");
    let (state, _shell) = store.into_parts();

    let reopened = PersistenceGateway::new(FileStorage::open(&path).unwrap());
    assert_eq!(reopened.load().unwrap(), state);
}
