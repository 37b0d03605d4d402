//! End-to-end drag scenarios: raw drop results through the store

use taskboard_kanban::{
    BoardAction, BoardStore, DropResult, KanbanError, Project, Section, SectionId, Task, TaskId,
    UserId,
};

fn store(columns: Vec<(&str, Vec<&str>)>) -> BoardStore {
    let mut store = BoardStore::for_project("p1");
    let sections = columns
        .iter()
        .map(|(id, _)| Section::new(*id, id.to_uppercase(), "p1"))
        .collect();
    let tasks = columns
        .iter()
        .flat_map(|(column, ids)| {
            ids.iter()
                .map(move |id| Task::new(*id, *id, *column).with_project("p1"))
        })
        .collect();
    store
        .dispatch(BoardAction::Initialize { sections, tasks })
        .unwrap();
    store
}

fn ids(store: &BoardStore, column: &str) -> Vec<String> {
    store
        .state()
        .task_ids(&SectionId::from(column))
        .unwrap()
        .iter()
        .map(TaskId::to_string)
        .collect()
}

fn release(store: &mut BoardStore, json: &str) -> Result<(), KanbanError> {
    let gesture = DropResult::parse(json)?.into_gesture();
    store.move_task(&gesture).map(|_| ())
}

#[test]
fn test_drag_to_empty_column() {
    let mut store = store(vec![("colA", vec!["T1", "T2"]), ("colB", vec![])]);

    release(
        &mut store,
        r#"{
            "draggableId": "T1",
            "source": {"droppableId": "colA", "index": 0},
            "destination": {"droppableId": "colB", "index": 0},
            "reason": "DROP"
        }"#,
    )
    .unwrap();

    assert_eq!(ids(&store, "colA"), vec!["T2"]);
    assert_eq!(ids(&store, "colB"), vec!["T1"]);
    let t1 = store.state().task(&"T1".into()).unwrap();
    assert_eq!(t1.section.as_str(), "colB");
}

#[test]
fn test_drag_last_to_first() {
    let mut store = store(vec![("colA", vec!["T1", "T2", "T3"])]);

    release(
        &mut store,
        r#"{
            "draggableId": "T3",
            "source": {"droppableId": "colA", "index": 2},
            "destination": {"droppableId": "colA", "index": 0}
        }"#,
    )
    .unwrap();

    assert_eq!(ids(&store, "colA"), vec!["T3", "T1", "T2"]);
}

#[test]
fn test_drop_outside_leaves_board_alone() {
    let mut store = store(vec![("colA", vec!["T1", "T2"]), ("colB", vec!["T3"])]);
    let before = store.state().clone();

    release(
        &mut store,
        r#"{"draggableId": "T1", "source": {"droppableId": "colA", "index": 0}, "destination": null, "reason": "CANCEL"}"#,
    )
    .unwrap();

    assert_eq!(store.state(), &before);
    assert_eq!(store.revision(), 1);
}

#[test]
fn test_stale_drop_is_rejected() {
    let mut store = store(vec![("colA", vec!["T1", "T2"]), ("colB", vec![])]);
    let before = store.state().clone();

    let result = release(
        &mut store,
        r#"{
            "draggableId": "T2",
            "source": {"droppableId": "colA", "index": 0},
            "destination": {"droppableId": "colB", "index": 0}
        }"#,
    );

    assert!(matches!(result, Err(KanbanError::StaleGesture { .. })));
    assert_eq!(store.state(), &before);
}

#[test]
fn test_malformed_drop_is_a_parse_error() {
    let mut store = store(vec![("colA", vec!["T1"])]);
    let result = release(&mut store, r#"{"source": "colA"}"#);
    assert!(matches!(result, Err(KanbanError::Parse { .. })));
}

#[test]
fn test_project_access() {
    let mut project = Project::new("p1", "Launch", "owner");
    project.add_member(UserId::from("member"));

    let owner = UserId::from("owner");
    let member = UserId::from("member");
    let stranger = UserId::from("stranger");

    assert!(project.is_owner(&owner));
    assert!(!project.is_owner(&member));
    assert!(project.is_member(Some(&member)));
    assert!(!project.is_member(None));
    assert!(project.can_access(Some(&owner)));
    assert!(project.can_access(Some(&member)));
    assert!(!project.can_access(Some(&stranger)));
    assert!(!project.can_access(None));
}
