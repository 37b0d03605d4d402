//! Property-based tests for board initialization and move reconciliation

use proptest::prelude::*;
use taskboard_kanban::{BoardState, Location, MoveGesture, Rank, Section, SectionId, Task, TaskId};

const PROJECT: &str = "p1";

fn column_name(index: usize) -> String {
    format!("col{index}")
}

/// Board with one column per entry, tasks ranked in order
fn board_with_lengths(lengths: &[usize]) -> BoardState {
    let sections = (0..lengths.len())
        .map(|c| Section::new(column_name(c), format!("Column {c}"), PROJECT))
        .collect();
    let mut tasks = Vec::new();
    for (c, &len) in lengths.iter().enumerate() {
        for (i, rank) in Rank::sequence(len).into_iter().enumerate() {
            tasks.push(
                Task::new(format!("c{c}-t{i}"), format!("Task {i}"), column_name(c))
                    .with_project(PROJECT)
                    .with_rank(rank),
            );
        }
    }
    let mut board = BoardState::new();
    board.initialize(sections, tasks);
    board
}

fn ids_of(board: &BoardState, column: &str) -> Vec<TaskId> {
    board.task_ids(&SectionId::from(column)).unwrap()
}

/// (section index, belongs to project) pairs; an index past the last section is an orphan
fn task_specs(sections: usize) -> impl Strategy<Value = Vec<(usize, bool)>> {
    prop::collection::vec((0..=sections, any::<bool>()), 0..40)
}

fn board_spec() -> impl Strategy<Value = (usize, Vec<(usize, bool)>)> {
    (1usize..5).prop_flat_map(|n| (Just(n), task_specs(n)))
}

proptest! {
    /// Property: initialize places every eligible task exactly once, in input order
    #[test]
    fn prop_initialize_partitions_tasks((sections, specs) in board_spec()) {
        let section_list: Vec<Section> = (0..sections)
            .map(|c| Section::new(column_name(c), "Column", PROJECT))
            .collect();
        let tasks: Vec<Task> = specs
            .iter()
            .enumerate()
            .map(|(i, &(section, in_project))| {
                let task = Task::new(format!("t{i}"), "Task", column_name(section));
                if in_project { task.with_project(PROJECT) } else { task.with_project("other") }
            })
            .collect();

        let mut board = BoardState::new();
        board.initialize(section_list, tasks.clone());

        let mut placed = 0;
        for c in 0..sections {
            let expected: Vec<TaskId> = tasks
                .iter()
                .zip(&specs)
                .filter(|(_, spec)| spec.0 == c && spec.1)
                .map(|(t, _)| t.id.clone())
                .collect();
            placed += expected.len();
            prop_assert_eq!(ids_of(&board, &column_name(c)), expected);
        }
        prop_assert_eq!(board.task_count(), placed);
        prop_assert_eq!(board.column_count(), sections);
    }

    /// Property: dropping a task back onto its own slot changes nothing
    #[test]
    fn prop_same_slot_is_noop(len in 1usize..12, pick in any::<prop::sample::Index>()) {
        let mut board = board_with_lengths(&[len, 2]);
        let before = board.clone();
        let index = pick.index(len);

        let outcome = board
            .move_task(&MoveGesture::new(Location::new("col0", index), Location::new("col0", index)))
            .unwrap()
            .unwrap();

        prop_assert!(!outcome.changed);
        prop_assert_eq!(board, before);
    }

    /// Property: a cross-column move shifts exactly one task and keeps relative order
    #[test]
    fn prop_cross_column_move(
        source_len in 1usize..10,
        dest_len in 0usize..10,
        pick in any::<prop::sample::Index>(),
        dest_index in 0usize..14,
    ) {
        let mut board = board_with_lengths(&[source_len, dest_len, 3]);
        let before = board.clone();
        let source_index = pick.index(source_len);
        let moved = ids_of(&board, "col0")[source_index].clone();

        board
            .move_task(&MoveGesture::new(Location::new("col0", source_index), Location::new("col1", dest_index)))
            .unwrap();

        let mut expected_source = ids_of(&before, "col0");
        expected_source.remove(source_index);
        let mut expected_dest = ids_of(&before, "col1");
        expected_dest.insert(dest_index.min(dest_len), moved.clone());

        prop_assert_eq!(ids_of(&board, "col0"), expected_source);
        prop_assert_eq!(ids_of(&board, "col1"), expected_dest);
        prop_assert_eq!(ids_of(&board, "col2"), ids_of(&before, "col2"));
        prop_assert_eq!(board.task(&moved).unwrap().section.as_str(), "col1");
    }

    /// Property: ranks stay strictly increasing within every column after any sequence of moves
    #[test]
    fn prop_ranks_stay_ordered(
        lengths in prop::collection::vec(0usize..6, 3),
        moves in prop::collection::vec((0usize..3, any::<prop::sample::Index>(), 0usize..3, 0usize..8), 1..30),
    ) {
        let mut board = board_with_lengths(&lengths);

        for (from, pick, to, index) in moves {
            let len = board.column(&SectionId::from(column_name(from))).unwrap().len();
            if len == 0 {
                continue;
            }
            board
                .move_task(&MoveGesture::new(
                    Location::new(column_name(from), pick.index(len)),
                    Location::new(column_name(to), index),
                ))
                .unwrap();

            for column in board.columns() {
                for pair in column.tasks.windows(2) {
                    prop_assert!(
                        pair[0].rank < pair[1].rank,
                        "{} !< {} in {}", pair[0].rank, pair[1].rank, column.id()
                    );
                }
            }
        }
        prop_assert_eq!(board.task_count(), lengths.iter().sum::<usize>());
    }
}
