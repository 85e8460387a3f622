use todolist_core::{MemoryTodoStore, SqliteTodoStore, StoreError, StoreErrorKind, TodoStore};

fn stores_with_groceries() -> Vec<(&'static str, Box<dyn TodoStore>)> {
    let stores: Vec<(&'static str, Box<dyn TodoStore>)> = vec![
        ("memory", Box::new(MemoryTodoStore::new()) as Box<dyn TodoStore>),
        (
            "sqlite",
            Box::new(SqliteTodoStore::open_in_memory().unwrap()) as Box<dyn TodoStore>,
        ),
    ];
    for (_, store) in &stores {
        store.create_list("groceries").unwrap();
    }
    stores
}

#[test]
fn add_then_get_returns_open_task() {
    for (backend, store) in stores_with_groceries() {
        let added = store.add_task("groceries", "milk").unwrap();
        assert_eq!(added.title, "milk", "{backend}");
        assert_eq!(added.list_name, "groceries", "{backend}");
        assert!(!added.done, "{backend}");

        let loaded = store.get_task("groceries", "milk").unwrap();
        assert_eq!(loaded, added, "{backend}");
    }
}

#[test]
fn add_validates_inputs_and_list() {
    for (backend, store) in stores_with_groceries() {
        assert_eq!(
            store.add_task("", "").unwrap_err().kind(),
            StoreErrorKind::EmptyField,
            "{backend}"
        );
        assert_eq!(
            store.add_task("groceries", "").unwrap_err().kind(),
            StoreErrorKind::EmptyField,
            "{backend}"
        );
        assert!(
            matches!(
                store.add_task("invalid", "milk").unwrap_err(),
                StoreError::ListNotFound(_)
            ),
            "{backend}"
        );
    }
}

#[test]
fn duplicate_title_is_rejected_and_count_stays() {
    for (backend, store) in stores_with_groceries() {
        store.add_task("groceries", "milk").unwrap();
        let err = store.add_task("groceries", "milk").unwrap_err();
        assert!(
            matches!(err, StoreError::TaskAlreadyExists { ref title, .. } if title == "milk"),
            "{backend}: {err}"
        );
        assert_eq!(
            store.get_list("groceries").unwrap().task_number(),
            1,
            "{backend}"
        );
    }
}

#[test]
fn same_title_is_allowed_in_different_lists() {
    for (backend, store) in stores_with_groceries() {
        store.create_list("party").unwrap();
        store.add_task("groceries", "chips").unwrap();
        let other = store.add_task("party", "chips").unwrap();
        assert_eq!(other.list_name, "party", "{backend}");
        assert_eq!(other.id, 1, "{backend}");
    }
}

#[test]
fn tasks_keep_insertion_order_and_increasing_ids() {
    for (backend, store) in stores_with_groceries() {
        for title in ["milk", "eggs", "bread"] {
            store.add_task("groceries", title).unwrap();
        }
        let list = store.get_list("groceries").unwrap();
        let titles: Vec<_> = list.tasks().iter().map(|task| task.title.as_str()).collect();
        let ids: Vec<_> = list.tasks().iter().map(|task| task.id).collect();
        assert_eq!(titles, vec!["milk", "eggs", "bread"], "{backend}");
        assert_eq!(ids, vec![1, 2, 3], "{backend}");
    }
}

#[test]
fn get_task_reports_missing_task() {
    for (backend, store) in stores_with_groceries() {
        let err = store.get_task("groceries", "milk").unwrap_err();
        assert!(
            matches!(err, StoreError::TaskNotFound { .. }),
            "{backend}: {err}"
        );
        assert_eq!(
            store.get_task("groceries", "").unwrap_err().kind(),
            StoreErrorKind::EmptyField,
            "{backend}"
        );
    }
}

#[test]
fn get_task_by_id_is_alternate_lookup() {
    for (backend, store) in stores_with_groceries() {
        store.add_task("groceries", "milk").unwrap();
        let eggs = store.add_task("groceries", "eggs").unwrap();

        let loaded = store.get_task_by_id("groceries", eggs.id).unwrap();
        assert_eq!(loaded.title, "eggs", "{backend}");

        let err = store.get_task_by_id("groceries", 99).unwrap_err();
        assert!(
            matches!(err, StoreError::TaskIdNotFound { id: 99, .. }),
            "{backend}: {err}"
        );
        assert!(
            matches!(
                store.get_task_by_id("missing", 1).unwrap_err(),
                StoreError::ListNotFound(_)
            ),
            "{backend}"
        );
    }
}

#[test]
fn update_renames_and_marks_done() {
    for (backend, store) in stores_with_groceries() {
        let original = store.add_task("groceries", "milk").unwrap();

        let updated = store
            .update_task("groceries", "milk", "oat milk", true)
            .unwrap();
        assert_eq!(updated.title, "oat milk", "{backend}");
        assert!(updated.done, "{backend}");
        assert_eq!(updated.id, original.id, "{backend}");

        let loaded = store.get_task("groceries", "oat milk").unwrap();
        assert!(loaded.done, "{backend}");
        assert!(
            matches!(
                store.get_task("groceries", "milk").unwrap_err(),
                StoreError::TaskNotFound { .. }
            ),
            "{backend}"
        );
    }
}

#[test]
fn update_with_blank_title_keeps_current_title() {
    for (backend, store) in stores_with_groceries() {
        store.add_task("groceries", "milk").unwrap();

        let updated = store.update_task("groceries", "milk", "", true).unwrap();
        assert_eq!(updated.title, "milk", "{backend}");
        assert!(updated.done, "{backend}");

        let reopened = store.update_task("groceries", "milk", " ", false).unwrap();
        assert_eq!(reopened.title, "milk", "{backend}");
        assert!(!reopened.done, "{backend}");
    }
}

#[test]
fn update_rejects_rename_onto_existing_title() {
    for (backend, store) in stores_with_groceries() {
        store.add_task("groceries", "milk").unwrap();
        store.add_task("groceries", "eggs").unwrap();

        let err = store
            .update_task("groceries", "milk", "eggs", true)
            .unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::AlreadyExists, "{backend}");
        assert!(
            !store.get_task("groceries", "milk").unwrap().done,
            "{backend}"
        );
    }
}

#[test]
fn update_reports_missing_list_and_task() {
    for (backend, store) in stores_with_groceries() {
        assert!(
            matches!(
                store.update_task("missing", "milk", "x", true).unwrap_err(),
                StoreError::ListNotFound(_)
            ),
            "{backend}"
        );
        assert!(
            matches!(
                store.update_task("groceries", "milk", "x", true).unwrap_err(),
                StoreError::TaskNotFound { .. }
            ),
            "{backend}"
        );
        assert_eq!(
            store.update_task("groceries", "", "x", true).unwrap_err().kind(),
            StoreErrorKind::EmptyField,
            "{backend}"
        );
    }
}

#[test]
fn remove_decrements_count_by_one() {
    for (backend, store) in stores_with_groceries() {
        store.add_task("groceries", "milk").unwrap();
        store.add_task("groceries", "eggs").unwrap();

        let removed = store.remove_task("groceries", "milk").unwrap();
        assert_eq!(removed.title, "milk", "{backend}");

        let list = store.get_list("groceries").unwrap();
        assert_eq!(list.task_number(), 1, "{backend}");
        assert_eq!(list.tasks()[0].title, "eggs", "{backend}");
        assert!(
            matches!(
                store.get_task("groceries", "milk").unwrap_err(),
                StoreError::TaskNotFound { .. }
            ),
            "{backend}"
        );
        assert!(
            matches!(
                store.remove_task("groceries", "milk").unwrap_err(),
                StoreError::TaskNotFound { .. }
            ),
            "{backend}"
        );
    }
}

#[test]
fn removed_ids_are_not_reused() {
    for (backend, store) in stores_with_groceries() {
        store.add_task("groceries", "milk").unwrap();
        store.add_task("groceries", "eggs").unwrap();
        store.remove_task("groceries", "eggs").unwrap();

        let bread = store.add_task("groceries", "bread").unwrap();
        assert_eq!(bread.id, 3, "{backend}");
    }
}

#[test]
fn mutating_returned_task_does_not_touch_store() {
    for (backend, store) in stores_with_groceries() {
        let mut task = store.add_task("groceries", "milk").unwrap();
        task.done = true;
        task.title = "tampered".to_string();

        let first = store.get_task("groceries", "milk").unwrap();
        let mut copy = first.clone();
        copy.done = true;
        let second = store.get_task("groceries", "milk").unwrap();

        assert_eq!(first, second, "{backend}");
        assert!(!second.done, "{backend}");
    }
}
