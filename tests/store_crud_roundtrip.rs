mod test_support;

use gradedesk::notice::Level;
use test_support::{find, new_student, temp_store};

#[test]
fn create_then_list_contains_exactly_one_matching_row() {
    let (_guard, store) = temp_store();
    assert!(store.list_students().expect("list").is_empty());

    let notice = store
        .add_student(&new_student("Alice", 20, "Math", 80))
        .expect("add");
    assert_eq!(notice.level, Level::Success);
    assert!(notice.text.contains("Alice"));

    let rows = store.list_students().expect("list");
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert!(row.id > 0);
    assert_eq!(row.name, "Alice");
    assert_eq!(row.age, 20);
    assert_eq!(row.subject, "Math");
    assert_eq!(row.marks, 80);
}

#[test]
fn ids_are_store_assigned_and_unique() {
    let (_guard, store) = temp_store();
    store
        .add_student(&new_student("Alice", 20, "Math", 80))
        .expect("add");
    store
        .add_student(&new_student("Bob", 21, "Math", 30))
        .expect("add");

    let rows = store.list_students().expect("list");
    assert_eq!(rows.len(), 2);
    assert_ne!(rows[0].id, rows[1].id);
}

#[test]
fn update_changes_only_marks_for_that_id() {
    let (_guard, store) = temp_store();
    store
        .add_student(&new_student("Alice", 20, "Math", 80))
        .expect("add");
    store
        .add_student(&new_student("Bob", 21, "Science", 30))
        .expect("add");

    let before = store.list_students().expect("list");
    let alice_id = before.iter().find(|s| s.name == "Alice").expect("alice").id;
    let bob_before = before
        .iter()
        .find(|s| s.name == "Bob")
        .expect("bob")
        .clone();

    let notice = store.update_marks(alice_id, 55).expect("update");
    assert_eq!(notice.level, Level::Success);

    let after = store.list_students().expect("list");
    let alice = find(&after, alice_id).expect("alice still present");
    assert_eq!(alice.marks, 55);
    assert_eq!(alice.name, "Alice");
    assert_eq!(alice.age, 20);
    assert_eq!(alice.subject, "Math");

    let bob = find(&after, bob_before.id).expect("bob untouched");
    assert_eq!(*bob, bob_before);
}

#[test]
fn delete_removes_exactly_that_row() {
    let (_guard, store) = temp_store();
    store
        .add_student(&new_student("Alice", 20, "Math", 80))
        .expect("add");
    store
        .add_student(&new_student("Bob", 21, "Math", 30))
        .expect("add");

    let before = store.list_students().expect("list");
    let doomed = before[0].id;

    let notice = store.delete_student(doomed).expect("delete");
    assert_eq!(notice.level, Level::Warning);

    let after = store.list_students().expect("list");
    assert_eq!(after.len(), before.len() - 1);
    assert!(find(&after, doomed).is_none());
}
