mod test_support;

use gradedesk::calc;
use test_support::{new_student, temp_store};

// Aggregations over snapshots fetched from a real store, not hand-built rows.

#[test]
fn worked_example_through_the_store() {
    let (_guard, store) = temp_store();
    store
        .add_student(&new_student("Alice", 20, "Math", 80))
        .expect("add");
    store
        .add_student(&new_student("Bob", 21, "Math", 30))
        .expect("add");

    let rows = store.list_students().expect("list");
    let summary = calc::summarize(&rows).expect("non-empty snapshot");

    assert_eq!(summary.total_students, 2);
    assert_eq!(summary.average_marks, 55.0);
    assert_eq!(summary.top_scorer, "Alice");
    assert_eq!(summary.pass_percentage, 50.0);
    assert_eq!(summary.pass_count, 1);
    assert_eq!(summary.fail_count, 1);
    assert_eq!(summary.subject_averages, vec![("Math".to_string(), 55.0)]);
}

#[test]
fn empty_store_yields_no_summary() {
    let (_guard, store) = temp_store();
    let rows = store.list_students().expect("list");
    assert!(calc::summarize(&rows).is_none());
}

#[test]
fn percentages_round_to_two_decimals() {
    let (_guard, store) = temp_store();
    store
        .add_student(&new_student("Alice", 20, "Math", 80))
        .expect("add");
    store
        .add_student(&new_student("Bob", 21, "Math", 30))
        .expect("add");
    store
        .add_student(&new_student("Carol", 22, "Science", 70))
        .expect("add");

    let rows = store.list_students().expect("list");
    let summary = calc::summarize(&rows).expect("non-empty snapshot");

    // 2 of 3 pass: 66.666.. -> 66.67; mean 180/3 = 60.
    assert_eq!(summary.pass_percentage, 66.67);
    assert_eq!(summary.average_marks, 60.0);
    assert_eq!(
        summary.subject_averages,
        vec![("Math".to_string(), 55.0), ("Science".to_string(), 70.0)]
    );
}

#[test]
fn summary_tracks_marks_updates() {
    let (_guard, store) = temp_store();
    store
        .add_student(&new_student("Alice", 20, "Math", 80))
        .expect("add");
    store
        .add_student(&new_student("Bob", 21, "Math", 30))
        .expect("add");

    let rows = store.list_students().expect("list");
    let bob_id = rows.iter().find(|s| s.name == "Bob").expect("bob").id;
    store.update_marks(bob_id, 90).expect("update");

    let rows = store.list_students().expect("list");
    let summary = calc::summarize(&rows).expect("non-empty snapshot");
    assert_eq!(summary.top_scorer, "Bob");
    assert_eq!(summary.pass_percentage, 100.0);
    assert_eq!(summary.fail_count, 0);
}
