use std::collections::BTreeMap;

use crate::db::{Student, PASS_MARK};

/// Aggregates derived from one full-table snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_students: usize,
    /// Mean of marks, rounded to 2 decimals.
    pub average_marks: f64,
    /// Name of the first row (scan order) holding the maximum marks.
    pub top_scorer: String,
    /// `100 * pass_count / total`, rounded to 2 decimals.
    pub pass_percentage: f64,
    pub pass_count: usize,
    pub fail_count: usize,
    /// Mean marks per distinct subject string, ordered by subject. The
    /// grouping key is exact: case- and whitespace-sensitive.
    pub subject_averages: Vec<(String, f64)>,
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// `None` for an empty snapshot; the caller guards that case.
pub fn summarize(students: &[Student]) -> Option<Summary> {
    if students.is_empty() {
        return None;
    }

    let total = students.len();
    let sum: i64 = students.iter().map(|s| s.marks).sum();

    let mut top = &students[0];
    for s in &students[1..] {
        // Strict comparison keeps the first of any tied maximum.
        if s.marks > top.marks {
            top = s;
        }
    }

    let pass_count = students.iter().filter(|s| s.marks >= PASS_MARK).count();
    let fail_count = total - pass_count;

    let mut groups: BTreeMap<&str, (i64, usize)> = BTreeMap::new();
    for s in students {
        let entry = groups.entry(s.subject.as_str()).or_default();
        entry.0 += s.marks;
        entry.1 += 1;
    }
    let subject_averages = groups
        .into_iter()
        .map(|(subject, (marks, n))| (subject.to_string(), round2(marks as f64 / n as f64)))
        .collect();

    Some(Summary {
        total_students: total,
        average_marks: round2(sum as f64 / total as f64),
        top_scorer: top.name.clone(),
        pass_percentage: round2(100.0 * pass_count as f64 / total as f64),
        pass_count,
        fail_count,
        subject_averages,
    })
}
