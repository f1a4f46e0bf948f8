//! Creation-time input checks. Pure, stateless, short-circuiting on the
//! first failure, in a fixed order. Age lower bound and marks range are
//! widget-level constraints, not re-checked here.

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields (Name and Subject)")]
    EmptyFields,
    #[error("Name must contain letters only (no numbers or symbols)")]
    NameNotAlphabetic,
    #[error("Age cannot be more than 100")]
    AgeTooHigh,
}

pub fn new_student(name: &str, age: i64, subject: &str) -> Result<(), ValidationError> {
    if name.is_empty() || subject.is_empty() {
        return Err(ValidationError::EmptyFields);
    }

    // Spaces are allowed in names; everything else must be alphabetic.
    let stripped: String = name.chars().filter(|c| *c != ' ').collect();
    if stripped.is_empty() || !stripped.chars().all(char::is_alphabetic) {
        return Err(ValidationError::NameNotAlphabetic);
    }

    if age > 100 {
        return Err(ValidationError::AgeTooHigh);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_spaced_names() {
        assert_eq!(new_student("Alice", 20, "Math"), Ok(()));
        assert_eq!(new_student("Mary Jane Watson", 34, "History"), Ok(()));
    }

    #[test]
    fn rejects_empty_fields_first() {
        assert_eq!(
            new_student("", 20, "Math"),
            Err(ValidationError::EmptyFields)
        );
        assert_eq!(new_student("Bob", 20, ""), Err(ValidationError::EmptyFields));
        // Empty name wins over the age check: the chain is ordered.
        assert_eq!(
            new_student("", 150, ""),
            Err(ValidationError::EmptyFields)
        );
    }

    #[test]
    fn rejects_digits_and_symbols_in_name() {
        assert_eq!(
            new_student("John3", 20, "Math"),
            Err(ValidationError::NameNotAlphabetic)
        );
        assert_eq!(
            new_student("A-B", 20, "Math"),
            Err(ValidationError::NameNotAlphabetic)
        );
        // All-space names strip down to nothing, which is not alphabetic.
        assert_eq!(
            new_student("   ", 20, "Math"),
            Err(ValidationError::NameNotAlphabetic)
        );
    }

    #[test]
    fn rejects_age_above_ceiling() {
        assert_eq!(
            new_student("John", 150, "Math"),
            Err(ValidationError::AgeTooHigh)
        );
        assert_eq!(new_student("John", 100, "Math"), Ok(()));
    }

    #[test]
    fn subject_is_free_text() {
        assert_eq!(new_student("John", 20, "CS 101!"), Ok(()));
    }
}
