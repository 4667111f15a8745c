use thiserror::Error;

use crate::models::{Draft, Field, JournalMode};

pub const SUCCESS_MESSAGE: &str = "Great job, another day working on yourself, I'm proud of you!!";
pub const INCOMPLETE_MESSAGE: &str =
    "Please fill all the forms, if you don't feel like filling one of them, fill it with a dot";

/// Required fields left empty, in display order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} (missing: {})", INCOMPLETE_MESSAGE, prompt_list(.missing))]
pub struct Incomplete {
    pub mode: JournalMode,
    pub missing: Vec<Field>,
}

fn prompt_list(fields: &[Field]) -> String {
    let names: Vec<&str> = fields.iter().map(|field| field.prompt()).collect();
    names.join(", ")
}

/// Check that every field of `mode` is filled
pub fn validate(draft: &Draft, mode: JournalMode) -> Result<(), Incomplete> {
    let missing: Vec<Field> = mode
        .fields()
        .iter()
        .copied()
        .filter(|&field| !draft.is_filled(field))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Incomplete { mode, missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rating;

    fn full_morning() -> Draft {
        Draft {
            grateful: "friends".into(),
            today: "a long walk".into(),
            affirmation: "patient".into(),
            intention: "listen".into(),
            ..Draft::default()
        }
    }

    fn full_night() -> Draft {
        Draft {
            rating: Rating::new(3),
            thanks: "resting".into(),
            highlights: "lunch, call, book".into(),
            reflection: ".".into(),
            ..Draft::default()
        }
    }

    #[test]
    fn complete_morning_is_valid() {
        assert!(validate(&full_morning(), JournalMode::Morning).is_ok());
    }

    #[test]
    fn complete_night_is_valid() {
        assert!(validate(&full_night(), JournalMode::Night).is_ok());
    }

    #[test]
    fn reports_each_missing_field_in_order() {
        let mut draft = full_morning();
        draft.today.clear();
        draft.intention = "  ".into();
        let err = validate(&draft, JournalMode::Morning).unwrap_err();
        assert_eq!(err.missing, vec![Field::TodayGoal, Field::Intention]);
    }

    #[test]
    fn night_requires_a_rating() {
        let mut draft = full_night();
        draft.rating = None;
        let err = validate(&draft, JournalMode::Night).unwrap_err();
        assert_eq!(err.missing, vec![Field::Rating]);
    }

    #[test]
    fn only_active_mode_counts() {
        // A finished morning does not satisfy the night prompts
        assert!(validate(&full_morning(), JournalMode::Night).is_err());
        assert!(validate(&full_night(), JournalMode::Morning).is_err());
    }

    #[test]
    fn message_names_missing_prompts() {
        let err = validate(&Draft::default(), JournalMode::Night).unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with(INCOMPLETE_MESSAGE));
        assert!(text.contains("Rate today from 1 to 5"));
    }
}
