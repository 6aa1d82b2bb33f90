use exam_core::model::{ChoiceKey, Question};

/// Number of questions whose recorded answer matches the correct key.
///
/// Unanswered and missing entries count as incorrect.
#[must_use]
pub fn score_answers(questions: &[Question], answers: &[Option<ChoiceKey>]) -> u32 {
    let correct = questions
        .iter()
        .enumerate()
        .filter(|(index, question)| {
            answers
                .get(*index)
                .copied()
                .flatten()
                .is_some_and(|key| question.is_correct(key))
        })
        .count();
    u32::try_from(correct).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::ChoiceMap;

    fn question(correct: ChoiceKey) -> Question {
        Question::new(
            None,
            "Q",
            None,
            ChoiceMap::new("a".into(), "b".into(), "c".into(), "d".into()),
            correct,
        )
        .unwrap()
    }

    #[test]
    fn counts_matching_answers() {
        let questions = vec![question(ChoiceKey::B), question(ChoiceKey::A)];
        let answers = vec![Some(ChoiceKey::B), Some(ChoiceKey::C)];
        assert_eq!(score_answers(&questions, &answers), 1);
    }

    #[test]
    fn unanswered_and_missing_count_as_incorrect() {
        let questions = vec![
            question(ChoiceKey::A),
            question(ChoiceKey::A),
            question(ChoiceKey::A),
        ];
        assert_eq!(score_answers(&questions, &[None, Some(ChoiceKey::A)]), 1);
        assert_eq!(score_answers(&questions, &[]), 0);
    }
}
