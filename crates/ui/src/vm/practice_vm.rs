use exam_core::model::ChoiceKey;
use services::{OptionState, PracticeRound};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeOptionVm {
    pub key: ChoiceKey,
    pub label: String,
    pub class: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeVm {
    pub prompt: String,
    pub domain_label: Option<String>,
    pub options: Vec<PracticeOptionVm>,
    pub locked: bool,
    pub verdict: Option<&'static str>,
    pub explanation: Option<String>,
}

#[must_use]
pub fn map_practice_round(round: &PracticeRound) -> PracticeVm {
    let question = round.question();
    let options = round
        .options()
        .into_iter()
        .map(|option| PracticeOptionVm {
            key: option.key,
            label: format!("{}) {}", option.key, option.text),
            class: match option.state {
                OptionState::Correct => "practice-option practice-option--correct",
                OptionState::Incorrect => "practice-option practice-option--incorrect",
                OptionState::Neutral => "practice-option",
            },
        })
        .collect();

    PracticeVm {
        prompt: question.text().to_string(),
        domain_label: question.domain().map(|domain| domain.label()),
        options,
        locked: round.is_answered(),
        verdict: round
            .is_correct()
            .map(|correct| if correct { "Correct!" } else { "Incorrect." }),
        explanation: round.selected_explanation().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::{ChoiceMap, Domain, Question};

    fn round() -> PracticeRound {
        let question = Question::new(
            None,
            "Which port does HTTPS use?",
            Some(Domain::new("2.1").unwrap()),
            ChoiceMap::new("80".into(), "443".into(), "22".into(), "3389".into()),
            ChoiceKey::B,
        )
        .unwrap()
        .with_explanations(ChoiceMap::new(
            "Plain HTTP.".into(),
            "TLS-wrapped HTTP.".into(),
            "SSH.".into(),
            "RDP.".into(),
        ));
        PracticeRound::new(question)
    }

    #[test]
    fn unanswered_round_is_neutral() {
        let vm = map_practice_round(&round());
        assert_eq!(vm.domain_label.as_deref(), Some("Domain 2.1"));
        assert!(vm.options.iter().all(|option| option.class == "practice-option"));
        assert!(vm.verdict.is_none());
        assert!(!vm.locked);
    }

    #[test]
    fn wrong_answer_marks_both_options() {
        let mut round = round();
        round.select(ChoiceKey::A);
        let vm = map_practice_round(&round);
        assert_eq!(vm.options[0].class, "practice-option practice-option--incorrect");
        assert_eq!(vm.options[1].class, "practice-option practice-option--correct");
        assert_eq!(vm.verdict, Some("Incorrect."));
        assert_eq!(vm.explanation.as_deref(), Some("Plain HTTP."));
        assert!(vm.locked);
    }
}
