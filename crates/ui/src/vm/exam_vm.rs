use exam_core::model::ChoiceKey;
use services::ExamController;
use services::exam::{DomainProgress, NavigatorCell, QuestionView};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExamOptionVm {
    pub key: ChoiceKey,
    pub label: String,
    pub class: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigatorCellVm {
    pub index: usize,
    pub number: usize,
    pub class: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainProgressVm {
    pub label: String,
    pub counts: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmSubmitVm {
    pub answered_label: String,
    pub unanswered_label: Option<String>,
    pub flagged_label: Option<String>,
}

/// Everything the exam view renders for one controller snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExamScreenVm {
    pub timer_label: String,
    pub position_label: String,
    pub question_text: String,
    pub options: Vec<ExamOptionVm>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub flagging: bool,
    pub flag_label: &'static str,
    pub navigator: Vec<NavigatorCellVm>,
    pub domain_progress: Option<Vec<DomainProgressVm>>,
    pub confirm: Option<ConfirmSubmitVm>,
}

#[must_use]
pub fn map_exam_screen(controller: &ExamController) -> ExamScreenVm {
    let session = controller.session();
    let view = session.view();
    let features = session.features();

    let confirm = controller.is_confirming().then(|| {
        let preview = controller.submit_preview();
        let unanswered = preview.unanswered();
        ConfirmSubmitVm {
            answered_label: format!(
                "You have answered {} of {} questions.",
                preview.answered, preview.total
            ),
            unanswered_label: (unanswered > 0).then(|| format!("{unanswered} unanswered")),
            flagged_label: (preview.flagged > 0)
                .then(|| format!("{} flagged for review", preview.flagged)),
        }
    });

    ExamScreenVm {
        timer_label: format!("Time Remaining: {}", controller.time_label()),
        position_label: view.position_label.clone(),
        question_text: view.text.clone(),
        options: map_options(&view),
        can_go_previous: view.index > 0,
        can_go_next: view.index + 1 < view.total,
        flagging: features.flagging,
        flag_label: if view.flagged { "Unflag" } else { "Flag for Review" },
        navigator: session.navigator().iter().map(map_cell).collect(),
        domain_progress: features
            .domain_progress
            .then(|| session.domain_progress().iter().map(map_progress).collect()),
        confirm,
    }
}

fn map_options(view: &QuestionView) -> Vec<ExamOptionVm> {
    view.options
        .iter()
        .map(|option| ExamOptionVm {
            key: option.key,
            label: format!("{}) {}", option.key, option.text),
            class: if option.selected {
                "exam-option exam-option--selected"
            } else {
                "exam-option"
            },
        })
        .collect()
}

fn map_cell(cell: &NavigatorCell) -> NavigatorCellVm {
    let mut class = String::from("nav-cell");
    if cell.answered {
        class.push_str(" nav-cell--answered");
    }
    if cell.flagged {
        class.push_str(" nav-cell--flagged");
    }
    if cell.current {
        class.push_str(" nav-cell--current");
    }
    NavigatorCellVm {
        index: cell.index,
        number: cell.number(),
        class,
    }
}

fn map_progress(progress: &DomainProgress) -> DomainProgressVm {
    DomainProgressVm {
        label: progress.label(),
        counts: format!("{}/{}", progress.answered, progress.total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::{ChoiceMap, Domain, ExamConfig, Question};
    use services::exam::{Countdown, ExamFeatures, ExamIntent, ExamSession};

    fn question(domain: &str, correct: ChoiceKey) -> Question {
        Question::new(
            None,
            format!("Question in {domain}"),
            Some(Domain::new(domain).unwrap()),
            ChoiceMap::new("a".into(), "b".into(), "c".into(), "d".into()),
            correct,
        )
        .unwrap()
    }

    fn controller(features: ExamFeatures) -> ExamController {
        let session = ExamSession::new(
            vec![question("1.1", ChoiceKey::A), question("2.3", ChoiceKey::B)],
            features,
        )
        .unwrap();
        ExamController::new(ExamConfig::default(), session, Countdown::new(90))
    }

    #[test]
    fn maps_first_question_and_timer() {
        let vm = map_exam_screen(&controller(ExamFeatures::default()));
        assert_eq!(vm.timer_label, "Time Remaining: 1:30");
        assert_eq!(vm.position_label, "Question 1 of 2");
        assert_eq!(vm.options.len(), 4);
        assert_eq!(vm.options[0].label, "A) a");
        assert!(!vm.can_go_previous);
        assert!(vm.can_go_next);
        assert_eq!(vm.navigator[0].class, "nav-cell nav-cell--current");
        assert!(vm.confirm.is_none());
    }

    #[test]
    fn selection_and_flag_show_in_navigator() {
        let mut controller = controller(ExamFeatures::default());
        controller.dispatch(ExamIntent::Select(ChoiceKey::C));
        controller.dispatch(ExamIntent::ToggleFlag);

        let vm = map_exam_screen(&controller);
        assert_eq!(vm.options[2].class, "exam-option exam-option--selected");
        assert_eq!(vm.flag_label, "Unflag");
        assert_eq!(
            vm.navigator[0].class,
            "nav-cell nav-cell--answered nav-cell--flagged nav-cell--current"
        );
        let progress = vm.domain_progress.unwrap();
        assert_eq!(progress[0].counts, "1/1");
    }

    #[test]
    fn confirm_prompt_counts_unanswered_and_flagged() {
        let mut controller = controller(ExamFeatures::default());
        controller.dispatch(ExamIntent::ToggleFlag);
        controller.dispatch(ExamIntent::RequestSubmit);

        let confirm = map_exam_screen(&controller).confirm.unwrap();
        assert_eq!(confirm.answered_label, "You have answered 0 of 2 questions.");
        assert_eq!(confirm.unanswered_label.as_deref(), Some("2 unanswered"));
        assert_eq!(confirm.flagged_label.as_deref(), Some("1 flagged for review"));
    }

    #[test]
    fn disabled_features_hide_their_widgets() {
        let vm = map_exam_screen(&controller(ExamFeatures {
            flagging: false,
            domain_progress: false,
        }));
        assert!(!vm.flagging);
        assert!(vm.domain_progress.is_none());
    }
}
