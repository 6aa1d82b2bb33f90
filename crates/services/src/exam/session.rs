use std::collections::BTreeSet;

use exam_core::model::{ChoiceKey, Domain, Question};

use crate::error::SessionError;

/// Optional exam behaviours. Both are on unless configured off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamFeatures {
    pub flagging: bool,
    pub domain_progress: bool,
}

impl Default for ExamFeatures {
    fn default() -> Self {
        Self {
            flagging: true,
            domain_progress: true,
        }
    }
}

//
// ─── VIEW SNAPSHOTS ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub key: ChoiceKey,
    pub text: String,
    pub selected: bool,
}

/// Everything needed to render the active question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub text: String,
    pub options: Vec<OptionView>,
    pub flagged: bool,
    pub position_label: String,
}

impl QuestionView {
    /// Pure projection of one question and its recorded state.
    #[must_use]
    pub fn render(
        question: &Question,
        answer: Option<ChoiceKey>,
        flagged: bool,
        index: usize,
        total: usize,
    ) -> Self {
        let options = question
            .options()
            .iter()
            .map(|(key, text)| OptionView {
                key,
                text: text.clone(),
                selected: answer == Some(key),
            })
            .collect();
        Self {
            index,
            total,
            text: question.text().to_string(),
            options,
            flagged,
            position_label: format!("Question {} of {}", index + 1, total),
        }
    }
}

/// One cell of the jump-to-question grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorCell {
    pub index: usize,
    pub answered: bool,
    pub flagged: bool,
    pub current: bool,
}

impl NavigatorCell {
    #[must_use]
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Answered/total tally for one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainProgress {
    pub domain: Option<Domain>,
    pub answered: usize,
    pub total: usize,
}

impl DomainProgress {
    #[must_use]
    pub fn label(&self) -> String {
        self.domain
            .as_ref()
            .map_or_else(|| "Other".to_string(), Domain::label)
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Answer and navigation state of one exam page view.
///
/// The question list is fixed at construction. `current` always addresses a
/// valid question and `answers` always has one slot per question.
#[derive(Debug, Clone)]
pub struct ExamSession {
    questions: Vec<Question>,
    answers: Vec<Option<ChoiceKey>>,
    flagged: BTreeSet<usize>,
    current: usize,
    features: ExamFeatures,
}

impl ExamSession {
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if `questions` is empty.
    pub fn new(questions: Vec<Question>, features: ExamFeatures) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        Ok(Self {
            answers: vec![None; questions.len()],
            questions,
            flagged: BTreeSet::new(),
            current: 0,
            features,
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<ChoiceKey>] {
        &self.answers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn features(&self) -> ExamFeatures {
        self.features
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn answer(&self, index: usize) -> Option<ChoiceKey> {
        self.answers.get(index).copied().flatten()
    }

    #[must_use]
    pub fn is_flagged(&self, index: usize) -> bool {
        self.flagged.contains(&index)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|answer| answer.is_some()).count()
    }

    #[must_use]
    pub fn flagged_count(&self) -> usize {
        self.flagged.len()
    }

    /// Record `key` for the current question, replacing any earlier choice.
    pub fn select_answer(&mut self, key: ChoiceKey) {
        self.answers[self.current] = Some(key);
    }

    /// Returns `true` if the index moved.
    pub fn go_to_previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Returns `true` if the index moved.
    pub fn go_to_next(&mut self) -> bool {
        if self.current + 1 >= self.questions.len() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Jump to `index`; out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.questions.len() || index == self.current {
            return false;
        }
        self.current = index;
        true
    }

    /// Flip the flag on the current question.
    ///
    /// Returns the new flag state, or `false` when flagging is disabled.
    pub fn toggle_flag(&mut self) -> bool {
        if !self.features.flagging {
            return false;
        }
        if self.flagged.remove(&self.current) {
            false
        } else {
            self.flagged.insert(self.current);
            true
        }
    }

    #[must_use]
    pub fn view(&self) -> QuestionView {
        QuestionView::render(
            self.current_question(),
            self.answers[self.current],
            self.is_flagged(self.current),
            self.current,
            self.questions.len(),
        )
    }

    #[must_use]
    pub fn navigator(&self) -> Vec<NavigatorCell> {
        (0..self.questions.len())
            .map(|index| NavigatorCell {
                index,
                answered: self.answers[index].is_some(),
                flagged: self.is_flagged(index),
                current: index == self.current,
            })
            .collect()
    }

    /// Per-domain tallies in first-seen order. Empty when the feature is off.
    #[must_use]
    pub fn domain_progress(&self) -> Vec<DomainProgress> {
        if !self.features.domain_progress {
            return Vec::new();
        }
        let mut progress: Vec<DomainProgress> = Vec::new();
        for (question, answer) in self.questions.iter().zip(&self.answers) {
            let domain = question.domain();
            let entry = match progress
                .iter_mut()
                .position(|entry| entry.domain.as_ref() == domain)
            {
                Some(position) => &mut progress[position],
                None => {
                    progress.push(DomainProgress {
                        domain: domain.cloned(),
                        answered: 0,
                        total: 0,
                    });
                    let last = progress.len() - 1;
                    &mut progress[last]
                }
            };
            entry.total += 1;
            if answer.is_some() {
                entry.answered += 1;
            }
        }
        progress
    }
}
