use exam_core::model::{ExamConfig, ResultsHandoff};

#[derive(Clone, Debug, PartialEq)]
pub struct ResultsVm {
    pub percentage_label: String,
    pub score_label: String,
    pub time_label: String,
    pub dial_style: String,
    pub retry: ExamConfig,
}

#[must_use]
pub fn map_results(handoff: &ResultsHandoff) -> ResultsVm {
    let degrees = handoff.dial_degrees();
    ResultsVm {
        percentage_label: format!("{}%", handoff.percentage()),
        score_label: handoff.readout(),
        time_label: handoff.time_label(),
        dial_style: format!(
            "background: conic-gradient(var(--dial-fill) {degrees}deg, var(--dial-track) {degrees}deg);"
        ),
        retry: handoff.retry_config(),
    }
}
