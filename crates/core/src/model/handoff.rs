use url::form_urlencoded;

use crate::model::exam::{ExamConfig, SubmissionResult};
use crate::time::format_clock;

/// Flat payload carried from the exam view to the results view.
///
/// The receiving side is a pure consumer: any missing or malformed value
/// decodes to `0` (numbers) or `None` (exam id / count).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsHandoff {
    pub score: u32,
    pub total: u32,
    pub time: u32,
    pub exam: Option<String>,
    pub count: Option<u32>,
}

impl ResultsHandoff {
    /// Decode from `name=value` pairs, ignoring unknown names.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut handoff = Self::default();
        for (name, value) in pairs {
            let value = value.as_ref().trim();
            match name.as_ref() {
                "score" => handoff.score = parse_number(value),
                "total" => handoff.total = parse_number(value),
                "time" => handoff.time = parse_number(value),
                "exam" => {
                    handoff.exam = Some(value.to_string()).filter(|exam| !exam.is_empty());
                }
                "count" => handoff.count = value.parse().ok(),
                _ => {}
            }
        }
        handoff
    }

    /// Decode from a URL-style query string (leading `?` optional).
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(form_urlencoded::parse(query.as_bytes()))
    }

    /// Encode as a URL-style query string without the leading `?`.
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer
            .append_pair("score", &self.score.to_string())
            .append_pair("total", &self.total.to_string())
            .append_pair("time", &self.time.to_string());
        if let Some(exam) = &self.exam {
            serializer.append_pair("exam", exam);
        }
        if let Some(count) = self.count {
            serializer.append_pair("count", &count.to_string());
        }
        serializer.finish()
    }

    /// Whole-number percentage; `0` when there were no questions.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let ratio = f64::from(self.score) / f64::from(self.total);
        // Bounded by the u32 inputs, so the cast cannot truncate meaningfully.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percentage = (ratio * 100.0).round() as u32;
        percentage
    }

    /// `score/total` readout.
    #[must_use]
    pub fn readout(&self) -> String {
        format!("{}/{}", self.score, self.total)
    }

    #[must_use]
    pub fn time_label(&self) -> String {
        format_clock(self.time)
    }

    /// Sweep of the 360° result dial.
    #[must_use]
    pub fn dial_degrees(&self) -> f64 {
        f64::from(self.percentage()) * 3.6
    }

    /// Configuration for "start a new session with the same settings".
    #[must_use]
    pub fn retry_config(&self) -> ExamConfig {
        let count = self.count.map(|count| count.to_string());
        ExamConfig::from_query_values(self.exam.as_deref(), count.as_deref())
    }
}

impl From<&SubmissionResult> for ResultsHandoff {
    fn from(result: &SubmissionResult) -> Self {
        Self {
            score: result.correct_count(),
            total: result.total_count(),
            time: result.elapsed_seconds(),
            exam: Some(result.config().exam_id().to_string()),
            count: Some(result.config().requested_count()),
        }
    }
}

impl From<SubmissionResult> for ResultsHandoff {
    fn from(result: SubmissionResult) -> Self {
        Self::from(&result)
    }
}

fn parse_number(raw: &str) -> u32 {
    raw.parse().unwrap_or(0)
}
