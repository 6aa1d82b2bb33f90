use exam_core::model::{ExamCatalog, ExamId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOptionVm {
    pub value: String,
    pub label: String,
}

#[must_use]
pub fn exam_options(catalog: &ExamCatalog) -> Vec<SelectOptionVm> {
    catalog
        .exams()
        .iter()
        .map(|exam| SelectOptionVm {
            value: exam.id().to_string(),
            label: exam.title().to_string(),
        })
        .collect()
}

/// Domains of the selected exam; empty until an exam is chosen.
#[must_use]
pub fn domain_options(catalog: &ExamCatalog, exam: &str) -> Vec<SelectOptionVm> {
    let Ok(exam_id) = exam.parse::<ExamId>() else {
        return Vec::new();
    };
    catalog
        .domains_for(&exam_id)
        .unwrap_or_default()
        .iter()
        .map(|domain| SelectOptionVm {
            value: domain.to_string(),
            label: domain.label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domains_follow_selected_exam() {
        let catalog = ExamCatalog::builtin();
        assert_eq!(exam_options(&catalog).len(), 2);

        let domains = domain_options(&catalog, "1101");
        assert!(!domains.is_empty());
        assert_eq!(domains[0].label, format!("Domain {}", domains[0].value));
        assert_ne!(domains, domain_options(&catalog, "1102"));

        assert!(domain_options(&catalog, "").is_empty());
        assert!(domain_options(&catalog, "9999").is_empty());
    }
}
