use crate::model::ids::{Domain, ExamId};

/// One selectable exam with its ordered domain list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamDefinition {
    id: ExamId,
    title: String,
    domains: Vec<Domain>,
}

impl ExamDefinition {
    #[must_use]
    pub fn new(id: ExamId, title: impl Into<String>, domains: Vec<Domain>) -> Self {
        Self {
            id,
            title: title.into(),
            domains,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ExamId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }
}

/// The exams offered by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamCatalog {
    exams: Vec<ExamDefinition>,
}

const CORE_1_DOMAINS: &[&str] = &[
    "1.1", "1.2", "1.3", "1.4", // mobile devices
    "2.1", "2.2", "2.3", "2.4", "2.5", "2.6", "2.7", "2.8", // networking
    "3.1", "3.2", "3.3", "3.4", "3.5", "3.6", "3.7", // hardware
    "4.1", "4.2", // virtualization and cloud
    "5.1", "5.2", "5.3", "5.4", "5.5", "5.6", "5.7", // troubleshooting
];

const CORE_2_DOMAINS: &[&str] = &[
    "1.1", "1.2", "1.3", "1.4", "1.5", "1.6", "1.7", "1.8", "1.9", "1.10", "1.11", // os
    "2.1", "2.2", "2.3", "2.4", "2.5", "2.6", "2.7", "2.8", "2.9", "2.10", // security
    "3.1", "3.2", "3.3", "3.4", "3.5", // software troubleshooting
    "4.1", "4.2", "4.3", "4.4", "4.5", "4.6", "4.7", "4.8", "4.9", // operational procedures
];

/// Exam used when a route or handoff does not name one.
pub const DEFAULT_EXAM_ID: &str = "1101";

impl ExamCatalog {
    #[must_use]
    pub fn new(exams: Vec<ExamDefinition>) -> Self {
        Self { exams }
    }

    /// The CompTIA A+ Core 1 and Core 2 catalogs.
    #[must_use]
    pub fn builtin() -> Self {
        fn definition(id: &str, title: &str, tags: &[&str]) -> ExamDefinition {
            ExamDefinition {
                id: ExamId::trusted(id),
                title: title.to_string(),
                domains: tags.iter().copied().map(Domain::trusted).collect(),
            }
        }

        Self::new(vec![
            definition("1101", "A+ Core 1 (220-1101)", CORE_1_DOMAINS),
            definition("1102", "A+ Core 2 (220-1102)", CORE_2_DOMAINS),
        ])
    }

    #[must_use]
    pub fn exams(&self) -> &[ExamDefinition] {
        &self.exams
    }

    #[must_use]
    pub fn get(&self, id: &ExamId) -> Option<&ExamDefinition> {
        self.exams.iter().find(|exam| exam.id == *id)
    }

    /// Domains for an exam, or `None` when the exam is not in the catalog.
    #[must_use]
    pub fn domains_for(&self, id: &ExamId) -> Option<&[Domain]> {
        self.get(id).map(ExamDefinition::domains)
    }

    #[must_use]
    pub fn contains_domain(&self, id: &ExamId, domain: &Domain) -> bool {
        self.domains_for(id)
            .is_some_and(|domains| domains.contains(domain))
    }
}

impl Default for ExamCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
