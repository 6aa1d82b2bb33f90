use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use exam_core::model::{Domain, ExamCatalog, ExamConfig, Question};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::error::LoadFailure;
use crate::question_bank::{QuestionBank, QuestionQuery};

/// How a multi-domain exam is requested from the bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchStrategy {
    /// One request carrying every domain.
    #[default]
    Joined,
    /// One request per domain with a quota of `ceil(count / domains)`.
    PerDomain,
}

impl FetchStrategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FetchStrategy::Joined => "joined",
            FetchStrategy::PerDomain => "per-domain",
        }
    }
}

impl fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FetchStrategy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "joined" => Ok(FetchStrategy::Joined),
            "per-domain" | "per_domain" | "perdomain" => Ok(FetchStrategy::PerDomain),
            _ => Err(()),
        }
    }
}

/// Acquires the shuffled question set for one exam session.
#[derive(Clone)]
pub struct QuestionSetLoader {
    bank: Arc<dyn QuestionBank>,
    catalog: ExamCatalog,
    strategy: FetchStrategy,
}

impl QuestionSetLoader {
    #[must_use]
    pub fn new(bank: Arc<dyn QuestionBank>, catalog: ExamCatalog, strategy: FetchStrategy) -> Self {
        Self {
            bank,
            catalog,
            strategy,
        }
    }

    #[must_use]
    pub fn strategy(&self) -> FetchStrategy {
        self.strategy
    }

    /// Load `min(requested, available)` questions in random order.
    ///
    /// An empty `domains` slice falls back to the catalog's domain list for
    /// the exam, and to a plain `exam`/`count` request for exams the catalog
    /// does not know.
    ///
    /// # Errors
    ///
    /// Returns `LoadFailure` if any request fails or nothing was returned.
    pub async fn load(
        &self,
        config: &ExamConfig,
        domains: &[Domain],
    ) -> Result<Vec<Question>, LoadFailure> {
        let pool = self.fetch_pool(config, domains).await?;
        assemble(pool, config.requested_count(), &mut rand::rng())
    }

    /// Same as `load` with a caller-supplied RNG.
    ///
    /// # Errors
    ///
    /// Returns `LoadFailure` if any request fails or nothing was returned.
    pub async fn load_with_rng<R: Rng + ?Sized>(
        &self,
        config: &ExamConfig,
        domains: &[Domain],
        rng: &mut R,
    ) -> Result<Vec<Question>, LoadFailure> {
        let pool = self.fetch_pool(config, domains).await?;
        assemble(pool, config.requested_count(), rng)
    }

    async fn fetch_pool(
        &self,
        config: &ExamConfig,
        domains: &[Domain],
    ) -> Result<Vec<Question>, LoadFailure> {
        let domains: Vec<Domain> = if domains.is_empty() {
            self.catalog
                .domains_for(config.exam_id())
                .map(<[Domain]>::to_vec)
                .unwrap_or_default()
        } else {
            domains.to_vec()
        };
        let count = config.requested_count();

        info!(
            exam = %config.exam_id(),
            count,
            domains = domains.len(),
            strategy = %self.strategy,
            "loading question set"
        );

        let result = if domains.is_empty() {
            let query = QuestionQuery::Exam {
                exam: config.exam_id().clone(),
                count,
            };
            self.bank.fetch(&query).await
        } else {
            match self.strategy {
                FetchStrategy::Joined => {
                    let query = QuestionQuery::Domains {
                        domains,
                        limit: count,
                    };
                    self.bank.fetch(&query).await
                }
                FetchStrategy::PerDomain => self.fetch_per_domain(domains, count).await,
            }
        };

        if let Err(err) = &result {
            warn!(exam = %config.exam_id(), error = %err, "question set load failed");
        }
        result
    }

    async fn fetch_per_domain(
        &self,
        domains: Vec<Domain>,
        count: u32,
    ) -> Result<Vec<Question>, LoadFailure> {
        let quota = per_domain_quota(count, domains.len());
        let mut pool = Vec::new();
        for domain in domains {
            let query = QuestionQuery::Domain {
                domain,
                limit: quota,
            };
            pool.extend(self.bank.fetch(&query).await?);
        }
        Ok(pool)
    }
}

/// `ceil(count / domains)`, never below one.
#[must_use]
pub fn per_domain_quota(count: u32, domains: usize) -> u32 {
    let domains = u32::try_from(domains).unwrap_or(u32::MAX).max(1);
    count.div_ceil(domains).max(1)
}

fn assemble<R: Rng + ?Sized>(
    mut pool: Vec<Question>,
    count: u32,
    rng: &mut R,
) -> Result<Vec<Question>, LoadFailure> {
    pool.shuffle(rng);
    pool.truncate(usize::try_from(count).unwrap_or(usize::MAX));
    if pool.is_empty() {
        return Err(LoadFailure::Empty);
    }
    info!(loaded = pool.len(), "question set ready");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_rounds_up() {
        assert_eq!(per_domain_quota(90, 28), 4);
        assert_eq!(per_domain_quota(10, 5), 2);
        assert_eq!(per_domain_quota(1, 4), 1);
        assert_eq!(per_domain_quota(5, 0), 5);
    }

    #[test]
    fn strategy_parses_both_spellings() {
        assert_eq!("joined".parse(), Ok(FetchStrategy::Joined));
        assert_eq!("Per-Domain".parse(), Ok(FetchStrategy::PerDomain));
        assert_eq!("per_domain".parse(), Ok(FetchStrategy::PerDomain));
        assert_eq!("both".parse::<FetchStrategy>(), Err(()));
    }
}
