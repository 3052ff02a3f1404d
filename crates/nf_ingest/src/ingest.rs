//! The deduplicating ingestor: drives a candidate batch to completion,
//! normalizing and inserting-if-absent, with per-item failure isolation.

use std::sync::Arc;

use chrono::Utc;
use nf_core::{ArticleStore, InsertOutcome};
use tracing::warn;

use crate::normalize::normalize;
use crate::sources::Candidate;

/// Outcome of processing a single candidate. Skips carry their reason.
#[derive(Debug)]
pub enum ItemOutcome {
    Added,
    Duplicate,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct IngestReport {
    pub added: usize,
    pub duplicates: usize,
    pub failed: usize,
}

impl IngestReport {
    fn tally(&mut self, outcome: &ItemOutcome) {
        match outcome {
            ItemOutcome::Added => self.added += 1,
            ItemOutcome::Duplicate => self.duplicates += 1,
            ItemOutcome::Failed(_) => self.failed += 1,
        }
    }
}

pub struct Ingestor {
    store: Arc<dyn ArticleStore>,
}

impl Ingestor {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }

    /// Drive a candidate batch to completion. A failing candidate is
    /// logged and skipped; it never aborts the rest of the batch.
    pub async fn ingest(&self, candidates: Vec<Candidate>) -> IngestReport {
        let mut report = IngestReport::default();
        for candidate in candidates {
            let link = candidate.link().to_string();
            let outcome = self.ingest_one(candidate).await;
            if let ItemOutcome::Failed(reason) = &outcome {
                warn!("Error processing candidate {}: {}", link, reason);
            }
            report.tally(&outcome);
        }
        report
    }

    async fn ingest_one(&self, candidate: Candidate) -> ItemOutcome {
        let article = normalize(candidate, Utc::now());
        match self.store.insert_article(&article).await {
            Ok(InsertOutcome::Inserted(_)) => ItemOutcome::Added,
            Ok(InsertOutcome::Duplicate) => ItemOutcome::Duplicate,
            Err(e) => ItemOutcome::Failed(e.to_string()),
        }
    }
}
