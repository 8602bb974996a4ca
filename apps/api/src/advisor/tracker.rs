//! Session analysis tracker — holds the latest analysis and keeps stale ones out.
//!
//! Each analysis request takes a ticket before calling the model. When it
//! finishes, its result becomes the session's latest only if no newer ticket has
//! been issued meanwhile. A superseded result still goes back to its caller.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::advisor::profile_analysis::AnalysisResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSnapshot {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// What `publish` did with a finished analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Published {
    #[serde(flatten)]
    pub snapshot: AnalysisSnapshot,
    /// False when a newer request superseded this one.
    pub current: bool,
}

#[derive(Debug, Default)]
pub struct AnalysisTracker {
    issued: AtomicU64,
    latest: RwLock<Option<AnalysisSnapshot>>,
}

impl AnalysisTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the ticket for a new analysis request. Tickets start at 1.
    pub fn begin(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub async fn publish(&self, ticket: u64, result: AnalysisResult) -> Published {
        let snapshot = AnalysisSnapshot {
            analysis_id: Uuid::new_v4(),
            analyzed_at: Utc::now(),
            result,
        };

        let mut latest = self.latest.write().await;
        let current = ticket == self.issued.load(Ordering::SeqCst);
        if current {
            info!("Analysis {} published (ticket {ticket})", snapshot.analysis_id);
            *latest = Some(snapshot.clone());
        } else {
            warn!(
                "Analysis {} from ticket {ticket} superseded by a newer request; not stored",
                snapshot.analysis_id
            );
        }

        Published { snapshot, current }
    }

    pub async fn latest(&self) -> Option<AnalysisSnapshot> {
        self.latest.read().await.clone()
    }
}
