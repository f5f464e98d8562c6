//! Memory Reconciler
//!
//! Brings the server's memories in line with the year buckets of a run:
//! optionally delete every existing memory, then create one memory per year.
//! Any failed call stops the reconciler; nothing already done is rolled back.

use tracing::{debug, info};

use crate::domain::services::aggregator::YearBuckets;
use crate::domain::{NewMemory, PipelineError, TargetDate};
use crate::ports::PhotoServer;

/// What a reconciliation did on the server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Number of memories deleted during cleanup
    pub deleted: usize,
    /// (year, asset count) of each created memory
    pub created: Vec<(i32, usize)>,
}

pub struct MemoryReconciler<'a, S: ?Sized> {
    server: &'a S,
    cleanup: bool,
}

impl<'a, S> MemoryReconciler<'a, S>
where
    S: PhotoServer + ?Sized,
{
    pub fn new(server: &'a S, cleanup: bool) -> Self {
        Self { server, cleanup }
    }

    /// Delete every memory currently on the server
    pub async fn cleanup(&self) -> Result<usize, PipelineError> {
        info!("Cleaning up older memories");
        let memories = self
            .server
            .list_memories()
            .await
            .map_err(PipelineError::Fetch)?;

        for memory in &memories {
            debug!(memory_id = %memory.id, year = ?memory.year, assets = memory.asset_ids.len(), "Deleting memory");
            self.server
                .delete_memory(&memory.id)
                .await
                .map_err(|e| PipelineError::delete(&memory.id, e))?;
        }

        info!(count = memories.len(), "Memories cleaned up");
        Ok(memories.len())
    }

    /// Create one on-this-day memory per bucket, newest year first
    ///
    /// Every bucket year must contain the target day; otherwise nothing is
    /// created and [`PipelineError::MissingDay`] is returned.
    pub async fn create_memories(
        &self,
        buckets: &YearBuckets,
        target: TargetDate,
    ) -> Result<Vec<(i32, usize)>, PipelineError> {
        info!("Adding new memories");
        let mut years: Vec<i32> = buckets.keys().copied().collect();
        years.sort_unstable_by(|a, b| b.cmp(a));

        let dates = years
            .into_iter()
            .map(|year| {
                target
                    .in_year(year)
                    .map(|date| (year, date))
                    .ok_or(PipelineError::MissingDay { year, day: target })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut created = Vec::with_capacity(dates.len());
        for (year, date) in dates {
            let images = &buckets[&year];
            let memory = NewMemory::on_this_day(date, images.iter().map(|i| i.id.clone()).collect());
            self.server
                .create_memory(&memory)
                .await
                .map_err(|source| PipelineError::Create { year, source })?;

            info!(year, entries = images.len(), "Created memory");
            created.push((year, images.len()));
        }

        Ok(created)
    }

    /// Cleanup (when enabled) followed by creation
    pub async fn reconcile(
        &self,
        buckets: &YearBuckets,
        target: TargetDate,
    ) -> Result<ReconcileReport, PipelineError> {
        let deleted = if self.cleanup { self.cleanup().await? } else { 0 };
        let created = self.create_memories(buckets, target).await?;

        Ok(ReconcileReport { deleted, created })
    }
}
