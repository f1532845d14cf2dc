// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolving job ids against the active queue.

use std::sync::Arc;

use futures::future;

use bullhorn_broker::QueueHandle;
use bullhorn_core::{BatchResolution, BullhornError, JobView};

/// Fetch one job, treating absence as an error.
pub async fn resolve_one(
    handle: &Arc<dyn QueueHandle>,
    id: &str,
) -> Result<JobView, BullhornError> {
    handle
        .get_job(id)
        .await?
        .ok_or_else(|| BullhornError::JobNotFound(id.to_string()))
}

/// Fetch a batch of jobs concurrently, partitioning hits from misses.
/// Duplicated ids resolve independently; input order is preserved within
/// each partition. Backend failures abort the whole batch.
pub async fn resolve_many(
    handle: &Arc<dyn QueueHandle>,
    ids: &[String],
) -> Result<BatchResolution, BullhornError> {
    let lookups = ids.iter().map(|id| handle.get_job(id));
    let results = future::join_all(lookups).await;

    let mut resolution = BatchResolution::default();
    for (id, result) in ids.iter().zip(results) {
        match result? {
            Some(view) => resolution.found.push(view),
            None => resolution.not_found.push(id.clone()),
        }
    }
    Ok(resolution)
}
