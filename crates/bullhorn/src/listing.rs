// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The listing pipeline shared by every state command.
//!
//! Order matters: every argument is validated before the backend is asked
//! for a page, so a malformed query or window never costs a round trip.
//! The page is fetched first and filtered locally afterwards, which means
//! filters narrow the page rather than widen it.

use std::sync::Arc;

use chrono::Utc;

use bullhorn_broker::QueueHandle;
use bullhorn_core::{duration_ms, parse_duration, BullhornError, JobState, JobView, Query};

/// A fully described listing request.
#[derive(Debug, Clone)]
pub struct ListRequest {
    pub state: JobState,
    /// First index of the page, inclusive, zero-based.
    pub start: i64,
    /// Last index of the page, inclusive. Negative counts from the tail.
    pub end: i64,
    /// Human-readable recency window, e.g. `"2h"` or `"30m"`.
    pub time_ago: Option<String>,
    /// Raw JSON query over the displayed job fields.
    pub query: Option<String>,
}

/// Validate, fetch one page, and filter it.
pub async fn list(
    handle: &Arc<dyn QueueHandle>,
    request: &ListRequest,
) -> Result<Vec<JobView>, BullhornError> {
    let mut query = match &request.query {
        Some(raw) => Query::parse(raw)?,
        None => Query::default(),
    };
    if let Some(raw) = &request.time_ago {
        let window = parse_duration(raw)?;
        let window_ms = i64::try_from(duration_ms(window)).unwrap_or(i64::MAX);
        let lower = Utc::now().timestamp_millis().saturating_sub(window_ms);
        query.and_at_least("time", lower);
    }
    if request.start < 0 {
        return Err(BullhornError::Validation(
            "\"start\" must not be negative".to_string(),
        ));
    }
    if request.end >= 0 && request.end < request.start {
        return Err(BullhornError::Validation(
            "\"end\" must be greater than or equal to \"start\"".to_string(),
        ));
    }

    let page = handle
        .jobs_in_state(request.state, request.start, request.end)
        .await?;
    Ok(query.filter(&page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use bullhorn_test_utils::MemoryQueue;

    fn request(state: JobState) -> ListRequest {
        ListRequest {
            state,
            start: 0,
            end: -1,
            time_ago: None,
            query: None,
        }
    }

    async fn seeded_queue() -> (Arc<MemoryQueue>, Arc<dyn QueueHandle>) {
        let now = Utc::now().timestamp_millis();
        let queue = Arc::new(MemoryQueue::new("orders"));
        queue
            .seed(
                JobState::Completed,
                JobView::new("1", "__default__", json!({"n": 1}), now),
            )
            .await;
        queue
            .seed(
                JobState::Completed,
                JobView::new(
                    "2",
                    "__default__",
                    json!({"n": 2}),
                    now - 30 * 60 * 1_000,
                ),
            )
            .await;
        queue
            .seed(
                JobState::Completed,
                JobView::new(
                    "3",
                    "__default__",
                    json!({"n": 3}),
                    now - 2 * 60 * 60 * 1_000,
                ),
            )
            .await;
        let handle: Arc<dyn QueueHandle> = queue.clone();
        (queue, handle)
    }

    #[tokio::test]
    async fn time_window_keeps_recent_jobs_only() {
        let (_queue, handle) = seeded_queue().await;
        let mut req = request(JobState::Completed);
        req.time_ago = Some("1h".to_string());
        let views = list(&handle, &req).await.unwrap();
        let ids: Vec<_> = views.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn query_narrows_the_page() {
        let (_queue, handle) = seeded_queue().await;
        let mut req = request(JobState::Completed);
        req.query = Some(r#"{"data": {"n": {"gte": 2}}}"#.to_string());
        let views = list(&handle, &req).await.unwrap();
        let ids: Vec<_> = views.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[tokio::test]
    async fn malformed_query_never_reaches_the_backend() {
        let (queue, handle) = seeded_queue().await;
        let mut req = request(JobState::Completed);
        req.query = Some("[1, 2]".to_string());
        assert!(matches!(
            list(&handle, &req).await,
            Err(BullhornError::Validation(_))
        ));
        assert_eq!(queue.call_count("jobs_in_state").await, 0);
    }

    #[tokio::test]
    async fn malformed_window_never_reaches_the_backend() {
        let (queue, handle) = seeded_queue().await;
        let mut req = request(JobState::Completed);
        req.time_ago = Some("soonish".to_string());
        assert!(matches!(
            list(&handle, &req).await,
            Err(BullhornError::Validation(_))
        ));
        assert_eq!(queue.call_count("jobs_in_state").await, 0);
    }

    #[tokio::test]
    async fn inverted_page_bounds_are_rejected() {
        let (queue, handle) = seeded_queue().await;
        let mut req = request(JobState::Completed);
        req.start = 5;
        req.end = 2;
        assert!(matches!(
            list(&handle, &req).await,
            Err(BullhornError::Validation(_))
        ));
        assert_eq!(queue.call_count("jobs_in_state").await, 0);
    }

    #[tokio::test]
    async fn negative_end_selects_through_the_tail() {
        let (_queue, handle) = seeded_queue().await;
        let mut req = request(JobState::Completed);
        req.start = 1;
        req.end = -1;
        let views = list(&handle, &req).await.unwrap();
        assert_eq!(views.len(), 2);
    }
}
