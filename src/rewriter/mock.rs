use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{RewriteError, Rewriter};
use crate::form::{RewriteRequest, RewriteResult};

/// A scripted rewriter for tests. Returns pre-defined outcomes in order
/// and remembers every request it was handed.
pub struct MockRewriter {
    outcomes: Vec<Result<RewriteResult, RewriteError>>,
    index: AtomicUsize,
    requests: Mutex<Vec<RewriteRequest>>,
}

impl MockRewriter {
    pub fn new(outcomes: Vec<Result<RewriteResult, RewriteError>>) -> Self {
        Self {
            outcomes,
            index: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RewriteRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// How many times `rewrite` was called.
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Rewriter for MockRewriter {
    async fn rewrite(&self, request: &RewriteRequest) -> Result<RewriteResult, RewriteError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        self.outcomes.get(i).cloned().unwrap_or_else(|| {
            Err(RewriteError::Unexpected(format!(
                "MockRewriter: no more outcomes (called {} times)",
                i + 1
            )))
        })
    }
}
