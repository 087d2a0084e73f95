//! Minimum spacing between outbound carrier calls

use std::time::Duration;
use tokio::time::Instant;

/// Enforces a minimum gap between consecutive calls to [`Pacer::wait`]
#[derive(Debug)]
pub struct Pacer {
    gap: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(gap: Duration) -> Self {
        Self { gap, last: None }
    }

    /// Sleep until at least `gap` has passed since the previous call
    pub async fn wait(&mut self) {
        if let Some(last) = self.last {
            tokio::time::sleep_until(last + self.gap).await;
        }
        self.last = Some(Instant::now());
    }
}
