use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::event::AppEvent;

/// A scheduled reset after a rate limit. Fires `CooldownElapsed` once with its
/// generation, unless cancelled or dropped first.
#[derive(Debug)]
pub struct Cooldown {
    generation: u64,
    deadline: Instant,
    handle: JoinHandle<()>,
}

impl Cooldown {
    pub fn arm(generation: u64, duration: Duration, events: mpsc::Sender<AppEvent>) -> Self {
        let deadline = Instant::now() + duration;
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if events
                .send(AppEvent::CooldownElapsed { generation })
                .await
                .is_err()
            {
                tracing::debug!(generation, "Cooldown fired after event loop closed");
            }
        });
        tracing::debug!(generation, secs = duration.as_secs(), "Cooldown armed");
        Self {
            generation,
            deadline,
            handle,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn cancel(self) {
        tracing::debug!(generation = self.generation, "Cooldown cancelled");
    }
}

impl Drop for Cooldown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_once_with_its_generation() {
        let (tx, mut rx) = mpsc::channel(4);
        let started = Instant::now();
        let _cooldown = Cooldown::arm(7, Duration::from_secs(40), tx);

        match rx.recv().await {
            Some(AppEvent::CooldownElapsed { generation }) => assert_eq!(generation, 7),
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(started.elapsed() >= Duration::from_secs(40));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_cooldown_never_fires() {
        let (tx, mut rx) = mpsc::channel(4);
        let cooldown = Cooldown::arm(1, Duration::from_secs(40), tx);
        assert_eq!(cooldown.remaining(), Duration::from_secs(40));
        cooldown.cancel();
        assert!(rx.recv().await.is_none());
    }
}
