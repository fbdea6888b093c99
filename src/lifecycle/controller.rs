use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::alphavantage::rest::{MarketDataClient, Transport};
use crate::error::QueryError;
use crate::event::AppEvent;
use crate::model::query::Query;
use crate::ui::projection::QueryReport;

use super::cooldown::Cooldown;
use super::pipeline::run_query;

/// The single "current result" slot. Replaced wholesale on every transition.
#[derive(Debug, Clone)]
pub enum QueryPhase {
    Idle,
    Fetching { query: Query },
    Ready(QueryReport),
    Failed(QueryError),
    CoolingDown { error: QueryError, deadline: Instant },
}

impl QueryPhase {
    pub fn label(&self) -> &'static str {
        match self {
            QueryPhase::Idle => "IDLE",
            QueryPhase::Fetching { .. } => "FETCHING",
            QueryPhase::Ready(_) => "READY",
            QueryPhase::Failed(_) => "FAILED",
            QueryPhase::CoolingDown { .. } => "COOLDOWN",
        }
    }

    pub fn report(&self) -> Option<&QueryReport> {
        match self {
            QueryPhase::Ready(report) => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&QueryError> {
        match self {
            QueryPhase::Failed(error) | QueryPhase::CoolingDown { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_cooling_down(&self) -> bool {
        matches!(self, QueryPhase::CoolingDown { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Started,
    Rejected(QueryError),
    CoolingDown { remaining: Duration },
}

pub struct QueryController<T> {
    client: Arc<MarketDataClient<T>>,
    events: mpsc::Sender<AppEvent>,
    phase: QueryPhase,
    cooldown: Option<Cooldown>,
    next_generation: u64,
}

impl<T: Transport + 'static> QueryController<T> {
    pub fn new(client: MarketDataClient<T>, events: mpsc::Sender<AppEvent>) -> Self {
        Self {
            client: Arc::new(client),
            events,
            phase: QueryPhase::Idle,
            cooldown: None,
            next_generation: 0,
        }
    }

    pub fn phase(&self) -> &QueryPhase {
        &self.phase
    }

    pub fn client(&self) -> &MarketDataClient<T> {
        &self.client
    }

    pub fn cooldown_remaining(&self) -> Option<Duration> {
        self.cooldown.as_ref().map(Cooldown::remaining)
    }

    /// Start a query. Blank input fails here without spawning anything, and
    /// nothing is accepted until an active cooldown ends or is dismissed.
    pub fn submit(&mut self, raw_input: &str) -> SubmitOutcome {
        if let Some(remaining) = self.cooldown_remaining() {
            tracing::debug!(
                remaining_secs = remaining.as_secs(),
                "Query refused during cooldown"
            );
            return SubmitOutcome::CoolingDown { remaining };
        }

        let query = Query::new(raw_input);
        if let Err(e) = query.symbol() {
            let error = QueryError::from(e);
            tracing::info!(input = raw_input, error = %error, "Query rejected");
            self.phase = QueryPhase::Failed(error.clone());
            return SubmitOutcome::Rejected(error);
        }

        self.phase = QueryPhase::Fetching {
            query: query.clone(),
        };

        let client = Arc::clone(&self.client);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = run_query(&client, &query).await;
            if events
                .send(AppEvent::QueryResolved { query, outcome })
                .await
                .is_err()
            {
                tracing::debug!("Query resolved after event loop closed");
            }
        });
        SubmitOutcome::Started
    }

    /// Apply a finished attempt. Whichever attempt resolves last owns the slot,
    /// and any pending cooldown is superseded.
    pub fn resolve(&mut self, query: &Query, outcome: Result<QueryReport, QueryError>) {
        if let Some(previous) = self.cooldown.take() {
            previous.cancel();
        }

        self.phase = match outcome {
            Ok(report) => QueryPhase::Ready(report),
            Err(error) => match error.cooldown() {
                Some(duration) => {
                    self.next_generation += 1;
                    let cooldown =
                        Cooldown::arm(self.next_generation, duration, self.events.clone());
                    let deadline = cooldown.deadline();
                    self.cooldown = Some(cooldown);
                    QueryPhase::CoolingDown { error, deadline }
                }
                None => {
                    tracing::info!(input = query.raw_input(), error = %error, "Query failed");
                    QueryPhase::Failed(error)
                }
            },
        };
    }

    /// Returns true when the elapsed cooldown was the active one and the
    /// controller went back to `Idle`. Stale generations are ignored.
    pub fn cooldown_elapsed(&mut self, generation: u64) -> bool {
        match &self.cooldown {
            Some(active) if active.generation() == generation => {
                self.cooldown = None;
                self.phase = QueryPhase::Idle;
                tracing::info!(generation, "Cooldown elapsed, search unlocked");
                true
            }
            _ => {
                tracing::debug!(generation, "Ignoring stale cooldown");
                false
            }
        }
    }

    /// Close the error popup. Dismissing a cooldown cancels its timer.
    pub fn dismiss(&mut self) {
        match &self.phase {
            QueryPhase::Failed(_) | QueryPhase::CoolingDown { .. } => {
                if let Some(cooldown) = self.cooldown.take() {
                    cooldown.cancel();
                }
                self.phase = QueryPhase::Idle;
            }
            _ => {}
        }
    }
}
