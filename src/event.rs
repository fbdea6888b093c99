use crate::error::QueryError;
use crate::model::query::Query;
use crate::ui::projection::QueryReport;

#[derive(Debug, Clone)]
pub enum AppEvent {
    QueryResolved {
        query: Query,
        outcome: Result<QueryReport, QueryError>,
    },
    CooldownElapsed {
        generation: u64,
    },
}
