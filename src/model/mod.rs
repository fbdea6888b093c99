pub mod query;
pub mod series;
