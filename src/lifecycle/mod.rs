pub mod controller;
pub mod cooldown;
pub mod pipeline;

pub use controller::{QueryController, QueryPhase, SubmitOutcome};
pub use cooldown::Cooldown;
pub use pipeline::{run_query, Stage};
