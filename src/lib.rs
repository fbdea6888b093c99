pub mod alphavantage;
pub mod catalog;
pub mod config;
pub mod error;
pub mod event;
pub mod indicator;
pub mod input;
pub mod lifecycle;
pub mod model;
pub mod predictor;
pub mod ui;
