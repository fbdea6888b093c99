pub mod extract;
pub mod rest;
pub mod types;
