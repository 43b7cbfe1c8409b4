pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod interactive;
pub mod report;
