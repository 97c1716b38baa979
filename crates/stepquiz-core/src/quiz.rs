pub mod error;
pub mod report;
pub mod runner;
pub mod scoring;
pub mod session;
