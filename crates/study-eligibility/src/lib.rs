pub mod catalog;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod grades;
pub mod telemetry;
pub mod wizard;
