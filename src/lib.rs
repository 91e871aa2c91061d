pub mod catalog;
pub mod config;
pub mod curation;
pub mod defaults;
pub mod domain;
pub mod error;
pub mod logging;
pub mod report;
pub mod taxonomy;
