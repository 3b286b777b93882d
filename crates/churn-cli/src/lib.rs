//! Library components of the churn pipeline CLI.

pub mod logging;
pub mod settings;
