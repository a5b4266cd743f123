//! Suite orchestration and reporting

mod report;
mod runner;


pub use report::SuiteReport;
pub use runner::{run_suite, SuiteRunner};
