//! mini-ats library: skill-fit scoring of a resume against a job description

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod storage;
pub mod output;

pub use error::{Result, MiniAtsError};
pub use config::Config;
pub use processing::analyzer::{AnalysisEngine, AnalysisRequest, FitAnalysis};
