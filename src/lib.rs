#![forbid(unsafe_code)]

//! Vehicle CO2 emissions estimator.
//!
//! Converts fuel efficiency and distance into fuel consumed and CO2 emitted,
//! compares the result against an average electric vehicle, and expresses
//! the difference as a number of trees.

pub mod config;
pub mod error;
pub mod estimator;
pub mod factors;
pub mod form;
pub mod report;
pub mod timeframe;

pub use config::EstimatorConfig;
pub use error::{ConfigError, ParseLabelError, ValidationError};
pub use estimator::{
    round_to, CalculationInput, CalculationResult, ComparisonResult, Estimate, Estimator,
};
pub use factors::{EmissionFactorTable, EmissionModel, FuelType};
pub use form::ImpactForm;
pub use report::Report;
pub use timeframe::TimeFrame;
