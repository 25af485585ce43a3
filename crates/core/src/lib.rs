//! # Propagator Core
//!
//! Core types and attribute-table I/O for the propagator watershed toolkit.
//!
//! This crate provides:
//! - `SubcatchmentTable`: a flat table of drainage sub-areas, each pointing
//!   at one downstream neighbor
//! - `AttributeValue`: typed attribute values with a `Null` no-data marker
//! - The `Algorithm` trait for a consistent operation API
//! - I/O for flat attribute-table interchange (JSON)

pub mod error;
pub mod io;
pub mod table;

pub use error::{Error, Result};
pub use table::{AttributeValue, Subcatchment, SubcatchmentTable};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::table::{AttributeValue, Subcatchment, SubcatchmentTable};
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in the propagator toolkit.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
