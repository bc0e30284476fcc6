//! # audimark-shared
//!
//! Domain model types shared between the data-source layer and the review
//! queue: submissions, recordings, pagination metadata, and the LTI launch
//! token. Pure data, no I/O.

pub mod constants;
pub mod token;
pub mod types;

pub use token::LaunchToken;
pub use types::*;
