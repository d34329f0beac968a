//! Pre-made transactions.

#![cfg(feature = "transactions")]

mod resolve_workflow_version;
mod write_output;

pub use resolve_workflow_version::*;
pub use write_output::*;
