//! Flow control for transactions that talk to the network.

#![cfg(feature = "framework")]

mod retrier;
mod state;

pub use retrier::*;
pub use state::*;
