//! Wallet session domain module.

mod state;

pub use state::{OpenWallet, SessionState};
