//! Wallet catalog domain module.
//!
//! The catalog is the locally cached list of wallets the backend last reported.

mod catalog;
mod summary;

pub use catalog::WalletCatalog;
pub use summary::WalletSummary;
