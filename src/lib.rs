//! WalletDesk front end: configuration, logging, dependency wiring and the
//! `walletdesk` command line.

pub mod adapters;
pub mod bootstrap;
pub mod cli;
