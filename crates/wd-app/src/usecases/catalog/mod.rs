mod list_wallets;

pub use list_wallets::{CatalogError, ListWallets};
