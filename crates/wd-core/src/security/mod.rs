//! Secret handling for passwords and seed phrases.

pub mod secret;

pub use secret::SecretString;
