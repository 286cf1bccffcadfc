pub mod model;

pub use model::{should_bypass_ceremony, Settings, CURRENT_SCHEMA_VERSION};
