//! Onboarding flow domain module.
//!
//! The pure state machine behind the wallet open/create/recover dialog. It
//! decides the next state and which side effects the application layer must
//! run; it never performs them.

mod action;
mod error;
mod event;
mod state;
pub mod state_machine;

pub use action::FlowAction;
pub use error::FlowError;
pub use event::FlowEvent;
pub use state::{FlowState, SubmitOperation};
pub use state_machine::FlowStateMachine;
