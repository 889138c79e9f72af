//! Change notifications for account state.
//!
//! - **types**: `AccountEvent`, one variant per kind of mutation
//! - **dispatcher**: ordered listener list with idempotent disposers

pub mod dispatcher;
pub mod types;

pub use dispatcher::{EventDispatcher, Listener, Subscription};
pub use types::AccountEvent;
