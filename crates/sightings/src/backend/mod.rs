//! Mail backend abstraction
//!
//! The scan pipeline only needs to search and fetch; anything that can do
//! both (the Gmail API, an in-memory mailbox) can drive it.

mod memory;
mod traits;

pub use memory::{BackendCall, InMemoryMailbox};
pub use traits::MailBackend;
