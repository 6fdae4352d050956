pub mod assistant;
pub mod metrics;
pub mod prompt;
pub mod providers;
pub mod session_store;

pub use assistant::{Assistant, ChatError, ChatReply};
pub use session_store::SessionStore;
