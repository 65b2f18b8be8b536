//! Gift-suggestion workflow: prompt construction, the remote model client,
//! and the per-giftee refinement session.

mod client;
mod prompt;
mod session;

pub use client::*;
pub use prompt::*;
pub use session::*;
