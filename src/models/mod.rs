//! Data models for the giftlist application.
//!
//! These models match the frontend interfaces exactly for seamless interoperability.

mod giftee;
mod idea;
mod suggestion;

pub use giftee::*;
pub use idea::*;
pub use suggestion::*;
