pub mod chat;
pub mod detection;

pub use chat::*;
pub use detection::*;
