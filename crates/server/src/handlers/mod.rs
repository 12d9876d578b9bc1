//! Request handlers.

pub mod rewrite;
pub mod tasks;
pub mod voice;
