//! Listening socket and the sequential accept loop.

pub mod listener;

pub use listener::{run, Listener, BACKLOG};
