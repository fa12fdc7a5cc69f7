//! docserver - minimal document server
//!
//! Answers a one-line `GET <path>` request with either the contents of a
//! file under the base directory or the captured output of a program under
//! `<base>/bin/`.

pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod files;
pub mod http;
pub mod router;
pub mod server;
