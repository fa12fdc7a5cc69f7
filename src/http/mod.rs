//! Wire protocol and per-connection handling.
//!
//! The protocol is a single request line, `GET <path>`, answered with
//! `Content-Length: <N>\n\n<body>\n`. There is no status line: failures send
//! the status text (e.g. `404 Not Found`) as the body.
//!
//! # Architecture
//!
//! - **`connection`**: the per-connection state machine
//! - **`parser`**: validates the request line
//! - **`request`**: the parsed request
//! - **`response`**: status codes, bodies and framing
//! - **`writer`**: serializes and writes a response to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← single receive of the request line
//!        └──────┬──────┘
//!               │ parsed ─────────────── invalid → 400 ──┐
//!               ▼                                        │
//!        ┌─────────────┐                                 │
//!        │   Routing   │                                 │
//!        └──────┬──────┘                                 │
//!       /bin/…  │  anything else                         │
//!        ┌──────┴───────┐                                │
//!        ▼              ▼                                │
//!   ┌──────────┐   ┌─────────┐                           │
//!   │Executing │   │ Serving │ ── 404 / 403 / 500 ──┐    │
//!   └────┬─────┘   └────┬────┘                      │    │
//!        └──────┬───────┘                           │    │
//!               ▼                                   ▼    ▼
//!        ┌──────────────────────────────────────────────────┐
//!        │                    Responding                    │
//!        └──────┬───────────────────────────────────────────┘
//!               ▼
//!            Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use docserver::http::connection::Connection;
//!
//! let (socket, peer) = listener.accept().await?;
//! Connection::new(socket, peer, &settings).run().await?;
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
