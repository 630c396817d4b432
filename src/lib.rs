//! # memory
//!
//! A single-shot file protocol served over standard input and output:
//! - `get` streams an existing regular file to the output
//! - `set` stores an exact number of body bytes into a file
//! - Strict LF-terminated header framing with explicit body length
//! - Two failure classes with fixed messages and exit status 1
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Session                              │
//! │          (one request, stdin / stdout / stderr)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Protocol Codec                             │
//! │      (command → location → [length], line reader)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Request
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Engine::get│          │ Engine::set │
//!   │  (stream)   │          │ (copy body) │
//!   └──────┬──────┘          └──────┬──────┘
//!          │                        │
//!          └───────────┬────────────┘
//!                      ▼
//!              ┌──────────────┐
//!              │   Transfer   │
//!              │ (write_fully)│
//!              └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod transfer;
pub mod engine;
pub mod session;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{InvalidRequest, MemoryError, Result, Stage};
pub use config::Config;
pub use engine::Engine;
pub use protocol::{Request, Status};
pub use session::Session;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of memory
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
