//! Device session management for attendance terminals.
//!
//! An attendance terminal is a single stateful device: every interaction
//! must be wrapped in a suspend/operate/resume bracket, and only one
//! session may exist per device at a time. This crate provides
//! [`SessionManager`], the sole serialization point for a terminal:
//!
//! - a process-wide mutual-exclusion gate per terminal address; callers
//!   queue in arrival order and fail with [`SessionError::Timeout`] when a
//!   deadline elapses before they reach the device
//! - connection establishment with a small bounded retry, and no retry at
//!   all for anything past a successful dial
//! - the guaranteed disable → operate → enable → disconnect bracket, with
//!   best-effort cleanup on every exit path
//! - classification of all transport failures into the stable
//!   [`SessionError`] taxonomy
//!
//! Higher layers (directory reconciliation, enrollment) never hold a
//! connection themselves; they pass an async closure to
//! [`SessionManager::with_session`] and get typed results back.

pub mod error;
mod gate;
pub mod manager;

pub use error::{Result, SessionError};
pub use manager::{
    DEFAULT_ACQUIRE_TIMEOUT_MS, DEFAULT_CONNECT_RETRIES, SessionManager, SessionOptions,
};
