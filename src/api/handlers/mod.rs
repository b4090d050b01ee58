//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Agent listing, status and health handlers.
pub mod agents;
/// Request processing handler.
pub mod chat;
/// Conversation history handlers.
pub mod conversations;
