//! Error types and error handling for the front end.
//!
//! This module defines the single error enum used throughout tokenizing,
//! parsing, lowering, and execution. It includes:
//!
//! - Syntax error variants with the parser's fixed messages
//! - Lowering error variants for scope and call resolution failures
//! - Engine error variants for unit loading and evaluation failures

pub mod errors;
