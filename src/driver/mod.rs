//! Top-level loop module for the interpreter.
//!
//! This module contains the incremental driver that ties the pipeline
//! together. It handles:
//!
//! - Dispatch on the current token (definition, extern, expression, `;`)
//! - Rotation of compilation units (one fresh unit per top-level form)
//! - Evaluation and retraction of anonymous expression units
//! - Skip-token error recovery and console reporting

pub mod driver;
