//! Lowering module for the interpreter.
//!
//! This module contains the code generator that transforms the AST into
//! stack machine instructions. It handles:
//!
//! - Lowering of expressions into [`crate::engine::ir::Op`] sequences
//! - Parameter slot assignment and loop variable shadowing
//! - Call resolution against the current unit and known signatures
//! - The one-definition rule for function names

pub mod compiler;
pub mod expr;

#[cfg(test)]
mod tests;
