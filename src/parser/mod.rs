//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It handles:
//!
//! - Top-level form parsing (definitions, externs, bare expressions)
//! - Expression parsing (binary chains, calls, literals, if, for)
//! - A mutable operator table, extensible at runtime
//!
//! Primary forms are parsed by recursive descent; binary operator chains
//! by precedence climbing over the operator table in `lookups`.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
