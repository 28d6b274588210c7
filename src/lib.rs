#![allow(clippy::module_inception)]

//! An interactive front end for a small expression-oriented language: a
//! streaming tokenizer, a precedence-climbing parser with a runtime-extensible
//! operator table, and an incremental driver that lowers each top-level form
//! into its own compilation unit and evaluates it on a stack-machine engine.
//!
//! The [`driver::driver::Driver`] is the main entry point:
//!
//! ```
//! use kaleido::driver::driver::{Driver, Reply};
//!
//! let mut driver = Driver::new("def double(x) x*2; double(21);".as_bytes());
//!
//! assert!(matches!(driver.step(), Some(Ok(Reply::Definition(_)))));
//! assert!(matches!(driver.step(), Some(Ok(Reply::Evaluated(v))) if v == 42.0));
//! assert!(driver.step().is_none());
//! ```

pub mod ast;
pub mod compiler;
pub mod driver;
pub mod engine;
pub mod errors;
pub mod lexer;
pub mod parser;
