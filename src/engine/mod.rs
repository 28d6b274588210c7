//! Execution backend for lowered code.
//!
//! This module contains the engine that loads and runs compilation units.
//! It handles:
//!
//! - The stack-machine instruction set and unit containers (`ir`)
//! - Incremental unit loading, symbol routing, and retraction (`engine`)
//! - Host functions reachable through `extern` declarations
//! - The interpreter itself (`vm`)
//!
//! The rest of the crate depends on it only through the narrow
//! submit/lookup/retract contract.

pub mod engine;
pub mod ir;
pub mod vm;
