//! Main lowering module.
//!
//! This module contains the core Compiler structure and the entry points
//! that lower parsed functions into stack-machine code inside a compilation
//! unit. It manages the per-body scope table, local slot allocation, and
//! callee resolution against the known-signatures table.

use std::collections::HashMap;

use crate::{
    ast::ast::{Function, Prototype},
    engine::{
        engine::Engine,
        ir::{IrFunction, Op, Unit},
    },
    errors::errors::Error,
};

use super::expr::gen_expr;

/// Per-body lowering state.
///
/// One Compiler lowers exactly one function body and is then consumed. The
/// scope table lives here and never survives the body, so nothing lowered
/// earlier can leak bindings into a later function.
pub struct Compiler<'a> {
    /// The unit receiving this function and any re-declared callees
    pub unit: &'a mut Unit,
    /// Known signatures, read to re-materialize cross-unit callees
    pub protos: &'a HashMap<String, Prototype>,
    /// Scope table: variable name to local slot
    pub named_values: HashMap<String, u16>,
    /// Code generated so far for the current body
    pub code: Vec<Op>,
    /// Local slots allocated so far, parameters included
    pub slots: u16,
}

impl<'a> Compiler<'a> {
    fn new(unit: &'a mut Unit, protos: &'a HashMap<String, Prototype>) -> Compiler<'a> {
        Compiler {
            unit,
            protos,
            named_values: HashMap::new(),
            code: vec![],
            slots: 0,
        }
    }

    /// Appends an instruction and returns its index.
    pub fn emit(&mut self, op: Op) -> usize {
        self.code.push(op);
        self.code.len() - 1
    }

    /// Index the next emitted instruction will have.
    pub fn next_index(&self) -> usize {
        self.code.len()
    }

    /// Reserves a fresh local slot.
    pub fn alloc_slot(&mut self) -> u16 {
        let slot = self.slots;
        self.slots += 1;
        slot
    }

    /// Resolves a callee to its arity.
    ///
    /// The current unit is checked first; otherwise a known signature is
    /// re-declared into the current unit, which is what lets every rotated
    /// unit call functions defined in earlier ones.
    pub fn resolve_callee(&mut self, callee: &str) -> Result<usize, Error> {
        if let Some(function) = self.unit.function(callee) {
            return Ok(function.arity());
        }
        if let Some(proto) = self.protos.get(callee) {
            self.unit
                .add(IrFunction::declaration(&proto.name, &proto.params));
            return Ok(proto.params.len());
        }
        Err(Error::UnknownFunction {
            callee: callee.to_string(),
        })
    }
}

/// Lowers a full function definition into `unit`.
///
/// The prototype is registered in the known-signatures table before the
/// body is lowered, so a failed body still updates the recorded signature.
/// A name that already has a bodied definition, in a loaded unit or in this
/// one, is rejected; filling in a previously extern-only name is allowed.
///
/// # Arguments
///
/// * `unit` - The unit receiving the lowered function
/// * `protos` - The persistent known-signatures table
/// * `engine` - Consulted for already-loaded definitions only
/// * `function` - The parsed definition
pub fn compile_function(
    unit: &mut Unit,
    protos: &mut HashMap<String, Prototype>,
    engine: &Engine,
    function: &Function,
) -> Result<(), Error> {
    let proto = &function.proto;
    protos.insert(proto.name.clone(), proto.clone());

    let already_bodied = engine.is_defined(&proto.name)
        || unit.function(&proto.name).is_some_and(|f| f.defined);
    if already_bodied {
        return Err(Error::FunctionRedefined {
            name: proto.name.clone(),
        });
    }

    let mut compiler = Compiler::new(unit, protos);
    for (slot, param) in proto.params.iter().enumerate() {
        // Duplicate parameter names are allowed; the last one wins.
        compiler.named_values.insert(param.clone(), slot as u16);
    }
    compiler.slots = proto.params.len() as u16;

    gen_expr(&mut compiler, &function.body)?;
    compiler.emit(Op::Return);

    let Compiler { code, slots, .. } = compiler;
    unit.add(IrFunction {
        name: proto.name.clone(),
        params: proto.params.clone(),
        code,
        slots,
        defined: true,
    });
    Ok(())
}

/// Declares an extern signature into `unit` and records it in the
/// known-signatures table. Nothing executable is produced, so the unit is
/// never worth submitting for this alone.
pub fn compile_extern(unit: &mut Unit, protos: &mut HashMap<String, Prototype>, proto: &Prototype) {
    unit.add(IrFunction::declaration(&proto.name, &proto.params));
    protos.insert(proto.name.clone(), proto.clone());
}
