use std::collections::HashMap;

use crate::errors::errors::Error;

use super::ir::{IrFunction, Unit};
use super::vm::Vm;

/// Handle to a loaded unit. Retracting it unloads the unit and every symbol
/// the unit defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitHandle(u64);

/// A function provided by the host process rather than by lowered code.
pub struct HostFunction {
    pub arity: usize,
    pub run: fn(&[f64]) -> f64,
}

/// What a name resolved to inside the engine.
pub(super) enum Resolved<'a> {
    Function(&'a IrFunction),
    Host(&'a HostFunction),
}

/// A resolved, invocable symbol borrowed from the engine.
pub struct Callable<'a> {
    engine: &'a Engine,
    target: Resolved<'a>,
}

impl Callable<'_> {
    pub fn arity(&self) -> usize {
        match &self.target {
            Resolved::Function(function) => function.arity(),
            Resolved::Host(host) => host.arity,
        }
    }

    /// Runs the symbol with the given arguments.
    pub fn call(&self, args: &[f64]) -> Result<f64, Error> {
        if args.len() != self.arity() {
            return Err(Error::IncorrectArgumentCount {
                expected: self.arity(),
                received: args.len(),
            });
        }
        match &self.target {
            Resolved::Function(function) => Vm::new(self.engine).run(function, args),
            Resolved::Host(host) => Ok((host.run)(args)),
        }
    }
}

/// The execution backend: holds loaded units, routes names to the unit or
/// host function that owns them, and runs code through the VM.
pub struct Engine {
    units: HashMap<u64, Unit>,
    /// Defined function name to the id of the unit that owns it. Body-less
    /// declarations are intentionally absent.
    symbols: HashMap<String, u64>,
    hosts: HashMap<&'static str, HostFunction>,
    next_unit: u64,
}

impl Engine {
    pub fn new() -> Engine {
        Engine {
            units: HashMap::new(),
            symbols: HashMap::new(),
            hosts: builtin_hosts(),
            next_unit: 0,
        }
    }

    /// Loads a finalized unit. Fails without loading anything when the unit
    /// defines a symbol some loaded unit already defines.
    pub fn submit(&mut self, unit: Unit) -> Result<UnitHandle, Error> {
        for function in unit.functions() {
            if function.defined && self.symbols.contains_key(&function.name) {
                return Err(Error::DuplicateDefinition {
                    name: function.name.clone(),
                });
            }
        }

        let id = self.next_unit;
        self.next_unit += 1;
        for function in unit.functions() {
            if function.defined {
                self.symbols.insert(function.name.clone(), id);
            }
        }
        tracing::debug!(unit = unit.name(), id, "unit loaded");
        self.units.insert(id, unit);
        Ok(UnitHandle(id))
    }

    /// Resolves a name to something invocable: defined unit symbols first,
    /// then host functions.
    pub fn lookup(&self, name: &str) -> Result<Callable<'_>, Error> {
        self.resolve(name).map(|target| Callable {
            engine: self,
            target,
        })
    }

    pub(super) fn resolve(&self, name: &str) -> Result<Resolved<'_>, Error> {
        if let Some(id) = self.symbols.get(name) {
            if let Some(function) = self.units.get(id).and_then(|unit| unit.function(name)) {
                return Ok(Resolved::Function(function));
            }
        }
        if let Some(host) = self.hosts.get(name) {
            return Ok(Resolved::Host(host));
        }
        Err(Error::SymbolNotFound {
            name: name.to_string(),
        })
    }

    /// Unloads a unit and its symbols. Unknown handles are ignored, so
    /// retraction is safe on every error path.
    pub fn retract(&mut self, handle: UnitHandle) {
        if let Some(unit) = self.units.remove(&handle.0) {
            self.symbols.retain(|_, id| *id != handle.0);
            tracing::debug!(unit = unit.name(), "unit retracted");
        }
    }

    /// Whether some loaded unit defines a body for `name`.
    pub fn is_defined(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }
}

impl Default for Engine {
    fn default() -> Engine {
        Engine::new()
    }
}

fn host_putchard(args: &[f64]) -> f64 {
    eprint!("{}", (args[0] as u8) as char);
    0.0
}

fn host_printd(args: &[f64]) -> f64 {
    eprintln!("{}", args[0]);
    0.0
}

/// The fixed set of host symbols an `extern` can reach.
fn builtin_hosts() -> HashMap<&'static str, HostFunction> {
    let mut hosts: HashMap<&'static str, HostFunction> = HashMap::new();
    hosts.insert(
        "sin",
        HostFunction {
            arity: 1,
            run: |args| args[0].sin(),
        },
    );
    hosts.insert(
        "cos",
        HostFunction {
            arity: 1,
            run: |args| args[0].cos(),
        },
    );
    hosts.insert(
        "sqrt",
        HostFunction {
            arity: 1,
            run: |args| args[0].sqrt(),
        },
    );
    hosts.insert(
        "fabs",
        HostFunction {
            arity: 1,
            run: |args| args[0].abs(),
        },
    );
    hosts.insert(
        "floor",
        HostFunction {
            arity: 1,
            run: |args| args[0].floor(),
        },
    );
    hosts.insert(
        "pow",
        HostFunction {
            arity: 2,
            run: |args| args[0].powf(args[1]),
        },
    );
    hosts.insert(
        "putchard",
        HostFunction {
            arity: 1,
            run: host_putchard,
        },
    );
    hosts.insert(
        "printd",
        HostFunction {
            arity: 1,
            run: host_printd,
        },
    );
    hosts
}
