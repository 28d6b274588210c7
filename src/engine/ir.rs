use std::collections::HashMap;
use std::fmt::{self, Display};

/// One stack-machine instruction. All values are f64; instructions operate
/// on the operand stack and the per-call local slots.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Push a constant.
    Const(f64),
    /// Push the value of a local slot.
    Load(u16),
    /// Pop the top of stack into a local slot.
    Store(u16),
    Add,
    Sub,
    Mul,
    /// Pop rhs then lhs; push 1.0 unless lhs is greater than rhs. This is
    /// an unordered comparison: NaN operands compare as 1.0.
    Less,
    /// Continue at the given instruction index.
    Jump(usize),
    /// Pop; continue at the given index when the value is 0.0 or NaN.
    JumpIfZero(usize),
    /// Pop the given number of arguments (first pushed first) and call a
    /// named function; push its result.
    Call(String, usize),
    /// Discard the top of stack.
    Pop,
    /// Return the top of stack to the caller.
    Return,
}

impl Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Const(value) => write!(f, "const {}", value),
            Op::Load(slot) => write!(f, "load {}", slot),
            Op::Store(slot) => write!(f, "store {}", slot),
            Op::Add => write!(f, "add"),
            Op::Sub => write!(f, "sub"),
            Op::Mul => write!(f, "mul"),
            Op::Less => write!(f, "less"),
            Op::Jump(target) => write!(f, "jump {}", target),
            Op::JumpIfZero(target) => write!(f, "jz {}", target),
            Op::Call(callee, argc) => write!(f, "call {} {}", callee, argc),
            Op::Pop => write!(f, "pop"),
            Op::Return => write!(f, "ret"),
        }
    }
}

/// A function lowered into a unit: either a full definition or a body-less
/// declaration re-materialized from a known signature.
#[derive(Debug, Clone)]
pub struct IrFunction {
    pub name: String,
    pub params: Vec<String>,
    pub code: Vec<Op>,
    /// Local slot count, parameters included. Parameters occupy the
    /// leading slots in order.
    pub slots: u16,
    /// False for declarations, which carry no code and cannot run.
    pub defined: bool,
}

impl IrFunction {
    /// A body-less declaration of an external or not-yet-loaded symbol.
    pub fn declaration(name: &str, params: &[String]) -> IrFunction {
        IrFunction {
            name: name.to_string(),
            params: params.to_vec(),
            code: vec![],
            slots: params.len() as u16,
            defined: false,
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl Display for IrFunction {
    /// Readable disassembly; this is the textual rendering the driver
    /// reports for definitions and externs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.params.join(" ");
        if !self.defined {
            return write!(f, "declare {}({})", self.name, params);
        }
        writeln!(f, "define {}({}) {{", self.name, params)?;
        for (index, op) in self.code.iter().enumerate() {
            writeln!(f, "  {}: {}", index, op)?;
        }
        write!(f, "}}")
    }
}

/// A compilation unit: a named collection of functions lowered together and
/// submitted to the engine as one piece. Units are affine; they are filled,
/// then moved into `Engine::submit` or dropped.
#[derive(Debug, Clone)]
pub struct Unit {
    name: String,
    functions: HashMap<String, IrFunction>,
}

impl Unit {
    pub fn new(name: &str) -> Unit {
        Unit {
            name: name.to_string(),
            functions: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a function, replacing any previous entry with the same name
    /// (a definition may replace its own declaration).
    pub fn add(&mut self, function: IrFunction) {
        self.functions.insert(function.name.clone(), function);
    }

    pub fn function(&self, name: &str) -> Option<&IrFunction> {
        self.functions.get(name)
    }

    pub fn functions(&self) -> impl Iterator<Item = &IrFunction> {
        self.functions.values()
    }
}
