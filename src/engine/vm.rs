use crate::errors::errors::Error;

use super::engine::{Engine, Resolved};
use super::ir::{IrFunction, Op};

/// Limit on nested calls, so runaway recursion fails cleanly instead of
/// overflowing the process stack.
pub const MAX_CALL_DEPTH: usize = 1000;

/// Stack interpreter for unit functions. One `Vm` value runs one call
/// frame; a nested `Call` runs on a deeper `Vm` against the same engine.
pub struct Vm<'a> {
    engine: &'a Engine,
    depth: usize,
}

fn pop(stack: &mut Vec<f64>) -> Result<f64, Error> {
    stack.pop().ok_or(Error::StackUnderflow)
}

impl<'a> Vm<'a> {
    pub fn new(engine: &'a Engine) -> Vm<'a> {
        Vm { engine, depth: 0 }
    }

    fn nested(&self) -> Vm<'a> {
        Vm {
            engine: self.engine,
            depth: self.depth + 1,
        }
    }

    /// Runs one function to its `Return`. Parameters land in the leading
    /// local slots; remaining slots start at 0.
    pub fn run(&self, function: &IrFunction, args: &[f64]) -> Result<f64, Error> {
        if self.depth >= MAX_CALL_DEPTH {
            return Err(Error::CallDepthExceeded);
        }

        let mut locals = vec![0.0; function.slots as usize];
        locals[..args.len()].copy_from_slice(args);
        let mut stack: Vec<f64> = vec![];
        let mut ip = 0;

        while ip < function.code.len() {
            match &function.code[ip] {
                Op::Const(value) => stack.push(*value),
                Op::Load(slot) => stack.push(locals[*slot as usize]),
                Op::Store(slot) => locals[*slot as usize] = pop(&mut stack)?,
                Op::Add => {
                    let rhs = pop(&mut stack)?;
                    let lhs = pop(&mut stack)?;
                    stack.push(lhs + rhs);
                }
                Op::Sub => {
                    let rhs = pop(&mut stack)?;
                    let lhs = pop(&mut stack)?;
                    stack.push(lhs - rhs);
                }
                Op::Mul => {
                    let rhs = pop(&mut stack)?;
                    let lhs = pop(&mut stack)?;
                    stack.push(lhs * rhs);
                }
                Op::Less => {
                    let rhs = pop(&mut stack)?;
                    let lhs = pop(&mut stack)?;
                    // Unordered less-or-equal: NaN operands compare true.
                    stack.push(if lhs > rhs { 0.0 } else { 1.0 });
                }
                Op::Jump(target) => {
                    ip = *target;
                    continue;
                }
                Op::JumpIfZero(target) => {
                    let value = pop(&mut stack)?;
                    if value == 0.0 || value.is_nan() {
                        ip = *target;
                        continue;
                    }
                }
                Op::Call(callee, argc) => {
                    if stack.len() < *argc {
                        return Err(Error::StackUnderflow);
                    }
                    let call_args = stack.split_off(stack.len() - argc);
                    let result = match self.engine.resolve(callee)? {
                        Resolved::Function(target) => {
                            if call_args.len() != target.arity() {
                                return Err(Error::IncorrectArgumentCount {
                                    expected: target.arity(),
                                    received: call_args.len(),
                                });
                            }
                            self.nested().run(target, &call_args)?
                        }
                        Resolved::Host(host) => {
                            if call_args.len() != host.arity {
                                return Err(Error::IncorrectArgumentCount {
                                    expected: host.arity,
                                    received: call_args.len(),
                                });
                            }
                            (host.run)(&call_args)
                        }
                    };
                    stack.push(result);
                }
                Op::Pop => {
                    pop(&mut stack)?;
                }
                Op::Return => return pop(&mut stack),
            }
            ip += 1;
        }

        // Code that falls off the end returns whatever is on top.
        pop(&mut stack)
    }
}
