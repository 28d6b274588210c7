use crate::{ast::ast::Expr, engine::ir::Op, errors::errors::Error};

use super::compiler::Compiler;

/// Generates stack code for the given expression.
///
/// On success exactly one new value has been pushed onto the operand stack
/// once the generated code runs.
pub fn gen_expr(compiler: &mut Compiler<'_>, expr: &Expr) -> Result<(), Error> {
    match expr {
        Expr::Number(value) => {
            compiler.emit(Op::Const(*value));
            Ok(())
        }
        Expr::Variable(name) => match compiler.named_values.get(name) {
            Some(&slot) => {
                compiler.emit(Op::Load(slot));
                Ok(())
            }
            None => Err(Error::UnknownVariable { name: name.clone() }),
        },
        Expr::Binary { op, lhs, rhs } => gen_binary(compiler, *op, lhs, rhs),
        Expr::Call { callee, args } => gen_call(compiler, callee, args),
        Expr::If {
            cond,
            then,
            otherwise,
        } => gen_if(compiler, cond, then, otherwise),
        Expr::For {
            var,
            start,
            end,
            step,
            body,
        } => gen_for(compiler, var, start, end, step.as_deref(), body),
    }
}

fn gen_binary(compiler: &mut Compiler<'_>, op: char, lhs: &Expr, rhs: &Expr) -> Result<(), Error> {
    gen_expr(compiler, lhs)?;
    gen_expr(compiler, rhs)?;

    match op {
        '+' => compiler.emit(Op::Add),
        '-' => compiler.emit(Op::Sub),
        '*' => compiler.emit(Op::Mul),
        '<' => compiler.emit(Op::Less),
        // Reachable through operators registered at runtime that have no
        // lowering yet.
        _ => return Err(Error::InvalidBinaryOperator { operator: op }),
    };
    Ok(())
}

fn gen_call(compiler: &mut Compiler<'_>, callee: &str, args: &[Expr]) -> Result<(), Error> {
    let arity = compiler.resolve_callee(callee)?;
    if args.len() != arity {
        return Err(Error::IncorrectArgumentCount {
            expected: arity,
            received: args.len(),
        });
    }

    for arg in args {
        gen_expr(compiler, arg)?;
    }
    compiler.emit(Op::Call(callee.to_string(), args.len()));
    Ok(())
}

fn gen_if(
    compiler: &mut Compiler<'_>,
    cond: &Expr,
    then: &Expr,
    otherwise: &Expr,
) -> Result<(), Error> {
    gen_expr(compiler, cond)?;
    let to_else = compiler.emit(Op::JumpIfZero(0));

    gen_expr(compiler, then)?;
    let to_end = compiler.emit(Op::Jump(0));

    let else_target = compiler.next_index();
    compiler.code[to_else] = Op::JumpIfZero(else_target);

    gen_expr(compiler, otherwise)?;

    let end = compiler.next_index();
    compiler.code[to_end] = Op::Jump(end);
    Ok(())
}

fn gen_for(
    compiler: &mut Compiler<'_>,
    var: &str,
    start: &Expr,
    end: &Expr,
    step: Option<&Expr>,
    body: &Expr,
) -> Result<(), Error> {
    gen_expr(compiler, start)?;
    let var_slot = compiler.alloc_slot();
    let step_slot = compiler.alloc_slot();
    compiler.emit(Op::Store(var_slot));

    // Shadow any existing binding for the loop variable.
    let shadowed = compiler.named_values.insert(var.to_string(), var_slot);

    let loop_start = compiler.next_index();
    gen_expr(compiler, body)?;
    compiler.emit(Op::Pop);

    match step {
        Some(step) => gen_expr(compiler, step)?,
        None => {
            compiler.emit(Op::Const(1.0));
        }
    }
    compiler.emit(Op::Store(step_slot));

    // The end condition sees the variable before the increment.
    gen_expr(compiler, end)?;

    compiler.emit(Op::Load(var_slot));
    compiler.emit(Op::Load(step_slot));
    compiler.emit(Op::Add);
    compiler.emit(Op::Store(var_slot));

    let to_exit = compiler.emit(Op::JumpIfZero(0));
    compiler.emit(Op::Jump(loop_start));
    let exit = compiler.next_index();
    compiler.code[to_exit] = Op::JumpIfZero(exit);

    // Put back whatever the loop variable shadowed.
    match shadowed {
        Some(slot) => {
            compiler.named_values.insert(var.to_string(), slot);
        }
        None => {
            compiler.named_values.remove(var);
        }
    }

    // A for expression always evaluates to 0.
    compiler.emit(Op::Const(0.0));
    Ok(())
}
