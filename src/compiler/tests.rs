//! Unit tests for the lowering module.
//!
//! This module contains tests for code generation including:
//! - Literal, variable, and operator lowering
//! - Call resolution through the current unit and the signature table
//! - Conditional and loop control flow layout
//! - The redefinition rule and signature registration order

use std::collections::HashMap;

use crate::ast::ast::{Expr, Function, Prototype};
use crate::engine::engine::Engine;
use crate::engine::ir::{IrFunction, Op, Unit};
use crate::errors::errors::Error;

use super::compiler::{compile_extern, compile_function};

fn num(value: f64) -> Expr {
    Expr::Number(value)
}

fn var(name: &str) -> Expr {
    Expr::Variable(name.to_string())
}

fn bin(op: char, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

fn function(name: &str, params: &[&str], body: Expr) -> Function {
    Function {
        proto: Prototype {
            name: name.to_string(),
            params: params.iter().map(|p| p.to_string()).collect(),
        },
        body,
    }
}

/// Lowers one definition into a fresh unit against a fresh engine.
fn lower(function: &Function) -> Result<(Unit, HashMap<String, Prototype>), Error> {
    let mut unit = Unit::new("test");
    let mut protos = HashMap::new();
    let engine = Engine::new();
    compile_function(&mut unit, &mut protos, &engine, function)?;
    Ok((unit, protos))
}

fn code_of<'a>(unit: &'a Unit, name: &str) -> &'a [Op] {
    &unit.function(name).unwrap().code
}

#[test]
fn test_lower_constant_function() {
    let (unit, _) = lower(&function("f", &[], num(42.0))).unwrap();

    assert_eq!(code_of(&unit, "f"), [Op::Const(42.0), Op::Return]);
    assert!(unit.function("f").unwrap().defined);
}

#[test]
fn test_lower_binary_chain() {
    let body = bin('+', var("a"), bin('*', var("b"), num(2.0)));
    let (unit, _) = lower(&function("f", &["a", "b"], body)).unwrap();

    assert_eq!(
        code_of(&unit, "f"),
        [
            Op::Load(0),
            Op::Load(1),
            Op::Const(2.0),
            Op::Mul,
            Op::Add,
            Op::Return,
        ]
    );
}

#[test]
fn test_duplicate_parameter_last_wins() {
    let (unit, _) = lower(&function("f", &["a", "a"], var("a"))).unwrap();

    assert_eq!(code_of(&unit, "f"), [Op::Load(1), Op::Return]);
}

#[test]
fn test_unknown_variable() {
    let result = lower(&function("f", &["a"], var("b")));

    assert_eq!(
        result.unwrap_err(),
        Error::UnknownVariable {
            name: "b".to_string()
        }
    );
}

#[test]
fn test_unlowerable_operator() {
    let result = lower(&function("f", &[], bin('%', num(1.0), num(2.0))));

    assert_eq!(
        result.unwrap_err(),
        Error::InvalidBinaryOperator { operator: '%' }
    );
}

#[test]
fn test_call_resolves_within_current_unit() {
    let mut unit = Unit::new("test");
    let mut protos = HashMap::new();
    let engine = Engine::new();

    compile_function(&mut unit, &mut protos, &engine, &function("g", &[], num(1.0))).unwrap();
    let caller = function(
        "f",
        &[],
        Expr::Call {
            callee: "g".to_string(),
            args: vec![],
        },
    );
    compile_function(&mut unit, &mut protos, &engine, &caller).unwrap();

    assert_eq!(
        code_of(&unit, "f"),
        [Op::Call("g".to_string(), 0), Op::Return]
    );
}

#[test]
fn test_call_rematerializes_known_signature() {
    let mut unit = Unit::new("test");
    let mut protos = HashMap::new();
    protos.insert(
        "g".to_string(),
        Prototype {
            name: "g".to_string(),
            params: vec!["x".to_string()],
        },
    );
    let engine = Engine::new();

    let caller = function(
        "f",
        &[],
        Expr::Call {
            callee: "g".to_string(),
            args: vec![num(1.0)],
        },
    );
    compile_function(&mut unit, &mut protos, &engine, &caller).unwrap();

    // The signature has been re-declared into this unit.
    let declaration = unit.function("g").unwrap();
    assert!(!declaration.defined);
    assert_eq!(declaration.arity(), 1);
}

#[test]
fn test_call_to_unknown_function() {
    let body = Expr::Call {
        callee: "nope".to_string(),
        args: vec![],
    };
    let result = lower(&function("f", &[], body));

    assert_eq!(
        result.unwrap_err(),
        Error::UnknownFunction {
            callee: "nope".to_string()
        }
    );
}

#[test]
fn test_call_with_wrong_arity() {
    let mut unit = Unit::new("test");
    let mut protos = HashMap::new();
    let engine = Engine::new();

    compile_function(&mut unit, &mut protos, &engine, &function("g", &["x"], var("x"))).unwrap();
    let caller = function(
        "f",
        &[],
        Expr::Call {
            callee: "g".to_string(),
            args: vec![num(1.0), num(2.0)],
        },
    );
    let result = compile_function(&mut unit, &mut protos, &engine, &caller);

    assert_eq!(
        result.unwrap_err(),
        Error::IncorrectArgumentCount {
            expected: 1,
            received: 2
        }
    );
}

#[test]
fn test_if_layout() {
    let body = Expr::If {
        cond: Box::new(var("c")),
        then: Box::new(num(1.0)),
        otherwise: Box::new(num(2.0)),
    };
    let (unit, _) = lower(&function("f", &["c"], body)).unwrap();

    assert_eq!(
        code_of(&unit, "f"),
        [
            Op::Load(0),
            Op::JumpIfZero(4),
            Op::Const(1.0),
            Op::Jump(5),
            Op::Const(2.0),
            Op::Return,
        ]
    );
}

#[test]
fn test_for_restores_shadowed_binding() {
    // def f(i) (for i = 1, 0 in 1) + i
    // The trailing `i` must read the parameter again, not the loop slot.
    let loop_expr = Expr::For {
        var: "i".to_string(),
        start: Box::new(num(1.0)),
        end: Box::new(num(0.0)),
        step: None,
        body: Box::new(num(1.0)),
    };
    let body = bin('+', loop_expr, var("i"));
    let (unit, _) = lower(&function("f", &["i"], body)).unwrap();

    let code = code_of(&unit, "f");
    assert_eq!(&code[code.len() - 3..], [Op::Load(0), Op::Add, Op::Return]);
}

#[test]
fn test_for_unbinds_fresh_variable() {
    // The loop variable does not exist after the loop when nothing was
    // shadowed.
    let loop_expr = Expr::For {
        var: "i".to_string(),
        start: Box::new(num(1.0)),
        end: Box::new(num(0.0)),
        step: None,
        body: Box::new(num(1.0)),
    };
    let body = bin('+', loop_expr, var("i"));
    let result = lower(&function("f", &[], body));

    assert_eq!(
        result.unwrap_err(),
        Error::UnknownVariable {
            name: "i".to_string()
        }
    );
}

#[test]
fn test_redefinition_rejected_across_units() {
    let mut engine = Engine::new();
    let mut protos = HashMap::new();

    let mut first = Unit::new("u0");
    compile_function(&mut first, &mut protos, &engine, &function("f", &[], num(1.0))).unwrap();
    engine.submit(first).unwrap();

    let mut second = Unit::new("u1");
    let result = compile_function(
        &mut second,
        &mut protos,
        &engine,
        &function("f", &[], num(2.0)),
    );

    assert_eq!(
        result.unwrap_err(),
        Error::FunctionRedefined {
            name: "f".to_string()
        }
    );
}

#[test]
fn test_prototype_registered_even_when_body_fails() {
    let mut unit = Unit::new("test");
    let mut protos = HashMap::new();
    let engine = Engine::new();

    let broken = function("f", &["a"], var("missing"));
    let result = compile_function(&mut unit, &mut protos, &engine, &broken);

    assert!(result.is_err());
    assert!(protos.contains_key("f"), "signature should be recorded first");
}

#[test]
fn test_extern_then_definition_fills_body() {
    let mut unit = Unit::new("test");
    let mut protos = HashMap::new();
    let engine = Engine::new();

    let proto = Prototype {
        name: "f".to_string(),
        params: vec!["x".to_string()],
    };
    compile_extern(&mut unit, &mut protos, &proto);
    assert!(!unit.function("f").unwrap().defined);

    compile_function(&mut unit, &mut protos, &engine, &function("f", &["x"], var("x"))).unwrap();
    assert!(unit.function("f").unwrap().defined);
}

#[test]
fn test_extern_registers_signature() {
    let mut unit = Unit::new("test");
    let mut protos = HashMap::new();

    compile_extern(
        &mut unit,
        &mut protos,
        &Prototype {
            name: "sin".to_string(),
            params: vec!["x".to_string()],
        },
    );

    assert_eq!(
        protos.get("sin"),
        Some(&Prototype {
            name: "sin".to_string(),
            params: vec!["x".to_string()],
        })
    );
    assert_eq!(
        unit.function("sin").map(IrFunction::arity),
        Some(1)
    );
}
