use std::collections::HashMap;
use std::io::Read;

use crate::ast::ast::{Prototype, ANONYMOUS_FUNCTION_NAME};
use crate::compiler::compiler::{compile_extern, compile_function};
use crate::engine::engine::Engine;
use crate::engine::ir::Unit;
use crate::errors::errors::Error;
use crate::lexer::tokens::Token;
use crate::parser::parser::Parser;
use crate::parser::stmt::{parse_definition, parse_extern, parse_top_level_expr};

/// The outcome of one successfully handled top-level form.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// A function definition was loaded; carries its rendered form.
    Definition(String),
    /// An external declaration was registered; carries its rendered form.
    Extern(String),
    /// A bare expression was evaluated; carries its value.
    Evaluated(f64),
}

/// The interactive loop: reads top-level forms, lowers each one into a fresh
/// compilation unit, and hands the unit to the engine.
///
/// The driver owns all state that persists across forms: the parser (and
/// with it the operator table), the known-signatures table, the engine, and
/// the unit counter. Independent drivers are fully isolated from each other.
pub struct Driver<R: Read> {
    parser: Parser<R>,
    protos: HashMap<String, Prototype>,
    engine: Engine,
    units: u64,
}

impl<R: Read> Driver<R> {
    pub fn new(input: R) -> Driver<R> {
        Driver {
            parser: Parser::new(input),
            protos: HashMap::new(),
            engine: Engine::new(),
            units: 0,
        }
    }

    /// The engine holding every unit loaded so far.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Registers a single-character binary operator for all later input.
    /// Operators parse immediately; lowering rejects those outside the
    /// built-in set.
    pub fn register_operator(&mut self, operator: char, precedence: i32) {
        self.parser.register_operator(operator, precedence);
    }

    /// Handles the next top-level form and returns its outcome, or `None`
    /// once the input is exhausted. Separator semicolons are skipped
    /// silently; they produce no outcome of their own.
    pub fn step(&mut self) -> Option<Result<Reply, Error>> {
        loop {
            match self.parser.current_token() {
                Token::Eof => return None,
                Token::Char(';') => {
                    self.parser.advance();
                }
                Token::Def => return Some(self.handle_definition()),
                Token::Extern => return Some(self.handle_extern()),
                _ => return Some(self.handle_top_level_expression()),
            }
        }
    }

    /// Runs the interactive loop to end of input, prompting before each
    /// form and reporting every outcome on stderr.
    pub fn run(&mut self) {
        loop {
            eprint!("ready> ");
            match self.step() {
                Some(outcome) => report(outcome),
                None => return,
            }
        }
    }

    fn handle_definition(&mut self) -> Result<Reply, Error> {
        let function = match parse_definition(&mut self.parser) {
            Ok(function) => function,
            Err(error) => {
                // Skip one token so the loop does not trip on the same
                // input again.
                self.parser.advance();
                return Err(error);
            }
        };

        let mut unit = self.fresh_unit();
        compile_function(&mut unit, &mut self.protos, &self.engine, &function)?;
        let rendering = unit
            .function(&function.proto.name)
            .map(|lowered| lowered.to_string())
            .unwrap_or_default();
        self.engine.submit(unit)?;
        Ok(Reply::Definition(rendering))
    }

    fn handle_extern(&mut self) -> Result<Reply, Error> {
        let proto = match parse_extern(&mut self.parser) {
            Ok(proto) => proto,
            Err(error) => {
                self.parser.advance();
                return Err(error);
            }
        };

        // Nothing in a declaration-only unit is executable, so it is
        // rendered and dropped rather than submitted.
        let mut unit = self.fresh_unit();
        compile_extern(&mut unit, &mut self.protos, &proto);
        let rendering = unit
            .function(&proto.name)
            .map(|declared| declared.to_string())
            .unwrap_or_default();
        tracing::debug!(name = proto.name.as_str(), "extern registered");
        Ok(Reply::Extern(rendering))
    }

    fn handle_top_level_expression(&mut self) -> Result<Reply, Error> {
        let function = match parse_top_level_expr(&mut self.parser) {
            Ok(function) => function,
            Err(error) => {
                self.parser.advance();
                return Err(error);
            }
        };

        let mut unit = self.fresh_unit();
        compile_function(&mut unit, &mut self.protos, &self.engine, &function)?;
        let handle = self.engine.submit(unit)?;

        // The unit is retracted whether or not the call succeeds, so the
        // anonymous name is free again for the next expression.
        let result = self
            .engine
            .lookup(ANONYMOUS_FUNCTION_NAME)
            .and_then(|callable| callable.call(&[]));
        self.engine.retract(handle);

        Ok(Reply::Evaluated(result?))
    }

    fn fresh_unit(&mut self) -> Unit {
        let unit = Unit::new(&format!("repl.{}", self.units));
        self.units += 1;
        unit
    }
}

fn report(outcome: Result<Reply, Error>) {
    match outcome {
        Ok(Reply::Definition(rendering)) => {
            eprintln!("Read a function definition:\n{}\n", rendering);
        }
        Ok(Reply::Extern(rendering)) => {
            eprintln!("Read extern:\n{}\n", rendering);
        }
        Ok(Reply::Evaluated(value)) => {
            eprintln!("Evaluated to {}", value);
        }
        Err(error) => {
            eprintln!("Error: {}", error);
        }
    }
}
