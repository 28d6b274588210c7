/// Name given to the synthetic zero-parameter function that wraps a bare
/// top-level expression. It contains underscores, which the tokenizer never
/// allows inside an identifier, so no user-written definition can collide
/// with it.
pub const ANONYMOUS_FUNCTION_NAME: &str = "__anon_expr";

/// An expression node. Every composite variant exclusively owns its
/// children; construction moves subtrees in and nothing is ever shared.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Number(f64),
    /// A reference to a bound variable.
    Variable(String),
    /// A binary operation. `op` is always a character that was registered
    /// in the operator table when this node was parsed.
    Binary {
        op: char,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// A call to a named function. The callee is resolved at lowering time,
    /// not at parse time.
    Call { callee: String, args: Vec<Expr> },
    /// Conditional expression; evaluates to whichever branch runs.
    If {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    /// Loop expression; always evaluates to 0. A missing step defaults
    /// to 1.
    For {
        var: String,
        start: Box<Expr>,
        end: Box<Expr>,
        step: Option<Box<Expr>>,
        body: Box<Expr>,
    },
}

/// A function signature: its name and ordered parameter names. Duplicate
/// parameter names are not rejected by the grammar; at lowering time the
/// last duplicate wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    pub name: String,
    pub params: Vec<String>,
}

/// A full function definition: one prototype plus one body expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub proto: Prototype,
    pub body: Expr,
}

impl Function {
    /// Wraps a bare top-level expression as a definition under the reserved
    /// anonymous name, with no parameters.
    pub fn anonymous(body: Expr) -> Function {
        Function {
            proto: Prototype {
                name: ANONYMOUS_FUNCTION_NAME.to_string(),
                params: vec![],
            },
            body,
        }
    }
}
