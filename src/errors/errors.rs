use thiserror::Error;

/// Every failure the front end can report. The display string is exactly
/// what the driver prints after `Error: `, so the texts stay stable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Syntax errors, raised by the parser.
    #[error("Unknown token when expecting an expression")]
    ExpectedExpression,
    #[error("expected ')'")]
    ExpectedCloseParen,
    #[error("Expected ')' or ',' in argument list")]
    ExpectedArgumentDelimiter,
    #[error("expected then")]
    ExpectedThen,
    #[error("expected else")]
    ExpectedElse,
    #[error("expected identifier after for")]
    ExpectedForVariable,
    #[error("expected '=' after for")]
    ExpectedForAssignment,
    #[error("expected ',' after for start value")]
    ExpectedForDelimiter,
    #[error("expected 'in' after for")]
    ExpectedForIn,
    #[error("Expected function name in prototype")]
    ExpectedPrototypeName,
    #[error("Expected '(' in prototype")]
    ExpectedPrototypeOpenParen,
    #[error("Expected ')' in prototype")]
    ExpectedPrototypeCloseParen,

    // Lowering errors, raised while generating code for a body.
    #[error("Unknown variable name {name:?}")]
    UnknownVariable { name: String },
    #[error("invalid binary operator {operator:?}")]
    InvalidBinaryOperator { operator: char },
    #[error("Unknown function referenced: {callee:?}")]
    UnknownFunction { callee: String },
    #[error("Incorrect # arguments passed: expected {expected}, received {received}")]
    IncorrectArgumentCount { expected: usize, received: usize },
    #[error("Function cannot be redefined: {name:?}")]
    FunctionRedefined { name: String },

    // Engine errors, raised when loading units or running code.
    #[error("duplicate definition of {name:?} in a loaded unit")]
    DuplicateDefinition { name: String },
    #[error("symbol {name:?} is not loaded")]
    SymbolNotFound { name: String },
    #[error("evaluation stack underflow")]
    StackUnderflow,
    #[error("call depth limit exceeded")]
    CallDepthExceeded,
}
