/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Core node definitions (expressions, prototypes, definitions)
pub mod ast;
