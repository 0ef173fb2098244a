//! Tree-sitter query strings used by the lint rules and dialect checks.

/// Tree-sitter query that returns `debugger` statements.
/// * `statement`: the statement
pub const DEBUGGER_QUERY: &str = include_str!("debugger.scm");

/// Tree-sitter query that returns `var` declarations.
/// * `declaration`: the whole declaration
pub const VAR_DECLARATION_QUERY: &str = include_str!("var_declaration.scm");

/// Tree-sitter query that returns `console.<method>(...)` calls.
/// * `call`: the call expression
/// * `object`: always `console`
/// * `method`: the console method being called
pub const CONSOLE_CALL_QUERY: &str = include_str!("console_call.scm");

/// Tree-sitter query that returns assignments used directly (single
/// parentheses) as the condition of `if`, `while`, `do ... while` and `?:`,
/// or unparenthesized as a `for` condition.
/// * `assignment`: the assignment expression
pub const COND_ASSIGN_QUERY: &str = include_str!("cond_assign.scm");

/// Tree-sitter query that returns assignments whose left and right hand sides
/// are textually identical.
/// * `assignment`: the assignment expression
/// * `left`: the assigned target
/// * `right`: the assigned value
pub const SELF_ASSIGN_QUERY: &str = include_str!("self_assign.scm");

/// Tree-sitter query that returns JSX elements.
/// * `jsx`: the element
pub const JSX_QUERY: &str = include_str!("jsx.scm");

/// Tree-sitter query that returns module syntax (`import`/`export`).
/// * `statement`: the statement
pub const MODULE_SYNTAX_QUERY: &str = include_str!("module_syntax.scm");
