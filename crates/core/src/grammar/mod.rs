/// Re-exports from the diagnostics crate.
pub mod diag;
/// JSON serialization helpers for parse trees and scenarios.
pub mod dump;
/// The fixed keyword vocabulary.
pub mod keyword;
/// Scenario lexer — tokenizes raw input into a stream of borrowed tokens.
pub mod lexer;
/// Scenario parser — converts tokens into a parse tree.
pub mod parser;
/// Parse-tree node types.
pub mod tree;
