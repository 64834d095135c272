//! Scenario language front end for the 4D geographic player.
//!
//! Turns a line-oriented `#command,arg,...` scenario script into typed
//! command records, in four stages: tokenize, parse into a tree,
//! extract records, then optionally validate and normalize.
//!
//! ```
//! let commands = scenario4d_core::parse_scenario("#bbox,48,-5,49,2").unwrap();
//! assert_eq!(commands.len(), 1);
//! ```

#![warn(missing_docs)]

/// Typed command records extracted from the parse tree.
pub mod command;
/// Parse-tree to command-record conversion.
pub mod extract;
/// Scenario grammar: lexer, parser, parse tree, and related utilities.
pub mod grammar;
/// Normalization into the stable external schema.
pub mod normalize;
/// Semantic validation of command records.
pub mod validate;

// ── Convenience re-exports ──────────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Records
pub use command::{
    ChartLayer, ChartType, Command, CurrentsDetail, LayerKind, NavKind, OceanLayer, Scalar,
    SimFormat,
};

// Diagnostics (re-exported from the diagnostics crate)
pub use grammar::diag::{Diagnostic, LineIndex, Severity, Span, codes};

// Normalizer
pub use normalize::{NormalizedCommand, NormalizedScenario, to_normalized};

// Validator
pub use validate::{Finding, ValidationReport};

// Serialization helpers
pub use grammar::dump::to_pretty_json;

use grammar::parser::{ParseOutcome, parse_command_line};
use grammar::tree::ParseNode;

/// Parse failure: the input had lexical or syntax errors.
///
/// Carries both the structured diagnostics and their rendered
/// `L{line}:{col} (stage) – message` forms, ready for display.
#[derive(Debug, Clone, thiserror::Error)]
#[error("scenario parse failed with {} error(s)", diagnostics.len())]
pub struct ParseFailure {
    /// Structured diagnostics in source order.
    pub diagnostics: Vec<Diagnostic>,
    /// One rendered message per diagnostic, with line/column positions.
    pub messages: Vec<String>,
}

impl ParseFailure {
    fn new(input: &str, diagnostics: Vec<Diagnostic>) -> Self {
        let index = LineIndex::new(input);
        let messages = diagnostics.iter().map(|d| d.located(&index)).collect();
        ParseFailure {
            diagnostics,
            messages,
        }
    }
}

/// Parse a scenario script into command records.
///
/// Any lexical or syntax error fails the whole input; all syntax errors
/// found before resynchronization gave up are reported together.
pub fn parse_scenario(input: &str) -> Result<Vec<Command>, ParseFailure> {
    let ParseOutcome { tree, diagnostics } = parse_command_line(input);
    if diagnostics.is_empty() {
        Ok(extract::extract(&tree))
    } else {
        Err(ParseFailure::new(input, diagnostics))
    }
}

/// Parse and validate in one step.
///
/// A parse failure yields an invalid report whose `errors` are the rendered
/// parse messages; otherwise the records are checked semantically and
/// returned alongside the findings.
pub fn validate_scenario(input: &str) -> ValidationReport {
    match parse_scenario(input) {
        Ok(commands) => {
            let findings = validate::check(&commands);
            ValidationReport::from_findings(commands, findings)
        }
        Err(failure) => ValidationReport {
            valid: false,
            errors: failure.messages,
            warnings: Vec::new(),
            commands: Vec::new(),
        },
    }
}

/// Parse a scenario script and return the raw parse tree, for grammar
/// debugging and tooling.
///
/// Unlike [`parse_scenario`] this tolerates syntax errors (the tree is then
/// partial, commands that failed contribute no node); only a lexical error
/// fails it outright.
pub fn raw_tree(input: &str) -> Result<ParseNode<'_>, ParseFailure> {
    let ParseOutcome { tree, diagnostics } = parse_command_line(input);
    match diagnostics.iter().find(|d| d.is_lexical()) {
        Some(_) => Err(ParseFailure::new(input, diagnostics)),
        None => Ok(tree),
    }
}
