//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete. Codes in the `SCN01xx` block come from the lexer,
//! codes in the `SCN10xx` block from the parser.

/// Unterminated quoted string (a raw line break or end of input was reached
/// before the closing delimiter).
pub const LEX_UNTERMINATED_STRING: &str = "SCN0101";
/// A character that no token class recognizes, outside of a quoted string.
pub const LEX_UNEXPECTED_CHAR: &str = "SCN0102";

/// Expected `#` to start a command, found something else.
pub const PARSER_EXPECTED_COMMAND: &str = "SCN1001";
/// The word after `#` is not one of the fixed command keywords.
pub const PARSER_UNKNOWN_COMMAND: &str = "SCN1002";
/// A command received fewer or more comma-separated arguments than its shape allows.
pub const PARSER_BAD_ARITY: &str = "SCN1003";
/// An argument position was filled with the wrong kind of token.
pub const PARSER_BAD_ARGUMENT: &str = "SCN1004";
/// A nested sub-command (layer, navigation, chart, ...) did not start with one
/// of its reserved selector keywords.
pub const PARSER_BAD_VARIANT: &str = "SCN1005";
/// The input contained no commands at all.
pub const PARSER_EMPTY_INPUT: &str = "SCN1006";

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    Some(match id {
        LEX_UNTERMINATED_STRING => {
            "A quoted argument was opened but never closed on the same line. \
             Quoted text may not contain raw line breaks; close the string \
             with the same delimiter it was opened with."
        }
        LEX_UNEXPECTED_CHAR => {
            "The character is not part of the command syntax and free text \
             must be quoted. Bare arguments may only contain letters, digits, \
             '.', '-' and '_'."
        }
        PARSER_EXPECTED_COMMAND => {
            "Commands start with '#'. Content between commands that is not \
             whitespace is rejected."
        }
        PARSER_UNKNOWN_COMMAND => {
            "The command vocabulary is fixed and closed; the word after '#' \
             matched none of the known command keywords."
        }
        PARSER_BAD_ARITY => {
            "Each command takes a fixed number of comma-separated arguments \
             (some trailing arguments are optional). Too few or too many were \
             supplied."
        }
        PARSER_BAD_ARGUMENT => {
            "The argument at this position must be a specific kind of token \
             (number, bare word, quoted text or a reserved keyword)."
        }
        PARSER_BAD_VARIANT => {
            "This command dispatches on a reserved sub-keyword (for example \
             layer: bathymetry/altimetry/oceanography) and the given word \
             selected none of its variants."
        }
        PARSER_EMPTY_INPUT => "A scenario must contain at least one command.",
        _ => return None,
    })
}
