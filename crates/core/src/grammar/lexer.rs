use super::keyword::Keyword;
use scenario4d_diagnostics::{Diagnostic, Span, codes};
use serde::Serialize;

/// Classification of a scenario lexer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokKind {
    /// Command marker (`#`).
    Hash,
    /// Argument delimiter (`,`).
    Comma,
    /// Signed integer literal.
    Int,
    /// Signed decimal literal.
    Float,
    /// Quoted free text (`"..."` or `'...'`), delimiters included in `text`.
    Quoted,
    /// A bareword that matched none of the fixed keywords.
    Word,
    /// One of the fixed, case-insensitive keywords.
    Keyword(Keyword),
}

/// A token that borrows its text directly from the source input.
///
/// `text` is always exactly `&input[start..end]`; the byte offsets are kept
/// alongside for span reporting and slicing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token<'a> {
    /// The classification of this token.
    pub kind: TokKind,
    /// Borrowed slice of the source input for this token.
    pub text: &'a str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Token<'_> {
    /// The source span this token covers.
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// For [`TokKind::Quoted`] tokens, the interior text without the
    /// delimiters. Other tokens return `text` unchanged.
    pub fn unquoted(&self) -> &str {
        if self.kind == TokKind::Quoted && self.text.len() >= 2 {
            &self.text[1..self.text.len() - 1]
        } else {
            self.text
        }
    }
}

/// `true` for bytes that may appear in a bareword: ASCII letters, digits,
/// `.`, `-`, `_`. UTF-8 continuation bytes (0x80–0xBF) never match, so free
/// Unicode text is confined to quoted strings.
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'.' || b == b'-' || b == b'_'
}

/// Classify a complete bareword run: numeric literal, fixed keyword, or
/// generic word, in that order. Numbers take an optional leading `-` and at
/// most one `.` with digits on both sides; anything else (e.g. `track-01.gpx`)
/// falls through to keyword lookup and then `Word`.
fn classify_bareword(text: &str) -> TokKind {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if !digits.is_empty() {
        match digits.split_once('.') {
            None if digits.bytes().all(|b| b.is_ascii_digit()) => return TokKind::Int,
            Some((int, frac))
                if !int.is_empty()
                    && !frac.is_empty()
                    && int.bytes().all(|b| b.is_ascii_digit())
                    && frac.bytes().all(|b| b.is_ascii_digit()) =>
            {
                return TokKind::Float;
            }
            _ => {}
        }
    }
    match Keyword::from_bareword(text) {
        Some(kw) => TokKind::Keyword(kw),
        None => TokKind::Word,
    }
}

/// Tokenize scenario input into a sequence of borrowed tokens.
///
/// Whitespace (including newlines) between tokens is discarded; inside quoted
/// strings it is part of the string. Fails on the first unterminated quoted
/// string or unrecognized character — a lexical error is fatal to the whole
/// parse call.
///
/// All structural tests below compare single ASCII bytes. UTF-8 continuation
/// bytes are in 0x80–0xBF and never match them, so multi-byte characters pass
/// through quoted-string scanning untouched and are rejected outside strings.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, Diagnostic> {
    let b = input.as_bytes();
    let mut toks = Vec::new();
    let mut i = 0usize;
    while i < b.len() {
        let start = i;
        match b[i] {
            b'#' => {
                i += 1;
                toks.push(Token {
                    kind: TokKind::Hash,
                    text: &input[start..i],
                    start,
                    end: i,
                });
            }
            b',' => {
                i += 1;
                toks.push(Token {
                    kind: TokKind::Comma,
                    text: &input[start..i],
                    start,
                    end: i,
                });
            }
            quote @ (b'"' | b'\'') => {
                // Greedy within a single line: everything up to the matching
                // delimiter belongs to the string. A raw line break before the
                // terminator is an error, so a runaway quote cannot swallow
                // the following command lines.
                i += 1;
                loop {
                    if i >= b.len() || b[i] == b'\n' || b[i] == b'\r' {
                        return Err(Diagnostic::error(
                            codes::LEX_UNTERMINATED_STRING,
                            format!(
                                "unterminated string: missing closing {} before end of line",
                                char::from(quote)
                            ),
                            Span::new(start, i),
                        ));
                    }
                    if b[i] == quote {
                        i += 1;
                        break;
                    }
                    i += 1;
                }
                toks.push(Token {
                    kind: TokKind::Quoted,
                    text: &input[start..i],
                    start,
                    end: i,
                });
            }
            c if c.is_ascii_whitespace() => {
                i += 1;
                while i < b.len() && b[i].is_ascii_whitespace() {
                    i += 1;
                }
            }
            c if is_word_byte(c) => {
                i += 1;
                while i < b.len() && is_word_byte(b[i]) {
                    i += 1;
                }
                let text = &input[start..i];
                toks.push(Token {
                    kind: classify_bareword(text),
                    text,
                    start,
                    end: i,
                });
            }
            _ => {
                let ch = input[start..].chars().next().unwrap_or('\u{fffd}');
                return Err(Diagnostic::error(
                    codes::LEX_UNEXPECTED_CHAR,
                    format!("unexpected character '{ch}' (free text must be quoted)"),
                    Span::new(start, start + ch.len_utf8()),
                ));
            }
        }
    }
    Ok(toks)
}
