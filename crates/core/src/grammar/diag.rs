pub use scenario4d_diagnostics::{Diagnostic, LineIndex, Severity, Span, codes, explain};
