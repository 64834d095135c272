//! Semantic validation of extracted command records.
//!
//! Pure post-pass over the record list: syntax is already settled, only
//! cross-field numeric invariants are checked here. Findings are partitioned
//! into blocking errors and advisory warnings; message text keeps the French
//! wording the scenario tooling has always printed.

use crate::command::Command;
use scenario4d_diagnostics::Severity;
use serde::Serialize;

/// One semantic finding, referencing a record by its position in the
/// extracted sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    /// Error findings block the scenario; warnings are advisory only.
    pub severity: Severity,
    /// Zero-based index of the offending record.
    pub command_index: usize,
    /// Human-readable message.
    pub message: String,
}

/// Outcome of validating one scenario input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// `true` when no blocking error was found (warnings are allowed).
    pub valid: bool,
    /// Messages of all error findings, in record order.
    pub errors: Vec<String>,
    /// Messages of all warning findings, in record order.
    pub warnings: Vec<String>,
    /// The extracted records; empty when the parse itself failed.
    pub commands: Vec<Command>,
}

impl ValidationReport {
    /// Assemble a report from records and their findings.
    pub fn from_findings(commands: Vec<Command>, findings: Vec<Finding>) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        for f in findings {
            match f.severity {
                Severity::Error => errors.push(f.message),
                Severity::Warning => warnings.push(f.message),
            }
        }
        ValidationReport {
            valid: errors.is_empty(),
            errors,
            warnings,
            commands,
        }
    }
}

/// Check the cross-field numeric invariants of a record sequence.
///
/// Only `bbox` and `move` carry constraints today; the absence of a rule for
/// the other kinds is deliberate, not an error.
pub fn check(commands: &[Command]) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (i, cmd) in commands.iter().enumerate() {
        let loc = format!("Commande {} [{}]", i + 1, cmd.tag());
        match cmd {
            Command::Bbox {
                south,
                west,
                north,
                east,
            } => {
                if south.0 >= north.0 {
                    findings.push(error(i, format!("{loc}: sud({south}) ≥ nord({north})")));
                }
                if west.0 >= east.0 {
                    findings.push(error(i, format!("{loc}: ouest({west}) ≥ est({east})")));
                }
                if south.0 < -90.0 || north.0 > 90.0 {
                    findings.push(error(i, format!("{loc}: latitude hors [-90, 90]")));
                }
                if west.0 < -180.0 || east.0 > 180.0 {
                    findings.push(error(i, format!("{loc}: longitude hors [-180, 180]")));
                }
            }
            Command::Move {
                longitude,
                latitude,
                height,
                ..
            } => {
                if latitude.0 < -90.0 || latitude.0 > 90.0 {
                    findings.push(error(i, format!("{loc}: latitude hors plage")));
                }
                if longitude.0 < -180.0 || longitude.0 > 180.0 {
                    findings.push(error(i, format!("{loc}: longitude hors plage")));
                }
                if height.0 < 0.0 {
                    findings.push(Finding {
                        severity: Severity::Warning,
                        command_index: i,
                        message: format!("{loc}: hauteur négative ({height} m)"),
                    });
                }
            }
            _ => {}
        }
    }
    findings
}

fn error(index: usize, message: String) -> Finding {
    Finding {
        severity: Severity::Error,
        command_index: index,
        message,
    }
}
