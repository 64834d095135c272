//! Shared test helpers for `scenario4d_core` integration tests.

#![allow(unreachable_pub)]

use scenario4d_core::{Command, ParseFailure};

/// Parse an input that must succeed, panicking with the rendered messages
/// when it does not.
#[allow(dead_code)]
pub fn parse_ok(input: &str) -> Vec<Command> {
    scenario4d_core::parse_scenario(input)
        .unwrap_or_else(|e| panic!("parse of {input:?} failed: {:?}", e.messages))
}

/// Parse an input that must fail, panicking when it parses cleanly.
#[allow(dead_code)]
pub fn parse_err(input: &str) -> ParseFailure {
    match scenario4d_core::parse_scenario(input) {
        Ok(cmds) => panic!("parse of {input:?} unexpectedly succeeded: {cmds:?}"),
        Err(e) => e,
    }
}

/// Discriminant tags of a record sequence, in order.
#[allow(dead_code)]
pub fn tags(commands: &[Command]) -> Vec<&'static str> {
    commands.iter().map(Command::tag).collect()
}

/// Serialize any value to a `serde_json::Value` for shape assertions.
#[allow(dead_code)]
pub fn json<T: serde::Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).expect("test value serializes")
}
