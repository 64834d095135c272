use serde::Serialize;

/// Serialize any front-end value (parse tree, command list, normalized
/// scenario) to a pretty-printed JSON string.
pub fn to_pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).expect("front-end value serialization cannot fail")
}
