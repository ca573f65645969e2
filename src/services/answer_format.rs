use serde_json::Value;

use crate::models::SCALE_LABELS;

/// Human-readable form of a stored answer value.
///
/// Choice objects render as `Ya` or `Ya (Ket: ...)`, scale codes map to
/// their label, anything else is returned untouched.
pub fn format_answer_value(value: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(value) {
        let choice = map.get("choice").and_then(Value::as_str).unwrap_or_default();
        if choice.is_empty() {
            return value.to_string();
        }

        return match map.get("keterangan").and_then(Value::as_str) {
            Some(note) if !note.is_empty() => format!("{} (Ket: {})", choice, note),
            _ => choice.to_string(),
        };
    }

    value
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|code| code.checked_sub(1))
        .and_then(|index| SCALE_LABELS.get(index))
        .map(|label| label.to_string())
        .unwrap_or_else(|| value.to_string())
}
