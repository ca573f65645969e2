use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

/// Row of `get_heatmap_summary`: vote counts per scale code for one question
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HeatmapRow {
    pub question_id: Uuid,
    pub pertanyaan: String,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub sangat_tidak_puas: i64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub tidak_puas: i64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub cukup_puas: i64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub puas: i64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub sangat_puas: i64,
}

impl HeatmapRow {
    /// Counts in scale order 1..=5
    pub fn counts(&self) -> [i64; 5] {
        [
            self.sangat_tidak_puas,
            self.tidak_puas,
            self.cukup_puas,
            self.puas,
            self.sangat_puas,
        ]
    }
}

/// Row of `get_questionnaire_summary`: answer tally for one question and answer label
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SummaryRow {
    pub question_id: Uuid,
    pub pertanyaan: String,
    pub label_jawaban: String,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub jumlah_jawaban: i64,
}

/// Count from an aggregate JSON value. SQL sums arrive as integers or as
/// integral numerics; anything else is not a count.
pub fn count_from_json(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.fract() == 0.0 && n.abs() < i64::MAX as f64)
            .map(|n| n as i64)
    })
}

/// A NULL sum over no answers counts as zero
fn count_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(0),
        Some(value) => count_from_json(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("expected a count, got {}", value))),
    }
}
