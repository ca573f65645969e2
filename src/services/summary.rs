use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{count_from_json, HeatmapRow, Question, QuestionType, SummaryRow};

/// Highest value on the scale, used as the radar chart's full mark
pub const FULL_MARK: u8 = 5;

/// Demographic breakdowns read from `get_dashboard_stats`: (chart title, stats key)
const DEMOGRAPHIC_KEYS: [(&str, &str); 4] = [
    ("Jenis Kelamin", "jenis_kelamin"),
    ("Rentang Usia", "rentang_usia"),
    ("Pekerjaan", "pekerjaan"),
    ("Jaminan", "jaminan"),
];

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RadarPoint {
    pub question_id: Uuid,
    pub subject: String,
    #[schema(value_type = f64)]
    #[serde(with = "rust_decimal::serde::float")]
    pub score: Decimal,
    pub full_mark: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChartPoint {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Chart {
    pub title: String,
    pub data: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QuestionChart {
    pub question_id: Uuid,
    pub question_text: String,
    pub question_type: QuestionType,
    pub data: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LabelGroup {
    pub label: String,
    pub charts: Vec<QuestionChart>,
}

/// Average score per scale question, rounded to two decimals.
/// Rows for yes/no or unknown questions are dropped.
pub fn radar_scores(heatmap: &[HeatmapRow], questions: &[Question]) -> Vec<RadarPoint> {
    heatmap
        .iter()
        .filter(|row| {
            questions
                .iter()
                .find(|q| q.id == row.question_id)
                .is_some_and(|q| q.question_type == QuestionType::Scale)
        })
        .map(|row| {
            let counts = row.counts();
            let votes: i64 = counts.iter().sum();
            let total: i64 = counts
                .iter()
                .zip(1i64..)
                .map(|(count, score)| count * score)
                .sum();

            let score = if votes > 0 {
                (Decimal::from(total) / Decimal::from(votes))
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            } else {
                Decimal::ZERO
            };

            RadarPoint {
                question_id: row.question_id,
                subject: row.pertanyaan.clone(),
                score,
                full_mark: FULL_MARK,
            }
        })
        .collect()
}

/// Group questions by label (first-appearance order) with each question's answer tallies
pub fn group_question_charts(summary: &[SummaryRow], questions: &[Question]) -> Vec<LabelGroup> {
    let mut groups: Vec<LabelGroup> = Vec::new();

    for question in questions {
        let data = summary
            .iter()
            .filter(|row| row.question_id == question.id)
            .map(|row| ChartPoint {
                name: row.label_jawaban.clone(),
                value: row.jumlah_jawaban,
            })
            .collect();
        let chart = QuestionChart {
            question_id: question.id,
            question_text: question.text.clone(),
            question_type: question.question_type,
            data,
        };

        match groups.iter_mut().find(|g| g.label == question.label) {
            Some(group) => group.charts.push(chart),
            None => groups.push(LabelGroup {
                label: question.label.clone(),
                charts: vec![chart],
            }),
        }
    }

    groups
}

/// The four demographic bar charts from the opaque stats mapping.
/// Missing breakdowns give empty series; a count that is not an integer
/// is logged and shown as 0.
pub fn demographic_charts(stats: &Value) -> Vec<Chart> {
    DEMOGRAPHIC_KEYS
        .iter()
        .map(|(title, key)| Chart {
            title: title.to_string(),
            data: stats
                .get(key)
                .and_then(Value::as_object)
                .map(|counts| {
                    counts
                        .iter()
                        .map(|(name, value)| ChartPoint {
                            name: name.clone(),
                            value: count_from_json(value).unwrap_or_else(|| {
                                tracing::warn!(
                                    chart = *key,
                                    %name,
                                    %value,
                                    "Non-integer demographic count"
                                );
                                0
                            }),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect()
}
