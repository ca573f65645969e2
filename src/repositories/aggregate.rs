use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Statement, Value};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{HeatmapRow, ResponseFilter, SummaryRow};

/// Arguments shared by the backend aggregation functions
#[derive(Debug, Clone)]
pub struct StatsFilter {
    pub questionnaire_id: Uuid,
    pub filter: ResponseFilter,
}

impl StatsFilter {
    /// Whole questionnaire, no date range or demographic filter
    pub fn for_questionnaire(questionnaire_id: Uuid) -> Self {
        Self {
            questionnaire_id,
            filter: ResponseFilter::default(),
        }
    }

    /// Named arguments with their values; unset filters are left out so the
    /// function defaults apply.
    fn named_args(&self) -> Vec<(&'static str, Value)> {
        let f = &self.filter;
        let mut args = vec![("p_questionnaire_id", Value::from(self.questionnaire_id))];

        if let Some(start) = f.start_date {
            args.push(("start_date", Value::from(start)));
        }
        if let Some(end) = f.end_date {
            args.push(("end_date", Value::from(end)));
        }
        if let Some(jenis_kelamin) = &f.jenis_kelamin {
            args.push(("p_jenis_kelamin", Value::from(jenis_kelamin.clone())));
        }
        if let Some(pekerjaan) = &f.pekerjaan {
            args.push(("p_pekerjaan", Value::from(pekerjaan.clone())));
        }
        if let Some(jaminan) = &f.jaminan {
            args.push(("p_jaminan", Value::from(jaminan.clone())));
        }

        args
    }

    /// `fn_name(a => $1, b => $2, ..)` and the bound values
    fn call(&self, fn_name: &str) -> (String, Vec<Value>) {
        let (names, values): (Vec<_>, Vec<_>) = self.named_args().into_iter().unzip();
        let params = names
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{} => ${}", name, i + 1))
            .collect::<Vec<_>>()
            .join(", ");

        (format!("{}({})", fn_name, params), values)
    }
}

/// Calls into the aggregation functions that live in the database.
/// Their output is read back as JSON.
pub struct AggregateRepository;

impl AggregateRepository {
    /// `get_dashboard_stats`: totals plus demographic breakdowns, as an opaque mapping
    pub async fn dashboard_stats(
        db: &DatabaseConnection,
        filter: &StatsFilter,
    ) -> AppResult<serde_json::Value> {
        let (call, values) = filter.call("get_dashboard_stats");
        let sql = format!("SELECT to_jsonb({}) AS result", call);

        Self::query_json(db, sql, values).await
    }

    /// `get_heatmap_summary`: per-question counts for each scale code
    pub async fn heatmap_summary(
        db: &DatabaseConnection,
        filter: &StatsFilter,
    ) -> AppResult<Vec<HeatmapRow>> {
        let (call, values) = filter.call("get_heatmap_summary");
        let value = Self::query_json(db, set_returning(&call), values).await?;

        Ok(serde_json::from_value(value)?)
    }

    /// `get_questionnaire_summary`: answer tallies per question and answer label
    pub async fn questionnaire_summary(
        db: &DatabaseConnection,
        filter: &StatsFilter,
    ) -> AppResult<Vec<SummaryRow>> {
        let (call, values) = filter.call("get_questionnaire_summary");
        let value = Self::query_json(db, set_returning(&call), values).await?;

        Ok(serde_json::from_value(value)?)
    }

    async fn query_json(
        db: &DatabaseConnection,
        sql: String,
        values: Vec<Value>,
    ) -> AppResult<serde_json::Value> {
        tracing::debug!(sql = %sql, "Calling aggregate function");

        let row = db
            .query_one(Statement::from_sql_and_values(
                DbBackend::Postgres,
                sql,
                values,
            ))
            .await?
            .ok_or_else(|| AppError::Internal("Aggregate query returned no row".to_string()))?;

        let value: Option<serde_json::Value> = row.try_get("", "result")?;
        Ok(value.unwrap_or(serde_json::Value::Null))
    }
}

fn set_returning(call: &str) -> String {
    format!(
        "SELECT COALESCE(jsonb_agg(to_jsonb(t)), '[]'::jsonb) AS result FROM {} t",
        call
    )
}
