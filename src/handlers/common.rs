use serde::Deserialize;
use time::{macros::format_description, Date, Duration};
use utoipa::IntoParams;

use crate::error::{AppError, AppResult};
use crate::models::ResponseFilter;

/// Filter value meaning "no filter"
pub const ALL_OPTION: &str = "Semua";

/// Days covered by the dashboard when no range is given
pub const DEFAULT_RANGE_DAYS: i64 = 30;

#[derive(Debug, Deserialize, IntoParams)]
pub struct PaginationParams {
    #[param(default = 20, minimum = 1, maximum = 100)]
    pub limit: Option<i64>,
    #[param(default = 0, minimum = 0)]
    pub offset: Option<i64>,
}

/// Date range and demographic filters shared by the dashboard views
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DashboardFilterParams {
    /// First day, `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// Last day (inclusive), `YYYY-MM-DD`
    pub end_date: Option<String>,
    /// `Semua` or empty means any
    pub jenis_kelamin: Option<String>,
    pub pekerjaan: Option<String>,
    pub jaminan: Option<String>,
}

impl DashboardFilterParams {
    /// Resolve into a filter; a missing range defaults to the last 30 days ending `today`
    pub fn resolve(&self, today: Date) -> AppResult<ResponseFilter> {
        let end_date = match self.end_date.as_deref() {
            Some(value) => parse_date("end_date", value)?,
            None => today,
        };
        let start_date = match self.start_date.as_deref() {
            Some(value) => parse_date("start_date", value)?,
            None => end_date
                .checked_sub(Duration::days(DEFAULT_RANGE_DAYS))
                .ok_or_else(|| AppError::Validation("end_date is out of range".to_string()))?,
        };
        if start_date > end_date {
            return Err(AppError::Validation(
                "start_date must not be after end_date".to_string(),
            ));
        }

        Ok(ResponseFilter {
            start_date: Some(start_date),
            end_date: Some(end_date),
            jenis_kelamin: option_filter(&self.jenis_kelamin),
            pekerjaan: option_filter(&self.pekerjaan),
            jaminan: option_filter(&self.jaminan),
        })
    }
}

fn parse_date(field: &str, value: &str) -> AppResult<Date> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|_| AppError::Validation(format!("{} must be YYYY-MM-DD", field)))
}

fn option_filter(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != ALL_OPTION)
        .map(str::to_string)
}
