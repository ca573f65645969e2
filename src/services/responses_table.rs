use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Response;

/// Sortable columns of the raw-data table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Nama,
    Usia,
    JenisKelamin,
    Pekerjaan,
    Jaminan,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Sort state after clicking a column header: the active ascending column
/// flips to descending, anything else starts ascending.
pub fn next_sort(
    current: Option<(SortKey, SortDirection)>,
    clicked: SortKey,
) -> (SortKey, SortDirection) {
    match current {
        Some((key, SortDirection::Asc)) if key == clicked => (clicked, SortDirection::Asc.toggle()),
        _ => (clicked, SortDirection::Asc),
    }
}

/// Search and sort applied to an in-memory list of responses
#[derive(Debug, Clone, Default)]
pub struct ResponseQuery {
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub direction: SortDirection,
}

impl ResponseQuery {
    /// Filter by case-insensitive substring, then stable-sort on the chosen column
    pub fn apply(&self, responses: Vec<Response>) -> Vec<Response> {
        let mut data: Vec<Response> = match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let needle = term.to_lowercase();
                responses
                    .into_iter()
                    .filter(|r| matches_search(r, &needle))
                    .collect()
            }
            _ => responses,
        };

        if let Some(key) = self.sort {
            data.sort_by(|a, b| {
                let ordering = compare(a, b, key);
                match self.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        data
    }
}

fn matches_search(response: &Response, needle: &str) -> bool {
    [
        &response.nama,
        &response.pekerjaan,
        &response.jaminan,
        &response.jenis_kelamin,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

fn compare(a: &Response, b: &Response, key: SortKey) -> Ordering {
    match key {
        SortKey::Nama => a.nama.cmp(&b.nama),
        SortKey::Usia => a.usia.cmp(&b.usia),
        SortKey::JenisKelamin => a.jenis_kelamin.cmp(&b.jenis_kelamin),
        SortKey::Pekerjaan => a.pekerjaan.cmp(&b.pekerjaan),
        SortKey::Jaminan => a.jaminan.cmp(&b.jaminan),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}
