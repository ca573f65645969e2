use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub const JENIS_KELAMIN_OPTIONS: [&str; 2] = ["Laki-laki", "Perempuan"];
pub const JAMINAN_OPTIONS: [&str; 3] = ["BPJS", "Asuransi Lain", "Umum"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub id: Uuid,
    pub questionnaire_id: Uuid,
    pub created_at: OffsetDateTime,
    pub nama: String,
    pub usia: i32,
    pub jenis_kelamin: String,
    pub pekerjaan: String,
    pub jaminan: String,
    pub saran: Option<String>,
}

/// Respondent information collected before the question pages
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RespondentInfo {
    #[serde(default)]
    pub nama: String,
    pub usia: Option<i32>,
    #[serde(default)]
    pub jenis_kelamin: String,
    #[serde(default)]
    pub pekerjaan: String,
    #[serde(default)]
    pub jaminan: String,
}

impl RespondentInfo {
    pub fn validate(&self) -> AppResult<()> {
        let usia = match self.usia {
            Some(usia)
                if !self.nama.trim().is_empty()
                    && !self.jenis_kelamin.is_empty()
                    && !self.pekerjaan.trim().is_empty()
                    && !self.jaminan.is_empty() =>
            {
                usia
            }
            _ => {
                return Err(AppError::Validation(
                    "Harap lengkapi semua informasi responden.".to_string(),
                ))
            }
        };

        if !(1..=120).contains(&usia) {
            return Err(AppError::Validation("Usia harus antara 1 dan 120".to_string()));
        }
        if !JENIS_KELAMIN_OPTIONS.contains(&self.jenis_kelamin.as_str()) {
            return Err(AppError::Validation(format!(
                "Jenis kelamin tidak dikenal: {}",
                self.jenis_kelamin
            )));
        }
        if !JAMINAN_OPTIONS.contains(&self.jaminan.as_str()) {
            return Err(AppError::Validation(format!(
                "Jaminan tidak dikenal: {}",
                self.jaminan
            )));
        }

        Ok(())
    }

    /// Validated respondent plus the optional suggestion, ready to store.
    /// A blank suggestion is stored as none.
    pub fn into_create(self, saran: Option<String>) -> AppResult<CreateResponse> {
        self.validate()?;
        let usia = self.usia.ok_or_else(|| {
            AppError::Validation("Harap lengkapi semua informasi responden.".to_string())
        })?;

        Ok(CreateResponse {
            nama: self.nama.trim().to_string(),
            usia,
            jenis_kelamin: self.jenis_kelamin,
            pekerjaan: self.pekerjaan.trim().to_string(),
            jaminan: self.jaminan,
            saran: saran
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
    }
}

#[derive(Debug)]
pub struct CreateResponse {
    pub nama: String,
    pub usia: i32,
    pub jenis_kelamin: String,
    pub pekerjaan: String,
    pub jaminan: String,
    pub saran: Option<String>,
}

/// Filters shared by the dashboard views. `None` means "Semua".
#[derive(Debug, Clone, Default)]
pub struct ResponseFilter {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub jenis_kelamin: Option<String>,
    pub pekerjaan: Option<String>,
    pub jaminan: Option<String>,
}
