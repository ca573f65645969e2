pub mod answer_format;
pub mod auth;
pub mod csv_export;
pub mod form;
pub mod responses_table;
pub mod summary;

pub use answer_format::format_answer_value;
pub use auth::{AuthService, Claims, SESSION_COOKIE};
pub use csv_export::{export_filename, to_csv, CsvRecord};
pub use form::{build_pages, FormPage, FormWizard, Step};
pub use responses_table::{next_sort, ResponseQuery, SortDirection, SortKey};
pub use summary::{
    demographic_charts, group_question_charts, radar_scores, Chart, ChartPoint, LabelGroup,
    QuestionChart, RadarPoint,
};
