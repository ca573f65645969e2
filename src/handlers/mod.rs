pub mod auth;
pub mod common;
pub mod dashboard;
pub mod questionnaire;
pub mod raw_data;

pub use auth::{login, logout, me, register, AuthResponse, LoginRequest, LogoutResponse, RegisterRequest};
pub use common::{DashboardFilterParams, PaginationParams};
pub use dashboard::{
    get_admin_questionnaire, get_demographics, get_details, get_overview,
    list_admin_questionnaires, list_suggestions, AppliedFilter, DemographicsResponse,
    DetailsResponse, OverviewResponse, QuestionnaireListResponse, SuggestionListResponse,
    SuggestionResponse,
};
pub use questionnaire::{
    get_form, list_questionnaires, navigate, submit_response, Direction, FormResponse,
    NavigateRequest, PageResponse, QuestionResponse, QuestionnaireResponse, SubmitRequest,
    SubmitResponse,
};
pub use raw_data::{
    export_raw_data, list_raw_data, FormattedAnswer, RawDataResponse, RawDataRow,
};
