pub mod aggregate;
pub mod answer;
pub mod question;
pub mod questionnaire;
pub mod response;
pub mod user;

pub use aggregate::{AggregateRepository, StatsFilter};
pub use answer::AnswerRepository;
pub use question::QuestionRepository;
pub use questionnaire::QuestionnaireRepository;
pub use response::ResponseRepository;
pub use user::UserRepository;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::error::AppResult;

/// Base repository trait for common read operations
#[async_trait]
pub trait Repository<T>
where
    T: Send + Sync,
{
    /// Find entity by ID
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<T>;

    /// List entities with pagination
    async fn list(db: &DatabaseConnection, limit: u64, offset: u64) -> AppResult<Vec<T>>;

    /// Count total entities
    async fn count(db: &DatabaseConnection) -> AppResult<u64>;
}
