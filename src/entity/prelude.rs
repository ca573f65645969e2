pub use super::answer::Entity as Answer;
pub use super::question::Entity as Question;
pub use super::questionnaire::Entity as Questionnaire;
pub use super::response::Entity as Response;
pub use super::user::Entity as User;
