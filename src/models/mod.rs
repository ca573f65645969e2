pub mod aggregate;
pub mod answer;
pub mod question;
pub mod questionnaire;
pub mod response;
pub mod user;

pub use aggregate::*;
pub use answer::*;
pub use question::*;
pub use questionnaire::*;
pub use response::*;
pub use user::*;
