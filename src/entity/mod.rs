pub mod answer;
pub mod question;
pub mod questionnaire;
pub mod response;
pub mod user;

pub mod prelude;

pub use prelude::*;
