mod documents;
mod health;
mod qa;

pub use documents::{fetch_documents, upload_documents};
pub use health::health_check;
pub use qa::ask_question;
