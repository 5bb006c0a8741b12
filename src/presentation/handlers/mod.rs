mod chat;
mod documents;
mod error;
mod health;
mod index;
mod session;

pub use chat::chat_handler;
pub use documents::upload_document_handler;
pub use error::{ErrorResponse, error_response};
pub use health::health_handler;
pub use index::index_handler;
pub use session::{clear_messages_handler, get_session_handler, switch_mode_handler};
