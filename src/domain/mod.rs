mod chat_mode;
mod chat_session;
mod chunk;
mod document;
mod embedding;
mod fingerprint;
mod ids;
mod message;
mod message_role;

pub use chat_mode::ChatMode;
pub use chat_session::ChatSession;
pub use chunk::Chunk;
pub use document::{ContentType, Document};
pub use embedding::Embedding;
pub use fingerprint::DocumentFingerprint;
pub use ids::{ChunkId, DocumentId, MessageId};
pub use message::Message;
pub use message_role::MessageRole;
