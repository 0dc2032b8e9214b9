pub mod history;
pub mod message;
pub mod normalize;

pub use history::MessageLog;
pub use message::{ChatMessage, MessageKind, QuickButton};
pub use normalize::normalize;
