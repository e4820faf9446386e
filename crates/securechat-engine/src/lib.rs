pub mod command;
pub mod completion;
pub mod outline;
pub mod parsing;
pub mod prompt;

// Re-export key types for easier usage
pub use command::{AskError, AskOutcome, PreparedPrompt, ask, prepare};
pub use completion::{CompletionError, CompletionService, WebhookClient};
pub use outline::{
    BlockId, BlockStore, ChildRef, ExternalNode, MemoryOutline, OutlineContext, OutlineSink,
    Placement, StoreError,
};
pub use parsing::{blocks::ContentBlock, parse_markdown};
