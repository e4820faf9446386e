pub mod code_fence;
pub mod list_item;
pub mod paragraph;

pub use code_fence::CodeFence;
pub use list_item::{ListItem, ListMarker};
pub use paragraph::Paragraph;
