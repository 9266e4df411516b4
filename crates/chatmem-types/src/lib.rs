mod message;
mod role;

pub use message::{Message, Metadata};
pub use role::Role;
