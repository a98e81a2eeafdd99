pub mod dto;
pub mod filter;
pub mod owner;
pub mod paged;
pub mod property;

pub use dto::*;
pub use filter::*;
pub use owner::*;
pub use paged::*;
pub use property::*;

/// Caller-visible sequential identity, shared by all collections.
pub type Id = i32;

/// Identity extraction for entities stored in an id-keyed collection.
pub trait Entity: Clone + Send + Sync {
    fn id(&self) -> Id;
}
