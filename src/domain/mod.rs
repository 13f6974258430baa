//! Domain layer: values, the arena tree, traversal and heap conversion
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod heap;
pub mod traversal;
pub mod value;

pub use arena::{NodeId, NodeRef, Tree, DEFAULT_MAX_DEGREE};
pub use error::{TreeError, TreeResult};
pub use heap::HeapOrder;
pub use traversal::{Order, Traversal};
pub use value::{key_of, Value};
