pub mod router;

pub use router::{InputAction, InputRouter};
