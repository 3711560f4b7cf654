pub mod errors;
pub mod evaluator;
pub mod room;
pub mod vocabulary;

// Re-export main components
pub use errors::*;
pub use evaluator::*;
pub use room::*;
pub use vocabulary::*;
