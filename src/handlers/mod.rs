// Handler modules
pub mod corpus;
pub mod extract;
pub mod flavors;
pub mod generate;
pub mod resolve;

// Re-export all handler functions
pub use corpus::load_corpus;
pub use extract::handle_extract;
pub use flavors::handle_flavors;
pub use generate::{handle_generate, GenerateOptions};
pub use resolve::handle_resolve;
