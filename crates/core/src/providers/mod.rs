pub mod chain;
pub mod registry;
pub mod traits;

// API provider implementations
pub mod http;
