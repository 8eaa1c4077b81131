//! Model-access handles for the tool handlers.
//!
//! The host framework resolves a provider by name from the registry; each
//! provider turns an ordered list of chat messages into a text completion.

pub mod provider;
pub mod registry;

pub use provider::{ChatMessage, LlmProvider, OpenAiProvider, Role};
pub use registry::ProviderRegistry;
