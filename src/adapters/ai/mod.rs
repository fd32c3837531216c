//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Configurable mock for testing
//! - `OpenAIProvider` - Any chat-completions server (OpenAI, Ollama `/v1`)

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, DEFAULT_MOCK_REPLY};
pub use openai_provider::{OpenAIConfig, OpenAIProvider, OLLAMA_BASE_URL, OPENAI_BASE_URL};
