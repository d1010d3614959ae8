pub mod error;
pub mod constants;
pub mod llm;
pub mod context;
pub mod config;
pub mod session;

// Re-export key types
pub use error::{Result, ScoutError};
pub use llm::{GeminiClient, LlmClient, LlmResponse, Role, Turn, Usage};
pub use context::{shape_request, Persona, ShapedRequest, Transcript};
pub use config::Settings;
pub use session::ChatSession;
