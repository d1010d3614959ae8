use crate::constants::persona;
use crate::error::{Result, ScoutError};
use crate::llm::Turn;

/// Fixed instructions plus the acknowledgement the model is shown to have given.
/// Together they form the two turns that open every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    instructions: String,
    acknowledgement: String,
}

impl Persona {
    /// Both strings must contain something other than whitespace.
    pub fn new(instructions: impl Into<String>, acknowledgement: impl Into<String>) -> Result<Self> {
        let instructions = instructions.into();
        let acknowledgement = acknowledgement.into();
        if instructions.trim().is_empty() {
            return Err(ScoutError::Config("persona instructions are empty".into()));
        }
        if acknowledgement.trim().is_empty() {
            return Err(ScoutError::Config("persona acknowledgement is empty".into()));
        }
        Ok(Self {
            instructions,
            acknowledgement,
        })
    }

    /// The built-in hiring-assistant persona.
    pub fn hiring_assistant() -> Self {
        Self {
            instructions: persona::HIRING_ASSISTANT_PROMPT.to_string(),
            acknowledgement: persona::ACKNOWLEDGEMENT.to_string(),
        }
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn acknowledgement(&self) -> &str {
        &self.acknowledgement
    }

    pub fn preamble(&self) -> [Turn; 2] {
        [
            Turn::user(self.instructions.clone()),
            Turn::assistant(self.acknowledgement.clone()),
        ]
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::hiring_assistant()
    }
}
