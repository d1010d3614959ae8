use crate::constants::errors::REPLY_ERROR_PREFIX;
use crate::context::{shape_request, Persona, Transcript};
use crate::error::Result;
use crate::llm::{LlmClient, LlmResponse, Usage};
use std::sync::Arc;
use tracing::{debug, warn};

/// One UI session: a transcript plus the shared client and persona used to extend it.
///
/// `submit` is the only place the remote call happens. Any failure there is turned
/// into an `"Error: ..."` reply so the session always stays usable.
pub struct ChatSession {
    client: Arc<dyn LlmClient>,
    persona: Persona,
    transcript: Transcript,
    usage: Usage,
}

impl ChatSession {
    pub fn new(client: Arc<dyn LlmClient>, persona: Persona) -> Self {
        Self {
            client,
            persona,
            transcript: Transcript::new(),
            usage: Usage::default(),
        }
    }

    /// Record `input` as the next user turn, ask the model, record and return the reply.
    ///
    /// Both turns land in the transcript together after the call returns, so a
    /// cancelled `submit` leaves the transcript untouched.
    pub async fn submit(&mut self, input: impl Into<String>) -> String {
        let input = input.into();
        let mut pending = self.transcript.clone();
        pending.add_user_turn(input.clone());

        let reply = match self.request_reply(&pending).await {
            Ok(response) => {
                if let Some(usage) = response.usage {
                    self.usage.add(usage);
                }
                response.text
            }
            Err(e) => {
                warn!(error = %e, "remote call failed");
                format!("{REPLY_ERROR_PREFIX}{e}")
            }
        };

        self.transcript.add_user_turn(input);
        self.transcript.add_assistant_turn(reply.clone());
        reply
    }

    async fn request_reply(&self, pending: &Transcript) -> Result<LlmResponse> {
        let shaped = shape_request(&self.persona, pending)?;
        debug!(
            prior_turns = shaped.prior_context.len(),
            "shaped request"
        );

        self.client
            .send(&shaped.prior_context, &shaped.live_message)
            .await
    }

    /// Drop the current transcript and start a new conversation.
    pub fn reset(&mut self) {
        self.transcript = Transcript::new();
        self.usage = Usage::default();
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn usage(&self) -> Usage {
        self.usage
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }
}
