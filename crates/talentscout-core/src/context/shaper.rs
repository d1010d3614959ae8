use crate::context::{Persona, Transcript};
use crate::error::{Result, ScoutError};
use crate::llm::Turn;

/// What a single remote call needs: history to replay and the message to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedRequest {
    pub prior_context: Vec<Turn>,
    pub live_message: String,
}

/// Project a transcript onto a request.
///
/// `prior_context` is the persona preamble followed by every turn except the last;
/// `live_message` is the text of the last turn, which must be a user turn.
/// The transcript is only read.
pub fn shape_request(persona: &Persona, transcript: &Transcript) -> Result<ShapedRequest> {
    let (live, history) = transcript
        .turns()
        .split_last()
        .ok_or_else(|| ScoutError::InvalidTranscript("transcript is empty".into()))?;

    if !live.is_user() {
        return Err(ScoutError::InvalidTranscript(
            "last turn must come from the user".into(),
        ));
    }

    let mut prior_context = Vec::with_capacity(history.len() + 2);
    prior_context.extend(persona.preamble());
    prior_context.extend(history.iter().cloned());

    Ok(ShapedRequest {
        prior_context,
        live_message: live.text.clone(),
    })
}
