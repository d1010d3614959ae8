use talentscout_core::*;

fn persona() -> Persona {
    Persona::hiring_assistant()
}

fn preamble() -> Vec<Turn> {
    persona().preamble().to_vec()
}

// ========================================================================
// Request Shaper Tests (context/shaper.rs)
// ========================================================================

#[test]
fn test_single_user_turn_yields_only_preamble() {
    let transcript = Transcript::from(vec![Turn::user("My name is Alex")]);

    let shaped = shape_request(&persona(), &transcript).unwrap();

    assert_eq!(shaped.prior_context, preamble());
    assert_eq!(shaped.live_message, "My name is Alex");
}

#[test]
fn test_history_is_replayed_before_live_message() {
    let transcript = Transcript::from(vec![
        Turn::user("Hi"),
        Turn::assistant("Hello! What's your name?"),
        Turn::user("Alex"),
    ]);

    let shaped = shape_request(&persona(), &transcript).unwrap();

    let mut expected = preamble();
    expected.push(Turn::user("Hi"));
    expected.push(Turn::assistant("Hello! What's your name?"));
    assert_eq!(shaped.prior_context, expected);
    assert_eq!(shaped.live_message, "Alex");
}

#[test]
fn test_prior_context_length_is_transcript_length_plus_one() {
    for n in [1usize, 3, 5, 9] {
        let turns: Vec<Turn> = (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    Turn::user(format!("user {i}"))
                } else {
                    Turn::assistant(format!("assistant {i}"))
                }
            })
            .collect();
        let transcript = Transcript::from(turns);

        let shaped = shape_request(&persona(), &transcript).unwrap();

        assert_eq!(shaped.prior_context.len(), n + 1);
        assert_eq!(shaped.live_message, format!("user {}", n - 1));
    }
}

#[test]
fn test_shaping_is_pure() {
    let transcript = Transcript::from(vec![
        Turn::user("Hi"),
        Turn::assistant("Hello"),
        Turn::user("I know Rust"),
    ]);
    let before = transcript.clone();

    let first = shape_request(&persona(), &transcript).unwrap();
    let second = shape_request(&persona(), &transcript).unwrap();

    assert_eq!(first, second);
    assert_eq!(transcript, before);
}

#[test]
fn test_consecutive_user_turns_are_kept_in_order() {
    let transcript = Transcript::from(vec![
        Turn::user("first"),
        Turn::user("second"),
        Turn::user("third"),
    ]);

    let shaped = shape_request(&persona(), &transcript).unwrap();

    assert_eq!(shaped.prior_context[2], Turn::user("first"));
    assert_eq!(shaped.prior_context[3], Turn::user("second"));
    assert_eq!(shaped.live_message, "third");
}

#[test]
fn test_custom_persona_opens_the_request() {
    let persona = Persona::new("Only speak French.", "D'accord.").unwrap();
    let transcript = Transcript::from(vec![Turn::user("Bonjour")]);

    let shaped = shape_request(&persona, &transcript).unwrap();

    assert_eq!(shaped.prior_context[0], Turn::user("Only speak French."));
    assert_eq!(shaped.prior_context[1], Turn::assistant("D'accord."));
}

#[test]
fn test_empty_transcript_is_rejected() {
    let result = shape_request(&persona(), &Transcript::new());
    assert!(matches!(result, Err(ScoutError::InvalidTranscript(_))));
}

#[test]
fn test_transcript_ending_with_assistant_is_rejected() {
    let transcript = Transcript::from(vec![Turn::user("Hi"), Turn::assistant("Hello")]);

    let result = shape_request(&persona(), &transcript);
    assert!(matches!(result, Err(ScoutError::InvalidTranscript(_))));
}
