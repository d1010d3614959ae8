use talentscout_cli::commands::{complete_command, handle_command, CommandResult, COMMANDS};
use talentscout_cli::Theme;

// ========================================================================
// Command Parsing Tests (commands.rs)
// ========================================================================

#[test]
fn test_help_command() {
    match handle_command("/help") {
        CommandResult::Message(msg) => {
            assert!(msg.contains("TalentScout Commands"));
            assert!(msg.contains("/new"));
            assert!(msg.contains("/persona"));
        }
        other => panic!("expected help text, got {other:?}"),
    }
}

#[test]
fn test_help_command_short_alias() {
    assert!(matches!(handle_command("/h"), CommandResult::Message(_)));
}

#[test]
fn test_quit_aliases() {
    for cmd in ["/exit", "/quit", "/q"] {
        assert_eq!(handle_command(cmd), CommandResult::Quit, "{cmd}");
    }
}

#[test]
fn test_conversation_commands() {
    assert_eq!(handle_command("/new"), CommandResult::NewConversation);
    assert_eq!(handle_command("/clear"), CommandResult::Clear);
    assert_eq!(handle_command("/status"), CommandResult::ShowStatus);
    assert_eq!(handle_command("/persona"), CommandResult::ShowPersona);
}

#[test]
fn test_sidebar_toggle_aliases() {
    assert_eq!(handle_command("/options"), CommandResult::ToggleSidebar);
    assert_eq!(handle_command("/sidebar"), CommandResult::ToggleSidebar);
}

#[test]
fn test_theme_with_known_name() {
    assert_eq!(
        handle_command("/theme paper"),
        CommandResult::ThemeChanged("paper".into())
    );
}

#[test]
fn test_theme_with_unknown_name() {
    match handle_command("/theme neon") {
        CommandResult::Message(msg) => assert!(msg.contains("Unknown theme: neon")),
        other => panic!("expected message, got {other:?}"),
    }
}

#[test]
fn test_theme_without_argument_lists_themes() {
    match handle_command("/theme") {
        CommandResult::Message(msg) => {
            for name in Theme::all_names() {
                assert!(msg.contains(name));
            }
        }
        other => panic!("expected message, got {other:?}"),
    }
}

#[test]
fn test_version_command() {
    match handle_command("/version") {
        CommandResult::Message(msg) => {
            assert!(msg.contains("TalentScout CLI"));
            assert!(msg.contains(env!("CARGO_PKG_VERSION")));
        }
        other => panic!("expected message, got {other:?}"),
    }
}

#[test]
fn test_unknown_command() {
    match handle_command("/weather") {
        CommandResult::Message(msg) => assert!(msg.contains("Unknown command: /weather")),
        other => panic!("expected message, got {other:?}"),
    }
}

#[test]
fn test_plain_text_is_not_a_command() {
    assert_eq!(handle_command("My name is Alex"), CommandResult::NotACommand);
}

#[test]
fn test_double_slash_sends_literal_text() {
    assert_eq!(
        handle_command("//etc/hosts please"),
        CommandResult::SendText("/etc/hosts please".into())
    );
    assert_eq!(handle_command("//"), CommandResult::SendText("/".into()));
}

#[test]
fn test_command_with_surrounding_whitespace() {
    assert_eq!(handle_command("/new  "), CommandResult::NewConversation);
}

// ========================================================================
// Completion Tests
// ========================================================================

#[test]
fn test_complete_unique_prefix() {
    assert_eq!(complete_command("/pe"), Some("/persona ".to_string()));
    assert_eq!(complete_command("/n"), Some("/new ".to_string()));
}

#[test]
fn test_complete_ambiguous_prefix() {
    assert_eq!(complete_command("/"), None);
    assert_eq!(complete_command("/xyz"), None);
}

#[test]
fn test_every_listed_command_is_handled() {
    for cmd in COMMANDS {
        let result = handle_command(cmd);
        if let CommandResult::Message(msg) = &result {
            assert!(!msg.starts_with("Unknown command"), "{cmd} is not handled");
        }
    }
}

// ========================================================================
// Theme Tests (theme.rs)
// ========================================================================

#[test]
fn test_theme_by_name_falls_back_to_scout() {
    assert_eq!(Theme::by_name("contrast").name, "contrast");
    assert_eq!(Theme::by_name("nonexistent").name, "scout");
    assert_eq!(Theme::default(), Theme::scout());
}

#[test]
fn test_every_theme_marks_error_replies_apart() {
    for name in Theme::all_names() {
        let theme = Theme::by_name(name);
        assert_eq!(theme.name, *name);
        assert_ne!(theme.error_reply, theme.scout, "{name}");
        assert_ne!(theme.candidate, theme.scout, "{name}");
    }
}
