/// Result of processing a slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Display a message to the user.
    Message(String),
    /// Clear the screen; the transcript is kept.
    Clear,
    /// Quit the application.
    Quit,
    /// Start a fresh conversation with an empty transcript.
    NewConversation,
    /// Change the theme.
    ThemeChanged(String),
    /// Toggle the options sidebar.
    ToggleSidebar,
    /// Show status (model, turns, tokens).
    ShowStatus,
    /// Show the persona instructions sent ahead of every request.
    ShowPersona,
    /// `//text` escape: send `/text` to the assistant as a normal message.
    SendText(String),
    /// Not a command - treat as regular input.
    NotACommand,
}

/// Every command name, used for help text and tab completion.
pub const COMMANDS: &[&str] = &[
    "/help",
    "/new",
    "/clear",
    "/status",
    "/persona",
    "/theme",
    "/options",
    "/version",
    "/exit",
    "/quit",
];

pub fn handle_command(input: &str) -> CommandResult {
    if let Some(escaped) = input.trim_start().strip_prefix("//") {
        return CommandResult::SendText(format!("/{escaped}"));
    }

    let parts: Vec<&str> = input.trim().splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/help" | "/h" => show_help(),
        "/exit" | "/quit" | "/q" => CommandResult::Quit,
        "/clear" => CommandResult::Clear,
        "/new" => CommandResult::NewConversation,
        "/status" => CommandResult::ShowStatus,
        "/persona" => CommandResult::ShowPersona,
        "/options" | "/sidebar" => CommandResult::ToggleSidebar,
        "/theme" => {
            if arg.is_empty() {
                let themes = crate::theme::Theme::all_names().join(", ");
                CommandResult::Message(format!("Available themes: {themes}\nUsage: /theme <theme-name>"))
            } else if crate::theme::Theme::exists(arg) {
                CommandResult::ThemeChanged(arg.to_string())
            } else {
                CommandResult::Message(format!("Unknown theme: {arg}"))
            }
        }
        "/version" => CommandResult::Message(format!("TalentScout CLI v{}", env!("CARGO_PKG_VERSION"))),

        // Unknown command
        _ => {
            if input.starts_with('/') {
                CommandResult::Message(format!("Unknown command: {cmd}. Type /help for commands."))
            } else {
                CommandResult::NotACommand
            }
        }
    }
}

/// Complete a partially typed command when exactly one command matches.
pub fn complete_command(input: &str) -> Option<String> {
    let matches: Vec<&&str> = COMMANDS.iter().filter(|c| c.starts_with(input)).collect();

    if matches.len() == 1 {
        Some(format!("{} ", matches[0]))
    } else {
        None
    }
}

fn show_help() -> CommandResult {
    let help_text = "\
╭─ TalentScout Commands ─────────────────────────────────────────╮

  CONVERSATION
    /new                      Start a fresh conversation
    /clear                    Clear the screen (history is kept)
    /persona                  Show the assistant's instructions
    /status                   Show model, turn count and token usage

  DISPLAY
    /theme <name>             Change color theme
    /options, /sidebar        Toggle the options sidebar

  OTHER
    //text                    Send \"/text\" as a message
    /help, /h                 Show this help message
    /version                  Show version information
    /exit, /quit, /q          Quit the application

╰────────────────────────────────────────────────────────────────╯";

    CommandResult::Message(help_text.into())
}
