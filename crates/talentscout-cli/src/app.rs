use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Terminal,
};
use std::io;
use std::sync::Arc;
use talentscout_core::{
    constants::{errors::REPLY_ERROR_PREFIX, ui},
    ChatSession, LlmClient, Persona, Usage,
};
use tokio::sync::mpsc;

use crate::commands::{self, CommandResult};
use crate::theme::Theme;

// ── Single-prompt mode ──────────────────────────────────────────────────

/// Send one user message, print the reply and return.
pub async fn run_single_prompt(
    client: Arc<dyn LlmClient>,
    persona: Persona,
    prompt: &str,
) -> Result<()> {
    let mut session = ChatSession::new(client, persona);
    let reply = session.submit(prompt).await;
    if reply.starts_with(REPLY_ERROR_PREFIX) {
        eprintln!("{reply}");
    } else {
        println!("{reply}");
    }
    Ok(())
}

// ── Interactive TUI ─────────────────────────────────────────────────────

#[derive(Clone)]
struct ChatMessage {
    role: MessageRole,
    content: String,
    timestamp: String,
}

#[derive(Clone, PartialEq)]
enum MessageRole {
    User,
    Assistant,
    System,
}

/// Work handed to the session task. Processed strictly in order.
enum WorkerRequest {
    Submit(String),
    Reset,
}

struct WorkerReply {
    text: String,
    usage: Usage,
}

struct AppState {
    // Input
    input: String,
    cursor_pos: usize,
    input_history: Vec<String>,
    history_pos: Option<usize>,

    // Chat
    messages: Vec<ChatMessage>,
    scroll_offset: usize,

    // Processing state
    is_processing: bool,

    // Status
    status_text: String,
    model_name: String,
    turns: usize,
    usage: Usage,

    // Display
    should_quit: bool,
    show_sidebar: bool,
    theme: Theme,

    persona_text: String,
}

impl AppState {
    fn new(model_name: &str, persona: &Persona, theme_name: &str) -> Self {
        let mut state = Self {
            input: String::new(),
            cursor_pos: 0,
            input_history: Vec::new(),
            history_pos: None,

            messages: Vec::new(),
            scroll_offset: 0,

            is_processing: false,

            status_text: "Ready".into(),
            model_name: model_name.to_string(),
            turns: 0,
            usage: Usage::default(),

            should_quit: false,
            show_sidebar: true,
            theme: Theme::by_name(theme_name),

            persona_text: persona.instructions().trim().to_string(),
        };
        state.add_message(MessageRole::System, welcome_text(model_name));
        state
    }

    fn add_message(&mut self, role: MessageRole, content: String) {
        self.messages.push(ChatMessage {
            role,
            content,
            timestamp: now_str(),
        });
        self.scroll_to_bottom();
    }

    fn scroll_to_bottom(&mut self) {
        // Will be resolved on next draw
        self.scroll_offset = usize::MAX;
    }

    fn push_history(&mut self, input: String) {
        if !input.is_empty() && self.input_history.last() != Some(&input) {
            self.input_history.push(input);
        }
        self.history_pos = None;
    }

    fn history_prev(&mut self) {
        if self.input_history.is_empty() {
            return;
        }
        let pos = match self.history_pos {
            None => self.input_history.len().saturating_sub(1),
            Some(0) => 0,
            Some(p) => p - 1,
        };
        self.history_pos = Some(pos);
        self.input = self.input_history[pos].clone();
        self.cursor_pos = self.input.chars().count();
    }

    fn history_next(&mut self) {
        if let Some(pos) = self.history_pos {
            if pos + 1 >= self.input_history.len() {
                self.history_pos = None;
                self.input.clear();
                self.cursor_pos = 0;
            } else {
                self.history_pos = Some(pos + 1);
                self.input = self.input_history[pos + 1].clone();
                self.cursor_pos = self.input.chars().count();
            }
        }
    }

    fn input_len(&self) -> usize {
        self.input.chars().count()
    }
}

fn welcome_text(model_name: &str) -> String {
    format!(
        "{} | {}\n{}. Type a message and press Enter. Ctrl+C to quit. /help for commands.",
        ui::TITLE,
        model_name,
        ui::SUBTITLE
    )
}

pub async fn run_tui(client: Arc<dyn LlmClient>, persona: Persona, theme_name: &str) -> Result<()> {
    let mut state = AppState::new(client.model(), &persona, theme_name);

    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<WorkerRequest>();
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<WorkerReply>();

    // Session worker: owns the transcript, runs one remote call at a time.
    let worker = tokio::spawn(async move {
        let mut session = ChatSession::new(client, persona);
        while let Some(request) = request_rx.recv().await {
            match request {
                WorkerRequest::Submit(input) => {
                    let text = session.submit(input).await;
                    let reply = WorkerReply {
                        text,
                        usage: session.usage(),
                    };
                    if reply_tx.send(reply).is_err() {
                        break;
                    }
                }
                WorkerRequest::Reset => session.reset(),
            }
        }
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = event_loop(&mut terminal, &mut state, &request_tx, &mut reply_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    worker.abort();

    outcome
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    request_tx: &mpsc::UnboundedSender<WorkerRequest>,
    reply_rx: &mut mpsc::UnboundedReceiver<WorkerReply>,
) -> Result<()> {
    loop {
        // Draw
        terminal.draw(|f| draw_ui(f, state))?;

        // Process replies (non-blocking)
        while let Ok(reply) = reply_rx.try_recv() {
            handle_reply(state, reply);
        }

        // Handle keyboard input with timeout
        if event::poll(std::time::Duration::from_millis(33))? {
            if let Event::Key(key) = event::read()? {
                handle_key(state, key, request_tx);
            }
        }

        if state.should_quit {
            return Ok(());
        }
    }
}

fn handle_reply(state: &mut AppState, reply: WorkerReply) {
    state.is_processing = false;
    state.turns += 2;
    state.usage = reply.usage;
    state.status_text = if reply.text.starts_with(REPLY_ERROR_PREFIX) {
        "Request failed".into()
    } else {
        "Ready".into()
    };
    state.add_message(MessageRole::Assistant, reply.text);
}

fn draw_ui(f: &mut ratatui::Frame, state: &mut AppState) {
    let theme = state.theme.clone();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Min(5),    // chat (+ sidebar)
            Constraint::Length(3), // input
            Constraint::Length(1), // status
        ])
        .split(f.area());

    draw_title(f, main_chunks[0], &theme);

    let chat_area = if state.show_sidebar {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(28), Constraint::Min(40)])
            .split(main_chunks[1]);

        draw_sidebar(f, h_chunks[0], &theme);
        h_chunks[1]
    } else {
        main_chunks[1]
    };

    draw_chat(f, chat_area, state, &theme);
    draw_input(f, main_chunks[2], state, &theme);
    draw_status_bar(f, main_chunks[3], state, &theme);
}

fn draw_title(f: &mut ratatui::Frame, area: Rect, theme: &Theme) {
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", ui::TITLE),
            Style::default()
                .fg(theme.heading)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("- {}", ui::SUBTITLE), Style::default().fg(theme.muted)),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn draw_sidebar(f: &mut ratatui::Frame, area: Rect, theme: &Theme) {
    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!(" {k:<8}"), Style::default().fg(theme.sidebar_key)),
            Span::styled(what, Style::default().fg(theme.text)),
        ])
    };

    let lines = vec![
        key("Enter", "send message"),
        key("Ctrl+N", "new conversation"),
        key("Ctrl+L", "clear screen"),
        key("Ctrl+E", "toggle sidebar"),
        key("PgUp/Dn", "scroll"),
        key("Ctrl+C", "quit"),
        Line::raw(""),
        key("/help", "all commands"),
        key("/persona", "show persona"),
        key("/theme", "change theme"),
    ];

    let sidebar = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", ui::SIDEBAR_TITLE))
            .border_style(Style::default().fg(theme.sidebar_frame)),
    );
    f.render_widget(sidebar, area);
}

fn draw_chat(f: &mut ratatui::Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let chat_lines = build_chat_lines(&state.messages, state.is_processing, theme);
    let total_lines = chat_lines.len();

    // Calculate visible height (area height - 2 for borders)
    let visible_height = area.height.saturating_sub(2) as usize;
    let max_scroll = total_lines.saturating_sub(visible_height);

    // Resolve scroll_to_bottom, then clamp
    if state.scroll_offset == usize::MAX || state.scroll_offset > max_scroll {
        state.scroll_offset = max_scroll;
    }

    let chat = Paragraph::new(Text::from(chat_lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Conversation ")
                .border_style(Style::default().fg(theme.frame)),
        )
        .wrap(Wrap { trim: false })
        .scroll((state.scroll_offset as u16, 0));
    f.render_widget(chat, area);

    if total_lines > visible_height {
        let mut scrollbar_state = ScrollbarState::new(max_scroll).position(state.scroll_offset);
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("^"))
                .end_symbol(Some("v")),
            area,
            &mut scrollbar_state,
        );
    }
}

fn render_message_lines<'a>(msg: &'a ChatMessage, theme: &Theme) -> Vec<Line<'a>> {
    let is_error =
        msg.role == MessageRole::Assistant && msg.content.starts_with(REPLY_ERROR_PREFIX);

    let (prefix, color) = match msg.role {
        MessageRole::User => ("You > ", theme.candidate),
        MessageRole::Assistant if is_error => ("Scout > ", theme.error_reply),
        MessageRole::Assistant => ("Scout > ", theme.scout),
        MessageRole::System => ("", theme.notice),
    };
    let indent = " ".repeat(prefix.len());

    let mut lines: Vec<Line> = Vec::new();
    for (i, raw_line) in msg.content.lines().enumerate() {
        if i == 0 {
            lines.push(Line::from(vec![
                Span::styled(
                    prefix,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(raw_line, Style::default().fg(color)),
                Span::styled(
                    format!("  {}", msg.timestamp),
                    Style::default().fg(theme.muted),
                ),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::raw(indent.clone()),
                Span::styled(raw_line, Style::default().fg(color)),
            ]));
        }
    }

    lines
}

fn build_chat_lines<'a>(
    messages: &'a [ChatMessage],
    is_processing: bool,
    theme: &Theme,
) -> Vec<Line<'a>> {
    let mut chat_lines: Vec<Line> = Vec::new();

    for msg in messages {
        chat_lines.extend(render_message_lines(msg, theme));
        chat_lines.push(Line::raw(""));
    }

    if is_processing {
        chat_lines.push(Line::from(Span::styled(
            "  Thinking...",
            Style::default()
                .fg(theme.scout)
                .add_modifier(Modifier::DIM),
        )));
    }

    chat_lines
}

fn draw_input(f: &mut ratatui::Frame, area: Rect, state: &AppState, theme: &Theme) {
    let input_style = if state.is_processing {
        Style::default().fg(theme.muted)
    } else {
        Style::default().fg(theme.text)
    };

    let title = if state.is_processing {
        " Waiting for reply... ".to_string()
    } else if state.input.starts_with('/') {
        " Command ".to_string()
    } else {
        format!(" {} ", ui::INPUT_LABEL)
    };

    let input = Paragraph::new(state.input.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(if state.input.starts_with('/') {
                    theme.command
                } else {
                    theme.frame
                })),
        )
        .style(input_style);
    f.render_widget(input, area);

    if !state.is_processing {
        let cursor_x = area.x + state.cursor_pos as u16 + 1;
        // Clamp cursor to area width
        let max_x = area.x + area.width.saturating_sub(2);
        f.set_cursor_position((cursor_x.min(max_x), area.y + 1));
    }
}

fn draw_status_bar(f: &mut ratatui::Frame, area: Rect, state: &AppState, theme: &Theme) {
    let tokens_str = if state.usage.input_tokens > 0 || state.usage.output_tokens > 0 {
        format!(
            "| {}in/{}out ",
            format_tokens(state.usage.input_tokens as u64),
            format_tokens(state.usage.output_tokens as u64),
        )
    } else {
        String::new()
    };

    let status_spans = vec![
        Span::styled(
            format!(" {} ", state.model_name),
            Style::default()
                .fg(theme.heading)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("| {} turns ", state.turns),
            Style::default().fg(theme.heading),
        ),
        Span::styled(tokens_str, Style::default().fg(theme.muted)),
        Span::styled("| ", Style::default().fg(theme.muted)),
        Span::styled(state.status_text.as_str(), Style::default().fg(theme.muted)),
    ];
    f.render_widget(Paragraph::new(Line::from(status_spans)), area);
}

fn handle_key(state: &mut AppState, key: KeyEvent, request_tx: &mpsc::UnboundedSender<WorkerRequest>) {
    match (key.modifiers, key.code) {
        // Quit
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            state.should_quit = true;
        }

        // Toggle sidebar
        (KeyModifiers::CONTROL, KeyCode::Char('e')) => {
            state.show_sidebar = !state.show_sidebar;
        }

        // Clear screen
        (KeyModifiers::CONTROL, KeyCode::Char('l')) => {
            handle_command_result(state, CommandResult::Clear, request_tx);
        }

        // New conversation
        (KeyModifiers::CONTROL, KeyCode::Char('n')) => {
            handle_command_result(state, CommandResult::NewConversation, request_tx);
        }

        // Submit input
        (_, KeyCode::Enter) => {
            if state.input.trim().is_empty() || state.is_processing {
                return;
            }

            let input = state.input.clone();
            state.input.clear();
            state.cursor_pos = 0;
            state.push_history(input.clone());

            // Handle slash commands
            if input.starts_with('/') {
                handle_command_result(state, commands::handle_command(&input), request_tx);
                return;
            }

            send_message(state, input, request_tx);
        }

        // Input editing
        (_, KeyCode::Backspace) => {
            if state.cursor_pos > 0 && !state.is_processing {
                let at = byte_index(&state.input, state.cursor_pos - 1);
                state.input.remove(at);
                state.cursor_pos -= 1;
            }
        }
        (_, KeyCode::Delete) => {
            if state.cursor_pos < state.input_len() && !state.is_processing {
                let at = byte_index(&state.input, state.cursor_pos);
                state.input.remove(at);
            }
        }
        (_, KeyCode::Left) => {
            state.cursor_pos = state.cursor_pos.saturating_sub(1);
        }
        (_, KeyCode::Right) => {
            if state.cursor_pos < state.input_len() {
                state.cursor_pos += 1;
            }
        }
        (KeyModifiers::CONTROL, KeyCode::Char('a')) | (_, KeyCode::Home) => {
            state.cursor_pos = 0;
        }
        (_, KeyCode::End) => {
            state.cursor_pos = state.input_len();
        }

        // Scroll (Shift+arrows, must come before bare arrows)
        (KeyModifiers::SHIFT, KeyCode::Up) => {
            state.scroll_offset = state.scroll_offset.saturating_sub(1);
        }
        (KeyModifiers::SHIFT, KeyCode::Down) => {
            state.scroll_offset = state.scroll_offset.saturating_add(1);
        }
        (_, KeyCode::PageUp) => {
            state.scroll_offset = state.scroll_offset.saturating_sub(20);
        }
        (_, KeyCode::PageDown) => {
            state.scroll_offset = state.scroll_offset.saturating_add(20);
        }

        // History navigation
        (_, KeyCode::Up) => {
            if !state.is_processing {
                state.history_prev();
            }
        }
        (_, KeyCode::Down) => {
            if !state.is_processing {
                state.history_next();
            }
        }

        // Kill line (Ctrl+U)
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            let at = byte_index(&state.input, state.cursor_pos);
            state.input.drain(..at);
            state.cursor_pos = 0;
        }

        // Tab completion for commands
        (_, KeyCode::Tab) => {
            if state.input.starts_with('/') {
                if let Some(completion) = commands::complete_command(&state.input) {
                    state.input = completion;
                    state.cursor_pos = state.input_len();
                }
            }
        }

        // Regular character input
        (_, KeyCode::Char(c)) => {
            if !state.is_processing {
                let at = byte_index(&state.input, state.cursor_pos);
                state.input.insert(at, c);
                state.cursor_pos += 1;
            }
        }

        _ => {}
    }
}

fn handle_command_result(
    state: &mut AppState,
    result: CommandResult,
    request_tx: &mpsc::UnboundedSender<WorkerRequest>,
) {
    match result {
        CommandResult::Message(msg) => state.add_message(MessageRole::System, msg),
        CommandResult::Clear => {
            state.messages.clear();
            state.add_message(
                MessageRole::System,
                "Screen cleared. The conversation continues.".into(),
            );
            state.scroll_offset = 0;
        }
        CommandResult::Quit => state.should_quit = true,
        CommandResult::NewConversation => {
            if state.is_processing {
                state.add_message(
                    MessageRole::System,
                    "Wait for the current reply before starting a new conversation.".into(),
                );
                return;
            }
            let _ = request_tx.send(WorkerRequest::Reset);
            state.messages.clear();
            state.turns = 0;
            state.usage = Usage::default();
            state.scroll_offset = 0;
            state.add_message(MessageRole::System, "New conversation started.".into());
        }
        CommandResult::ThemeChanged(name) => {
            state.theme = Theme::by_name(&name);
            state.add_message(
                MessageRole::System,
                format!("Theme changed to {}", state.theme.name),
            );
        }
        CommandResult::ToggleSidebar => state.show_sidebar = !state.show_sidebar,
        CommandResult::ShowStatus => {
            let status = format!(
                "Model: {}\nTurns: {}\nTokens: {} in / {} out\nTheme: {}",
                state.model_name,
                state.turns,
                state.usage.input_tokens,
                state.usage.output_tokens,
                state.theme.name
            );
            state.add_message(MessageRole::System, status);
        }
        CommandResult::ShowPersona => {
            let persona = state.persona_text.clone();
            state.add_message(MessageRole::System, persona);
        }
        CommandResult::SendText(text) => send_message(state, text, request_tx),
        CommandResult::NotACommand => {}
    }
}

fn send_message(
    state: &mut AppState,
    input: String,
    request_tx: &mpsc::UnboundedSender<WorkerRequest>,
) {
    state.add_message(MessageRole::User, input.clone());
    state.is_processing = true;
    state.status_text = "Sending...".into();
    if request_tx.send(WorkerRequest::Submit(input)).is_err() {
        state.is_processing = false;
        state.status_text = "Session closed".into();
    }
}

// ── Helper functions ────────────────────────────────────────────────────

/// Byte offset of the `char_pos`-th character, or the string length past the end.
fn byte_index(s: &str, char_pos: usize) -> usize {
    s.char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

fn format_tokens(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

fn now_str() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}
