/// TalentScout — centralized constants.
/// Model names, endpoints, persona text and UI strings live here.

// ─── Models ───────────────────────────────────────────────────────────────────

pub mod models {
    /// Fast chat-tuned Gemini model used when nothing else is configured.
    pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-lite";
}

// ─── API Endpoints ────────────────────────────────────────────────────────────

pub mod endpoints {
    pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
    pub const GEMINI_API_VERSION: &str = "v1beta";
    pub const GEMINI_API_KEY_HEADER: &str = "x-goog-api-key";
}

// ─── Environment ──────────────────────────────────────────────────────────────

pub mod env {
    pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
}

// ─── Persona ──────────────────────────────────────────────────────────────────

pub mod persona {
    pub const HIRING_ASSISTANT_PROMPT: &str = r#"
You are the "TalentScout" Hiring Assistant. Your goal is to screen candidates for technology roles.
Maintain a professional, friendly, and encouraging tone.

YOUR PROCESS:
1. GREETING: Briefly greet the candidate and explain you are here to gather their details and assess their technical skills.

2. INFO GATHERING: You must collect the following details. Do NOT ask for all of them at once. Ask for 1 or 2 items at a time to keep the conversation natural:
   - Full Name
   - Email Address
   - Phone Number
   - Years of Experience
   - Desired Position
   - Current Location
   - Tech Stack (Languages, Frameworks, Tools)

3. TECH SCREENING: Once the user provides their Tech Stack:
   - Generate 3-5 conceptual technical questions based *specifically* on the tools they listed.
   - Do not ask for code snippets, just conceptual understanding.
   - Wait for their answer before moving to the next question or topic.

4. CLOSING: If the user says "Goodbye" or indicates they are done:
   - Thank them for their time.
   - Inform them that a human recruiter will review their profile and contact them.
   - Stop asking questions.

CONSTRAINTS:
- If the user asks irrelevant questions (e.g., "What is the weather?"), politely steer them back to the interview.
- Keep responses concise.
"#;

    pub const ACKNOWLEDGEMENT: &str =
        "Understood. I am ready to act as the TalentScout Hiring Assistant.";
}

// ─── Errors ───────────────────────────────────────────────────────────────────

pub mod errors {
    /// Prefix of the text shown in place of a reply when the remote call fails.
    pub const REPLY_ERROR_PREFIX: &str = "Error: ";
}

// ─── Config Paths ─────────────────────────────────────────────────────────────

pub mod paths {
    pub const CONFIG_DIR: &str = "talentscout";
    pub const CONFIG_FILE: &str = "config.toml";
}

// ─── UI ───────────────────────────────────────────────────────────────────────

pub mod ui {
    pub const TITLE: &str = "TalentScout Hiring Platform";
    pub const SUBTITLE: &str = "Lets get this chatbot running";
    pub const SIDEBAR_TITLE: &str = "Options";
    pub const INPUT_LABEL: &str = "Say hello";
    pub const DEFAULT_THEME: &str = "scout";
    pub const DEFAULT_WEB_ADDR: &str = "127.0.0.1:8501";
}
