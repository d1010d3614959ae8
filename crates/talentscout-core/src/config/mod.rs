use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::{env, models, paths, persona, ui};
use crate::context::Persona;
use crate::error::ScoutError;
use crate::llm::{GeminiClient, LlmClient};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub persona: PersonaSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Overrides for the built-in persona. Unset fields fall back to the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonaSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledgement: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    ui::DEFAULT_THEME.to_string()
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
        }
    }
}

fn default_model() -> String {
    models::DEFAULT_GEMINI_MODEL.to_string()
}

fn default_api_key_env() -> String {
    env::API_KEY_ENV.to_string()
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key_env: default_api_key_env(),
            base_url: None,
            max_output_tokens: None,
            temperature: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm: LlmSettings::default(),
            persona: PersonaSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(paths::CONFIG_DIR)
            .join(paths::CONFIG_FILE)
    }

    /// Load from the default config path, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(settings) => return settings,
                Err(e) => tracing::warn!("ignoring {}: {e}", config_path.display()),
            }
        }
        Self::default()
    }

    /// Load from an explicit file. Unlike [`Settings::load`], errors are returned.
    pub fn load_from(path: &Path) -> Result<Self, ScoutError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ScoutError::Config(e.to_string()))
    }

    pub fn save(&self) -> Result<(), ScoutError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ScoutError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ScoutError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the API key from the environment variable specified in settings.
    /// Empty values count as unset.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.llm.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    pub fn persona(&self) -> Result<Persona, ScoutError> {
        Persona::new(
            self.persona
                .instructions
                .as_deref()
                .unwrap_or(persona::HIRING_ASSISTANT_PROMPT),
            self.persona
                .acknowledgement
                .as_deref()
                .unwrap_or(persona::ACKNOWLEDGEMENT),
        )
    }

    /// Build the Gemini client. A missing API key is an error; callers treat it as fatal.
    pub fn build_llm_client(&self) -> Result<Arc<dyn LlmClient>, ScoutError> {
        let api_key = self
            .api_key()
            .ok_or_else(|| ScoutError::MissingApiKey(self.llm.api_key_env.clone()))?;

        let mut client = GeminiClient::new(api_key).with_model(self.llm.model.clone());
        if let Some(ref url) = self.llm.base_url {
            client = client.with_base_url(url.clone());
        }
        if let Some(max) = self.llm.max_output_tokens {
            client = client.with_max_output_tokens(max);
        }
        if let Some(temperature) = self.llm.temperature {
            client = client.with_temperature(temperature);
        }
        Ok(Arc::new(client))
    }
}
