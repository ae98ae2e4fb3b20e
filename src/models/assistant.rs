use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{
    self, LlmProvider, SynthesizerProvider, TelephonyProvider, TranscriberProvider,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assistant {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub status: AssistantStatus,
    #[serde(default)]
    pub welcome_message: String,
    #[serde(default)]
    pub system_prompt: String,
    pub llm: LlmConfig,
    pub synthesizer: SynthesizerConfig,
    pub transcriber: TranscriberConfig,
    pub io: IoConfig,
    pub task: TaskConfig,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssistantStatus {
    Draft,
    Active,
    Inactive,
    Deleted,
}

impl AssistantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssistantStatus::Draft => "draft",
            AssistantStatus::Active => "active",
            AssistantStatus::Inactive => "inactive",
            AssistantStatus::Deleted => "deleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        let provider = LlmProvider::Openai;
        Self {
            provider,
            model: provider.default_model().to_string(),
            temperature: catalog::TEMPERATURE.default,
            max_tokens: catalog::MAX_TOKENS.default as u32,
            top_p: catalog::TOP_P.default,
            frequency_penalty: catalog::FREQUENCY_PENALTY.default,
            presence_penalty: catalog::PRESENCE_PENALTY.default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesizerConfig {
    pub provider: SynthesizerProvider,
    pub voice: String,
    pub engine: String,
    pub format: String,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        let provider = SynthesizerProvider::Polly;
        Self {
            provider,
            voice: provider.default_voice().to_string(),
            engine: provider.default_engine().to_string(),
            format: catalog::SYNTHESIZER_FORMATS[0].to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriberConfig {
    pub provider: TranscriberProvider,
    pub model: String,
    pub language: String,
    pub sampling_rate: u32,
    pub endpointing_ms: u32,
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        let provider = TranscriberProvider::Deepgram;
        Self {
            provider,
            model: provider.default_model().to_string(),
            language: provider.default_language().to_string(),
            sampling_rate: catalog::DEFAULT_SAMPLING_RATE,
            endpointing_ms: catalog::ENDPOINTING_MS.default as u32,
        }
    }
}

/// Telephony channels. The output provider always mirrors the input provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IoConfig {
    pub input_provider: TelephonyProvider,
    pub input_format: String,
    pub output_provider: TelephonyProvider,
    pub output_format: String,
}

impl IoConfig {
    pub fn for_provider(provider: TelephonyProvider) -> Self {
        Self {
            input_provider: provider,
            input_format: provider.audio_format().to_string(),
            output_provider: provider,
            output_format: provider.audio_format().to_string(),
        }
    }
}

impl Default for IoConfig {
    fn default() -> Self {
        Self::for_provider(TelephonyProvider::Twilio)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskConfig {
    pub hangup_after_silence_secs: u32,
    pub interruption_words: u32,
    pub call_terminate_secs: u32,
    pub backchanneling: bool,
    pub ambient_noise: bool,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            hangup_after_silence_secs: catalog::HANGUP_AFTER_SILENCE_SECS.default as u32,
            interruption_words: catalog::INTERRUPTION_WORDS.default as u32,
            call_terminate_secs: catalog::CALL_TERMINATE_SECS.default as u32,
            backchanneling: false,
            ambient_noise: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssistantRequest {
    pub user_ids: Vec<String>,
    pub name: String,
    pub welcome_message: String,
    pub system_prompt: String,
    pub llm: LlmConfig,
    pub synthesizer: SynthesizerConfig,
    pub transcriber: TranscriberConfig,
    pub io: IoConfig,
    pub task: TaskConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAssistantRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm: Option<LlmConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesizer: Option<SynthesizerConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcriber: Option<TranscriberConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub io: Option<IoConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskConfig>,
}

impl UpdateAssistantRequest {
    /// Re-applies the output-mirrors-input rule to any IO section the caller sent.
    pub fn normalized(mut self) -> Self {
        if let Some(io) = self.io.take() {
            self.io = Some(IoConfig::for_provider(io.input_provider));
        }
        self
    }
}
