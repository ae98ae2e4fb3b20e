//! Five-step assistant creation wizard.
//!
//! One form object is edited across all steps. Moving between steps never
//! validates anything; only `submission` checks that at least one user has
//! been picked. Selecting a provider re-seeds the fields that depend on it
//! from the catalog.

use serde::{Deserialize, Serialize};

use super::validation::FieldErrors;
use crate::catalog::{
    self, LlmProvider, ParameterRange, SynthesizerProvider, TelephonyProvider,
    TranscriberProvider,
};
use crate::models::{
    CreateAssistantRequest, IoConfig, LlmConfig, SynthesizerConfig, TaskConfig,
    TranscriberConfig, User,
};

pub const NO_APPROVED_USERS: &str = "No Approved Users Found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Basics,
    Llm,
    Voice,
    TranscriberIo,
    Task,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Basics,
        WizardStep::Llm,
        WizardStep::Voice,
        WizardStep::TranscriberIo,
        WizardStep::Task,
    ];

    pub fn index(&self) -> usize {
        match self {
            WizardStep::Basics => 0,
            WizardStep::Llm => 1,
            WizardStep::Voice => 2,
            WizardStep::TranscriberIo => 3,
            WizardStep::Task => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Basics => "Users & Basics",
            WizardStep::Llm => "LLM Configuration",
            WizardStep::Voice => "Voice Configuration",
            WizardStep::TranscriberIo => "Transcriber & IO",
            WizardStep::Task => "Task Configuration",
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }

    pub fn is_last(&self) -> bool {
        self.index() == Self::ALL.len() - 1
    }
}

/// Everything the wizard collects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantForm {
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

impl Default for AssistantForm {
    fn default() -> Self {
        Self {
            user_ids: Vec::new(),
            name: String::new(),
            welcome_message: String::new(),
            system_prompt: String::new(),
            llm: LlmConfig::default(),
            synthesizer: SynthesizerConfig::default(),
            transcriber: TranscriberConfig::default(),
            io: IoConfig::default(),
            task: TaskConfig::default(),
        }
    }
}

/// One change coming from an input's `onChange`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum WizardPatch {
    UserIds(Vec<String>),
    Name(String),
    WelcomeMessage(String),
    SystemPrompt(String),
    LlmProvider(LlmProvider),
    LlmModel(String),
    Temperature(f64),
    MaxTokens(f64),
    TopP(f64),
    FrequencyPenalty(f64),
    PresencePenalty(f64),
    SynthesizerProvider(SynthesizerProvider),
    Voice(String),
    SynthesizerEngine(String),
    SynthesizerFormat(String),
    TranscriberProvider(TranscriberProvider),
    TranscriberModel(String),
    Language(String),
    SamplingRate(u32),
    EndpointingMs(f64),
    InputProvider(TelephonyProvider),
    HangupAfterSilenceSecs(f64),
    InterruptionWords(f64),
    CallTerminateSecs(f64),
    Backchanneling(bool),
    AmbientNoise(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    #[error("{value} is not a {provider} model")]
    UnknownModel { provider: &'static str, value: String },

    #[error("{value} is not a {provider} voice")]
    UnknownVoice { provider: &'static str, value: String },

    #[error("{value} is not a {provider} engine")]
    UnknownEngine { provider: &'static str, value: String },

    #[error("{value} is not a {provider} language")]
    UnknownLanguage { provider: &'static str, value: String },

    #[error("unsupported audio format {0}")]
    UnknownFormat(String),

    #[error("unsupported sampling rate {0}")]
    UnknownSamplingRate(u32),
}

#[derive(Debug, Clone)]
pub struct AssistantWizard {
    step: WizardStep,
    form: AssistantForm,
    approved_users: Vec<User>,
    submitting: bool,
}

impl AssistantWizard {
    pub fn new(approved_users: Vec<User>) -> Self {
        Self {
            step: WizardStep::Basics,
            form: AssistantForm::default(),
            approved_users,
            submitting: false,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn form(&self) -> &AssistantForm {
        &self.form
    }

    pub fn approved_users(&self) -> &[User] {
        &self.approved_users
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn next(&mut self) {
        self.step = self.step.next();
    }

    pub fn previous(&mut self) {
        self.step = self.step.previous();
    }

    /// Step 1 notice shown when no user can own an assistant.
    pub fn notice(&self) -> Option<&'static str> {
        self.approved_users.is_empty().then_some(NO_APPROVED_USERS)
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.approved_users.is_empty() && !self.form.user_ids.is_empty()
    }

    pub fn apply(&mut self, patch: WizardPatch) -> Result<(), PatchError> {
        let form = &mut self.form;
        match patch {
            WizardPatch::UserIds(ids) => {
                let mut selected: Vec<String> = Vec::new();
                for id in ids {
                    let known = self.approved_users.iter().any(|u| u.id == id);
                    if known && !selected.contains(&id) {
                        selected.push(id);
                    }
                }
                form.user_ids = selected;
            }
            WizardPatch::Name(v) => form.name = v,
            WizardPatch::WelcomeMessage(v) => form.welcome_message = v,
            WizardPatch::SystemPrompt(v) => form.system_prompt = v,
            WizardPatch::LlmProvider(provider) => {
                form.llm.provider = provider;
                form.llm.model = provider.default_model().to_string();
            }
            WizardPatch::LlmModel(model) => {
                if !form.llm.provider.has_model(&model) {
                    return Err(PatchError::UnknownModel {
                        provider: form.llm.provider.as_str(),
                        value: model,
                    });
                }
                form.llm.model = model;
            }
            WizardPatch::Temperature(v) => form.llm.temperature = catalog::TEMPERATURE.clamp(v),
            WizardPatch::MaxTokens(v) => form.llm.max_tokens = clamp_u32(&catalog::MAX_TOKENS, v),
            WizardPatch::TopP(v) => form.llm.top_p = catalog::TOP_P.clamp(v),
            WizardPatch::FrequencyPenalty(v) => {
                form.llm.frequency_penalty = catalog::FREQUENCY_PENALTY.clamp(v)
            }
            WizardPatch::PresencePenalty(v) => {
                form.llm.presence_penalty = catalog::PRESENCE_PENALTY.clamp(v)
            }
            WizardPatch::SynthesizerProvider(provider) => {
                form.synthesizer.provider = provider;
                form.synthesizer.voice = provider.default_voice().to_string();
                form.synthesizer.engine = provider.default_engine().to_string();
            }
            WizardPatch::Voice(voice) => {
                if !form.synthesizer.provider.has_voice(&voice) {
                    return Err(PatchError::UnknownVoice {
                        provider: form.synthesizer.provider.as_str(),
                        value: voice,
                    });
                }
                form.synthesizer.voice = voice;
            }
            WizardPatch::SynthesizerEngine(engine) => {
                if !form.synthesizer.provider.has_engine(&engine) {
                    return Err(PatchError::UnknownEngine {
                        provider: form.synthesizer.provider.as_str(),
                        value: engine,
                    });
                }
                form.synthesizer.engine = engine;
            }
            WizardPatch::SynthesizerFormat(format) => {
                if !catalog::SYNTHESIZER_FORMATS.contains(&format.as_str()) {
                    return Err(PatchError::UnknownFormat(format));
                }
                form.synthesizer.format = format;
            }
            WizardPatch::TranscriberProvider(provider) => {
                form.transcriber.provider = provider;
                form.transcriber.model = provider.default_model().to_string();
                form.transcriber.language = provider.default_language().to_string();
            }
            WizardPatch::TranscriberModel(model) => {
                if !form.transcriber.provider.has_model(&model) {
                    return Err(PatchError::UnknownModel {
                        provider: form.transcriber.provider.as_str(),
                        value: model,
                    });
                }
                form.transcriber.model = model;
            }
            WizardPatch::Language(language) => {
                if !form.transcriber.provider.has_language(&language) {
                    return Err(PatchError::UnknownLanguage {
                        provider: form.transcriber.provider.as_str(),
                        value: language,
                    });
                }
                form.transcriber.language = language;
            }
            WizardPatch::SamplingRate(rate) => {
                if !catalog::SAMPLING_RATES.contains(&rate) {
                    return Err(PatchError::UnknownSamplingRate(rate));
                }
                form.transcriber.sampling_rate = rate;
            }
            WizardPatch::EndpointingMs(v) => {
                form.transcriber.endpointing_ms = clamp_u32(&catalog::ENDPOINTING_MS, v)
            }
            WizardPatch::InputProvider(provider) => form.io = IoConfig::for_provider(provider),
            WizardPatch::HangupAfterSilenceSecs(v) => {
                form.task.hangup_after_silence_secs =
                    clamp_u32(&catalog::HANGUP_AFTER_SILENCE_SECS, v)
            }
            WizardPatch::InterruptionWords(v) => {
                form.task.interruption_words = clamp_u32(&catalog::INTERRUPTION_WORDS, v)
            }
            WizardPatch::CallTerminateSecs(v) => {
                form.task.call_terminate_secs = clamp_u32(&catalog::CALL_TERMINATE_SECS, v)
            }
            WizardPatch::Backchanneling(v) => form.task.backchanneling = v,
            WizardPatch::AmbientNoise(v) => form.task.ambient_noise = v,
        }
        Ok(())
    }

    /// Builds the create request. The only gate is a non-empty user selection.
    pub fn submission(&self) -> Result<CreateAssistantRequest, FieldErrors> {
        if self.form.user_ids.is_empty() {
            let mut errors = FieldErrors::new();
            errors.insert(
                "user_ids".to_string(),
                "Select at least one user".to_string(),
            );
            return Err(errors);
        }

        let form = self.form.clone();
        Ok(CreateAssistantRequest {
            user_ids: form.user_ids,
            name: form.name.trim().to_string(),
            welcome_message: form.welcome_message,
            system_prompt: form.system_prompt,
            llm: form.llm,
            synthesizer: form.synthesizer,
            transcriber: form.transcriber,
            io: form.io,
            task: form.task,
        })
    }

    /// Marks a submission as in flight. Returns false if one already is.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        true
    }

    pub fn end_submit(&mut self) {
        self.submitting = false;
    }
}

fn clamp_u32(range: &ParameterRange, value: f64) -> u32 {
    range.clamp(value).round() as u32
}
