//! Static option tables used to populate the console's dropdowns and sliders.
//!
//! Every provider is an enum variant and every lookup is an exhaustive
//! `match`, so adding a provider without its option list fails to compile.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> ModelOption {
    ModelOption { value, label }
}

// ── LLM ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Openai,
    Openrouter,
    Deepinfra,
    Groq,
    Azure,
}

const OPENAI_MODELS: &[ModelOption] = &[
    opt("gpt-4.1-mini", "GPT-4.1 Mini"),
    opt("gpt-4.1", "GPT-4.1"),
    opt("gpt-4o", "GPT-4o"),
    opt("gpt-4o-mini", "GPT-4o Mini"),
    opt("gpt-3.5-turbo", "GPT-3.5 Turbo"),
];

const OPENROUTER_MODELS: &[ModelOption] = &[
    opt("gpt-oss-20b", "GPT-OSS 20B"),
    opt("gpt-oss-120b", "GPT-OSS 120B"),
    opt("llama-3.3-70b-instruct", "Llama 3.3 70B Instruct"),
];

const DEEPINFRA_MODELS: &[ModelOption] = &[
    opt("meta-llama/Meta-Llama-3.1-70B-Instruct", "Llama 3.1 70B Instruct"),
    opt("meta-llama/Meta-Llama-3.1-8B-Instruct", "Llama 3.1 8B Instruct"),
];

const GROQ_MODELS: &[ModelOption] = &[
    opt("llama-3.3-70b-versatile", "Llama 3.3 70B Versatile"),
    opt("llama-3.1-8b-instant", "Llama 3.1 8B Instant"),
];

const AZURE_MODELS: &[ModelOption] = &[
    opt("gpt-4.1-mini", "GPT-4.1 Mini"),
    opt("gpt-4o-mini", "GPT-4o Mini"),
];

impl LlmProvider {
    pub const ALL: [LlmProvider; 5] = [
        LlmProvider::Openai,
        LlmProvider::Openrouter,
        LlmProvider::Deepinfra,
        LlmProvider::Groq,
        LlmProvider::Azure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Openai => "openai",
            LlmProvider::Openrouter => "openrouter",
            LlmProvider::Deepinfra => "deepinfra",
            LlmProvider::Groq => "groq",
            LlmProvider::Azure => "azure",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LlmProvider::Openai => "OpenAI",
            LlmProvider::Openrouter => "OpenRouter",
            LlmProvider::Deepinfra => "DeepInfra",
            LlmProvider::Groq => "Groq",
            LlmProvider::Azure => "Azure OpenAI",
        }
    }

    pub fn models(&self) -> &'static [ModelOption] {
        match self {
            LlmProvider::Openai => OPENAI_MODELS,
            LlmProvider::Openrouter => OPENROUTER_MODELS,
            LlmProvider::Deepinfra => DEEPINFRA_MODELS,
            LlmProvider::Groq => GROQ_MODELS,
            LlmProvider::Azure => AZURE_MODELS,
        }
    }

    pub fn default_model(&self) -> &'static str {
        self.models()[0].value
    }

    pub fn has_model(&self, model: &str) -> bool {
        self.models().iter().any(|m| m.value == model)
    }
}

// ── Synthesizer ──

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceOption {
    pub id: &'static str,
    pub name: &'static str,
    pub language: &'static str,
}

const fn voice(id: &'static str, name: &'static str, language: &'static str) -> VoiceOption {
    VoiceOption { id, name, language }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesizerProvider {
    Polly,
    Elevenlabs,
    Deepgram,
    Cartesia,
}

const POLLY_VOICES: &[VoiceOption] = &[
    voice("Matthew", "Matthew", "en-US"),
    voice("Joanna", "Joanna", "en-US"),
    voice("Kajal", "Kajal", "en-IN"),
    voice("Amy", "Amy", "en-GB"),
];

const ELEVENLABS_VOICES: &[VoiceOption] = &[
    voice("21m00Tcm4TlvDq8ikWAM", "Rachel", "en"),
    voice("pNInz6obpgDQGcFmaJgB", "Adam", "en"),
    voice("EXAVITQu4vr4xnSDxMaL", "Bella", "en"),
];

const DEEPGRAM_VOICES: &[VoiceOption] = &[
    voice("aura-asteria-en", "Asteria", "en"),
    voice("aura-orion-en", "Orion", "en"),
    voice("aura-luna-en", "Luna", "en"),
];

const CARTESIA_VOICES: &[VoiceOption] = &[
    voice("a0e99841-438c-4a64-b679-ae501e7d6091", "Barbershop Man", "en"),
    voice("79a125e8-cd45-4c13-8a67-188112f4dd22", "British Lady", "en"),
];

const POLLY_ENGINES: &[ModelOption] = &[
    opt("neural", "Neural"),
    opt("generative", "Generative"),
    opt("standard", "Standard"),
];

const ELEVENLABS_ENGINES: &[ModelOption] = &[
    opt("eleven_turbo_v2_5", "Turbo v2.5"),
    opt("eleven_flash_v2_5", "Flash v2.5"),
    opt("eleven_multilingual_v2", "Multilingual v2"),
];

const DEEPGRAM_ENGINES: &[ModelOption] = &[opt("aura", "Aura")];

const CARTESIA_ENGINES: &[ModelOption] = &[opt("sonic-english", "Sonic English")];

impl SynthesizerProvider {
    pub const ALL: [SynthesizerProvider; 4] = [
        SynthesizerProvider::Polly,
        SynthesizerProvider::Elevenlabs,
        SynthesizerProvider::Deepgram,
        SynthesizerProvider::Cartesia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SynthesizerProvider::Polly => "polly",
            SynthesizerProvider::Elevenlabs => "elevenlabs",
            SynthesizerProvider::Deepgram => "deepgram",
            SynthesizerProvider::Cartesia => "cartesia",
        }
    }

    pub fn voices(&self) -> &'static [VoiceOption] {
        match self {
            SynthesizerProvider::Polly => POLLY_VOICES,
            SynthesizerProvider::Elevenlabs => ELEVENLABS_VOICES,
            SynthesizerProvider::Deepgram => DEEPGRAM_VOICES,
            SynthesizerProvider::Cartesia => CARTESIA_VOICES,
        }
    }

    pub fn engines(&self) -> &'static [ModelOption] {
        match self {
            SynthesizerProvider::Polly => POLLY_ENGINES,
            SynthesizerProvider::Elevenlabs => ELEVENLABS_ENGINES,
            SynthesizerProvider::Deepgram => DEEPGRAM_ENGINES,
            SynthesizerProvider::Cartesia => CARTESIA_ENGINES,
        }
    }

    pub fn default_voice(&self) -> &'static str {
        self.voices()[0].id
    }

    pub fn default_engine(&self) -> &'static str {
        self.engines()[0].value
    }

    pub fn has_voice(&self, id: &str) -> bool {
        self.voices().iter().any(|v| v.id == id)
    }

    pub fn has_engine(&self, engine: &str) -> bool {
        self.engines().iter().any(|e| e.value == engine)
    }
}

pub const SYNTHESIZER_FORMATS: [&str; 3] = ["wav", "mp3", "pcm"];

// ── Transcriber ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriberProvider {
    Deepgram,
    Azure,
    Sarvam,
}

const STT_DEEPGRAM_MODELS: &[ModelOption] = &[
    opt("nova-3", "Nova 3"),
    opt("nova-2", "Nova 2"),
    opt("nova-2-phonecall", "Nova 2 Phonecall"),
];

const STT_AZURE_MODELS: &[ModelOption] = &[opt("azure", "Azure Speech")];

const STT_SARVAM_MODELS: &[ModelOption] = &[opt("saarika:v2", "Saarika v2")];

const STT_DEEPGRAM_LANGUAGES: &[ModelOption] = &[
    opt("en", "English"),
    opt("hi", "Hindi"),
    opt("es", "Spanish"),
    opt("fr", "French"),
    opt("de", "German"),
    opt("multi", "Multilingual"),
];

const STT_AZURE_LANGUAGES: &[ModelOption] = &[
    opt("en-US", "English (US)"),
    opt("en-IN", "English (India)"),
    opt("hi-IN", "Hindi"),
];

const STT_SARVAM_LANGUAGES: &[ModelOption] = &[
    opt("hi-IN", "Hindi"),
    opt("en-IN", "English (India)"),
    opt("ta-IN", "Tamil"),
    opt("te-IN", "Telugu"),
];

impl TranscriberProvider {
    pub const ALL: [TranscriberProvider; 3] = [
        TranscriberProvider::Deepgram,
        TranscriberProvider::Azure,
        TranscriberProvider::Sarvam,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriberProvider::Deepgram => "deepgram",
            TranscriberProvider::Azure => "azure",
            TranscriberProvider::Sarvam => "sarvam",
        }
    }

    pub fn models(&self) -> &'static [ModelOption] {
        match self {
            TranscriberProvider::Deepgram => STT_DEEPGRAM_MODELS,
            TranscriberProvider::Azure => STT_AZURE_MODELS,
            TranscriberProvider::Sarvam => STT_SARVAM_MODELS,
        }
    }

    pub fn languages(&self) -> &'static [ModelOption] {
        match self {
            TranscriberProvider::Deepgram => STT_DEEPGRAM_LANGUAGES,
            TranscriberProvider::Azure => STT_AZURE_LANGUAGES,
            TranscriberProvider::Sarvam => STT_SARVAM_LANGUAGES,
        }
    }

    pub fn default_model(&self) -> &'static str {
        self.models()[0].value
    }

    pub fn default_language(&self) -> &'static str {
        self.languages()[0].value
    }

    pub fn has_model(&self, model: &str) -> bool {
        self.models().iter().any(|m| m.value == model)
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.languages().iter().any(|l| l.value == language)
    }
}

pub const SAMPLING_RATES: [u32; 4] = [8000, 16000, 24000, 44100];
pub const DEFAULT_SAMPLING_RATE: u32 = 16000;

// ── Telephony ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TelephonyProvider {
    Twilio,
    Plivo,
    Exotel,
}

impl TelephonyProvider {
    pub const ALL: [TelephonyProvider; 3] = [
        TelephonyProvider::Twilio,
        TelephonyProvider::Plivo,
        TelephonyProvider::Exotel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TelephonyProvider::Twilio => "twilio",
            TelephonyProvider::Plivo => "plivo",
            TelephonyProvider::Exotel => "exotel",
        }
    }

    pub fn audio_format(&self) -> &'static str {
        match self {
            TelephonyProvider::Twilio => "wav",
            TelephonyProvider::Plivo => "wav",
            TelephonyProvider::Exotel => "pcm",
        }
    }
}

// ── Numeric parameter ranges ──

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl ParameterRange {
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default;
        }
        value.clamp(self.min, self.max)
    }
}

pub const TEMPERATURE: ParameterRange = ParameterRange { min: 0.0, max: 1.0, step: 0.1, default: 0.2 };
pub const MAX_TOKENS: ParameterRange = ParameterRange { min: 1.0, max: 4096.0, step: 1.0, default: 150.0 };
pub const TOP_P: ParameterRange = ParameterRange { min: 0.0, max: 1.0, step: 0.05, default: 0.9 };
pub const FREQUENCY_PENALTY: ParameterRange = ParameterRange { min: 0.0, max: 2.0, step: 0.1, default: 0.0 };
pub const PRESENCE_PENALTY: ParameterRange = ParameterRange { min: 0.0, max: 2.0, step: 0.1, default: 0.0 };
pub const HANGUP_AFTER_SILENCE_SECS: ParameterRange = ParameterRange { min: 5.0, max: 60.0, step: 1.0, default: 10.0 };
pub const INTERRUPTION_WORDS: ParameterRange = ParameterRange { min: 0.0, max: 10.0, step: 1.0, default: 2.0 };
pub const CALL_TERMINATE_SECS: ParameterRange = ParameterRange { min: 30.0, max: 1800.0, step: 30.0, default: 90.0 };
pub const ENDPOINTING_MS: ParameterRange = ParameterRange { min: 100.0, max: 1000.0, step: 50.0, default: 250.0 };

/// Whole catalog, serialized for `GET /api/catalog`.
#[derive(Debug, Serialize)]
pub struct Catalog {
    pub llm: Vec<ProviderOptions>,
    pub synthesizer: Vec<SynthesizerOptions>,
    pub transcriber: Vec<TranscriberOptions>,
    pub telephony: Vec<TelephonyOptions>,
    pub synthesizer_formats: &'static [&'static str],
    pub sampling_rates: &'static [u32],
    pub ranges: Ranges,
}

#[derive(Debug, Serialize)]
pub struct ProviderOptions {
    pub provider: LlmProvider,
    pub label: &'static str,
    pub models: &'static [ModelOption],
}

#[derive(Debug, Serialize)]
pub struct SynthesizerOptions {
    pub provider: SynthesizerProvider,
    pub voices: &'static [VoiceOption],
    pub engines: &'static [ModelOption],
}

#[derive(Debug, Serialize)]
pub struct TranscriberOptions {
    pub provider: TranscriberProvider,
    pub models: &'static [ModelOption],
    pub languages: &'static [ModelOption],
}

#[derive(Debug, Serialize)]
pub struct TelephonyOptions {
    pub provider: TelephonyProvider,
    pub audio_format: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Ranges {
    pub temperature: ParameterRange,
    pub max_tokens: ParameterRange,
    pub top_p: ParameterRange,
    pub frequency_penalty: ParameterRange,
    pub presence_penalty: ParameterRange,
    pub hangup_after_silence: ParameterRange,
    pub interruption_words: ParameterRange,
    pub call_terminate: ParameterRange,
    pub endpointing: ParameterRange,
}

pub fn catalog() -> Catalog {
    Catalog {
        llm: LlmProvider::ALL
            .iter()
            .map(|p| ProviderOptions {
                provider: *p,
                label: p.label(),
                models: p.models(),
            })
            .collect(),
        synthesizer: SynthesizerProvider::ALL
            .iter()
            .map(|p| SynthesizerOptions {
                provider: *p,
                voices: p.voices(),
                engines: p.engines(),
            })
            .collect(),
        transcriber: TranscriberProvider::ALL
            .iter()
            .map(|p| TranscriberOptions {
                provider: *p,
                models: p.models(),
                languages: p.languages(),
            })
            .collect(),
        telephony: TelephonyProvider::ALL
            .iter()
            .map(|p| TelephonyOptions {
                provider: *p,
                audio_format: p.audio_format(),
            })
            .collect(),
        synthesizer_formats: &SYNTHESIZER_FORMATS,
        sampling_rates: &SAMPLING_RATES,
        ranges: Ranges {
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
            frequency_penalty: FREQUENCY_PENALTY,
            presence_penalty: PRESENCE_PENALTY,
            hangup_after_silence: HANGUP_AFTER_SILENCE_SECS,
            interruption_words: INTERRUPTION_WORDS,
            call_terminate: CALL_TERMINATE_SECS,
            endpointing: ENDPOINTING_MS,
        },
    }
}
