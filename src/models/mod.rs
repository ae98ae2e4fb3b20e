pub mod assistant;
pub mod call;
pub mod page;
pub mod phone_number;
pub mod user;

pub use assistant::{
    Assistant, AssistantStatus, CreateAssistantRequest, IoConfig, LlmConfig, SynthesizerConfig,
    TaskConfig, TranscriberConfig, UpdateAssistantRequest,
};
pub use call::{CallRecord, CallStatus, SampleCallRequest};
pub use page::{ListQuery, Page};
pub use phone_number::{AvailableNumber, PhoneNumber, PhoneNumberStatus};
pub use user::{ApprovalStatus, User};
