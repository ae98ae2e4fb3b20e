pub mod drafts;
pub mod user;
pub mod validation;
pub mod wizard;

pub use drafts::DraftStore;
pub use validation::FieldErrors;
pub use wizard::{AssistantWizard, WizardPatch, WizardStep};
