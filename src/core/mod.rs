pub mod capability;
pub mod code_example;
pub mod eli5;
pub mod engine;
pub mod presentation;
pub mod router;
pub mod selection;
pub mod session;
pub mod technical;
pub mod tldr;
pub mod trigger;

pub use crate::domain::model::{
    Action, ModalState, ResultKind, RewriteRequest, RewriteResult, SentenceScore, FALLBACK_TITLE,
};
pub use crate::domain::ports::{
    Availability, CapabilityBackend, ConfigProvider, CopyTarget, ModalRenderer, RewriteStrategy,
};
pub use crate::utils::error::Result;
