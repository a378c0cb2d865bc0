pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use adapters::{HtmlRenderer, MemoryClipboard, OllamaBackend, TextRenderer};
pub use config::SimplifierConfig;
pub use core::{
    engine::RewriteEngine, router::RequestRouter, router::UserError, session::SimplifierSession,
    Action, ModalState, ResultKind, RewriteRequest, RewriteResult,
};
pub use utils::error::{Result, SimplifierError};
