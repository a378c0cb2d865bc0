// Adapters layer: concrete implementations of the domain ports (backend, renderers, copy targets).

pub mod clipboard;
pub mod html;
pub mod ollama;
pub mod terminal;

pub use clipboard::{FileClipboard, MemoryClipboard};
pub use html::{escape_html, HtmlRenderer};
pub use ollama::OllamaBackend;
pub use terminal::TextRenderer;
