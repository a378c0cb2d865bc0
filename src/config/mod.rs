pub mod toml_config;

pub use toml_config::SimplifierConfig;

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "devdocs-simplifier")]
#[command(about = "Rewrite selected documentation text: ELI5, TLDR, code example or technical")]
pub struct CliConfig {
    /// Action id (simplify-eli5, simplify-tldr, simplify-code, simplify-technical) or short name
    #[arg(short, long, default_value = "simplify-eli5")]
    pub action: String,

    /// Selected text; read from stdin when no other input is given
    #[arg(short, long, conflicts_with_all = ["file", "message"])]
    pub text: Option<String>,

    /// Read the selection from a file
    #[arg(short, long, conflicts_with = "message")]
    pub file: Option<PathBuf>,

    /// Read a JSON request message {"action": ..., "text": ...}
    #[arg(short, long)]
    pub message: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Override the artificial loading delay
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Never call the smart backend, even if the config enables it
    #[arg(long)]
    pub no_backend: bool,

    /// Also write the result body to this file (copy action)
    #[arg(long)]
    pub copy_to: Option<PathBuf>,

    /// Print the available menu actions and exit
    #[arg(long)]
    pub list_actions: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列參數覆蓋檔案設定
    pub fn apply_overrides(&self, config: &mut SimplifierConfig) {
        if let Some(delay) = self.delay_ms {
            config.router.delay_ms = Some(delay);
            tracing::debug!("🔧 Delay overridden to: {}ms", delay);
        }
        if self.no_backend {
            config.backend.enabled = Some(false);
            tracing::debug!("🔧 Smart backend disabled from command line");
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use std::time::Duration;

    #[test]
    fn test_cli_overrides_file_config() {
        let cli = CliConfig::parse_from([
            "devdocs-simplifier",
            "--action",
            "tldr",
            "--text",
            "Some selected text.",
            "--delay-ms",
            "0",
            "--no-backend",
        ]);
        let mut config = SimplifierConfig::from_toml_str(
            "[router]\ndelay_ms = 900\n[backend]\nenabled = true\n",
        )
        .unwrap();

        cli.apply_overrides(&mut config);
        assert_eq!(config.request_delay(), Duration::ZERO);
        assert!(!config.backend_enabled());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_text_and_file_conflict() {
        let parsed = CliConfig::try_parse_from([
            "devdocs-simplifier",
            "--text",
            "abc",
            "--file",
            "input.txt",
        ]);
        assert!(parsed.is_err());
    }
}
