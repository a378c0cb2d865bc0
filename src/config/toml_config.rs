use crate::adapters::OllamaBackend;
use crate::core::capability::{CapabilityGate, DEFAULT_PROBE_TIMEOUT};
use crate::core::engine::RewriteEngine;
use crate::core::router::{RequestRouter, DEFAULT_REQUEST_DELAY};
use crate::core::tldr::{DEFAULT_MAX_SENTENCES, DEFAULT_WORDS_PER_MINUTE};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SimplifierError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BACKEND_ENDPOINT: &str = "http://localhost:11434";
pub const DEFAULT_BACKEND_MODEL: &str = "llama3.2";
pub const DEFAULT_BACKEND_TIMEOUT_SECONDS: u64 = 20;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimplifierConfig {
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub tldr: TldrConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouterConfig {
    pub delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TldrConfig {
    pub max_sentences: Option<usize>,
    pub words_per_minute: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    pub enabled: Option<bool>,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub probe_timeout_seconds: Option<u64>,
}

impl SimplifierConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SimplifierError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SimplifierError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OLLAMA_HOST})，未定義的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SimplifierError::ConfigError {
            message: format!("invalid env pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn backend_enabled(&self) -> bool {
        self.backend.enabled.unwrap_or(false)
    }

    pub fn backend_endpoint(&self) -> &str {
        self.backend
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_BACKEND_ENDPOINT)
    }

    pub fn backend_model(&self) -> &str {
        self.backend.model.as_deref().unwrap_or(DEFAULT_BACKEND_MODEL)
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(
            self.backend
                .timeout_seconds
                .unwrap_or(DEFAULT_BACKEND_TIMEOUT_SECONDS),
        )
    }

    pub fn probe_timeout(&self) -> Duration {
        self.backend
            .probe_timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_PROBE_TIMEOUT)
    }

    /// 依設定建立後端閘道；未啟用時回傳不接後端的閘道
    pub fn capability_gate(&self) -> Result<CapabilityGate> {
        if !self.backend_enabled() {
            return Ok(CapabilityGate::disabled());
        }

        let backend = OllamaBackend::new(
            self.backend_endpoint(),
            self.backend_model(),
            self.backend_timeout(),
        )?;
        tracing::debug!(
            "Smart backend configured: {} ({})",
            self.backend_endpoint(),
            self.backend_model()
        );

        Ok(CapabilityGate::new(Arc::new(backend))
            .with_timeouts(self.backend_timeout(), self.probe_timeout()))
    }

    /// 依設定組出 Router（含引擎與後端閘道）
    pub fn build_router(&self) -> Result<RequestRouter> {
        let engine = RewriteEngine::from_config(self, self.capability_gate()?)?;
        Ok(RequestRouter::from_config(Arc::new(engine), self))
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(delay) = self.router.delay_ms {
            validate_range("router.delay_ms", delay, 0, 10_000)?;
        }
        if let Some(max_sentences) = self.tldr.max_sentences {
            validate_range("tldr.max_sentences", max_sentences, 1, 10)?;
        }
        if let Some(wpm) = self.tldr.words_per_minute {
            validate_range("tldr.words_per_minute", wpm, 50, 1000)?;
        }

        if self.backend_enabled() {
            if self.backend_endpoint().trim().is_empty() {
                return Err(SimplifierError::MissingConfigError {
                    field: "backend.endpoint".to_string(),
                });
            }
            require_resolved("backend.endpoint", self.backend_endpoint())?;
            require_resolved("backend.model", self.backend_model())?;
            validate_url("backend.endpoint", self.backend_endpoint())?;
            validate_non_empty_string("backend.model", self.backend_model())?;
            if let Some(timeout) = self.backend.timeout_seconds {
                validate_positive_number("backend.timeout_seconds", timeout, 1)?;
            }
            if let Some(timeout) = self.backend.probe_timeout_seconds {
                validate_positive_number("backend.probe_timeout_seconds", timeout, 1)?;
            }
        }

        Ok(())
    }
}

/// 未定義的 `${VAR}` 會原樣留在值裡，代表必要設定沒有提供
fn require_resolved(field: &str, value: &str) -> Result<()> {
    if let Some(start) = value.find("${") {
        if let Some(len) = value[start..].find('}') {
            return Err(SimplifierError::MissingConfigError {
                field: format!("{} ({})", field, &value[start + 2..start + len]),
            });
        }
    }
    Ok(())
}

impl ConfigProvider for SimplifierConfig {
    fn request_delay(&self) -> Duration {
        self.router
            .delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REQUEST_DELAY)
    }

    fn tldr_max_sentences(&self) -> usize {
        self.tldr.max_sentences.unwrap_or(DEFAULT_MAX_SENTENCES)
    }

    fn words_per_minute(&self) -> u32 {
        self.tldr.words_per_minute.unwrap_or(DEFAULT_WORDS_PER_MINUTE)
    }
}

impl Validate for SimplifierConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_file() {
        let config = SimplifierConfig::default();
        assert_eq!(config.request_delay(), Duration::from_millis(600));
        assert_eq!(config.tldr_max_sentences(), 2);
        assert_eq!(config.words_per_minute(), 200);
        assert!(!config.backend_enabled());
        assert!(config.validate().is_ok());
        assert!(!config.capability_gate().unwrap().has_backend());
        assert_eq!(config.build_router().unwrap().delay(), Duration::from_millis(600));
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[router]
delay_ms = 0

[tldr]
max_sentences = 3
words_per_minute = 250

[backend]
enabled = true
endpoint = "http://127.0.0.1:11434"
model = "mistral"
timeout_seconds = 10
"#;

        let config = SimplifierConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.request_delay(), Duration::ZERO);
        assert_eq!(config.tldr_max_sentences(), 3);
        assert_eq!(config.words_per_minute(), 250);
        assert_eq!(config.backend_model(), "mistral");
        assert_eq!(config.backend_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
        assert!(config.capability_gate().unwrap().has_backend());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DEVDOCS_TEST_MODEL", "phi3");

        let config = SimplifierConfig::from_toml_str(
            r#"
[backend]
model = "${DEVDOCS_TEST_MODEL}"
endpoint = "${DEVDOCS_TEST_UNDEFINED_VAR}"
"#,
        )
        .unwrap();
        assert_eq!(config.backend_model(), "phi3");
        assert_eq!(config.backend_endpoint(), "${DEVDOCS_TEST_UNDEFINED_VAR}");

        std::env::remove_var("DEVDOCS_TEST_MODEL");
    }

    #[test]
    fn test_config_validation() {
        let bad_endpoint = SimplifierConfig::from_toml_str(
            r#"
[backend]
enabled = true
endpoint = "not-a-url"
"#,
        )
        .unwrap();
        assert!(bad_endpoint.validate().is_err());

        let bad_tldr = SimplifierConfig::from_toml_str("[tldr]\nmax_sentences = 0\n").unwrap();
        assert!(bad_tldr.validate().is_err());

        let bad_delay = SimplifierConfig::from_toml_str("[router]\ndelay_ms = 60000\n").unwrap();
        assert!(bad_delay.validate().is_err());
    }

    #[test]
    fn test_unresolved_endpoint_is_missing_config() {
        let config = SimplifierConfig::from_toml_str(
            r#"
[backend]
enabled = true
endpoint = "${DEVDOCS_TEST_UNSET_HOST}"
"#,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, SimplifierError::MissingConfigError { .. }));
        assert!(err.to_string().contains("backend.endpoint (DEVDOCS_TEST_UNSET_HOST)"));
        assert_eq!(err.recovery_suggestion(), "Add the missing field to the config file");

        let empty = SimplifierConfig::from_toml_str("[backend]\nenabled = true\nendpoint = \"\"\n")
            .unwrap();
        assert!(matches!(
            empty.validate(),
            Err(SimplifierError::MissingConfigError { .. })
        ));

        // 未啟用後端時不檢查
        let disabled = SimplifierConfig::from_toml_str(
            "[backend]\nendpoint = \"${DEVDOCS_TEST_UNSET_HOST}\"\n",
        )
        .unwrap();
        assert!(disabled.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = SimplifierConfig::from_toml_str("[router\n").unwrap_err();
        assert!(matches!(err, SimplifierError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[tldr]\nmax_sentences = 4\n")
            .unwrap();

        let config = SimplifierConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.tldr_max_sentences(), 4);
    }
}
