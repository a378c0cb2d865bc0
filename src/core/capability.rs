use crate::core::{Action, Availability, CapabilityBackend};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

pub const DEFAULT_GENERATE_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// 每種動作送給生成式後端的提示詞
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub instruction: &'static str,
    pub answer_label: &'static str,
}

impl PromptTemplate {
    pub fn for_action(action: Action) -> Self {
        match action {
            Action::Eli5 => Self {
                instruction: "Explain this technical concept in very simple language, like you're talking to a 5-year-old child. Use everyday analogies:",
                answer_label: "Simple explanation:",
            },
            Action::Tldr => Self {
                instruction: "Provide a TLDR (Too Long Didn't Read) summary of this text. Be concise:",
                answer_label: "TLDR:",
            },
            Action::CodeExample => Self {
                instruction: "Create a practical JavaScript code example based on this concept:",
                answer_label: "Code:",
            },
            Action::Technical => Self {
                instruction: "Rewrite this technical text in clearer, more accessible language for developers:",
                answer_label: "Clearer version:",
            },
        }
    }

    pub fn render(&self, text: &str) -> String {
        format!("{}\n\n{}\n\n{}", self.instruction, text, self.answer_label)
    }
}

/// 可選後端的閘道。可用性只探測一次並快取；任何失敗都回傳 `None`，
/// 由呼叫端改走規則式改寫。
pub struct CapabilityGate {
    backend: Option<Arc<dyn CapabilityBackend>>,
    available: OnceCell<bool>,
    generate_timeout: Duration,
    probe_timeout: Duration,
}

impl CapabilityGate {
    pub fn new(backend: Arc<dyn CapabilityBackend>) -> Self {
        Self {
            backend: Some(backend),
            available: OnceCell::new(),
            generate_timeout: DEFAULT_GENERATE_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    pub fn disabled() -> Self {
        Self {
            backend: None,
            available: OnceCell::new(),
            generate_timeout: DEFAULT_GENERATE_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    pub fn with_timeouts(mut self, generate_timeout: Duration, probe_timeout: Duration) -> Self {
        self.generate_timeout = generate_timeout;
        self.probe_timeout = probe_timeout;
        self
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn is_available(&self) -> bool {
        let Some(backend) = &self.backend else {
            return false;
        };

        *self
            .available
            .get_or_init(|| async {
                let probe = tokio::time::timeout(self.probe_timeout, backend.availability()).await;
                let ready = matches!(probe, Ok(Ok(Availability::Ready)));
                match probe {
                    Ok(Ok(Availability::Ready)) => {
                        tracing::info!("✅ Using smart rewrite backend: {}", backend.name());
                    }
                    Ok(Ok(Availability::NotReady)) => {
                        tracing::info!("⚠️ Backend {} not ready, using fallback", backend.name());
                    }
                    Ok(Err(e)) => {
                        tracing::info!("⚠️ Backend {} not available ({}), using fallback", backend.name(), e);
                    }
                    Err(_) => {
                        tracing::info!("⚠️ Backend {} probe timed out, using fallback", backend.name());
                    }
                }
                ready
            })
            .await
    }

    pub async fn try_generate(&self, template: PromptTemplate, text: &str) -> Option<String> {
        if !self.is_available().await {
            return None;
        }
        let backend = Arc::clone(self.backend.as_ref()?);

        // 後端呼叫放在獨立 task，後端 panic 只會讓這次嘗試失敗
        let prompt = template.render(text);
        let task = tokio::spawn(async move { backend.generate(&prompt).await });
        let abort = task.abort_handle();

        match tokio::time::timeout(self.generate_timeout, task).await {
            Ok(Ok(Ok(output))) if !output.trim().is_empty() => Some(output.trim().to_string()),
            Ok(Ok(Ok(_))) => {
                tracing::debug!("Backend returned empty output, using fallback");
                None
            }
            Ok(Ok(Err(e))) => {
                tracing::debug!("Backend generation failed, using fallback: {}", e);
                None
            }
            Ok(Err(e)) => {
                tracing::debug!("Backend generation aborted, using fallback: {}", e);
                None
            }
            Err(_) => {
                abort.abort();
                tracing::debug!(
                    "Backend generation timed out after {:?}, using fallback",
                    self.generate_timeout
                );
                None
            }
        }
    }
}
