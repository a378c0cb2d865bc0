use crate::core::engine::RewriteEngine;
use crate::core::selection::{validate_selection, ValidationError};
use crate::core::{Action, ConfigProvider, RewriteRequest, RewriteResult, FALLBACK_TITLE};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// 讓 Loading 畫面有機會顯示的人工延遲
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(600);

/// 回報給使用者的錯誤，標題與訊息皆固定
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Something went wrong processing your text. Please try again.")]
    Processing,
}

impl UserError {
    pub fn title(&self) -> &'static str {
        match self {
            UserError::Validation(reason) => reason.title(),
            UserError::Processing => "Error",
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

pub struct RequestRouter {
    engine: Arc<RewriteEngine>,
    delay: Duration,
}

impl RequestRouter {
    pub fn new(engine: Arc<RewriteEngine>) -> Self {
        Self {
            engine,
            delay: DEFAULT_REQUEST_DELAY,
        }
    }

    pub fn from_config<C: ConfigProvider>(engine: Arc<RewriteEngine>, config: &C) -> Self {
        Self::new(engine).with_delay(config.request_delay())
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn validate(&self, request: &RewriteRequest) -> Result<(), UserError> {
        validate_selection(&request.text).map_err(|reason| {
            tracing::debug!("Selection rejected: {:?}", reason);
            UserError::Validation(reason)
        })
    }

    /// 驗證後分派到對應策略；驗證失敗時不會執行任何策略。
    pub async fn handle(&self, request: RewriteRequest) -> Result<RewriteResult, UserError> {
        self.validate(&request)?;
        self.dispatch(request).await
    }

    /// 在延遲後執行策略。呼叫前應已通過 [`RequestRouter::validate`]。
    pub async fn dispatch(&self, request: RewriteRequest) -> Result<RewriteResult, UserError> {
        let requested = request.parsed_action();
        let action = requested.unwrap_or_else(|| {
            tracing::warn!(
                "Unknown action '{}', using technical explanation",
                request.action
            );
            Action::Technical
        });

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        tracing::info!("🚀 Processing {} ({} chars)", action, request.text.chars().count());

        // 在獨立 task 執行，策略 panic 也不會波及呼叫端
        let engine = Arc::clone(&self.engine);
        let text = request.text;
        let task = tokio::spawn(async move { engine.rewrite(action, &text).await });

        match task.await {
            Ok(Ok(mut result)) => {
                if requested.is_none() {
                    result.title = FALLBACK_TITLE.to_string();
                }
                tracing::info!("✅ {} ready ({} chars)", result.title, result.body.chars().count());
                Ok(result)
            }
            Ok(Err(e)) => {
                tracing::error!("❌ {} failed: {} (Category: {:?})", action, e, e.category());
                Err(UserError::Processing)
            }
            Err(e) => {
                tracing::error!("❌ {} aborted: {}", action, e);
                Err(UserError::Processing)
            }
        }
    }
}
