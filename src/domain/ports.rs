use crate::domain::model::{Action, ModalState, RewriteResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 後端是否已準備好產生內容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Ready,
    NotReady,
}

/// 可選的生成式改寫後端
#[async_trait]
pub trait CapabilityBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn availability(&self) -> Result<Availability>;

    async fn generate(&self, prompt: &str) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn request_delay(&self) -> Duration;
    fn tldr_max_sentences(&self) -> usize;
    fn words_per_minute(&self) -> u32;
}

/// 依 `ModalState` 產生可見畫面；`Hidden` 不產生任何內容。
pub trait ModalRenderer: Send + Sync {
    fn render(&self, state: &ModalState) -> Option<String>;
}

pub trait CopyTarget {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// 規則式改寫策略；必須是純函式，不得有 I/O 或共享可變狀態。
pub trait RewriteStrategy: Send + Sync {
    fn action(&self) -> Action;

    fn rewrite(&self, text: &str) -> Result<RewriteResult>;
}
