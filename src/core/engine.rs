use crate::core::capability::{CapabilityGate, PromptTemplate};
use crate::core::code_example::CodeExampleStrategy;
use crate::core::eli5::{Eli5Strategy, ReplacementTable};
use crate::core::technical::TechnicalStrategy;
use crate::core::tldr::TldrStrategy;
use crate::core::{Action, ConfigProvider, RewriteResult, RewriteStrategy};
use crate::utils::error::Result;

/// 無狀態的改寫引擎：先嘗試可選後端，失敗時改用各自的規則式策略。
pub struct RewriteEngine {
    eli5: Box<dyn RewriteStrategy>,
    tldr: Box<dyn RewriteStrategy>,
    code: Box<dyn RewriteStrategy>,
    technical: Box<dyn RewriteStrategy>,
    gate: CapabilityGate,
}

impl RewriteEngine {
    pub fn new(gate: CapabilityGate) -> Result<Self> {
        Ok(Self {
            eli5: Box::new(Eli5Strategy::new(ReplacementTable::canonical()?)),
            tldr: Box::new(TldrStrategy::default()),
            code: Box::new(CodeExampleStrategy),
            technical: Box::new(TechnicalStrategy),
            gate,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C, gate: CapabilityGate) -> Result<Self> {
        Ok(Self::new(gate)?.with_strategy(Box::new(TldrStrategy::new(
            config.tldr_max_sentences(),
            config.words_per_minute(),
        ))))
    }

    /// 僅規則式，不接後端
    pub fn heuristic_only() -> Result<Self> {
        Self::new(CapabilityGate::disabled())
    }

    /// 以自訂策略取代 `strategy.action()` 對應的規則式策略
    pub fn with_strategy(mut self, strategy: Box<dyn RewriteStrategy>) -> Self {
        let slot = match strategy.action() {
            Action::Eli5 => &mut self.eli5,
            Action::Tldr => &mut self.tldr,
            Action::CodeExample => &mut self.code,
            Action::Technical => &mut self.technical,
        };
        *slot = strategy;
        self
    }

    pub fn strategy(&self, action: Action) -> &dyn RewriteStrategy {
        match action {
            Action::Eli5 => self.eli5.as_ref(),
            Action::Tldr => self.tldr.as_ref(),
            Action::CodeExample => self.code.as_ref(),
            Action::Technical => self.technical.as_ref(),
        }
    }

    pub fn gate(&self) -> &CapabilityGate {
        &self.gate
    }

    pub async fn rewrite(&self, action: Action, text: &str) -> Result<RewriteResult> {
        if let Some(generated) = self
            .gate
            .try_generate(PromptTemplate::for_action(action), text)
            .await
        {
            tracing::debug!("{} served by smart backend", action);
            return Ok(RewriteResult::new(action, generated));
        }

        self.strategy(action).rewrite(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Availability, CapabilityBackend, ResultKind};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct EchoBackend;

    #[async_trait]
    impl CapabilityBackend for EchoBackend {
        fn name(&self) -> &str {
            "echo"
        }

        async fn availability(&self) -> Result<Availability> {
            Ok(Availability::Ready)
        }

        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok("  generated answer  ".to_string())
        }
    }

    #[test]
    fn test_strategy_lookup_matches_action() {
        let engine = RewriteEngine::heuristic_only().unwrap();
        for action in Action::ALL {
            assert_eq!(engine.strategy(action).action(), action);
        }
    }

    #[tokio::test]
    async fn test_backend_output_takes_precedence() {
        let engine = RewriteEngine::new(CapabilityGate::new(Arc::new(EchoBackend))).unwrap();
        let result = engine
            .rewrite(Action::CodeExample, "Arrays hold values.")
            .await
            .unwrap();

        assert_eq!(result.body, "generated answer");
        assert_eq!(result.kind, ResultKind::Code);
        assert_eq!(result.title, "Code Example");
    }

    struct ShoutingTldr;

    impl RewriteStrategy for ShoutingTldr {
        fn action(&self) -> Action {
            Action::Tldr
        }

        fn rewrite(&self, text: &str) -> Result<RewriteResult> {
            Ok(RewriteResult::new(Action::Tldr, text.to_uppercase()))
        }
    }

    #[test]
    fn test_with_strategy_replaces_only_its_action() {
        let engine = RewriteEngine::heuristic_only()
            .unwrap()
            .with_strategy(Box::new(ShoutingTldr));

        let tldr = tokio_test::block_on(engine.rewrite(Action::Tldr, "quiet words.")).unwrap();
        assert_eq!(tldr.body, "QUIET WORDS.");

        let technical =
            tokio_test::block_on(engine.rewrite(Action::Technical, "quiet words.")).unwrap();
        assert!(technical.body.starts_with("🔧 Core concept: quiet words."));
    }

    #[test]
    fn test_heuristic_used_without_backend() {
        let engine = RewriteEngine::heuristic_only().unwrap();
        let result =
            tokio_test::block_on(engine.rewrite(Action::Tldr, "Only one sentence here.")).unwrap();
        assert_eq!(result.body, "Only one sentence here.");
    }
}
