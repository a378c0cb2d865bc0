use crate::core::router::UserError;
use crate::core::{CopyTarget, ModalRenderer, ModalState, RewriteResult};
use crate::utils::error::Result;

pub const COPY_FEEDBACK: &str = "✓ Copied!";

/// 每個被接受的請求拿到一張票；只有最新一張能把結果顯示出來。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Overlay,
    CloseButton,
    CloseAction,
}

/// 單一實例的彈窗狀態機：Hidden → Loading → Shown/Error → Hidden。
/// 每次轉換都重新產生唯一的可見畫面，舊的畫面直接被取代。
pub struct PresentationController<R: ModalRenderer> {
    state: ModalState,
    generation: u64,
    renderer: R,
    surface: Option<String>,
}

impl<R: ModalRenderer> PresentationController<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            state: ModalState::Hidden,
            generation: 0,
            renderer,
            surface: None,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn surface(&self) -> Option<&str> {
        self.surface.as_deref()
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    pub fn begin_loading(&mut self) -> Ticket {
        self.generation += 1;
        self.transition(ModalState::Loading);
        Ticket(self.generation)
    }

    /// 新請求在驗證階段就被拒絕；同時讓仍在處理中的舊請求失效。
    pub fn reject(&mut self, error: &UserError) {
        self.generation += 1;
        self.show_error(error);
    }

    /// 套用 Router 的結果；過期的票或已不在 Loading 狀態時忽略並回傳 `false`。
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: std::result::Result<RewriteResult, UserError>,
    ) -> bool {
        if !self.is_current(ticket) || self.state != ModalState::Loading {
            tracing::debug!(
                "Dropping stale result (ticket {}, current {}, state {:?})",
                ticket.0,
                self.generation,
                self.state
            );
            return false;
        }

        match outcome {
            Ok(result) => self.transition(ModalState::Shown(result)),
            Err(error) => self.show_error(&error),
        }
        true
    }

    pub fn dismiss(&mut self, reason: DismissReason) -> bool {
        match self.state {
            ModalState::Shown(_) | ModalState::Error { .. } => {
                tracing::debug!("Modal dismissed via {:?}", reason);
                self.transition(ModalState::Hidden);
                true
            }
            // Loading 畫面沒有關閉按鈕
            ModalState::Loading | ModalState::Hidden => false,
        }
    }

    /// 只有在 Shown 時可複製；狀態不變，回傳暫時的按鈕回饋文字。
    pub fn copy(&self, target: &mut dyn CopyTarget) -> Result<Option<&'static str>> {
        match &self.state {
            ModalState::Shown(result) => {
                target.write_text(&result.body)?;
                Ok(Some(COPY_FEEDBACK))
            }
            _ => Ok(None),
        }
    }

    fn show_error(&mut self, error: &UserError) {
        self.transition(ModalState::Error {
            title: error.title().to_string(),
            message: error.message(),
        });
    }

    fn transition(&mut self, next: ModalState) {
        tracing::debug!("Modal {:?} -> {:?}", state_name(&self.state), state_name(&next));
        self.state = next;
        self.surface = self.renderer.render(&self.state);
    }
}

fn state_name(state: &ModalState) -> &'static str {
    match state {
        ModalState::Hidden => "hidden",
        ModalState::Loading => "loading",
        ModalState::Shown(_) => "shown",
        ModalState::Error { .. } => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::selection::ValidationError;
    use crate::core::Action;

    struct NameRenderer;

    impl ModalRenderer for NameRenderer {
        fn render(&self, state: &ModalState) -> Option<String> {
            match state {
                ModalState::Hidden => None,
                other => Some(state_name(other).to_string()),
            }
        }
    }

    #[derive(Default)]
    struct Clipboard(Vec<String>);

    impl CopyTarget for Clipboard {
        fn write_text(&mut self, text: &str) -> Result<()> {
            self.0.push(text.to_string());
            Ok(())
        }
    }

    fn result() -> RewriteResult {
        RewriteResult::new(Action::Tldr, "Short summary.")
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut modal = PresentationController::new(NameRenderer);
        assert!(modal.state().is_hidden());
        assert_eq!(modal.surface(), None);

        let ticket = modal.begin_loading();
        assert_eq!(modal.state(), &ModalState::Loading);
        assert_eq!(modal.surface(), Some("loading"));

        assert!(modal.complete(ticket, Ok(result())));
        assert_eq!(modal.state(), &ModalState::Shown(result()));

        assert!(modal.dismiss(DismissReason::Overlay));
        assert!(modal.state().is_hidden());
        assert_eq!(modal.surface(), None);
    }

    #[test]
    fn test_rejection_from_hidden_and_shown() {
        let mut modal = PresentationController::new(NameRenderer);
        modal.reject(&UserError::Validation(ValidationError::TooShort));
        assert_eq!(
            modal.state(),
            &ModalState::Error {
                title: "Selection Too Short".to_string(),
                message: "Please select at least 10 characters of text to simplify.".to_string(),
            }
        );

        let ticket = modal.begin_loading();
        modal.complete(ticket, Ok(result()));
        modal.reject(&UserError::Validation(ValidationError::TooLong));
        assert!(matches!(modal.state(), ModalState::Error { title, .. } if title == "Selection Too Long"));
    }

    #[test]
    fn test_router_failure_shows_error() {
        let mut modal = PresentationController::new(NameRenderer);
        let ticket = modal.begin_loading();
        assert!(modal.complete(ticket, Err(UserError::Processing)));
        assert!(matches!(modal.state(), ModalState::Error { title, .. } if title == "Error"));
        assert!(modal.dismiss(DismissReason::CloseButton));
    }

    #[test]
    fn test_newer_request_supersedes_older_result() {
        let mut modal = PresentationController::new(NameRenderer);
        let first = modal.begin_loading();
        let second = modal.begin_loading();

        assert!(!modal.complete(first, Ok(result())));
        assert_eq!(modal.state(), &ModalState::Loading);
        assert!(modal.complete(second, Ok(result())));
    }

    #[test]
    fn test_result_after_dismissal_is_dropped() {
        let mut modal = PresentationController::new(NameRenderer);
        let ticket = modal.begin_loading();
        modal.complete(ticket, Err(UserError::Processing));
        modal.dismiss(DismissReason::CloseAction);

        assert!(!modal.complete(ticket, Ok(result())));
        assert!(modal.state().is_hidden());
    }

    #[test]
    fn test_loading_cannot_be_dismissed() {
        let mut modal = PresentationController::new(NameRenderer);
        modal.begin_loading();
        assert!(!modal.dismiss(DismissReason::Overlay));
        assert_eq!(modal.state(), &ModalState::Loading);
        assert!(!PresentationController::new(NameRenderer).dismiss(DismissReason::Overlay));
    }

    #[test]
    fn test_copy_only_when_shown() {
        let mut clipboard = Clipboard::default();
        let mut modal = PresentationController::new(NameRenderer);
        assert_eq!(modal.copy(&mut clipboard).unwrap(), None);

        let ticket = modal.begin_loading();
        assert_eq!(modal.copy(&mut clipboard).unwrap(), None);

        modal.complete(ticket, Ok(result()));
        assert_eq!(modal.copy(&mut clipboard).unwrap(), Some(COPY_FEEDBACK));
        assert_eq!(clipboard.0, vec!["Short summary.".to_string()]);
        assert_eq!(modal.state(), &ModalState::Shown(result()));
    }
}
