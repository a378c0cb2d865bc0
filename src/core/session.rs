use crate::core::presentation::{DismissReason, PresentationController};
use crate::core::router::RequestRouter;
use crate::core::trigger::on_selection;
use crate::core::{CopyTarget, ModalRenderer, ModalState, RewriteRequest};
use crate::utils::error::Result;
use tokio::sync::Mutex;

/// 串接 觸發 → Router → 彈窗 的單一使用者工作階段。
///
/// 請求不排隊：較新的請求會讓仍在處理中的舊請求失效，舊結果到達時直接丟棄。
pub struct SimplifierSession<R: ModalRenderer> {
    router: RequestRouter,
    modal: Mutex<PresentationController<R>>,
}

impl<R: ModalRenderer> SimplifierSession<R> {
    pub fn new(router: RequestRouter, renderer: R) -> Self {
        Self {
            router,
            modal: Mutex::new(PresentationController::new(renderer)),
        }
    }

    /// 選單點擊入口；空選取不做任何事並回傳 `false`。
    pub async fn on_menu_click(&self, menu_id: &str, selection: Option<&str>) -> bool {
        match on_selection(menu_id, selection) {
            Some(request) => {
                self.submit(request).await;
                true
            }
            None => {
                tracing::debug!("Empty selection for {}, ignoring", menu_id);
                false
            }
        }
    }

    /// 處理一個請求，回傳結果是否真的顯示出來（被較新請求取代時為 `false`）。
    pub async fn submit(&self, request: RewriteRequest) -> bool {
        tracing::info!("📨 Request received: {}", request.action);

        if let Err(error) = self.router.validate(&request) {
            self.modal.lock().await.reject(&error);
            return true;
        }

        let ticket = self.modal.lock().await.begin_loading();
        // 等待期間不持有鎖，讓新請求可以取代畫面
        let outcome = self.router.dispatch(request).await;
        self.modal.lock().await.complete(ticket, outcome)
    }

    pub async fn dismiss(&self, reason: DismissReason) -> bool {
        self.modal.lock().await.dismiss(reason)
    }

    pub async fn copy(&self, target: &mut dyn CopyTarget) -> Result<Option<&'static str>> {
        self.modal.lock().await.copy(target)
    }

    pub async fn state(&self) -> ModalState {
        self.modal.lock().await.state().clone()
    }

    pub async fn surface(&self) -> Option<String> {
        self.modal.lock().await.surface().map(str::to_string)
    }
}
