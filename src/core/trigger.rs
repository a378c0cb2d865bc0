use crate::core::{Action, RewriteRequest};

/// 選取文字時出現的選單項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub action: Action,
    pub label: &'static str,
}

impl MenuItem {
    pub fn id(&self) -> &'static str {
        self.action.id()
    }
}

pub const MENU_ITEMS: [MenuItem; 4] = [
    MenuItem {
        action: Action::Eli5,
        label: "🎈 ELI5 (Explain Like I'm 5)",
    },
    MenuItem {
        action: Action::Tldr,
        label: "⚡ TLDR (Quick Summary)",
    },
    MenuItem {
        action: Action::CodeExample,
        label: "💻 Show Me Code Example",
    },
    MenuItem {
        action: Action::Technical,
        label: "🔧 Technical Explanation",
    },
];

/// 把選單點擊轉成請求訊息。沒有選取或選取為空時不轉送。
pub fn on_selection(menu_id: &str, selection: Option<&str>) -> Option<RewriteRequest> {
    let text = selection.filter(|s| !s.is_empty())?;
    tracing::debug!("Menu clicked: {}", menu_id);
    Some(RewriteRequest::new(menu_id, text))
}
