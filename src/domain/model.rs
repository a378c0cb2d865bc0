use serde::{Deserialize, Serialize};
use std::fmt;

/// 四種改寫模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Eli5,
    Tldr,
    CodeExample,
    Technical,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Eli5,
        Action::Tldr,
        Action::CodeExample,
        Action::Technical,
    ];

    /// 選單/訊息使用的識別碼
    pub fn id(&self) -> &'static str {
        match self {
            Action::Eli5 => "simplify-eli5",
            Action::Tldr => "simplify-tldr",
            Action::CodeExample => "simplify-code",
            Action::Technical => "simplify-technical",
        }
    }

    /// 解析識別碼，也接受 CLI 使用的短名稱（不分大小寫）。
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim().to_ascii_lowercase();
        let id = id.strip_prefix("simplify-").unwrap_or(&id);
        match id {
            "eli5" => Some(Action::Eli5),
            "tldr" => Some(Action::Tldr),
            "code" | "code-example" => Some(Action::CodeExample),
            "technical" => Some(Action::Technical),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Action::Eli5 => "ELI5 Explanation",
            Action::Tldr => "TLDR Summary",
            Action::CodeExample => "Code Example",
            Action::Technical => "Technical Explanation",
        }
    }

    pub fn kind(&self) -> ResultKind {
        match self {
            Action::CodeExample => ResultKind::Code,
            _ => ResultKind::PlainText,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// 未知動作時使用的通用標題
pub const FALLBACK_TITLE: &str = "Result";

/// 觸發來源送進 Router 的訊息 `{ action, text }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRequest {
    pub action: String,
    pub text: String,
}

impl RewriteRequest {
    pub fn new(action: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            text: text.into(),
        }
    }

    pub fn parsed_action(&self) -> Option<Action> {
        Action::from_id(&self.action)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultKind {
    PlainText,
    Code,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteResult {
    pub title: String,
    pub body: String,
    pub kind: ResultKind,
    /// 附加說明（例如 TLDR 的字數統計），不屬於正文
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl RewriteResult {
    pub fn new(action: Action, body: impl Into<String>) -> Self {
        Self {
            title: action.title().to_string(),
            body: body.into(),
            kind: action.kind(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// TLDR 擷取時的單句分數，不會被保存
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceScore {
    pub index: usize,
    pub sentence: String,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ModalState {
    Hidden,
    Loading,
    Shown(RewriteResult),
    Error { title: String, message: String },
}

impl ModalState {
    pub fn is_hidden(&self) -> bool {
        matches!(self, ModalState::Hidden)
    }
}
