use crate::core::{ModalRenderer, ModalState, ResultKind};

/// 終端機輸出用的純文字畫面
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    width: usize,
}

impl TextRenderer {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(20),
        }
    }

    fn rule(&self) -> String {
        "─".repeat(self.width)
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(60)
    }
}

impl ModalRenderer for TextRenderer {
    fn render(&self, state: &ModalState) -> Option<String> {
        let rule = self.rule();
        match state {
            ModalState::Hidden => None,
            ModalState::Loading => Some("⏳ Processing... Simplifying your text".to_string()),
            ModalState::Shown(result) => {
                let body = match result.kind {
                    // 程式碼原樣輸出並縮排
                    ResultKind::Code => result
                        .body
                        .lines()
                        .map(|line| format!("    {}", line).trim_end().to_string())
                        .collect::<Vec<_>>()
                        .join("\n"),
                    ResultKind::PlainText => result.body.clone(),
                };
                let mut out = format!("{}\n{}\n{}\n{}", result.title, rule, body, rule);
                if let Some(details) = &result.details {
                    out.push('\n');
                    out.push_str(details);
                }
                Some(out)
            }
            ModalState::Error { title, message } => {
                Some(format!("⚠️ {}\n{}\n{}", title, rule, message))
            }
        }
    }
}
