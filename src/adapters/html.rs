use crate::core::{ModalRenderer, ModalState, ResultKind, RewriteResult};

const MODAL_ID: &str = "devdocs-modal";

/// 將文字轉為 HTML 安全字串，所有插入畫面的內容都要經過這裡。
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 一般文字：空行分段、單一換行轉 `<br>`
fn format_paragraphs(text: &str) -> String {
    let paragraphs = text
        .split("\n\n")
        .map(|p| p.trim_matches('\n'))
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>", escape_html(p).replace('\n', "<br>")))
        .collect::<Vec<_>>()
        .join("");
    format!("<div class=\"devdocs-text\">{}</div>", paragraphs)
}

fn format_body(result: &RewriteResult) -> String {
    let mut body = match result.kind {
        ResultKind::Code => format!("<pre>{}</pre>", escape_html(&result.body)),
        ResultKind::PlainText => format_paragraphs(&result.body),
    };
    if let Some(details) = &result.details {
        body.push_str(&format!(
            "<p class=\"devdocs-details\">{}</p>",
            escape_html(details)
        ));
    }
    body
}

fn dialog(title: &str, body: &str, is_error: bool) -> String {
    let content_class = if is_error {
        "devdocs-content devdocs-error"
    } else {
        "devdocs-content"
    };
    format!(
        concat!(
            "<div id=\"{id}\">",
            "<div class=\"devdocs-overlay\"></div>",
            "<div class=\"{class}\">",
            "<div class=\"devdocs-header\"><h3>{title}</h3>",
            "<button class=\"devdocs-close\">&times;</button></div>",
            "<div class=\"devdocs-body\">{body}</div>",
            "<div class=\"devdocs-footer\">",
            "<button class=\"devdocs-btn-copy\">📋 Copy</button>",
            "<button class=\"devdocs-btn-close\">Close</button>",
            "</div></div></div>"
        ),
        id = MODAL_ID,
        class = content_class,
        title = escape_html(title),
        body = body,
    )
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl ModalRenderer for HtmlRenderer {
    fn render(&self, state: &ModalState) -> Option<String> {
        match state {
            ModalState::Hidden => None,
            ModalState::Loading => Some(format!(
                concat!(
                    "<div id=\"{}\">",
                    "<div class=\"devdocs-overlay\"></div>",
                    "<div class=\"devdocs-content devdocs-loading\">",
                    "<div class=\"devdocs-spinner\"></div>",
                    "<h3>Processing...</h3><p>Simplifying your text</p>",
                    "</div></div>"
                ),
                MODAL_ID
            )),
            ModalState::Shown(result) => Some(dialog(&result.title, &format_body(result), false)),
            ModalState::Error { title, message } => Some(dialog(
                title,
                &format!("<div class=\"devdocs-text\"><p>{}</p></div>", escape_html(message)),
                true,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Action;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_body_markup_is_escaped() {
        let result = RewriteResult::new(Action::Technical, "Use <div> & <span> tags.");
        let html = HtmlRenderer.render(&ModalState::Shown(result)).unwrap();

        assert!(html.contains("Use &lt;div&gt; &amp; &lt;span&gt; tags."));
        assert!(!html.contains("<div> &"));
        assert!(!html.contains("<span>"));
    }

    #[test]
    fn test_code_is_preformatted_verbatim() {
        let result = RewriteResult::new(Action::CodeExample, "if (a < b) {\n  run();\n}");
        let html = HtmlRenderer.render(&ModalState::Shown(result)).unwrap();
        assert!(html.contains("<pre>if (a &lt; b) {\n  run();\n}</pre>"));
        assert!(!html.contains("<br>"));
    }

    #[test]
    fn test_plain_text_reflows_paragraphs() {
        let result = RewriteResult::new(Action::Eli5, "Intro:\n\nline one\nline two")
            .with_details("stats");
        let html = HtmlRenderer.render(&ModalState::Shown(result)).unwrap();
        assert!(html.contains("<p>Intro:</p><p>line one<br>line two</p>"));
        assert!(html.contains("<p class=\"devdocs-details\">stats</p>"));
        assert!(html.contains("<h3>ELI5 Explanation</h3>"));
    }

    #[test]
    fn test_error_and_hidden_states() {
        let html = HtmlRenderer
            .render(&ModalState::Error {
                title: "Error".to_string(),
                message: "a < b".to_string(),
            })
            .unwrap();
        assert!(html.contains("devdocs-error"));
        assert!(html.contains("a &lt; b"));
        assert_eq!(HtmlRenderer.render(&ModalState::Hidden), None);
        assert!(HtmlRenderer
            .render(&ModalState::Loading)
            .unwrap()
            .contains("Processing..."));
    }
}
