use anyhow::Result;
use devdocs_simplifier::core::ConfigProvider;
use devdocs_simplifier::utils::validation::Validate;
use devdocs_simplifier::{RewriteRequest, SimplifierConfig, SimplifierSession, TextRenderer};
use tempfile::TempDir;

#[tokio::test]
async fn test_config_file_drives_tldr_length() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("simplifier.toml");
    tokio::fs::write(
        &config_path,
        r#"
[router]
delay_ms = 0

[tldr]
max_sentences = 1
words_per_minute = 100
"#,
    )
    .await?;

    let config = SimplifierConfig::from_file(&config_path)?;
    config.validate()?;
    assert_eq!(config.tldr_max_sentences(), 1);

    let router = config.build_router()?;
    let result = router
        .handle(RewriteRequest::new(
            "simplify-tldr",
            "Closures capture scope. They must be used with care. Plain filler sentence here.",
        ))
        .await
        .unwrap();

    assert_eq!(result.body, "Closures capture scope.");
    // 原文 13 字，摘要 3 字，100 wpm => 6 秒
    assert_eq!(
        result.details.as_deref(),
        Some("📊 Original: 13 words · Summary: 3 words · ~6s reading time saved")
    );
    Ok(())
}

#[tokio::test]
async fn test_text_surface_for_code_example() -> Result<()> {
    let config = SimplifierConfig::from_toml_str("[router]\ndelay_ms = 0\n")?;
    let session = SimplifierSession::new(config.build_router()?, TextRenderer::new(30));

    session
        .submit(RewriteRequest::new(
            "simplify-code",
            "An async function that awaits a promise.",
        ))
        .await;

    let surface = session.surface().await.unwrap();
    let mut lines = surface.lines();
    assert_eq!(lines.next(), Some("Code Example"));
    // "function" 比 "async" 優先
    assert!(surface.contains("    // Declaring a function"));
    Ok(())
}

#[test]
fn test_missing_config_file_is_io_error() {
    let err = SimplifierConfig::from_file("/definitely/not/here.toml").unwrap_err();
    assert_eq!(
        err.recovery_suggestion(),
        "Check that the input file exists and is readable"
    );
}
