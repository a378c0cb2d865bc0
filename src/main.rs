use clap::Parser;
use devdocs_simplifier::adapters::FileClipboard;
use devdocs_simplifier::core::selection::validate_selection;
use devdocs_simplifier::core::trigger::{on_selection, MENU_ITEMS};
use devdocs_simplifier::core::ModalRenderer;
use devdocs_simplifier::utils::{logger, validation::Validate};
use devdocs_simplifier::{
    CliConfig, HtmlRenderer, ModalState, OutputFormat, RequestRouter, RewriteRequest,
    SimplifierConfig, SimplifierError, SimplifierSession, TextRenderer,
};
use std::io::Read;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if cli.list_actions {
        for item in MENU_ITEMS {
            println!("{:<20} {}", item.id(), item.label);
        }
        return Ok(());
    }

    // 載入配置
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            match SimplifierConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => fail(&e),
            }
        }
        None => SimplifierConfig::default(),
    };
    cli.apply_overrides(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let request = match read_request(&cli) {
        Ok(Some(request)) => request,
        Ok(None) => {
            tracing::info!("Empty selection, nothing to do");
            return Ok(());
        }
        Err(e) => fail(&e),
    };

    let router = match config.build_router() {
        Ok(router) => router,
        Err(e) => fail(&e),
    };

    let exit_code = match cli.format {
        OutputFormat::Html => run(router, HtmlRenderer, request, &cli).await,
        OutputFormat::Text | OutputFormat::Json => {
            run(router, TextRenderer::default(), request, &cli).await
        }
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

async fn run<R: ModalRenderer>(
    router: RequestRouter,
    renderer: R,
    request: RewriteRequest,
    cli: &CliConfig,
) -> i32 {
    let rejected = validate_selection(&request.text).is_err();
    let session = SimplifierSession::new(router, renderer);
    session.submit(request).await;

    let state = session.state().await;
    if cli.format == OutputFormat::Json {
        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("❌ {}", SimplifierError::from(e).user_friendly_message());
                return 1;
            }
        }
    } else if let Some(surface) = session.surface().await {
        println!("{}", surface);
    }

    if let Some(path) = &cli.copy_to {
        let mut target = FileClipboard::new(path);
        match session.copy(&mut target).await {
            Ok(Some(feedback)) => tracing::info!("{} ({})", feedback, path.display()),
            Ok(None) => tracing::warn!("Nothing to copy, no result is shown"),
            Err(e) => tracing::error!("❌ Copy failed: {}", e),
        }
    }

    match state {
        ModalState::Shown(_) => 0,
        _ if rejected => 2,
        _ => 1,
    }
}

fn read_request(cli: &CliConfig) -> devdocs_simplifier::Result<Option<RewriteRequest>> {
    if let Some(path) = &cli.message {
        let raw = std::fs::read_to_string(path)?;
        let request: RewriteRequest = serde_json::from_str(&raw)?;
        return Ok(on_selection(&request.action, Some(&request.text)));
    }

    let text = match (&cli.text, &cli.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    Ok(on_selection(&cli.action, Some(&text)))
}

fn fail(e: &SimplifierError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(1);
}
