//! Verification example: deliver a demo tool result into a live Copilot tab.
//!
//! Start Chrome with `--remote-debugging-port=9222`, open the M365 Copilot
//! chat, then run. Confirms the locator chains still match the current UI.
//!
//! Usage: CHATBRIDGE_CDP_WS=ws://127.0.0.1:9222/devtools/browser/<id> \
//!        cargo run -p chatbridge-copilot --example deliver

use chatbridge_core::SiteAdapter;
use chatbridge_copilot::{CdpDriver, CopilotAdapter, COPILOT_HOSTNAME};
use chromiumoxide::Browser;
use futures::StreamExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatbridge=debug".into()),
        )
        .init();

    let ws_url = std::env::var("CHATBRIDGE_CDP_WS")
        .unwrap_or_else(|_| "ws://127.0.0.1:9222/devtools/browser".to_string());
    let (browser, mut handler) = Browser::connect(ws_url).await?;
    tokio::spawn(async move { while handler.next().await.is_some() {} });

    let mut target = None;
    for page in browser.pages().await? {
        if let Ok(Some(url)) = page.url().await {
            if url.contains(COPILOT_HOSTNAME) {
                target = Some(page);
                break;
            }
        }
    }
    let page = match target {
        Some(page) => page,
        None => {
            eprintln!("No tab on {COPILOT_HOSTNAME} found; open the Copilot chat first.");
            std::process::exit(1);
        }
    };

    let adapter = CopilotAdapter::new(CdpDriver::new(page));
    println!("Waiting for the chat UI...");
    if !adapter.ready(None).await {
        eprintln!("Chat UI never appeared (page markup may have drifted).");
        std::process::exit(1);
    }

    println!("Inserting demo tool result...");
    let value = serde_json::json!({ "tool": "deliver-example", "status": "ok" });
    if !adapter.insert_tool_result(&value).await {
        eprintln!("Insertion failed; see logs for the locator diagnostics.");
        std::process::exit(1);
    }

    match adapter.submit(None).await {
        true => println!("OK: submission triggered."),
        false => eprintln!("Submission failed."),
    }
    Ok(())
}
