use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use zurt_agent::agent::http::HttpAssistantService;
use zurt_agent::config::AgentConfig;
use zurt_agent::input::{KeyAction, key_action};
use zurt_agent::models::{Message, MessageRole};
use zurt_agent::service::controller::ConversationController;

const BANNER: &str =
    "ZURT Agent (Enter sends, end a line with \\ for a newline, /open, /close, /locale <tag>, /quit)";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Logs go to stderr so they don't interleave with the transcript
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zurt_agent=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AgentConfig::from_env()?;
    info!("Assistant service at {} (locale {})", config.api_base_url, config.locale);

    let agent = HttpAssistantService::new(&config)?;
    let mut ctl = ConversationController::new(agent, &config.locale);

    println!("{BANNER}");
    ctl.expand().await;
    let mut shown = print_new(ctl.conversation().messages(), 0);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if ctl.conversation().draft().is_empty() {
            match line.trim() {
                "/quit" => break,
                "/close" => {
                    ctl.collapse();
                    println!("(panel closed)");
                    continue;
                }
                "/open" => {
                    ctl.expand().await;
                    shown = print_new(ctl.conversation().messages(), shown);
                    continue;
                }
                command => {
                    if let Some(tag) = command.strip_prefix("/locale ") {
                        ctl.conversation_mut().set_locale(tag.trim());
                        println!("(language {})", ctl.conversation().language());
                        continue;
                    }
                }
            }
        }

        if !ctl.is_expanded() {
            println!("(panel closed, /open to chat)");
            continue;
        }

        let (text, modifier) = match line.strip_suffix('\\') {
            Some(head) => (head, true),
            None => (line.as_str(), false),
        };
        let mut draft = ctl.conversation().draft().to_string();
        draft.push_str(text);

        match key_action("Enter", modifier) {
            KeyAction::InsertNewline => {
                draft.push('\n');
                ctl.conversation_mut().set_draft(draft);
            }
            KeyAction::Submit => {
                ctl.conversation_mut().set_draft(draft);
                if ctl.conversation().can_submit() {
                    println!("Thinking...");
                }
                if !ctl.send().await {
                    // Blank draft: nothing was sent, start the next line fresh
                    ctl.conversation_mut().set_draft(String::new());
                }
                shown = print_new(ctl.conversation().messages(), shown);
            }
            KeyAction::Ignore => {}
        }
    }

    Ok(())
}

/// Prints messages appended since `shown` and returns the new high-water mark.
fn print_new(messages: &[Message], shown: usize) -> usize {
    for msg in messages.iter().skip(shown) {
        let label = match msg.role {
            MessageRole::User => "you",
            MessageRole::Assistant => "agent",
        };
        println!("[{}] {label}: {}", msg.created_at.format("%H:%M"), msg.content);
    }
    messages.len()
}
