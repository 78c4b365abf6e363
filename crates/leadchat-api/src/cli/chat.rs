//! Interactive terminal chat.
//!
//! Drives one session through the same controller the HTTP API uses: a
//! spinner while the assistant thinks, and a four-field lead form when the
//! lead gate fires. A failed notification can be retried with the same
//! details; declining ends the chat, since the session cannot continue
//! until the lead is captured.

use std::time::Duration;

use console::style;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};

use leadchat_core::chat::controller::{ConversationController, MessageOutcome};
use leadchat_core::chat::session::SessionState;
use leadchat_core::notify::notifier::LeadNotifier;
use leadchat_types::chat::{MessageRole, Turn};
use leadchat_types::config::AppConfig;
use leadchat_types::error::ConversationError;
use leadchat_types::lead::LeadInfo;

use crate::state::build_controller;

/// Run an interactive chat session until the user exits.
pub async fn run_chat(config: &AppConfig) -> anyhow::Result<()> {
    let controller = build_controller(config)?;
    let mut session = controller.start_session();

    print_banner(config, &session);
    for turn in session.turns() {
        print_turn(turn);
    }

    loop {
        let input = match Input::<String>::new()
            .with_prompt(format!("{}", style("You").green().bold()))
            .allow_empty(true)
            .interact_text()
        {
            Ok(input) => input,
            // Ctrl+D / closed stdin
            Err(_) => break,
        };

        let text = input.trim();
        if text.is_empty() {
            continue;
        }
        if matches!(text, "/quit" | "/exit") {
            break;
        }

        let spinner = spinner("Thinking...")?;
        let outcome = controller.handle_user_message(&mut session, text).await;
        spinner.finish_and_clear();

        match outcome? {
            MessageOutcome::Replied(turn) => print_turn(&turn),
            MessageOutcome::LeadRequired => {
                if !capture_lead(&controller, &mut session).await? {
                    println!(
                        "  {}",
                        style("Chat ended before your details were shared.").dim()
                    );
                    break;
                }
            }
        }
    }

    println!();
    println!("  {}", style("Goodbye!").dim());
    Ok(())
}

/// Show the lead form and submit it, offering retries on delivery failure.
///
/// Returns false if the user gives up.
async fn capture_lead<N: LeadNotifier>(
    controller: &ConversationController<N>,
    session: &mut SessionState,
) -> anyhow::Result<bool> {
    println!();
    println!(
        "  {}",
        style("Before we continue, please share your contact details.").cyan()
    );
    let lead = prompt_lead()?;

    loop {
        let spinner = spinner("Sending your details...")?;
        let result = controller.submit_lead_info(session, lead.clone()).await;
        spinner.finish_and_clear();

        match result {
            Ok(captured) => {
                for turn in captured.into_turns() {
                    print_turn(&turn);
                }
                return Ok(true);
            }
            Err(ConversationError::Notify(e)) => {
                eprintln!(
                    "  {} Error sending your details: {}",
                    style("!").red().bold(),
                    e
                );
                let retry = Confirm::new()
                    .with_prompt("  Try again?")
                    .default(true)
                    .interact()?;
                if !retry {
                    return Ok(false);
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn prompt_lead() -> anyhow::Result<LeadInfo> {
    let field = |label: &str| -> anyhow::Result<String> {
        Ok(Input::<String>::new()
            .with_prompt(format!("  {label}"))
            .allow_empty(true)
            .interact_text()?)
    };

    Ok(LeadInfo {
        name: field("Name")?,
        company: field("Company")?,
        phone: field("Phone")?,
        email: field("Email")?,
    })
}

fn spinner(message: &'static str) -> anyhow::Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}

fn print_banner(config: &AppConfig, session: &SessionState) {
    let session_id = session.id().to_string();

    println!();
    println!("  {}", style(&config.chat.welcome_banner).cyan().bold());
    println!("  {}", style(&config.chat.product_name).dim());
    println!();
    println!(
        "  {}  {}",
        style("Model:").bold(),
        style(&config.llm.model).dim()
    );
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!();
    println!("  {}", style("Type /quit or press Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}

fn print_turn(turn: &Turn) {
    let label = match turn.role {
        MessageRole::Assistant => style("Assistant").cyan().bold(),
        MessageRole::User => style("You").green().bold(),
        MessageRole::System => style("System").dim(),
    };
    println!("{label}: {}", turn.content);
    println!();
}
