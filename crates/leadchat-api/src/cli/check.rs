//! `leadchat check`: verify provider and SMTP credentials end to end.

use std::io::Write;

use anyhow::bail;
use console::style;

use leadchat_infra::llm::{create_provider, test_provider_connection};
use leadchat_infra::notify::smtp::{SmtpLeadNotifier, SmtpNotifierConfig};
use leadchat_types::config::AppConfig;

/// Run both connectivity checks; fails if either does.
pub async fn run_checks(config: &AppConfig) -> anyhow::Result<()> {
    let llm_ok = check_llm(config).await;
    let smtp_ok = check_smtp(config).await;

    if !(llm_ok && smtp_ok) {
        bail!("connectivity check failed");
    }
    println!();
    println!("  {} All checks passed", style("ok").green().bold());
    Ok(())
}

async fn check_llm(config: &AppConfig) -> bool {
    print!(
        "  Testing connection to {} ({})... ",
        style(&config.llm.provider_name).cyan(),
        config.llm.model
    );
    let _ = std::io::stdout().flush();

    let result = match create_provider(&config.llm) {
        Ok(provider) => test_provider_connection(&provider).await,
        Err(e) => Err(e),
    };
    report(result.map_err(|e| e.to_string()))
}

async fn check_smtp(config: &AppConfig) -> bool {
    print!(
        "  Testing SMTP relay {}:{}... ",
        style(&config.smtp.host).cyan(),
        config.smtp.port
    );
    let _ = std::io::stdout().flush();

    let notifier = SmtpNotifierConfig::from_settings(&config.smtp, &config.chat.product_name)
        .map_err(|e| e.to_string())
        .and_then(|smtp| SmtpLeadNotifier::new(smtp).map_err(|e| e.to_string()));

    let result = match notifier {
        Ok(notifier) => notifier.check_connection().await.map_err(|e| e.to_string()),
        Err(e) => Err(e),
    };
    report(result)
}

fn report(result: Result<(), String>) -> bool {
    match result {
        Ok(()) => {
            println!("{}", style("connected").green().bold());
            true
        }
        Err(e) => {
            println!("{}", style("FAILED").red().bold());
            eprintln!("  {} {}", style("!").red().bold(), e);
            false
        }
    }
}
