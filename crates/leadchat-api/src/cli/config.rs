//! `leadchat config`: print the effective configuration.

use console::style;

use leadchat_types::config::AppConfig;

/// Render the configuration as TOML with every credential masked.
///
/// Passwords and API keys are never serialized; the sender and recipient
/// addresses are shown since they are not secret.
pub fn render_config(config: &AppConfig) -> anyhow::Result<String> {
    let mut rendered = toml::to_string_pretty(config)?;

    let secret_lines = [
        ("llm", "api_key", config.llm.api_key.is_some()),
        ("smtp", "password", config.smtp.password.is_some()),
    ];
    rendered.push_str("\n# credentials\n");
    for (section, key, set) in secret_lines {
        let status = if set { "set" } else { "not set" };
        rendered.push_str(&format!("# {section}.{key} = <{status}>\n"));
    }
    Ok(rendered)
}

pub fn show_config(config: &AppConfig) -> anyhow::Result<()> {
    println!("{}", render_config(config)?);

    let missing = config.missing_credentials();
    if !missing.is_empty() {
        eprintln!(
            "  {} Missing credentials: {}",
            style("!").yellow().bold(),
            style(missing.join(", ")).yellow()
        );
    }
    Ok(())
}
