//! Ping command implementation.

use auditor_core::{AuditClient, ClientOptions, EndpointResult};
use colored::Colorize;

/// Execute the ping command.
///
/// Exits with status 1 when the backend cannot be reached.
pub async fn execute(options: &ClientOptions, json_output: bool) -> anyhow::Result<()> {
    let client = AuditClient::new(options)?;
    let result = client.health().await;

    if json_output {
        println!("{}", result.pretty());
    } else {
        match &result {
            EndpointResult::Success(body) => {
                println!("{} {}", "✓ Backend reachable at".green(), options.base_url);
                if let Some(message) = result.field("message").and_then(|m| m.as_str()) {
                    println!("  {}", message.dimmed());
                } else {
                    println!("  {}", body.to_string().dimmed());
                }
            }
            EndpointResult::Failure(message) => {
                println!("{} {}", "✗ Backend unavailable:".red(), message);
            }
        }
    }

    if result.is_error() {
        std::process::exit(1);
    }
    Ok(())
}
