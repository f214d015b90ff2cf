// staffdesk-client/src/bin/staffdesk.rs
// Load the employee list and print the records matching an optional query

use anyhow::{Context, bail};
use staffdesk_client::{
    AuthSession, ClientConfig, LoginState, Operation, SessionToken, SyncManager, logger,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env();
    logger::init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    let token = SessionToken::new();
    token.set(config.token.clone());
    let client = config
        .build_http_client()
        .context("Failed to build HTTP client")?
        .with_token_provider(token.clone());

    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        let mut session = AuthSession::new(token);
        if let LoginState::Failed { message } = session.login(&client, username, password).await {
            bail!("{message}");
        }
    }

    let sync = SyncManager::new(client);
    if let Err(e) = sync.refresh().await {
        bail!("{}", e.user_message(Operation::List));
    }

    let found = sync.search(&query);
    println!(
        "{:<12} {:<24} {:<12} {:<24} {:<10}",
        "ID", "NAME", "DEPARTMENT", "POSITION", "STATUS"
    );
    for emp in &found {
        println!(
            "{:<12} {:<24} {:<12} {:<24} {:<10}",
            emp.display_id(),
            emp.full_name(),
            emp.department,
            emp.position,
            emp.status
        );
    }
    println!("{} of {} employees", found.len(), sync.len());

    Ok(())
}
