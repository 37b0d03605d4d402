//! Login command

use anyhow::Result;
use taskboard_client::ApiClient;
use taskboard_kanban::{authenticate, AuthState, Credentials};

/// Log in and print the user record
pub async fn execute(client: &ApiClient, email: String, password: String) -> Result<()> {
    let mut state = AuthState::new();
    let user = authenticate(&mut state, client, &Credentials::new(email, password)).await?;
    println!("{}", serde_json::to_string_pretty(&user)?);
    if user.token.is_some() {
        eprintln!("Set TASKBOARD_TOKEN to the token above to use it for board commands.");
    }
    Ok(())
}
