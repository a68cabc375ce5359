// SPDX-License-Identifier: MIT
//
// Sign in against a Cognito user pool and print the username claim
//
// Environment:
//   AWS_REGION, AWS_USER_POOL_ID, AWS_APP_CLIENT_ID
//   BACKEND_URL (optional endpoint override)
//
// Usage:
//   cargo run --example sign-in -- sign-in <username> <password>
//   cargo run --example sign-in -- sign-up <email> <password>
//   cargo run --example sign-in -- confirm <username> <code>
//

use cognito_session::{SessionStore, UserPoolProvider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut provider = UserPoolProvider::new(
        &std::env::var("AWS_REGION")?,
        &std::env::var("AWS_USER_POOL_ID")?,
    );
    if let Ok(backend_url) = std::env::var("BACKEND_URL") {
        provider = provider.with_endpoint(url::Url::parse(&backend_url)?);
    }

    let client = provider
        .client()
        .client_id(&std::env::var("AWS_APP_CLIENT_ID")?)
        .build()
        .unwrap();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("sign-in") => {
            let session = SessionStore::new();
            client.sign_in(&args[2], &args[3], &session).await?;
            println!("signed in as {}", session.username().as_deref().unwrap_or("-"));
        }
        Some("sign-up") => {
            let outcome = client.sign_up(&args[2], &args[3]).await?;
            println!(
                "signed up, confirmation code sent to {}",
                outcome
                    .code_delivery_details
                    .and_then(|d| d.destination)
                    .unwrap_or_default()
            );
        }
        Some("confirm") => {
            client.confirm_sign_up(&args[2], &args[3]).await?;
            println!("user confirmed");
        }
        _ => {
            eprintln!("usage: sign-in|sign-up|confirm <user> <password-or-code>");
            std::process::exit(2);
        }
    }

    Ok(())
}
