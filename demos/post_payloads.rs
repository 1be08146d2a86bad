//! POST example
//!
//! Sends the same payload twice, once as JSON and once form-urlencoded. The
//! encoding is picked from the client's `Content-Type` header.
//!
//! Get a webhook URL from https://webhook.site/ and export it first:
//!
//! ```text
//! WEBHOOK_URL=https://webhook.site/<id> cargo run --example post_payloads
//! ```

use overeasy_http::{Headers, HttpClient, Response};
use serde_json::{json, Value};

fn payload() -> Value {
    json!({
        "text": "Hello, world!",
        "username": "Egg",
        "icon_emoji": ":robot_face:",
        "attachments": ["This is an attachment.", "#36a64f"],
    })
}

fn client_for(content_type: &str) -> overeasy_http::Result<HttpClient> {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), content_type.to_string());

    // Headers set on the client are used for every request unless a call
    // passes its own.
    HttpClient::with_headers(headers)
}

fn report(response: &Response) -> anyhow::Result<()> {
    println!("{}", response.text());
    println!("---");
    println!("Status code: {}", response.status());
    println!(
        "Response headers: {}",
        serde_json::to_string_pretty(response.headers())?
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let webhook_url = std::env::var("WEBHOOK_URL")
        .map_err(|_| anyhow::anyhow!("set WEBHOOK_URL to a webhook endpoint"))?;

    println!("Sending JSON payload...");
    let client = client_for("application/json")?;
    report(&client.post(&webhook_url, Some(&payload()), None).await?)?;

    println!("Sending URL-encoded payload...");
    let client = client_for("application/x-www-form-urlencoded")?;
    report(&client.post(&webhook_url, Some(&payload()), None).await?)?;

    println!("Done.");
    Ok(())
}
