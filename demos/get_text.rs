//! GET example
//!
//! Pulls plain text from a website and prints it with the status and headers.
//!
//! Run with: cargo run --example get_text [url]

use overeasy_http::HttpClient;

const WEBSITE: &str = "https://www.rust-lang.org/robots.txt";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let url = std::env::args().nth(1).unwrap_or_else(|| WEBSITE.to_string());

    let client = HttpClient::new()?;
    let response = client.get(&url, None, None).await?;

    println!("{}", response.text());
    println!("---");
    println!("Status code: {}", response.status());
    println!(
        "Response headers: {}",
        serde_json::to_string_pretty(response.headers())?
    );

    Ok(())
}
