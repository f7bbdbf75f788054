//! Minimal chat client against a Phoenix endpoint.
//!
//! Demonstrates:
//! - Connecting with a query parameter
//! - Joining a topic with lifecycle hooks
//! - Registering an event handler for server-pushed messages
//! - Pushing an event and correlating its reply
//!
//! Usage:
//!   cargo run --example chat -- --url ws://localhost:4000/socket/websocket
//!   cargo run --example chat -- --debug

mod common;

// ============================================================================
// Imports
// ============================================================================

use anyhow::Context;
use common::Args;
use phoenix_channels::{ChannelHooks, Client, PushHooks};
use serde_json::json;

// ============================================================================
// Constants
// ============================================================================

const DEFAULT_URL: &str = "ws://localhost:4000/socket/websocket";
const TOPIC: &str = "room:lobby";

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    common::init_logging(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("\n[ERROR] {e:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    println!("=== chat ===\n");

    let url = args.url.unwrap_or_else(|| DEFAULT_URL.to_string());

    // ========================================================================
    // Connect
    // ========================================================================

    println!("[1] Connecting to {url}...");

    let client = Client::builder()
        .url(&url)
        .param("vsn", "1.0.0")
        .connect()
        .await
        .context("connect failed; is a Phoenix endpoint running?")?;

    println!("    ✓ Connected\n");

    // ========================================================================
    // Join
    // ========================================================================

    println!("[2] Joining {TOPIC}...");

    client.on("new_msg", TOPIC, |payload| {
        let body = payload.get("body").and_then(|v| v.as_str()).unwrap_or("?");
        println!("    << {body}");
    });

    client.join(
        TOPIC,
        json!({}),
        ChannelHooks::new()
            .on_join(|response| println!("    ✓ Joined: {response}"))
            .on_error(|reason| eprintln!("    ✗ Channel error: {reason}"))
            .on_close(|_| println!("    Channel closed")),
    );

    // ========================================================================
    // Push
    // ========================================================================

    println!("[3] Sending a message...");

    client.push(
        "new_msg",
        TOPIC,
        json!({"body": "hello from rust"}),
        PushHooks::new()
            .on_ok(|response| println!("    ✓ Ack: {response}"))
            .on_error(|reason| eprintln!("    ✗ Rejected: {reason}")),
    );

    println!("\nPress Ctrl+C to exit...");
    tokio::signal::ctrl_c().await.ok();

    client.close().await;
    Ok(())
}
