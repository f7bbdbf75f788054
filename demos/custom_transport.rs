//! Driving the protocol core without a WebSocket.
//!
//! The `Socket` is transport-agnostic: it emits serialized frames into a
//! channel and consumes raw inbound text via `dispatch`. This demo plays
//! both sides in-process (every "peer" frame is handcrafted) to show the
//! full channel lifecycle and reply correlation.
//!
//! Usage:
//!   cargo run --example custom_transport
//!   cargo run --example custom_transport -- --debug

mod common;

// ============================================================================
// Imports
// ============================================================================

use common::Args;
use phoenix_channels::{ChannelHooks, Message, PHX_REPLY, PushHooks, Socket};
use serde_json::{Value, json};

// ============================================================================
// Main
// ============================================================================

fn main() {
    let args = Args::parse();
    common::init_logging(args.debug);

    println!("=== custom transport ===\n");

    let (outbound, mut frames) = tokio::sync::mpsc::unbounded_channel();
    let mut socket = Socket::new(outbound);

    // ========================================================================
    // Join
    // ========================================================================

    println!("[1] Joining room:lobby...");

    let join_ref = socket
        .join(
            "room:lobby",
            json!({"token": "demo"}),
            ChannelHooks::new().on_join(|response| println!("    ✓ Joined: {response}")),
        )
        .expect("fresh channel accepts join");

    let join_frame = frames.try_recv().expect("join frame emitted");
    println!("    >> {join_frame}");

    // Play the peer: acknowledge the join.
    let reply = Message::new(
        PHX_REPLY,
        "room:lobby",
        json!({"status": "ok", "response": {"user_count": 1}}),
        Some(join_ref),
    );
    socket.dispatch(&reply.encode().expect("encode reply"));
    println!("    state: {:?}\n", socket.channel_state("room:lobby"));

    // ========================================================================
    // Server-pushed event
    // ========================================================================

    println!("[2] Receiving a broadcast...");

    socket.on("new_msg", "room:lobby", |payload: &Value| {
        let body = payload.get("body").and_then(|v| v.as_str()).unwrap_or("?");
        println!("    << {body}");
    });

    let broadcast = Message::new("new_msg", "room:lobby", json!({"body": "welcome!"}), None);
    socket.dispatch(&broadcast.encode().expect("encode broadcast"));

    // ========================================================================
    // Push with reply
    // ========================================================================

    println!("\n[3] Pushing a message...");

    let push_ref = socket.push(
        "new_msg",
        "room:lobby",
        json!({"body": "hi"}),
        PushHooks::new().on_ok(|response| println!("    ✓ Ack: {response}")),
    );

    let push_frame = frames.try_recv().expect("push frame emitted");
    println!("    >> {push_frame}");

    let ack = Message::new(
        PHX_REPLY,
        "room:lobby",
        json!({"status": "ok", "response": {"id": 42}}),
        Some(push_ref),
    );
    socket.dispatch(&ack.encode().expect("encode ack"));

    // ========================================================================
    // Leave
    // ========================================================================

    println!("\n[4] Leaving...");

    let leave_ref = socket.leave("room:lobby").expect("joined channel can leave");
    let leave_frame = frames.try_recv().expect("leave frame emitted");
    println!("    >> {leave_frame}");

    let done = Message::new(
        PHX_REPLY,
        "room:lobby",
        json!({"status": "ok", "response": {}}),
        Some(leave_ref),
    );
    socket.dispatch(&done.encode().expect("encode reply"));
    println!("    state: {:?}", socket.channel_state("room:lobby"));
    println!("    pending pushes: {}", socket.pending_pushes());
}
