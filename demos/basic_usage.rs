//! Basic logger usage example
//!
//! Demonstrates a JSON-lines logger on stdout with child loggers, groups,
//! redaction and the logging macros.
//!
//! Run with: cargo run --example basic_usage

use rust_log_bridge::prelude::*;
use rust_log_bridge::{info, warn};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Log Bridge - Basic Usage Example ===\n");

    let config = LoggerConfig::from_json(
        r#"{
            "level": "debug",
            "name": "demo",
            "secure_fields": ["secret_", "password"]
        }"#,
    )?;
    let core = JsonCore::stdout(config.level);
    let logger = config.build_logger(Arc::new(core))?;

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message (folded into debug)", []);
    logger.debug("This is a debug message", []);
    logger.info("This is an info message", []);
    logger.warn("This is a warning message", []);
    logger.error("This is an error message", []);
    logger.fatal("This is a fatal message (the process keeps running)", []);

    println!("\n2. Child loggers and groups:");
    let request = logger
        .with([Attr::string("request_id", "r-42")])
        .with_group("http");
    request.info(
        "request served",
        [
            Attr::string("method", "GET"),
            Attr::int64("status", 200),
            Attr::duration("elapsed", Duration::from_millis(37)),
        ],
    );

    println!("\n3. Redacted attributes:");
    logger.info(
        "user login",
        [
            Attr::string("user", "alice"),
            Attr::string("password", "hunter2"),
            Attr::string("secret_token", "abc123"),
        ],
    );

    println!("\n4. Macros and lazy values:");
    let port = 8080;
    info!(logger, "Server listening on port {}", port);
    warn!(logger, "cache miss"; "key" => "user:42", "attempt" => 3);
    logger.debug(
        "expensive summary",
        [Attr::lazy("summary", || Value::from(format!("{} items", 3)))],
    );

    println!("\n5. Capturing plain text output:");
    let mut writer = LogWriter::new(logger.named("stdout"), Level::Info);
    writeln!(writer, "line written through io::Write")?;
    writer.flush()?;

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
