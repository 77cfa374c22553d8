//! Basic pipeline usage example
//!
//! Demonstrates a console pipeline with a level filter, buffered dispatch
//! and a flush trigger.
//!
//! Run with: cargo run --example basic_usage

use log_pipeline::prelude::*;

fn main() -> Result<()> {
    println!("=== Log Pipeline - Basic Usage Example ===\n");

    let pipeline = Pipeline::builder()
        .filter(LevelRangeFilter::at_least(LogLevel::Debug))
        .capacity(8)
        .trigger_at_level(LogLevel::Error)
        .appender(ConsoleAppender::new())
        .build();

    println!("1. Logging at different levels (trace is filtered out):");
    pipeline.trace("This trace message is denied by the filter")?;
    pipeline.debug("This is a debug message")?;
    pipeline.info("This is an info message")?;
    pipeline.warn("This is a warning message")?;

    println!("\n2. Buffered events flush when an error arrives:");
    pipeline.error("This error triggers delivery of everything buffered")?;

    println!("\n3. Ambient context travels with the event:");
    let context = EventContext::new()
        .with_field("request_id", "req-42")
        .with_field("user", "alice");
    pipeline.log_with_context(LogLevel::Info, "Request handled", context)?;

    println!("\n4. Errors render recursively:");
    let event = LogEvent::new(LogLevel::Error, "payment failed").with_error(
        LoggedError::new("BillingError", "charge declined")
            .with_entry("amount", "12.50".to_string())
            .caused_by(LoggedError::new("GatewayError", "card expired")),
    );
    let layout = CompiledPattern::compile_default("[%-5level] %message (%error)");
    println!("   {}", layout.render(&event));

    pipeline.close()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
