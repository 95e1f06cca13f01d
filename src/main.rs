use anyhow::Result;
use flowtrace::{StepStatus, TraceStore};
use serde_json::json;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut store = TraceStore::new();

    // A flow that completes normally, re-entering one node for a retry.
    let ctx = store.create_env(json!({ "request": "checkout", "cart": 3 }), Some("demo"))?;
    let ctx = store.record_step(&ctx, "validate", StepStatus::Enter, None)?;
    let ctx = store.record_step(&ctx, "validate", StepStatus::Exit, None)?;
    let ctx = store.record_step(&ctx, "charge", StepStatus::Enter, Some(json!({ "amount": 1299 })))?;
    let ctx = store.record_step(&ctx, "charge", StepStatus::Exit, None)?;
    let ctx = store.record_step(
        &ctx,
        "charge",
        StepStatus::Enter,
        Some(json!({ "amount": 1299, "retry": true })),
    )?;
    let ctx = store.record_step(&ctx, "charge", StepStatus::Exit, None)?;

    // A flow that dies inside a node and locks its trace.
    let failing = store.create_env(json!({ "request": "refund" }), Some("demo"))?;
    let failing = store.record_step(&failing, "lookup", StepStatus::Enter, None)?;
    store.record_step(
        &failing,
        "lookup",
        StepStatus::Error,
        Some(json!({ "reason": "order not found" })),
    )?;

    for record in store.replay(&ctx.trace_id)? {
        println!("{}", serde_json::to_string(&record)?);
    }
    println!("{}", serde_json::to_string_pretty(&store.stats())?);

    Ok(())
}
