//! Concurrent transactions with interleaved suspension points.

use std::time::Duration;

use futures_util::future::join_all;

use crate::context::with_transaction;
use crate::logger::Logger;
use crate::scenarios::ScenarioError;
use crate::sink::SinkError;

async fn pause(max_delay_ms: u64) {
    let delay = fastrand::u64(0..=max_delay_ms);
    tokio::time::sleep(Duration::from_millis(delay)).await;
}

/// One unit of work: four staged records under a single `trace.id`.
pub async fn staged_task(logger: Logger, name: String, max_delay_ms: u64) -> Result<(), SinkError> {
    with_transaction(async move {
        pause(max_delay_ms).await;
        logger.debug(format!("Starting task: {}", name))?;
        pause(max_delay_ms).await;
        logger.debug(format!("Task {}: stage 1 complete", name))?;
        pause(max_delay_ms).await;
        logger.debug(format!("Task {}: stage 2 complete", name))?;
        pause(max_delay_ms).await;
        logger.debug(format!("Finished task: {}", name))?;
        Ok::<(), SinkError>(())
    })
    .await
}

/// Spawn one sibling task per name and wait for all of them.
pub async fn run(logger: &Logger, names: &[String], max_delay_ms: u64) -> Result<(), ScenarioError> {
    tracing::info!(tasks = names.len(), max_delay_ms, "Running transactions scenario");

    let handles = names
        .iter()
        .map(|name| tokio::spawn(staged_task(logger.clone(), name.clone(), max_delay_ms)));

    for outcome in join_all(handles).await {
        outcome??;
    }
    Ok(())
}
