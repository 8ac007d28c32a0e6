//! An inner transaction shadowing an outer one.

use crate::context::with_transaction;
use crate::logger::{Level, Logger};
use crate::sink::SinkError;
use crate::tags;

pub async fn run(logger: &Logger) -> Result<(), SinkError> {
    with_transaction(async {
        logger.info("Outer transaction started")?;

        with_transaction(async {
            logger.info("Inner transaction running")?;
            tokio::task::yield_now().await;
            logger.log(Level::Info, "Inner transaction tagged call", tags! { "step" => "inner" })?;
            Ok::<(), SinkError>(())
        })
        .await?;

        logger.info("Outer transaction resumed")?;
        Ok::<(), SinkError>(())
    })
    .await
}
