use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::time::Duration;

use crate::model::shift::ShiftDefinition;

/// shift code => definition. The catalog is tiny and changes rarely;
/// minutes of staleness are acceptable for window evaluation.
pub static SHIFT_CACHE: Lazy<Cache<String, ShiftDefinition>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(10_000)
        .time_to_live(Duration::from_secs(600)) // 10 min TTL
        .build()
});

pub async fn get(code: &str) -> Option<ShiftDefinition> {
    SHIFT_CACHE.get(code).await
}

pub async fn put(shift: ShiftDefinition) {
    SHIFT_CACHE.insert(shift.code.clone(), shift).await;
}

/// Batch insert shift definitions
async fn batch_put(shifts: &[ShiftDefinition]) {
    let futures: Vec<_> = shifts
        .iter()
        .map(|s| SHIFT_CACHE.insert(s.code.clone(), s.clone()))
        .collect();

    // Await all insertions concurrently
    futures::future::join_all(futures).await;
}

/// Load the whole shift catalog into the in-memory cache (batched)
pub async fn warmup_shift_cache(pool: &MySqlPool, batch_size: usize) -> Result<()> {
    let mut stream = sqlx::query_as::<_, ShiftDefinition>(
        r#"
        SELECT code, name, start_time, end_time, crosses_midnight, duration_hours
        FROM shifts
        "#,
    )
    .fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        batch.push(row?);
        total_count += 1;

        if batch.len() >= batch_size {
            batch_put(&batch).await;
            batch.clear();
        }
    }

    // Insert any remaining definitions
    if !batch.is_empty() {
        batch_put(&batch).await;
    }

    log::info!("Shift catalog warmup complete: {} definitions", total_count);

    Ok(())
}
