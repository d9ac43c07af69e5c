use std::future::Future;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::sync::Semaphore;

/// Cap on simultaneously in-flight calls when none is configured.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Run `run` for every key with at most `max_concurrency` calls in flight.
///
/// Results come back in completion order, one per key. The first error is
/// returned immediately and every other call, started or not, is dropped.
/// An empty key set resolves to an empty vec without calling `run`.
/// The limit is clamped to `1..=Semaphore::MAX_PERMITS`.
pub async fn execute_bounded<K, R, E, F, Fut>(
    keys: impl IntoIterator<Item = K>,
    max_concurrency: usize,
    run: F,
) -> Result<Vec<R>, E>
where
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    let sem = Semaphore::new(max_concurrency.clamp(1, Semaphore::MAX_PERMITS));
    let mut futs: FuturesUnordered<_> = FuturesUnordered::new();

    for key in keys {
        let sem = &sem;
        let run = &run;
        futs.push(async move {
            // The semaphore is never closed, so acquire only waits.
            let _permit = sem.acquire().await;
            run(key).await
        });
    }

    let mut results = Vec::with_capacity(futs.len());

    while let Some(res) = futs.next().await {
        results.push(res?);
    }

    Ok(results)
}
