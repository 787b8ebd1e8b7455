use std::future::Future;

use futures::stream::{self, StreamExt};

pub fn clamp_concurrency(concurrency: usize, len: usize) -> usize {
    concurrency.min(len).max(1)
}

/// Results come back index-aligned with `items`, whatever order they finish in.
pub async fn map_with_concurrency<T, R, F, Fut>(
    items: Vec<T>,
    concurrency: usize,
    mapper: F,
) -> Vec<R>
where
    F: Fn(T, usize) -> Fut,
    Fut: Future<Output = R>,
{
    let len = items.len();
    if len == 0 {
        return Vec::new();
    }
    let limit = clamp_concurrency(concurrency, len);
    tracing::trace!(items = len, limit, "runner.start");

    let mapper = &mapper;
    let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(len).collect();
    let mut completions = stream::iter(items.into_iter().enumerate())
        .map(|(index, item)| async move { (index, mapper(item, index).await) })
        .buffer_unordered(limit);

    while let Some((index, result)) = completions.next().await {
        slots[index] = Some(result);
    }

    slots.into_iter().flatten().collect()
}
