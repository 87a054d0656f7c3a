use futures::future::join_all;
use std::future::Future;
use tracing::warn;

/// Runs `f` over every item on its own task and waits for all of them.
///
/// The output has one slot per input, in input order. A unit that panics
/// (or is cancelled) leaves `None` in its slot; the rest of the batch is
/// unaffected.
pub async fn parallel_map<I, F, Fut>(items: I, f: F) -> Vec<Option<Fut::Output>>
where
    I: IntoIterator,
    F: Fn(I::Item) -> Fut,
    Fut: Future + Send + 'static,
    Fut::Output: Send + 'static,
{
    let handles: Vec<_> = items.into_iter().map(|item| tokio::spawn(f(item))).collect();

    join_all(handles)
        .await
        .into_iter()
        .enumerate()
        .map(|(index, joined)| match joined {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("parallel unit {} dropped: {}", index, e);
                None
            }
        })
        .collect()
}
