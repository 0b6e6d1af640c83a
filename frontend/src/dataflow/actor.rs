//! Single-value Actor
//!
//! An Actor owns one `Mutable<T>` and a processing task. The task is the only
//! place the value changes; everything else observes it through signals.

use std::future::Future;
use std::sync::Arc;
use zoon::{Mutable, Signal, Task, TaskHandle};

/// Reactive state with a single point of mutation.
///
/// The processor drains the Actor's relays one event at a time, so handlers
/// never interleave. Dropping the last clone of an Actor aborts its task,
/// which is how polling and per-view state stop when their owner goes away.
///
/// ```rust
/// let (tag_clicked_relay, mut tag_clicked_stream) = relay();
///
/// let selected_tag = Actor::new(TagSelection::All, async move |state| {
///     while let Some(tag) = tag_clicked_stream.next().await {
///         state.set_neq(tag);
///     }
/// });
///
/// El::new().child_signal(selected_tag.signal().map(|tag| tag_label(&tag)))
/// ```
#[derive(Clone, Debug)]
pub struct Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    state: Mutable<T>,
    #[allow(dead_code)]
    task_handle: Arc<TaskHandle>,
}

impl<T> Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F, Fut>(initial_state: T, processor: F) -> Self
    where
        F: FnOnce(Mutable<T>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let state = Mutable::new(initial_state);
        let task_handle = Arc::new(Task::start_droppable(processor(state.clone())));
        Self { state, task_handle }
    }

    /// The only read access, there is no `get`.
    pub fn signal(&self) -> impl Signal<Item = T> + use<T> {
        self.state.signal_cloned()
    }

    /// Maps through a reference, for large values like whole snapshots.
    pub fn signal_ref<U, F>(&self, f: F) -> impl Signal<Item = U> + use<T, U, F>
    where
        U: PartialEq + Send + Sync + 'static,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        self.state.signal_ref(f)
    }
}
