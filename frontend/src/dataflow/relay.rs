//! Event channel from the UI into Actors
//!
//! A Relay is the sending half of an unbounded channel. UI callbacks
//! (`tag_clicked_relay`, `history_navigated_relay`, ...) send into it and the
//! owning Actor drains the receiver in its processing loop.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use std::sync::{Arc, OnceLock};

/// Type-safe event sender.
///
/// Relays are named after the event source: `{source}_{event}_relay`, e.g.
/// `tag_clicked_relay` or `snapshot_received_relay`.
///
/// ```rust
/// let (tag_clicked_relay, mut tag_clicked_stream) = relay::<TagSelection>();
/// tag_clicked_relay.send(TagSelection::from_tag("eu"));
/// assert_eq!(tag_clicked_stream.next().await, Some(TagSelection::from_tag("eu")));
/// ```
#[derive(Clone, Debug)]
pub struct Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    sender: UnboundedSender<T>,
    #[cfg(debug_assertions)]
    emit_location: Arc<OnceLock<&'static std::panic::Location<'static>>>,
}

#[derive(Debug, Clone)]
pub enum RelayError {
    /// The receiving Actor is gone.
    ChannelClosed,
    /// Sent from a second call site (debug builds only).
    #[cfg(debug_assertions)]
    MultipleEmitters {
        previous: &'static std::panic::Location<'static>,
        current: &'static std::panic::Location<'static>,
    },
}

impl<T> Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> (Self, UnboundedReceiver<T>) {
        let (sender, receiver) = unbounded();
        (
            Relay {
                sender,
                #[cfg(debug_assertions)]
                emit_location: Arc::new(OnceLock::new()),
            },
            receiver,
        )
    }

    // Each relay has exactly one emitting call site; debug builds enforce it.
    #[cfg(debug_assertions)]
    #[track_caller]
    fn check_single_source(&self) -> Result<(), RelayError> {
        let caller = std::panic::Location::caller();
        match self.emit_location.set(caller) {
            Ok(()) => Ok(()),
            Err(previous) if previous == caller => Ok(()),
            Err(previous) => Err(RelayError::MultipleEmitters {
                previous,
                current: caller,
            }),
        }
    }

    /// Sends an event; it is dropped silently when the Actor is gone, e.g. a
    /// `popstate` arriving while the view is being torn down.
    #[track_caller]
    pub fn send(&self, value: T) {
        match self.try_send(value) {
            Ok(()) | Err(RelayError::ChannelClosed) => {}
            #[cfg(debug_assertions)]
            Err(error @ RelayError::MultipleEmitters { .. }) => panic!("{:?}", error),
        }
    }

    #[track_caller]
    pub fn try_send(&self, value: T) -> Result<(), RelayError> {
        #[cfg(debug_assertions)]
        self.check_single_source()?;

        self.sender
            .unbounded_send(value)
            .map_err(|_| RelayError::ChannelClosed)
    }
}

impl<T> Default for Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Disconnected relay; every event is discarded.
    fn default() -> Self {
        let (relay, _receiver) = Self::new();
        relay
    }
}

pub fn relay<T>() -> (Relay<T>, UnboundedReceiver<T>)
where
    T: Clone + Send + Sync + 'static,
{
    Relay::new()
}
