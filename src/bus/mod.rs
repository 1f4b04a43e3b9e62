//! Event bus connecting plugins to the file pipeline.
//!
//! Handlers are registered per [`Event`] and invoked strictly in registration
//! order, one after the other, on the calling thread. Each `trigger` call
//! aggregates handler results with "last defined value wins": a handler that
//! returns `Ok(None)` never erases a value supplied by an earlier handler.

mod event;
mod payload;

pub use event::Event;
pub use payload::{Outcome, Payload};

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::errors::Result;

type HandlerFn = dyn Fn(&mut Payload<'_>) -> Result<Option<Outcome>> + Send + Sync;

/// A registered event handler.
///
/// Clones share identity, which is what [`EventBus::off`] matches on.
#[derive(Clone)]
pub struct Handler {
    f: Arc<HandlerFn>,
}

impl Handler {
    /// Wraps a closure as a handler.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Payload<'_>) -> Result<Option<Outcome>> + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Invokes the handler.
    pub fn call(&self, payload: &mut Payload<'_>) -> Result<Option<Outcome>> {
        (self.f)(payload)
    }

    /// Returns true if both values refer to the same registered closure.
    pub fn same(&self, other: &Handler) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.f), Arc::as_ptr(&other.f))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Arc::as_ptr(&self.f).cast::<()>())
    }
}

/// Registry of event handlers.
#[derive(Default)]
pub struct EventBus {
    listeners: IndexMap<Event, Vec<Handler>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<(&str, usize)> = self
            .listeners
            .iter()
            .map(|(event, handlers)| (event.as_str(), handlers.len()))
            .collect();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}

impl EventBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an event without registering a handler.
    fn declare(&mut self, event: Event) -> &mut Vec<Handler> {
        self.listeners.entry(event).or_default()
    }

    /// Registers a handler. The same handler may be registered repeatedly.
    pub fn on(&mut self, event: impl Into<Event>, handler: Handler) {
        self.declare(event.into()).push(handler);
    }

    /// Registers a closure and returns its handle for a later [`off`](Self::off).
    pub fn on_fn<F>(&mut self, event: impl Into<Event>, f: F) -> Handler
    where
        F: Fn(&mut Payload<'_>) -> Result<Option<Outcome>> + Send + Sync + 'static,
    {
        let handler = Handler::new(f);
        self.on(event, handler.clone());
        handler
    }

    /// Removes the first registration of `handler` for `event`, if any.
    pub fn off(&mut self, event: impl Into<Event>, handler: &Handler) {
        let handlers = self.declare(event.into());
        if let Some(index) = handlers.iter().position(|h| h.same(handler)) {
            handlers.remove(index);
        }
    }

    /// Runs every handler of `event` in registration order.
    ///
    /// Returns the last defined handler result. The first handler error
    /// aborts the remaining handlers and is returned as is.
    pub fn trigger(&self, event: &Event, payload: &mut Payload<'_>) -> Result<Option<Outcome>> {
        let Some(handlers) = self.listeners.get(event) else {
            return Ok(None);
        };
        tracing::trace!("trigger {} ({} handlers)", event, handlers.len());

        let mut result = None;
        for handler in handlers {
            if let Some(outcome) = handler.call(payload)? {
                result = Some(outcome);
            }
        }
        Ok(result)
    }

    /// Returns the number of handlers registered for `event`.
    pub fn listener_count(&self, event: &Event) -> usize {
        self.listeners.get(event).map_or(0, Vec::len)
    }

    /// Returns true if `event` has been declared.
    pub fn is_declared(&self, event: &Event) -> bool {
        self.listeners.contains_key(event)
    }
}
