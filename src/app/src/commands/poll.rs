//! Poll scheduling command definitions.
//!
//! The Core cannot own a timer. It asks the Shell to start or cancel a
//! repeating tick; the Shell then sends `Event::PollTick` on every interval.

use crux_core::{capability::Operation, command, Command};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

// Operations that the Shell needs to perform for polling
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PollOperation {
    Start { interval_ms: u64 },
    Stop,
}

// The output from poll operations (shell confirms what it did)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PollOutput {
    Started,
    Stopped,
}

impl Operation for PollOperation {
    type Output = PollOutput;
}

/// Command-based poll scheduling API
pub struct Poll<Effect, Event> {
    _effect: PhantomData<Effect>,
    _event: PhantomData<Event>,
}

impl<Effect, Event> Poll<Effect, Event>
where
    Effect: Send + From<crux_core::Request<PollOperation>> + 'static,
    Event: Send + 'static,
{
    /// Schedule a repeating tick, replacing any running schedule
    pub fn start(interval_ms: u64) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(PollOperation::Start { interval_ms })
    }

    /// Cancel the running schedule
    pub fn stop() -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(PollOperation::Stop)
    }
}

/// Request builder for poll operations
#[must_use]
pub struct RequestBuilder<Effect, Event> {
    operation: PollOperation,
    _effect: PhantomData<Effect>,
    _event: PhantomData<fn() -> Event>,
}

impl<Effect, Event> RequestBuilder<Effect, Event>
where
    Effect: Send + From<crux_core::Request<PollOperation>> + 'static,
    Event: Send + 'static,
{
    fn new(operation: PollOperation) -> Self {
        Self {
            operation,
            _effect: PhantomData,
            _event: PhantomData,
        }
    }

    /// Build the request into a Command RequestBuilder
    pub fn build(
        self,
    ) -> command::RequestBuilder<Effect, Event, impl std::future::Future<Output = PollOutput>> {
        command::RequestBuilder::new(move |ctx| async move {
            Command::request_from_shell(self.operation)
                .into_future(ctx)
                .await
        })
    }
}
