//! Effect loop driving the panel core
//!
//! A single task owns the core. HTTP requests run as spawned tasks and report
//! back through the message channel, so several refreshes may be in flight
//! and their results are applied in arrival order.

use crate::{config::AppConfig, http_client};
use anyhow::Result;
use crux_core::{Core, Request};
use crux_http::protocol::{HttpRequest, HttpResult};
use log::{debug, info, warn};
use panel_sync_core::{App, Effect, Event, PollOperation, PollOutput, ViewModel};
use reqwest::Client;
use std::{
    collections::{HashMap, VecDeque},
    time::Duration,
};
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
    time::MissedTickBehavior,
};

/// Messages processed by the shell loop
#[derive(Debug)]
pub enum ShellMessage {
    Event(Event),
    HttpDone { id: u64, result: HttpResult },
    Quit,
}

/// Receives every rendered view model
pub trait View {
    fn render(&mut self, view: &ViewModel);
}

/// Prints the panel to stdout
#[derive(Default)]
pub struct ConsoleView;

impl View for ConsoleView {
    fn render(&mut self, view: &ViewModel) {
        println!("{}", crate::console::render(view));
    }
}

pub struct Shell<V> {
    core: Core<App>,
    client: Client,
    device_url: String,
    tx: UnboundedSender<ShellMessage>,
    pending: HashMap<u64, Request<HttpRequest>>,
    next_id: u64,
    poll_task: Option<JoinHandle<()>>,
    view: V,
}

impl<V: View> Shell<V> {
    pub fn new(config: &AppConfig, tx: UnboundedSender<ShellMessage>, view: V) -> Result<Self> {
        Ok(Self {
            core: Core::new(),
            client: http_client::device_client(config.device.timeout)?,
            device_url: config.device.url.clone(),
            tx,
            pending: HashMap::new(),
            next_id: 0,
            poll_task: None,
            view,
        })
    }

    /// Process messages until `ShellMessage::Quit` arrives or all senders are gone
    pub async fn run(mut self, mut rx: UnboundedReceiver<ShellMessage>) {
        while let Some(message) = rx.recv().await {
            let effects = match message {
                ShellMessage::Event(event) => {
                    debug!("event: {event:?}");
                    self.core.process_event(event)
                }
                ShellMessage::HttpDone { id, result } => {
                    let Some(mut request) = self.pending.remove(&id) else {
                        warn!("dropping response for unknown request {id}");
                        continue;
                    };
                    match self.core.resolve(&mut request, result) {
                        Ok(effects) => effects,
                        Err(e) => {
                            warn!("failed to resolve http request {id}: {e:?}");
                            continue;
                        }
                    }
                }
                ShellMessage::Quit => break,
            };
            self.process_effects(effects);
        }

        self.cancel_poll_task();
        info!("shell stopped");
    }

    fn process_effects(&mut self, effects: Vec<Effect>) {
        let mut queue = VecDeque::from(effects);

        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Render(_) => self.view.render(&self.core.view()),
                Effect::Http(request) => self.spawn_http(request),
                Effect::Poll(mut request) => {
                    let output = self.schedule(&request.operation);
                    match self.core.resolve(&mut request, output) {
                        Ok(effects) => queue.extend(effects),
                        Err(e) => warn!("failed to resolve poll request: {e:?}"),
                    }
                }
            }
        }
    }

    fn spawn_http(&mut self, request: Request<HttpRequest>) {
        let id = self.next_id;
        self.next_id += 1;

        let operation = request.operation.clone();
        self.pending.insert(id, request);

        let client = self.client.clone();
        let device_url = self.device_url.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = http_client::execute(&client, &device_url, &operation).await;
            // the loop may already be gone on shutdown
            let _ = tx.send(ShellMessage::HttpDone { id, result });
        });
    }

    fn schedule(&mut self, operation: &PollOperation) -> PollOutput {
        self.cancel_poll_task();

        match operation {
            PollOperation::Start { interval_ms } => {
                info!("polling every {interval_ms} ms");
                self.poll_task = Some(spawn_ticker(
                    Duration::from_millis((*interval_ms).max(1)),
                    self.tx.clone(),
                ));
                PollOutput::Started
            }
            PollOperation::Stop => {
                info!("polling stopped");
                PollOutput::Stopped
            }
        }
    }

    fn cancel_poll_task(&mut self) {
        if let Some(task) = self.poll_task.take() {
            task.abort();
        }
    }
}

/// Send `Event::PollTick` every `period`, starting one period from now
fn spawn_ticker(period: Duration, tx: UnboundedSender<ShellMessage>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if tx.send(ShellMessage::Event(Event::PollTick)).is_err() {
                break;
            }
        }
    })
}
