//! FetchController - owns the view state and drives fetch cycles
//!
//! Flow for every action:
//! 1. reducer updates [`AppState`] and returns effects
//! 2. if the state changed, the surface gets the new text and redraws now
//! 3. effects run: requests are spawned as tasks, exit releases the view
//!
//! Step 2 always happens before step 3, so "Fetching weather..." is on
//! screen before the first request leaves. Request results come back as
//! actions on the controller's channel and go through the same flow.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::dispatcher::InputDispatcher;
use crate::effect::Effect;
use crate::event::EventKind;
use crate::fetch::{TextFetcher, FETCH_TIMEOUT, WATCHDOG_GRACE};
use crate::reducer::reducer;
use crate::state::{AppState, FetchState, RawResponse, ViewConfig};
use crate::store::Store;
use crate::surface::RenderSurface;
use crate::tasks::{TaskKey, TaskManager};

/// Called once, after the view is released, when the user dismisses it
pub type ExitCallback = Box<dyn FnOnce() + Send>;

pub struct FetchController<F: TextFetcher, R: RenderSurface> {
    store: Store,
    fetcher: Arc<F>,
    dispatcher: InputDispatcher,
    surface: Option<R>,
    on_exit: Option<ExitCallback>,
    tasks: TaskManager,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl<F: TextFetcher, R: RenderSurface> FetchController<F, R> {
    pub fn new(config: ViewConfig, fetcher: Arc<F>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store: Store::new(AppState::new(config), reducer),
            fetcher,
            dispatcher: InputDispatcher::new(),
            surface: None,
            on_exit: None,
            tasks: TaskManager::new(action_tx.clone()),
            action_tx,
            action_rx,
        }
    }

    /// Enter the view: show the placeholder, then start the first cycle.
    ///
    /// Returns as soon as the request task is spawned. Must be called from
    /// within a tokio runtime.
    pub fn activate(&mut self, surface: R, on_exit: Option<ExitCallback>) {
        if self.surface.is_some() {
            warn!("weather view already active, releasing it first");
            self.deactivate();
        }

        info!(location = %self.state().location(), "activating weather view");
        self.store.state_mut().reset();
        self.surface = Some(surface);
        self.on_exit = on_exit;

        self.render();
        self.dispatch(Action::WeatherFetch);
    }

    /// Start a fetch cycle now. No-op while one is in flight.
    pub fn refresh(&mut self) {
        self.dispatch(Action::WeatherFetch);
    }

    /// Queue a refresh for the next turn of the loop
    pub fn request_refresh(&self) {
        self.enqueue(Action::WeatherFetch);
    }

    /// Release the view without notifying the owner. Requests already out
    /// keep running; their results are dropped.
    pub fn deactivate(&mut self) {
        if let Some(surface) = self.surface.take() {
            info!(in_flight = self.tasks.in_flight(), "deactivating weather view");
            surface.release();
        }
        self.on_exit = None;
    }

    /// Release the view, then run the exit callback
    pub fn exit(&mut self) {
        let Some(surface) = self.surface.take() else {
            return;
        };
        info!("leaving weather view");
        surface.release();

        if let Some(on_exit) = self.on_exit.take() {
            on_exit();
        }
    }

    /// Route one input event
    pub fn handle_event(&mut self, event: &EventKind) {
        match event {
            EventKind::Key(key) => {
                if let Some(action) = self.dispatcher.on_key(key, &self.state().fetch) {
                    self.enqueue(action);
                }
            }
            EventKind::Resize(width, height) => {
                debug!(width, height, "resized, redrawing");
                self.render();
            }
        }
    }

    /// Feed an action through reducer, render and effects
    pub fn handle(&mut self, action: Action) {
        self.dispatch(action);
    }

    /// Process everything already queued without waiting. Returns how many
    /// actions were handled.
    pub fn drain(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(action) = self.action_rx.try_recv() {
            self.dispatch(action);
            handled += 1;
        }
        handled
    }

    /// Wait until the current cycle reaches a terminal state (or the view
    /// goes away).
    pub async fn settle(&mut self) {
        while self.is_active() && self.state().is_loading() {
            match self.action_rx.recv().await {
                Some(action) => self.dispatch(action),
                None => break,
            }
        }
    }

    /// Run until the view is dismissed. Closing the event channel counts as
    /// a dismissal.
    pub async fn run(&mut self, events: &mut mpsc::UnboundedReceiver<EventKind>) {
        while self.is_active() {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle_event(&event),
                    None => {
                        info!("input closed");
                        self.exit();
                    }
                },

                Some(action) = self.action_rx.recv() => {
                    self.dispatch(action);
                }
            }
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.state().fetch
    }

    pub fn display_text(&self) -> String {
        self.state().display_text()
    }

    pub fn is_active(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&R> {
        self.surface.as_ref()
    }

    /// Requests still outstanding, including ones from a released view
    pub fn in_flight(&self) -> usize {
        self.tasks.in_flight()
    }

    fn enqueue(&self, action: Action) {
        // The receiver lives in `self`, so this cannot fail
        let _ = self.action_tx.send(action);
    }

    fn dispatch(&mut self, action: Action) {
        // Late results after deactivation are expected; they just don't count
        if !self.is_active() {
            debug!(action = %action.summary(), "view absent, dropping action");
            return;
        }

        let result = self.store.dispatch(action);
        if result.changed {
            self.render();
            if let FetchState::Failed(failure) = self.fetch_state() {
                warn!(reason = failure.reason(), cycle = self.state().cycle, "fetch failed");
            }
        }
        for effect in result.effects {
            self.run_effect(effect);
        }
    }

    /// Push the current text to the surface and draw it now. No-op once the
    /// view is released.
    fn render(&mut self) {
        let text = self.display_text();
        if let Some(surface) = self.surface.as_mut() {
            surface.set_display_text(&text);
            surface.request_immediate_redraw();
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::FetchSummary { cycle, url } => {
                self.spawn_request(TaskKey::summary(cycle), url, move |response| {
                    Action::WeatherDidFetchSummary { cycle, response }
                });
            }
            Effect::FetchDetail { cycle, url } => {
                self.spawn_request(TaskKey::detail(cycle), url, move |response| {
                    Action::WeatherDidFetchDetail { cycle, response }
                });
            }
            Effect::ReleaseView => self.exit(),
        }
    }

    fn spawn_request<M>(&mut self, key: TaskKey, url: String, into_action: M)
    where
        M: FnOnce(RawResponse) -> Action + Send + 'static,
    {
        let fetcher = Arc::clone(&self.fetcher);
        let task = key.clone();
        debug!(task = %task, url = %url, "spawning request");

        self.tasks.spawn(key, async move {
            let watchdog = FETCH_TIMEOUT + WATCHDOG_GRACE;
            let response =
                match tokio::time::timeout(watchdog, fetcher.fetch_text(&url, FETCH_TIMEOUT)).await
                {
                    Ok(response) => response,
                    Err(_) => {
                        warn!(task = %task, "fetcher overran its timeout");
                        RawResponse::failed()
                    }
                };

            if response.succeeded {
                debug!(task = %task, bytes = response.body.len(), "request finished");
            } else {
                warn!(task = %task, url = %url, "request failed");
            }
            into_action(response)
        });
    }
}
