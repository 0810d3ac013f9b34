use konnekt_practice_core::{
    ActivityKind, ActivityState, PracticeCommand, PracticeEvent, PracticeLoop, SpeechCapabilities,
};
use konnekt_practice_gateway::PracticeContentService;
use tokio::sync::{mpsc, watch};

/// Snapshot of practice state (read-only, cheap to clone)
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeSnapshot {
    pub kind: ActivityKind,
    /// State of the active instance, `None` on the menu
    pub state: Option<ActivityState>,
    pub score: u32,
    /// Set when the score grew with the command batch behind this snapshot
    pub pulse: bool,
    pub capabilities: SpeechCapabilities,
}

impl Default for PracticeSnapshot {
    fn default() -> Self {
        Self {
            kind: ActivityKind::Menu,
            state: None,
            score: 0,
            pulse: false,
            capabilities: SpeechCapabilities::default(),
        }
    }
}

impl PracticeSnapshot {
    fn capture(practice_loop: &PracticeLoop, pulse: bool) -> Self {
        let event_loop = practice_loop.event_loop();
        Self {
            kind: event_loop.active_kind(),
            state: event_loop.machine().map(|m| m.state().clone()),
            score: event_loop.score(),
            pulse,
            capabilities: event_loop.navigator().capabilities(),
        }
    }
}

/// Background runtime for PracticeLoop.
///
/// Gateway requests run as their own tasks and feed their result back
/// through the command channel.
pub struct PracticeRuntime {
    /// Send commands to PracticeLoop
    cmd_tx: mpsc::Sender<PracticeCommand>,

    /// Receive state snapshots (latest always available)
    state_rx: watch::Receiver<PracticeSnapshot>,

    /// Events of every processed command, in order
    event_rx: mpsc::UnboundedReceiver<PracticeEvent>,

    /// Handle to background task
    task_handle: tokio::task::JoinHandle<()>,
}

impl PracticeRuntime {
    /// Spawn a new runtime with an existing PracticeLoop
    pub fn spawn(mut practice_loop: PracticeLoop, service: PracticeContentService) -> Self {
        let (cmd_tx, mut cmd_rx) = mpsc::channel::<PracticeCommand>(100);
        let (state_tx, state_rx) =
            watch::channel(PracticeSnapshot::capture(&practice_loop, false));
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        // Weak, so dropping the runtime closes the command channel
        let results_tx = cmd_tx.downgrade();
        let task_handle = tokio::spawn(async move {
            tracing::info!(gateway = service.gateway_name(), "PracticeRuntime started");

            while let Some(cmd) = cmd_rx.recv().await {
                // 1. Queue this command and whatever else is already waiting
                submit(&mut practice_loop, cmd);
                while let Ok(cmd) = cmd_rx.try_recv() {
                    submit(&mut practice_loop, cmd);
                }

                // 2. Process the batch
                let mut pulse = false;
                while practice_loop.pending_commands() > 0 {
                    let processed = practice_loop.poll();
                    tracing::debug!("PracticeRuntime processed {} commands", processed);

                    let events = practice_loop.drain_events();
                    for request in PracticeLoop::requests(&events) {
                        let service = service.clone();
                        let results_tx = results_tx.clone();
                        tokio::spawn(async move {
                            let result = service.dispatch(request).await;
                            let delivered = match results_tx.upgrade() {
                                Some(tx) => tx.send(result).await.is_ok(),
                                None => false,
                            };
                            if !delivered {
                                tracing::debug!("Runtime gone, dropping gateway result");
                            }
                        });
                    }

                    for event in events {
                        pulse |= matches!(event, PracticeEvent::ScoreChanged { .. });
                        // Nobody listening is fine: snapshots still carry the state
                        let _ = event_tx.send(event);
                    }
                }

                // 3. Publish snapshot
                let _ = state_tx.send(PracticeSnapshot::capture(&practice_loop, pulse));
            }

            tracing::info!("PracticeRuntime stopped");
        });

        Self {
            cmd_tx,
            state_rx,
            event_rx,
            task_handle,
        }
    }

    /// Submit a command
    pub async fn submit_command(
        &self,
        cmd: PracticeCommand,
    ) -> Result<(), mpsc::error::SendError<PracticeCommand>> {
        self.cmd_tx.send(cmd).await
    }

    /// Get latest state snapshot (always succeeds, never blocks)
    pub fn snapshot(&self) -> PracticeSnapshot {
        self.state_rx.borrow().clone()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<PracticeSnapshot> {
        self.state_rx.clone()
    }

    /// Events buffered so far, without waiting
    pub fn drain_events(&mut self) -> Vec<PracticeEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Shutdown runtime
    pub async fn shutdown(self) {
        self.task_handle.abort();
        let _ = self.task_handle.await;
    }
}

fn submit(practice_loop: &mut PracticeLoop, cmd: PracticeCommand) {
    let name = cmd.name();
    if let Err(e) = practice_loop.submit(cmd) {
        tracing::error!(command = name, "Failed to submit command: {}", e);
    }
}
