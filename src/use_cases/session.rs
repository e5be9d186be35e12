// One play session: a single task owns the EngineState and is the only place
// it is mutated. Local input and the trigger channel both enqueue commands; the
// task drains them one at a time, run to completion, between render frames.

use crate::domain::ports::SoundEffect;
use crate::domain::{EngineState, Playfield, SessionStats};
use crate::use_cases::render_loop::{CancelToken, FrameClock};
use crate::use_cases::types::{FrameSnapshot, HitNotice, SessionCommand, ShotSource};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Shared configuration for starting a session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Delay between render frames.
    pub frame_interval: Duration,
    /// Capacity for queued input commands.
    pub command_capacity: usize,
    /// Capacity for broadcast hit notices.
    pub hit_capacity: usize,
    /// How long attached listeners get to wind down before being aborted.
    pub listener_grace: Duration,
}

/// Returned when input is sent to a session that has already stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClosed;

impl fmt::Display for SessionClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session closed")
    }
}

impl std::error::Error for SessionClosed {}

/// Cloneable input endpoint tagged with the producer it belongs to.
#[derive(Clone)]
pub struct SessionInput {
    tx: mpsc::Sender<SessionCommand>,
    source: ShotSource,
}

impl SessionInput {
    pub fn source(&self) -> ShotSource {
        self.source
    }

    pub async fn aim(&self, x: f32, y: f32) -> Result<(), SessionClosed> {
        self.send(SessionCommand::Aim { x, y }).await
    }

    pub async fn shoot(&self) -> Result<(), SessionClosed> {
        self.send(SessionCommand::Shoot {
            source: self.source,
        })
        .await
    }

    pub async fn resize(&self, width: f32, height: f32) -> Result<(), SessionClosed> {
        self.send(SessionCommand::Resize { width, height }).await
    }

    async fn send(&self, cmd: SessionCommand) -> Result<(), SessionClosed> {
        self.tx.send(cmd).await.map_err(|_| SessionClosed)
    }
}

/// Handle to a running session.
pub struct Session {
    input_tx: mpsc::Sender<SessionCommand>,
    hits_tx: broadcast::Sender<HitNotice>,
    stats_rx: watch::Receiver<SessionStats>,
    cancel: CancelToken,
    task: JoinHandle<SessionStats>,
    listeners: Vec<JoinHandle<()>>,
    listener_grace: Duration,
}

impl Session {
    /// Spawns the session task. `draw` runs once per frame after targets advance.
    pub fn start<D>(
        engine: EngineState,
        settings: SessionSettings,
        sound: Arc<dyn SoundEffect>,
        draw: D,
    ) -> Self
    where
        D: FnMut(&FrameSnapshot) + Send + 'static,
    {
        // Zero capacities panic in tokio.
        let (input_tx, input_rx) =
            mpsc::channel::<SessionCommand>(settings.command_capacity.max(1));
        let (hits_tx, _hits_rx) = broadcast::channel::<HitNotice>(settings.hit_capacity.max(1));
        let (stats_tx, stats_rx) = watch::channel::<SessionStats>(engine.stats());
        let cancel = CancelToken::new();

        let task = tokio::spawn(session_task(
            engine,
            input_rx,
            hits_tx.clone(),
            stats_tx,
            sound,
            draw,
            FrameClock::new(settings.frame_interval),
            cancel.clone(),
        ));

        Self {
            input_tx,
            hits_tx,
            stats_rx,
            cancel,
            task,
            listeners: Vec::new(),
            listener_grace: settings.listener_grace,
        }
    }

    /// Input endpoint for one shot producer.
    pub fn input(&self, source: ShotSource) -> SessionInput {
        SessionInput {
            tx: self.input_tx.clone(),
            source,
        }
    }

    pub fn subscribe_hits(&self) -> broadcast::Receiver<HitNotice> {
        self.hits_tx.subscribe()
    }

    /// Latest published stats.
    pub fn stats(&self) -> SessionStats {
        *self.stats_rx.borrow()
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Hands a listener task to the session so teardown can release it.
    ///
    /// Listeners should exit on their own once the cancel token fires.
    pub fn attach_listener(&mut self, handle: JoinHandle<()>) {
        self.listeners.push(handle);
    }

    /// Stops the render loop. Safe to call more than once.
    pub fn cancel(&self) -> bool {
        self.cancel.cancel()
    }

    /// Cancels the loop, releases every listener and returns the final stats.
    pub async fn shutdown(self) -> SessionStats {
        self.cancel.cancel();

        let stats = match self.task.await {
            Ok(stats) => stats,
            Err(e) => {
                error!(error = %e, "session task failed");
                *self.stats_rx.borrow()
            }
        };

        for mut listener in self.listeners {
            if tokio::time::timeout(self.listener_grace, &mut listener)
                .await
                .is_err()
            {
                warn!("listener did not stop in time; aborting");
                listener.abort();
            }
        }

        stats
    }
}

#[allow(clippy::too_many_arguments)]
async fn session_task<D>(
    mut engine: EngineState,
    mut input_rx: mpsc::Receiver<SessionCommand>,
    hits_tx: broadcast::Sender<HitNotice>,
    stats_tx: watch::Sender<SessionStats>,
    sound: Arc<dyn SoundEffect>,
    mut draw: D,
    mut clock: FrameClock,
    cancel: CancelToken,
) -> SessionStats
where
    D: FnMut(&FrameSnapshot) + Send + 'static,
{
    info!(targets = engine.targets().len(), "session started");

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                // Commands already queued were delivered; apply them before stopping.
                while let Ok(cmd) = input_rx.try_recv() {
                    apply_command(&mut engine, cmd, &hits_tx, &stats_tx, sound.as_ref());
                }
                break;
            }
            frame = clock.tick() => {
                engine.advance(frame.dt, frame.now);
                draw(&FrameSnapshot::capture(&engine, frame.frame, frame.now));
            }
            cmd = input_rx.recv() => {
                match cmd {
                    Some(cmd) => apply_command(&mut engine, cmd, &hits_tx, &stats_tx, sound.as_ref()),
                    None => {
                        debug!("all session inputs dropped");
                        break;
                    }
                }
            }
        }
    }

    let stats = engine.stats();
    info!(
        points = stats.points,
        shots = stats.shots,
        hits = stats.hits,
        "session ended"
    );
    stats
}

fn apply_command(
    engine: &mut EngineState,
    cmd: SessionCommand,
    hits_tx: &broadcast::Sender<HitNotice>,
    stats_tx: &watch::Sender<SessionStats>,
    sound: &dyn SoundEffect,
) {
    match cmd {
        SessionCommand::Aim { x, y } => engine.set_aim(x, y),
        SessionCommand::Shoot { source } => {
            sound.play_shot();
            let result = engine.apply_shot();

            for r in &result.replaced {
                // No subscribers is fine; the notice is informational.
                let _ = hits_tx.send(HitNotice { points: r.points });
            }
            if result.is_hit() {
                let replaced: Vec<(u64, u64)> = result
                    .replaced
                    .iter()
                    .map(|r| (r.old_id, r.new_id))
                    .collect();
                info!(
                    ?source,
                    hits = result.replaced.len(),
                    ?replaced,
                    points = result.points_awarded,
                    "target hit"
                );
            } else {
                debug!(?source, x = result.aim.x, y = result.aim.y, "shot missed");
            }

            let _ = stats_tx.send(engine.stats());
        }
        SessionCommand::Resize { width, height } => {
            debug!(width, height, "playfield resized");
            engine.resize(Playfield::new(width, height));
        }
    }
}
