use std::sync::Arc;
use std::time::Duration as StdDuration;

use backend::ProgressGateway;
use chrono::Duration;
use posture_core::model::ProgressId;
use posture_core::session::{ExerciseSession, Transition};
use posture_core::{Clock, Countdown};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::reporter::ProgressReporter;
use super::setup::PreparedSession;
use super::snapshot::SessionSnapshot;

const COMMAND_BUFFER: usize = 8;

/// User actions accepted by a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Pause,
    Resume,
    Stop,
}

/// How a session loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every exercise's active phase ran to completion.
    Completed,
    /// The session was stopped before the last exercise finished.
    Stopped,
}

//
// ─── RUNNER ────────────────────────────────────────────────────────────────────
//

/// Drives an exercise session end to end on one spawned task.
///
/// Every transition happens inside that task: the phase countdown and the
/// user's commands are multiplexed with `select!`, so a command can never
/// race a timer expiry. Completed counts leave the loop as detached
/// fire-and-forget reports through [`ProgressReporter`].
#[derive(Clone)]
pub struct SessionRunner {
    clock: Clock,
    progress: Arc<dyn ProgressGateway>,
}

impl SessionRunner {
    #[must_use]
    pub fn new(clock: Clock, progress: Arc<dyn ProgressGateway>) -> Self {
        Self { clock, progress }
    }

    /// Spawns the session loop and returns a handle to it.
    ///
    /// The first exercise's active phase starts immediately; its report
    /// (completed count 1) is dispatched before the first snapshot. An
    /// empty program completes on the spot with no reports at all.
    #[must_use]
    pub fn start(&self, prepared: PreparedSession) -> SessionHandle {
        let session = ExerciseSession::new(prepared.exercises, prepared.timing);
        let now = self.clock.now();
        let countdown = Countdown::start(session.phase_seconds(), now);
        let remaining = if session.is_finished() {
            0
        } else {
            countdown.remaining_seconds(now)
        };
        let initial = SessionSnapshot::capture(&session, remaining);

        let (commands, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (snapshot_tx, snapshots) = watch::channel(initial);

        let session_loop = SessionLoop {
            clock: self.clock,
            session,
            countdown,
            progress_id: prepared.progress_id,
            reporter: ProgressReporter::new(self.progress.clone()),
            commands: command_rx,
            snapshots: snapshot_tx,
        };
        let task = tokio::spawn(session_loop.run());

        SessionHandle {
            commands,
            snapshots,
            task,
        }
    }
}

//
// ─── HANDLE ────────────────────────────────────────────────────────────────────
//

/// Caller-side handle to a spawned session loop.
///
/// Dropping the handle closes the command channel, which the loop treats
/// like an explicit stop.
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    snapshots: watch::Receiver<SessionSnapshot>,
    task: JoinHandle<SessionOutcome>,
}

impl SessionHandle {
    /// Freezes the countdown; the phase and exercise index are untouched.
    pub async fn pause(&self) {
        self.send(SessionCommand::Pause).await;
    }

    /// Continues from the exact remaining time observed at the pause.
    pub async fn resume(&self) {
        self.send(SessionCommand::Resume).await;
    }

    /// Ends the session immediately. No further reports are dispatched.
    pub async fn stop(&self) {
        self.send(SessionCommand::Stop).await;
    }

    async fn send(&self, command: SessionCommand) {
        // A closed channel means the loop already ended; commands to a
        // finished session are no-ops.
        let _ = self.commands.send(command).await;
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Snapshot stream for the presentation shell.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// Waits for the loop to end and returns how it finished.
    pub async fn join(self) -> SessionOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("session task failed: {}", err);
                SessionOutcome::Stopped
            }
        }
    }
}

//
// ─── LOOP ──────────────────────────────────────────────────────────────────────
//

struct SessionLoop {
    clock: Clock,
    session: ExerciseSession,
    countdown: Countdown,
    progress_id: ProgressId,
    reporter: ProgressReporter,
    commands: mpsc::Receiver<SessionCommand>,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl SessionLoop {
    async fn run(mut self) -> SessionOutcome {
        if self.session.is_finished() {
            // Empty program: nothing to time, nothing to report.
            self.publish();
            return SessionOutcome::Completed;
        }

        // The first exercise is underway as of now, so it already counts.
        self.reporter.dispatch(self.progress_id, self.session.position());
        self.publish();

        loop {
            if self.session.is_paused() {
                // Frozen: no deadline to wait for, only commands matter.
                match self.commands.recv().await {
                    Some(SessionCommand::Resume) => {
                        self.countdown.resume(self.clock.now());
                        self.session.resume();
                        self.publish();
                    }
                    Some(SessionCommand::Pause) => {}
                    Some(SessionCommand::Stop) | None => return self.stopped(),
                }
                continue;
            }

            let wait = self.next_wait();
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(SessionCommand::Pause) => {
                        self.countdown.pause(self.clock.now());
                        self.session.pause();
                        self.publish();
                    }
                    Some(SessionCommand::Resume) => {}
                    Some(SessionCommand::Stop) | None => return self.stopped(),
                },
                () = tokio::time::sleep(wait) => {
                    if let Some(outcome) = self.tick() {
                        return outcome;
                    }
                }
            }
        }
    }

    /// Sleep until the countdown deadline, re-waking at least once a
    /// second so the published remaining time keeps ticking.
    fn next_wait(&self) -> StdDuration {
        let remaining = self.countdown.remaining(self.clock.now());
        remaining
            .min(Duration::seconds(1))
            .to_std()
            .unwrap_or(StdDuration::ZERO)
    }

    fn tick(&mut self) -> Option<SessionOutcome> {
        let now = self.clock.now();
        if self.countdown.is_complete(now) {
            match self.session.complete_phase() {
                Transition::EnterRest => {
                    self.countdown = Countdown::start(self.session.phase_seconds(), now);
                }
                Transition::EnterActive { completed_count } => {
                    self.reporter.dispatch(self.progress_id, completed_count);
                    self.countdown = Countdown::start(self.session.phase_seconds(), now);
                }
                Transition::Finished => {
                    self.publish();
                    return Some(SessionOutcome::Completed);
                }
            }
        }
        self.publish();
        None
    }

    fn stopped(&self) -> SessionOutcome {
        debug!(
            "session stopped at exercise {}/{}",
            self.session.position(),
            self.session.total(),
        );
        SessionOutcome::Stopped
    }

    fn publish(&self) {
        let remaining = if self.session.is_finished() {
            0
        } else {
            self.countdown.remaining_seconds(self.clock.now())
        };
        self.snapshots
            .send_replace(SessionSnapshot::capture(&self.session, remaining));
    }
}
