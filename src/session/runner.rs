//! The serialized session loop.
//!
//! A `Session` is the single execution context of a game. It owns the
//! image pool, the current `GameMachine`, a command queue and a scheduler
//! for delayed pair resolution. Nothing touches game state except the
//! tasks it pulls off its own queue:
//!
//! ```text
//! submit(cmd) ──► queue ──► pump() ──► machine ──► events ──► listener
//!                   ▲                     │
//!                   │                     ▼ PairPending(ticket)
//!   advance(ms) ── scheduler ◄──── schedule(delay, ticket)
//! ```
//!
//! Resetting or changing photos clears the scheduler; a ticket that is
//! already queued is rejected by the machine's epoch check.

use std::collections::VecDeque;

use super::command::Command;
use super::scheduler::Scheduler;
use crate::cards::{ImagePool, ImageRef};
use crate::core::{GameConfig, GameSnapshot, GameState, SessionError};
use crate::events::{EventLog, GameEvent, GameListener};
use crate::rules::{GameMachine, ResolutionTicket, SelectOutcome};

/// Which screen the session is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Collecting photos into the pool.
    SelectingPhotos,
    /// A game is dealt.
    Playing,
}

#[derive(Clone, Debug)]
enum Task {
    Command(Command),
    Resolve(ResolutionTicket),
}

/// Single-threaded owner of a concentration game.
pub struct Session<L> {
    config: GameConfig,
    pool: ImagePool,
    /// Events emitted by the machine are buffered here, then forwarded.
    game: Option<GameMachine<EventLog>>,
    queue: VecDeque<Task>,
    scheduler: Scheduler<ResolutionTicket>,
    listener: L,
}

impl<L: GameListener> Session<L> {
    /// Create a session with an empty pool sized for `config.pair_count`.
    pub fn new(config: GameConfig, listener: L) -> Self {
        Self {
            pool: ImagePool::new(config.pair_count),
            config,
            game: None,
            queue: VecDeque::new(),
            scheduler: Scheduler::new(),
            listener,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.game.is_some() {
            Phase::Playing
        } else {
            Phase::SelectingPhotos
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn pool(&self) -> &ImagePool {
        &self.pool
    }

    /// State of the current game, if one is dealt.
    #[must_use]
    pub fn state(&self) -> Option<&GameState> {
        self.game.as_ref().map(GameMachine::state)
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<GameSnapshot> {
        self.game.as_ref().map(GameMachine::snapshot)
    }

    /// A game can be started once the pool is full.
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.game.is_none() && self.pool.is_full()
    }

    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Virtual time in milliseconds since the session was created.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Time until the pending pair resolves, if one is waiting.
    #[must_use]
    pub fn next_deadline_in(&self) -> Option<u64> {
        self.scheduler.next_due_in()
    }

    // === Loop ===

    /// Queue a command. Nothing happens until the queue is pumped.
    pub fn submit(&mut self, command: Command) {
        self.queue.push_back(Task::Command(command));
    }

    /// Apply every queued task in order. Returns how many ran.
    ///
    /// Rejected commands are logged and dropped.
    pub fn pump(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.queue.pop_front() {
            if let Err(err) = self.run(task) {
                tracing::debug!(%err, "Rejected session command");
            }
            ran += 1;
        }
        ran
    }

    /// Let `elapsed_ms` pass: apply queued commands, then everything that
    /// came due in the meantime.
    pub fn advance(&mut self, elapsed_ms: u64) {
        self.pump();
        for ticket in self.scheduler.advance(elapsed_ms) {
            self.queue.push_back(Task::Resolve(ticket));
        }
        self.pump();
    }

    /// Apply a command right away, after anything already queued, and
    /// report why it was rejected.
    pub fn execute(&mut self, command: Command) -> Result<(), SessionError> {
        self.pump();
        self.run(Task::Command(command))
    }

    // === Commands ===

    pub fn add_picked(&mut self, images: impl IntoIterator<Item = ImageRef>) {
        self.dispatch(Command::AddPicked(images.into_iter().collect()));
    }

    pub fn add_captured(&mut self, image: ImageRef) {
        self.dispatch(Command::AddCaptured(image));
    }

    pub fn remove_photo(&mut self, position: usize) {
        self.dispatch(Command::RemovePhoto(position));
    }

    pub fn start_game(&mut self) {
        self.dispatch(Command::StartGame);
    }

    pub fn select_card(&mut self, index: usize) {
        self.dispatch(Command::SelectCard(index));
    }

    pub fn reset(&mut self) {
        self.dispatch(Command::Reset);
    }

    pub fn change_photos(&mut self) {
        self.dispatch(Command::ChangePhotos);
    }

    fn dispatch(&mut self, command: Command) {
        self.submit(command);
        self.pump();
    }

    fn run(&mut self, task: Task) -> Result<(), SessionError> {
        let result = match task {
            Task::Command(command) => {
                tracing::trace!(command = command.name(), "Running session command");
                self.apply(command)
            }
            Task::Resolve(ticket) => {
                self.resolve(ticket);
                Ok(())
            }
        };
        self.flush_events();
        result
    }

    fn apply(&mut self, command: Command) -> Result<(), SessionError> {
        match command {
            Command::AddPicked(images) => {
                self.require_selecting()?;
                let offered = images.len();
                let accepted = self.pool.add_picked(images);
                if accepted < offered {
                    tracing::debug!(offered, accepted, "Pool rejected some picked images");
                }
                Ok(())
            }
            Command::AddCaptured(image) => {
                self.require_selecting()?;
                self.pool.add_captured(image)?;
                Ok(())
            }
            Command::RemovePhoto(position) => {
                self.require_selecting()?;
                self.pool.remove(position)?;
                Ok(())
            }
            Command::StartGame => self.start(),
            Command::SelectCard(index) => {
                let delay = self.config.resolve_delay_ms;
                let game = self.game.as_mut().ok_or(SessionError::NotPlaying)?;
                if let SelectOutcome::PairPending(ticket) = game.try_select_card(index)? {
                    self.scheduler.schedule(delay, ticket);
                }
                Ok(())
            }
            Command::Reset => {
                let game = self.game.as_mut().ok_or(SessionError::NotPlaying)?;
                game.reset();
                self.scheduler.clear();
                Ok(())
            }
            Command::ChangePhotos => {
                let game = self.game.take().ok_or(SessionError::NotPlaying)?;
                self.forward(game.into_listener());
                self.scheduler.clear();
                self.pool.clear();
                self.listener.on_event(&GameEvent::MusicStopped);
                tracing::info!("Returned to photo selection");
                Ok(())
            }
        }
    }

    fn start(&mut self) -> Result<(), SessionError> {
        self.require_selecting()?;
        if !self.pool.is_full() {
            return Err(SessionError::PoolIncomplete {
                have: self.pool.len(),
                need: self.pool.capacity(),
            });
        }

        let mut game = GameMachine::new(self.config.clone(), self.pool.images(), EventLog::new())?;
        game.start();
        self.scheduler.clear();
        self.game = Some(game);
        Ok(())
    }

    fn resolve(&mut self, ticket: ResolutionTicket) {
        match self.game.as_mut() {
            Some(game) => {
                game.resolve(ticket);
            }
            None => tracing::debug!(epoch = ticket.epoch(), "Dropped resolution without a game"),
        }
    }

    fn require_selecting(&self) -> Result<(), SessionError> {
        if self.game.is_some() {
            return Err(SessionError::AlreadyPlaying);
        }
        Ok(())
    }

    fn flush_events(&mut self) {
        if let Some(game) = self.game.as_mut() {
            let events = game.listener_mut().drain();
            for event in &events {
                self.listener.on_event(event);
            }
        }
    }

    fn forward(&mut self, mut log: EventLog) {
        for event in log.drain() {
            self.listener.on_event(&event);
        }
    }
}

impl<L> std::fmt::Debug for Session<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("pool", &self.pool)
            .field("game", &self.game)
            .field("queued", &self.queue.len())
            .field("scheduled", &self.scheduler.len())
            .finish_non_exhaustive()
    }
}
