//! Runs a [`SnakeGame`] on its own task so that ticks and input from any
//! number of threads are applied one at a time, in the order they arrive.
use std::time::Duration;

use log::{debug, error};
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
    time::{self, Instant, Interval, MissedTickBehavior},
};

use crate::models::snake::{
    snake_direction::SnakeDirection,
    snake_game::{Result, SnakeError, SnakeGame},
    snake_snapshot::SnakeSnapshot,
};

#[derive(Debug)]
pub enum HostMessage {
    RequestDirection(SnakeDirection),
    ConfigureGrid(usize, oneshot::Sender<Result<()>>),
    Reset(oneshot::Sender<SnakeSnapshot>),
    Tick(oneshot::Sender<SnakeSnapshot>),
    GetSnapshot(oneshot::Sender<SnakeSnapshot>),
    Kill,
}

/// Handle to a game running on a tokio task.
#[derive(Debug)]
pub struct SnakeHost {
    sender: mpsc::UnboundedSender<HostMessage>,
    snapshots: watch::Receiver<SnakeSnapshot>,
    main_handle: JoinHandle<SnakeGame>,
}

impl SnakeHost {
    /// Moves `game` onto a new task. With `auto_tick` set the game advances
    /// every period; otherwise, or for a zero period, only [`SnakeHost::tick`]
    /// advances it.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(game: SnakeGame, auto_tick: Option<Duration>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (publisher, snapshots) = watch::channel(game.snapshot());
        let ticker = auto_tick.filter(|period| !period.is_zero()).map(|period| {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });
        Self {
            sender,
            snapshots,
            main_handle: tokio::spawn(Self::main_loop(game, receiver, publisher, ticker)),
        }
    }

    async fn main_loop(
        mut game: SnakeGame,
        mut receiver: mpsc::UnboundedReceiver<HostMessage>,
        publisher: watch::Sender<SnakeSnapshot>,
        mut ticker: Option<Interval>,
    ) -> SnakeGame {
        loop {
            tokio::select! {
                // queued input is applied before a tick that is already due
                biased;

                message = receiver.recv() => {
                    let Some(message) = message else {
                        debug!("All host handles dropped. Stopping");
                        break;
                    };
                    match message {
                        HostMessage::RequestDirection(direction) => {
                            game.request_direction_change(direction);
                        }
                        HostMessage::ConfigureGrid(size, reply) => {
                            if reply.send(game.configure_grid(size)).is_err() {
                                debug!("ConfigureGrid caller went away");
                            }
                        }
                        HostMessage::Reset(reply) => {
                            let snapshot = game.reset();
                            publisher.send_replace(snapshot.clone());
                            if reply.send(snapshot).is_err() {
                                debug!("Reset caller went away");
                            }
                        }
                        HostMessage::Tick(reply) => {
                            let snapshot = game.tick();
                            publisher.send_replace(snapshot.clone());
                            if reply.send(snapshot).is_err() {
                                debug!("Tick caller went away");
                            }
                        }
                        HostMessage::GetSnapshot(reply) => {
                            if reply.send(game.snapshot()).is_err() {
                                debug!("Snapshot caller went away");
                            }
                        }
                        HostMessage::Kill => {
                            debug!("Killing host loop");
                            break;
                        }
                    }
                }
                () = next_tick(&mut ticker) => {
                    if !game.is_game_over() {
                        publisher.send_replace(game.tick());
                    }
                }
            }
        }
        game
    }

    fn send(&self, message: HostMessage) -> Result<()> {
        self.sender.send(message).map_err(|e| {
            error!("Error sending message to host loop: {e}");
            SnakeError::HostClosed
        })
    }

    async fn ask<T>(
        &self,
        make_message: impl FnOnce(oneshot::Sender<T>) -> HostMessage,
    ) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.send(make_message(reply))?;
        response.await.map_err(|_| SnakeError::HostClosed)
    }

    /// Queues a turn for the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::HostClosed`] if the host loop has stopped.
    pub fn request_direction_change(&self, direction: SnakeDirection) -> Result<()> {
        self.send(HostMessage::RequestDirection(direction))
    }

    /// # Errors
    ///
    /// Returns the game's rejection of `grid_size`, or [`SnakeError::HostClosed`].
    pub async fn configure_grid(&self, grid_size: usize) -> Result<()> {
        self.ask(|reply| HostMessage::ConfigureGrid(grid_size, reply))
            .await?
    }

    /// # Errors
    ///
    /// Returns [`SnakeError::HostClosed`] if the host loop has stopped.
    pub async fn reset(&self) -> Result<SnakeSnapshot> {
        self.ask(HostMessage::Reset).await
    }

    /// Advances the game by one step, in addition to any automatic ticks.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::HostClosed`] if the host loop has stopped.
    pub async fn tick(&self) -> Result<SnakeSnapshot> {
        self.ask(HostMessage::Tick).await
    }

    /// # Errors
    ///
    /// Returns [`SnakeError::HostClosed`] if the host loop has stopped.
    pub async fn snapshot(&self) -> Result<SnakeSnapshot> {
        self.ask(HostMessage::GetSnapshot).await
    }

    /// Receiver that sees every snapshot published after a tick or reset.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SnakeSnapshot> {
        self.snapshots.clone()
    }

    /// Stops the loop and hands the game back.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::HostClosed`] if the host task panicked.
    pub async fn shutdown(self) -> Result<SnakeGame> {
        if self.sender.send(HostMessage::Kill).is_err() {
            debug!("Host loop already stopped");
        }
        self.main_handle.await.map_err(|e| {
            error!("Host task failed: {e}");
            SnakeError::HostClosed
        })
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
