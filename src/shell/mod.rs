//! # Shell Module
//!
//! The I/O edge of the game: the shared snapshot cell, the input loop and the
//! background ticker.
//!
//! Both actors follow the same discipline: lock the cell, compute the successor
//! from the snapshot inside it, publish, unlock. The input loop waits for the
//! lock; the ticker only tries it and skips the tick if the cell is busy, so a
//! long stall never turns into a burst of catch-up frames.

pub mod loader;

pub use loader::*;

use crate::game::{advance_frame, FrameEvent, WorldState};
use crate::generation::GameConfig;
use crate::input::CommandInterpreter;
use crate::rendering::{join_lines, narrate};
use crate::{TicktaleError, TicktaleResult};
use log::{debug, info, log_enabled, trace, warn, Level};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::{watch, Mutex};
use tokio::time::MissedTickBehavior;

/// Output sink shared by the input loop and the ticker.
pub type SharedOutput<W> = Arc<Mutex<W>>;

/// The one mutable "current snapshot" cell of a session.
///
/// Cloning a `SharedWorld` clones the handle, not the snapshot.
#[derive(Debug, Clone)]
pub struct SharedWorld {
    state: Arc<Mutex<WorldState>>,
    ended: Arc<watch::Sender<bool>>,
}

/// What a single ticker attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The cell was locked by the input loop; the tick was dropped
    Busy,
    /// The session has ended; the ticker should stop
    Ended,
    /// The frame failed and the snapshot was left as it was
    Skipped,
    /// A new snapshot was published
    Advanced(Vec<FrameEvent>),
}

impl SharedWorld {
    /// Wraps the initial snapshot of a session.
    pub fn new(initial: WorldState) -> Self {
        let (ended, _) = watch::channel(!initial.running);
        Self {
            state: Arc::new(Mutex::new(initial)),
            ended: Arc::new(ended),
        }
    }

    /// Copy of the current snapshot.
    pub async fn snapshot(&self) -> WorldState {
        self.state.lock().await.clone()
    }

    /// Receiver that flips to true once a snapshot with `running == false` is
    /// published.
    pub fn subscribe_ended(&self) -> watch::Receiver<bool> {
        self.ended.subscribe()
    }

    /// Interprets a line against the current snapshot and publishes the result,
    /// all under the lock. Returns the text to show and whether the session is
    /// still running.
    pub async fn apply_line(&self, interpreter: &CommandInterpreter, line: &str) -> (String, bool) {
        let mut state = self.state.lock().await;
        let (text, next) = interpreter.interpret(line, &state);
        *state = next;
        trace_snapshot(&state);
        let running = state.running;
        drop(state);

        if !running {
            self.ended.send_replace(true);
        }
        (text, running)
    }

    /// Advances one frame if the cell is free right now.
    pub fn try_advance(&self, config: &GameConfig) -> TickOutcome {
        let Ok(mut state) = self.state.try_lock() else {
            return TickOutcome::Busy;
        };
        if state.is_game_ended() {
            return TickOutcome::Ended;
        }

        match advance_frame(&state, config) {
            Ok(outcome) => {
                *state = outcome.state;
                trace_snapshot(&state);
                let running = state.running;
                drop(state);

                if !running {
                    info!("Session ended by a frame");
                    self.ended.send_replace(true);
                }
                TickOutcome::Advanced(outcome.events)
            }
            Err(err) => {
                warn!("Skipping frame {}: {}", state.frame_number, err);
                TickOutcome::Skipped
            }
        }
    }
}

fn trace_snapshot(state: &WorldState) {
    if log_enabled!(Level::Trace) {
        match serde_json::to_string(state) {
            Ok(json) => trace!("Published snapshot: {}", json),
            Err(err) => trace!("Published snapshot (unserializable: {})", err),
        }
    }
}

/// Writes a text block followed by a newline and flushes.
pub async fn write_block<W>(output: &SharedOutput<W>, text: &str) -> TicktaleResult<()>
where
    W: AsyncWrite + Unpin,
{
    let mut out = output.lock().await;
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}

/// Background actor: advances a frame every `tick_interval_ms` until the session
/// ends, writing narrated frame events to `output`.
pub async fn run_ticker<W>(
    world: SharedWorld,
    config: GameConfig,
    output: SharedOutput<W>,
) -> TicktaleResult<()>
where
    W: AsyncWrite + Unpin,
{
    let mut interval = tokio::time::interval(Duration::from_millis(config.tick_interval_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately; the world starts moving one interval in.
    interval.tick().await;

    loop {
        interval.tick().await;
        match world.try_advance(&config) {
            TickOutcome::Ended => break,
            TickOutcome::Busy => debug!("Tick dropped: world is busy"),
            TickOutcome::Skipped => {}
            TickOutcome::Advanced(events) => {
                let messages: Vec<String> = events.iter().filter_map(narrate).collect();
                if !messages.is_empty() {
                    write_block(&output, &join_lines(messages)).await?;
                }
            }
        }
    }

    debug!("Ticker stopped");
    Ok(())
}

/// Foreground actor: reads lines, interprets them and writes the replies until
/// the session ends. End of input counts as `quit`.
pub async fn run_input_loop<R, W>(
    world: &SharedWorld,
    interpreter: &CommandInterpreter,
    input: R,
    output: &SharedOutput<W>,
) -> TicktaleResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut input = input;
    let mut ended = world.subscribe_ended();

    loop {
        let line = tokio::select! {
            line = read_line(&mut input) => line?,
            _ = ended.wait_for(|ended| *ended) => break,
        };

        let line = match line {
            Some(line) => line,
            None => {
                info!("Input closed, ending session");
                "quit".to_string()
            }
        };

        let (text, running) = world.apply_line(interpreter, &line).await;
        write_block(output, &text).await?;
        if !running {
            break;
        }
    }

    Ok(())
}

/// Reads one line without its `\n` or `\r\n` ending; `None` at end of input.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a garbled
/// line reaches the interpreter as an unrecognized command.
async fn read_line<R>(input: &mut R) -> TicktaleResult<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buffer = Vec::new();
    if input.read_until(b'\n', &mut buffer).await? == 0 {
        return Ok(None);
    }
    if buffer.last() == Some(&b'\n') {
        buffer.pop();
        if buffer.last() == Some(&b'\r') {
            buffer.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&buffer).into_owned()))
}

/// Runs a whole session: spawns the ticker, drives the input loop, and waits for
/// the ticker to notice the end.
///
/// If the input loop fails the session is quit before the error is returned, so
/// the ticker never outlives it.
pub async fn run_session<R, W>(
    world: SharedWorld,
    config: &GameConfig,
    input: R,
    output: SharedOutput<W>,
) -> TicktaleResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    config.validate()?;
    let interpreter = CommandInterpreter::from_config(config);
    let ticker = tokio::spawn(run_ticker(world.clone(), config.clone(), output.clone()));

    let result = run_input_loop(&world, &interpreter, input, &output).await;
    if result.is_err() {
        let _ = world.apply_line(&interpreter, "quit").await;
    }

    ticker
        .await
        .map_err(|err| TicktaleError::InvalidState(format!("ticker task failed: {}", err)))??;
    info!("Session finished");
    result
}
