//! Crack-simulation session manager.
//!
//! Owns the lifecycle of at most one live connection to the remote
//! crack-simulation feed. Starting a new session unconditionally tears
//! down the prior one before anything else happens; teardown looks
//! synchronous to the caller even though the reader task unwinds on its
//! own time.

use futures_util::StreamExt;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio_util::sync::CancellationToken;

use crate::client::{ApiClient, ApiError};
use crate::types::{PersonalInfo, ValidationError};

pub const MIN_TIME_LIMIT_SECS: u32 = 5;
pub const MAX_TIME_LIMIT_SECS: u32 = 300;

const CHANNEL_CAPACITY: usize = 64;

/// Parameters for one crack simulation.
#[derive(Debug)]
pub struct CrackRequest {
    pub password: SecretString,
    pub time_limit_secs: u32,
    pub use_personal_info: bool,
    pub personal_info: PersonalInfo,
}

impl CrackRequest {
    /// Rejects malformed input before any connection is attempted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.password.expose_secret().is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        if !(MIN_TIME_LIMIT_SECS..=MAX_TIME_LIMIT_SECS).contains(&self.time_limit_secs) {
            return Err(ValidationError::TimeLimitOutOfRange(self.time_limit_secs));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Streaming,
    Closed,
}

#[derive(Debug)]
pub enum StreamEvent {
    Line(String),
    Closed,
    Failed(ApiError),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// State machine for the live crack feed: `Idle → Streaming → Closed`.
///
/// The log belongs exclusively to the current session: it is append-only
/// while streaming, retained immutable after close, and discarded (not
/// reused) when a new session starts.
#[derive(Debug, Default)]
pub struct SessionManager {
    state: SessionState,
    log: Vec<String>,
    cancel: Option<CancellationToken>,
    events: Option<mpsc::Receiver<StreamEvent>>,
    last_error: Option<ApiError>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The accumulated simulation log, in arrival order.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// The stream failure that closed the session, if any.
    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    /// Opens a new simulation stream.
    ///
    /// Validation failures and URL errors leave the current session
    /// untouched. Otherwise any live stream is superseded: its token is
    /// cancelled and its channel dropped before the new connection is
    /// issued, so none of its remaining lines can ever reach the log.
    pub fn start(&mut self, client: &ApiClient, request: &CrackRequest) -> Result<(), SessionError> {
        request.validate()?;
        let url = client.crack_stream_url(request)?;

        let token = CancellationToken::new();
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        self.attach(rx, token.clone());

        #[cfg(feature = "tracing")]
        tracing::info!(time_limit = request.time_limit_secs, "crack stream starting");

        tokio::spawn(stream_task(client.clone(), url, tx, token));
        Ok(())
    }

    /// Closes the live stream. No-op unless currently streaming.
    ///
    /// Lines already delivered to the channel are appended to the log
    /// before teardown; only the stream's future lines are cut off.
    pub fn stop(&mut self) {
        if self.state != SessionState::Streaming {
            return;
        }
        self.drain();
        // drain may already have observed a terminal event
        if self.state == SessionState::Streaming {
            #[cfg(feature = "tracing")]
            tracing::info!(lines = self.log.len(), "crack stream stopped");
            self.teardown();
            self.state = SessionState::Closed;
        }
    }

    /// Appends every ready line to the log without blocking; returns how
    /// many were appended. Terminal events flip the session to `Closed`.
    pub fn drain(&mut self) -> usize {
        let mut appended = 0;
        loop {
            let event = match self.events.as_mut() {
                Some(events) => events.try_recv(),
                None => break,
            };
            match event {
                Ok(StreamEvent::Line(line)) => {
                    self.log.push(line);
                    appended += 1;
                }
                Ok(StreamEvent::Closed) => {
                    self.finish(None);
                    break;
                }
                Ok(StreamEvent::Failed(err)) => {
                    self.finish(Some(err));
                    break;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.finish(None);
                    break;
                }
            }
        }
        appended
    }

    /// Waits for the next line, appending it to the log. Returns `None`
    /// once the stream has ended, after transitioning to `Closed`.
    pub async fn next_line(&mut self) -> Option<String> {
        let event = match self.events.as_mut() {
            Some(events) => events.recv().await,
            None => return None,
        };
        match event {
            Some(StreamEvent::Line(line)) => {
                self.log.push(line.clone());
                Some(line)
            }
            Some(StreamEvent::Failed(err)) => {
                self.finish(Some(err));
                None
            }
            Some(StreamEvent::Closed) | None => {
                self.finish(None);
                None
            }
        }
    }

    /// Adopts a fresh event channel, discarding any prior session's
    /// state. The old receiver is dropped here, so in-flight lines from
    /// a superseded stream can no longer be delivered.
    fn attach(&mut self, events: mpsc::Receiver<StreamEvent>, cancel: CancellationToken) {
        self.teardown();
        self.log.clear();
        self.last_error = None;
        self.events = Some(events);
        self.cancel = Some(cancel);
        self.state = SessionState::Streaming;
    }

    fn teardown(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        self.events = None;
    }

    /// Remote-initiated end of stream: keep the log, record the failure.
    fn finish(&mut self, error: Option<ApiError>) {
        #[cfg(feature = "tracing")]
        if let Some(err) = &error {
            tracing::warn!("crack stream failed: {}", err);
        }
        self.teardown();
        self.last_error = error;
        self.state = SessionState::Closed;
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Reads the event feed and forwards one [`StreamEvent`] per line until
/// the stream ends, fails, or the session is torn down.
async fn stream_task(
    client: ApiClient,
    url: Url,
    tx: mpsc::Sender<StreamEvent>,
    cancel: CancellationToken,
) {
    let response = tokio::select! {
        _ = cancel.cancelled() => return,
        response = client.open_stream(url) => response,
    };
    let response = match response {
        Ok(response) => response,
        Err(err) => {
            let _ = tx.send(StreamEvent::Failed(err)).await;
            return;
        }
    };

    let mut body = response.bytes_stream();
    let mut buffer = Vec::new();
    loop {
        let chunk = tokio::select! {
            _ = cancel.cancelled() => return,
            chunk = body.next() => chunk,
        };
        match chunk {
            Some(Ok(bytes)) => {
                for line in sse_feed(&mut buffer, &bytes) {
                    if tx.send(StreamEvent::Line(line)).await.is_err() {
                        // receiver gone: the session was superseded or dropped
                        return;
                    }
                }
            }
            Some(Err(err)) => {
                let _ = tx.send(StreamEvent::Failed(err.into())).await;
                return;
            }
            None => {
                for line in sse_flush(&buffer) {
                    if tx.send(StreamEvent::Line(line)).await.is_err() {
                        return;
                    }
                }
                let _ = tx.send(StreamEvent::Closed).await;
                return;
            }
        }
    }
}

/// Incremental server-sent-events parser: buffers raw bytes, yields the
/// `data:` payload of every complete (blank-line-terminated) event.
/// Splitting only ever happens at `\n\n`, so multi-byte characters
/// survive chunk boundaries.
fn sse_feed(buffer: &mut Vec<u8>, chunk: &[u8]) -> Vec<String> {
    buffer.extend_from_slice(chunk);
    let mut lines = Vec::new();
    while let Some(pos) = buffer.windows(2).position(|w| w == b"\n\n") {
        let event: Vec<u8> = buffer.drain(..pos + 2).collect();
        push_data_lines(&String::from_utf8_lossy(&event), &mut lines);
    }
    lines
}

/// Salvages any unterminated trailing event once the stream has ended.
fn sse_flush(buffer: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    push_data_lines(&String::from_utf8_lossy(buffer), &mut lines);
    lines
}

fn push_data_lines(event: &str, lines: &mut Vec<String>) {
    for line in event.lines() {
        if let Some(data) = line.strip_prefix("data:") {
            lines.push(data.strip_prefix(' ').unwrap_or(data).to_string());
        }
    }
}
