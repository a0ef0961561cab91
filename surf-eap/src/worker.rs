//! Authentication worker: the retry/restart state machine
//!
//! One supervisor owns one live attempt at a time. An attempt runs the
//! receive loop until it reaches a terminal condition and reports how it
//! ended; the supervisor decides whether to restart with a fresh
//! `SessionState` (after repeated failure or a stalled link) or to
//! return (log-off confirmed, external cancellation).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use surf_core::{Link, Result};

use crate::challenge::H3cResponder;
use crate::constants::{
    DEFAULT_RESTART_BACKOFF, DEFAULT_RETRY_CEILING, DEFAULT_WATCHDOG_TIMEOUT,
    ETHERNET_HEADER_SIZE,
};
use crate::packet::{self, EapCode, EapMethod, EapolCode};
use crate::session::SessionState;

/// Retry/restart policy knobs.
///
/// The defaults match the timing the SYSU campus authenticator was
/// observed to expect; they are plain data so deployments against other
/// authenticators can adjust them without touching the state machine.
#[derive(Debug, Clone, Copy)]
pub struct WorkerConfig {
    /// Failures tolerated within one attempt before a full restart
    pub retry_ceiling: u32,
    /// Pause before the restart that follows exhausted retries
    pub restart_backoff: Duration,
    /// Restart if no Request arrives within this window
    pub watchdog_timeout: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            retry_ceiling: DEFAULT_RETRY_CEILING,
            restart_backoff: DEFAULT_RESTART_BACKOFF,
            watchdog_timeout: DEFAULT_WATCHDOG_TIMEOUT,
        }
    }
}

/// Flags shared between the controller and the worker.
///
/// Both are single-writer (controller) / single-reader (worker), so plain
/// relaxed atomics are enough.
#[derive(Debug, Clone, Default)]
pub struct WorkerControl {
    cancelled: Arc<AtomicBool>,
    log_off: Arc<AtomicBool>,
}

impl WorkerControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the worker to stop at the next loop iteration
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Record that EAPOL-LogOff was sent; the next Failure is then the
    /// peer confirming the log-off rather than an authentication failure
    pub fn mark_log_off(&self) {
        self.log_off.store(true, Ordering::Relaxed);
    }

    pub fn has_log_off(&self) -> bool {
        self.log_off.load(Ordering::Relaxed)
    }
}

/// How a single authentication attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttemptOutcome {
    /// Watchdog expired with no Request from the peer
    Stalled,
    /// Retry ceiling reached; restart after backoff
    Exhausted,
    /// Log-off confirmed by the peer; terminal
    LoggedOff,
    /// External cancellation observed
    Cancelled,
}

/// Run authentication attempts until the session ends.
///
/// Blocking; meant to run on a dedicated blocking task. Returns `Ok` on
/// log-off or cancellation, `Err` only on link I/O failure.
pub fn run_supervisor<L: Link>(
    link: Arc<Mutex<L>>,
    responder: H3cResponder,
    ethernet_header: [u8; ETHERNET_HEADER_SIZE],
    control: WorkerControl,
    config: WorkerConfig,
) -> Result<()> {
    loop {
        let attempt = Uuid::now_v7();
        let mut state = SessionState::new();
        debug!(attempt = %attempt, "starting authentication attempt");

        let outcome = run_attempt(
            &link,
            &responder,
            &ethernet_header,
            &control,
            &config,
            &mut state,
        )?;

        match outcome {
            AttemptOutcome::Stalled => {
                warn!(attempt = %attempt, "no request within watchdog window, restarting session");
            }
            AttemptOutcome::Exhausted => {
                warn!(
                    attempt = %attempt,
                    backoff_secs = config.restart_backoff.as_secs(),
                    "retries exhausted, restarting session after backoff"
                );
                std::thread::sleep(config.restart_backoff);
            }
            AttemptOutcome::LoggedOff => {
                info!(attempt = %attempt, "log off succeeded");
                return Ok(());
            }
            AttemptOutcome::Cancelled => {
                debug!(attempt = %attempt, "worker cancelled");
                return Ok(());
            }
        }
    }
}

/// One pass of the receive loop, from EAPOL-Start to a terminal condition.
fn run_attempt<L: Link>(
    link: &Mutex<L>,
    responder: &H3cResponder,
    header: &[u8; ETHERNET_HEADER_SIZE],
    control: &WorkerControl,
    config: &WorkerConfig,
    state: &mut SessionState,
) -> Result<AttemptOutcome> {
    send_start(link, header)?;
    let mut last_request = Instant::now();

    while !control.is_cancelled() {
        let raw = link.lock().receive_next()?;

        if let Some(frame) = raw.as_deref().and_then(packet::parse_received) {
            if frame.eapol_code == EapolCode::Packet {
                if let Some(eap) = frame.eap {
                    match eap.code {
                        EapCode::Success => {
                            info!("got EAP success");
                            state.succeeded = true;
                        }
                        EapCode::Failure => {
                            if control.has_log_off() {
                                return Ok(AttemptOutcome::LoggedOff);
                            }
                            warn!("got EAP failure");
                            if state.failure_count < config.retry_ceiling {
                                state.failure_count += 1;
                                if state.succeeded {
                                    // Re-assert the identity the server already accepted
                                    send_identity_response(link, responder, header, state.last_id)?;
                                } else {
                                    send_start(link, header)?;
                                    last_request = Instant::now();
                                }
                            } else {
                                return Ok(AttemptOutcome::Exhausted);
                            }
                        }
                        EapCode::Request => {
                            match eap.method {
                                Some(EapMethod::Identity) => {
                                    info!("got EAP request for identity");
                                    state.last_id = eap.identifier;
                                    send_identity_response(link, responder, header, eap.identifier)?;
                                }
                                Some(EapMethod::H3c) => {
                                    info!("got EAP request for H3C");
                                    send_response(
                                        link,
                                        header,
                                        eap.identifier,
                                        EapMethod::H3c,
                                        &responder.h3c_response(),
                                    )?;
                                }
                                Some(EapMethod::Md5) => {
                                    info!("got EAP request for MD5 challenge");
                                    handle_md5_request(link, responder, header, &eap)?;
                                }
                                _ => {}
                            }
                            last_request = Instant::now();
                        }
                        EapCode::LoginMessage => {
                            // Message text starts four bytes into the payload
                            if eap.identifier == 5 && eap.data.len() >= 4 {
                                let text = String::from_utf8_lossy(&eap.data[4..]);
                                info!(message = %text, "got server message");
                            }
                        }
                        EapCode::Response => {}
                    }

                    // Any forward progress clears the failure backoff
                    if eap.code != EapCode::Failure {
                        state.failure_count = 0;
                    }
                }
            }
        }

        if last_request.elapsed() > config.watchdog_timeout {
            return Ok(AttemptOutcome::Stalled);
        }
    }

    Ok(AttemptOutcome::Cancelled)
}

fn handle_md5_request<L: Link>(
    link: &Mutex<L>,
    responder: &H3cResponder,
    header: &[u8; ETHERNET_HEADER_SIZE],
    eap: &packet::EapFrame,
) -> Result<()> {
    let Some((&challenge_len, rest)) = eap.data.split_first() else {
        warn!("MD5 challenge request carries no data, dropping");
        return Ok(());
    };

    let challenge = &rest[..rest.len().min(challenge_len as usize)];
    match responder.md5_response(eap.identifier, challenge) {
        Ok(payload) => send_response(link, header, eap.identifier, EapMethod::Md5, &payload),
        Err(e) => {
            warn!(error = %e, "dropping malformed MD5 challenge");
            Ok(())
        }
    }
}

fn send_frame<L: Link>(
    link: &Mutex<L>,
    header: &[u8; ETHERNET_HEADER_SIZE],
    eapol: &[u8],
) -> Result<()> {
    let mut frame = Vec::with_capacity(header.len() + eapol.len());
    frame.extend_from_slice(header);
    frame.extend_from_slice(eapol);
    link.lock().send(&frame)
}

fn send_start<L: Link>(link: &Mutex<L>, header: &[u8; ETHERNET_HEADER_SIZE]) -> Result<()> {
    info!("send EAPOL start");
    send_frame(link, header, &packet::eapol_frame(EapolCode::Start, &[]))
}

fn send_response<L: Link>(
    link: &Mutex<L>,
    header: &[u8; ETHERNET_HEADER_SIZE],
    identifier: u8,
    method: EapMethod,
    payload: &[u8],
) -> Result<()> {
    let eap = packet::eap_frame(EapCode::Response, identifier, method, payload);
    send_frame(link, header, &packet::eapol_frame(EapolCode::Packet, &eap))
}

fn send_identity_response<L: Link>(
    link: &Mutex<L>,
    responder: &H3cResponder,
    header: &[u8; ETHERNET_HEADER_SIZE],
    identifier: u8,
) -> Result<()> {
    info!("send identity response");
    send_response(
        link,
        header,
        identifier,
        EapMethod::Identity,
        &responder.identity_response(),
    )
}
