// Client side of the external trigger channel. Inbound `shoot` becomes an
// External shot; each hit notice goes back out as a `hit` message.

use crate::interface_adapters::protocol::{ChannelInbound, ChannelOutbound};
use crate::use_cases::{CancelToken, HitNotice, SessionInput, ShotSource};

use futures_util::{SinkExt, StreamExt};
use std::fmt;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::{
    self, Message,
    client::IntoClientRequest,
    http::{HeaderValue, header::AUTHORIZATION},
};
use tracing::{Instrument, debug, info, info_span, warn};

#[derive(Debug)]
pub enum ChannelError {
    InvalidUrl(tungstenite::Error),
    InvalidToken,
    Connect(tungstenite::Error),
    // The session handed us an input for the wrong producer.
    WrongSource(ShotSource),
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelError::InvalidUrl(err) => write!(f, "invalid trigger channel url: {err}"),
            ChannelError::InvalidToken => write!(f, "bearer token is not a valid header value"),
            ChannelError::Connect(err) => write!(f, "trigger channel connect failed: {err}"),
            ChannelError::WrongSource(source) => {
                write!(f, "trigger channel needs an external input, got {source:?}")
            }
        }
    }
}

impl std::error::Error for ChannelError {}

/// Running connection. Stops on its own when the session's cancel token fires.
pub struct TriggerChannel {
    task: JoinHandle<()>,
}

impl TriggerChannel {
    /// Task handle to attach to the session as a listener.
    pub fn into_task(self) -> JoinHandle<()> {
        self.task
    }
}

/// Opens the channel with `Authorization: Bearer <token>` and spawns its pump task.
pub async fn connect_trigger_channel(
    url: &str,
    token: &str,
    input: SessionInput,
    hits_rx: broadcast::Receiver<HitNotice>,
    cancel: CancelToken,
) -> Result<TriggerChannel, ChannelError> {
    if input.source() != ShotSource::External {
        return Err(ChannelError::WrongSource(input.source()));
    }

    let mut request = url.into_client_request().map_err(ChannelError::InvalidUrl)?;
    let bearer =
        HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| ChannelError::InvalidToken)?;
    request.headers_mut().insert(AUTHORIZATION, bearer);

    let (stream, _response) = tokio_tungstenite::connect_async(request)
        .await
        .map_err(ChannelError::Connect)?;
    info!(url, "trigger channel connected");

    let span = info_span!("trigger_channel", url = %url);
    let task = tokio::spawn(run_channel(stream, input, hits_rx, cancel).instrument(span));
    Ok(TriggerChannel { task })
}

#[derive(Default)]
struct ChannelCounters {
    shots_in: u64,
    hits_out: u64,
    invalid: u64,
}

async fn run_channel<S>(
    stream: tokio_tungstenite::WebSocketStream<S>,
    input: SessionInput,
    mut hits_rx: broadcast::Receiver<HitNotice>,
    cancel: CancelToken,
) where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    let (mut sink, mut source) = stream.split();
    let mut counters = ChannelCounters::default();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                // Best-effort close; the peer may already be gone.
                if let Err(e) = sink.send(Message::Close(None)).await {
                    debug!(error = %e, "close frame not sent");
                }
                break;
            }
            notice = hits_rx.recv() => {
                match notice {
                    Ok(notice) => {
                        let txt = match serde_json::to_string(&ChannelOutbound::from(notice)) {
                            Ok(txt) => txt,
                            Err(e) => {
                                warn!(error = %e, "failed to serialize hit");
                                continue;
                            }
                        };
                        if let Err(e) = sink.send(Message::Text(txt.into())).await {
                            warn!(error = %e, "failed to send hit");
                        } else {
                            counters.hits_out += 1;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!(missed = n, "hit notices lagged; dropping");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("hit notices closed");
                        break;
                    }
                }
            }
            msg = source.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ChannelInbound>(text.as_str()) {
                            Ok(ChannelInbound::Shoot) => {
                                counters.shots_in += 1;
                                if input.shoot().await.is_err() {
                                    debug!("session closed; dropping shoot");
                                    break;
                                }
                            }
                            Ok(ChannelInbound::Status { msg }) => {
                                info!(%msg, "trigger channel status");
                            }
                            Err(e) => {
                                counters.invalid += 1;
                                debug!(error = %e, "ignoring unrecognised channel message");
                            }
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        info!(?frame, "trigger channel closed by peer");
                        break;
                    }
                    // Pings are answered by tungstenite; binary frames are not part of the contract.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(error = %e, "trigger channel receive failed");
                        break;
                    }
                    None => {
                        info!("trigger channel stream ended");
                        break;
                    }
                }
            }
        }
    }

    info!(
        shots_in = counters.shots_in,
        hits_out = counters.hits_out,
        invalid = counters.invalid,
        "trigger channel detached"
    );
}
