// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live queue notifications for station displays.
//!
//! Events say that something changed, never what the queue now is.
//! Clients re-read the HTTP endpoints for authoritative data, and nothing
//! sent by a client over the socket is acted on.

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::AppState;

/// Maximum number of events to buffer in the broadcast channel.
/// Slow clients lose the oldest events.
const EVENT_BUFFER_SIZE: usize = 100;

/// Live event types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// A destination was registered.
    DestinationRegistered {
        /// The destination name.
        destination: String,
    },
    /// A destination's active queue changed.
    QueueChanged {
        /// The destination name.
        destination: String,
    },
    /// A destination's overnight list changed.
    OvernightChanged {
        /// The destination name.
        destination: String,
    },
    /// Overnight vehicles moved into the active queue.
    OvernightPromoted {
        /// The destination name.
        destination: String,
        /// How many vehicles moved.
        promoted: usize,
    },
    /// Seats were booked.
    SeatsBooked {
        /// The destination name.
        destination: String,
        /// Seats booked.
        seats: u32,
    },
    /// A ticket was checked at boarding.
    TicketVerified {
        /// The destination name.
        destination: String,
        /// Seats on the ticket.
        seats: u32,
    },
    /// The station opened or closed.
    StationStatusChanged {
        /// Whether bookings and promotions are accepted.
        operational: bool,
    },
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (ISO 8601).
        timestamp: String,
    },
}

/// Fan-out of live events to every connected client.
#[derive(Clone)]
pub struct LiveEventBroadcaster {
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    /// Creates a new event broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts an event to all connected clients.
    ///
    /// Never blocks; with no clients connected the event is dropped.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(?event, receivers = count, "Broadcast live event");
            }
            Err(_) => {
                debug!(?event, "No receivers for live event");
            }
        }
    }

    /// Subscribes to events sent from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Upgrades `GET /live` to a WebSocket that streams [`LiveEvent`]s.
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(app_state): AxumState<AppState>,
) -> Response {
    let broadcaster: Arc<LiveEventBroadcaster> = Arc::clone(&app_state.broadcaster);
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

async fn handle_socket(socket: WebSocket, broadcaster: Arc<LiveEventBroadcaster>) {
    info!("Display connected to live queue stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    let connected_event: LiveEvent = LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!(?e, "Failed to serialize live event");
                    }
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live client lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Display disconnected from live queue stream");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_no_receivers() {
        let broadcaster = LiveEventBroadcaster::new();
        assert_eq!(broadcaster.tx.receiver_count(), 0);
        broadcaster.broadcast(&LiveEvent::QueueChanged {
            destination: String::from("Sousse"),
        });
    }

    #[test]
    fn test_multiple_receivers() {
        let broadcaster = LiveEventBroadcaster::new();
        let mut rx1 = broadcaster.subscribe();
        let mut rx2 = broadcaster.subscribe();

        broadcaster.broadcast(&LiveEvent::SeatsBooked {
            destination: String::from("Sousse"),
            seats: 3,
        });

        assert!(matches!(rx1.try_recv(), Ok(LiveEvent::SeatsBooked { seats: 3, .. })));
        assert!(matches!(rx2.try_recv(), Ok(LiveEvent::SeatsBooked { seats: 3, .. })));
    }

    #[test]
    fn test_event_wire_format() {
        let event = LiveEvent::OvernightPromoted {
            destination: String::from("Monastir"),
            promoted: 2,
        };

        let json = serde_json::to_string(&event).expect("Failed to serialize");
        assert_eq!(
            json,
            r#"{"type":"overnight_promoted","destination":"Monastir","promoted":2}"#
        );
        let parsed: LiveEvent = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(parsed, event);
    }
}
