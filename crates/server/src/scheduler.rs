// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Daily overnight promotion.
//!
//! At each station opening every destination's overnight list is moved
//! into its active queue. A destination that cannot be promoted is logged
//! and left parked; the others still move. Nothing moves while the station
//! is closed.

use std::sync::Arc;

use louaj::QueueStore;
use louaj_api::{PromoteOvernightResponse, promote_destination};
use louaj_audit::{Actor, Cause};
use louaj_domain::{Destination, PromotionSchedule, next_promotion_at};
use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::live::{LiveEvent, LiveEventBroadcaster};

/// Starts the promotion loop on the current runtime.
pub fn spawn(
    store: Arc<QueueStore>,
    broadcaster: Arc<LiveEventBroadcaster>,
    schedule: PromotionSchedule,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            opening_time = %schedule.opening_time(),
            timezone = schedule.timezone(),
            "Overnight promotion scheduler started"
        );
        loop {
            let now: OffsetDateTime = OffsetDateTime::now_utc();
            let next: OffsetDateTime = match next_promotion_at(&schedule, now) {
                Ok(next) => next,
                Err(e) => {
                    error!(error = %e, "Cannot compute next promotion time, scheduler stopped");
                    return;
                }
            };
            info!(next_promotion = %next, "Waiting for station opening");

            let wait: std::time::Duration =
                std::time::Duration::try_from(next - now).unwrap_or(std::time::Duration::ZERO);
            tokio::time::sleep(wait).await;

            promote_all(&store, &broadcaster, next);
        }
    })
}

/// Promotes every destination, returning how many vehicles moved.
pub fn promote_all(
    store: &QueueStore,
    broadcaster: &LiveEventBroadcaster,
    opening: OffsetDateTime,
) -> usize {
    if !store.is_operational() {
        info!(opening = %opening, "Station closed, overnight promotion skipped");
        return 0;
    }

    let mut total: usize = 0;
    for destination in store.destinations() {
        let cause: Cause = Cause::new(
            format!("opening-{}", opening.date()),
            String::from("Daily overnight promotion"),
        );
        match promote_destination(store, &destination, Actor::scheduler(), cause) {
            Ok(response) => {
                total += response.promoted;
                announce(broadcaster, &destination, &response);
            }
            Err(e) => {
                warn!(destination = %destination, error = %e, "Overnight promotion skipped");
            }
        }
    }
    info!(promoted = total, "Daily overnight promotion finished");
    total
}

fn announce(
    broadcaster: &LiveEventBroadcaster,
    destination: &Destination,
    response: &PromoteOvernightResponse,
) {
    if response.promoted > 0 {
        broadcaster.broadcast(&LiveEvent::OvernightPromoted {
            destination: destination.name().to_string(),
            promoted: response.promoted,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use louaj_domain::{DriverCin, QueueEntry, QueueType, VehicleId};
    use time::macros::datetime;

    fn actor() -> Actor {
        Actor::new(String::from("supervisor-1"), String::from("supervisor"))
    }

    fn cause() -> Cause {
        Cause::new(String::from("test"), String::from("Test setup"))
    }

    fn park(store: &QueueStore, destination: &str, vehicle_id: &str, cin: &str) {
        store
            .enqueue_overnight(
                &Destination::new(destination),
                VehicleId::new(vehicle_id),
                DriverCin::parse(cin).unwrap(),
                None,
                actor(),
                cause(),
            )
            .unwrap();
    }

    fn store_with(destinations: &[&str]) -> QueueStore {
        let store = QueueStore::new();
        for name in destinations {
            store
                .register_destination(Destination::new(name), actor(), cause())
                .unwrap();
        }
        store
    }

    #[test]
    fn test_promote_all_moves_every_destination() {
        let store = store_with(&["Sousse", "Monastir"]);
        park(&store, "Sousse", "TN-1", "12345678");
        park(&store, "Sousse", "TN-2", "87654321");
        park(&store, "Monastir", "TN-3", "11223344");
        let broadcaster = LiveEventBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        let moved = promote_all(&store, &broadcaster, datetime!(2026-03-01 04:00 UTC));

        assert_eq!(moved, 3);
        let sousse: Vec<QueueEntry> = store
            .list_by_destination(&Destination::new("Sousse"))
            .unwrap();
        assert_eq!(sousse.len(), 2);
        assert!(sousse.iter().all(|e| e.queue_type == QueueType::Overnight));
        assert!(matches!(
            rx.try_recv(),
            Ok(LiveEvent::OvernightPromoted { promoted: 2, .. })
        ));
        let audit = store.recent_audit_events(1);
        assert_eq!(audit[0].actor.actor_type, "scheduler");
        assert_eq!(audit[0].cause.id, "opening-2026-03-01");
    }

    #[test]
    fn test_promote_all_continues_past_a_conflict() {
        let store = store_with(&["Sousse", "Monastir"]);
        park(&store, "Sousse", "TN-1", "12345678");
        park(&store, "Monastir", "TN-3", "11223344");
        store
            .enqueue(
                &Destination::new("Monastir"),
                VehicleId::new("TN-1"),
                8,
                QueueType::Regular,
                actor(),
                cause(),
            )
            .unwrap();
        let broadcaster = LiveEventBroadcaster::new();

        let moved = promote_all(&store, &broadcaster, datetime!(2026-03-01 04:00 UTC));

        assert_eq!(moved, 1);
        assert_eq!(
            store
                .list_overnight(&Destination::new("Sousse"))
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            store
                .list_by_destination(&Destination::new("Monastir"))
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn test_promote_all_does_nothing_while_station_closed() {
        let store = store_with(&["Sousse"]);
        park(&store, "Sousse", "TN-1", "12345678");
        store.set_operational(false, actor(), cause()).unwrap();
        let broadcaster = LiveEventBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        let moved = promote_all(&store, &broadcaster, datetime!(2026-03-01 04:00 UTC));

        assert_eq!(moved, 0);
        assert_eq!(
            store
                .list_overnight(&Destination::new("Sousse"))
                .unwrap()
                .len(),
            1
        );
        assert!(
            store
                .list_by_destination(&Destination::new("Sousse"))
                .unwrap()
                .is_empty()
        );
        assert!(rx.try_recv().is_err());
    }
}
