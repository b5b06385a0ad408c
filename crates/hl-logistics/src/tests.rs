//! Unit tests for hl-logistics.

use hl_core::{BoxId, DroneId, Location, SimTime, WorkerId};

use crate::{CollectionPoint, Courier, HarvestBox, PutOutcome, SharedBoxQueue};

fn t(x: f64) -> SimTime {
    SimTime::new(x).unwrap()
}

fn hbox(id: u64, at: f64) -> HarvestBox {
    HarvestBox::new(BoxId(id), WorkerId(0), t(at))
}

// ── SharedBoxQueue ────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use super::*;

    #[test]
    fn fifo_without_waiters() {
        let mut q = SharedBoxQueue::new();
        assert_eq!(q.put(hbox(0, 1.0)), PutOutcome::Queued { len: 1 });
        assert_eq!(q.put(hbox(1, 2.0)), PutOutcome::Queued { len: 2 });
        assert_eq!(q.len(), 2);

        assert_eq!(q.get(DroneId(0)).map(|b| b.id), Some(BoxId(0)));
        assert_eq!(q.get(DroneId(0)).map(|b| b.id), Some(BoxId(1)));
        assert!(q.is_empty());
        assert_eq!(q.waiting().len(), 0, "successful gets never register");
    }

    #[test]
    fn get_on_empty_registers_waiter() {
        let mut q = SharedBoxQueue::new();
        assert_eq!(q.get(DroneId(3)), None);
        assert_eq!(q.waiting().collect::<Vec<_>>(), vec![DroneId(3)]);
    }

    #[test]
    fn put_serves_oldest_waiter_and_keeps_queue_empty() {
        let mut q = SharedBoxQueue::new();
        assert!(q.get(DroneId(1)).is_none());
        assert!(q.get(DroneId(0)).is_none());

        match q.put(hbox(7, 4.0)) {
            PutOutcome::HandedOff { drone, harvest_box } => {
                assert_eq!(drone, DroneId(1), "registration order, not id order");
                assert_eq!(harvest_box.id, BoxId(7));
            }
            other => panic!("expected hand-off, got {other:?}"),
        }
        assert_eq!(q.len(), 0, "a handed-off box never also sits in the queue");
        assert_eq!(q.waiting().collect::<Vec<_>>(), vec![DroneId(0)]);

        assert!(matches!(
            q.put(hbox(8, 4.0)),
            PutOutcome::HandedOff { drone: DroneId(0), .. }
        ));
        assert_eq!(q.put(hbox(9, 4.0)), PutOutcome::Queued { len: 1 });
    }

    #[test]
    fn boxes_iterates_front_first() {
        let mut q = SharedBoxQueue::new();
        for i in 0..3 {
            let _ = q.put(hbox(i, i as f64));
        }
        let ids: Vec<_> = q.boxes().map(|b| b.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}

// ── Box and CollectionPoint ───────────────────────────────────────────────────

#[cfg(test)]
mod delivery {
    use super::*;

    #[test]
    fn deliver_stamps_time_and_courier() {
        let d = hbox(4, 10.0).deliver(t(22.0), Courier::Worker(WorkerId(0)));
        assert_eq!(d.id, BoxId(4));
        assert_eq!(d.created_at, t(10.0));
        assert_eq!(d.delivered_at, t(22.0));
        assert_eq!(d.delivered_by, Courier::Worker(WorkerId(0)));
        assert_eq!(d.lead_time(), 12.0);
    }

    #[test]
    fn courier_labels() {
        assert_eq!(Courier::Drone(DroneId(2)).kind(), "drone");
        assert_eq!(Courier::Worker(WorkerId(5)).raw_id(), 5);
        assert_eq!(Courier::Drone(DroneId(2)).to_string(), "D2");
        assert!(Courier::Drone(DroneId(0)).is_drone());
    }

    #[test]
    fn history_is_completion_order() {
        let mut cp = CollectionPoint::new(Location::new(8.0, 8.0));
        // Box 1 was filled later but arrives first.
        cp.receive(hbox(1, 5.0).deliver(t(9.0), Courier::Drone(DroneId(0))));
        cp.receive(hbox(0, 1.0).deliver(t(13.0), Courier::Worker(WorkerId(0))));

        let ids: Vec<_> = cp.history().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![BoxId(1), BoxId(0)]);
        assert_eq!(cp.delivered_count(), 2);
        assert_eq!(cp.delivered_by_drones(), 1);
        assert_eq!(cp.delivered_by_workers(), 1);
        assert_eq!(cp.last().map(|d| d.id), Some(BoxId(0)));
        assert_eq!(cp.location(), Location::new(8.0, 8.0));
    }
}
