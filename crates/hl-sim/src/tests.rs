//! Integration tests for hl-sim.
//!
//! Timelines assume the default service times: harvest 10 + 0.5 per fatigue
//! point, worker transport 12, drone arrival 3, drone transport 5, poll 1.

use std::collections::{HashMap, HashSet};

use hl_actors::SimEvent;
use hl_core::{BoxId, DroneId, HarvestConfig, HlError, Location, SimTime, TravelTime, WakePolicy, WorkerId};
use hl_logistics::Courier;

use crate::sweep::grid;
use crate::{NoopObserver, RunOutcome, SimBuilder, SimError, Simulation, Snapshot, TraceRecorder, run_sweep};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(workers: usize, drones: usize, threshold: u32) -> HarvestConfig {
    HarvestConfig {
        num_workers: workers,
        num_drones: drones,
        fatigue_threshold: threshold,
        ..HarvestConfig::default()
    }
}

fn build(config: HarvestConfig) -> Simulation {
    SimBuilder::new(config).build().unwrap()
}

fn deliveries(events: &[SimEvent]) -> Vec<(BoxId, f64, Courier)> {
    events
        .iter()
        .filter_map(|e| match e {
            SimEvent::BoxDelivered(d) => Some((d.id, d.delivered_at.as_f64(), d.delivered_by)),
            _ => None,
        })
        .collect()
}

fn snap(time: f64, queue_length: usize, delivered_count: usize) -> Snapshot {
    Snapshot { time, queue_length, delivered_count }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn seeds_every_actor_at_time_zero() {
        let sim = build(HarvestConfig::default());
        assert_eq!(sim.now(), SimTime::ZERO);
        assert_eq!(sim.pending_events(), 7);
        assert_eq!(sim.next_event_time(), Some(SimTime::ZERO));
        assert_eq!(sim.snapshot(), snap(0.0, 0, 0));
    }

    #[test]
    fn invalid_config_rejected_before_anything_runs() {
        let result = SimBuilder::new(config(1, 1, 0)).build();
        assert!(matches!(result, Err(SimError::Config(HlError::InvalidConfiguration(_)))));

        let bad_time = HarvestConfig { sim_time: -1.0, ..HarvestConfig::default() };
        assert!(SimBuilder::new(bad_time).build().is_err());
    }

    #[test]
    fn frame_interval_must_be_positive() {
        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = SimBuilder::new(HarvestConfig::default()).frame_interval(dt).build();
            assert!(matches!(result, Err(SimError::Config(_))), "dt = {dt}");
        }
    }

    #[test]
    fn empty_field_is_quiescent() {
        let mut sim = build(config(0, 0, 3));
        let mut trace = TraceRecorder::new();
        assert!(!sim.step(&mut trace).unwrap());

        let outcome = sim.run(&mut trace).unwrap();
        assert_eq!(outcome, RunOutcome::Quiescent);
        assert_eq!(trace.outcome, Some(RunOutcome::Quiescent));
        assert!(trace.events.is_empty());
        assert_eq!(sim.snapshot(), snap(60.0, 0, 0));
    }
}

// ── Worked scenario ───────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario {
    use super::*;

    #[test]
    fn one_worker_one_drone_to_sixty() {
        let mut sim = build(config(1, 1, 3));
        let mut trace = TraceRecorder::new();
        let outcome = sim.run(&mut trace).unwrap();

        assert_eq!(outcome, RunOutcome::DeadlineReached);
        assert_eq!(sim.snapshot(), snap(60.0, 0, 2));
        assert_eq!(
            deliveries(&trace.events),
            vec![
                (BoxId(0), 22.0, Courier::Worker(WorkerId(0))),
                (BoxId(1), 44.5, Courier::Worker(WorkerId(0))),
            ]
        );
        assert!(trace.events.contains(&SimEvent::SelfDeliveryStarted {
            time:   SimTime::new(55.5).unwrap(),
            worker: WorkerId(0),
            box_id: BoxId(2),
        }));
        let summary = sim.summary();
        assert_eq!(summary.boxes_created, 3);
        assert_eq!(summary.in_flight(), 1);
        assert_eq!(trace.snapshots.last(), Some(&sim.snapshot()));
    }

    #[test]
    fn speed_based_travel_follows_the_layout() {
        let cfg = HarvestConfig {
            worker_transport: TravelTime::Speed(2.0),
            drone_arrival:    TravelTime::Speed(7.0),
            drone_transport:  TravelTime::Speed(7.0),
            sim_time:         45.0,
            ..config(1, 1, 1)
        };
        let layout = cfg.layout.clone();
        let mut sim = build(cfg);
        let mut trace = TraceRecorder::new();

        // At 43 the drone is half-way from the queue site back home.
        sim.run_to(43.0, &mut trace).unwrap();
        assert_eq!(sim.frame().drones, vec![Location::new(11.0, 6.0)]);
        sim.run(&mut trace).unwrap();

        // Worker 0 walks from (2, 2) to (18, 6); drones cover the 14 units
        // between the collection point and the queue site in 2.
        let walk = layout.worker_location(0).distance_to(layout.collection_point) / 2.0;
        assert_eq!(layout.queue_site.distance_to(layout.collection_point) / 7.0, 2.0);
        assert_eq!(
            deliveries(&trace.events),
            vec![
                (BoxId(0), 10.0 + walk, Courier::Worker(WorkerId(0))),
                (BoxId(1), 33.0, Courier::Drone(DroneId(0))),
                (BoxId(2), 44.0, Courier::Drone(DroneId(0))),
            ]
        );
        assert!(trace.events.contains(&SimEvent::DroneDispatched {
            time:  SimTime::new(29.0).unwrap(),
            drone: DroneId(0),
        }));
    }

    #[test]
    fn continued_to_one_hundred_hands_boxes_to_the_drone() {
        let mut sim = build(config(1, 1, 3));
        sim.run(&mut NoopObserver).unwrap();
        let mut trace = TraceRecorder::new();
        sim.run_to(100.0, &mut trace).unwrap();

        assert_eq!(sim.snapshot(), snap(100.0, 0, 5));
        assert!(trace.events.contains(&SimEvent::BoxQueued {
            time:      SimTime::new(79.0).unwrap(),
            worker:    WorkerId(0),
            box_id:    BoxId(3),
            queue_len: 1,
        }));
        assert_eq!(
            deliveries(&trace.events),
            vec![
                (BoxId(2), 67.5, Courier::Worker(WorkerId(0))),
                (BoxId(3), 87.0, Courier::Drone(DroneId(0))),
                (BoxId(4), 99.0, Courier::Drone(DroneId(0))),
            ]
        );

        // The pickup at 82 empties the queue and nothing else is waiting.
        let at_pickup = trace.snapshots.iter().find(|s| s.time == 82.0).unwrap();
        assert_eq!(at_pickup.queue_length, 0);

        let summary = sim.summary();
        assert_eq!(summary.self_delivered, 3);
        assert_eq!(summary.drone_delivered, 2);
        assert_eq!(summary.waiting_drones, 0);
    }

    #[test]
    fn step_processes_one_event_at_a_time() {
        let mut sim = build(config(1, 1, 3));
        let mut trace = TraceRecorder::new();

        // t=0: worker starts harvesting (no event), drone polls.
        assert!(sim.step(&mut trace).unwrap());
        assert!(trace.events.is_empty());
        assert!(sim.step(&mut trace).unwrap());
        assert_eq!(trace.events, vec![SimEvent::DronePolled { time: SimTime::ZERO, drone: DroneId(0) }]);
        assert_eq!(trace.snapshots.len(), 2);
        assert_eq!(trace.outcome, None);
        assert_eq!(sim.next_event_time(), Some(SimTime::new(1.0).unwrap()));
    }
}

// ── Wake policies ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod policies {
    use super::*;

    #[test]
    fn polling_race_blocks_the_second_drone() {
        let mut sim = build(config(1, 2, 1));
        let mut trace = TraceRecorder::new();
        sim.run_to(40.0, &mut trace).unwrap();

        assert!(trace.events.contains(&SimEvent::DroneBlocked {
            time:  SimTime::new(36.0).unwrap(),
            drone: DroneId(1),
        }));
        assert_eq!(sim.summary().waiting_drones, 1);

        sim.run_to(50.0, &mut trace).unwrap();
        assert_eq!(sim.summary().waiting_drones, 0);
        let last = deliveries(&trace.events).pop();
        assert_eq!(last, Some((BoxId(2), 48.5, Courier::Drone(DroneId(1)))));
    }

    #[test]
    fn one_drone_drains_simultaneous_boxes_without_blocking() {
        let mut sim = build(config(2, 1, 1));
        let mut trace = TraceRecorder::new();
        sim.run_to(49.0, &mut trace).unwrap();

        assert!(!trace.events.iter().any(|e| matches!(e, SimEvent::DroneBlocked { .. })));
        let by_drone: Vec<(BoxId, f64)> = deliveries(&trace.events)
            .into_iter()
            .filter(|(_, _, c)| c.is_drone())
            .map(|(id, at, _)| (id, at))
            .collect();
        assert_eq!(by_drone, vec![(BoxId(2), 41.0), (BoxId(3), 49.0)]);
    }

    #[test]
    fn signal_drone_never_polls() {
        let cfg = HarvestConfig { wake_policy: WakePolicy::Signal, ..config(1, 1, 1) };
        let mut sim = build(cfg);
        let mut trace = TraceRecorder::new();
        sim.run_to(55.0, &mut trace).unwrap();

        assert!(!trace.events.iter().any(|e| matches!(e, SimEvent::DronePolled { .. })));
        let by_drone: Vec<f64> = deliveries(&trace.events)
            .into_iter()
            .filter(|(_, _, c)| c.is_drone())
            .map(|(_, at, _)| at)
            .collect();
        assert_eq!(by_drone, vec![40.5, 51.5]);

        // The fourth box is filled exactly at the deadline and goes straight
        // to the waiting drone.
        assert!(trace.events.contains(&SimEvent::BoxHandedOff {
            time:   SimTime::new(55.0).unwrap(),
            worker: WorkerId(0),
            box_id: BoxId(3),
            drone:  DroneId(0),
        }));
        assert_eq!(sim.summary().waiting_drones, 0);
        assert_eq!(sim.snapshot(), snap(55.0, 0, 3));
    }

    #[test]
    fn signal_drone_waits_between_boxes() {
        let cfg = HarvestConfig { wake_policy: WakePolicy::Signal, ..config(1, 1, 1) };
        let mut sim = build(cfg);
        sim.run_to(54.0, &mut NoopObserver).unwrap();
        assert_eq!(sim.summary().waiting_drones, 1);
    }

    #[test]
    fn signal_dispatch_is_fifo() {
        let cfg = HarvestConfig {
            wake_policy:    WakePolicy::Signal,
            harvest_jitter: 2.0,
            sim_time:       400.0,
            ..config(4, 2, 1)
        };
        let mut sim = build(cfg);
        let mut trace = TraceRecorder::new();
        sim.run(&mut trace).unwrap();

        let put_order: Vec<BoxId> = trace
            .events
            .iter()
            .filter_map(|e| match e {
                SimEvent::BoxQueued { box_id, .. } | SimEvent::BoxHandedOff { box_id, .. } => Some(*box_id),
                _ => None,
            })
            .collect();
        let claim_order: Vec<BoxId> = trace
            .events
            .iter()
            .filter_map(|e| match e {
                SimEvent::BoxClaimed { box_id, .. } => Some(*box_id),
                _ => None,
            })
            .collect();
        assert!(claim_order.len() > 10);
        assert_eq!(claim_order[..], put_order[..claim_order.len()]);
    }
}

// ── Invariants ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use super::*;

    fn busy_config(policy: WakePolicy) -> HarvestConfig {
        HarvestConfig {
            wake_policy:    policy,
            harvest_jitter: 1.5,
            sim_time:       500.0,
            seed:           7,
            ..config(6, 2, 2)
        }
    }

    #[test]
    fn fatigue_rises_by_one_per_box() {
        for policy in [WakePolicy::Polling, WakePolicy::Signal] {
            let mut sim = build(busy_config(policy));
            let mut trace = TraceRecorder::new();
            sim.run(&mut trace).unwrap();

            let mut seen: HashMap<WorkerId, u32> = HashMap::new();
            for e in &trace.events {
                if let SimEvent::BoxFilled { worker, fatigue, .. } = e {
                    let expected = seen.entry(*worker).or_insert(0);
                    assert_eq!(*fatigue, *expected, "{policy}: {worker}");
                    *expected += 1;
                }
            }
            // A worker still carrying its box has not taken the fatigue point yet.
            for w in sim.field().workers() {
                assert!(w.fatigue() as u64 <= w.boxes_filled());
                assert!(w.fatigue() as u64 + 1 >= w.boxes_filled());
            }
        }
    }

    #[test]
    fn every_box_delivered_at_most_once_and_after_creation() {
        for policy in [WakePolicy::Polling, WakePolicy::Signal] {
            let mut sim = build(busy_config(policy));
            sim.run(&mut NoopObserver).unwrap();

            let history = sim.field().collection_point().history();
            let ids: HashSet<BoxId> = history.iter().map(|d| d.id).collect();
            assert_eq!(ids.len(), history.len(), "{policy}: duplicate delivery");
            assert!(history.iter().all(|d| d.delivered_at >= d.created_at));
            assert!(history.windows(2).all(|w| w[0].delivered_at <= w[1].delivered_at));
            assert!(history.len() as u64 <= sim.field().boxes_created());

            let summary = sim.summary();
            assert_eq!(summary.self_delivered + summary.drone_delivered, history.len());
            assert!(summary.mean_lead_time.is_some_and(|t| t > 0.0));
        }
    }

    #[test]
    fn same_config_same_trace() {
        let run = || {
            let mut sim = build(busy_config(WakePolicy::Polling));
            let mut trace = TraceRecorder::new();
            sim.run(&mut trace).unwrap();
            (trace.events, trace.snapshots, sim.snapshot())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn snapshots_are_time_ordered() {
        let mut sim = build(busy_config(WakePolicy::Polling));
        let mut trace = TraceRecorder::new();
        sim.run(&mut trace).unwrap();
        assert!(trace.snapshots.windows(2).all(|w| w[0].time <= w[1].time));
    }
}

// ── Failed steps ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod failed_steps {
    use hl_actors::ActorError;
    use hl_clock::ClockError;

    use super::*;

    #[test]
    fn events_of_a_failed_step_are_discarded() {
        // A vanishingly slow drone: its first flight overflows virtual time.
        let cfg = HarvestConfig {
            drone_arrival: TravelTime::Speed(f64::MIN_POSITIVE),
            ..config(1, 1, 1)
        };
        let mut sim = build(cfg);
        let mut trace = TraceRecorder::new();

        // Box 1 is queued at 32.5; the drone tries to take off at 33.
        let err = sim.run_to(40.0, &mut trace).unwrap_err();
        assert!(
            matches!(err, SimError::Actor(ActorError::Clock(ClockError::InvalidDelay(d))) if d.is_infinite()),
            "{err}"
        );
        assert_eq!(sim.now(), SimTime::new(33.0).unwrap());
        assert!(trace.outcome.is_none());

        // The next step reports only its own events.
        let before = trace.events.len();
        assert!(sim.step(&mut trace).unwrap());
        assert_eq!(sim.now(), SimTime::new(43.5).unwrap());
        assert!(matches!(
            trace.events[before..],
            [SimEvent::BoxFilled { box_id: BoxId(2), .. }, SimEvent::BoxQueued { box_id: BoxId(2), .. }]
        ));
        assert!(!trace.events.iter().any(|e| matches!(e, SimEvent::DroneDispatched { .. })));
    }
}

// ── Frames ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod frames {
    use super::*;

    #[test]
    fn sampled_on_a_fixed_grid_with_interpolated_drones() {
        let mut sim = SimBuilder::new(config(1, 2, 1)).frame_interval(0.5).build().unwrap();
        let mut trace = TraceRecorder::new();
        sim.run_to(35.0, &mut trace).unwrap();

        assert_eq!(trace.frames.len(), 71);
        assert!(trace.frames.iter().enumerate().all(|(k, f)| f.time == k as f64 * 0.5));

        let f = &trace.frames[69];
        assert_eq!(f.time, 34.5);
        assert_eq!(f.workers, vec![Location::new(2.0, 2.0)]);
        assert_eq!(f.collection_points, vec![Location::new(18.0, 6.0)]);
        // Both drones left the collection point at 33 for the queue site.
        assert_eq!(f.drones, vec![Location::new(11.0, 6.0); 2]);
        assert_eq!(sim.frame_at(SimTime::new(34.5).unwrap()), *f);
    }

    #[test]
    fn continued_run_does_not_repeat_frames() {
        let mut sim = SimBuilder::new(config(1, 1, 3)).frame_interval(10.0).build().unwrap();
        let mut trace = TraceRecorder::new();
        sim.run_to(25.0, &mut trace).unwrap();
        sim.run_to(40.0, &mut trace).unwrap();

        let times: Vec<f64> = trace.frames.iter().map(|f| f.time).collect();
        assert_eq!(times, vec![0.0, 10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn no_frames_without_an_interval() {
        let mut sim = build(config(1, 1, 3));
        let mut trace = TraceRecorder::new();
        sim.run(&mut trace).unwrap();
        assert!(trace.frames.is_empty());
        assert_eq!(sim.frame().time, 60.0);
    }
}

// ── Sweep ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sweep {
    use super::*;

    #[test]
    fn grid_is_drone_major() {
        let configs = grid(&HarvestConfig::default(), &[0, 1, 2], &[1, 3]);
        let axes: Vec<(usize, u32)> = configs.iter().map(|c| (c.num_drones, c.fatigue_threshold)).collect();
        assert_eq!(axes, vec![(0, 1), (0, 3), (1, 1), (1, 3), (2, 1), (2, 3)]);
    }

    #[test]
    fn results_in_input_order() {
        let configs = grid(&HarvestConfig::default(), &[0, 1, 2], &[1, 3]);
        let results = run_sweep(&configs);
        assert_eq!(results.len(), configs.len());

        for (cfg, result) in configs.iter().zip(&results) {
            let summary = result.as_ref().unwrap();
            assert_eq!(summary.num_drones, cfg.num_drones);
            assert_eq!(summary.fatigue_threshold, cfg.fatigue_threshold);
            assert_eq!(summary.snapshot.time, cfg.sim_time);
            if cfg.num_drones == 0 {
                assert_eq!(summary.drone_delivered, 0);
            }
        }
    }

    #[test]
    fn invalid_config_fails_only_its_slot() {
        let configs = vec![config(1, 1, 3), config(1, 1, 0), config(2, 1, 3)];
        let results = run_sweep(&configs);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(SimError::Config(_))));
        assert!(results[2].is_ok());
    }

    #[test]
    fn matches_a_standalone_run() {
        let cfg = config(1, 1, 3);
        let mut sim = build(cfg.clone());
        sim.run(&mut NoopObserver).unwrap();
        let results = run_sweep(std::slice::from_ref(&cfg));
        assert_eq!(results[0].as_ref().unwrap(), &sim.summary());
    }
}
