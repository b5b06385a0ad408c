//! `Field`: the actor set and the resources they contend on.

use hl_clock::EventClock;
use hl_core::{ActorRng, BoxId, DroneId, HarvestConfig, SimTime, WorkerId};
use hl_logistics::{CollectionPoint, SharedBoxQueue};

use crate::{ActorError, ActorResult, Drone, SimEvent, Wake, Worker};

// ── ActorContext ──────────────────────────────────────────────────────────────

/// Everything one actor step may touch besides the actor itself.
///
/// Built by [`Field::resume`] from disjoint field borrows, so the actor being
/// resumed can be borrowed mutably at the same time.
pub struct ActorContext<'a> {
    pub clock:            &'a mut EventClock<Wake>,
    pub queue:            &'a mut SharedBoxQueue,
    pub collection_point: &'a mut CollectionPoint,
    pub config:           &'a HarvestConfig,
    next_box:             &'a mut u64,
    events:               &'a mut Vec<SimEvent>,
}

impl ActorContext<'_> {
    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Allocate the next box id (creation order).
    pub fn next_box_id(&mut self) -> BoxId {
        let id = BoxId(*self.next_box);
        *self.next_box += 1;
        id
    }

    #[inline]
    pub fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }
}

// ── Field ─────────────────────────────────────────────────────────────────────

/// Owns the workers, drones, shared queue and collection point.
///
/// No globals: actors reach shared state only through the [`ActorContext`]
/// handed to them for the duration of one step.
pub struct Field {
    config:           HarvestConfig,
    workers:          Vec<Worker>,
    drones:           Vec<Drone>,
    queue:            SharedBoxQueue,
    collection_point: CollectionPoint,
    next_box:         u64,
}

impl Field {
    /// Lay out actors per `config.layout`.  `config` is assumed validated.
    ///
    /// Workers stand in a row from `worker_origin`; drones start at the
    /// collection point.
    pub fn new(config: HarvestConfig) -> Self {
        let workers = (0..config.num_workers)
            .map(|i| {
                let id = WorkerId(i as u32);
                Worker::new(
                    id,
                    config.layout.worker_location(i),
                    config.fatigue_threshold,
                    ActorRng::for_worker(config.seed, id),
                )
            })
            .collect();
        let drones = (0..config.num_drones)
            .map(|j| Drone::new(DroneId(j as u32), config.layout.collection_point, config.wake_policy))
            .collect();

        Self {
            collection_point: CollectionPoint::new(config.layout.collection_point),
            queue: SharedBoxQueue::new(),
            workers,
            drones,
            next_box: 0,
            config,
        }
    }

    /// Register every actor with the clock at the current time: workers
    /// first in id order, then drones.
    pub fn seed(&self, clock: &mut EventClock<Wake>) -> ActorResult<()> {
        let now = clock.now();
        for w in &self.workers {
            clock.schedule_at(now, Wake::Worker(w.id()))?;
        }
        for d in &self.drones {
            clock.schedule_at(now, Wake::Drone(d.id()))?;
        }
        Ok(())
    }

    /// Resume the actor named by `wake`, appending what it did to `events`.
    pub fn resume(
        &mut self,
        clock:  &mut EventClock<Wake>,
        wake:   Wake,
        events: &mut Vec<SimEvent>,
    ) -> ActorResult<()> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let Field { config, workers, drones, queue, collection_point, next_box } = self;
        let mut ctx = ActorContext {
            clock,
            queue,
            collection_point,
            config,
            next_box,
            events,
        };

        match wake {
            Wake::Worker(id) => workers
                .get_mut(id.index())
                .ok_or(ActorError::UnknownWorker(id))?
                .resume(&mut ctx),
            Wake::Drone(id) => drones
                .get_mut(id.index())
                .ok_or(ActorError::UnknownDrone(id))?
                .resume(&mut ctx, None),
            Wake::Handoff { drone, harvest_box } => drones
                .get_mut(drone.index())
                .ok_or(ActorError::UnknownDrone(drone))?
                .resume(&mut ctx, Some(harvest_box)),
        }
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    #[inline]
    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    #[inline]
    pub fn drones(&self) -> &[Drone] {
        &self.drones
    }

    #[inline]
    pub fn queue(&self) -> &SharedBoxQueue {
        &self.queue
    }

    #[inline]
    pub fn collection_point(&self) -> &CollectionPoint {
        &self.collection_point
    }

    /// Boxes filled so far by all workers.
    #[inline]
    pub fn boxes_created(&self) -> u64 {
        self.next_box
    }
}
