//! Field worker process.
//!
//! ```text
//! Ready ──► Harvesting ──► (decide) ──┬─► SelfDelivering ──► fatigue += 1 ─┐
//!               ▲                     └─► put(box) ────────► fatigue += 1 ─┤
//!               └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Deciding and enqueuing are instantaneous; the worker suspends only while
//! harvesting and while carrying a box itself.

use hl_core::{ActorRng, Location, WorkerId};
use hl_logistics::{Courier, HarvestBox, PutOutcome};
use tracing::debug;

use crate::{ActorContext, ActorResult, SimEvent, Wake};

/// What a worker is suspended in.
#[derive(Debug, PartialEq)]
pub enum WorkerPhase {
    /// Registered but not yet started.
    Ready,
    /// Filling a box; resumes when it is full.
    Harvesting,
    /// Walking `HarvestBox` to the collection point.
    SelfDelivering(HarvestBox),
}

#[derive(Debug)]
pub struct Worker {
    id:                WorkerId,
    location:          Location,
    fatigue:           u32,
    fatigue_threshold: u32,
    boxes_filled:      u64,
    phase:             WorkerPhase,
    rng:               ActorRng,
}

impl Worker {
    pub fn new(id: WorkerId, location: Location, fatigue_threshold: u32, rng: ActorRng) -> Self {
        Self {
            id,
            location,
            fatigue: 0,
            fatigue_threshold,
            boxes_filled: 0,
            phase: WorkerPhase::Ready,
            rng,
        }
    }

    /// Run from the current suspension point to the next one.
    pub fn resume(&mut self, ctx: &mut ActorContext<'_>) -> ActorResult<()> {
        match std::mem::replace(&mut self.phase, WorkerPhase::Harvesting) {
            WorkerPhase::Ready => self.begin_harvest(ctx),
            WorkerPhase::Harvesting => self.box_full(ctx),
            WorkerPhase::SelfDelivering(harvest_box) => {
                let delivered = harvest_box.deliver(ctx.now(), Courier::Worker(self.id));
                ctx.emit(SimEvent::BoxDelivered(delivered.clone()));
                ctx.collection_point.receive(delivered);
                self.finish_box(ctx)
            }
        }
    }

    fn begin_harvest(&mut self, ctx: &mut ActorContext<'_>) -> ActorResult<()> {
        let duration = ctx.config.harvest_time(self.fatigue) + self.rng.jitter(ctx.config.harvest_jitter);
        self.phase = WorkerPhase::Harvesting;
        ctx.clock.schedule_after(duration, Wake::Worker(self.id))?;
        Ok(())
    }

    fn box_full(&mut self, ctx: &mut ActorContext<'_>) -> ActorResult<()> {
        let now = ctx.now();
        let harvest_box = HarvestBox::new(ctx.next_box_id(), self.id, now);
        let box_id = harvest_box.id;
        self.boxes_filled += 1;
        debug!(worker = %self.id, %box_id, fatigue = self.fatigue, %now, "box filled");
        ctx.emit(SimEvent::BoxFilled { time: now, worker: self.id, box_id, fatigue: self.fatigue });

        if self.self_delivers() {
            let duration = ctx
                .config
                .worker_transport
                .duration(self.location, ctx.collection_point.location());
            ctx.emit(SimEvent::SelfDeliveryStarted { time: now, worker: self.id, box_id });
            self.phase = WorkerPhase::SelfDelivering(harvest_box);
            ctx.clock.schedule_after(duration, Wake::Worker(self.id))?;
            return Ok(());
        }

        match ctx.queue.put(harvest_box) {
            PutOutcome::Queued { len } => {
                debug!(worker = %self.id, %box_id, queue_len = len, "box queued");
                ctx.emit(SimEvent::BoxQueued { time: now, worker: self.id, box_id, queue_len: len });
            }
            PutOutcome::HandedOff { drone, harvest_box } => {
                debug!(worker = %self.id, %box_id, %drone, "box handed to waiting drone");
                ctx.emit(SimEvent::BoxHandedOff { time: now, worker: self.id, box_id, drone });
                ctx.clock.schedule_after(0.0, Wake::Handoff { drone, harvest_box })?;
            }
        }
        self.finish_box(ctx)
    }

    /// Post-box bookkeeping shared by both branches, then the next harvest.
    fn finish_box(&mut self, ctx: &mut ActorContext<'_>) -> ActorResult<()> {
        self.fatigue += 1;
        self.begin_harvest(ctx)
    }

    /// One-way: once fatigue reaches the threshold it never drops back.
    #[inline]
    pub fn self_delivers(&self) -> bool {
        self.fatigue < self.fatigue_threshold
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> WorkerId {
        self.id
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    #[inline]
    pub fn fatigue(&self) -> u32 {
        self.fatigue
    }

    #[inline]
    pub fn fatigue_threshold(&self) -> u32 {
        self.fatigue_threshold
    }

    #[inline]
    pub fn boxes_filled(&self) -> u64 {
        self.boxes_filled
    }

    #[inline]
    pub fn phase(&self) -> &WorkerPhase {
        &self.phase
    }
}
