//! Drone process.
//!
//! # Polling
//!
//! ```text
//! Idle ─(queue empty)─► poll again after poll_interval
//!   │
//!   └─(queue non-empty)─► ArrivingAtQueue ─► get ─┬─ box ──► Transporting ─► Idle
//!                                                 └─ none ─► WaitingForBox ─(hand-off)─► Transporting
//! ```
//!
//! The emptiness check and the `get` are separated by the flight to the
//! queue.  Two drones can see the same single box, fly out together, and the
//! loser ends up suspended in `get` until the next `put`.
//!
//! # Signal
//!
//! ```text
//! Idle ─► get ─┬─ box ──────────────────────► Collecting ─► Transporting ─► Idle
//!              └─ none ─► WaitingForBox ─(hand-off)─┘
//! ```
//!
//! The box is reserved before take-off, so a drone never flies out for a box
//! another drone will take.

use hl_core::{DroneId, Location, SimTime, TravelTime, WakePolicy};
use hl_logistics::{Courier, HarvestBox};
use tracing::debug;

use crate::{ActorContext, ActorError, ActorResult, SimEvent, Travel, Wake};

/// What a drone is suspended in.
#[derive(Debug, PartialEq)]
pub enum DronePhase {
    /// Between jobs.  Resuming starts a look for work.
    Idle,
    /// Polling only: flying to the queue site to try a `get`.
    ArrivingAtQueue,
    /// Registered as a queue waiter.  Only a hand-off resumes it.
    WaitingForBox,
    /// Signal only: flying to the queue site to pick up a reserved box.
    Collecting(HarvestBox),
    /// Carrying the box to the collection point.
    Transporting(HarvestBox),
}

/// Coarse externally visible state, as a renderer would colour it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DroneStatus {
    Idle,
    TravelingToQueue,
    Transporting,
}

impl DroneStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DroneStatus::Idle             => "idle",
            DroneStatus::TravelingToQueue => "traveling_to_queue",
            DroneStatus::Transporting     => "transporting",
        }
    }
}

#[derive(Debug)]
pub struct Drone {
    id:        DroneId,
    location:  Location,
    phase:     DronePhase,
    travel:    Option<Travel>,
    delivered: u64,
    policy:    WakePolicy,
}

impl Drone {
    pub fn new(id: DroneId, location: Location, policy: WakePolicy) -> Self {
        Self {
            id,
            location,
            phase: DronePhase::Idle,
            travel: None,
            delivered: 0,
            policy,
        }
    }

    /// Run from the current suspension point to the next one.
    ///
    /// `handed` is `Some` exactly when the wake was a queue hand-off.
    pub fn resume(&mut self, ctx: &mut ActorContext<'_>, handed: Option<HarvestBox>) -> ActorResult<()> {
        let phase = std::mem::replace(&mut self.phase, DronePhase::Idle);

        let phase = match (phase, handed) {
            (DronePhase::WaitingForBox, Some(harvest_box)) => {
                self.claim(ctx, &harvest_box);
                return match self.policy {
                    WakePolicy::Polling => self.depart_with(ctx, harvest_box),
                    WakePolicy::Signal  => self.collect(ctx, harvest_box),
                };
            }
            (phase, Some(harvest_box)) => {
                self.phase = phase;
                return Err(ActorError::UnexpectedHandoff { drone: self.id, harvest_box });
            }
            (DronePhase::WaitingForBox, None) => {
                self.phase = DronePhase::WaitingForBox;
                return Err(ActorError::SpuriousWake(self.id));
            }
            (phase, None) => phase,
        };

        // A timed leg ended.
        if let Some(leg) = self.travel.take() {
            self.location = leg.to;
        }

        match phase {
            DronePhase::Idle => self.look_for_work(ctx),
            DronePhase::ArrivingAtQueue => match ctx.queue.get(self.id) {
                Some(harvest_box) => {
                    self.claim(ctx, &harvest_box);
                    self.depart_with(ctx, harvest_box)
                }
                None => self.block(ctx),
            },
            DronePhase::Collecting(harvest_box) => self.depart_with(ctx, harvest_box),
            DronePhase::Transporting(harvest_box) => {
                let delivered = harvest_box.deliver(ctx.now(), Courier::Drone(self.id));
                self.delivered += 1;
                ctx.emit(SimEvent::BoxDelivered(delivered.clone()));
                ctx.collection_point.receive(delivered);
                self.look_for_work(ctx)
            }
            DronePhase::WaitingForBox => Err(ActorError::SpuriousWake(self.id)),
        }
    }

    fn look_for_work(&mut self, ctx: &mut ActorContext<'_>) -> ActorResult<()> {
        let now = ctx.now();
        match self.policy {
            WakePolicy::Polling => {
                if ctx.queue.is_empty() {
                    ctx.emit(SimEvent::DronePolled { time: now, drone: self.id });
                    self.phase = DronePhase::Idle;
                    ctx.clock.schedule_after(ctx.config.poll_interval, Wake::Drone(self.id))?;
                    return Ok(());
                }
                debug!(drone = %self.id, %now, queue_len = ctx.queue.len(), "dispatched");
                ctx.emit(SimEvent::DroneDispatched { time: now, drone: self.id });
                let to = ctx.config.layout.queue_site;
                let travel = ctx.config.drone_arrival;
                self.fly(ctx, to, travel, DronePhase::ArrivingAtQueue)
            }
            WakePolicy::Signal => match ctx.queue.get(self.id) {
                Some(harvest_box) => {
                    self.claim(ctx, &harvest_box);
                    self.collect(ctx, harvest_box)
                }
                None => self.block(ctx),
            },
        }
    }

    /// Signal policy: fly to the queue site holding a reserved box.
    fn collect(&mut self, ctx: &mut ActorContext<'_>, harvest_box: HarvestBox) -> ActorResult<()> {
        let to = ctx.config.layout.queue_site;
        let travel = ctx.config.drone_arrival;
        self.fly(ctx, to, travel, DronePhase::Collecting(harvest_box))
    }

    /// Take off for the collection point with `harvest_box`.
    fn depart_with(&mut self, ctx: &mut ActorContext<'_>, harvest_box: HarvestBox) -> ActorResult<()> {
        let to = ctx.collection_point.location();
        let travel = ctx.config.drone_transport;
        self.fly(ctx, to, travel, DronePhase::Transporting(harvest_box))
    }

    fn fly(
        &mut self,
        ctx:    &mut ActorContext<'_>,
        to:     Location,
        travel: TravelTime,
        next:   DronePhase,
    ) -> ActorResult<()> {
        let depart = ctx.now();
        let arrive = ctx.clock.schedule_after(travel.duration(self.location, to), Wake::Drone(self.id))?;
        self.travel = Some(Travel { from: self.location, to, depart, arrive });
        self.phase = next;
        Ok(())
    }

    fn claim(&mut self, ctx: &mut ActorContext<'_>, harvest_box: &HarvestBox) {
        let now = ctx.now();
        debug!(drone = %self.id, box_id = %harvest_box.id, %now, "claimed");
        ctx.emit(SimEvent::BoxClaimed { time: now, drone: self.id, box_id: harvest_box.id });
    }

    fn block(&mut self, ctx: &mut ActorContext<'_>) -> ActorResult<()> {
        let now = ctx.now();
        debug!(drone = %self.id, %now, "waiting in queue");
        ctx.emit(SimEvent::DroneBlocked { time: now, drone: self.id });
        self.phase = DronePhase::WaitingForBox;
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> DroneId {
        self.id
    }

    /// Position at the last processed event (endpoints only).
    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    #[inline]
    pub fn phase(&self) -> &DronePhase {
        &self.phase
    }

    pub fn status(&self) -> DroneStatus {
        match self.phase {
            DronePhase::Idle | DronePhase::WaitingForBox => DroneStatus::Idle,
            DronePhase::ArrivingAtQueue | DronePhase::Collecting(_) => DroneStatus::TravelingToQueue,
            DronePhase::Transporting(_) => DroneStatus::Transporting,
        }
    }

    /// The leg in progress, if any.
    #[inline]
    pub fn travel(&self) -> Option<&Travel> {
        self.travel.as_ref()
    }

    /// Boxes this drone has delivered.
    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Interpolated position at `now`, for frame sampling between events.
    pub fn position_at(&self, now: SimTime) -> Location {
        match &self.travel {
            Some(leg) => leg.position_at(now),
            None => self.location,
        }
    }
}
