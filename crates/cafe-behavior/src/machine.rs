//! The mandate state machine.
//!
//! # Per-tick flow
//!
//! ```text
//! step(agent)
//!   suspended?            → nothing (a movement task is still playing)
//!   handler for mandate:
//!     entry action once   → join queue / plan path / compose goals
//!     rule batch          → RuleEngine::evaluate
//!     Proceed             → exit action + transition
//!     Fail                → keep going, or abort to Wander on stuck/unavailable
//!   Err(e)                → warn; after max_config_faults in a row → Intent::Remove
//! ```
//!
//! Handlers read their payload from a clone of the current mandate and write
//! any timestamp they record back into `agent.mandate`.

use tracing::{debug, error, info, warn};

use cafe_core::{Axis, BehaviorConfig, NodeId, Vec2};
use cafe_nav::search::COINCIDENT_DISTANCE;
use cafe_nav::{Obstacle, Path};
use cafe_queue::{SlotProbe, join_or_create};
use cafe_rules::rules::{
    ARRIVED_AT_DESTINATION, DESTINATION_HAS_QUEUE, ENTER_SCENE, EXIT_REACHED, FIND_DESTINATION,
    FIRST_IN_QUEUE, PATHWAY_DISCOVERED, STUCK_IN_CONTACT, TIME_HAS_ELAPSED,
};
use cafe_rules::{FactKey, RuleEngine, StateBag};
use cafe_steer::{compose_path_goals, compose_wander_goals};

use crate::agent::{Agent, CompletionAction};
use crate::context::SimulationContext;
use crate::error::{BehaviorError, BehaviorResult};
use crate::intent::Intent;
use crate::mandate::{Mandate, Occupancy, WaitInfo};
use crate::pathing::{PlannedRoute, plan_with_fallback};
use crate::world::{DebugSink, MotionCommand, MovementExecutor, NodeRef, WorldQuery};

/// Length of the sit-down animation.
pub const SIT_DOWN_SECS: f64 = 1.0;
/// Length of the exit fade.
pub const FADE_OUT_SECS: f64 = 1.0;

/// Collaborators and the clock reading for one tick.
pub struct TickEnv<'a> {
    pub world:    &'a dyn WorldQuery,
    pub executor: &'a mut dyn MovementExecutor,
    pub debug:    &'a mut dyn DebugSink,
    pub now:      f64,
}

type Step = BehaviorResult<Vec<Intent>>;

fn idle() -> Step {
    Ok(Vec::new())
}

pub struct MandateMachine {
    cfg:    BehaviorConfig,
    engine: RuleEngine,
}

impl MandateMachine {
    pub fn new(cfg: BehaviorConfig) -> Self {
        Self { cfg, engine: RuleEngine::new() }
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.cfg
    }

    /// Diagnostics from the most recent rule evaluation.
    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Advance one agent by one tick.  Never fails: behavior errors abort
    /// the tick and are counted on the agent.
    pub fn step(&mut self, agent: &mut Agent, ctx: &mut SimulationContext, env: &mut TickEnv<'_>) -> Vec<Intent> {
        if agent.suspended {
            return Vec::new();
        }
        match self.update(agent, ctx, env) {
            Ok(intents) => {
                agent.config_faults = 0;
                intents
            }
            Err(e) => {
                agent.config_faults += 1;
                if agent.config_faults >= self.cfg.max_config_faults {
                    error!(
                        agent = %agent.id,
                        mandate = %agent.mandate.kind(),
                        faults = agent.config_faults,
                        error = %e,
                        "removing agent after repeated faults"
                    );
                    vec![Intent::Remove(agent.id)]
                } else {
                    warn!(agent = %agent.id, mandate = %agent.mandate.kind(), error = %e, "agent tick aborted");
                    Vec::new()
                }
            }
        }
    }

    fn update(&mut self, agent: &mut Agent, ctx: &mut SimulationContext, env: &mut TickEnv<'_>) -> Step {
        match agent.mandate.clone() {
            Mandate::EnterScene { route } => self.enter_scene(agent, ctx, env, &route),
            Mandate::Queue { destination, wait } => self.queue(agent, ctx, env, destination, wait),
            Mandate::Served { destination, duration_secs, arrival } => {
                self.served(agent, ctx, env, destination, duration_secs, arrival)
            }
            Mandate::WalkTo { destination, consume_secs } => {
                self.walk_to(agent, ctx, env, destination, consume_secs)
            }
            Mandate::ConsumeSitting { seat, duration_secs, since } => {
                self.consume(agent, ctx, env, seat, duration_secs, since)
            }
            Mandate::Wander { retry, since, wait_secs } => {
                self.wander(agent, ctx, env, retry.map(|m| *m), since, wait_secs)
            }
            Mandate::Leave { exit } => self.leave(agent, ctx, env, exit),
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Switch mandates, releasing any occupancy the new mandate does not
    /// keep.
    pub fn transition(&self, agent: &mut Agent, ctx: &mut SimulationContext, next: Mandate) -> BehaviorResult<()> {
        let (from, to) = (agent.mandate.kind(), next.kind());
        if !from.allows(to) {
            return Err(BehaviorError::IllegalTransition { from, to });
        }
        if let Some(occupancy) = agent.occupancy {
            if !next.holds(&occupancy) {
                ctx.release(agent.id, occupancy);
                agent.occupancy = None;
            }
        }
        debug!(agent = %agent.id, from = %from, to = %to, "mandate transition");
        agent.mandate = next;
        agent.entered = false;
        agent.path = None;
        Ok(())
    }

    fn start_wander(
        &self,
        agent: &mut Agent,
        ctx: &mut SimulationContext,
        now: f64,
        retry: Option<Mandate>,
    ) -> Step {
        let next = Mandate::wander(retry, now, self.cfg.wander_retry_secs);
        self.transition(agent, ctx, next)?;
        idle()
    }

    fn start_leave(&self, agent: &mut Agent, ctx: &mut SimulationContext, world: &dyn WorldQuery) -> Step {
        let exit = world
            .find_nodes(&self.cfg.exit_path)
            .into_iter()
            .next()
            .ok_or_else(|| BehaviorError::MissingNode(self.cfg.exit_path.clone()))?;
        info!(agent = %agent.id, exit = %exit.id, "heading out");
        self.transition(agent, ctx, Mandate::Leave { exit: exit.id })?;
        idle()
    }

    // ── Shared helpers ────────────────────────────────────────────────────

    fn follow(&self, agent: &mut Agent, env: &mut TickEnv<'_>, route: PlannedRoute) {
        env.debug.path(agent.id, route.path.points());
        agent.set_goals(compose_path_goals(&route.path, self.cfg.max_speed, &route.obstacles));
        agent.path = Some(route.path);
    }

    fn dispatch(agent: &mut Agent, env: &mut TickEnv<'_>, commands: Vec<MotionCommand>, action: CompletionAction) {
        let task = env.executor.dispatch(agent.id, agent.position, commands, env.now);
        agent.begin_task(task, action);
    }

    fn floor_obstacles(world: &dyn WorldQuery) -> BehaviorResult<Vec<Obstacle>> {
        let graph = world.navigation_graph().ok_or(BehaviorError::MissingNavigationGraph)?;
        Ok(graph.obstacles().iter().cloned().collect())
    }

    fn node(world: &dyn WorldQuery, id: NodeId) -> BehaviorResult<NodeRef> {
        world.node(id).ok_or_else(|| BehaviorError::MissingNode(id.to_string()))
    }

    fn arrived(&mut self, position: Vec2, target: Vec2) -> bool {
        let bag = StateBag::new()
            .with(FactKey::Position, position)
            .with(FactKey::Target, target)
            .with(FactKey::ArrivalRadius, self.cfg.arrival_radius);
        self.engine.evaluate(&bag, &[ARRIVED_AT_DESTINATION]).is_proceed()
    }

    fn elapsed(&mut self, now: f64, since: Option<f64>, threshold: f64) -> bool {
        let bag = StateBag::new()
            .with(FactKey::Now, now)
            .with_opt(FactKey::Since, since)
            .with(FactKey::Threshold, threshold);
        self.engine.evaluate(&bag, &[TIME_HAS_ELAPSED]).is_proceed()
    }

    // ── EnterScene ────────────────────────────────────────────────────────

    fn enter_scene(
        &mut self,
        agent: &mut Agent,
        ctx: &mut SimulationContext,
        env: &mut TickEnv<'_>,
        route: &[Vec2],
    ) -> Step {
        if !agent.entered {
            let obstacles = Self::floor_obstacles(env.world)?;
            let path = Path::new(route.to_vec(), self.cfg.path_radius);
            env.debug.path(agent.id, path.points());
            agent.set_goals(compose_path_goals(&path, self.cfg.max_speed, &obstacles));
            agent.path = Some(path);
            agent.entered = true;
        }

        let threshold = route.last().copied().unwrap_or(agent.position);
        let origin = route.first().copied().unwrap_or(threshold);
        let bag = StateBag::new()
            .with(FactKey::Position, agent.position)
            .with(FactKey::EntryThreshold, threshold)
            .with(FactKey::EntryAxis, Axis::dominant(threshold - origin))
            .with(FactKey::EntryTolerance, self.cfg.entry_tolerance);
        if !self.engine.evaluate(&bag, &[ENTER_SCENE]).is_proceed() {
            return idle();
        }

        let counter = env
            .world
            .find_nodes(&self.cfg.counter_path)
            .into_iter()
            .find(|n| env.world.is_available(n.id));
        match counter {
            Some(counter) => {
                let next = Mandate::Queue {
                    destination: counter.id,
                    wait:        WaitInfo::new(self.cfg.queue_wait_secs),
                };
                self.transition(agent, ctx, next)?;
                idle()
            }
            None => {
                info!(agent = %agent.id, "no counter open");
                self.start_leave(agent, ctx, env.world)
            }
        }
    }

    // ── Queue ─────────────────────────────────────────────────────────────

    fn queue(
        &mut self,
        agent: &mut Agent,
        ctx: &mut SimulationContext,
        env: &mut TickEnv<'_>,
        destination: NodeId,
        wait: WaitInfo,
    ) -> Step {
        let retry = Mandate::Queue { destination, wait: WaitInfo::new(wait.wait_secs) };

        let node = env.world.node(destination);
        let bag = StateBag::new()
            .with(FactKey::DestinationAvailable, node.is_some() && env.world.is_available(destination));
        let found = self.engine.evaluate(&bag, &[FIND_DESTINATION]).is_proceed();
        let (true, Some(node)) = (found, node) else {
            info!(agent = %agent.id, node = %destination, "queue destination unavailable");
            return self.start_wander(agent, ctx, env.now, Some(retry));
        };

        if !agent.entered {
            return self.join_queue(agent, ctx, env, &node, retry);
        }

        let Some(slot) = ctx.queues.peek(destination).and_then(|q| q.slot_of(agent.id)) else {
            // Our line was discarded under us; join again next tick.
            agent.occupancy = None;
            agent.entered = false;
            return idle();
        };

        let here = Occupancy::QueueSlot { node: destination, index: slot.index };
        if agent.occupancy != Some(here) {
            debug!(agent = %agent.id, node = %destination, index = slot.index, "queue position changed");
            agent.occupancy = Some(here);
            set_queue_arrival(agent, None);
            return self.approach_slot(agent, ctx, env, slot.point, destination, retry);
        }

        let Some(arrived_at) = wait.arrival else {
            if self.arrived(agent.position, slot.point) {
                agent.stop();
                set_queue_arrival(agent, Some(env.now));
                debug!(agent = %agent.id, node = %destination, index = slot.index, "arrived at queue slot");
                return idle();
            }
            let stuck = StateBag::new()
                .with(FactKey::Now, env.now)
                .with_opt(FactKey::ContactSince, agent.contact_since)
                .with(FactKey::StuckGrace, self.cfg.stuck_grace_secs);
            if self.engine.evaluate(&stuck, &[STUCK_IN_CONTACT]).is_proceed() {
                info!(agent = %agent.id, node = %destination, "stuck in queue, giving up for now");
                return self.start_wander(agent, ctx, env.now, Some(retry));
            }
            return idle();
        };

        let bag = StateBag::new()
            .with(FactKey::Now, env.now)
            .with(FactKey::Since, arrived_at)
            .with(FactKey::Threshold, wait.wait_secs)
            .with(FactKey::QueueIndex, slot.index);
        if !self.engine.evaluate(&bag, &[TIME_HAS_ELAPSED, FIRST_IN_QUEUE]).is_proceed() {
            return idle();
        }

        let mut line = match ctx.queues.fetch(destination) {
            Some(line) => line,
            None => return idle(),
        };
        let commands = line.move_forward();
        ctx.queues.store(line);

        let intents = commands
            .into_iter()
            .map(|c| Intent::Relocate {
                agent:         c.agent,
                node:          destination,
                slot_index:    c.slot_index,
                target:        c.target,
                reset_arrival: c.reset_arrival,
            })
            .collect();

        let next = Mandate::Served {
            destination,
            duration_secs: self.cfg.service_secs,
            arrival: None,
        };
        self.transition(agent, ctx, next)?;
        info!(agent = %agent.id, node = %destination, "served");
        Ok(intents)
    }

    fn join_queue(
        &mut self,
        agent: &mut Agent,
        ctx: &mut SimulationContext,
        env: &mut TickEnv<'_>,
        node: &NodeRef,
        retry: Mandate,
    ) -> Step {
        let graph = env.world.navigation_graph().ok_or(BehaviorError::MissingNavigationGraph)?;
        // The counter's own furniture never blocks its line.
        let owned: Vec<_> = env
            .world
            .obstacles_near(node.id)
            .ok_or(BehaviorError::MissingObstacles(node.id))?
            .into_iter()
            .map(|o| o.id)
            .collect();
        let probe = SlotProbe::new(graph.obstacles(), self.cfg.slot_size, self.cfg.max_queue_slots)
            .ignoring(&owned)
            .within(self.cfg.floor_bounds);
        let outcome = join_or_create(&mut ctx.queues, node.id, node.position, agent.id, |c| probe.probe(c).1);

        let Some(slot) = outcome.slot else {
            info!(agent = %agent.id, node = %node.id, "queue full");
            return self.start_wander(agent, ctx, env.now, Some(retry));
        };
        if outcome.created {
            if let Some(line) = ctx.queues.peek(node.id) {
                env.debug.queue_slots(node.id, line.slots());
            }
        }
        agent.occupancy = Some(Occupancy::QueueSlot { node: node.id, index: slot.index });
        debug!(agent = %agent.id, node = %node.id, index = slot.index, "joined queue");

        agent.entered = true;
        self.approach_slot(agent, ctx, env, slot.point, node.id, retry)
    }

    /// Plan a walk to a queue slot.  An agent already standing on it just
    /// stops.
    fn approach_slot(
        &mut self,
        agent: &mut Agent,
        ctx: &mut SimulationContext,
        env: &mut TickEnv<'_>,
        target: Vec2,
        destination: NodeId,
        retry: Mandate,
    ) -> Step {
        if agent.position.distance(target) < COINCIDENT_DISTANCE {
            agent.stop();
            agent.path = None;
            return idle();
        }
        match plan_with_fallback(env.world, agent.position, target, Some(destination), &self.cfg)? {
            Some(route) => {
                self.follow(agent, env, route);
                idle()
            }
            None => self.start_wander(agent, ctx, env.now, Some(retry)),
        }
    }

    // ── Served ────────────────────────────────────────────────────────────

    fn served(
        &mut self,
        agent: &mut Agent,
        ctx: &mut SimulationContext,
        env: &mut TickEnv<'_>,
        destination: NodeId,
        duration_secs: f64,
        arrival: Option<f64>,
    ) -> Step {
        let Some(arrived_at) = arrival else {
            agent.stop();
            if let Mandate::Served { arrival, .. } = &mut agent.mandate {
                *arrival = Some(env.now);
            }
            if let Some(counter) = env.world.node(destination) {
                Self::dispatch(agent, env, vec![MotionCommand::Face { toward: counter.position }], CompletionAction::Resume);
            }
            return idle();
        };

        if !self.elapsed(env.now, Some(arrived_at), duration_secs) {
            return idle();
        }

        let seats: Vec<NodeId> = env
            .world
            .find_nodes(&self.cfg.seat_path)
            .into_iter()
            .map(|n| n.id)
            .filter(|&id| env.world.is_available(id) && ctx.seat_holder(id).is_none())
            .collect();

        match agent.rng.choose(&seats).copied() {
            Some(seat) => {
                let next = Mandate::WalkTo { destination: seat, consume_secs: self.cfg.consume_secs };
                self.transition(agent, ctx, next)?;
                ctx.claim_seat(seat, agent.id);
                agent.occupancy = Some(Occupancy::Seat(seat));
                debug!(agent = %agent.id, seat = %seat, "seat claimed");
                idle()
            }
            None => {
                info!(agent = %agent.id, "no free seat");
                self.start_leave(agent, ctx, env.world)
            }
        }
    }

    // ── WalkTo ────────────────────────────────────────────────────────────

    fn walk_to(
        &mut self,
        agent: &mut Agent,
        ctx: &mut SimulationContext,
        env: &mut TickEnv<'_>,
        destination: NodeId,
        consume_secs: f64,
    ) -> Step {
        let seat = Self::node(env.world, destination)?;

        if !agent.entered {
            match plan_with_fallback(env.world, agent.position, seat.position, Some(destination), &self.cfg)? {
                Some(route) => self.follow(agent, env, route),
                None => {
                    let retry = Mandate::WalkTo { destination, consume_secs };
                    return self.start_wander(agent, ctx, env.now, Some(retry));
                }
            }
            agent.entered = true;
        }

        let bag = StateBag::new()
            .with(FactKey::PathLength, agent.path.as_ref().map_or(0, Path::len))
            .with(FactKey::Position, agent.position)
            .with(FactKey::Target, seat.position)
            .with(FactKey::ArrivalRadius, self.cfg.arrival_radius);
        if !self.engine.evaluate(&bag, &[PATHWAY_DISCOVERED, ARRIVED_AT_DESTINATION]).is_proceed() {
            return idle();
        }

        agent.stop();
        let sit = vec![
            MotionCommand::MoveTo { target: seat.position, speed: self.cfg.max_speed * 0.5 },
            MotionCommand::Wait { secs: SIT_DOWN_SECS },
        ];
        Self::dispatch(agent, env, sit, CompletionAction::Resume);
        let next = Mandate::ConsumeSitting { seat: destination, duration_secs: consume_secs, since: None };
        self.transition(agent, ctx, next)?;
        idle()
    }

    // ── ConsumeSitting ────────────────────────────────────────────────────

    fn consume(
        &mut self,
        agent: &mut Agent,
        ctx: &mut SimulationContext,
        env: &mut TickEnv<'_>,
        _seat: NodeId,
        duration_secs: f64,
        since: Option<f64>,
    ) -> Step {
        let Some(sat_down) = since else {
            if let Mandate::ConsumeSitting { since, .. } = &mut agent.mandate {
                *since = Some(env.now);
            }
            return idle();
        };
        if !self.elapsed(env.now, Some(sat_down), duration_secs) {
            return idle();
        }
        self.start_leave(agent, ctx, env.world)
    }

    // ── Leave ─────────────────────────────────────────────────────────────

    fn leave(&mut self, agent: &mut Agent, ctx: &mut SimulationContext, env: &mut TickEnv<'_>, exit: NodeId) -> Step {
        let door = Self::node(env.world, exit)?;

        if !agent.entered {
            match plan_with_fallback(env.world, agent.position, door.position, Some(exit), &self.cfg)? {
                Some(route) => self.follow(agent, env, route),
                None => return self.start_wander(agent, ctx, env.now, Some(Mandate::Leave { exit })),
            }
            agent.entered = true;
        }

        let bag = StateBag::new()
            .with(FactKey::Position, agent.position)
            .with(FactKey::Target, door.position)
            .with(FactKey::ExitRadius, self.cfg.exit_radius);
        if !self.engine.evaluate(&bag, &[EXIT_REACHED]).is_proceed() {
            return idle();
        }

        agent.stop();
        Self::dispatch(agent, env, vec![MotionCommand::Fade { secs: FADE_OUT_SECS }], CompletionAction::Despawn);
        info!(agent = %agent.id, "reached exit");
        idle()
    }

    // ── Wander ────────────────────────────────────────────────────────────

    fn wander(
        &mut self,
        agent: &mut Agent,
        ctx: &mut SimulationContext,
        env: &mut TickEnv<'_>,
        retry: Option<Mandate>,
        since: f64,
        wait_secs: f64,
    ) -> Step {
        if !agent.entered {
            let obstacles = Self::floor_obstacles(env.world)?;
            agent.set_goals(compose_wander_goals(self.cfg.play_area_center, &obstacles));
            agent.entered = true;
        }

        if !self.elapsed(env.now, Some(since), wait_secs) {
            return idle();
        }

        match retry {
            None => self.start_leave(agent, ctx, env.world),
            Some(Mandate::Queue { destination, wait }) => match self.reseek(ctx, env.world, destination) {
                Some(counter) => {
                    let next = Mandate::Queue { destination: counter, wait: WaitInfo::new(wait.wait_secs) };
                    self.transition(agent, ctx, next)?;
                    idle()
                }
                None => {
                    debug!(agent = %agent.id, "no queue has room yet");
                    if let Mandate::Wander { since, .. } = &mut agent.mandate {
                        *since = env.now;
                    }
                    idle()
                }
            },
            Some(other) => {
                self.transition(agent, ctx, other)?;
                idle()
            }
        }
    }

    /// First counter, preferring `preferred`, that is available and either
    /// has no queue or has room in it.
    fn reseek(&mut self, ctx: &SimulationContext, world: &dyn WorldQuery, preferred: NodeId) -> Option<NodeId> {
        let others = world.find_nodes(&self.cfg.counter_path).into_iter().map(|n| n.id);
        let candidates = std::iter::once(preferred).chain(others.filter(|&id| id != preferred));

        for node in candidates.collect::<Vec<_>>() {
            let bag = StateBag::new()
                .with(FactKey::DestinationAvailable, world.node(node).is_some() && world.is_available(node))
                .with(FactKey::QueueExists, ctx.queues.contains(node));
            if !self.engine.evaluate(&bag, &[FIND_DESTINATION]).is_proceed() {
                continue;
            }
            let queued = self.engine.evaluate(&bag, &[DESTINATION_HAS_QUEUE]).is_proceed();
            if !queued || ctx.queues.peek(node).is_some_and(|q| q.has_capacity()) {
                return Some(node);
            }
        }
        None
    }
}

fn set_queue_arrival(agent: &mut Agent, arrival: Option<f64>) {
    if let Mandate::Queue { wait, .. } = &mut agent.mandate {
        wait.arrival = arrival;
    }
}
