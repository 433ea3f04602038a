//! The `Sim` struct and its tick loop.

use tracing::{debug, info, warn};

use cafe_behavior::{
    AgentStore, CompletionAction, DebugSink, Intent, Mandate, MandateMachine, MotionCommand,
    MovementExecutor, MovementIntegrator, Occupancy, SimulationContext, TickEnv, WorldQuery,
};
use cafe_core::{AgentId, Clock, SimConfig, Tick, Vec2};

use crate::observer::DespawnReason;
use crate::spawner::Spawner;
use crate::SimObserver;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The world driver.
///
/// `Sim<W, E, I, C>` owns every agent, the shared queue/seat state and the
/// injected collaborators, and drives the tick loop:
///
/// 1. **Clock**: advance by `tick_secs` and read `now`.
/// 2. **Completions**: poll the executor; resume, reset arrival or mark for
///    removal according to each task's completion action.
/// 3. **Arrivals**: the spawner may add one customer at the entry route.
/// 4. **Behavior** (ascending `AgentId`): step the mandate machine for each
///    agent, applying its [`Intent`]s before the next agent runs.
/// 5. **Movement**: integrate every non-suspended agent's goal set and
///    update its contact timestamp.
/// 6. **Removal**: release occupancy, then drop the agent.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<W, E, I, C>
where
    W: WorldQuery,
    E: MovementExecutor,
    I: MovementIntegrator,
    C: Clock,
{
    pub config: SimConfig,

    /// Mandate handlers plus the behavior thresholds they read.
    pub machine: MandateMachine,

    pub agents: AgentStore,

    /// Queue registry and seat claims.
    pub ctx: SimulationContext,

    pub world:      W,
    pub executor:   E,
    pub integrator: I,
    pub clock:      C,
    pub debug:      Box<dyn DebugSink>,

    /// Frames processed so far.
    pub tick: Tick,

    pub spawner: Spawner,

    pub(crate) entry_route: Vec<Vec2>,
}

impl<W, E, I, C> Sim<W, E, I, C>
where
    W: WorldQuery,
    E: MovementExecutor,
    I: MovementIntegrator,
    C: Clock,
{
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until `config.total_ticks` frames have been processed.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        while self.tick.0 < self.config.total_ticks {
            self.step(observer);
        }
        observer.on_sim_end(self.tick);
    }

    /// Run exactly `n` frames (ignores `total_ticks`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// The entry route every spawned customer follows; its last point is the
    /// threshold.
    pub fn entry_route(&self) -> &[Vec2] {
        &self.entry_route
    }

    /// Place an agent directly.
    pub fn spawn(&mut self, position: Vec2, mandate: Mandate) -> AgentId {
        self.agents.spawn(position, mandate, self.config.seed)
    }

    /// Place a customer at the start of the entry route.
    pub fn spawn_customer(&mut self) -> AgentId {
        let start = self.entry_route.first().copied().unwrap_or(Vec2::ZERO);
        let route = self.entry_route.clone();
        let id = self.spawn(start, Mandate::EnterScene { route });
        info!(agent = %id, "customer arrived");
        id
    }

    /// Process one frame.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let tick = self.tick;
        self.clock.advance(self.config.tick_secs);
        let now = self.clock.now();
        observer.on_tick_start(tick, now);

        let mut leaving: Vec<(AgentId, DespawnReason)> = Vec::new();

        // ── Phase 2: finished movement tasks ─────────────────────────────
        for done in self.executor.poll_completed(now) {
            let Some(agent) = self.agents.get_mut(done.agent) else {
                continue;
            };
            if agent.complete_task(&done) {
                leaving.push((done.agent, DespawnReason::Exited));
            }
        }

        // ── Phase 3: arrivals ─────────────────────────────────────────────
        if self.spawner.poll(now, self.agents.len()) {
            let id = self.spawn_customer();
            observer.on_spawn(id, now);
        }

        // ── Phase 4: behavior ─────────────────────────────────────────────
        //
        // Intents are applied right after the update that produced them, so
        // a relocation ordered by agent 3 is visible to agent 4 this frame.
        for id in self.agents.ids() {
            if leaving.iter().any(|&(a, _)| a == id) {
                continue;
            }
            for intent in self.update_agent(id, now, observer) {
                self.apply(intent, now, &mut leaving);
            }
        }

        // ── Phase 5: free movement ────────────────────────────────────────
        let dt = self.config.tick_secs;
        for agent in self.agents.iter_mut() {
            if agent.suspended || leaving.iter().any(|&(a, _)| a == agent.id) {
                continue;
            }
            let next = self.integrator.integrate(agent.id, agent.position, &agent.goals, dt);
            agent.move_to(next);
            if self.world.in_contact(agent.id, agent.position) {
                agent.contact_since.get_or_insert(now);
            } else {
                agent.contact_since = None;
            }
        }

        // ── Phase 6: removal ──────────────────────────────────────────────
        for (id, reason) in leaving {
            let Some(agent) = self.agents.remove(id) else {
                continue;
            };
            if let Some(occupancy) = agent.occupancy {
                self.ctx.release(id, occupancy);
            }
            self.integrator.forget(id);
            match reason {
                DespawnReason::Exited => info!(agent = %id, "customer left"),
                DespawnReason::Faulted => warn!(agent = %id, mandate = %agent.mandate.kind(), "agent removed"),
            }
            observer.on_despawn(id, reason, now);
        }

        observer.on_tick_end(tick, &self.agents, &self.ctx);
        self.tick = tick.next();
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn update_agent<O: SimObserver>(&mut self, id: AgentId, now: f64, observer: &mut O) -> Vec<Intent> {
        let Some(agent) = self.agents.get_mut(id) else {
            return Vec::new();
        };
        let before = agent.mandate.kind();
        let mut env = TickEnv {
            world:    &self.world,
            executor: &mut self.executor,
            debug:    &mut *self.debug,
            now,
        };
        let intents = self.machine.step(agent, &mut self.ctx, &mut env);
        let after = agent.mandate.kind();
        if before != after {
            observer.on_transition(id, before, after, now);
        }
        intents
    }

    fn apply(&mut self, intent: Intent, now: f64, leaving: &mut Vec<(AgentId, DespawnReason)>) {
        match intent {
            Intent::Relocate { agent, node, slot_index, target, reset_arrival } => {
                let Some(a) = self.agents.get_mut(agent) else {
                    warn!(agent = %agent, node = %node, "relocation for unknown agent");
                    return;
                };
                a.stop();
                a.path = None;
                a.occupancy = Some(Occupancy::QueueSlot { node, index: slot_index });
                let step = MotionCommand::MoveTo { target, speed: self.machine.config().max_speed };
                let task = self.executor.dispatch(agent, a.position, vec![step], now);
                let action = if reset_arrival { CompletionAction::ResetArrival } else { CompletionAction::Resume };
                a.begin_task(task, action);
                debug!(agent = %agent, node = %node, index = slot_index, "moving up in queue");
            }
            Intent::Remove(agent) => {
                if !leaving.iter().any(|&(a, _)| a == agent) {
                    leaving.push((agent, DespawnReason::Faulted));
                }
            }
        }
    }
}
