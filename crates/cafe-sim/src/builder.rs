//! Fluent builder for constructing a [`Sim`].

use cafe_behavior::{
    AgentStore, DebugSink, MandateMachine, MovementExecutor, MovementIntegrator, NoopDebugSink,
    SimulationContext, WorldQuery,
};
use cafe_core::{BehaviorConfig, Clock, SimConfig, Tick, TickClock, Vec2};

use crate::executor::TimedExecutor;
use crate::floor::FloorPlan;
use crate::integrator::GoalSeekIntegrator;
use crate::spawner::Spawner;
use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<W, E, I, C>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: tick length, total ticks, seed, spawn cadence
/// - [`BehaviorConfig`]: thresholds and scene paths
/// - `W: WorldQuery`: the scene
/// - `E: MovementExecutor`: plays scripted sequences
/// - `I: MovementIntegrator`: moves agents along their goals
/// - `C: Clock`: the time source
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default          |
/// |------------------|------------------|
/// | `.debug_sink(s)` | `NoopDebugSink`  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::with_floor(config, behavior, floor).build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<W, E, I, C>
where
    W: WorldQuery,
    E: MovementExecutor,
    I: MovementIntegrator,
    C: Clock,
{
    config:     SimConfig,
    behavior:   BehaviorConfig,
    world:      W,
    executor:   E,
    integrator: I,
    clock:      C,
    debug:      Option<Box<dyn DebugSink>>,
}

impl<W, E, I, C> SimBuilder<W, E, I, C>
where
    W: WorldQuery,
    E: MovementExecutor,
    I: MovementIntegrator,
    C: Clock,
{
    /// Create a builder with all required inputs.
    pub fn new(
        config:     SimConfig,
        behavior:   BehaviorConfig,
        world:      W,
        executor:   E,
        integrator: I,
        clock:      C,
    ) -> Self {
        Self { config, behavior, world, executor, integrator, clock, debug: None }
    }

    /// Receive path and queue-slot previews.
    pub fn debug_sink(mut self, sink: impl DebugSink + 'static) -> Self {
        self.debug = Some(Box::new(sink));
        self
    }

    /// Validate both configurations and the scene, and return a ready-to-run
    /// [`Sim`].
    ///
    /// The scene must have at least one exit node, and an entry route when
    /// the spawner is enabled.
    pub fn build(self) -> SimResult<Sim<W, E, I, C>> {
        self.config.validate()?;
        self.behavior.validate()?;

        let entry_route: Vec<Vec2> = self
            .world
            .find_nodes(&self.behavior.entry_path)
            .into_iter()
            .map(|n| n.position)
            .collect();
        let spawner = Spawner::new(&self.config);
        if entry_route.is_empty() && spawner.enabled() {
            return Err(SimError::MissingEntry(self.behavior.entry_path));
        }
        if self.world.find_nodes(&self.behavior.exit_path).is_empty() {
            return Err(SimError::MissingNodes(self.behavior.exit_path));
        }

        Ok(Sim {
            config:      self.config,
            machine:     MandateMachine::new(self.behavior),
            agents:      AgentStore::new(),
            ctx:         SimulationContext::new(),
            world:       self.world,
            executor:    self.executor,
            integrator:  self.integrator,
            clock:       self.clock,
            debug:       self.debug.unwrap_or_else(|| Box::new(NoopDebugSink)),
            tick:        Tick::ZERO,
            spawner,
            entry_route,
        })
    }
}

impl SimBuilder<FloorPlan, TimedExecutor, GoalSeekIntegrator, TickClock> {
    /// The reference stack: a static floor, timed scripted moves, goal-seek
    /// integration and a fixed-step clock.
    pub fn with_floor(config: SimConfig, behavior: BehaviorConfig, floor: FloorPlan) -> Self {
        let integrator = GoalSeekIntegrator::new(behavior.max_speed, config.seed);
        let clock = TickClock::new(config.tick_secs);
        Self::new(config, behavior, floor, TimedExecutor::new(), integrator, clock)
    }
}
