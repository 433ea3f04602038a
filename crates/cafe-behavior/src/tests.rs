//! Unit tests for cafe-behavior.
//!
//! The floor used throughout:
//!
//! ```text
//!   entry (50,100)   counter (200,100) → slots (225,100), (275,100), ...
//!
//!                                   seat (500,300)
//!   exit (50,500)
//! ```
//!
//! No furniture unless a test adds some; four corner waypoints.

#[cfg(test)]
mod helpers {
    use cafe_core::{AgentId, BehaviorConfig, NodeId, ObstacleId, Polygon, Rect, TaskId, Vec2};
    use cafe_nav::{NavigationGraph, Obstacle};

    use crate::{
        Agent, Intent, Mandate, MandateMachine, MotionCommand, MovementExecutor, NodeRef, NoopDebugSink,
        SimulationContext, TaskCompletion, TickEnv, WorldQuery,
    };

    pub const COUNTER: NodeId = NodeId(1);
    pub const SEAT: NodeId = NodeId(2);
    pub const EXIT: NodeId = NodeId(3);

    pub fn slot(i: usize) -> Vec2 {
        Vec2::new(225.0 + 50.0 * i as f64, 100.0)
    }

    pub struct TestWorld {
        pub nodes:     Vec<NodeRef>,
        pub closed:    Vec<NodeId>,
        pub obstacles: Vec<Obstacle>,
        pub waypoints: Vec<Vec2>,
        pub has_graph: bool,
    }

    impl TestWorld {
        pub fn cafe() -> Self {
            let node = |id, x, y, path: &str| NodeRef { id: NodeId(id), position: Vec2::new(x, y), path: path.into() };
            Self {
                nodes: vec![
                    node(0, 50.0, 100.0, "floor/entry"),
                    node(1, 200.0, 100.0, "floor/counter"),
                    node(2, 500.0, 300.0, "floor/seat"),
                    node(3, 50.0, 500.0, "floor/exit"),
                ],
                closed:    Vec::new(),
                obstacles: Vec::new(),
                waypoints: vec![
                    Vec2::new(0.0, 0.0),
                    Vec2::new(800.0, 0.0),
                    Vec2::new(0.0, 600.0),
                    Vec2::new(800.0, 600.0),
                ],
                has_graph: true,
            }
        }
    }

    impl WorldQuery for TestWorld {
        fn find_nodes(&self, path: &str) -> Vec<NodeRef> {
            self.nodes.iter().filter(|n| n.path == path).cloned().collect()
        }

        fn node(&self, id: NodeId) -> Option<NodeRef> {
            self.nodes.iter().find(|n| n.id == id).cloned()
        }

        fn is_available(&self, node: NodeId) -> bool {
            !self.closed.contains(&node)
        }

        fn obstacles_near(&self, node: NodeId) -> Option<Vec<Obstacle>> {
            self.node(node)?;
            Some(self.obstacles.iter().filter(|o| o.owner == Some(node)).cloned().collect())
        }

        fn navigation_graph(&self) -> Option<NavigationGraph> {
            if !self.has_graph {
                return None;
            }
            let mut graph = NavigationGraph::with_waypoints(self.waypoints.iter().copied());
            graph.set_obstacles(self.obstacles.clone());
            Some(graph)
        }

        fn in_contact(&self, _agent: AgentId, _position: Vec2) -> bool {
            false
        }
    }

    /// Records dispatches; never completes anything on its own.
    #[derive(Default)]
    pub struct Recorder {
        pub dispatched: Vec<(AgentId, Vec<MotionCommand>)>,
    }

    impl MovementExecutor for Recorder {
        fn dispatch(&mut self, agent: AgentId, _from: Vec2, commands: Vec<MotionCommand>, _now: f64) -> TaskId {
            self.dispatched.push((agent, commands));
            TaskId(self.dispatched.len() as u64 - 1)
        }

        fn poll_completed(&mut self, _now: f64) -> Vec<TaskCompletion> {
            Vec::new()
        }
    }

    pub struct Rig {
        pub machine: MandateMachine,
        pub ctx:     SimulationContext,
        pub world:   TestWorld,
        pub exec:    Recorder,
    }

    impl Rig {
        pub fn new() -> Self {
            Self {
                machine: MandateMachine::new(BehaviorConfig::default()),
                ctx:     SimulationContext::new(),
                world:   TestWorld::cafe(),
                exec:    Recorder::default(),
            }
        }

        pub fn step(&mut self, agent: &mut Agent, now: f64) -> Vec<Intent> {
            let mut debug = NoopDebugSink;
            let mut env = TickEnv { world: &self.world, executor: &mut self.exec, debug: &mut debug, now };
            self.machine.step(agent, &mut self.ctx, &mut env)
        }
    }

    pub fn agent(id: u32, at: Vec2, mandate: Mandate) -> Agent {
        Agent::new(AgentId(id), at, mandate, 7)
    }

    /// Floor-to-ceiling wall at x 290..310.
    pub fn wall() -> Obstacle {
        let rect = Rect::new(Vec2::new(290.0, -100.0), Vec2::new(310.0, 700.0));
        Obstacle::new(ObstacleId(0), Polygon::from_rect(rect), 10.0)
    }

    pub fn queueing(id: u32, at: Vec2) -> Agent {
        agent(id, at, Mandate::Queue { destination: COUNTER, wait: crate::WaitInfo::new(3.0) })
    }
}

// ── Transition table ──────────────────────────────────────────────────────────

#[cfg(test)]
mod transitions {
    use cafe_core::{AgentId, Vec2};

    use super::helpers::*;
    use crate::{BehaviorError, Mandate, MandateKind, Occupancy, WaitInfo};

    #[test]
    fn table_has_no_self_loops() {
        for kind in MandateKind::ALL {
            assert!(!kind.allows(kind), "{kind} loops");
        }
        assert!(MandateKind::EnterScene.allows(MandateKind::Queue));
        assert!(MandateKind::Leave.allows(MandateKind::Wander));
        assert!(!MandateKind::EnterScene.allows(MandateKind::Served));
        assert!(!MandateKind::ConsumeSitting.allows(MandateKind::Wander));
    }

    #[test]
    fn illegal_transition_is_rejected() {
        let mut rig = Rig::new();
        let mut a = queueing(0, Vec2::ZERO);
        let err = rig.machine.transition(&mut a, &mut rig.ctx, Mandate::Leave { exit: EXIT });
        assert_eq!(err, Err(BehaviorError::IllegalTransition { from: MandateKind::Queue, to: MandateKind::Leave }));
        assert_eq!(a.mandate.kind(), MandateKind::Queue);
    }

    #[test]
    fn leaving_the_queue_releases_the_slot() {
        let mut rig = Rig::new();
        let mut a = queueing(0, slot(0));
        rig.step(&mut a, 1.0);
        assert!(rig.ctx.queues.contains(COUNTER));

        rig.machine.transition(&mut a, &mut rig.ctx, Mandate::wander(None, 1.0, 5.0)).unwrap();
        assert_eq!(a.occupancy, None);
        assert!(!rig.ctx.queues.contains(COUNTER));
        assert!(!rig.ctx.references(AgentId(0)));
    }

    #[test]
    fn seat_survives_a_wander_that_retries_the_walk() {
        let mut rig = Rig::new();
        let walk = Mandate::WalkTo { destination: SEAT, consume_secs: 20.0 };
        let mut a = agent(0, Vec2::ZERO, walk.clone());
        rig.ctx.claim_seat(SEAT, a.id);
        a.occupancy = Some(Occupancy::Seat(SEAT));

        rig.machine.transition(&mut a, &mut rig.ctx, Mandate::wander(Some(walk), 0.0, 5.0)).unwrap();
        assert_eq!(a.occupancy, Some(Occupancy::Seat(SEAT)));
        assert_eq!(rig.ctx.seat_holder(SEAT), Some(a.id));

        let queue = Mandate::Queue { destination: COUNTER, wait: WaitInfo::new(3.0) };
        rig.machine.transition(&mut a, &mut rig.ctx, queue).unwrap();
        assert_eq!(a.occupancy, None);
        assert_eq!(rig.ctx.seat_holder(SEAT), None);
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod handlers {
    use cafe_core::{AgentId, BehaviorConfig, ObstacleId, Polygon, Rect, Vec2};
    use cafe_nav::Obstacle;

    use super::helpers::*;
    use crate::{CompletionAction, Intent, Mandate, MandateKind, MandateMachine, MotionCommand, Occupancy};

    #[test]
    fn entering_agent_heads_for_the_counter() {
        let mut rig = Rig::new();
        let route = vec![Vec2::new(0.0, 100.0), Vec2::new(50.0, 100.0)];
        let mut a = agent(0, Vec2::new(0.0, 100.0), Mandate::EnterScene { route });

        rig.step(&mut a, 0.0);
        assert_eq!(a.mandate.kind(), MandateKind::EnterScene);
        assert_eq!(a.path.as_ref().map(|p| p.len()), Some(2));

        a.move_to(Vec2::new(48.0, 130.0));
        rig.step(&mut a, 0.5);
        assert!(matches!(a.mandate, Mandate::Queue { destination: COUNTER, .. }));
    }

    #[test]
    fn no_open_counter_means_leaving() {
        let mut rig = Rig::new();
        rig.world.closed.push(COUNTER);
        let mut a = agent(0, Vec2::new(50.0, 100.0), Mandate::EnterScene { route: vec![Vec2::new(50.0, 100.0)] });
        rig.step(&mut a, 0.0);
        assert_eq!(a.mandate, Mandate::Leave { exit: EXIT });
    }

    #[test]
    fn lone_customer_is_served_and_the_queue_discarded() {
        let mut rig = Rig::new();
        let mut a = queueing(0, Vec2::new(150.0, 100.0));

        rig.step(&mut a, 1.0);
        assert_eq!(a.occupancy, Some(Occupancy::QueueSlot { node: COUNTER, index: 0 }));
        assert_eq!(a.path.as_ref().and_then(|p| p.end()), Some(slot(0)));

        rig.step(&mut a, 2.0);
        assert!(matches!(a.mandate, Mandate::Queue { wait, .. } if wait.arrival.is_none()));

        a.move_to(slot(0));
        rig.step(&mut a, 3.0);
        assert!(matches!(a.mandate, Mandate::Queue { wait, .. } if wait.arrival == Some(3.0)));

        // 3 s wait has not strictly elapsed yet.
        assert!(rig.step(&mut a, 6.0).is_empty());
        assert_eq!(a.mandate.kind(), MandateKind::Queue);

        assert!(rig.step(&mut a, 7.0).is_empty());
        assert_eq!(a.mandate.kind(), MandateKind::Served);
        assert_eq!(a.occupancy, None);
        assert!(rig.ctx.queues.is_empty());
    }

    #[test]
    fn serving_the_head_moves_the_line_up() {
        let mut rig = Rig::new();
        let mut a = queueing(0, slot(0));
        let mut b = queueing(1, slot(1));
        rig.step(&mut a, 1.0);
        rig.step(&mut b, 1.0);
        assert_eq!(b.occupancy, Some(Occupancy::QueueSlot { node: COUNTER, index: 1 }));

        rig.step(&mut a, 2.0);
        rig.step(&mut b, 2.0);
        let intents = rig.step(&mut a, 6.0);
        assert_eq!(
            intents,
            vec![Intent::Relocate { agent: b.id, node: COUNTER, slot_index: 0, target: slot(0), reset_arrival: true }]
        );
        assert_eq!(a.mandate.kind(), MandateKind::Served);
        assert_eq!(rig.ctx.queues.peek(COUNTER).and_then(|q| q.head()), Some(b.id));
    }

    #[test]
    fn second_in_line_waits_for_the_head() {
        let mut rig = Rig::new();
        let mut a = queueing(0, slot(0));
        let mut b = queueing(1, slot(1));
        rig.step(&mut a, 1.0);
        rig.step(&mut b, 1.0);
        rig.step(&mut b, 2.0);
        assert!(rig.step(&mut b, 10.0).is_empty());
        assert_eq!(b.mandate.kind(), MandateKind::Queue);
    }

    #[test]
    fn removal_ahead_is_noticed_on_the_next_update() {
        let mut rig = Rig::new();
        let mut a = queueing(0, slot(0));
        let mut b = queueing(1, slot(1));
        let mut c = queueing(2, slot(2));
        for x in [&mut a, &mut b, &mut c] {
            rig.step(x, 1.0);
        }
        rig.step(&mut c, 2.0);
        assert!(matches!(c.mandate, Mandate::Queue { wait, .. } if wait.arrival == Some(2.0)));

        rig.ctx.release(b.id, Occupancy::QueueSlot { node: COUNTER, index: 1 });
        rig.step(&mut c, 3.0);
        assert_eq!(c.occupancy, Some(Occupancy::QueueSlot { node: COUNTER, index: 1 }));
        assert!(matches!(c.mandate, Mandate::Queue { wait, .. } if wait.arrival.is_none()));
        assert_eq!(c.path.as_ref().and_then(|p| p.end()), Some(slot(1)));
    }

    #[test]
    fn stuck_agent_gives_up_on_the_queue() {
        let mut rig = Rig::new();
        let mut a = queueing(0, Vec2::new(100.0, 300.0));
        rig.step(&mut a, 0.0);
        a.contact_since = Some(1.0);
        rig.step(&mut a, 6.0);
        assert_eq!(a.mandate.kind(), MandateKind::Queue);

        rig.step(&mut a, 7.5);
        match &a.mandate {
            Mandate::Wander { retry: Some(retry), since, .. } => {
                assert!(matches!(**retry, Mandate::Queue { destination: COUNTER, .. }));
                assert_eq!(*since, 7.5);
            }
            other => panic!("expected wander, got {other:?}"),
        }
        assert!(rig.ctx.queues.is_empty());
    }

    #[test]
    fn counter_furniture_does_not_block_its_own_line() {
        let mut rig = Rig::new();
        let till = Rect::new(Vec2::new(180.0, 80.0), Vec2::new(220.0, 120.0));
        rig.world.obstacles.push(Obstacle::new(ObstacleId(4), Polygon::from_rect(till), 5.0).owned_by(COUNTER));

        let mut a = queueing(0, Vec2::new(400.0, 100.0));
        rig.step(&mut a, 1.0);
        assert_eq!(a.mandate.kind(), MandateKind::Queue);
        assert_eq!(rig.ctx.queues.peek(COUNTER).map(|q| q.slots()[0]), Some(slot(0)));
        assert_eq!(a.path.as_ref().and_then(|p| p.end()), Some(slot(0)));
    }

    fn short_line_rig() -> Rig {
        let mut rig = Rig::new();
        rig.machine = MandateMachine::new(BehaviorConfig { max_queue_slots: 2, ..BehaviorConfig::default() });
        rig
    }

    #[test]
    fn full_queue_sends_the_newcomer_wandering() {
        let mut rig = short_line_rig();
        let mut a = queueing(0, Vec2::new(400.0, 100.0));
        let mut b = queueing(1, Vec2::new(400.0, 100.0));
        let mut c = queueing(2, Vec2::new(400.0, 100.0));
        for x in [&mut a, &mut b, &mut c] {
            rig.step(x, 1.0);
        }

        assert_eq!(rig.ctx.queues.peek(COUNTER).map(|q| q.waiting().collect::<Vec<_>>()), Some(vec![a.id, b.id]));
        assert_eq!(c.occupancy, None);
        match &c.mandate {
            Mandate::Wander { retry: Some(retry), since, .. } => {
                assert!(matches!(**retry, Mandate::Queue { destination: COUNTER, .. }));
                assert_eq!(*since, 1.0);
            }
            other => panic!("expected wander, got {other:?}"),
        }
    }

    #[test]
    fn wander_keeps_waiting_while_the_queue_is_full() {
        let mut rig = short_line_rig();
        let mut a = queueing(0, Vec2::new(400.0, 100.0));
        let mut b = queueing(1, Vec2::new(400.0, 100.0));
        rig.step(&mut a, 1.0);
        rig.step(&mut b, 1.0);

        let retry = Mandate::Queue { destination: COUNTER, wait: crate::WaitInfo::new(3.0) };
        let mut c = agent(2, Vec2::new(400.0, 300.0), Mandate::wander(Some(retry), 1.0, 5.0));
        rig.step(&mut c, 7.0);
        assert!(matches!(c.mandate, Mandate::Wander { since, .. } if since == 7.0));

        rig.ctx.release(b.id, Occupancy::QueueSlot { node: COUNTER, index: 1 });
        rig.step(&mut c, 12.5);
        assert!(matches!(c.mandate, Mandate::Queue { destination: COUNTER, .. }));
    }

    #[test]
    fn closed_counter_sends_the_queue_wandering() {
        let mut rig = Rig::new();
        rig.world.closed.push(COUNTER);
        let mut a = queueing(0, Vec2::ZERO);
        rig.step(&mut a, 0.0);
        assert_eq!(a.mandate.kind(), MandateKind::Wander);
    }

    #[test]
    fn served_customer_claims_a_seat() {
        let mut rig = Rig::new();
        let mut a = agent(0, slot(0), Mandate::Served { destination: COUNTER, duration_secs: 4.0, arrival: None });

        rig.step(&mut a, 1.0);
        assert!(a.suspended);
        assert!(matches!(rig.exec.dispatched[0].1[0], MotionCommand::Face { .. }));

        a.suspended = false;
        a.task = None;
        rig.step(&mut a, 3.0);
        assert_eq!(a.mandate.kind(), MandateKind::Served);

        rig.step(&mut a, 5.5);
        assert_eq!(a.mandate, Mandate::WalkTo { destination: SEAT, consume_secs: 20.0 });
        assert_eq!(a.occupancy, Some(Occupancy::Seat(SEAT)));
        assert_eq!(rig.ctx.seat_holder(SEAT), Some(a.id));
    }

    #[test]
    fn no_free_seat_means_leaving() {
        let mut rig = Rig::new();
        rig.ctx.claim_seat(SEAT, AgentId(9));
        let mut a = agent(0, slot(0), Mandate::Served { destination: COUNTER, duration_secs: 4.0, arrival: Some(0.0) });
        rig.step(&mut a, 5.0);
        assert_eq!(a.mandate, Mandate::Leave { exit: EXIT });
    }

    #[test]
    fn reaching_the_seat_sits_down() {
        let mut rig = Rig::new();
        let seat = Vec2::new(500.0, 300.0);
        let mut a = agent(0, Vec2::new(300.0, 300.0), Mandate::WalkTo { destination: SEAT, consume_secs: 20.0 });
        rig.ctx.claim_seat(SEAT, a.id);
        a.occupancy = Some(Occupancy::Seat(SEAT));

        rig.step(&mut a, 0.0);
        assert_eq!(a.mandate.kind(), MandateKind::WalkTo);

        a.move_to(seat - Vec2::new(20.0, 0.0));
        rig.step(&mut a, 1.0);
        assert!(a.suspended);
        assert_eq!(a.task.map(|t| t.action), Some(CompletionAction::Resume));
        assert!(matches!(a.mandate, Mandate::ConsumeSitting { seat: SEAT, since: None, .. }));
        assert_eq!(a.occupancy, Some(Occupancy::Seat(SEAT)));
    }

    #[test]
    fn blocked_walk_keeps_the_seat_while_wandering() {
        let mut rig = Rig::new();
        rig.world.waypoints.clear();
        rig.world.obstacles.push(wall());
        let mut a = agent(0, Vec2::new(100.0, 300.0), Mandate::WalkTo { destination: SEAT, consume_secs: 20.0 });
        rig.ctx.claim_seat(SEAT, a.id);
        a.occupancy = Some(Occupancy::Seat(SEAT));

        rig.step(&mut a, 2.0);
        match &a.mandate {
            Mandate::Wander { retry: Some(retry), .. } => assert_eq!(retry.kind(), MandateKind::WalkTo),
            other => panic!("expected wander, got {other:?}"),
        }
        assert_eq!(rig.ctx.seat_holder(SEAT), Some(a.id));
    }

    #[test]
    fn finished_meal_releases_the_seat() {
        let mut rig = Rig::new();
        let mut a = agent(0, Vec2::new(500.0, 300.0), Mandate::ConsumeSitting { seat: SEAT, duration_secs: 20.0, since: None });
        rig.ctx.claim_seat(SEAT, a.id);
        a.occupancy = Some(Occupancy::Seat(SEAT));

        rig.step(&mut a, 10.0);
        assert!(matches!(a.mandate, Mandate::ConsumeSitting { since: Some(10.0), .. }));
        rig.step(&mut a, 25.0);
        assert_eq!(a.mandate.kind(), MandateKind::ConsumeSitting);
        rig.step(&mut a, 30.5);
        assert_eq!(a.mandate, Mandate::Leave { exit: EXIT });
        assert_eq!(rig.ctx.seat_holder(SEAT), None);
    }

    #[test]
    fn reaching_the_exit_fades_out() {
        let mut rig = Rig::new();
        let mut a = agent(0, Vec2::new(60.0, 490.0), Mandate::Leave { exit: EXIT });
        rig.step(&mut a, 0.0);
        assert!(a.suspended);
        assert_eq!(a.task.map(|t| t.action), Some(CompletionAction::Despawn));
        assert!(matches!(rig.exec.dispatched[0].1[..], [MotionCommand::Fade { .. }]));
    }

    #[test]
    fn wander_retries_the_queue() {
        let mut rig = Rig::new();
        let retry = Mandate::Queue { destination: COUNTER, wait: crate::WaitInfo::new(3.0) };
        let mut a = agent(0, Vec2::new(400.0, 300.0), Mandate::wander(Some(retry), 0.0, 5.0));

        rig.step(&mut a, 4.0);
        assert_eq!(a.mandate.kind(), MandateKind::Wander);
        rig.step(&mut a, 6.0);
        assert!(matches!(a.mandate, Mandate::Queue { destination: COUNTER, .. }));
    }

    #[test]
    fn wander_waits_again_when_every_counter_is_closed() {
        let mut rig = Rig::new();
        rig.world.closed.push(COUNTER);
        let retry = Mandate::Queue { destination: COUNTER, wait: crate::WaitInfo::new(3.0) };
        let mut a = agent(0, Vec2::new(400.0, 300.0), Mandate::wander(Some(retry), 0.0, 5.0));
        rig.step(&mut a, 6.0);
        assert!(matches!(a.mandate, Mandate::Wander { since, .. } if since == 6.0));
    }

    #[test]
    fn wander_without_retry_leaves() {
        let mut rig = Rig::new();
        let mut a = agent(0, Vec2::new(400.0, 300.0), Mandate::wander(None, 0.0, 5.0));
        rig.step(&mut a, 6.0);
        assert_eq!(a.mandate, Mandate::Leave { exit: EXIT });
    }

    #[test]
    fn suspended_agent_is_skipped() {
        let mut rig = Rig::new();
        let mut a = agent(0, Vec2::new(400.0, 300.0), Mandate::wander(None, 0.0, 5.0));
        a.suspended = true;
        assert!(rig.step(&mut a, 6.0).is_empty());
        assert_eq!(a.mandate.kind(), MandateKind::Wander);
    }

    #[test]
    fn repeated_faults_remove_the_agent() {
        let mut rig = Rig::new();
        rig.world.has_graph = false;
        let mut a = agent(0, Vec2::new(400.0, 300.0), Mandate::wander(None, 0.0, 5.0));
        assert!(rig.step(&mut a, 0.0).is_empty());
        assert!(rig.step(&mut a, 0.1).is_empty());
        assert_eq!(a.config_faults, 2);
        assert_eq!(rig.step(&mut a, 0.2), vec![Intent::Remove(a.id)]);
    }

    #[test]
    fn a_good_tick_clears_the_fault_count() {
        let mut rig = Rig::new();
        rig.world.has_graph = false;
        let mut a = agent(0, Vec2::new(400.0, 300.0), Mandate::wander(None, 0.0, 5.0));
        rig.step(&mut a, 0.0);
        rig.world.has_graph = true;
        rig.step(&mut a, 0.1);
        assert_eq!(a.config_faults, 0);
    }

}

// ── Path fallback ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod fallback {
    use cafe_core::{BehaviorConfig, NodeId, Vec2};

    use super::helpers::*;
    use crate::{BehaviorError, plan_with_fallback};

    #[test]
    fn open_floor_plans_straight() {
        let world = TestWorld::cafe();
        let route = plan_with_fallback(&world, Vec2::new(100.0, 300.0), Vec2::new(500.0, 300.0), Some(SEAT), &BehaviorConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(route.path.points(), &[Vec2::new(100.0, 300.0), Vec2::new(500.0, 300.0)]);
    }

    #[test]
    fn both_attempts_failing_is_not_an_error() {
        let mut world = TestWorld::cafe();
        world.waypoints.clear();
        world.obstacles.push(wall());
        let out = plan_with_fallback(&world, Vec2::new(100.0, 300.0), Vec2::new(500.0, 300.0), Some(SEAT), &BehaviorConfig::default());
        assert!(matches!(out, Ok(None)));
    }

    #[test]
    fn detour_found_around_the_wall() {
        let mut world = TestWorld::cafe();
        world.obstacles.push(wall());
        world.waypoints = vec![Vec2::new(100.0, 760.0), Vec2::new(500.0, 760.0)];
        let route = plan_with_fallback(&world, Vec2::new(100.0, 300.0), Vec2::new(500.0, 300.0), None, &BehaviorConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(route.path.len(), 4);
        assert_eq!(route.obstacles.len(), 1);
    }

    #[test]
    fn unknown_destination_is_a_fault() {
        let world = TestWorld::cafe();
        let out = plan_with_fallback(&world, Vec2::ZERO, Vec2::new(10.0, 0.0), Some(NodeId(42)), &BehaviorConfig::default());
        assert_eq!(out.map(|_| ()), Err(BehaviorError::MissingObstacles(NodeId(42))));
    }

    #[test]
    fn missing_graph_is_a_fault() {
        let mut world = TestWorld::cafe();
        world.has_graph = false;
        let out = plan_with_fallback(&world, Vec2::ZERO, Vec2::new(10.0, 0.0), None, &BehaviorConfig::default());
        assert_eq!(out.map(|_| ()), Err(BehaviorError::MissingNavigationGraph));
    }
}

// ── Agents ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod agents {
    use cafe_core::{AgentId, TaskId, Vec2};

    use super::helpers::*;
    use crate::{AgentStore, CompletionAction, Mandate, TaskCompletion};

    #[test]
    fn stale_completion_is_ignored() {
        let mut a = queueing(0, slot(1));
        if let Mandate::Queue { wait, .. } = &mut a.mandate {
            wait.arrival = Some(2.0);
        }
        a.begin_task(TaskId(4), CompletionAction::ResetArrival);

        let stale = TaskCompletion { task: TaskId(3), agent: a.id, position: slot(0) };
        assert!(!a.complete_task(&stale));
        assert!(a.suspended);

        let done = TaskCompletion { task: TaskId(4), agent: a.id, position: slot(0) };
        assert!(!a.complete_task(&done));
        assert!(!a.suspended);
        assert_eq!(a.position, slot(0));
        assert!(matches!(a.mandate, Mandate::Queue { wait, .. } if wait.arrival.is_none()));
    }

    #[test]
    fn despawn_completion_asks_for_removal() {
        let mut a = agent(0, Vec2::ZERO, Mandate::Leave { exit: EXIT });
        a.begin_task(TaskId(0), CompletionAction::Despawn);
        assert!(a.complete_task(&TaskCompletion { task: TaskId(0), agent: a.id, position: Vec2::ZERO }));
    }

    #[test]
    fn store_never_reuses_ids() {
        let mut store = AgentStore::new();
        let a = store.spawn(Vec2::ZERO, Mandate::Leave { exit: EXIT }, 1);
        let b = store.spawn(Vec2::ZERO, Mandate::Leave { exit: EXIT }, 1);
        assert!(store.remove(a).is_some());
        let c = store.spawn(Vec2::ZERO, Mandate::Leave { exit: EXIT }, 1);
        assert_eq!((a, b, c), (AgentId(0), AgentId(1), AgentId(2)));
        assert_eq!(store.ids(), vec![b, c]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.spawned(), 3);
    }
}
