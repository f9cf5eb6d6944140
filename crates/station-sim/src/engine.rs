//! Session controller: the top of the simulation.
//!
//! `SessionController` owns the pipe network, the carrying agents, the
//! time/oxygen budget and the failure scheduler. It processes player
//! commands, steps one frame at a time and produces `SessionSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use station_core::commands::PlayerCommand;
use station_core::config::SessionConfig;
use station_core::constants::*;
use station_core::enums::{InteractPhase, SessionState};
use station_core::events::{SessionEvent, LOSS_REASON, WIN_REASON};
use station_core::state::SessionSnapshot;
use station_core::types::{Pose, RayHit, SegmentId, SimTime};

use crate::interaction::{self, Agent, InteractionOutcome, InteractionRules};
use crate::network::Network;
use crate::resources::Resources;
use crate::systems;
use crate::systems::failure_scheduler::FailureScheduler;
use crate::systems::snapshot::SessionView;
use crate::world_setup::LayoutPattern;

/// Configuration for creating a session controller.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and commands = same session.
    pub seed: u64,
    pub session: SessionConfig,
    pub layout: LayoutPattern,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            session: SessionConfig::default(),
            layout: LayoutPattern::default(),
        }
    }
}

/// A trigger event waiting for the interaction step of the next frame.
#[derive(Debug, Clone, Copy)]
struct PendingInteraction {
    agent: usize,
    hit: Option<RayHit>,
    phase: InteractPhase,
}

/// The session state machine. Owns all simulation state.
pub struct SessionController {
    network: Network,
    agents: Vec<Agent>,
    state: SessionState,
    paused: bool,
    resources: Resources,
    scheduler: FailureScheduler,
    config: SessionConfig,
    rng: ChaCha8Rng,
    time: SimTime,
    rig_position: Vec3,
    end_reason: Option<String>,
    command_queue: VecDeque<PlayerCommand>,
    pending_interactions: Vec<PendingInteraction>,
    events: Vec<SessionEvent>,
}

impl SessionController {
    /// Create a controller sitting in the menu.
    pub fn new(config: SimConfig) -> Self {
        Self {
            network: Network::build_layout(&config.layout),
            agents: vec![Agent::new(); config.session.agent_count],
            state: SessionState::Menu,
            paused: false,
            resources: Resources::new(&config.session),
            scheduler: FailureScheduler::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config: config.session,
            time: SimTime::default(),
            rig_position: PLAYER_START,
            end_reason: None,
            command_queue: VecDeque::new(),
            pending_interactions: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next frame.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the session by one frame of `dt` seconds and return the
    /// resulting snapshot. Negative or non-finite `dt` counts as zero.
    pub fn tick(&mut self, dt: f64) -> SessionSnapshot {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.process_commands();

        let pending = std::mem::take(&mut self.pending_interactions);
        if self.is_running() {
            self.run_systems(dt);
            // The session may have ended during the systems above.
            if self.is_running() {
                self.apply_interactions(pending);
            }
        } else if !pending.is_empty() {
            log::debug!("ignoring {} interactions outside play", pending.len());
        }

        self.network.tick(dt as f32);
        self.time.advance(dt);

        self.snapshot()
    }

    /// Build a snapshot of the current state without stepping. Events
    /// collected since the last frame are drained into it.
    pub fn snapshot(&mut self) -> SessionSnapshot {
        let events = std::mem::take(&mut self.events);
        let view = SessionView {
            time: self.time,
            state: self.state,
            paused: self.paused,
            resources: &self.resources,
            rig_position: self.rig_position,
            end_reason: self.end_reason.as_deref(),
        };
        systems::snapshot::build_snapshot(&view, &self.network, &self.agents, events)
    }

    /// Break a specific segment right away, as the scheduler would.
    /// Only works while playing. Used for scripted scenarios.
    pub fn inject_failure(&mut self, id: SegmentId) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        let broke = self.network.break_segment(id, &mut self.rng);
        if broke {
            self.events.push(SessionEvent::SegmentBroken { segment: id });
        }
        broke
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn resources(&self) -> Resources {
        self.resources
    }

    pub fn time_remaining(&self) -> f64 {
        self.resources.time_remaining
    }

    pub fn oxygen(&self) -> f64 {
        self.resources.oxygen
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Read-only access to the pipe network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn agent(&self, index: usize) -> Option<&Agent> {
        self.agents.get(index)
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn rig_position(&self) -> Vec3 {
        self.rig_position
    }

    /// Why the last session ended.
    pub fn end_reason(&self) -> Option<&str> {
        self.end_reason.as_deref()
    }

    fn is_running(&self) -> bool {
        self.state == SessionState::Playing && !self.paused
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Every transition is guarded by the
    /// current state, so repeats within one frame are no-ops.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Start => {
                if self.state == SessionState::Menu {
                    self.begin_session();
                }
            }
            PlayerCommand::Restart => {
                if self.state.is_terminal() {
                    self.begin_session();
                }
            }
            PlayerCommand::ReturnToMenu => {
                if self.state.is_terminal() {
                    self.network.reset_all();
                    self.resources = Resources::new(&self.config);
                    self.end_reason = None;
                    self.state = SessionState::Menu;
                }
            }
            PlayerCommand::Pause => {
                if self.state == SessionState::Playing {
                    self.paused = true;
                }
            }
            PlayerCommand::Resume => {
                self.paused = false;
            }
            PlayerCommand::UpdatePose { agent, pose } => self.update_pose(agent, pose),
            PlayerCommand::Teleport { position } => {
                let position = Vec3::new(
                    position.x.clamp(-FLOOR_HALF_WIDTH, FLOOR_HALF_WIDTH),
                    0.0,
                    position.z.clamp(-FLOOR_HALF_LENGTH, FLOOR_HALF_LENGTH),
                );
                self.rig_position = position;
                self.events.push(SessionEvent::Teleported { position });
            }
            PlayerCommand::Interact { agent, hit, phase } => {
                self.pending_interactions
                    .push(PendingInteraction { agent, hit, phase });
            }
        }
    }

    fn update_pose(&mut self, index: usize, pose: Pose) {
        match self.agents.get_mut(index) {
            Some(agent) => agent.set_pose(pose),
            None => log::warn!("pose update for unknown controller {index}"),
        }
    }

    /// Fresh network, full budget, failure timer armed.
    fn begin_session(&mut self) {
        self.network.reset_all();
        for agent in &mut self.agents {
            let pose = agent.pose();
            *agent = Agent::new();
            agent.set_pose(pose);
        }
        self.resources = Resources::new(&self.config);
        self.scheduler = FailureScheduler::new();
        self.rig_position = PLAYER_START;
        self.end_reason = None;
        self.paused = false;
        self.state = SessionState::Playing;
        self.events.push(SessionEvent::SessionStarted);
        log::info!(
            "session started: {:.0}s, oxygen {:.0}%, {} segments",
            self.resources.time_remaining,
            self.resources.oxygen,
            self.network.len()
        );
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let oxygen_before = self.resources.oxygen;

        // 1. Time and oxygen
        let broken = self.network.broken_count();
        systems::oxygen::run(&mut self.resources, broken, dt, &self.config);
        self.check_oxygen_warning(oxygen_before);

        // 2. Win/loss. Depletion wins a tie.
        if self.resources.oxygen_depleted() {
            self.end_session(SessionState::Loss, LOSS_REASON);
            return;
        }
        if self.resources.time_up() {
            self.end_session(SessionState::Win, WIN_REASON);
            return;
        }

        // 3. Failure injection
        let played = self.resources.played_secs(&self.config);
        if let Some(segment) = systems::failure_scheduler::run(
            &mut self.network,
            &mut self.rng,
            &mut self.scheduler,
            played,
            dt,
            &self.config,
        ) {
            self.events.push(SessionEvent::SegmentBroken { segment });
        }
    }

    /// Apply trigger events received since the last frame, in order.
    fn apply_interactions(&mut self, pending: Vec<PendingInteraction>) {
        let rules = InteractionRules {
            tolerance_rad: self.config.alignment_tolerance_rad(),
            max_distance: self.config.max_interact_distance,
        };

        for PendingInteraction { agent, hit, phase } in pending {
            let Some(carrier) = self.agents.get_mut(agent) else {
                log::warn!("interaction from unknown controller {agent}");
                continue;
            };

            let outcome =
                interaction::interact(carrier, hit, phase, &mut self.network, &mut self.rng, &rules);

            match outcome {
                InteractionOutcome::PickedUp(segment) => {
                    self.events.push(SessionEvent::PartPickedUp { agent, segment });
                }
                InteractionOutcome::Dropped(segment) => {
                    self.events.push(SessionEvent::PartDropped { agent, segment });
                }
                InteractionOutcome::Repaired { segment, part_from } => {
                    let oxygen_before = self.resources.oxygen;
                    self.resources.add_oxygen(self.config.repair_oxygen_bonus);
                    self.check_oxygen_warning(oxygen_before);
                    self.events.push(SessionEvent::SegmentRepaired {
                        agent,
                        segment,
                        part_from,
                    });
                }
                InteractionOutcome::PickupRefused(_) | InteractionOutcome::Ignored => {}
            }
        }
    }

    /// Emit a warning when oxygen falls to the threshold.
    fn check_oxygen_warning(&mut self, oxygen_before: f64) {
        let oxygen = self.resources.oxygen;
        if oxygen_before > OXYGEN_WARNING_THRESHOLD && oxygen <= OXYGEN_WARNING_THRESHOLD {
            self.events.push(SessionEvent::OxygenLow { oxygen });
        }
    }

    /// Drop every held part, heal the network and enter `state`.
    fn end_session(&mut self, state: SessionState, reason: &str) {
        let released = interaction::release_all(&mut self.agents, &mut self.network, &mut self.rng);
        for (agent, segment) in released {
            self.events.push(SessionEvent::PartDropped { agent, segment });
        }
        self.network.reset_all();
        self.state = state;
        self.end_reason = Some(reason.to_string());
        self.events.push(SessionEvent::SessionEnded {
            state,
            reason: reason.to_string(),
        });
        log::info!(
            "session ended ({reason}): {:.1}s left, oxygen {:.1}%",
            self.resources.time_remaining,
            self.resources.oxygen
        );
    }
}
