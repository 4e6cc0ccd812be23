//! Frame orchestration and adaptive sub-stepping
//!
//! One `advance_frame` call runs the full cycle: N sub-steps of
//! reset-accelerations, law pass, integrate; then one dead-body sweep; then
//! the sub-step count for the next frame is recomputed from the state the
//! frame left behind. Because integration divides by N, raising N both
//! refines the trajectory and slows apparent motion per sub-step, which is
//! exactly what keeps fast bodies from tunneling through each other.

use std::time::Instant;

use crate::laws::LawPipeline;
use crate::pointer::PointerState;
use crate::world::World;

/// How the sub-step count is recomputed between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyMode {
    /// Keep whatever count the controller was built with
    Fixed,
    /// Scale with the fastest body's speed: more speed, more sub-steps
    Balanced,
    /// Chase a wall-clock frame budget with a rolling measurement window
    Turbo,
}

const BALANCED_SPEED_FLOOR: f64 = 0.5;
const TURBO_WINDOW: usize = 30;
const TURBO_TARGET_MS: f64 = 18.0;
const TURBO_GROW: u32 = 5;
const TURBO_SHRINK: f64 = 0.8;
const DEFAULT_MAX_SUBSTEPS: u32 = 240;

/// Runs frames and adapts the sub-step count between them
///
/// # Examples
///
/// ```
/// use marbles::laws::LawPipeline;
/// use marbles::pointer::PointerState;
/// use marbles::stepper::{FrequencyMode, StepController};
/// use marbles::world::{BodySpec, World};
///
/// let mut world = World::new();
/// world.add_body(BodySpec::new(0.0, 0.0, 5.0, 1.0, 0.0).with_velocity(3.0, 0.0)).unwrap();
///
/// let mut pipeline = LawPipeline::new();
/// let mut stepper = StepController::new(1, FrequencyMode::Balanced);
/// stepper.advance_frame(&mut world, &mut pipeline, &PointerState::default());
///
/// // one frame of pure constant-velocity motion covers vx regardless of N
/// assert!((world.bodies()[0].position.x - 3.0).abs() < 1e-12);
/// assert_eq!(stepper.substeps(), 6);
/// ```
pub struct StepController {
    substeps: u32,
    max_substeps: u32,
    mode: FrequencyMode,
    frame_cycles_ms: Vec<f64>,
    last_frame: Option<Instant>,
}

impl StepController {
    pub fn new(substeps: u32, mode: FrequencyMode) -> Self {
        Self {
            substeps: substeps.max(1),
            max_substeps: DEFAULT_MAX_SUBSTEPS,
            mode,
            frame_cycles_ms: Vec::with_capacity(TURBO_WINDOW),
            last_frame: None,
        }
    }

    pub fn with_max_substeps(mut self, max_substeps: u32) -> Self {
        self.max_substeps = max_substeps.max(1);
        self.substeps = self.substeps.min(self.max_substeps);
        self
    }

    /// Current sub-step count; always at least 1
    pub fn substeps(&self) -> u32 {
        self.substeps
    }

    pub fn mode(&self) -> FrequencyMode {
        self.mode
    }

    /// Run one full frame against the world
    ///
    /// Per sub-step: zero every acceleration accumulator, run the pipeline
    /// once, then integrate every live body that is not pointer-captured
    /// with the current N. The sweep runs once, strictly after the last
    /// sub-step, so every law in the frame saw a stable roster; only then
    /// is N recomputed, from post-frame state alone.
    pub fn advance_frame(
        &mut self,
        world: &mut World,
        pipeline: &mut LawPipeline,
        pointer: &PointerState,
    ) {
        let n = self.substeps;
        for _ in 0..n {
            world.reset_accelerations();
            pipeline.run_once(world, pointer);
            for body in world.iter_mut() {
                if body.is_dead() || body.is_captured() {
                    continue;
                }
                body.integrate(n);
            }
        }

        world.sweep_dead();
        self.adapt(world);
    }

    fn adapt(&mut self, world: &World) {
        match self.mode {
            FrequencyMode::Fixed => {}
            FrequencyMode::Balanced => self.adapt_to_speed(world.max_speed()),
            FrequencyMode::Turbo => {
                let now = Instant::now();
                if let Some(previous) = self.last_frame {
                    let cycle_ms = now.duration_since(previous).as_secs_f64() * 1e3;
                    self.adapt_to_frame_cycle(cycle_ms);
                }
                self.last_frame = Some(now);
            }
        }
    }

    /// Balanced policy: N follows the fastest body
    ///
    /// `N = floor(2 * max_speed)` with the speed floored at 0.5, clamped to
    /// [1, max]. Monotonically non-decreasing in max speed, so a body that
    /// doubles its velocity never gets a coarser integration.
    pub fn adapt_to_speed(&mut self, max_speed: f64) {
        let speed = max_speed.max(BALANCED_SPEED_FLOOR);
        self.substeps = ((speed * 2.0).floor() as u32).clamp(1, self.max_substeps);
    }

    /// Turbo policy: chase the frame budget
    ///
    /// Buffers frame cycle times; every 30 samples, an average under the
    /// 18 ms budget grows N by 5 and an average over it shrinks N to 80%.
    /// Public so a driver that measures its own cycle (or a test) can feed
    /// samples directly.
    pub fn adapt_to_frame_cycle(&mut self, cycle_ms: f64) {
        self.frame_cycles_ms.push(cycle_ms);
        if self.frame_cycles_ms.len() < TURBO_WINDOW {
            return;
        }

        let average =
            self.frame_cycles_ms.iter().sum::<f64>() / self.frame_cycles_ms.len() as f64;
        self.frame_cycles_ms.clear();

        if average < TURBO_TARGET_MS {
            self.substeps = (self.substeps + TURBO_GROW).min(self.max_substeps);
        } else if average > TURBO_TARGET_MS {
            self.substeps = ((f64::from(self.substeps) * TURBO_SHRINK) as u32)
                .clamp(1, self.max_substeps);
        }
    }
}
