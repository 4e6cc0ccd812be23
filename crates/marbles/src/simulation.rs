//! The in-process facade the embedding application talks to

use crate::body::{Body, BodyError, BodyId};
use crate::config::SimConfig;
use crate::laws::{Law, LawPipeline};
use crate::pointer::PointerState;
use crate::stepper::{FrequencyMode, StepController};
use crate::world::{BatchId, BodySpec, World};

/// A complete simulation: world, law pipeline, step controller, config
///
/// The driver loop calls [`advance_frame`](Self::advance_frame) once per
/// animation tick, refreshes the pointer snapshot between frames, and hands
/// [`bodies`](Self::bodies) to the renderer. Nothing here blocks or does
/// I/O; the whole structure is exclusively owned by the calling thread.
///
/// # Examples
///
/// ```
/// use marbles::{SimConfig, Simulation};
///
/// let mut sim = Simulation::new(SimConfig::default());
/// sim.create_body(0.0, 0.0, 10.0, 50.0, 0.0).unwrap();
/// sim.create_body(100.0, 0.0, 5.0, 5.0, 0.0).unwrap();
///
/// sim.advance_frame();
///
/// // gravity pulled the pair together
/// assert!(sim.bodies()[0].position.x > 0.0);
/// assert!(sim.bodies()[1].position.x < 100.0);
/// ```
pub struct Simulation {
    config: SimConfig,
    world: World,
    pipeline: LawPipeline,
    stepper: StepController,
    pointer: PointerState,
}

impl Simulation {
    /// Build a simulation with the standard law set and balanced
    /// auto-frequency
    pub fn new(config: SimConfig) -> Self {
        let pipeline = config.standard_pipeline();
        Self::with_pipeline(config, pipeline, 1, FrequencyMode::Balanced)
    }

    /// Build a simulation from an explicit pipeline and stepping policy
    pub fn with_pipeline(
        config: SimConfig,
        pipeline: LawPipeline,
        substeps: u32,
        mode: FrequencyMode,
    ) -> Self {
        let stepper =
            StepController::new(substeps, mode).with_max_substeps(config.max_substeps);
        Self {
            config,
            world: World::new(),
            pipeline,
            stepper,
            pointer: PointerState::default(),
        }
    }

    /// Validate and insert a single body
    pub fn create_body(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        mass: f64,
        friction: f64,
    ) -> Result<BodyId, BodyError> {
        self.world.add_body(BodySpec::new(x, y, radius, mass, friction))
    }

    /// Insert a single body from a full spec, velocity included
    pub fn add_body(&mut self, spec: BodySpec) -> Result<BodyId, BodyError> {
        self.world.add_body(spec)
    }

    /// Insert a group of bodies under one batch tag
    pub fn add_bodies(&mut self, specs: &[BodySpec]) -> Result<BatchId, BodyError> {
        self.world.add_batch(specs)
    }

    /// Append a law to the pipeline; laws run in registration order
    pub fn register_law<L: Law + 'static>(&mut self, law: L) {
        self.pipeline.register(law);
    }

    /// Refresh the pointer snapshot the interaction laws read
    pub fn set_pointer(&mut self, pointer: PointerState) {
        self.pointer = pointer;
    }

    /// Run one full frame: N sub-steps, dead-body sweep, re-adapt N
    pub fn advance_frame(&mut self) {
        self.stepper
            .advance_frame(&mut self.world, &mut self.pipeline, &self.pointer);
    }

    /// Live bodies in draw order
    pub fn bodies(&self) -> &[Body] {
        self.world.bodies()
    }

    /// Sub-step count the next frame will run with
    pub fn substeps(&self) -> u32 {
        self.stepper.substeps()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}
