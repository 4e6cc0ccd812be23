//! WASM bindings for the marbles simulation core.
//!
//! This crate is the seam between the core and a browser embedding: the
//! rendering loop calls `simulation_advance_frame` once per animation tick,
//! the input listeners push pointer snapshots in, and the renderer pulls a
//! serializable body list out.
//!
//! # Architecture
//!
//! Simulation state lives in thread-local storage (WASM is single-threaded).
//! Functions take an opaque simulation id and exchange serde-serializable
//! snapshots with JavaScript.
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! const simId = simulation_create({ gravity: 0.05, contact: "merge", interaction: "drag" });
//!
//! simulation_add_body(simId, { x: 100, y: 100, radius: 10, mass: 50 });
//!
//! canvas.addEventListener("pointermove", (e) =>
//!   simulation_set_pointer(simId, { x: e.offsetX, y: e.offsetY, pressed, justPressed }));
//!
//! function tick() {
//!   simulation_advance_frame(simId);
//!   draw(simulation_get_bodies(simId));
//!   requestAnimationFrame(tick);
//! }
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use marbles::collisions::{ContactLaw, ContactResponse};
use marbles::laws::interaction::{DirectDrag, EasedPull, Slingshot};
use marbles::laws::{PlayZone, PointerGravity};
use marbles::stepper::FrequencyMode;
use marbles::world::BodySpec;
use marbles::{PointerState, SimConfig, Simulation};

// =============================================================================
// Serialization helpers
// =============================================================================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

// =============================================================================
// Thread-local storage for simulation state
// =============================================================================

thread_local! {
    static SIMULATIONS: RefCell<HashMap<u32, Simulation>> = RefCell::new(HashMap::new());
    static NEXT_SIM_ID: RefCell<u32> = const { RefCell::new(0) };
}

fn with_simulation<T>(
    sim_id: u32,
    f: impl FnOnce(&mut Simulation) -> Result<T, JsError>,
) -> Result<T, JsError> {
    SIMULATIONS.with(|sims| {
        let mut sims = sims.borrow_mut();
        let sim = sims
            .get_mut(&sim_id)
            .ok_or_else(|| JsError::new(&format!("Simulation {} not found", sim_id)))?;
        f(sim)
    })
}

// =============================================================================
// Serializable types for JavaScript interop
// =============================================================================

/// Engine options accepted by `simulation_create`
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineInput {
    /// Gravitational constant
    pub gravity: f64,
    /// Global linear drag coefficient
    pub drag: f64,
    /// Boundary bounce energy retention
    pub restitution: f64,
    /// Play zone as [left, top, right, bottom]; absent means unbounded
    pub play_zone: Option<[f64; 4]>,
    /// Collision response: "merge", "elastic" or "none"
    pub contact: String,
    /// Pointer interaction: "drag", "ease", "slingshot", "attract" or "none"
    pub interaction: String,
    /// Easing coefficient for the "ease" interaction
    pub easing: f64,
    /// Elasticity for the "slingshot" interaction
    pub elasticity: f64,
    /// Band length limit for the "slingshot" interaction
    pub edge: f64,
    /// Invisible mass at the cursor for the "attract" interaction
    pub pointer_mass: f64,
    /// Starting sub-step count
    pub substeps: u32,
    /// Sub-step policy: "balanced", "turbo" or "fixed"
    pub mode: String,
}

impl Default for EngineInput {
    fn default() -> Self {
        Self {
            gravity: 0.1,
            drag: 0.0,
            restitution: 0.8,
            play_zone: None,
            contact: "merge".to_string(),
            interaction: "drag".to_string(),
            easing: 0.5,
            elasticity: 2.0,
            edge: 300.0,
            pointer_mass: 30.0,
            substeps: 1,
            mode: "balanced".to_string(),
        }
    }
}

/// Body parameters for adding new bodies
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BodyInput {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub mass: f64,
    pub friction: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Default for BodyInput {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            radius: 1.0,
            mass: 1.0,
            friction: 0.0,
            vx: 0.0,
            vy: 0.0,
        }
    }
}

impl From<BodyInput> for BodySpec {
    fn from(input: BodyInput) -> Self {
        BodySpec::new(input.x, input.y, input.radius, input.mass, input.friction)
            .with_velocity(input.vx, input.vy)
    }
}

/// Pointer snapshot pushed in by the input listeners
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PointerInput {
    pub x: f64,
    pub y: f64,
    pub pressed: bool,
    pub just_pressed: bool,
}

impl Default for PointerInput {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            pressed: false,
            just_pressed: false,
        }
    }
}

/// Body state snapshot handed to the renderer
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodySnapshot {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub mass: f64,
    pub captured: bool,
}

/// Frame-level diagnostics
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSnapshot {
    pub body_count: usize,
    pub substeps: u32,
    pub max_speed: f64,
    pub total_kinetic_energy: f64,
}

// =============================================================================
// Simulation management
// =============================================================================

/// Create a new simulation from engine options.
///
/// Returns a simulation id for use with the other functions. Unknown option
/// strings fall back to "none".
#[wasm_bindgen]
pub fn simulation_create(options: JsValue) -> Result<u32, JsError> {
    let input: EngineInput = if options.is_undefined() || options.is_null() {
        EngineInput::default()
    } else {
        from_js(options)?
    };

    let config = SimConfig {
        g: input.gravity,
        drag: input.drag,
        restitution: input.restitution,
        play_zone: input
            .play_zone
            .map(|[left, top, right, bottom]| PlayZone::new(left, top, right, bottom)),
        ..SimConfig::default()
    };

    let mut pipeline = config.standard_pipeline();
    match input.interaction.as_str() {
        "drag" => pipeline.register(DirectDrag::new()),
        "ease" => pipeline.register(EasedPull::new(input.easing)),
        "slingshot" => pipeline.register(Slingshot::new(input.elasticity, input.edge)),
        "attract" => pipeline.register(PointerGravity::new(input.gravity, input.pointer_mass)),
        _ => {}
    }
    match input.contact.as_str() {
        "merge" => pipeline.register(ContactLaw::new(ContactResponse::Merge)),
        "elastic" => pipeline.register(ContactLaw::new(ContactResponse::Elastic)),
        _ => {}
    }

    let mode = match input.mode.as_str() {
        "turbo" => FrequencyMode::Turbo,
        "fixed" => FrequencyMode::Fixed,
        _ => FrequencyMode::Balanced,
    };

    let simulation = Simulation::with_pipeline(config, pipeline, input.substeps, mode);

    let id = NEXT_SIM_ID.with(|next_id| {
        let mut id = next_id.borrow_mut();
        let current = *id;
        *id += 1;
        current
    });

    SIMULATIONS.with(|sims| {
        sims.borrow_mut().insert(id, simulation);
    });

    Ok(id)
}

/// Delete a simulation to free memory.
#[wasm_bindgen]
pub fn simulation_delete(sim_id: u32) {
    SIMULATIONS.with(|sims| {
        sims.borrow_mut().remove(&sim_id);
    });
}

// =============================================================================
// Body management
// =============================================================================

/// Add a single body.
///
/// Rejects non-positive mass and negative radius.
///
/// # Returns
/// The new body's id
#[wasm_bindgen]
pub fn simulation_add_body(sim_id: u32, body: JsValue) -> Result<u32, JsError> {
    let input: BodyInput = from_js(body)?;
    with_simulation(sim_id, |sim| {
        let id = sim
            .add_body(input.into())
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(id.0)
    })
}

/// Add a group of bodies under one batch tag.
///
/// # Returns
/// The batch id
#[wasm_bindgen]
pub fn simulation_add_bodies(sim_id: u32, bodies: JsValue) -> Result<u32, JsError> {
    let inputs: Vec<BodyInput> = from_js(bodies)?;
    let specs: Vec<BodySpec> = inputs.into_iter().map(BodySpec::from).collect();
    with_simulation(sim_id, |sim| {
        let batch = sim
            .add_bodies(&specs)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(batch.0)
    })
}

// =============================================================================
// Pointer input and frame stepping
// =============================================================================

/// Push the latest pointer snapshot.
///
/// The interaction laws read this on every sub-step of the next frame.
#[wasm_bindgen]
pub fn simulation_set_pointer(sim_id: u32, pointer: JsValue) -> Result<(), JsError> {
    let input: PointerInput = from_js(pointer)?;
    let state = match (input.pressed, input.just_pressed) {
        (true, true) => PointerState::press(input.x, input.y),
        (true, false) => PointerState::drag(input.x, input.y),
        (false, _) => PointerState::hover(input.x, input.y),
    };
    with_simulation(sim_id, |sim| {
        sim.set_pointer(state);
        Ok(())
    })
}

/// Run one full frame: all sub-steps, the dead-body sweep, and the
/// sub-step retune.
///
/// # Returns
/// The sub-step count the next frame will run with
#[wasm_bindgen]
pub fn simulation_advance_frame(sim_id: u32) -> Result<u32, JsError> {
    with_simulation(sim_id, |sim| {
        sim.advance_frame();
        Ok(sim.substeps())
    })
}

// =============================================================================
// State queries
// =============================================================================

/// Get all bodies for rendering, in draw order.
#[wasm_bindgen]
pub fn simulation_get_bodies(sim_id: u32) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |sim| {
        let bodies: Vec<BodySnapshot> = sim
            .bodies()
            .iter()
            .map(|b| BodySnapshot {
                id: b.id.0,
                x: b.position.x,
                y: b.position.y,
                vx: b.velocity.x,
                vy: b.velocity.y,
                radius: b.radius,
                mass: b.mass,
                captured: b.is_captured(),
            })
            .collect();
        to_js(&bodies)
    })
}

/// Get frame-level diagnostics.
#[wasm_bindgen]
pub fn simulation_get_frame(sim_id: u32) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |sim| {
        let snapshot = FrameSnapshot {
            body_count: sim.bodies().len(),
            substeps: sim.substeps(),
            max_speed: sim.world().max_speed(),
            total_kinetic_energy: sim.world().total_kinetic_energy(),
        };
        to_js(&snapshot)
    })
}

/// Get the current body count.
#[wasm_bindgen]
pub fn simulation_body_count(sim_id: u32) -> Result<usize, JsError> {
    with_simulation(sim_id, |sim| Ok(sim.bodies().len()))
}
