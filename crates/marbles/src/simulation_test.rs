use crate::body::BodyError;
use crate::collisions::{ContactLaw, ContactResponse};
use crate::config::SimConfig;
use crate::laws::interaction::DirectDrag;
use crate::laws::LawPipeline;
use crate::pointer::PointerState;
use crate::simulation::Simulation;
use crate::stepper::FrequencyMode;
use crate::world::BodySpec;

fn quiet_sim() -> Simulation {
    // no laws at all, fixed single sub-step
    Simulation::with_pipeline(
        SimConfig::default(),
        LawPipeline::new(),
        1,
        FrequencyMode::Fixed,
    )
}

#[test]
fn test_create_body_rejects_invalid_parameters() {
    let mut sim = quiet_sim();
    let result = sim.create_body(0.0, 0.0, 5.0, 0.0, 0.0);
    assert!(matches!(result, Err(BodyError::NonPositiveMass(_))));
    assert!(sim.bodies().is_empty());
}

#[test]
fn test_add_bodies_tags_a_batch() {
    let mut sim = quiet_sim();
    let batch = sim
        .add_bodies(&[
            BodySpec::new(0.0, 0.0, 1.0, 1.0, 0.0),
            BodySpec::new(10.0, 0.0, 1.0, 1.0, 0.0),
        ])
        .unwrap();

    assert_eq!(sim.bodies().len(), 2);
    assert_eq!(sim.world().batch_members(batch).len(), 2);
}

#[test]
fn test_frames_integrate_plain_motion() {
    let mut sim = quiet_sim();
    sim.add_bodies(&[BodySpec::new(0.0, 0.0, 1.0, 1.0, 0.0).with_velocity(3.0, 0.0)])
        .unwrap();

    sim.advance_frame();
    sim.advance_frame();

    assert!((sim.bodies()[0].position.x - 6.0).abs() < 1e-9);
}

#[test]
fn test_balanced_mode_raises_substeps_with_speed() {
    let mut sim = Simulation::with_pipeline(
        SimConfig::default(),
        LawPipeline::new(),
        1,
        FrequencyMode::Balanced,
    );
    sim.add_bodies(&[BodySpec::new(0.0, 0.0, 1.0, 1.0, 0.0).with_velocity(10.0, 0.0)])
        .unwrap();

    assert_eq!(sim.substeps(), 1);
    sim.advance_frame();
    assert_eq!(sim.substeps(), 20);
}

#[test]
fn test_registered_merge_law_runs_and_sweeps() {
    let mut sim = quiet_sim();
    let a = sim.create_body(0.0, 0.0, 6.0, 10.0, 0.0).unwrap();
    let b = sim.create_body(10.0, 0.0, 6.0, 10.0, 0.0).unwrap();
    sim.register_law(ContactLaw::new(ContactResponse::Merge));

    sim.advance_frame();

    assert_eq!(sim.bodies().len(), 1);
    assert!(sim.world().get(a).is_some());
    assert!(sim.world().get(b).is_none());
}

#[test]
fn test_drag_and_throw_through_the_facade() {
    let mut sim = Simulation::with_pipeline(
        SimConfig::default(),
        LawPipeline::new().with_law(DirectDrag::new()),
        1,
        FrequencyMode::Balanced,
    );
    sim.create_body(0.0, 0.0, 10.0, 1.0, 0.0).unwrap();

    // grab the body
    sim.set_pointer(PointerState::press(0.0, 0.0));
    sim.advance_frame();
    assert!(sim.bodies()[0].is_captured());

    // yank it; captured bodies skip integration, the drag law moves them
    sim.set_pointer(PointerState::drag(20.0, 0.0));
    sim.advance_frame();
    assert_eq!(sim.bodies()[0].position.x, 20.0);
    assert_eq!(sim.bodies()[0].velocity.x, 20.0);

    // the throw raised the max speed, so the next frame runs finer
    assert_eq!(sim.substeps(), 40);

    // release: one frame of free flight covers the full velocity
    sim.set_pointer(PointerState::hover(20.0, 0.0));
    sim.advance_frame();
    assert!(!sim.bodies()[0].is_captured());
    assert!((sim.bodies()[0].position.x - 40.0).abs() < 1e-9);
}

#[test]
fn test_default_simulation_carries_the_standard_laws() {
    let mut sim = Simulation::new(SimConfig::default());
    sim.create_body(0.0, 0.0, 5.0, 100.0, 0.0).unwrap();
    sim.create_body(50.0, 0.0, 5.0, 100.0, 0.0).unwrap();

    sim.advance_frame();

    // gravity is registered out of the box
    assert!(sim.bodies()[0].velocity.x > 0.0);
    assert!(sim.bodies()[1].velocity.x < 0.0);
}
