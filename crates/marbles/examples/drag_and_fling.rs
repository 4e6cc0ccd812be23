//! Pointer interaction demo with a scripted cursor
//!
//! Grabs a resting ball, drags it across the play zone, and releases it so
//! the drag velocity carries it into the boundary bounce.
//!
//! Run with: cargo run --package marbles --example drag_and_fling

use marbles::laws::interaction::DirectDrag;
use marbles::laws::{BoundaryBounce, PlayZone};
use marbles::stepper::FrequencyMode;
use marbles::{LawPipeline, PointerState, SimConfig, Simulation};

fn main() {
    println!("Drag and fling demo\n{}", "=".repeat(60));

    let zone = PlayZone::new(0.0, 0.0, 400.0, 400.0);
    let pipeline = LawPipeline::new()
        .with_law(DirectDrag::new())
        .with_law(BoundaryBounce::new(zone, 0.8));
    let mut sim = Simulation::with_pipeline(
        SimConfig::default(),
        pipeline,
        1,
        FrequencyMode::Fixed,
    );

    sim.create_body(200.0, 200.0, 15.0, 10.0, 0.01).unwrap();

    // press on the ball, then sweep the cursor right over a few frames
    let script: Vec<PointerState> = std::iter::once(PointerState::press(200.0, 200.0))
        .chain((1..=5).map(|i| PointerState::drag(200.0 + f64::from(i) * 12.0, 200.0)))
        .chain(std::iter::repeat(PointerState::hover(260.0, 200.0)).take(60))
        .collect();

    for (frame, pointer) in script.into_iter().enumerate() {
        sim.set_pointer(pointer);
        sim.advance_frame();

        let ball = &sim.bodies()[0];
        if frame < 8 || frame % 10 == 0 {
            println!(
                "frame {:2}: pos ({:6.1}, {:6.1}) vel ({:6.2}, {:6.2}) {} {} sub-steps",
                frame,
                ball.position.x,
                ball.position.y,
                ball.velocity.x,
                ball.velocity.y,
                if ball.is_captured() { "[held]" } else { "      " },
                sim.substeps(),
            );
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("released at speed {:.2}, bounced inside the zone", sim.bodies()[0].speed());
}
