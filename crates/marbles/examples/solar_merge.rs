//! Gravity and merge demo: a hundred grains around two heavy suns
//!
//! Bodies attract pairwise, overlapping bodies fuse (conserving area, mass,
//! and momentum), and the sub-step count follows the fastest body.
//!
//! Run with: cargo run --package marbles --example solar_merge

use marbles::collisions::{ContactLaw, ContactResponse};
use marbles::stepper::FrequencyMode;
use marbles::world::BodySpec;
use marbles::{SimConfig, Simulation};

fn main() {
    println!("Solar merge demo\n{}", "=".repeat(60));

    let config = SimConfig {
        g: 0.05,
        ..SimConfig::default()
    };
    let pipeline = config.standard_pipeline().with_law(ContactLaw::new(ContactResponse::Merge));
    let mut sim = Simulation::with_pipeline(config, pipeline, 2, FrequencyMode::Balanced);

    // two heavy suns drifting apart vertically
    sim.add_bodies(&[
        BodySpec::new(200.0, 350.0, 20.0, 1000.0, 0.0).with_velocity(0.0, -2.0),
        BodySpec::new(600.0, 350.0, 20.0, 1000.0, 0.0).with_velocity(0.0, 2.0),
    ])
    .unwrap();

    // a loose cloud of grains on a spiral
    let grains: Vec<BodySpec> = (0..100)
        .map(|i| {
            let angle = f64::from(i) * 0.37;
            let orbit = 80.0 + f64::from(i) * 2.5;
            let radius = 1.0 + f64::from(i % 7) * 0.8;
            BodySpec::new(
                400.0 + orbit * angle.cos(),
                350.0 + orbit * angle.sin(),
                radius,
                radius * radius,
                0.0,
            )
            .with_velocity(-angle.sin() * 2.0, angle.cos() * 2.0)
        })
        .collect();
    sim.add_bodies(&grains).unwrap();

    let initial_count = sim.bodies().len();
    let initial_mass: f64 = sim.bodies().iter().map(|b| b.mass).sum();
    println!("bodies: {initial_count}, total mass: {initial_mass:.1}\n");

    for frame in 0..500 {
        sim.advance_frame();
        if frame % 100 == 99 {
            println!(
                "frame {:3}: {:3} bodies, {:3} sub-steps, max speed {:.2}",
                frame + 1,
                sim.bodies().len(),
                sim.substeps(),
                sim.world().max_speed(),
            );
        }
    }

    let final_mass: f64 = sim.bodies().iter().map(|b| b.mass).sum();
    println!("\n{}", "=".repeat(60));
    println!(
        "{} bodies merged away; total mass {:.1} (conserved)",
        initial_count - sim.bodies().len(),
        final_mass,
    );
}
