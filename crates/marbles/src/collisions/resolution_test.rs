use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::body::{Body, BodyId};
use crate::collisions::resolution::{elastic_collision, inelastic_merge, separate, size_merge};
use crate::collisions::{ContactLaw, ContactResponse};
use crate::laws::Law;
use crate::pointer::PointerState;
use crate::world::{BodySpec, World};

fn ball(id: u32, x: f64, y: f64, radius: f64, mass: f64) -> Body {
    Body::new(
        BodyId(id),
        Point2::new(x, y),
        Vector2::zeros(),
        radius,
        mass,
        0.0,
    )
    .unwrap()
}

// =============================================================================
// size_merge
// =============================================================================

#[test]
fn test_size_merge_conserves_area() {
    let mut a = ball(0, 0.0, 0.0, 3.0, 1.0);
    let b = ball(1, 5.0, 0.0, 4.0, 1.0);

    size_merge(&mut a, &b);

    assert_relative_eq!(a.radius * a.radius, 9.0 + 16.0, epsilon = 1e-12);
}

#[test]
fn test_size_merge_pulls_toward_the_contact_point() {
    let mut a = ball(0, 0.0, 0.0, 3.0, 1.0);
    let b = ball(1, 5.0, 0.0, 4.0, 1.0);

    size_merge(&mut a, &b);

    // shift = (b - a) * rB / (rA' + rB) with the fused radius rA' = 5
    assert_relative_eq!(a.position.x, 5.0 * 4.0 / 9.0, epsilon = 1e-12);
    assert_eq!(a.position.y, 0.0);
    // pulled toward b, but never past it
    assert!(a.position.x > 0.0 && a.position.x < b.position.x);
}

#[test]
fn test_size_merge_with_a_point_body_changes_nothing() {
    let mut a = ball(0, 0.0, 0.0, 3.0, 1.0);
    let b = ball(1, 2.0, 0.0, 0.0, 1.0);

    size_merge(&mut a, &b);

    assert_relative_eq!(a.radius, 3.0, epsilon = 1e-12);
    assert_eq!(a.position.x, 0.0);
}

// =============================================================================
// inelastic_merge
// =============================================================================

#[test]
fn test_inelastic_merge_conserves_momentum_and_mass() {
    let mut a = ball(0, 0.0, 0.0, 3.0, 2.0);
    a.velocity = Vector2::new(4.0, 1.0);
    let mut b = ball(1, 1.0, 0.0, 3.0, 6.0);
    b.velocity = Vector2::new(-2.0, 3.0);

    let p_before = a.momentum() + b.momentum();
    inelastic_merge(&mut a, &mut b);

    assert_eq!(a.mass, 8.0);
    assert_relative_eq!(a.momentum().x, p_before.x, epsilon = 1e-12);
    assert_relative_eq!(a.momentum().y, p_before.y, epsilon = 1e-12);
    assert!(b.is_dead());
}

#[test]
fn test_inelastic_merge_dissipates_kinetic_energy() {
    let mut a = ball(0, 0.0, 0.0, 3.0, 10.0);
    a.velocity = Vector2::new(1.0, 0.0);
    let mut b = ball(1, 1.0, 0.0, 3.0, 10.0);
    b.velocity = Vector2::new(-1.0, 0.0);

    let ke_before = a.kinetic_energy() + b.kinetic_energy();
    inelastic_merge(&mut a, &mut b);

    // equal masses head-on cancel completely
    assert_eq!(a.velocity, Vector2::zeros());
    assert!(a.kinetic_energy() < ke_before);
}

// =============================================================================
// elastic_collision
// =============================================================================

#[test]
fn test_head_on_equal_masses_swap_velocities_exactly() {
    let mut a = ball(0, 0.0, 0.0, 6.0, 10.0);
    a.velocity = Vector2::new(1.0, 0.0);
    let mut b = ball(1, 10.0, 0.0, 6.0, 10.0);
    b.velocity = Vector2::new(-1.0, 0.0);

    let clamped = elastic_collision(&mut a, &mut b);

    assert!(!clamped);
    assert_eq!(a.velocity.x, -1.0);
    assert_eq!(b.velocity.x, 1.0);
    assert_eq!(a.velocity.y, 0.0);
    assert_eq!(b.velocity.y, 0.0);
}

#[test]
fn test_vertical_pair_swaps_along_y() {
    let mut a = ball(0, 0.0, 0.0, 6.0, 10.0);
    a.velocity = Vector2::new(0.0, 2.0);
    let mut b = ball(1, 0.0, 10.0, 6.0, 10.0);
    b.velocity = Vector2::new(0.0, -2.0);

    elastic_collision(&mut a, &mut b);

    assert_relative_eq!(a.velocity.y, -2.0, epsilon = 1e-12);
    assert_relative_eq!(b.velocity.y, 2.0, epsilon = 1e-12);
    assert!(a.velocity.x.abs() < 1e-12);
    assert!(b.velocity.x.abs() < 1e-12);
}

#[test]
fn test_coincident_centers_are_left_untouched() {
    let mut a = ball(0, 1.0, 1.0, 6.0, 10.0);
    a.velocity = Vector2::new(3.0, 0.0);
    let mut b = ball(1, 1.0, 1.0, 6.0, 10.0);
    b.velocity = Vector2::new(-3.0, 0.0);

    let clamped = elastic_collision(&mut a, &mut b);

    assert!(!clamped);
    assert_eq!(a.velocity.x, 3.0);
    assert_eq!(b.velocity.x, -3.0);
}

#[test]
fn test_elastic_collision_conserves_momentum_and_energy() {
    // 100 seeded mass/velocity/angle configurations
    let mut rng = ChaChaRng::seed_from_u64(42);

    for _ in 0..100 {
        let mass_a = rng.gen_range(0.1..50.0);
        let mass_b = rng.gen_range(0.1..50.0);
        let distance = rng.gen_range(0.5..30.0);
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);

        let mut a = ball(0, 0.0, 0.0, 1.0, mass_a);
        a.velocity = Vector2::new(rng.gen_range(-20.0..20.0), rng.gen_range(-20.0..20.0));
        let mut b = ball(
            1,
            distance * angle.cos(),
            distance * angle.sin(),
            1.0,
            mass_b,
        );
        b.velocity = Vector2::new(rng.gen_range(-20.0..20.0), rng.gen_range(-20.0..20.0));

        let p_before = a.momentum() + b.momentum();
        let ke_before = a.kinetic_energy() + b.kinetic_energy();

        let clamped = elastic_collision(&mut a, &mut b);
        assert!(!clamped, "finite inputs must not trip the non-finite clamp");

        let p_after = a.momentum() + b.momentum();
        let ke_after = a.kinetic_energy() + b.kinetic_energy();

        assert_relative_eq!(p_after.x, p_before.x, epsilon = 1e-7, max_relative = 1e-8);
        assert_relative_eq!(p_after.y, p_before.y, epsilon = 1e-7, max_relative = 1e-8);
        assert_relative_eq!(ke_after, ke_before, epsilon = 1e-7, max_relative = 1e-8);
    }
}

#[test]
fn test_elastic_collision_keeps_both_bodies_alive() {
    let mut a = ball(0, 0.0, 0.0, 6.0, 10.0);
    a.velocity = Vector2::new(1.0, 0.0);
    let mut b = ball(1, 10.0, 0.0, 6.0, 10.0);

    elastic_collision(&mut a, &mut b);

    assert!(!a.is_dead());
    assert!(!b.is_dead());
}

// =============================================================================
// separate
// =============================================================================

#[test]
fn test_separate_pushes_back_past_tangency() {
    let mut a = ball(0, 0.0, 0.0, 3.0, 1.0);
    let mut b = ball(1, 4.0, 0.0, 3.0, 1.0);

    separate(&mut a, &mut b);

    // each moved half the overlap, with the slight overshoot
    assert_relative_eq!(a.position.x, -1.05, epsilon = 1e-12);
    assert_relative_eq!(b.position.x, 5.05, epsilon = 1e-12);
    assert!(a.distance_to(&b) >= a.radius + b.radius);
}

#[test]
fn test_separate_leaves_non_overlapping_pairs_alone() {
    let mut a = ball(0, 0.0, 0.0, 3.0, 1.0);
    let mut b = ball(1, 10.0, 0.0, 3.0, 1.0);

    separate(&mut a, &mut b);

    assert_eq!(a.position.x, 0.0);
    assert_eq!(b.position.x, 10.0);
}

// =============================================================================
// ContactLaw composition
// =============================================================================

#[test]
fn test_merge_response_conserves_mass_and_momentum() {
    let mut world = World::new();
    let a = world
        .add_body(BodySpec::new(0.0, 0.0, 6.0, 10.0, 0.0).with_velocity(1.0, 0.0))
        .unwrap();
    let b = world
        .add_body(BodySpec::new(10.0, 0.0, 6.0, 30.0, 0.0).with_velocity(-1.0, 0.0))
        .unwrap();

    let p_before = world.total_momentum();
    let mass_before = world.total_mass();

    let mut law = ContactLaw::new(ContactResponse::Merge);
    law.apply(&mut world, &PointerState::default());
    world.sweep_dead();

    assert_eq!(world.len(), 1);
    assert!(world.get(b).is_none());

    let merged = world.get(a).unwrap();
    assert_eq!(merged.mass, mass_before);
    assert_relative_eq!(world.total_momentum().x, p_before.x, epsilon = 1e-12);
    assert_relative_eq!(merged.radius * merged.radius, 72.0, epsilon = 1e-12);
}

#[test]
fn test_merge_cascade_skips_consumed_bodies() {
    // three mutually overlapping bodies in a row
    let mut world = World::new();
    for x in [0.0, 5.0, 10.0] {
        world.add_body(BodySpec::new(x, 0.0, 6.0, 10.0, 0.0)).unwrap();
    }
    let mass_before = world.total_mass();

    let mut law = ContactLaw::new(ContactResponse::Merge);
    law.apply(&mut world, &PointerState::default());
    world.sweep_dead();

    assert_eq!(world.len(), 1);
    assert_relative_eq!(world.total_mass(), mass_before, epsilon = 1e-12);
}

#[test]
fn test_elastic_response_keeps_the_roster_intact() {
    let mut world = World::new();
    world
        .add_body(BodySpec::new(0.0, 0.0, 6.0, 10.0, 0.0).with_velocity(1.0, 0.0))
        .unwrap();
    world
        .add_body(BodySpec::new(10.0, 0.0, 6.0, 10.0, 0.0).with_velocity(-1.0, 0.0))
        .unwrap();

    let mut law = ContactLaw::new(ContactResponse::Elastic);
    law.apply(&mut world, &PointerState::default());
    world.sweep_dead();

    assert_eq!(world.len(), 2);
    assert_eq!(law.clamped_axes(), 0);
    assert_eq!(world.bodies()[0].velocity.x, -1.0);
    assert_eq!(world.bodies()[1].velocity.x, 1.0);
}
