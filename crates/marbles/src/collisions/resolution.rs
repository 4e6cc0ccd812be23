//! Contact resolution strategies
//!
//! The merge path is split into a geometric half (`size_merge`) and a
//! momentum half (`inelastic_merge`) so each conserves its own quantity and
//! the composition conserves area, mass, and momentum together. The elastic
//! path conserves momentum and kinetic energy and leaves both bodies alive.

use nalgebra::Vector2;

use crate::body::Body;

/// Tangent-axis magnitude above which the naive construction is treated as
/// degenerate and the vertical axis substituted
const TANGENT_LIMIT: f64 = 1e8;

/// Positional push-back overshoot so separated bodies do not re-trigger
/// detection on the very next pass
const SEPARATE_OVERSHOOT: f64 = 1.05;

/// Fuse the pair's geometry into `a`
///
/// Area-conserving radius (`rA' = sqrt(rA^2 + rB^2)`), with `a` pulled
/// toward the contact point in proportion to `b`'s share of the combined
/// size. The pull uses the already-fused radius, so the merged body settles
/// toward the larger contributor. Mass and velocity are untouched here;
/// they belong to [`inelastic_merge`].
pub fn size_merge(a: &mut Body, b: &Body) {
    a.radius = (a.radius * a.radius + b.radius * b.radius).sqrt();
    let shift = b.radius / (a.radius + b.radius);
    a.position += (b.position - a.position) * shift;
}

/// Perfectly inelastic collision: fuse mass and momentum into `a`
///
/// `a` takes the momentum-weighted velocity and the combined mass; `b` is
/// tombstoned for the end-of-frame sweep. Kinetic energy is deliberately
/// not conserved.
pub fn inelastic_merge(a: &mut Body, b: &mut Body) {
    let total = a.mass + b.mass;
    a.velocity = (a.velocity * a.mass + b.velocity * b.mass) / total;
    a.mass = total;
    b.mark_dead();
}

/// Fully elastic collision at an arbitrary impact angle
///
/// Each velocity is decomposed onto the line of centers (normal axis) and
/// its perpendicular (tangent axis). Tangential components pass through
/// unchanged; normal components take the 1-D elastic exchange
///
/// `vA' = ((mA - mB) vA + 2 mB vB) / (mA + mB)` (and symmetrically for B)
///
/// and the results are recomposed through the axis angles. Neither body is
/// tombstoned.
///
/// Two geometric hazards are handled fail-soft rather than fail-fast:
/// the naive tangent construction divides by the y-offset, so when its
/// magnitude blows past a large threshold the vertical axis `(0, 1)` is
/// substituted; and any recomposed component that still comes out
/// non-finite is clamped to zero. Returns `true` when such a clamp
/// happened so the caller can keep a count of the degenerate events.
pub fn elastic_collision(a: &mut Body, b: &mut Body) -> bool {
    let line = b.position - a.position;
    let len = line.norm();
    if len == 0.0 {
        // coincident centers: no collision axis exists
        return false;
    }

    // speeds along the line of centers
    let va_n = (a.velocity.x * line.x + a.velocity.y * line.y) / len;
    let vb_n = (b.velocity.x * line.x + b.velocity.y * line.y) / len;

    let mass_sum = a.mass + b.mass;
    let va_n_out = ((a.mass - b.mass) * va_n + 2.0 * b.mass * vb_n) / mass_sum;
    let vb_n_out = (2.0 * a.mass * va_n + (b.mass - a.mass) * vb_n) / mass_sum;

    // any perpendicular works as the tangent axis; the naive pick divides
    // by line.y and degenerates when the line of centers is horizontal
    let mut tangent = Vector2::new(1.0, -line.x / line.y);
    let mut tangent_len = tangent.norm();
    if !tangent_len.is_finite() || tangent_len > TANGENT_LIMIT {
        tangent = Vector2::new(0.0, 1.0);
        tangent_len = 1.0;
    }

    let va_t = (a.velocity.x * tangent.x + a.velocity.y * tangent.y) / tangent_len;
    let vb_t = (b.velocity.x * tangent.x + b.velocity.y * tangent.y) / tangent_len;

    // map the axis speeds back onto x/y through the axis angles
    let normal_angle = line.y.atan2(line.x);
    let tangent_angle = tangent.y.atan2(tangent.x);
    let (normal_cos, normal_sin) = (normal_angle.cos(), normal_angle.sin());
    let (tangent_cos, tangent_sin) = (tangent_angle.cos(), tangent_angle.sin());

    let mut clamped = false;
    let mut finite_or_zero = |value: f64| {
        if value.is_finite() {
            value
        } else {
            clamped = true;
            0.0
        }
    };

    a.velocity = Vector2::new(
        finite_or_zero(va_n_out * normal_cos + va_t * tangent_cos),
        finite_or_zero(va_n_out * normal_sin + va_t * tangent_sin),
    );
    b.velocity = Vector2::new(
        finite_or_zero(vb_n_out * normal_cos + vb_t * tangent_cos),
        finite_or_zero(vb_n_out * normal_sin + vb_t * tangent_sin),
    );

    clamped
}

/// Push an intersecting pair back to tangency
///
/// Splits the overlap evenly along the line of centers and moves each body
/// its half (with a slight overshoot), leaving velocities alone. Useful in
/// front of [`elastic_collision`] so bodies do not sink into each other
/// across repeated passes.
pub fn separate(a: &mut Body, b: &mut Body) {
    let distance = a.distance_to(b);
    let overlap = a.radius + b.radius - distance;
    if overlap <= 0.0 {
        return;
    }

    let half = overlap / 2.0;
    let heading = (b.position.y - a.position.y).atan2(b.position.x - a.position.x);
    let dx = heading.cos() * half * SEPARATE_OVERSHOOT;
    let dy = heading.sin() * half * SEPARATE_OVERSHOOT;

    a.position.x -= dx;
    a.position.y -= dy;
    b.position.x += dx;
    b.position.y += dy;
}
