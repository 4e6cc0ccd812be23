use nalgebra::{Point2, Vector2};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

/// Rejected body parameters
///
/// All force application divides by mass, so a body with non-positive mass
/// is refused at construction rather than guarded for on every sub-step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BodyError {
    #[error("mass must be strictly positive, got {0}")]
    NonPositiveMass(f64),
    #[error("radius must be non-negative, got {0}")]
    NegativeRadius(f64),
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
}

/// A point-mass circular body
///
/// Kinematic state (position, velocity, acceleration) plus the physical
/// parameters the laws read: mass, collision radius, and a per-body friction
/// coefficient applied as multiplicative damping during integration.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    /// Accumulated by laws each sub-step; zeroed before every law pass
    pub acceleration: Vector2<f64>,
    pub mass: f64,
    pub radius: f64,
    /// Damping coefficient, typically in [0, 1)
    pub friction: f64,
    captured: bool,
    dead: bool,
}

impl Body {
    pub fn new(
        id: BodyId,
        position: Point2<f64>,
        velocity: Vector2<f64>,
        radius: f64,
        mass: f64,
        friction: f64,
    ) -> Result<Self, BodyError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(BodyError::NonPositiveMass(mass));
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(BodyError::NegativeRadius(radius));
        }
        for (field, value) in [
            ("friction", friction),
            ("position.x", position.x),
            ("position.y", position.y),
            ("velocity.x", velocity.x),
            ("velocity.y", velocity.y),
        ] {
            if !value.is_finite() {
                return Err(BodyError::NonFinite { field, value });
            }
        }

        Ok(Self {
            id,
            position,
            velocity,
            acceleration: Vector2::zeros(),
            mass,
            radius,
            friction,
            captured: false,
            dead: false,
        })
    }

    /// Zero the acceleration accumulator
    ///
    /// Forces are instantaneous: each sub-step starts from zero and only the
    /// laws run during that sub-step contribute.
    pub fn reset_acceleration(&mut self) {
        self.acceleration = Vector2::zeros();
    }

    /// Advance the body by one sub-step out of `substeps`
    ///
    /// Applies, in order: acceleration (`v += a/N`), friction damping
    /// (`v *= 1 - f/N`), then translation (`x += v/N`). Dividing each
    /// contribution by N instead of a wall-clock delta makes the sub-step
    /// count double as the time scale, which the adaptive controller
    /// exploits: raising N slows apparent motion per sub-step in the same
    /// proportion as it raises fidelity.
    pub fn integrate(&mut self, substeps: u32) {
        let n = f64::from(substeps.max(1));
        self.velocity += self.acceleration / n;
        self.velocity *= 1.0 - self.friction / n;
        self.position += self.velocity / n;
    }

    /// Tombstone the body; it is swept from the world at end of frame
    ///
    /// One-way: a dead body never comes back, and laws skip it for the rest
    /// of the frame.
    pub fn mark_dead(&mut self) {
        self.dead = true;
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// While captured, an interaction law drives the position directly and
    /// normal integration is skipped for this body.
    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }

    /// Circle-vs-circle bounds test, tangency included
    pub fn overlaps(&self, other: &Body) -> bool {
        self.distance_to(other) <= self.radius + other.radius
    }

    /// Whether a point falls inside the body's circular bounds
    pub fn contains_point(&self, point: Point2<f64>) -> bool {
        (point - self.position).magnitude() <= self.radius
    }
}
