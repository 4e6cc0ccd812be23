use std::collections::HashMap;

use nalgebra::{Point2, Vector2};

use crate::body::{Body, BodyError, BodyId};

/// Tag shared by a group of bodies inserted together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchId(pub u32);

/// Parameters for a body about to be inserted
///
/// Identity is assigned by the world at insertion, so specs carry everything
/// except the id.
#[derive(Debug, Clone, Copy)]
pub struct BodySpec {
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    pub radius: f64,
    pub mass: f64,
    pub friction: f64,
}

impl BodySpec {
    pub fn new(x: f64, y: f64, radius: f64, mass: f64, friction: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            velocity: Vector2::zeros(),
            radius,
            mass,
            friction,
        }
    }

    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.velocity = Vector2::new(vx, vy);
        self
    }
}

/// Insertion-ordered collection of live bodies
///
/// The world owns every body exclusively; everything else refers to bodies
/// by id, and an id lookup after the owning body died simply returns `None`.
/// Ids are handed out from a monotonic counter and never reused. Insertion
/// order is both the iteration order for laws and the draw order handed to
/// the renderer.
///
/// # Examples
///
/// ```
/// use marbles::world::{BodySpec, World};
///
/// let mut world = World::new();
/// let id = world.add_body(BodySpec::new(0.0, 0.0, 5.0, 10.0, 0.0)).unwrap();
///
/// assert_eq!(world.len(), 1);
/// assert!(world.get(id).is_some());
///
/// world.get_mut(id).unwrap().mark_dead();
/// world.sweep_dead();
/// assert!(world.get(id).is_none());
/// ```
#[derive(Debug, Default)]
pub struct World {
    bodies: Vec<Body>,
    next_id: u32,
    next_batch: u32,
    batches: HashMap<BatchId, Vec<BodyId>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and insert a single body, returning its id
    pub fn add_body(&mut self, spec: BodySpec) -> Result<BodyId, BodyError> {
        let id = BodyId(self.next_id);
        let body = Body::new(
            id,
            spec.position,
            spec.velocity,
            spec.radius,
            spec.mass,
            spec.friction,
        )?;
        self.next_id += 1;
        self.bodies.push(body);
        Ok(id)
    }

    /// Insert a group of bodies under a shared batch tag
    ///
    /// Validation is all-or-nothing: if any spec is rejected, nothing is
    /// inserted. Per-body identity stays independent of the batch; the tag
    /// is bookkeeping only.
    pub fn add_batch(&mut self, specs: &[BodySpec]) -> Result<BatchId, BodyError> {
        let mut staged = Vec::with_capacity(specs.len());
        for (offset, spec) in specs.iter().enumerate() {
            let id = BodyId(self.next_id + offset as u32);
            staged.push(Body::new(
                id,
                spec.position,
                spec.velocity,
                spec.radius,
                spec.mass,
                spec.friction,
            )?);
        }

        let batch = BatchId(self.next_batch);
        self.next_batch += 1;
        self.next_id += staged.len() as u32;
        self.batches
            .insert(batch, staged.iter().map(|b| b.id).collect());
        self.bodies.extend(staged);
        Ok(batch)
    }

    /// Ids of the batch members still alive, in insertion order
    pub fn batch_members(&self, batch: BatchId) -> &[BodyId] {
        self.batches.get(&batch).map_or(&[], Vec::as_slice)
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Mutable access to two distinct bodies at once
    ///
    /// Needed by pairwise resolution, which writes both sides of a contact.
    /// Returns `None` if the ids are equal or either body is gone.
    pub fn get_pair_mut(&mut self, a: BodyId, b: BodyId) -> Option<(&mut Body, &mut Body)> {
        if a == b {
            return None;
        }
        let ia = self.bodies.iter().position(|x| x.id == a)?;
        let ib = self.bodies.iter().position(|x| x.id == b)?;
        let (lo, hi) = (ia.min(ib), ia.max(ib));
        let (left, right) = self.bodies.split_at_mut(hi);
        let (first, second) = (&mut left[lo], &mut right[0]);
        if ia < ib {
            Some((first, second))
        } else {
            Some((second, first))
        }
    }

    /// Mutable access to two bodies by position in the iteration order
    ///
    /// `i` and `j` must be distinct and in bounds.
    pub fn index_pair_mut(&mut self, i: usize, j: usize) -> (&mut Body, &mut Body) {
        assert_ne!(i, j, "pair indices must be distinct");
        let (lo, hi) = (i.min(j), i.max(j));
        let (left, right) = self.bodies.split_at_mut(hi);
        let (first, second) = (&mut left[lo], &mut right[0]);
        if i < j {
            (first, second)
        } else {
            (second, first)
        }
    }

    /// All bodies in insertion order, tombstones included mid-frame
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.iter_mut()
    }

    /// Bodies not yet tombstoned, in insertion order
    pub fn live(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| !b.is_dead())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn reset_accelerations(&mut self) {
        for body in &mut self.bodies {
            body.reset_acceleration();
        }
    }

    /// Fastest live body's speed, 0 for an empty world
    pub fn max_speed(&self) -> f64 {
        self.live().map(Body::speed).fold(0.0, f64::max)
    }

    pub fn total_momentum(&self) -> Vector2<f64> {
        self.live()
            .map(Body::momentum)
            .fold(Vector2::zeros(), |acc, p| acc + p)
    }

    pub fn total_kinetic_energy(&self) -> f64 {
        self.live().map(Body::kinetic_energy).sum()
    }

    pub fn total_mass(&self) -> f64 {
        self.live().map(|b| b.mass).sum()
    }

    /// Remove tombstoned bodies in one compaction pass
    ///
    /// Runs only between frames so that pairwise iteration never sees its
    /// indices shift. Survivors keep their relative order. Batch tags of
    /// swept bodies are dropped in the same pass.
    pub fn sweep_dead(&mut self) {
        if !self.bodies.iter().any(Body::is_dead) {
            return;
        }
        self.bodies.retain(|b| !b.is_dead());

        let live: Vec<BodyId> = self.bodies.iter().map(|b| b.id).collect();
        for members in self.batches.values_mut() {
            members.retain(|id| live.contains(id));
        }
        self.batches.retain(|_, members| !members.is_empty());
    }
}
