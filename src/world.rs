use log::{debug, trace, warn};

use crate::collision::{collide, is_touching, BodyHandle, BroadPhase, Collision, CollisionPair};
use crate::debug::{DebugDraw, NoDebugDraw};
use crate::dynamics::{integrate_forces, integrate_velocity, Body, BodyDesc, BodyId};
use crate::error::PhysicsError;
use crate::geometry::Polygon;
use crate::material::Material;
use crate::math::{consts::EPSILON, Point, Vec2};
use crate::solver::{apply_impulse_with_slop, SolverConfig};

/// Fraction of a timestep the accumulator may fall short and still step,
/// so that summed frame deltas are not lost to rounding
const STEP_TOLERANCE: f32 = 1e-4;

/// When gravity enters the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GravityMode {
    /// Gravity is added as a force once per `advance` call; the force scale
    /// spreads it over the frame's updates
    #[default]
    PerAdvance,
    /// Gravity is integrated as an acceleration inside every fixed step
    PerStep,
}

/// Configuration for the physics world
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldSettings {
    /// Gravity magnitude
    pub gravity: f32,
    /// Gravity direction in radians (counter-clockwise from +X)
    pub gravity_direction: f32,
    pub gravity_mode: GravityMode,
    /// Apply Coulomb friction at contacts
    pub friction: bool,
    /// Let contacts and torques spin bodies
    pub rotation: bool,
    /// Length of one external frame in seconds
    pub frame_time: f32,
    /// Physics updates per frame
    pub updates_per_frame: u32,
    /// Narrow phase + resolution passes per step
    pub collision_precision: u32,
    /// Steps one `advance` may run before excess time is dropped
    pub max_steps_per_advance: u32,
    pub solver: SolverConfig,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            gravity_direction: 1.5 * std::f32::consts::PI, // straight down, y up
            gravity_mode: GravityMode::PerAdvance,
            friction: true,
            rotation: true,
            frame_time: 1.0 / 60.0,
            updates_per_frame: 1,
            collision_precision: 4,
            max_steps_per_advance: 8,
            solver: SolverConfig::default(),
        }
    }
}

impl WorldSettings {
    /// Length of one physics step: `frame_time / updates_per_frame`
    #[inline]
    pub fn timestep(&self) -> f32 {
        self.frame_time / self.updates_per_frame.max(1) as f32
    }

    /// `1 / updates_per_frame`
    #[inline]
    pub fn time_scale(&self) -> f32 {
        1.0 / self.updates_per_frame.max(1) as f32
    }

    /// `updates_per_frame`, applied to forces at integration
    #[inline]
    pub fn force_scale(&self) -> f32 {
        self.updates_per_frame.max(1) as f32
    }

    /// Gravity as an acceleration vector
    #[inline]
    pub fn gravity_vector(&self) -> Vec2 {
        Vec2::from_polar(self.gravity, self.gravity_direction)
    }

    /// Penetration a single contact may keep without positional correction
    #[inline]
    pub fn position_slop(&self) -> f32 {
        self.solver.min_position_correction * self.time_scale()
    }

    /// Velocity a free body gains from gravity in one step
    pub fn gravity_step(&self) -> Vec2 {
        match self.gravity_mode {
            GravityMode::PerAdvance => self.gravity_vector() * (self.timestep() * self.force_scale()),
            GravityMode::PerStep => self.gravity_vector() * self.timestep(),
        }
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_gravity_direction(mut self, radians: f32) -> Self {
        self.gravity_direction = radians;
        self
    }

    pub fn with_gravity_mode(mut self, mode: GravityMode) -> Self {
        self.gravity_mode = mode;
        self
    }

    pub fn with_friction(mut self, enabled: bool) -> Self {
        self.friction = enabled;
        self
    }

    pub fn with_rotation(mut self, enabled: bool) -> Self {
        self.rotation = enabled;
        self
    }

    pub fn with_frame_time(mut self, frame_time: f32) -> Self {
        self.frame_time = frame_time;
        self
    }

    pub fn with_updates_per_frame(mut self, updates: u32) -> Self {
        self.updates_per_frame = updates.max(1);
        self
    }

    pub fn with_collision_precision(mut self, passes: u32) -> Self {
        self.collision_precision = passes.max(1);
        self
    }

    pub fn with_max_steps_per_advance(mut self, steps: u32) -> Self {
        self.max_steps_per_advance = steps.max(1);
        self
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}

#[derive(Debug, Default)]
struct BodySlot {
    generation: u32,
    body: Option<Body>,
}

impl BodySlot {
    fn get(&self, handle: BodyHandle) -> Option<&Body> {
        if self.generation == handle.generation() {
            self.body.as_ref()
        } else {
            None
        }
    }

    fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        if self.generation == handle.generation() {
            self.body.as_mut()
        } else {
            None
        }
    }
}

/// The simulation: owns every body and advances them in fixed steps
#[derive(Debug)]
pub struct PhysicsWorld {
    settings: WorldSettings,
    slots: Vec<BodySlot>,
    /// Free slot indices for reuse
    free_slots: Vec<usize>,
    next_id: u64,
    broad_phase: BroadPhase,
    /// Collisions from the last narrow-phase pass
    collisions: Vec<Collision>,
    accumulator: f32,
    time: f32,
    steps: u64,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(WorldSettings::default())
    }
}

impl PhysicsWorld {
    /// Creates a new physics world with the given settings
    pub fn new(settings: WorldSettings) -> Self {
        Self {
            settings,
            slots: Vec::new(),
            free_slots: Vec::new(),
            next_id: 1,
            broad_phase: BroadPhase::new(),
            collisions: Vec::new(),
            accumulator: 0.0,
            time: 0.0,
            steps: 0,
        }
    }

    /// Creates a new body and returns its handle
    pub fn create_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let mut body = Body::new(desc);
        body.id = BodyId(self.next_id);
        self.next_id += 1;

        let index = match self.free_slots.pop() {
            Some(index) => index,
            None => {
                self.slots.push(BodySlot::default());
                self.slots.len() - 1
            }
        };
        let slot = &mut self.slots[index];
        let handle = BodyHandle::new(index as u32, slot.generation);
        debug!(
            "created {} body {} at ({:.2}, {:.2})",
            body.kind(),
            body.id,
            body.position().x,
            body.position().y
        );
        slot.body = Some(body);
        handle
    }

    /// Adds a circle centered at `(x, y)`
    pub fn add_circle(
        &mut self,
        x: f32,
        y: f32,
        radius: f32,
        material: Material,
    ) -> Result<BodyHandle, PhysicsError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(PhysicsError::InvalidShape {
                reason: "circle radius must be positive and finite",
            });
        }
        Ok(self.create_body(
            BodyDesc::circle(radius)
                .with_position(Point::new(x, y))
                .with_material(material),
        ))
    }

    /// Adds an axis-aligned box centered at `(cx, cy)`
    pub fn add_box(
        &mut self,
        cx: f32,
        cy: f32,
        width: f32,
        height: f32,
        material: Material,
    ) -> Result<BodyHandle, PhysicsError> {
        let polygon = Polygon::rectangle(width, height)?;
        Ok(self.create_body(
            BodyDesc::polygon(polygon)
                .with_position(Point::new(cx, cy))
                .with_material(material),
        ))
    }

    /// Adds a convex polygon whose centroid is placed at `(cx, cy)`.
    ///
    /// Repeated vertices (such as a closed outline ending on its first point)
    /// are merged first. Fails without adding anything if fewer than three
    /// distinct vertices remain or the outline has no area.
    pub fn add_polygon(
        &mut self,
        cx: f32,
        cy: f32,
        points: Vec<Point>,
        material: Material,
    ) -> Result<BodyHandle, PhysicsError> {
        let polygon = Polygon::new(points)?;
        if polygon.vertex_count() < 3 {
            return Err(PhysicsError::MalformedPolygon {
                reason: "polygon needs at least 3 vertices",
            });
        }
        if polygon.area() < EPSILON {
            return Err(PhysicsError::MalformedPolygon {
                reason: "polygon has zero area",
            });
        }
        Ok(self.create_body(
            BodyDesc::polygon(polygon)
                .with_position(Point::new(cx, cy))
                .with_material(material),
        ))
    }

    /// Removes a body from the world, returning it.
    ///
    /// The handle (and every copy of it) becomes invalid.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<Body> {
        let slot = self.slots.get_mut(handle.index())?;
        slot.get(handle)?;
        let body = slot.body.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_slots.push(handle.index());
        debug!("removed body {}", body.id);
        Some(body)
    }

    /// Removes the body with the given id
    pub fn remove_by_id(&mut self, id: BodyId) -> Option<Body> {
        let handle = self.handle_of(id)?;
        self.remove_body(handle)
    }

    /// Looks up the current handle of a body by id
    pub fn handle_of(&self, id: BodyId) -> Option<BodyHandle> {
        self.bodies().find(|(_, b)| b.id() == id).map(|(h, _)| h)
    }

    /// Gets a reference to a body
    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.slots.get(handle.index())?.get(handle)
    }

    /// Gets a mutable reference to a body
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.slots.get_mut(handle.index())?.get_mut(handle)
    }

    /// Like [`body`](Self::body), but reports a stale handle as an error
    pub fn try_body(&self, handle: BodyHandle) -> Result<&Body, PhysicsError> {
        self.body(handle).ok_or(PhysicsError::InvalidBody { handle })
    }

    /// Like [`body_mut`](Self::body_mut), but reports a stale handle as an error
    pub fn try_body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body, PhysicsError> {
        self.body_mut(handle).ok_or(PhysicsError::InvalidBody { handle })
    }

    /// Returns true if the handle refers to a live body
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.body(handle).is_some()
    }

    /// Gets the position of a body
    pub fn body_position(&self, handle: BodyHandle) -> Point {
        self.body(handle).map(|b| b.position()).unwrap_or(Point::ORIGIN)
    }

    /// Sets the position of a body
    pub fn set_body_position(&mut self, handle: BodyHandle, position: Point) {
        if let Some(body) = self.body_mut(handle) {
            body.set_position(position);
        }
    }

    /// Gets the velocity of a body
    pub fn body_velocity(&self, handle: BodyHandle) -> Vec2 {
        self.body(handle).map(|b| b.velocity).unwrap_or(Vec2::ZERO)
    }

    /// Sets the velocity of a body
    pub fn set_body_velocity(&mut self, handle: BodyHandle, velocity: Vec2) {
        if let Some(body) = self.body_mut(handle) {
            body.velocity = velocity;
        }
    }

    /// Gets the orientation of a body in radians
    pub fn body_orientation(&self, handle: BodyHandle) -> f32 {
        self.body(handle).map(|b| b.orientation()).unwrap_or(0.0)
    }

    /// Sets the orientation of a body in radians
    pub fn set_body_orientation(&mut self, handle: BodyHandle, orientation: f32) {
        if let Some(body) = self.body_mut(handle) {
            body.set_orientation(orientation);
        }
    }

    /// Gets the angular velocity of a body
    pub fn body_angular_velocity(&self, handle: BodyHandle) -> f32 {
        self.body(handle).map(|b| b.angular_velocity).unwrap_or(0.0)
    }

    /// Sets the angular velocity of a body
    pub fn set_body_angular_velocity(&mut self, handle: BodyHandle, angular_velocity: f32) {
        if let Some(body) = self.body_mut(handle) {
            body.angular_velocity = angular_velocity;
        }
    }

    /// Replaces a body's material, re-deriving its mass
    pub fn set_body_material(&mut self, handle: BodyHandle, material: Material) {
        if let Some(body) = self.body_mut(handle) {
            body.set_material(material);
        }
    }

    /// Overrides a body's mass
    pub fn set_body_mass(&mut self, handle: BodyHandle, mass: f32) {
        if let Some(body) = self.body_mut(handle) {
            body.set_mass(mass);
        }
    }

    /// Applies a force to a body, flushed at the next step
    pub fn apply_force(&mut self, handle: BodyHandle, force: Vec2) {
        if let Some(body) = self.body_mut(handle) {
            body.apply_force(force);
        }
    }

    /// Applies a force of `magnitude` pointing at `angle` radians
    pub fn apply_force_in_direction(&mut self, handle: BodyHandle, magnitude: f32, angle: f32) {
        if let Some(body) = self.body_mut(handle) {
            body.apply_force_in_direction(magnitude, angle);
        }
    }

    /// Applies a torque to a body, flushed at the next step
    pub fn apply_torque(&mut self, handle: BodyHandle, torque: f32) {
        if let Some(body) = self.body_mut(handle) {
            body.apply_torque(torque);
        }
    }

    /// True if two bodies overlap or nearly touch.
    ///
    /// Stale handles and unsupported shape pairs report `false`.
    pub fn is_touching(&self, a: BodyHandle, b: BodyHandle) -> bool {
        let (Some(body_a), Some(body_b)) = (self.body(a), self.body(b)) else {
            return false;
        };
        match is_touching(body_a, body_b, &self.settings.solver) {
            Ok(touching) => touching,
            Err(err) => {
                warn!("touch test between {} and {} failed: {err}", body_a.id(), body_b.id());
                false
            }
        }
    }

    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut WorldSettings {
        &mut self.settings
    }

    /// Sets the gravity magnitude
    pub fn set_gravity(&mut self, gravity: f32) {
        self.settings.gravity = gravity;
    }

    /// Sets the gravity direction in radians
    pub fn set_gravity_direction(&mut self, radians: f32) {
        self.settings.gravity_direction = radians;
    }

    pub fn set_gravity_mode(&mut self, mode: GravityMode) {
        self.settings.gravity_mode = mode;
    }

    pub fn set_friction(&mut self, enabled: bool) {
        self.settings.friction = enabled;
    }

    pub fn set_rotation(&mut self, enabled: bool) {
        self.settings.rotation = enabled;
    }

    /// Sets how many physics updates run per frame (at least one)
    pub fn set_updates_per_frame(&mut self, updates: u32) {
        self.settings.updates_per_frame = updates.max(1);
    }

    /// Sets how many narrow phase + resolution passes run per step
    pub fn set_collision_precision(&mut self, passes: u32) {
        self.settings.collision_precision = passes.max(1);
    }

    pub fn set_solver_config(&mut self, config: SolverConfig) {
        self.settings.solver = config;
    }

    /// Advances the simulation by `dt` seconds of wall time.
    ///
    /// Runs as many fixed steps as the accumulated time allows and returns
    /// the leftover fraction of a step (`alpha` in `[0, 1)`) for render
    /// interpolation.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.advance_with(dt, &mut NoDebugDraw)
    }

    /// Like [`advance`](Self::advance), reporting contacts and normals to `debug`
    pub fn advance_with(&mut self, dt: f32, debug: &mut dyn DebugDraw) -> f32 {
        let timestep = self.settings.timestep();
        if !timestep.is_finite() || timestep <= 0.0 {
            warn!("ignoring advance: timestep is {timestep}");
            return 0.0;
        }
        if dt.is_finite() && dt > 0.0 {
            self.accumulator += dt;
        }

        let max_steps = self.settings.max_steps_per_advance.max(1);
        let cap = timestep * max_steps as f32;
        if self.accumulator > cap {
            debug!(
                "dropping {:.4}s of simulation time (more than {max_steps} steps behind)",
                self.accumulator - cap
            );
            self.accumulator = cap;
        }

        let tolerance = timestep * STEP_TOLERANCE;
        if self.accumulator + tolerance >= timestep && self.settings.gravity_mode == GravityMode::PerAdvance {
            self.apply_gravity();
        }

        let mut steps = 0;
        while self.accumulator + tolerance >= timestep && steps < max_steps {
            self.step(timestep, debug);
            self.accumulator -= timestep;
            steps += 1;
        }
        self.accumulator = self.accumulator.max(0.0);

        trace!(
            "advance: {steps} steps, {} collisions, {} bodies",
            self.collisions.len(),
            self.num_bodies()
        );
        self.alpha()
    }

    /// Leftover fraction of a step after the last advance
    pub fn alpha(&self) -> f32 {
        let timestep = self.settings.timestep();
        if timestep > 0.0 {
            (self.accumulator / timestep).clamp(0.0, 1.0 - f32::EPSILON)
        } else {
            0.0
        }
    }

    fn apply_gravity(&mut self) {
        let gravity = self.settings.gravity_vector();
        for body in self.slots.iter_mut().filter_map(|s| s.body.as_mut()) {
            if !body.is_static() {
                let weight = gravity * body.mass();
                body.apply_force(weight);
            }
        }
    }

    /// Performs a single fixed step
    fn step(&mut self, dt: f32, debug: &mut dyn DebugDraw) {
        let settings = &self.settings;

        self.broad_phase.update(live_bodies(&self.slots));

        let passes = settings.collision_precision.max(1);
        for pass in 0..passes {
            // The slop budget is shared by the contacts of the previous pass
            let contacts: usize = self.collisions.iter().map(|c| c.contacts().len()).sum();
            let slop = settings.position_slop() / contacts.max(1) as f32;
            self.collisions.clear();
            for pair in self.broad_phase.pairs() {
                let Some((a, b)) = pair_mut(&mut self.slots, pair) else {
                    continue;
                };
                match collide(a, b, &settings.solver) {
                    Ok(Some(collision)) => {
                        let collision = collision.between(pair.body_a, pair.body_b);
                        for &contact in collision.contacts() {
                            debug.draw_point(contact);
                            debug.draw_vector(contact, collision.normal);
                        }
                        apply_impulse_with_slop(&collision, a, b, settings, slop);
                        self.collisions.push(collision);
                    }
                    Ok(None) => {}
                    Err(err) => {
                        if pass == 0 {
                            warn!("skipping pair {} / {}: {err}", a.id(), b.id());
                        }
                    }
                }
            }
        }

        for body in self.slots.iter_mut().filter_map(|s| s.body.as_mut()) {
            integrate_forces(body, settings, dt);
        }
        for body in self.slots.iter_mut().filter_map(|s| s.body.as_mut()) {
            integrate_velocity(body, settings, dt);
        }

        self.time += dt;
        self.steps += 1;
    }

    /// Collisions found by the last narrow-phase pass
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Sum of the penetration depths of [`collisions`](Self::collisions)
    pub fn total_penetration(&self) -> f32 {
        self.collisions.iter().map(|c| c.penetration).sum()
    }

    /// Returns the number of bodies in the world
    pub fn num_bodies(&self) -> usize {
        self.slots.len() - self.free_slots.len()
    }

    /// Returns an iterator over all live bodies and their handles
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> + '_ {
        live_bodies(&self.slots)
    }

    /// Returns an iterator over all body handles
    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.bodies().map(|(h, _)| h)
    }

    /// Returns the simulated time
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Number of fixed steps run so far
    pub fn step_count(&self) -> u64 {
        self.steps
    }
}

fn live_bodies(slots: &[BodySlot]) -> impl Iterator<Item = (BodyHandle, &Body)> + '_ {
    slots.iter().enumerate().filter_map(|(i, slot)| {
        slot.body
            .as_ref()
            .map(|b| (BodyHandle::new(i as u32, slot.generation), b))
    })
}

/// Gets mutable references to both bodies of a pair
fn pair_mut<'a>(slots: &'a mut [BodySlot], pair: &CollisionPair) -> Option<(&'a mut Body, &'a mut Body)> {
    let i = pair.body_a.index();
    let j = pair.body_b.index();
    if i >= j || j >= slots.len() {
        return None;
    }
    let (left, right) = slots.split_at_mut(j);
    let a = left[i].get_mut(pair.body_a)?;
    let b = right[0].get_mut(pair.body_b)?;
    Some((a, b))
}
