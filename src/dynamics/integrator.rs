use crate::world::{GravityMode, WorldSettings};

use super::body::Body;

/// Integrates accumulated force and torque into velocity, then clears them.
///
/// Forces are scaled by [`WorldSettings::force_scale`]. In
/// [`GravityMode::PerStep`] gravity is added here directly as an
/// acceleration; otherwise it already sits in the accumulated force.
pub fn integrate_forces(body: &mut Body, settings: &WorldSettings, dt: f32) {
    if body.is_static() {
        body.clear_forces();
        return;
    }

    let scale = settings.force_scale() * dt;
    body.velocity += body.force() * (body.inv_mass() * scale);
    if settings.gravity_mode == GravityMode::PerStep {
        body.velocity += settings.gravity_vector() * dt;
    }
    if settings.rotation {
        body.angular_velocity += body.torque() * body.inv_inertia() * scale;
    }

    body.clear_forces();
}

/// Integrates velocity into position and orientation
pub fn integrate_velocity(body: &mut Body, settings: &WorldSettings, dt: f32) {
    if body.is_static() {
        return;
    }

    let position = body.position() + body.velocity * dt;
    let orientation = if settings.rotation {
        body.orientation() + body.angular_velocity * dt
    } else {
        body.orientation()
    };
    body.set_pose(position, orientation);
}
