use crate::collision::Collision;
use crate::dynamics::Body;
use crate::math::{consts::EPSILON, Vec2};
use crate::world::WorldSettings;

/// Tunables for collision resolution
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Fraction of the penetration removed per resolution pass
    pub correction_percent: f32,
    /// Penetration (before time scaling) the world tolerates in total.
    ///
    /// The world splits this slop evenly over the contact points it found in
    /// the previous pass, so a stack of many contacts still settles with its
    /// summed penetration under this value.
    pub min_position_correction: f32,
    /// Center distance below which two circles are treated as coincident
    pub tiny_distance: f32,
    /// Gap under which two bodies still count as touching
    pub touch_margin: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            correction_percent: 0.2,
            min_position_correction: 0.05,
            tiny_distance: 1e-4,
            touch_margin: 0.5,
        }
    }
}

/// Resolves one collision between `a` and `b`.
///
/// First nudges the bodies apart along the normal, then applies a normal
/// impulse (with restitution) and, if enabled, a Coulomb friction impulse at
/// each contact point. Velocities change immediately.
pub fn apply_impulse(collision: &Collision, a: &mut Body, b: &mut Body, settings: &WorldSettings) {
    apply_impulse_with_slop(collision, a, b, settings, settings.position_slop());
}

/// [`apply_impulse`] with an explicit positional-correction slop (see
/// [`correct_positions`]).
pub fn apply_impulse_with_slop(
    collision: &Collision,
    a: &mut Body,
    b: &mut Body,
    settings: &WorldSettings,
    slop: f32,
) {
    let inv_mass_sum = a.inv_mass() + b.inv_mass();
    if inv_mass_sum == 0.0 || collision.contacts().is_empty() {
        return;
    }

    correct_positions(collision, a, b, settings, slop);

    let normal = collision.normal;
    let restitution = (a.material().restitution() + b.material().restitution()) * 0.5;
    let static_friction = (a.material().static_friction() * b.material().static_friction()).sqrt();
    let dynamic_friction =
        (a.material().dynamic_friction() * b.material().dynamic_friction()).sqrt();
    let resting_speed_sq = settings.gravity_step().length_squared() + EPSILON;

    for &contact in collision.contacts() {
        let (ra, rb) = if settings.rotation {
            (contact - a.position(), contact - b.position())
        } else {
            (Vec2::ZERO, Vec2::ZERO)
        };

        let relative = b.velocity_at(rb) - a.velocity_at(ra);
        let contact_velocity = relative.dot(normal);
        if contact_velocity >= 0.0 {
            continue;
        }

        let k = effective_inv_mass(a, b, ra, rb, normal, settings.rotation);
        if k <= 0.0 {
            continue;
        }

        // Contacts that only gained one step of gravity are resting: no bounce
        let e = if relative.length_squared() < resting_speed_sq {
            0.0
        } else {
            restitution
        };

        let j = -(1.0 + e) * contact_velocity / k;
        let impulse = normal * j;
        a.apply_impulse(-impulse, ra);
        b.apply_impulse(impulse, rb);

        if !settings.friction {
            continue;
        }

        let relative = b.velocity_at(rb) - a.velocity_at(ra);
        let Some(tangent) = (relative - normal * relative.dot(normal)).try_normalize() else {
            continue;
        };

        let kt = effective_inv_mass(a, b, ra, rb, tangent, settings.rotation);
        if kt <= 0.0 {
            continue;
        }
        let jt = -relative.dot(tangent) / kt;
        if jt.abs() < EPSILON {
            continue;
        }

        let friction_impulse = if jt.abs() < j * static_friction {
            tangent * jt
        } else {
            tangent * (-j * dynamic_friction)
        };
        a.apply_impulse(-friction_impulse, ra);
        b.apply_impulse(friction_impulse, rb);
    }
}

/// Pushes both bodies apart along the normal in proportion to their inverse
/// masses. Skipped while the penetration is at most `slop`; a lone pair uses
/// [`WorldSettings::position_slop`].
pub fn correct_positions(
    collision: &Collision,
    a: &mut Body,
    b: &mut Body,
    settings: &WorldSettings,
    slop: f32,
) {
    let inv_mass_sum = a.inv_mass() + b.inv_mass();
    if inv_mass_sum == 0.0 || collision.penetration <= slop {
        return;
    }

    let percent = settings.solver.correction_percent;
    let correction = collision.normal * (collision.penetration * percent / inv_mass_sum);
    if a.inv_mass() > 0.0 {
        a.translate(-correction * a.inv_mass());
    }
    if b.inv_mass() > 0.0 {
        b.translate(correction * b.inv_mass());
    }
}

/// Inverse effective mass of the pair along `direction`
fn effective_inv_mass(a: &Body, b: &Body, ra: Vec2, rb: Vec2, direction: Vec2, rotation: bool) -> f32 {
    let mut k = a.inv_mass() + b.inv_mass();
    if rotation {
        let ra_cross = ra.cross(direction);
        let rb_cross = rb.cross(direction);
        k += ra_cross * ra_cross * a.inv_inertia() + rb_cross * rb_cross * b.inv_inertia();
    }
    k
}
