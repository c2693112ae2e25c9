//! Physical materials: restitution, density and friction coefficients.

/// Surface and bulk properties of a body.
///
/// A density of zero marks an immovable body: its inverse mass and inverse
/// inertia are forced to zero, so no force, torque or impulse can move it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    restitution: f32,
    density: f32,
    static_friction: f32,
    dynamic_friction: f32,
}

impl Material {
    pub const ROCK: Self = Self::raw(0.1, 0.6, 0.6, 0.4);
    pub const WOOD: Self = Self::raw(0.2, 0.3, 0.5, 0.3);
    pub const METAL: Self = Self::raw(0.05, 1.2, 0.4, 0.25);
    pub const BOUNCY: Self = Self::raw(0.8, 0.3, 0.4, 0.2);
    /// Immovable ground/wall material (density 0)
    pub const STATIC: Self = Self::raw(0.4, 0.0, 0.5, 0.4);

    /// Creates a material, clamping restitution to `[0, 1]` and the other
    /// coefficients to be non-negative.
    pub fn new(restitution: f32, density: f32, static_friction: f32, dynamic_friction: f32) -> Self {
        Self {
            restitution: restitution.clamp(0.0, 1.0),
            density: density.max(0.0),
            static_friction: static_friction.max(0.0),
            dynamic_friction: dynamic_friction.max(0.0),
        }
    }

    const fn raw(restitution: f32, density: f32, static_friction: f32, dynamic_friction: f32) -> Self {
        Self {
            restitution,
            density,
            static_friction,
            dynamic_friction,
        }
    }

    #[inline]
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    #[inline]
    pub fn density(&self) -> f32 {
        self.density
    }

    #[inline]
    pub fn static_friction(&self) -> f32 {
        self.static_friction
    }

    #[inline]
    pub fn dynamic_friction(&self) -> f32 {
        self.dynamic_friction
    }

    /// True for the infinite-mass sentinel (density 0)
    #[inline]
    pub fn is_static(&self) -> bool {
        self.density == 0.0
    }

    /// Same material with a different density
    pub fn with_density(self, density: f32) -> Self {
        Self {
            density: density.max(0.0),
            ..self
        }
    }

    /// Same material with a different restitution
    pub fn with_restitution(self, restitution: f32) -> Self {
        Self {
            restitution: restitution.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Same material with different friction coefficients
    pub fn with_friction(self, static_friction: f32, dynamic_friction: f32) -> Self {
        Self {
            static_friction: static_friction.max(0.0),
            dynamic_friction: dynamic_friction.max(0.0),
            ..self
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::ROCK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_into_range() {
        let m = Material::new(1.5, -2.0, -0.1, 0.3);
        assert_eq!(m.restitution(), 1.0);
        assert_eq!(m.density(), 0.0);
        assert_eq!(m.static_friction(), 0.0);
        assert_eq!(m.dynamic_friction(), 0.3);
        assert!(m.is_static());
    }

    #[test]
    fn test_presets() {
        assert_eq!(Material::default(), Material::ROCK);
        assert_eq!(Material::WOOD.restitution(), 0.2);
        assert!(Material::STATIC.is_static());
        assert!(!Material::METAL.is_static());
    }

    #[test]
    fn test_builders_keep_other_fields() {
        let m = Material::WOOD.with_restitution(1.0).with_friction(0.0, 0.0);
        assert_eq!(m.restitution(), 1.0);
        assert_eq!(m.density(), Material::WOOD.density());
        assert_eq!(m.static_friction(), 0.0);
        assert!(Material::ROCK.with_density(0.0).is_static());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&Material::BOUNCY).unwrap();
        let back: Material = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Material::BOUNCY);
    }
}
