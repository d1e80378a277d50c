//! Fog attenuation.

use super::config::FogParams;

/// Linear fog factor for a point at `distance` from the camera.
///
/// Returns a value in `[0.0, 1.0]` where 0 = no fog and 1 = fully fogged.
/// When fog is disabled, always returns 0.0.
pub fn fog_factor(distance: f32, fog: &FogParams) -> f32 {
    if !fog.enabled || !distance.is_finite() {
        return 0.0;
    }
    let span = fog.far - fog.near;
    if span <= 0.0 {
        return if distance >= fog.far { 1.0 } else { 0.0 };
    }
    ((distance - fog.near) / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fog() -> FogParams {
        FogParams {
            enabled: true,
            color: [0.5; 3],
            near: 10.0,
            far: 110.0,
        }
    }

    #[test]
    fn test_disabled_fog_returns_zero() {
        let cfg = FogParams { enabled: false, ..fog() };
        assert_eq!(fog_factor(100.0, &cfg), 0.0);
    }

    #[test]
    fn test_linear_ramp() {
        let cfg = fog();
        assert_eq!(fog_factor(5.0, &cfg), 0.0);
        assert_eq!(fog_factor(60.0, &cfg), 0.5);
        assert_eq!(fog_factor(500.0, &cfg), 1.0);
    }

    #[test]
    fn test_degenerate_span() {
        let cfg = FogParams { near: 50.0, far: 50.0, ..fog() };
        assert_eq!(fog_factor(49.0, &cfg), 0.0);
        assert_eq!(fog_factor(50.0, &cfg), 1.0);
    }
}
