//! Camera-related types and components
//!
//! This module contains the main camera marker and the orbit parameters that
//! place the camera around the play area.

use bevy::prelude::*;
use std::f32::consts::PI;

pub const DEFAULT_CAMERA_ALPHA: f32 = PI * 0.5;
pub const DEFAULT_CAMERA_BETA: f32 = PI * 0.1;
pub const DEFAULT_CAMERA_RADIUS: f32 = 20.0;
pub const CAMERA_LOWER_RADIUS_LIMIT: f32 = 5.0;
pub const CAMERA_UPPER_RADIUS_LIMIT: f32 = 20.0;

/// Radius change per wheel line.
pub const WHEEL_ZOOM_STEP: f32 = 1.0;

/// Marker component for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// Orbit camera around a target point.
///
/// `alpha` is the longitudinal angle around Y and `beta` the polar angle from
/// the +Y axis.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub lower_radius_limit: f32,
    pub upper_radius_limit: f32,
    pub target: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_CAMERA_ALPHA,
            beta: DEFAULT_CAMERA_BETA,
            radius: DEFAULT_CAMERA_RADIUS,
            lower_radius_limit: CAMERA_LOWER_RADIUS_LIMIT,
            upper_radius_limit: CAMERA_UPPER_RADIUS_LIMIT,
            target: Vec3::ZERO,
        }
    }
}

impl OrbitCamera {
    pub fn translation(&self) -> Vec3 {
        let (sin_a, cos_a) = self.alpha.sin_cos();
        let (sin_b, cos_b) = self.beta.sin_cos();
        self.target + self.radius * Vec3::new(cos_a * sin_b, cos_b, sin_a * sin_b)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.translation()).looking_at(self.target, Vec3::Y)
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.clamp(self.lower_radius_limit, self.upper_radius_limit);
    }

    /// Pinch zoom: fingers moving apart (`ratio > 1`) bring the camera closer.
    pub fn zoom_by_ratio(&mut self, ratio: f32) {
        if !ratio.is_finite() || ratio <= 0.0 {
            return;
        }
        self.set_radius(self.radius / ratio);
    }

    pub fn zoom_by(&mut self, delta: f32) {
        self.set_radius(self.radius - delta);
    }
}

/// Ratio of the current finger distance to the previous one.
///
/// Returns `None` when the previous distance is too small to divide by.
pub fn pinch_ratio(prev_a: Vec2, prev_b: Vec2, cur_a: Vec2, cur_b: Vec2) -> Option<f32> {
    let previous = prev_a.distance(prev_b);
    if previous < f32::EPSILON {
        return None;
    }
    Some(cur_a.distance(cur_b) / previous)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_orbit_position() {
        let camera = OrbitCamera::default();
        let pos = camera.translation();
        assert!((pos.length() - DEFAULT_CAMERA_RADIUS).abs() < 1e-4);
        // alpha = pi/2 puts the camera on the +Z side.
        assert!(pos.x.abs() < 1e-4);
        assert!(pos.z > 0.0);
        assert!(pos.y > pos.z);
    }

    #[test]
    fn test_zoom_respects_radius_limits() {
        let mut camera = OrbitCamera::default();
        camera.zoom_by_ratio(0.5);
        assert_eq!(camera.radius, CAMERA_UPPER_RADIUS_LIMIT);

        camera.zoom_by_ratio(100.0);
        assert_eq!(camera.radius, CAMERA_LOWER_RADIUS_LIMIT);

        camera.zoom_by(-7.0);
        assert_eq!(camera.radius, 12.0);
    }

    #[test]
    fn test_invalid_ratio_ignored() {
        let mut camera = OrbitCamera::default();
        camera.radius = 10.0;
        camera.zoom_by_ratio(0.0);
        camera.zoom_by_ratio(f32::NAN);
        assert_eq!(camera.radius, 10.0);
    }

    #[test]
    fn test_pinch_ratio() {
        let ratio = pinch_ratio(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(20.0, 0.0),
        );
        assert_eq!(ratio, Some(2.0));
        assert_eq!(pinch_ratio(Vec2::ONE, Vec2::ONE, Vec2::ZERO, Vec2::ONE), None);
    }
}
