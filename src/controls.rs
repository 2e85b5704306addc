//! Damped orbit controls around a target point.
//!
//! Pointer input accumulates spherical and pan deltas; [`OrbitControls::update`]
//! applies a `damping` fraction of them per frame and decays the remainder, so
//! motion eases out after the pointer stops.

use std::f32::consts::PI;

use glam::Vec3;

use crate::camera::PerspectiveCamera;

const EPS: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    /// Polar angle from +Y
    pub phi: f32,
    /// Azimuth around +Y, measured from +Z
    pub theta: f32,
}

impl Spherical {
    pub fn from_vec3(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self {
                radius: 0.0,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
            theta: v.x.atan2(v.z),
        }
    }

    pub fn to_vec3(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }

    /// Keep phi strictly inside (0, PI)
    pub fn make_safe(&mut self) {
        self.phi = self.phi.clamp(EPS, PI - EPS);
    }
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            damping: 0.05,
            min_distance: 2.0,
            max_distance: 15.0,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_speeds(mut self, rotate_speed: f32, zoom_speed: f32) -> Self {
        self.rotate_speed = rotate_speed;
        self.zoom_speed = zoom_speed;
        self
    }

    /// Pointer drag by `(dx, dy)` logical pixels in a viewport `height` tall
    pub fn rotate(&mut self, dx: f32, dy: f32, height: f32) {
        if height <= 0.0 {
            return;
        }
        self.delta_theta -= 2.0 * PI * dx / height * self.rotate_speed;
        self.delta_phi -= 2.0 * PI * dy / height * self.rotate_speed;
    }

    /// Move the target in the horizontal plane, scaled so the point under the
    /// cursor follows the pointer
    pub fn pan(&mut self, dx: f32, dy: f32, height: f32, camera: &PerspectiveCamera) {
        if height <= 0.0 {
            return;
        }
        let offset = camera.position - self.target;
        let distance = offset.length() * (camera.fov.to_radians() / 2.0).tan();

        let forward = (self.target - camera.position).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let ahead = Vec3::Y.cross(right);

        self.pan_offset += right * (-2.0 * dx * distance / height);
        self.pan_offset += ahead * (2.0 * dy * distance / height);
    }

    /// Positive steps move the camera toward the target
    pub fn dolly(&mut self, steps: f32) {
        let zoom = 0.95f32.powf(self.zoom_speed);
        self.scale *= zoom.powf(steps);
    }

    pub fn is_settled(&self) -> bool {
        self.delta_theta.abs() < EPS
            && self.delta_phi.abs() < EPS
            && (self.scale - 1.0).abs() < EPS
            && self.pan_offset.length_squared() < EPS * EPS
    }

    /// Apply one damped step to `camera`. Returns true if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let before = camera.position;
        let offset = camera.position - self.target;
        let mut spherical = Spherical::from_vec3(offset);

        spherical.theta += self.delta_theta * self.damping;
        spherical.phi += self.delta_phi * self.damping;
        spherical.make_safe();
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset * self.damping;

        camera.position = self.target + spherical.to_vec3();
        camera.target = self.target;

        self.delta_theta *= 1.0 - self.damping;
        self.delta_phi *= 1.0 - self.damping;
        self.pan_offset *= 1.0 - self.damping;
        self.scale = 1.0;

        camera.position.distance_squared(before) > EPS * EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(1.0)
    }

    #[test]
    fn test_spherical_round_trip() {
        let v = Vec3::new(1.0, 2.0, -3.0);
        let back = Spherical::from_vec3(v).to_vec3();
        assert!((back - v).length() < 1e-5);
    }

    #[test]
    fn test_idle_update_keeps_camera() {
        let mut controls = OrbitControls::new();
        let mut cam = camera();
        assert!(!controls.update(&mut cam));
        assert!((cam.position - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_rotation_is_damped_and_decays() {
        let mut controls = OrbitControls::new();
        let mut cam = camera();
        controls.rotate(100.0, 0.0, 800.0);
        let total = 2.0 * PI * 100.0 / 800.0;

        controls.update(&mut cam);
        let theta = Spherical::from_vec3(cam.position).theta;
        assert!((theta + total * 0.05).abs() < 1e-5);
        assert!((cam.position.length() - 5.0).abs() < 1e-4);

        for _ in 0..2000 {
            controls.update(&mut cam);
        }
        assert!(controls.is_settled());
        // geometric series converges to the full drag angle
        let theta = Spherical::from_vec3(cam.position).theta;
        assert!((theta + total).abs() < 1e-3);
    }

    #[test]
    fn test_polar_angle_stays_inside_poles() {
        let mut controls = OrbitControls::new();
        let mut cam = camera();
        controls.rotate(0.0, 10_000.0, 100.0);
        for _ in 0..500 {
            controls.update(&mut cam);
        }
        // pinned just short of the top pole, never exactly on the up axis
        assert!(cam.position.y > 4.99);
        assert!(Vec3::new(cam.position.x, 0.0, cam.position.z).length() > 0.0);
    }

    #[test]
    fn test_distance_is_clamped() {
        let mut controls = OrbitControls::new();
        let mut cam = camera();
        controls.dolly(-200.0);
        controls.update(&mut cam);
        assert!((cam.position.length() - 15.0).abs() < 1e-4);

        controls.dolly(200.0);
        controls.update(&mut cam);
        assert!((cam.position.length() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_pan_stays_horizontal() {
        let mut controls = OrbitControls::new();
        let mut cam = camera();
        controls.pan(40.0, 25.0, 600.0, &cam);
        for _ in 0..200 {
            controls.update(&mut cam);
        }
        assert_eq!(controls.target.y, 0.0);
        assert!(controls.target.x < 0.0);
        assert_eq!(cam.target, controls.target);
    }
}
