/// First-person camera driven by mouse deltas and movement keys
use log::debug;

use crate::error::{Error, Result};
use crate::input::{InputSnapshot, Key};
use crate::math::{FrameRotation, Vec3};

/// Degrees of rotation per unit of mouse motion.
pub const MOUSE_SENSITIVITY: f64 = 0.4;

/// Initial pose and projection parameters for a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub position: Vec3,
    /// Degrees
    pub pitch: f64,
    /// Degrees
    pub yaw: f64,
    /// Screen-space scale applied after the perspective divide.
    pub fov: f64,
    pub move_speed: f64,
    /// Distance of the near plane along camera-space z.
    pub near_clip: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, -15.0, 0.0),
            pitch: 0.0,
            yaw: 0.0,
            fov: 240.0,
            move_speed: 4.0,
            near_clip: 1.0,
        }
    }
}

/// Camera state: world position plus pitch/yaw in degrees.
///
/// Angles are never clamped or wrapped; pitch past 90 degrees flips the view.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub pitch: f64,
    pub yaw: f64,
    fov: f64,
    move_speed: f64,
    near_clip: f64,
}

impl Camera {
    /// Validate the settings and build a camera.
    pub fn new(settings: CameraSettings) -> Result<Self> {
        validate(&settings)?;

        debug!(
            "camera created at ({:.2}, {:.2}, {:.2}) fov={} speed={} near_clip={}",
            settings.position.x,
            settings.position.y,
            settings.position.z,
            settings.fov,
            settings.move_speed,
            settings.near_clip
        );

        Ok(Self::from_settings(settings))
    }

    fn from_settings(settings: CameraSettings) -> Self {
        Self {
            position: settings.position,
            pitch: settings.pitch,
            yaw: settings.yaw,
            fov: settings.fov,
            move_speed: settings.move_speed,
            near_clip: settings.near_clip,
        }
    }

    pub fn fov(&self) -> f64 {
        self.fov
    }

    pub fn move_speed(&self) -> f64 {
        self.move_speed
    }

    pub fn near_clip(&self) -> f64 {
        self.near_clip
    }

    /// Per-tick update: look first, then move with the new yaw.
    pub fn update(&mut self, input: &InputSnapshot) {
        self.rotate(input.mouse_dx, input.mouse_dy);
        self.apply_movement(input);
    }

    /// Turn by a mouse delta. Horizontal motion decreases yaw.
    pub fn rotate(&mut self, mouse_dx: f64, mouse_dy: f64) {
        self.yaw -= mouse_dx * MOUSE_SENSITIVITY;
        self.pitch += mouse_dy * MOUSE_SENSITIVITY;
    }

    /// Translate by the held movement keys.
    ///
    /// Each opposing pair is an either/or: forward beats back, left beats
    /// right, up beats down. Holding both keys of a pair moves in the winning
    /// direction instead of cancelling out.
    pub fn apply_movement(&mut self, input: &InputSnapshot) {
        let speed = self.move_speed;
        let mut direction = Vec3::zeros();

        if input.is_down(Key::Forward) {
            direction += self.rotate_to_world(0.0, speed);
        } else if input.is_down(Key::Back) {
            direction -= self.rotate_to_world(0.0, speed);
        }

        if input.is_down(Key::Left) {
            direction -= self.rotate_to_world(speed, 0.0);
        } else if input.is_down(Key::Right) {
            direction += self.rotate_to_world(speed, 0.0);
        }

        // Screen y grows downward, so "up" is towards -y.
        if input.is_down(Key::Up) {
            direction.y -= speed;
        } else if input.is_down(Key::Down) {
            direction.y += speed;
        }

        self.position += direction;
    }

    /// Rotate a local (x, z) intent on the ground plane by the current yaw.
    pub fn rotate_to_world(&self, x: f64, z: f64) -> Vec3 {
        let (s, c) = self.yaw.to_radians().sin_cos();
        Vec3::new(x * c - z * s, 0.0, x * s + z * c)
    }

    /// Rotation matrices for the current pose.
    pub fn frame_rotation(&self) -> FrameRotation {
        FrameRotation::from_degrees(self.pitch, self.yaw)
    }
}

impl Default for Camera {
    fn default() -> Self {
        let settings = CameraSettings::default();
        debug_assert!(validate(&settings).is_ok());
        Self::from_settings(settings)
    }
}

fn validate(settings: &CameraSettings) -> Result<()> {
    if !settings.near_clip.is_finite() || settings.near_clip <= 0.0 {
        return Err(Error::InvalidNearClip(settings.near_clip));
    }
    if !settings.fov.is_finite() || settings.fov <= 0.0 {
        return Err(Error::InvalidFov(settings.fov));
    }
    if !settings.move_speed.is_finite() {
        return Err(Error::InvalidMoveSpeed(settings.move_speed));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn camera_at_origin() -> Camera {
        Camera::new(CameraSettings {
            position: Vec3::zeros(),
            ..CameraSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn test_default_settings() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::new(0.0, -15.0, 0.0));
        assert_eq!(camera.fov(), 240.0);
        assert_eq!(camera.move_speed(), 4.0);
        assert_eq!(camera.near_clip(), 1.0);
    }

    #[test]
    fn test_default_matches_checked_constructor() {
        let checked = Camera::new(CameraSettings::default()).unwrap();
        assert_eq!(Camera::default(), checked);
    }

    #[test]
    fn test_rejects_non_positive_near_clip() {
        for near_clip in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = Camera::new(CameraSettings {
                near_clip,
                ..CameraSettings::default()
            });
            assert!(matches!(result, Err(Error::InvalidNearClip(_))));
        }
    }

    #[test]
    fn test_rejects_bad_fov_and_speed() {
        let fov = Camera::new(CameraSettings {
            fov: 0.0,
            ..CameraSettings::default()
        });
        assert_eq!(fov, Err(Error::InvalidFov(0.0)));

        let speed = Camera::new(CameraSettings {
            move_speed: f64::NAN,
            ..CameraSettings::default()
        });
        assert!(matches!(speed, Err(Error::InvalidMoveSpeed(_))));
    }

    #[test]
    fn test_rotate_uses_sensitivity() {
        let mut camera = camera_at_origin();
        camera.rotate(10.0, 5.0);
        assert!((camera.yaw - -4.0).abs() < EPS);
        assert!((camera.pitch - 2.0).abs() < EPS);
    }

    #[test]
    fn test_rotate_does_not_clamp() {
        let mut camera = camera_at_origin();
        camera.rotate(-1000.0, 500.0);
        assert!((camera.yaw - 400.0).abs() < EPS);
        assert!((camera.pitch - 200.0).abs() < EPS);
    }

    #[test]
    fn test_rotate_to_world_axis_convention() {
        let mut camera = camera_at_origin();
        let v = camera.rotate_to_world(4.0, 0.0);
        assert!((v - Vec3::new(4.0, 0.0, 0.0)).norm() < EPS);

        camera.yaw = 90.0;
        let v = camera.rotate_to_world(4.0, 0.0);
        assert!((v - Vec3::new(0.0, 0.0, 4.0)).norm() < EPS);
    }

    #[test]
    fn test_pitch_does_not_affect_movement() {
        let mut camera = camera_at_origin();
        camera.pitch = 60.0;
        camera.apply_movement(&InputSnapshot::with_keys(&[Key::Forward]));
        assert!((camera.position - Vec3::new(0.0, 0.0, 4.0)).norm() < EPS);
    }

    #[test]
    fn test_forward_moves_along_z() {
        let mut camera = camera_at_origin();
        camera.update(&InputSnapshot::with_keys(&[Key::Forward]));
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 4.0));
    }

    #[test]
    fn test_strafe_and_vertical() {
        let mut camera = camera_at_origin();
        camera.apply_movement(&InputSnapshot::with_keys(&[Key::Right, Key::Down]));
        assert!((camera.position - Vec3::new(4.0, 4.0, 0.0)).norm() < EPS);

        camera.apply_movement(&InputSnapshot::with_keys(&[Key::Left, Key::Up]));
        assert!(camera.position.norm() < EPS);
    }

    #[test]
    fn test_opposing_keys_first_wins() {
        let mut camera = camera_at_origin();
        camera.apply_movement(&InputSnapshot::with_keys(&[
            Key::Forward,
            Key::Back,
            Key::Left,
            Key::Right,
            Key::Up,
            Key::Down,
        ]));
        assert!((camera.position - Vec3::new(-4.0, -4.0, 4.0)).norm() < EPS);
    }

    #[test]
    fn test_update_rotates_before_moving() {
        let mut camera = camera_at_origin();
        // dx of -225 turns yaw to +90 before the forward step is taken
        let mut input = InputSnapshot::with_mouse(-225.0, 0.0);
        input.press(Key::Forward);
        camera.update(&input);
        assert!((camera.yaw - 90.0).abs() < EPS);
        assert!((camera.position - Vec3::new(-4.0, 0.0, 0.0)).norm() < EPS);
    }
}
