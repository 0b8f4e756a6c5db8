/// Vector and rotation-matrix helpers for the camera pipeline
use nalgebra::{Matrix3, Vector3};

/// World- or camera-space position; which space is up to the caller.
pub type Vec3 = Vector3<f64>;

/// 3x3 rotation matrix.
pub type RotationMatrix = Matrix3<f64>;

/// Rotation about the x axis by `angle` radians (rotates y and z).
#[rustfmt::skip]
pub fn pitch_matrix(angle: f64) -> RotationMatrix {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, c, -s,
        0.0, s, c,
    )
}

/// Rotation about the y axis by `angle` radians (rotates x and z).
#[rustfmt::skip]
pub fn yaw_matrix(angle: f64) -> RotationMatrix {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        c, 0.0, s,
        0.0, 1.0, 0.0,
        -s, 0.0, c,
    )
}

/// The pair of camera rotations used for one frame.
///
/// Built once per tick from the camera angles and handed to every draw call,
/// so all entities in a frame see the same pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRotation {
    pub pitch: RotationMatrix,
    pub yaw: RotationMatrix,
}

impl FrameRotation {
    /// Build both matrices from angles given in degrees.
    pub fn from_degrees(pitch_deg: f64, yaw_deg: f64) -> Self {
        Self {
            pitch: pitch_matrix(pitch_deg.to_radians()),
            yaw: yaw_matrix(yaw_deg.to_radians()),
        }
    }

    pub fn identity() -> Self {
        Self {
            pitch: RotationMatrix::identity(),
            yaw: RotationMatrix::identity(),
        }
    }

    /// Rotate a translated point into camera space: pitch first, then yaw.
    pub fn apply(&self, v: &Vec3) -> Vec3 {
        self.yaw * (self.pitch * v)
    }
}

impl Default for FrameRotation {
    fn default() -> Self {
        Self::identity()
    }
}
