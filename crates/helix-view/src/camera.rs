//! Camera and pointer picking for the helix background
//!
//! The pointer is turned into a ray through the camera and intersected with
//! the `z = 0` plane; the hit point becomes the repulsion center.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

/// Background scene framing
const SCENE_POSITION: Vec3 = Vec3::new(22.0, 34.0, 29.5);
const SCENE_ROTATION: [f32; 3] = [-0.62, 0.36, -0.4];
const SCENE_FOVY_DEGREES: f32 = 55.0;

/// Fixed perspective camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Quat,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera looking down -Z from `position`
    pub fn new(position: Vec3, width: u32, height: u32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            aspect: aspect(width, height),
            fovy: SCENE_FOVY_DEGREES.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    /// The angled view over the helix used by the background scene
    pub fn scene(width: u32, height: u32) -> Self {
        let [x, y, z] = SCENE_ROTATION;
        Self {
            rotation: Quat::from_euler(EulerRot::XYZ, x, y, z),
            ..Self::new(SCENE_POSITION, width, height)
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation.conjugate());
        let translation_matrix = Mat4::from_translation(-self.position);
        let view = rotation_matrix * translation_matrix;
        let proj = Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect(width, height);
    }
}

fn aspect(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

/// Half-line from the camera through a pointer position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length
    pub direction: Vec3,
}

/// Pixel coordinates (origin top-left, y down) to normalized device coordinates
pub fn screen_to_ndc(x: f32, y: f32, width: u32, height: u32) -> Vec2 {
    let width = width.max(1) as f32;
    let height = height.max(1) as f32;
    Vec2::new(x / width * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

/// Ray from the camera through `ndc`
pub fn pointer_ray(camera: &Camera, ndc: Vec2) -> Ray {
    let inverse = camera.build_view_projection_matrix().inverse();
    let near = inverse.project_point3(ndc.extend(0.0));
    let far = inverse.project_point3(ndc.extend(1.0));
    Ray {
        origin: camera.position,
        direction: (far - near).normalize_or(camera.forward()),
    }
}

/// Where the pointer ray meets the `z = 0` interaction plane
///
/// `None` if the ray runs parallel to the plane or points away from it.
pub fn pointer_to_plane(camera: &Camera, ndc: Vec2) -> Option<Vec3> {
    let ray = pointer_ray(camera, ndc);
    if ray.direction.z.abs() <= f32::EPSILON {
        return None;
    }

    let t = -ray.origin.z / ray.direction.z;
    if t < 0.0 {
        return None;
    }

    let mut hit = ray.origin + ray.direction * t;
    hit.z = 0.0;
    Some(hit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_ndc() {
        assert_eq!(screen_to_ndc(0.0, 0.0, 800, 600), Vec2::new(-1.0, 1.0));
        assert_eq!(screen_to_ndc(400.0, 300.0, 800, 600), Vec2::ZERO);
        assert_eq!(screen_to_ndc(800.0, 600.0, 800, 600), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_center_ray_hits_origin() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 100.0), 800, 600);
        let hit = pointer_to_plane(&camera, Vec2::ZERO).unwrap();
        assert!(hit.length() < 1e-2, "hit at {hit}");
    }

    #[test]
    fn test_edge_ray_matches_frustum() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 100.0), 800, 600);
        let hit = pointer_to_plane(&camera, Vec2::new(1.0, 0.0)).unwrap();
        let expected = (camera.fovy * 0.5).tan() * camera.aspect * 100.0;
        assert!((hit.x - expected).abs() < 0.1, "{} vs {}", hit.x, expected);
        assert!(hit.y.abs() < 1e-2);
    }

    #[test]
    fn test_facing_away_misses() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 100.0), 800, 600);
        camera.rotation = Quat::from_rotation_y(std::f32::consts::PI);
        assert_eq!(pointer_to_plane(&camera, Vec2::ZERO), None);
    }

    #[test]
    fn test_scene_camera_sees_plane() {
        let camera = Camera::scene(1920, 1080);
        let hit = pointer_to_plane(&camera, Vec2::ZERO).unwrap();
        assert!(hit.is_finite());
        assert_eq!(hit.z, 0.0);
        // The scene camera looks down toward the helix
        assert!(camera.forward().z < 0.0);
    }

    #[test]
    fn test_resize_guards_zero_height() {
        let mut camera = Camera::scene(800, 600);
        camera.resize(800, 0);
        assert!(camera.aspect.is_finite());
    }
}
