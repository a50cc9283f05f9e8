use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::math::{Ray, ScreenRect};

/// Perspective camera owned by a viewport.
///
/// Besides the view-projection matrix the camera knows how to map between
/// window pixels and world space, which is all picking needs: a ray through
/// a mouse position for click picks, and world → screen projection for box
/// picks.  Navigation (fly / orbit) lives outside this crate.
#[derive(Debug, Clone)]
pub struct Camera {
    // --- view parameters --------------------------------------------------
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    // --- projection parameters --------------------------------------------
    pub fovy: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy: 45.0f32.to_radians(),
            aspect: 1.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl Camera {
    /// Camera at `eye` looking at `target`, default lens.
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        Self {
            eye,
            target,
            ..Default::default()
        }
    }

    /// Build the combined view-projection matrix from the current parameters.
    pub fn build_view_projection_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Ray from the near plane through the pixel `point` of `viewport`.
    pub fn ray_from_screen(&self, point: Vec2, viewport: &ScreenRect) -> Ray {
        let ndc = screen_to_ndc(point, viewport);
        let inv = self.build_view_projection_matrix().inverse();
        // wgpu depth range: near = 0, far = 1
        let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(near, far - near)
    }

    /// Pixel position of a world-space point, or `None` when the point is
    /// behind the camera.
    pub fn project_to_screen(&self, point: Vec3, viewport: &ScreenRect) -> Option<Vec2> {
        let clip = self.build_view_projection_matrix() * Vec4::new(point.x, point.y, point.z, 1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        let ndc = Vec2::new(clip.x / clip.w, clip.y / clip.w);
        Some(ndc_to_screen(ndc, viewport))
    }
}

fn screen_to_ndc(point: Vec2, viewport: &ScreenRect) -> Vec2 {
    let size = viewport.size().max(Vec2::ONE);
    let local = (point - viewport.min) / size;
    Vec2::new(local.x * 2.0 - 1.0, 1.0 - local.y * 2.0)
}

fn ndc_to_screen(ndc: Vec2, viewport: &ScreenRect) -> Vec2 {
    let local = Vec2::new((ndc.x + 1.0) * 0.5, (1.0 - ndc.y) * 0.5);
    viewport.min + local * viewport.size()
}
