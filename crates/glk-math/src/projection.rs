//! Camera matrices.
//!
//! All projections map eye space (right-handed, looking down -Z) to OpenGL
//! clip space with depth in `[-1, 1]`.

use crate::{Matrix4, Vector3};

impl Matrix4 {
    /// Symmetric perspective projection.
    ///
    /// `fovy_radians` is the full vertical field of view.
    ///
    /// ```rust
    /// use glk_math::{Matrix4, Vector3};
    ///
    /// let proj = Matrix4::perspective(std::f32::consts::FRAC_PI_2, 1.0, 1.0, 100.0);
    /// let near = proj.mul_and_project_vector3(Vector3::new(0.0, 0.0, -1.0));
    /// assert!((near.z + 1.0).abs() < 1e-5);
    /// ```
    #[rustfmt::skip]
    pub fn perspective(fovy_radians: f32, aspect: f32, near: f32, far: f32) -> Self {
        let cotan = 1.0 / (fovy_radians / 2.0).tan();
        let depth = near - far;

        Self::new(
            cotan / aspect, 0.0, 0.0, 0.0,
            0.0, cotan, 0.0, 0.0,
            0.0, 0.0, (far + near) / depth, -1.0,
            0.0, 0.0, (2.0 * far * near) / depth, 0.0,
        )
    }

    /// Perspective projection from explicit clip planes; supports
    /// asymmetric frusta.
    #[rustfmt::skip]
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let (ral, rsl) = (right + left, right - left);
        let (tab, tsb) = (top + bottom, top - bottom);
        let (fan, fsn) = (far + near, far - near);

        Self::new(
            2.0 * near / rsl, 0.0, 0.0, 0.0,
            0.0, 2.0 * near / tsb, 0.0, 0.0,
            ral / rsl, tab / tsb, -fan / fsn, -1.0,
            0.0, 0.0, (-2.0 * far * near) / fsn, 0.0,
        )
    }

    /// Orthographic projection.
    #[rustfmt::skip]
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let (ral, rsl) = (right + left, right - left);
        let (tab, tsb) = (top + bottom, top - bottom);
        let (fan, fsn) = (far + near, far - near);

        Self::new(
            2.0 / rsl, 0.0, 0.0, 0.0,
            0.0, 2.0 / tsb, 0.0, 0.0,
            0.0, 0.0, -2.0 / fsn, 0.0,
            -ral / rsl, -tab / tsb, -fan / fsn, 1.0,
        )
    }

    /// View matrix for a camera at `eye` looking at `center`.
    ///
    /// The rotation rows are the orthonormal basis built from `eye - center`
    /// and `up`; the translation is `-eye` expressed in that basis. `up` must
    /// not be parallel to the view direction.
    ///
    /// ```rust
    /// use glk_math::{Matrix4, Vector3};
    ///
    /// let view = Matrix4::look_at(Vector3::new(0.0, 0.0, 5.0), Vector3::ZERO, Vector3::Y);
    /// let p = view.mul_vector3_with_translation(Vector3::ZERO);
    /// assert_eq!(p, Vector3::new(0.0, 0.0, -5.0));
    /// ```
    #[rustfmt::skip]
    pub fn look_at(eye: Vector3, center: Vector3, up: Vector3) -> Self {
        let n = (eye - center).normalize();
        let u = up.cross(n).normalize();
        let v = n.cross(u);

        Self::new(
            u.x, v.x, n.x, 0.0,
            u.y, v.y, n.y, 0.0,
            u.z, v.z, n.z, 0.0,
            -u.dot(eye), -v.dot(eye), -n.dot(eye), 1.0,
        )
    }

    /// [`Matrix4::look_at`] with scalar arguments.
    #[rustfmt::skip]
    #[allow(clippy::too_many_arguments)]
    pub fn look_at_components(
        eye_x: f32, eye_y: f32, eye_z: f32,
        center_x: f32, center_y: f32, center_z: f32,
        up_x: f32, up_y: f32, up_z: f32,
    ) -> Self {
        Self::look_at(
            Vector3::new(eye_x, eye_y, eye_z),
            Vector3::new(center_x, center_y, center_z),
            Vector3::new(up_x, up_y, up_z),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_3;

    fn assert_vec_eq(a: Vector3, b: Vector3) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
    }

    #[test]
    fn test_perspective_matches_glam() {
        let m = Matrix4::perspective(FRAC_PI_3, 16.0 / 9.0, 0.1, 50.0);
        let g = glam::Mat4::perspective_rh_gl(FRAC_PI_3, 16.0 / 9.0, 0.1, 50.0);
        for (a, b) in m.m.iter().zip(g.to_cols_array()) {
            assert_relative_eq!(*a, b, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_perspective_depth_range() {
        let m = Matrix4::perspective(FRAC_PI_3, 1.5, 1.0, 10.0);
        assert_vec_eq(
            m.mul_and_project_vector3(Vector3::new(0.0, 0.0, -1.0)),
            Vector3::new(0.0, 0.0, -1.0),
        );
        let far = m.mul_and_project_vector3(Vector3::new(0.0, 0.0, -10.0));
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_symmetric_frustum_equals_perspective() {
        let (near, far) = (0.5, 20.0);
        let top = near * (FRAC_PI_3 / 2.0).tan();
        let right = top * 2.0;
        let f = Matrix4::frustum(-right, right, -top, top, near, far);
        let p = Matrix4::perspective(FRAC_PI_3, 2.0, near, far);
        for (a, b) in f.m.iter().zip(p.m) {
            assert_relative_eq!(*a, b, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_asymmetric_frustum_corners() {
        let m = Matrix4::frustum(-1.0, 3.0, -2.0, 1.0, 1.0, 10.0);
        let corner = m.mul_and_project_vector3(Vector3::new(3.0, 1.0, -1.0));
        assert_vec_eq(corner, Vector3::new(1.0, 1.0, -1.0));
        let corner = m.mul_and_project_vector3(Vector3::new(-1.0, -2.0, -1.0));
        assert_vec_eq(corner, Vector3::new(-1.0, -1.0, -1.0));
    }

    #[test]
    fn test_orthographic_maps_box_to_cube() {
        let m = Matrix4::orthographic(-2.0, 4.0, 0.0, 3.0, 1.0, 5.0);
        assert_vec_eq(
            m.mul_vector3_with_translation(Vector3::new(-2.0, 0.0, -1.0)),
            Vector3::new(-1.0, -1.0, -1.0),
        );
        assert_vec_eq(
            m.mul_vector3_with_translation(Vector3::new(4.0, 3.0, -5.0)),
            Vector3::splat(1.0),
        );

        let g = glam::Mat4::orthographic_rh_gl(-2.0, 4.0, 0.0, 3.0, 1.0, 5.0);
        for (a, b) in m.m.iter().zip(g.to_cols_array()) {
            assert_relative_eq!(*a, b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_look_at_basis() {
        let eye = Vector3::new(3.0, 4.0, 5.0);
        let center = Vector3::new(0.0, 1.0, 0.0);
        let view = Matrix4::look_at(eye, center, Vector3::Y);

        // eye goes to the origin, the target lies on -Z
        assert_vec_eq(view.mul_vector3_with_translation(eye), Vector3::ZERO);
        let target = view.mul_vector3_with_translation(center);
        assert_relative_eq!(target.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(target.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(target.z, -(eye - center).length(), epsilon = 1e-5);

        let basis = view.matrix3();
        for i in 0..3 {
            assert_relative_eq!(basis.row(i).length(), 1.0, epsilon = 1e-6);
        }
        assert_relative_eq!(basis.row(0).dot(basis.row(1)), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_look_at_matches_glam() {
        let eye = Vector3::new(-1.0, 2.0, 7.0);
        let m = Matrix4::look_at_components(eye.x, eye.y, eye.z, 0.5, 0.0, -1.0, 0.0, 1.0, 0.0);
        let g = glam::Mat4::look_at_rh(
            glam::Vec3::new(eye.x, eye.y, eye.z),
            glam::Vec3::new(0.5, 0.0, -1.0),
            glam::Vec3::Y,
        );
        for (a, b) in m.m.iter().zip(g.to_cols_array()) {
            assert_relative_eq!(*a, b, epsilon = 1e-5);
        }
    }
}
