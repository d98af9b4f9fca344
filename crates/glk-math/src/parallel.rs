//! Parallel bulk transforms using Rayon.
//!
//! Same results as the serial `*_array` helpers; the buffer is split into
//! disjoint chunks, each transformed on its own worker.
//!
//! ```rust
//! use glk_math::{Matrix4, Vector3};
//!
//! let mut positions = vec![Vector3::ONE; 100_000];
//! Matrix4::from_translation(0.0, 1.0, 0.0).par_mul_vector3_array_with_translation(&mut positions);
//! assert_eq!(positions[99_999], Vector3::new(1.0, 2.0, 1.0));
//! ```

use rayon::prelude::*;

use crate::{Matrix3, Matrix4, Quaternion, Vector3, Vector4};

/// Elements per rayon task.
const CHUNK: usize = 4096;

impl Matrix4 {
    /// Parallel [`Matrix4::mul_vector3_array`].
    pub fn par_mul_vector3_array(&self, vectors: &mut [Vector3]) {
        vectors
            .par_chunks_mut(CHUNK)
            .for_each(|chunk| self.mul_vector3_array(chunk));
    }

    /// Parallel [`Matrix4::mul_vector3_array_with_translation`].
    pub fn par_mul_vector3_array_with_translation(&self, vectors: &mut [Vector3]) {
        vectors
            .par_chunks_mut(CHUNK)
            .for_each(|chunk| self.mul_vector3_array_with_translation(chunk));
    }

    /// Parallel [`Matrix4::mul_and_project_vector3_array`].
    pub fn par_mul_and_project_vector3_array(&self, vectors: &mut [Vector3]) {
        vectors
            .par_chunks_mut(CHUNK)
            .for_each(|chunk| self.mul_and_project_vector3_array(chunk));
    }

    /// Parallel [`Matrix4::mul_vector4_array`].
    pub fn par_mul_vector4_array(&self, vectors: &mut [Vector4]) {
        vectors
            .par_chunks_mut(CHUNK)
            .for_each(|chunk| self.mul_vector4_array(chunk));
    }
}

impl Matrix3 {
    /// Parallel [`Matrix3::mul_vector3_array`].
    pub fn par_mul_vector3_array(&self, vectors: &mut [Vector3]) {
        vectors
            .par_chunks_mut(CHUNK)
            .for_each(|chunk| self.mul_vector3_array(chunk));
    }
}

impl Quaternion {
    /// Parallel [`Quaternion::rotate_vector3_array`].
    pub fn par_rotate_vector3_array(self, vectors: &mut [Vector3]) {
        vectors
            .par_chunks_mut(CHUNK)
            .for_each(|chunk| self.rotate_vector3_array(chunk));
    }

    /// Parallel [`Quaternion::rotate_vector4_array`].
    pub fn par_rotate_vector4_array(self, vectors: &mut [Vector4]) {
        vectors
            .par_chunks_mut(CHUNK)
            .for_each(|chunk| self.rotate_vector4_array(chunk));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(n: usize) -> Vec<Vector3> {
        (0..n)
            .map(|i| Vector3::new(i as f32, (i % 7) as f32, -(i as f32) * 0.5))
            .collect()
    }

    #[test]
    fn test_par_matches_serial() {
        let m = Matrix4::perspective(1.0, 1.5, 0.1, 100.0).translate(0.0, 0.0, -3.0);
        let mut serial = positions(10_000);
        let mut parallel = serial.clone();

        m.mul_and_project_vector3_array(&mut serial);
        m.par_mul_and_project_vector3_array(&mut parallel);
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_par_rotate_matches_serial() {
        let q = Quaternion::from_angle_axis(0.9, 0.0, 0.6, 0.8);
        let mut serial = positions(9_000);
        let mut parallel = serial.clone();

        q.rotate_vector3_array(&mut serial);
        q.par_rotate_vector3_array(&mut parallel);
        assert_eq!(serial, parallel);

        let mut v4 = vec![Vector4::new(1.0, 2.0, 3.0, 1.0); 5_000];
        q.par_rotate_vector4_array(&mut v4);
        assert_eq!(v4[4_999], q.rotate_vector4(Vector4::new(1.0, 2.0, 3.0, 1.0)));
    }

    #[test]
    fn test_par_matrix3_and_vector4() {
        let m3 = Matrix3::from_scale(2.0, 2.0, 2.0);
        let mut vs = positions(5_000);
        m3.par_mul_vector3_array(&mut vs);
        assert_eq!(vs[10], Vector3::new(20.0, 6.0, -10.0));

        let m4 = Matrix4::from_scale(3.0, 3.0, 3.0);
        let mut dirs = positions(5_000);
        m4.par_mul_vector3_array(&mut dirs);
        assert_eq!(dirs[2], Vector3::new(6.0, 6.0, -3.0));

        let mut v4 = vec![Vector4::W; 5_000];
        Matrix4::from_translation(1.0, 2.0, 3.0).par_mul_vector4_array(&mut v4);
        assert_eq!(v4[0], Vector4::new(1.0, 2.0, 3.0, 1.0));
    }
}
