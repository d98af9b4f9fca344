//! Memory layout guarantees and raw float-buffer views.
//!
//! Every type is plain old data: packed `f32` lanes, no padding, no
//! invalid bit patterns. That lets vertex buffers held as `&mut [f32]` be
//! viewed as vectors and transformed in place.
//!
//! ```rust
//! use glk_math::{layout, Matrix4};
//!
//! let mut positions = vec![0.0f32, 0.0, 0.0, 1.0, 2.0, 3.0];
//! Matrix4::from_translation(1.0, 1.0, 1.0)
//!     .mul_vector3_buffer_with_translation(&mut positions)
//!     .unwrap();
//! assert_eq!(positions, [1.0, 1.0, 1.0, 2.0, 3.0, 4.0]);
//! assert!(layout::floats_as::<glk_math::Vector3>(&positions[..4]).is_err());
//! ```

use std::any::type_name;
use std::mem::{align_of, size_of};

use bytemuck::{Pod, PodCastError, Zeroable};
use glk_core::{Error, Result};

use crate::{Matrix2, Matrix3, Matrix4, Quaternion, Vector2, Vector3, Vector4};

const _: () = {
    assert!(size_of::<Vector2>() == 8 && align_of::<Vector2>() == 8);
    assert!(size_of::<Vector3>() == 12 && align_of::<Vector3>() == 4);
    assert!(size_of::<Vector4>() == 16 && align_of::<Vector4>() == 16);
    assert!(size_of::<Quaternion>() == 16 && align_of::<Quaternion>() == 16);
    assert!(size_of::<Matrix2>() == 16);
    assert!(size_of::<Matrix3>() == 36);
    assert!(size_of::<Matrix4>() == 64 && align_of::<Matrix4>() == 16);
};

// SAFETY: each type is repr(C) over f32 lanes only, with sizes asserted
// above to equal the lane count, so there is no padding and every bit
// pattern is valid.
macro_rules! impl_pod {
    ($($t:ty),*) => {
        $(
            unsafe impl Zeroable for $t {}
            unsafe impl Pod for $t {}
        )*
    };
}

impl_pod!(Vector2, Vector3, Vector4, Quaternion, Matrix2, Matrix3, Matrix4);

fn layout_error<T>(len: usize, err: PodCastError) -> Error {
    let reason = match err {
        PodCastError::TargetAlignmentGreaterAndInputNotAligned => {
            format!("buffer is not {}-byte aligned", align_of::<T>())
        }
        PodCastError::OutputSliceWouldHaveSlop => {
            format!("length is not a multiple of {}", size_of::<T>() / size_of::<f32>())
        }
        other => format!("{other:?}"),
    };
    Error::BufferLayout { len, target: type_name::<T>(), reason }
}

/// Views a float buffer as a slice of `T`.
///
/// Fails when the length is not a whole number of `T` or the buffer is not
/// aligned for `T` (16 bytes for [`Vector4`], [`Quaternion`] and
/// [`Matrix4`]).
pub fn floats_as<T: Pod>(floats: &[f32]) -> Result<&[T]> {
    bytemuck::try_cast_slice(floats).map_err(|err| layout_error::<T>(floats.len(), err))
}

/// Mutable form of [`floats_as`].
pub fn floats_as_mut<T: Pod>(floats: &mut [f32]) -> Result<&mut [T]> {
    let len = floats.len();
    bytemuck::try_cast_slice_mut(floats).map_err(|err| layout_error::<T>(len, err))
}

/// Flat float view of a slice of values. Never fails.
pub fn as_floats<T: Pod>(values: &[T]) -> &[f32] {
    bytemuck::cast_slice(values)
}

/// Mutable form of [`as_floats`].
pub fn as_floats_mut<T: Pod>(values: &mut [T]) -> &mut [f32] {
    bytemuck::cast_slice_mut(values)
}

impl Matrix4 {
    /// [`Matrix4::mul_vector3_array`] over packed `xyz` floats.
    pub fn mul_vector3_buffer(&self, floats: &mut [f32]) -> Result<()> {
        self.mul_vector3_array(floats_as_mut(floats)?);
        Ok(())
    }

    /// [`Matrix4::mul_vector3_array_with_translation`] over packed `xyz` floats.
    pub fn mul_vector3_buffer_with_translation(&self, floats: &mut [f32]) -> Result<()> {
        self.mul_vector3_array_with_translation(floats_as_mut(floats)?);
        Ok(())
    }

    /// [`Matrix4::mul_and_project_vector3_array`] over packed `xyz` floats.
    pub fn mul_and_project_vector3_buffer(&self, floats: &mut [f32]) -> Result<()> {
        self.mul_and_project_vector3_array(floats_as_mut(floats)?);
        Ok(())
    }

    /// [`Matrix4::mul_vector4_array`] over packed `xyzw` floats.
    ///
    /// The buffer must be 16-byte aligned.
    pub fn mul_vector4_buffer(&self, floats: &mut [f32]) -> Result<()> {
        self.mul_vector4_array(floats_as_mut(floats)?);
        Ok(())
    }
}

impl Matrix3 {
    /// [`Matrix3::mul_vector3_array`] over packed `xyz` floats.
    pub fn mul_vector3_buffer(&self, floats: &mut [f32]) -> Result<()> {
        self.mul_vector3_array(floats_as_mut(floats)?);
        Ok(())
    }
}

impl Quaternion {
    /// [`Quaternion::rotate_vector3_array`] over packed `xyz` floats.
    pub fn rotate_vector3_buffer(self, floats: &mut [f32]) -> Result<()> {
        self.rotate_vector3_array(floats_as_mut(floats)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector3_is_three_floats() {
        let vs = [Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0)];
        assert_eq!(as_floats(&vs), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_matrix4_is_column_major_floats() {
        let m = Matrix4::from_translation(7.0, 8.0, 9.0);
        assert_eq!(&as_floats(std::slice::from_ref(&m))[12..15], &[7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_floats_as_length_error() {
        let floats = [0.0f32; 7];
        let err = floats_as::<Vector3>(&floats).unwrap_err();
        match err {
            Error::BufferLayout { len, reason, .. } => {
                assert_eq!(len, 7);
                assert!(reason.contains("multiple of 3"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_vector4_buffer_alignment() {
        // Vector4 storage is always aligned, so a view of it casts back.
        let mut vs = [Vector4::ONE, Vector4::W];
        let floats = as_floats_mut(&mut vs);
        Matrix4::from_scale(2.0, 2.0, 2.0).mul_vector4_buffer(floats).unwrap();
        assert_eq!(vs[0], Vector4::new(2.0, 2.0, 2.0, 1.0));

        // Offsetting by one float breaks the 16-byte alignment.
        let floats = as_floats_mut(&mut vs);
        let err = Matrix4::IDENTITY.mul_vector4_buffer(&mut floats[1..5]).unwrap_err();
        assert!(matches!(err, Error::BufferLayout { len: 4, .. }));
    }

    #[test]
    fn test_buffer_transforms() {
        let mut floats = [1.0f32, 0.0, 0.0, 0.0, 2.0, 0.0];
        Matrix3::from_scale(3.0, 3.0, 3.0).mul_vector3_buffer(&mut floats).unwrap();
        assert_eq!(floats, [3.0, 0.0, 0.0, 0.0, 6.0, 0.0]);

        let mut floats = [1.0f32, 1.0, 1.0];
        let mut projection = Matrix4::IDENTITY;
        projection.m[15] = 2.0;
        projection.mul_and_project_vector3_buffer(&mut floats).unwrap();
        assert_eq!(floats, [0.5, 0.5, 0.5]);

        let mut floats = [1.0f32, 0.0];
        assert!(Quaternion::IDENTITY.rotate_vector3_buffer(&mut floats).is_err());
    }
}
