//! Conversions to and from [`glam`].
//!
//! Both sides store matrices column-major with `(x, y, z, w)` quaternions,
//! so every conversion is a plain copy.

use crate::{Matrix2, Matrix3, Matrix4, Quaternion, Vector2, Vector3, Vector4};

macro_rules! glam_vector {
    ($ours:ty, $theirs:ty) => {
        impl From<$theirs> for $ours {
            #[inline]
            fn from(v: $theirs) -> Self {
                Self::from_array(v.to_array())
            }
        }

        impl From<$ours> for $theirs {
            #[inline]
            fn from(v: $ours) -> Self {
                <$theirs>::from_array(v.to_array())
            }
        }
    };
}

glam_vector!(Vector2, glam::Vec2);
glam_vector!(Vector3, glam::Vec3);
glam_vector!(Vector4, glam::Vec4);

impl From<glam::Quat> for Quaternion {
    #[inline]
    fn from(q: glam::Quat) -> Self {
        Self::from_array(q.to_array())
    }
}

impl From<Quaternion> for glam::Quat {
    #[inline]
    fn from(q: Quaternion) -> Self {
        glam::Quat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

impl From<glam::Mat2> for Matrix2 {
    #[inline]
    fn from(m: glam::Mat2) -> Self {
        Self::from_array(m.to_cols_array())
    }
}

impl From<Matrix2> for glam::Mat2 {
    #[inline]
    fn from(m: Matrix2) -> Self {
        glam::Mat2::from_cols_array(&m.m)
    }
}

impl From<glam::Mat3> for Matrix3 {
    #[inline]
    fn from(m: glam::Mat3) -> Self {
        Self::from_array(m.to_cols_array())
    }
}

impl From<Matrix3> for glam::Mat3 {
    #[inline]
    fn from(m: Matrix3) -> Self {
        glam::Mat3::from_cols_array(&m.m)
    }
}

impl From<glam::Mat4> for Matrix4 {
    #[inline]
    fn from(m: glam::Mat4) -> Self {
        Self::from_array(m.to_cols_array())
    }
}

impl From<Matrix4> for glam::Mat4 {
    #[inline]
    fn from(m: Matrix4) -> Self {
        glam::Mat4::from_cols_array(&m.m)
    }
}
