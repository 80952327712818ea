//! Frame positions accepted by keyframe map operations.
//!
//! Rust integers convert directly. `serde_json::Value` is the dynamic entry
//! point: anything other than an integral JSON number is rejected.

use serde_json::Value as Json;

use crate::error::KeyframeError;

/// Conversion into an integer frame position.
pub trait FramePosition {
    fn to_frame(&self) -> Result<i64, KeyframeError>;
}

macro_rules! lossless_position {
    ($($t:ty),*) => {
        $(
            impl FramePosition for $t {
                #[inline]
                fn to_frame(&self) -> Result<i64, KeyframeError> {
                    Ok(i64::from(*self))
                }
            }
        )*
    };
}

lossless_position!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! checked_position {
    ($($t:ty),*) => {
        $(
            impl FramePosition for $t {
                #[inline]
                fn to_frame(&self) -> Result<i64, KeyframeError> {
                    i64::try_from(*self).map_err(|_| KeyframeError::type_kind(self.to_string()))
                }
            }
        )*
    };
}

checked_position!(u64, usize, isize);

impl FramePosition for Json {
    fn to_frame(&self) -> Result<i64, KeyframeError> {
        match self {
            Json::Number(n) => n.as_i64().ok_or_else(|| KeyframeError::type_kind(n.to_string())),
            other => Err(KeyframeError::type_kind(other.to_string())),
        }
    }
}

impl<P: FramePosition + ?Sized> FramePosition for &P {
    #[inline]
    fn to_frame(&self) -> Result<i64, KeyframeError> {
        (**self).to_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_convert() {
        assert_eq!(7u8.to_frame(), Ok(7));
        assert_eq!((-3i32).to_frame(), Ok(-3));
        assert_eq!(12usize.to_frame(), Ok(12));
        assert!(u64::MAX.to_frame().is_err());
    }

    #[test]
    fn json_accepts_only_integers() {
        assert_eq!(json!(4).to_frame(), Ok(4));
        assert_eq!(json!(-4).to_frame(), Ok(-4));
        for bad in [json!(1.5), json!(2.0), json!("3"), json!(null), json!([1])] {
            let err = bad.to_frame().unwrap_err();
            assert!(matches!(err, KeyframeError::TypeKind { .. }), "{bad}");
        }
    }
}
