//! Keyframe Map Core
//!
//! A sparse keyframe map for range-based annotations: values are stored at a
//! few explicit frames and read back at any frame of an inclusive
//! `[start, end]` range with hold-last-value semantics.
//!
//! ```
//! use keyframe_map_core::{KeyframeMap, Value, ValueKind};
//!
//! let mut occluded = KeyframeMap::<Value>::with_bounds(ValueKind::Bool, 0, 5);
//! occluded.insert(1, Value::Bool(false)).unwrap();
//! occluded.insert(4, Value::Bool(true)).unwrap();
//!
//! assert_eq!(occluded.get(3).unwrap(), Value::Bool(false));
//! assert_eq!(occluded.get(5).unwrap(), Value::Bool(true));
//! assert_eq!(occluded.count(), 6);
//! ```

pub mod config;
pub mod error;
pub mod iter;
pub mod map;
pub mod position;
pub mod value;

pub use config::MapConfig;
pub use error::KeyframeError;
pub use iter::{Items, OrderedPositions, Values};
pub use map::{AccessHook, KeyframeMap};
pub use position::FramePosition;
pub use value::{Keyed, Value, ValueKind};

/// Keyframe map result type
pub type Result<T> = core::result::Result<T, KeyframeError>;
