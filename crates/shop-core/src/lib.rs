//! Typed access to the SHOP hydro-thermal optimization engine.
//!
//! The engine itself is a closed native component. This crate sits on its
//! call boundary and turns the engine's flat, per-type payloads into typed
//! values:
//!
//! - [`time`]: engine time strings (`YYYYMMDDHHMMSS` and shorter prefixes)
//!   to and from calendar timestamps.
//! - [`marshal`]: attribute payloads to and from scalars, arrays, curves and
//!   time series, dispatched on an [`AttributeTypeTag`].
//! - [`api`]: the [`ShopApi`] trait the host implements for its engine binding.
//! - [`memory`]: an in-memory [`ShopApi`] loaded from JSON snapshots.
//!
//! # Example
//!
//! ```
//! use shop_core::memory::{MemoryApi, TimeState};
//! use shop_core::{get_attribute_value, AttributeRef, AttributeTypeTag, ShopApi};
//!
//! let mut api = MemoryApi::new(TimeState::default());
//! let attr = AttributeRef::new("reservoir", "Rsv1", "vol_head");
//! api.set_xy_curve(&attr, 0.0, &[0.0, 10.0], &[90.0, 100.0]).unwrap();
//!
//! let curve = get_attribute_value(&api, &attr, AttributeTypeTag::Xy)
//!     .unwrap()
//!     .into_xy()
//!     .unwrap();
//! assert_eq!(curve.values(), [90.0, 100.0]);
//! ```

pub mod api;
pub mod attribute;
pub mod error;
pub mod marshal;
pub mod memory;
pub mod series;
pub mod time;

pub use api::ShopApi;
pub use attribute::{AttributeRef, AttributeTypeTag, AttributeValue};
pub use error::{ShopError, ShopResult};
pub use marshal::{get_attribute_value, get_time_resolution, set_attribute, TimeResolution};
pub use series::{Series, SyCurve, TimeSeries, XyCurve};
pub use time::{get_shop_datetime, get_shop_timestring, ShopDateTime, TimeUnit};
