//! Member paths
//!
//! - [`Key`] / [`Path`]: the steps addressing a location
//! - [`Member`]: a path plus display names, built with [`member`] / [`this`]
//! - [`resolve`] / [`exists`]: walking a [`Target`](crate::foundation::Target)

pub mod key;
pub mod member;
pub mod resolve;

pub use key::{Expansion, Key, Marker, Path, Quantifier, TreeSpec, Variadic};
pub use member::{Member, MemberName, member, this};
pub use resolve::{Resolved, exists, expand, resolve};
