//! Macros for exposing user types to the engine.
//!
//! # Available Macros
//!
//! - [`record!`]: implement [`Target`](crate::foundation::Target) for a
//!   struct with named fields
//!
//! # Examples
//!
//! ```rust,ignore
//! use verdict::record;
//!
//! struct Address {
//!     city: String,
//!     zip: u32,
//! }
//!
//! struct Person {
//!     name: String,
//!     age: u8,
//!     address: Address,
//!     tags: Vec<String>,
//! }
//!
//! record!(Address { city, zip });
//! record!(Person { name, age, address, tags });
//! ```

// ============================================================================
// RECORD MACRO
// ============================================================================

/// Implements `Target` for a struct by listing the fields the engine may
/// see.
///
/// Every listed field must itself implement `Target`. Fields are addressed
/// by name (`member("address").key("city")`), counted by `size` and iterated
/// in declaration order by `ANY` / `ALL`. Unlisted fields are invisible.
///
/// ```rust,ignore
/// record!(Person { name, age });
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::foundation::Target for $ty {
            fn child(
                &self,
                key: &$crate::path::Key,
            ) -> ::core::option::Option<&dyn $crate::foundation::Target> {
                match key {
                    $crate::path::Key::Name(name) => match ::core::convert::AsRef::<str>::as_ref(name) {
                        $(
                            ::core::stringify!($field) => ::core::option::Option::Some(
                                &self.$field as &dyn $crate::foundation::Target,
                            ),
                        )*
                        _ => ::core::option::Option::None,
                    },
                    _ => ::core::option::Option::None,
                }
            }

            fn size(&self) -> ::core::option::Option<usize> {
                let names: &[&str] = &[$(::core::stringify!($field)),*];
                ::core::option::Option::Some(names.len())
            }

            fn elements(
                &self,
            ) -> ::core::option::Option<$crate::foundation::Elements<'_>> {
                let fields: ::std::vec::Vec<(
                    $crate::path::Key,
                    &dyn $crate::foundation::Target,
                )> = ::std::vec![
                    $((
                        $crate::path::Key::name(::core::stringify!($field)),
                        &self.$field as &dyn $crate::foundation::Target,
                    )),*
                ];
                ::core::option::Option::Some(::std::boxed::Box::new(fields.into_iter()))
            }
        }
    };
}
