// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros shared by the model types.

/// `Display` for a fieldless enum, one label per variant.
///
/// ```ignore
/// crate::simple_display! {
///     Source {
///         LiveQueue => "live queue",
///         SubmissionLog => "submission log",
///     }
/// }
/// ```
#[macro_export]
macro_rules! simple_display {
    ($enum:ty { $( $variant:ident => $label:expr ),+ $(,)? }) => {
        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let label = match self {
                    $( Self::$variant => $label, )+
                };
                f.write_str(label)
            }
        }
    };
}

/// Test builder for a record whose fields are mostly optional.
///
/// `set` fields take their value as-is; `option` fields start out as the
/// given default and their setters wrap `v.into()` in `Some`. Everything
/// generated is only compiled for tests and the `test-support` feature.
#[macro_export]
macro_rules! builder {
    (
        pub struct $builder:ident => $target:ident {
            set {
                $( $set_field:ident : $set_ty:ty = $set_default:expr ),* $(,)?
            }
            option {
                $( $opt_field:ident : $opt_ty:ty = $opt_default:expr ),* $(,)?
            }
        }
    ) => {
        #[cfg(any(test, feature = "test-support"))]
        pub struct $builder {
            $( $set_field: $set_ty, )*
            $( $opt_field: Option<$opt_ty>, )*
        }

        #[cfg(any(test, feature = "test-support"))]
        impl Default for $builder {
            fn default() -> Self {
                Self {
                    $( $set_field: $set_default, )*
                    $( $opt_field: $opt_default, )*
                }
            }
        }

        #[cfg(any(test, feature = "test-support"))]
        impl $builder {
            $(
                pub fn $set_field(mut self, v: $set_ty) -> Self {
                    self.$set_field = v;
                    self
                }
            )*

            $(
                pub fn $opt_field(mut self, v: impl Into<$opt_ty>) -> Self {
                    self.$opt_field = Some(v.into());
                    self
                }
            )*

            pub fn build(self) -> $target {
                $target {
                    $( $set_field: self.$set_field, )*
                    $( $opt_field: self.$opt_field, )*
                }
            }
        }
    };
}
