// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros for record setters.

/// Generate chained `Option` setters inside an `impl` block.
///
/// Each `name: Type` becomes `fn name(self, v: impl Into<Type>) -> Self`
/// storing `Some(v.into())`.
///
/// ```ignore
/// impl NewJobInfo {
///     ji_core::optional_setters! { status: String, corpus: String }
/// }
/// ```
#[macro_export]
macro_rules! optional_setters {
    ( $( $field:ident : $ty:ty ),* $(,)? ) => {
        $(
            pub fn $field(mut self, v: impl Into<$ty>) -> Self {
                self.$field = Some(v.into());
                self
            }
        )*
    };
}
