//! Resolves the commit SHA a GitHub Actions reusable workflow was called with.
//!
//! When a reusable workflow is called, the `github` context always describes the caller workflow.
//! A reusable workflow that checks out files from its own repository therefore needs to know which
//! version of itself the caller pinned. This crate looks that up through the `referenced_workflows`
//! of the caller's workflow run.

mod error;

pub mod cli;
pub mod env;
pub mod framework;
pub mod transactions;
pub mod workflow;

pub use error::Error;

/// A shorthand to define a statically allocated variable using a [`std::sync::LazyLock`].
///
/// # Examples
///
/// ```rust
/// use get_workflow_version::static_lazy_lock;
/// use std::sync::LazyLock;
///
/// static_lazy_lock! {
///     pub VAR_1: String = String::from("a static variable");
/// }
/// // ...equals to...
/// pub static VAR_2: LazyLock<String> = LazyLock::new(|| String::from("a static variable"));
///
/// assert_eq!(*VAR_1, *VAR_2);
/// ```
#[macro_export]
macro_rules! static_lazy_lock {
    ($(#[$meta:meta])* $vis:vis $name:ident: $type:ty = $expr:expr $(;)?) => {
        $(#[$meta])*
        $vis static $name: $crate::__priv_macro_use::LazyLock<$type> =
            $crate::__priv_macro_use::LazyLock::new(|| $expr);
    };
}

#[doc(hidden)]
pub mod __priv_macro_use {
    pub use std::sync::LazyLock;
}
