//! Threshold-gated dense kernels.
//!
//! Each kernel comes in a `*_with(split, …)` form taking an explicit
//! [`Split`](crate::threading::Split) and a plain form that uses the
//! configured policy for its [`Op`](crate::threading::Op). Shapes are
//! validated before any split or write.

pub mod aggregate;
pub mod eliminate;
pub mod hooks;
pub mod householder;
pub mod modify;
pub mod multiply;
pub mod rotation;
pub mod substitute;

pub use aggregate::{aggregate_all, aggregate_all_with, reduce_columns, reduce_rows};
pub use eliminate::{apply_cholesky, apply_ldl, apply_lu};
pub use hooks::{compute_in_place_schur, reduce_to_hessenberg, tridiagonalize};
pub use householder::{transform_left, transform_right, Householder};
pub use modify::{modify_all, modify_all_with};
pub use multiply::{multiply_into, multiply_into_with, select, Strategy};
pub use rotation::{rotate_left, rotate_right, Rotation};
pub use substitute::{substitute_backwards, substitute_forwards};
