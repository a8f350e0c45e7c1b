//! Composable matrix views with a push-based fill protocol and
//! threshold-gated parallel kernels.
//!
//! Physical stores ([`DenseStore`], [`SparseStore`]) hold elements. Logical
//! views in [`view`] decorate them without copying, and every view can push
//! itself into a [`Region`], which is how results are materialized. The
//! kernels in [`kernel`] do the heavy lifting on dense stores and split
//! their work with rayon once an operation is large enough.

pub mod aggregator;
pub mod dense;
pub mod error;
pub mod function;
pub mod kernel;
pub mod kind;
pub mod metrics;
pub mod pipeline;
pub mod quaternion;
pub mod region;
pub mod scalar;
pub mod sparse;
pub mod threading;
pub mod view;

pub use aggregator::Aggregator;
pub use dense::DenseStore;
pub use error::{CoreResult, Error};
pub use function::{BinaryOp, UnaryOp};
pub use kind::ScalarKind;
pub use metrics::{materialized_total, reset_materialized, take_materialized};
pub use pipeline::Pipeline;
pub use quaternion::Quaternion;
pub use region::{Region, RegionExt, RegionKind};
pub use scalar::Scalar;
pub use sparse::SparseStore;
pub use threading::{Op, Split};
pub use view::{LogicalBuilder, MatrixView, Storage};
