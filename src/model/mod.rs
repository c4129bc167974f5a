//! Boundary document model: an already-simplified Lottie composition, deserialized with serde.
pub(crate) mod composition;
pub(crate) mod layer;
pub(crate) mod shape;
