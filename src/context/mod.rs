//! Rendering contexts: the node model and the algebra over context runs.
pub(crate) mod brush;
pub(crate) mod compose;
pub(crate) mod node;
pub(crate) mod opacity;
pub(crate) mod order;
pub(crate) mod timebase;
pub(crate) mod value;
pub(crate) mod visibility;
