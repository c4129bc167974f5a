//! Visibility segmentation and Z-layer grouping.
pub(crate) mod groups;
pub(crate) mod segments;
