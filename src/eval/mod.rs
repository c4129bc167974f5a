//! Reference resolver: samples a context at one frame into concrete values.
//!
//! Downstream code generation never runs this; it exists to pin down what each node means so
//! rewrites can be checked against it.
pub(crate) mod resolve;
