pub(crate) mod brush_cache;
pub(crate) mod issues;
pub(crate) mod translation_session;
