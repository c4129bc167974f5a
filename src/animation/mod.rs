pub(crate) mod anim;
pub(crate) mod ease;
pub(crate) mod time;
