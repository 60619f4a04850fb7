pub(crate) mod ease;
pub(crate) mod intro;
pub(crate) mod ops;
pub(crate) mod phase;
pub(crate) mod presets;
