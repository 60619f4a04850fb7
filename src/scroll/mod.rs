pub(crate) mod progress;
pub(crate) mod scrub;
pub(crate) mod toggle;
pub(crate) mod trigger;
