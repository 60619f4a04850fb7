pub(crate) mod executor;
pub(crate) mod policy;
pub(crate) mod registry;
