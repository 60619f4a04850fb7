pub(crate) mod bindings;
pub(crate) mod page;
pub(crate) mod readiness;
