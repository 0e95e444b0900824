pub(crate) mod compare_store;
pub(crate) mod heroes_store;
pub(crate) mod ports;
