pub(crate) mod ids;
pub(crate) mod pagination;
pub(crate) mod palette;
