pub(crate) mod dto;
