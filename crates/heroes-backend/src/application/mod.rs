pub(crate) mod ports;
pub(crate) mod token_refresh;
pub(crate) mod use_cases;
