pub(crate) mod config;
pub(crate) mod http_client;
pub(crate) mod logging;
