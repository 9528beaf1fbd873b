//! Process-wide setup: logging and the DNS resolver.

mod logger;
mod resolver;

pub use logger::init_logger_with;
pub use resolver::init_resolver;
