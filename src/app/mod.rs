//! CLI helpers: reading the domain list, progress logging, Ctrl-C handling
//! and the final summary.

pub mod input;
pub mod logging;
pub mod shutdown;
pub mod statistics;

pub use input::{parse_domain_list, read_domain_list};
pub use logging::progress_logger;
pub use shutdown::{shutdown_gracefully, stop_on_ctrl_c};
pub use statistics::{print_final_summary, print_recommendations};
