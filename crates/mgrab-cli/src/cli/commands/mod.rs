//! Command implementations, one file per subcommand.

mod clear;
mod download;
mod filters;
mod list;
mod panel_mode;
mod session;
mod watch;

pub use clear::run_clear;
pub use download::run_download;
pub use filters::run_set_filters;
pub use list::run_list;
pub use panel_mode::run_panel_mode;
pub use session::{run_start, run_status, run_stop};
pub use watch::run_watch;

pub(crate) use filters::filter_config_from_args;
