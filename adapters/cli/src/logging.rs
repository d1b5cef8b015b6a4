use env_logger::{Builder, Env};
use log::LevelFilter;

/// Installs the global logger.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` selects debug output and the
/// default shows info and above.
pub(crate) fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(level.to_string()));
    let _ = builder.try_init();
}
