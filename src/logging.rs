use tracing::Level;

/// Max log level for the number of `-v` flags; WARN when none are given.
#[must_use]
pub fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. Logs go to stderr, stdout only carries results.
pub fn init(verbose: u8) {
    let installed = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(level_for(verbose))
        .try_init();
    if let Err(err) = installed {
        eprintln!("failed to install log subscriber: {err}");
    }
}
