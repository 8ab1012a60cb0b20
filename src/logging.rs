use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set. Output goes to stderr so that `--report json`
/// can be piped without log lines mixed in.
pub fn init_logger(verbose: bool) {
    let fallback = if verbose {
        "ingredient_checkr=debug"
    } else {
        "ingredient_checkr=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
