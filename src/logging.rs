use tracing_subscriber::{
    prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use tracing::{instrument, trace};

pub const DEFAULT_FILTER: &str = "guessword=info";

/// `RUST_LOG` wins over the configured filter, which wins over
/// [`DEFAULT_FILTER`].
pub fn env_filter(configured: Option<&str>) -> EnvFilter {
    select_filter(EnvFilter::try_from_default_env().ok(), configured)
}

fn select_filter(from_env: Option<EnvFilter>, configured: Option<&str>) -> EnvFilter {
    if let Some(filter) = from_env {
        return filter;
    }

    configured
        .and_then(|directives| match EnvFilter::try_new(directives) {
            Ok(filter) => Some(filter),
            Err(err) => {
                eprintln!("ignoring invalid log filter {directives:?}: {err}");
                None
            }
        })
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

#[instrument(skip_all)]
pub fn init_tracing(configured: Option<&str>) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter(configured))
        .init();

    trace!("finished");
}

#[cfg(test)]
mod tests {
    use super::{select_filter, DEFAULT_FILTER};
    use pretty_assertions::assert_eq;
    use tracing_subscriber::EnvFilter;

    #[test]
    fn env_wins_over_configured() {
        let from_env = Some(EnvFilter::new("guessword=trace"));
        let filter = select_filter(from_env, Some("guessword=debug"));

        assert_eq!(filter.to_string(), "guessword=trace");
    }

    #[test]
    fn configured_wins_over_default() {
        let filter = select_filter(None, Some("guessword=debug"));

        assert_eq!(filter.to_string(), "guessword=debug");
    }

    #[test]
    fn falls_back_to_default() {
        assert_eq!(select_filter(None, None).to_string(), DEFAULT_FILTER);
        assert_eq!(
            select_filter(None, Some("guessword=loudest")).to_string(),
            DEFAULT_FILTER
        );
    }
}
