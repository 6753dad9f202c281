use std::collections::VecDeque;
use std::env;
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::random::{check_int_range, check_real_range, RandSource};
use crate::domain::DomainResult;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "trace");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["config", "toml"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// `RandSource` replaying scripted values.
///
/// Each draw takes the next scripted value and clamps it into the requested
/// range; once a queue runs dry, draws return the range minimum. Range checks
/// still apply, so invalid requests fail like they do with a real source.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    ints: VecDeque<i64>,
    reals: VecDeque<f64>,
}

impl ScriptedRandom {
    pub fn new(ints: Vec<i64>, reals: Vec<f64>) -> Self {
        Self {
            ints: ints.into(),
            reals: reals.into(),
        }
    }
}

impl RandSource for ScriptedRandom {
    fn random_int(&mut self, min: i64, max: i64) -> DomainResult<i64> {
        check_int_range(min, max)?;
        Ok(self.ints.pop_front().map_or(min, |v| v.clamp(min, max)))
    }

    fn random_real(&mut self, min: f64, max: f64) -> DomainResult<f64> {
        check_real_range(min, max)?;
        Ok(self.reals.pop_front().map_or(min, |v| v.clamp(min, max)))
    }
}
