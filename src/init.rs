use crate::core::Core;
use crate::layer::CoreLayer;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Configuration of the global subscriber installed by [`init_tracing_with_config`].
///
/// **Fields**
/// - `enable_stdout`: if `true`, a `tracing_subscriber::fmt::Layer` is added
///   next to the [`CoreLayer`] so events are also printed to the console.
///   Turn it off when the core already writes to stdout.
#[derive(Clone, Debug)]
pub struct InitConfig {
    pub enable_stdout: bool,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self { enable_stdout: true }
    }
}

/// Initialize the global `tracing` subscriber so that every event in the
/// process goes through `core`.
///
/// **Parameters**
/// - `core`: the core events are routed to, typically a
///   [`SentryCore`](crate::sentry_core::SentryCore) wrapping a
///   [`WriterCore`](crate::writer_core::WriterCore).
/// - `config`: [`InitConfig`] controlling console output.
///
/// **Returns**
/// - `Err(..)` if a global subscriber was already installed.
pub fn init_tracing_with_config(core: Box<dyn Core>, config: InitConfig) -> Result<(), SetGlobalDefaultError> {
    let layer = CoreLayer::new(core);

    // The subscriber types differ with and without the `fmt` layer, so
    // install each variant separately.
    if config.enable_stdout {
        let fmt_layer = tracing_subscriber::fmt::layer();
        let subscriber = Registry::default().with(layer).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = Registry::default().with(layer);
        tracing::subscriber::set_global_default(subscriber)
    }
}

/// Initialize tracing with [`InitConfig::default`].
pub fn init_tracing(core: Box<dyn Core>) -> Result<(), SetGlobalDefaultError> {
    init_tracing_with_config(core, InitConfig::default())
}
