pub mod checker;
pub mod cli;
pub mod netutils;
pub mod probes;
pub mod record;
pub mod sweep;
pub mod types;

pub use sweep::run;

/// Install a fmt subscriber honoring RUST_LOG. No-op if one is already set.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
