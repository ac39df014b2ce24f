use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// グローバルな `tracing` subscriber を初期化する。
///
/// stdout はMCPプロトコルが使うため、ログは必ず stderr に出す。
/// `RUST_LOG` が設定されていれば `default_level` より優先する。
pub fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);
    let subscriber = Registry::default().with(filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
