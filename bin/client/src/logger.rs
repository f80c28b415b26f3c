/// Initialize the client logger. Results go to stdout, so only warnings
/// are logged unless `RUST_LOG` asks for more.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}
