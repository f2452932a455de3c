//! ログ初期化
//!
//! `RUST_LOG` があればそれに従い、無ければ `-v` で debug、通常は warn。
//! 表示出力を汚さないよう stderr に書く。

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // テストなどで二重初期化されても落とさない
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
