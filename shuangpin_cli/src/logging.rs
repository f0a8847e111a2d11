//! 日志初始化：`tracing-subscriber` 输出到 stderr。
//!
//! 默认级别来自 `-v`/`-q`；设置了 `RUST_LOG` 时以环境变量为准。

use std::io;

use anyhow::anyhow;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub fn init_logging(level: LevelFilter) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!(e))
}
