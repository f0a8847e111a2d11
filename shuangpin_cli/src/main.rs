use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use shuangpin_dict::{ConvertStats, convert_file};
use shuangpin_pinyin::PinyinPronouncer;

mod cli;
mod logging;

use crate::cli::Cli;
use crate::logging::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(error) = init_logging(cli.verbosity.tracing_level_filter()) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }
    exit_code(run(&cli))
}

/// 成功 -> 0；任何错误（含 I/O）打印完整错误链 -> 1。
fn exit_code(result: anyhow::Result<ConvertStats>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ConvertStats> {
    let config = cli.to_config();
    let pronouncer = PinyinPronouncer::new();
    convert_file(&config, &pronouncer).with_context(|| {
        format!(
            "converting {} to {}",
            config.input_path.display(),
            config.output_path.display()
        )
    })
}
