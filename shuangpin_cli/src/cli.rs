//! 命令行参数。每个参数都可以用环境变量覆盖，默认值等价于最初写死的配置。

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use shuangpin_core::region::DEFAULT_TRIGGER;
use shuangpin_dict::config::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
use shuangpin_dict::{ConvertConfig, UnknownPolicy};

#[derive(Debug, Parser)]
#[command(
    name = "gen_shuangpin_dict",
    version,
    about = "Generate a shuangpin initials dictionary from a pinyin search dictionary",
    long_about = "Copy the header of a pinyin search dictionary verbatim, then rewrite every \
                  entry line from the trigger character onward as `<char> <initial codes>`.\n\n\
                  Initial codes: zh -> v, ch -> i, sh -> u, a/e/o -> o, otherwise the first letter. \
                  Heteronyms contribute one code per distinct initial, in reading order."
)]
pub struct Cli {
    /// Source pinyin dictionary.
    #[arg(
        short,
        long,
        value_name = "PATH",
        env = "SHUANGPIN_INPUT",
        default_value = DEFAULT_INPUT_PATH
    )]
    pub input: PathBuf,

    /// Destination shuangpin dictionary.
    #[arg(
        short,
        long,
        value_name = "PATH",
        env = "SHUANGPIN_OUTPUT",
        default_value = DEFAULT_OUTPUT_PATH
    )]
    pub output: PathBuf,

    /// First character of the first entry line; earlier lines are copied as-is.
    #[arg(
        long,
        value_name = "CHAR",
        env = "SHUANGPIN_TRIGGER",
        default_value_t = DEFAULT_TRIGGER,
        value_parser = parse_trigger
    )]
    pub trigger: char,

    /// What to do with characters that have no pinyin reading.
    #[arg(long, value_enum, default_value_t = UnknownArg::Fail)]
    pub on_unknown: UnknownArg,

    /// Write the destination in place instead of via a temporary file.
    #[arg(long)]
    pub no_atomic: bool,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnknownArg {
    /// Abort with an error naming the line.
    Fail,
    /// Write the character with an empty code.
    Skip,
}

impl From<UnknownArg> for UnknownPolicy {
    fn from(arg: UnknownArg) -> Self {
        match arg {
            UnknownArg::Fail => UnknownPolicy::Fail,
            UnknownArg::Skip => UnknownPolicy::Skip,
        }
    }
}

impl Cli {
    pub fn to_config(&self) -> ConvertConfig {
        ConvertConfig::new(&self.input, &self.output)
            .trigger(self.trigger)
            .on_unknown(self.on_unknown.into())
            .atomic(!self.no_atomic)
    }
}

fn parse_trigger(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_whitespace() => Ok(c),
        _ => Err(format!("expected exactly one non-space character, got {s:?}")),
    }
}
