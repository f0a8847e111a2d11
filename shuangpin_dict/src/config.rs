use std::fmt;
use std::path::PathBuf;

use shuangpin_core::region::DEFAULT_TRIGGER;

pub const DEFAULT_INPUT_PATH: &str = "pinyin_search.dict.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "shuangpin_search.dict.txt";

/// 拼音库查不到某个字时的处理方式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownPolicy {
    /// 立即报错，输出文件不完整（`atomic` 时不会落盘）
    #[default]
    Fail,
    /// 输出空声母码 `<字> \n` 并记一条 warn
    Skip,
}

impl fmt::Display for UnknownPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnknownPolicy::Fail => "fail",
            UnknownPolicy::Skip => "skip",
        })
    }
}

/// 一次转换的全部参数；`Default` 等价于最初写死的路径与触发字。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// 源词典
    pub input_path: PathBuf,
    /// 目标词典
    pub output_path: PathBuf,
    /// 文件头/条目分界字
    pub trigger: char,
    pub on_unknown: UnknownPolicy,
    /// 先写临时文件，成功后再 rename 到目标路径
    pub atomic: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            trigger: DEFAULT_TRIGGER,
            on_unknown: UnknownPolicy::default(),
            atomic: true,
        }
    }
}

impl ConvertConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    pub fn trigger(mut self, trigger: char) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn on_unknown(mut self, policy: UnknownPolicy) -> Self {
        self.on_unknown = policy;
        self
    }

    pub fn atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_behaviour() {
        let c = ConvertConfig::default();
        assert_eq!(c.input_path, PathBuf::from("pinyin_search.dict.txt"));
        assert_eq!(c.output_path, PathBuf::from("shuangpin_search.dict.txt"));
        assert_eq!(c.trigger, '的');
        assert_eq!(c.on_unknown, UnknownPolicy::Fail);
        assert!(c.atomic);
    }

    #[test]
    fn builder_overrides() {
        let c = ConvertConfig::new("in.txt", "out.txt")
            .trigger('一')
            .on_unknown(UnknownPolicy::Skip)
            .atomic(false);
        assert_eq!(c.input_path, PathBuf::from("in.txt"));
        assert_eq!(c.trigger, '一');
        assert_eq!(c.on_unknown, UnknownPolicy::Skip);
        assert!(!c.atomic);
    }

    #[test]
    fn policy_display_matches_cli_values() {
        assert_eq!(UnknownPolicy::Fail.to_string(), "fail");
        assert_eq!(UnknownPolicy::Skip.to_string(), "skip");
    }
}
