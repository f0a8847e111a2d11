//! 拼音读音数据：基于 `pinyin` crate 的多音字表，输出“声调数字在末尾”的形式（`zhong1`）。

use pinyin::ToPinyinMulti;
use shuangpin_core::pronouncer::Pronouncer;

/// 内置拼音库实现的 `Pronouncer`。
///
/// - 多音字返回全部读音，顺序与拼音库一致（常用读音在前）
/// - 非汉字或未收录的字返回空
#[derive(Debug, Clone, Copy, Default)]
pub struct PinyinPronouncer;

impl PinyinPronouncer {
    pub fn new() -> Self {
        Self
    }
}

impl Pronouncer for PinyinPronouncer {
    fn pronunciations(&self, ch: char) -> Vec<&str> {
        let Some(multi) = ch.to_pinyin_multi() else {
            return Vec::new();
        };
        multi.into_iter().map(|p| p.with_tone_num_end()).collect()
    }
}
