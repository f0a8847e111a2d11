//! `region`：把词典文件的行分成“文件头”与“字条目”两段。
//!
//! 约定：
//! - 第一行以触发字（默认 `的`）开头的行，连同它之后的**所有**行都是条目
//! - 之前的行原样保留
//! - 触发字从未出现时整份文件都是文件头
//!
//! 行来源通常是文件读取，可能出错，所以 `split_regions` 接受 `Result` 行流，
//! 读错误原样透传给调用方。

/// 默认触发字：字表按字频排序，第一个汉字条目是“的”。
pub const DEFAULT_TRIGGER: char = '的';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// 文件头/元数据，原样输出
    Header,
    /// 字条目，首字符是词典 key
    Entry,
}

impl LineKind {
    pub fn is_entry(self) -> bool {
        self == LineKind::Entry
    }
}

/// 逐行判定所在分区；进入条目区之后不再回退。
#[derive(Debug, Clone)]
pub struct RegionTracker {
    trigger: char,
    entered: bool,
}

impl Default for RegionTracker {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGER)
    }
}

impl RegionTracker {
    pub fn new(trigger: char) -> Self {
        Self {
            trigger,
            entered: false,
        }
    }

    pub fn classify(&mut self, line: &str) -> LineKind {
        if !self.entered && line.starts_with(self.trigger) {
            self.entered = true;
        }
        if self.entered {
            LineKind::Entry
        } else {
            LineKind::Header
        }
    }
}

/// 惰性分区迭代器：`Ok((line, kind))`，读错误不参与分区判定。
pub struct Regions<I> {
    lines: I,
    tracker: RegionTracker,
}

impl<I, S, E> Iterator for Regions<I>
where
    I: Iterator<Item = Result<S, E>>,
    S: AsRef<str>,
{
    type Item = Result<(S, LineKind), E>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };
        let kind = self.tracker.classify(line.as_ref());
        Some(Ok((line, kind)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.lines.size_hint()
    }
}

pub fn split_regions<I, S, E>(lines: I, trigger: char) -> Regions<I::IntoIter>
where
    I: IntoIterator<Item = Result<S, E>>,
    S: AsRef<str>,
{
    Regions {
        lines: lines.into_iter(),
        tracker: RegionTracker::new(trigger),
    }
}

/// 条目行的 key：去掉行尾换行后的首字符；空行没有 key。
pub fn entry_key(line: &str) -> Option<char> {
    line.trim_end_matches(['\r', '\n']).chars().next()
}
