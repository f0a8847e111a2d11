use std::collections::HashMap;

/// 读音查询抽象：core 不关心拼音数据来自内置库/文件/网络。
///
/// 约定：
/// - 返回某个汉字的**全部**读音（含多音字），顺序即数据源给出的顺序
/// - 读音为“数字标调”形式（例如 `zhong1`），声母字母可以按位置读取
/// - 未收录的字返回空 `Vec`
pub trait Pronouncer: Send + Sync {
    fn pronunciations(&self, ch: char) -> Vec<&str>;
}

impl<P> Pronouncer for &P
where
    P: Pronouncer + ?Sized,
{
    fn pronunciations(&self, ch: char) -> Vec<&str> {
        (**self).pronunciations(ch)
    }
}

/// 内存读音表：测试用，也可以用来覆盖个别字的读音。
#[derive(Debug, Clone, Default)]
pub struct StaticPronouncer {
    table: HashMap<char, Vec<String>>,
}

impl StaticPronouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加读音；同一个字多次调用时按调用顺序累积（模拟多音字）。
    pub fn with(mut self, ch: char, readings: &[&str]) -> Self {
        self.insert(ch, readings);
        self
    }

    pub fn insert(&mut self, ch: char, readings: &[&str]) {
        self.table
            .entry(ch)
            .or_default()
            .extend(readings.iter().map(|r| (*r).to_string()));
    }
}

impl Pronouncer for StaticPronouncer {
    fn pronunciations(&self, ch: char) -> Vec<&str> {
        self.table
            .get(&ch)
            .map(|v| v.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
