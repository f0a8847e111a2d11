//! `shengmu`：把一个字的全部读音归类为声母码，并按首次出现顺序去重拼接。
//!
//! 归类规则（只看读音开头的一两个字母，不管声调数字）：
//! - 以 `a`/`e`/`o` 开头（零声母）-> `o`
//! - 以 `zh`/`ch`/`sh` 开头 -> 查 `SHENGMU_MAP`（`v`/`i`/`u`）
//! - 其余 -> 读音首字母本身

use std::fmt;

use crate::pronouncer::Pronouncer;

/// 翘舌声母 -> 单字母码。
pub const SHENGMU_MAP: [(&str, char); 3] = [("zh", 'v'), ("ch", 'i'), ("sh", 'u')];

/// 零声母统一归到的码。
pub const ZERO_INITIAL_CODE: char = 'o';

const ZERO_INITIALS: [char; 3] = ['a', 'e', 'o'];

/// 单个读音 -> 声母码；空串没有首字母，返回 `None`。
pub fn classify(pronunciation: &str) -> Option<char> {
    let first = pronunciation.chars().next()?;
    if ZERO_INITIALS.contains(&first) {
        return Some(ZERO_INITIAL_CODE);
    }
    let mapped = SHENGMU_MAP
        .iter()
        .find(|(prefix, _)| pronunciation.starts_with(prefix))
        .map(|&(_, code)| code);
    Some(mapped.unwrap_or(first))
}

/// 保序集合：重复插入被忽略，迭代顺序为首次插入顺序。
///
/// 码的个数很少（一个字通常 1-3 个读音），线性查重即可。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShengmuSet {
    codes: Vec<char>,
}

impl ShengmuSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入一个码；返回是否是新码。
    pub fn insert(&mut self, code: char) -> bool {
        if self.codes.contains(&code) {
            return false;
        }
        self.codes.push(code);
        true
    }

    pub fn contains(&self, code: char) -> bool {
        self.codes.contains(&code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

}

impl fmt::Display for ShengmuSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for code in &self.codes {
            write!(f, "{code}")?;
        }
        Ok(())
    }
}

impl FromIterator<char> for ShengmuSet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        let mut set = Self::new();
        for code in iter {
            set.insert(code);
        }
        set
    }
}

/// 推导一个字的声母码集合。
///
/// 读音查询交给 `Pronouncer`；查不到任何可用读音时返回 `None`，
/// 由调用方决定跳过还是报错。
pub fn derive<P>(pronouncer: &P, ch: char) -> Option<ShengmuSet>
where
    P: Pronouncer + ?Sized,
{
    let set: ShengmuSet = pronouncer
        .pronunciations(ch)
        .into_iter()
        .filter_map(classify)
        .collect();
    (!set.is_empty()).then_some(set)
}
