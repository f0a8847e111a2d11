//! `shuangpin_dict`：把拼音检索词典（`pinyin_search.dict.txt`）转换成双拼声母词典。
//!
//! 文件格式（逐行）：
//!
//! - 触发字之前：文件头/元数据，原样拷贝（包括原来的换行符）
//! - 触发字开始：每行首字符是词典 key，其余内容丢弃，输出为 `<字> <声母码>\n`
//!
//! 处理是流式的：读一行写一行，不会把整个词典读进内存。
pub mod config;
pub mod convert;
pub mod error;

pub use config::{ConvertConfig, UnknownPolicy};
pub use convert::{ConvertStats, convert_file, convert_stream};
pub use error::ConvertError;
