use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 词典转换错误。I/O 错误都带上出错的文件路径。
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to open input dictionary {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create output dictionary {path}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 读失败（包括非 UTF-8 内容）。
    #[error("failed to read line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output at line {line}")]
    Write {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("failed to move finished output into place at {path}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 拼音库里查不到读音（`UnknownPolicy::Fail` 时）。
    #[error("no pinyin reading for {character:?} at line {line}")]
    UnknownCharacter { line: usize, character: char },
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
