//! 流式转换：region 分区 -> shengmu 推导 -> 逐行写出。

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use shuangpin_core::pronouncer::Pronouncer;
use shuangpin_core::region::{entry_key, split_regions};
use shuangpin_core::shengmu::derive;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::config::{ConvertConfig, UnknownPolicy};
use crate::error::{ConvertError, Result};

/// 一次转换的统计信息。行号从 1 开始。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    /// 原样拷贝的文件头行数
    pub header_lines: usize,
    /// 条目区行数（含空行）
    pub entry_lines: usize,
    /// 条目区里原样拷贝的空行
    pub blank_lines: usize,
    /// 查不到读音、输出了空声母码的字数（`UnknownPolicy::Skip`）
    pub skipped: usize,
    /// 触发字所在行；`None` 表示整份文件都是文件头
    pub trigger_line: Option<usize>,
}

/// 按 `\n` 切行且保留行尾（`BufRead::lines` 会吃掉换行符）；出错后不再继续读。
struct RawLines<R> {
    reader: R,
    failed: bool,
}

impl<R: BufRead> Iterator for RawLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(Ok(line)),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// 逐行转换 `reader` 到 `writer`。
///
/// - 文件头行原样写出（保留原换行符）
/// - 条目行写成 `<字> <声母码>\n`，行内其余内容丢弃
/// - 条目区的空行原样写出，保证输出行数与输入一致
pub fn convert_stream<R, W, P>(
    reader: R,
    mut writer: W,
    trigger: char,
    policy: UnknownPolicy,
    pronouncer: &P,
) -> Result<ConvertStats>
where
    R: BufRead,
    W: Write,
    P: Pronouncer + ?Sized,
{
    let mut stats = ConvertStats::default();
    let mut line_no = 0usize;
    let lines = RawLines {
        reader,
        failed: false,
    };

    for item in split_regions(lines, trigger) {
        line_no += 1;
        let (line, kind) = item.map_err(|source| ConvertError::Read {
            line: line_no,
            source,
        })?;
        let write_err = |source: io::Error| ConvertError::Write {
            line: line_no,
            source,
        };

        if !kind.is_entry() {
            stats.header_lines += 1;
            writer.write_all(line.as_bytes()).map_err(write_err)?;
            continue;
        }

        if stats.trigger_line.is_none() {
            debug!(line = line_no, %trigger, "entry region starts");
            stats.trigger_line = Some(line_no);
        }
        stats.entry_lines += 1;

        let Some(ch) = entry_key(&line) else {
            debug!(line = line_no, "blank line in entry region");
            stats.blank_lines += 1;
            writer.write_all(line.as_bytes()).map_err(write_err)?;
            continue;
        };

        let codes = match derive(pronouncer, ch) {
            Some(set) => set.to_string(),
            None => match policy {
                UnknownPolicy::Fail => {
                    return Err(ConvertError::UnknownCharacter {
                        line: line_no,
                        character: ch,
                    });
                }
                UnknownPolicy::Skip => {
                    warn!(line = line_no, character = %ch, "no pinyin reading, writing empty code");
                    stats.skipped += 1;
                    String::new()
                }
            },
        };
        writeln!(writer, "{ch} {codes}").map_err(write_err)?;
    }

    writer.flush().map_err(|source| ConvertError::Write {
        line: line_no,
        source,
    })?;
    Ok(stats)
}

/// 按 `config` 转换整个文件。
///
/// `atomic` 时先写到目标目录下的临时文件，成功后 rename；
/// 中途失败时目标文件保持原样，临时文件随 drop 删除。
pub fn convert_file<P>(config: &ConvertConfig, pronouncer: &P) -> Result<ConvertStats>
where
    P: Pronouncer + ?Sized,
{
    info!(
        input = %config.input_path.display(),
        output = %config.output_path.display(),
        trigger = %config.trigger,
        on_unknown = %config.on_unknown,
        atomic = config.atomic,
        "converting dictionary"
    );

    let input = File::open(&config.input_path).map_err(|source| ConvertError::Open {
        path: config.input_path.clone(),
        source,
    })?;
    let reader = BufReader::new(input);

    let stats = if config.atomic {
        let tmp = create_temp_for(&config.output_path).map_err(|source| ConvertError::Create {
            path: config.output_path.clone(),
            source,
        })?;
        let stats = convert_stream(
            reader,
            BufWriter::new(&tmp),
            config.trigger,
            config.on_unknown,
            pronouncer,
        )?;
        tmp.persist(&config.output_path)
            .map_err(|e| ConvertError::Persist {
                path: config.output_path.clone(),
                source: e.error,
            })?;
        stats
    } else {
        let output = File::create(&config.output_path).map_err(|source| ConvertError::Create {
            path: config.output_path.clone(),
            source,
        })?;
        convert_stream(
            reader,
            BufWriter::new(output),
            config.trigger,
            config.on_unknown,
            pronouncer,
        )?
    };

    if stats.trigger_line.is_none() {
        warn!(trigger = %config.trigger, "trigger never found, output is a verbatim copy");
    }
    info!(
        header_lines = stats.header_lines,
        entry_lines = stats.entry_lines,
        blank_lines = stats.blank_lines,
        skipped = stats.skipped,
        "dictionary converted"
    );
    Ok(stats)
}

/// 在目标目录下建临时文件，权限与直接 `File::create` 写出的结果一致：
/// 目标已存在时沿用它的权限，否则 0o666 经 umask 过滤。
fn create_temp_for(dest: &Path) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".shuangpin-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let tmp = builder.tempfile_in(output_dir(dest))?;
    if let Ok(meta) = fs::metadata(dest) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    Ok(tmp)
}

fn output_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use shuangpin_core::pronouncer::StaticPronouncer;

    use super::*;

    fn table() -> StaticPronouncer {
        StaticPronouncer::new()
            .with('的', &["de5", "di2", "di4"])
            .with('种', &["zhong1", "chong2"])
            .with('爱', &["ai4"])
            .with('是', &["shi4"])
    }

    fn run(input: &str, policy: UnknownPolicy) -> Result<(String, ConvertStats)> {
        let mut out = Vec::new();
        let stats = convert_stream(input.as_bytes(), &mut out, '的', policy, &table())?;
        Ok((String::from_utf8(out).unwrap(), stats))
    }

    #[test]
    fn headers_copied_entries_rewritten() {
        let input = "# a\n# b\nversion 1\n的 de5\n";
        let (out, stats) = run(input, UnknownPolicy::Fail).unwrap();
        assert_eq!(out, "# a\n# b\nversion 1\n的 d\n");
        assert_eq!(stats.header_lines, 3);
        assert_eq!(stats.entry_lines, 1);
        assert_eq!(stats.trigger_line, Some(4));
    }

    #[test]
    fn heteronyms_and_zero_initials() {
        let input = "的 de\n种 zhong chong\n爱 ai\n是 shi\n";
        let (out, _) = run(input, UnknownPolicy::Fail).unwrap();
        assert_eq!(out, "的 d\n种 vi\n爱 o\n是 u\n");
    }

    #[test]
    fn header_bytes_preserved_exactly() {
        let input = "head  with  spaces\r\n\n的 de5";
        let (out, _) = run(input, UnknownPolicy::Fail).unwrap();
        assert_eq!(out, "head  with  spaces\r\n\n的 d\n");
    }

    #[test]
    fn no_trigger_copies_everything() {
        let input = "a\nb\n种 zhong\n";
        let (out, stats) = run(input, UnknownPolicy::Fail).unwrap();
        assert_eq!(out, input);
        assert_eq!(stats.trigger_line, None);
        assert_eq!(stats.entry_lines, 0);
    }

    #[test]
    fn unknown_character_fails_with_line_number() {
        let input = "h\n的 de\n龘 da\n";
        let err = run(input, UnknownPolicy::Fail).unwrap_err();
        match err {
            ConvertError::UnknownCharacter { line, character } => {
                assert_eq!(line, 3);
                assert_eq!(character, '龘');
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_character_skipped_with_empty_code() {
        let input = "的 de\n龘 da\n爱 ai\n";
        let (out, stats) = run(input, UnknownPolicy::Skip).unwrap();
        assert_eq!(out, "的 d\n龘 \n爱 o\n");
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn blank_entry_lines_kept() {
        let input = "的 de\n\n爱 ai\n";
        let (out, stats) = run(input, UnknownPolicy::Fail).unwrap();
        assert_eq!(out, input.replace("de", "d").replace("ai", "o"));
        assert_eq!(stats.blank_lines, 1);
        assert_eq!(stats.header_lines + stats.entry_lines, 3);
    }

    #[test]
    fn invalid_utf8_is_read_error() {
        let input: &[u8] = b"ok\n\xff\xfe\n";
        let mut out = Vec::new();
        let err = convert_stream(input, &mut out, '的', UnknownPolicy::Fail, &table()).unwrap_err();
        assert!(matches!(err, ConvertError::Read { line: 2, .. }), "{err:?}");
    }

    #[test]
    fn output_dir_of_bare_file_name_is_cwd() {
        assert_eq!(output_dir(Path::new("out.txt")), Path::new("."));
        assert_eq!(output_dir(Path::new("a/out.txt")), Path::new("a"));
    }

    /// 不以触发字开头、不含换行的任意行。
    fn header_line() -> impl Strategy<Value = String> {
        "[^\r\n]{0,24}".prop_filter("header must not start with the trigger", |l| {
            !l.starts_with('的')
        })
    }

    /// 条目行：已知字 + 任意尾巴，或空行。
    fn entry_line() -> impl Strategy<Value = String> {
        prop_oneof![
            4 => (prop::sample::select(vec!['的', '种', '爱', '是']), "[^\r\n]{0,16}")
                .prop_map(|(ch, rest)| format!("{ch}{rest}")),
            1 => Just(String::new()),
        ]
    }

    proptest! {
        #[test]
        fn header_lines_round_trip_verbatim(
            headers in prop::collection::vec(header_line(), 0..12),
            crlf in any::<bool>()
        ) {
            let eol = if crlf { "\r\n" } else { "\n" };
            let header: String = headers.iter().map(|l| format!("{l}{eol}")).collect();
            let input = format!("{header}的 de5\n");

            let (out, stats) = run(&input, UnknownPolicy::Fail).unwrap();
            prop_assert!(out.starts_with(&header));
            prop_assert_eq!(&out[header.len()..], "的 d\n");
            prop_assert_eq!(stats.header_lines, headers.len());
        }

        #[test]
        fn line_count_is_preserved(
            headers in prop::collection::vec(header_line(), 0..6),
            entries in prop::collection::vec(entry_line(), 0..24)
        ) {
            let mut input: String = headers.iter().map(|l| format!("{l}\n")).collect();
            input.push_str("的 de5\n");
            for e in &entries {
                input.push_str(e);
                input.push('\n');
            }

            let (out, stats) = run(&input, UnknownPolicy::Fail).unwrap();
            prop_assert_eq!(out.split_inclusive('\n').count(), input.split_inclusive('\n').count());
            prop_assert_eq!(stats.entry_lines, entries.len() + 1);
            let out_keys: Vec<Option<char>> = out
                .split_inclusive('\n')
                .skip(headers.len())
                .map(entry_key)
                .collect();
            let in_keys: Vec<Option<char>> = input
                .split_inclusive('\n')
                .skip(headers.len())
                .map(entry_key)
                .collect();
            prop_assert_eq!(out_keys, in_keys);
        }
    }
}
