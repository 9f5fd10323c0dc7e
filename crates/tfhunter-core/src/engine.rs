//! 检测引擎入口：把三个检测器的输出按固定顺序拼接
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::block_comments::scan_block_comments;
use crate::blocks::scan_blocks;
use crate::classifier::classify_line;
use crate::error::{Result, ScanError};
use crate::types::{Finding, FindingKind};

/// 对单个文件的行序列运行全部检测器
///
/// 输出顺序：单行命中 → 块命中 → 块注释命中，不做去重（由 [`crate::aggregate`] 负责）。
/// 纯函数，同一输入总得到相同结果。
pub fn scan_lines<S: AsRef<str>>(file: &str, lines: &[S]) -> Vec<Finding> {
    let mut findings: Vec<Finding> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if classify_line(line.as_ref()) {
            findings.push(Finding::from_range(file, lines, i, i, FindingKind::Line));
        }
    }

    findings.extend(
        scan_blocks(lines)
            .into_iter()
            .map(|(start, end)| Finding::from_range(file, lines, start, end, FindingKind::Block)),
    );
    findings.extend(scan_block_comments(file, lines));
    findings
}

/// 按行切分已解码的文本后扫描（`\n` 与 `\r\n` 均视为行结束）
pub fn scan_text(file: &str, text: &str) -> Vec<Finding> {
    let lines: Vec<&str> = text.lines().collect();
    scan_lines(file, &lines)
}

/// 读取源文件并按 UTF-8 解码
/// - 含 NUL 字节视为二进制，返回 `Ok(None)`；
/// - 非法 UTF-8 返回 `Decode` 错误，由调用方记录后继续。
pub(crate) fn read_source(path: &Path) -> Result<Option<String>> {
    let read_err = |source| ScanError::Read { path: path.to_path_buf(), source };
    let file = File::open(path).map_err(read_err)?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(read_err)?;

    if buf.contains(&0) {
        return Ok(None);
    }
    String::from_utf8(buf)
        .map(Some)
        .map_err(|_| ScanError::Decode { path: path.to_path_buf() })
}
