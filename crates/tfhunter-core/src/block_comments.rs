//! 块注释扫描器：识别内容像配置的 `/* ... */` 注释
use tracing::debug;

use crate::classifier::classify_line;
use crate::syntax::{BARE_KEYWORD, BLOCK_COMMENT_CLOSE, BLOCK_COMMENT_OPEN, MIN_INLINE_BLOCK_COMMENT_LEN};
use crate::types::{Finding, FindingKind};

/// 已闭合的块注释：首行与尾行（0 起始）及是否含配置内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosedComment {
    pub start: usize,
    pub end: usize,
    pub has_config: bool,
}

/// 块注释扫描状态：是否处于注释内，以及已累积的行号
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BlockCommentState {
    buffer: Option<Vec<usize>>,
}

impl BlockCommentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_inside(&self) -> bool {
        self.buffer.is_some()
    }

    /// 输入第 `idx` 行；`lines` 为完整行序列，用于闭合时回看累积行
    pub fn feed<S: AsRef<str>>(&mut self, lines: &[S], idx: usize) -> Option<ClosedComment> {
        let trimmed = lines[idx].as_ref().trim();
        if trimmed.starts_with(BLOCK_COMMENT_OPEN) {
            // 新的起始符总是重新开始累积（丢弃此前未闭合的内容）
            let mut buffer = vec![idx];
            if trimmed.ends_with(BLOCK_COMMENT_CLOSE)
                && trimmed.chars().count() > MIN_INLINE_BLOCK_COMMENT_LEN
            {
                buffer.push(idx);
                self.buffer = None;
                return Some(close(lines, &buffer));
            }
            self.buffer = Some(buffer);
            return None;
        }
        let buffer = self.buffer.as_mut()?;
        buffer.push(idx);
        if trimmed.contains(BLOCK_COMMENT_CLOSE) {
            let buffer = self.buffer.take().unwrap_or_default();
            return Some(close(lines, &buffer));
        }
        None
    }

    /// 结束扫描；返回未闭合注释的起始行（仅用于诊断）
    pub fn finish(self) -> Option<usize> {
        self.buffer.and_then(|b| b.first().copied())
    }
}

fn close<S: AsRef<str>>(lines: &[S], buffer: &[usize]) -> ClosedComment {
    let has_config = buffer.iter().any(|&i| {
        let l = lines[i].as_ref();
        classify_line(l) || BARE_KEYWORD.is_match(l)
    });
    ClosedComment {
        start: buffer.first().copied().unwrap_or_default(),
        end: buffer.last().copied().unwrap_or_default(),
        has_config,
    }
}

/// 扫描整份行序列，每个含配置内容的块注释产出一个命中（锚定在 `/*` 所在行）
pub fn scan_block_comments<S: AsRef<str>>(file: &str, lines: &[S]) -> Vec<Finding> {
    let mut state = BlockCommentState::new();
    let mut findings = Vec::new();
    for idx in 0..lines.len() {
        if let Some(c) = state.feed(lines, idx) {
            if c.has_config {
                findings.push(Finding::from_range(file, lines, c.start, c.end, FindingKind::BlockComment));
            }
        }
    }
    if let Some(start) = state.finish() {
        debug!(file, start_line = start + 1, "unterminated block comment ignored");
    }
    findings
}
