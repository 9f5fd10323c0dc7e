//! 块扫描器：识别整体被注释掉的配置块
//!
//! 单次前向遍历，唯一的可变状态是“未闭合块的起始行”。
//! - 单行块 `# locals { a = 1 }` 优先判定，直接产出 `(i, i)`；
//! - `# keyword ... {` 打开一个块，`# }` 关闭并产出 `(start, i)`；
//! - 块内部的其它行一律跳过，不支持嵌套；
//! - 文件结束时仍未闭合的块不产出任何结果。
use tracing::debug;

use crate::syntax::{has_balanced_braces, BLOCK_CLOSE, BLOCK_OPEN, SINGLE_LINE_BLOCK};

/// 0 起始的闭区间 `(start, end)`
pub type LineRange = (usize, usize);

/// 块扫描状态：每次扫描独立创建，扫描结束即丢弃
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BlockScanState {
    open_start: Option<usize>,
}

impl BlockScanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否处于未闭合块内
    pub fn is_open(&self) -> bool {
        self.open_start.is_some()
    }

    /// 输入第 `idx` 行，若恰好形成一个完整块则返回其区间
    pub fn feed(&mut self, idx: usize, line: &str) -> Option<LineRange> {
        if is_single_line_block(line) {
            // 外层块内部的单行块视为块体，保证区间互不重叠
            return match self.open_start {
                None => Some((idx, idx)),
                Some(_) => None,
            };
        }
        match self.open_start {
            None => {
                if BLOCK_OPEN.is_match(line) {
                    self.open_start = Some(idx);
                }
                None
            }
            Some(start) => {
                if BLOCK_CLOSE.is_match(line) {
                    self.open_start = None;
                    Some((start, idx))
                } else {
                    None
                }
            }
        }
    }

    /// 结束扫描；返回未闭合块的起始行（仅用于诊断，不产出区间）
    pub fn finish(self) -> Option<usize> {
        self.open_start
    }
}

fn is_single_line_block(line: &str) -> bool {
    SINGLE_LINE_BLOCK.is_match(line) && has_balanced_braces(line)
}

/// 扫描整份行序列，返回按起始行升序、互不重叠的 0 起始区间
pub fn scan_blocks<S: AsRef<str>>(lines: &[S]) -> Vec<LineRange> {
    let mut state = BlockScanState::new();
    let mut ranges = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        if let Some(range) = state.feed(idx, line.as_ref()) {
            ranges.push(range);
        }
    }
    if let Some(start) = state.finish() {
        debug!(start_line = start + 1, "unterminated commented block ignored");
    }
    ranges
}
