//! 公共类型（对外暴露）
use serde::Serialize;

/// 命中类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// 单行：被注释掉的配置语句
    Line,
    /// 多行或单行的 `# keyword ... { ... }` 块
    Block,
    /// `/* ... */` 块注释中含配置内容
    BlockComment,
}

impl FindingKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FindingKind::Line => "line",
            FindingKind::Block => "block",
            FindingKind::BlockComment => "block_comment",
        }
    }
}

/// 单个命中（值对象，创建后不再修改）
///
/// 行号均为 1 起始，`start_line <= end_line`，单行命中时两者相等。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Finding {
    pub file: String,
    pub start_line: usize,
    pub end_line: usize,
    pub first_text: String,
    pub last_text: String,
    pub kind: FindingKind,
}

impl Finding {
    /// 由 0 起始的闭区间 `[start, end]` 构造命中，文本取首尾两行（去掉行尾空白）
    pub(crate) fn from_range<S: AsRef<str>>(
        file: &str,
        lines: &[S],
        start: usize,
        end: usize,
        kind: FindingKind,
    ) -> Self {
        debug_assert!(start <= end && end < lines.len());
        Self {
            file: file.to_string(),
            start_line: start + 1,
            end_line: end + 1,
            first_text: lines[start].as_ref().trim_end().to_string(),
            last_text: lines[end].as_ref().trim_end().to_string(),
            kind,
        }
    }

    /// 行号是否落在本命中范围内（1 起始）
    pub fn covers(&self, line: usize) -> bool {
        self.start_line <= line && line <= self.end_line
    }
}

/// 扫描统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub findings: usize,
}
