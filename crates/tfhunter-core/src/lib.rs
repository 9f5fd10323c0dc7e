//! 被注释掉的 Terraform 配置检测库
//!
//! 设计要点：
//! - 检测引擎（分类器 / 块扫描器 / 块注释扫描器）是纯函数，只接收行序列与文件标识，
//!   不做任何 I/O，扫描状态在每次调用内创建并丢弃。
//! - 基于文本模式匹配而非语法树；未闭合块与嵌套块的漏检是既定行为。
//! - 遍历、读取、并行调度与报告输出位于外层，单文件失败不影响其余文件。

mod block_comments;
mod blocks;
mod classifier;
mod config;
mod engine;
mod error;
mod findings;
mod options;
mod report;
mod scan;
mod syntax;
mod types;

pub use block_comments::{scan_block_comments, BlockCommentState, ClosedComment};
pub use blocks::{scan_blocks, BlockScanState, LineRange};
pub use classifier::classify_line;
pub use config::{load_config, ConfigFile, DEFAULT_CONFIG_FILE};
pub use engine::{scan_lines, scan_text};
pub use error::{Result, ScanError};
pub use findings::aggregate;
pub use options::{OutputFormat, ScanOptions};
pub use report::{describe, ReportWriter, SUMMARY_CLEAN, SUMMARY_FOUND};
pub use scan::{collect_targets, display_path, scan_and_report, scan_and_report_from};
pub use syntax::{BLOCK_COMMENT_CLOSE, BLOCK_COMMENT_OPEN, CONFIG_KEYWORDS, LINE_MARKERS};
pub use types::{Finding, FindingKind, ScanStats};
