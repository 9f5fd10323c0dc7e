//! 扫描选项（模块）

/// 报告输出格式
/// - Text：逐行 `path:line: message`，适合终端与 pre-commit；
/// - Json：流式 JSON 数组，便于 CI 解析。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// 扫描选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// 遍历目录时保留的扩展名（不含点）
    pub extensions: Vec<String>,
    /// 遍历时整体跳过的目录名
    pub exclude: Vec<String>,
    /// 最大文件大小（字节）；超过则跳过
    pub max_file_size: Option<u64>,
    /// 线程数：None 表示自动（等于 CPU 核数）；Some(1) 走串行
    pub threads: Option<usize>,
    /// 是否折叠已被块命中覆盖的单行命中
    pub collapse: bool,
    pub format: OutputFormat,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["tf".to_string()],
            exclude: vec![".terraform".to_string(), ".git".to_string()],
            max_file_size: None,
            threads: None,
            collapse: false,
            format: OutputFormat::Text,
        }
    }
}
