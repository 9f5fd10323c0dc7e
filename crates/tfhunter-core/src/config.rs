//! 配置文件加载（TOML）
//!
//! 优先级：内置默认值 < 配置文件 < 命令行参数。
//! 关键字与注释标记不可配置。
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScanError};
use crate::options::{OutputFormat, ScanOptions};

/// 默认配置文件名（在当前目录查找）
pub const DEFAULT_CONFIG_FILE: &str = ".tfhunter.toml";

/// 配置文件结构，所有字段可选
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub max_file_size: Option<u64>,
    #[serde(default)]
    pub threads: Option<usize>,
    #[serde(default)]
    pub collapse: Option<bool>,
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

impl ConfigFile {
    pub fn parse(path: &Path, txt: &str) -> Result<Self> {
        toml::from_str(txt).map_err(|source| ScanError::ConfigParse { path: path.to_path_buf(), source })
    }

    /// 将配置覆盖到选项上（仅覆盖文件中出现的字段）
    pub fn apply(self, opts: &mut ScanOptions) {
        if let Some(exts) = self.extensions {
            // 兼容 ".tf" 与 "tf" 两种写法
            opts.extensions = exts.into_iter().map(|e| e.trim_start_matches('.').to_string()).collect();
        }
        if let Some(exclude) = self.exclude {
            opts.exclude = exclude;
        }
        if self.max_file_size.is_some() {
            opts.max_file_size = self.max_file_size;
        }
        if let Some(n) = self.threads {
            opts.threads = if n == 0 { None } else { Some(n) };
        }
        if let Some(c) = self.collapse {
            opts.collapse = c;
        }
        if let Some(f) = self.format {
            opts.format = f;
        }
    }
}

/// 加载配置文件
/// - 显式给出路径时，读取或解析失败均为错误；
/// - 否则查找 `dir/.tfhunter.toml`，不存在时返回 `None`。
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<Option<(PathBuf, ConfigFile)>> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let p = dir.join(DEFAULT_CONFIG_FILE);
            if !p.is_file() {
                return Ok(None);
            }
            p
        }
    };
    let txt = std::fs::read_to_string(&path)
        .map_err(|source| ScanError::ConfigRead { path: path.clone(), source })?;
    let cfg = ConfigFile::parse(&path, &txt)?;
    Ok(Some((path, cfg)))
}
