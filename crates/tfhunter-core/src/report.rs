//! 报告输出（文本 / 流式 JSON 数组）
use std::io::Write;

use crate::error::Result;
use crate::options::OutputFormat;
use crate::types::{Finding, FindingKind};

/// 有命中时的总结行
pub const SUMMARY_FOUND: &str = "❌ Commented-out Terraform code found.";
/// 无命中时的总结行
pub const SUMMARY_CLEAN: &str = "✅ No commented-out Terraform code found.";

/// 单条命中的人类可读描述
pub fn describe(f: &Finding) -> String {
    match f.kind {
        FindingKind::Line => format!(
            "{}:{}: Commented-out Terraform code detected: {}",
            f.file, f.start_line, f.first_text
        ),
        FindingKind::Block => format!(
            "{}:{}: Commented-out Terraform block detected (lines {}-{}).",
            f.file, f.start_line, f.start_line, f.end_line
        ),
        FindingKind::BlockComment => format!(
            "{}:{}: Commented-out Terraform code detected in /* ... */ block comment.",
            f.file, f.start_line
        ),
    }
}

/// 流式报告写出器：JSON 模式下负责数组起止符与逗号
pub struct ReportWriter<'w> {
    out: &'w mut dyn Write,
    format: OutputFormat,
    first: bool,
}

impl<'w> ReportWriter<'w> {
    pub fn begin(out: &'w mut dyn Write, format: OutputFormat) -> Result<Self> {
        if format == OutputFormat::Json {
            write!(out, "[")?;
        }
        Ok(Self { out, format, first: true })
    }

    pub fn write_finding(&mut self, f: &Finding) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", describe(f))?,
            OutputFormat::Json => {
                if !self.first {
                    write!(self.out, ",")?;
                }
                serde_json::to_writer(&mut *self.out, f)?;
            }
        }
        self.first = false;
        Ok(())
    }

    pub fn finish(self) -> Result<()> {
        if self.format == OutputFormat::Json {
            writeln!(self.out, "]")?;
        }
        self.out.flush()?;
        Ok(())
    }
}
