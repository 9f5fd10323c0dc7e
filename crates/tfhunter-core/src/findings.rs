//! 命中项排序与聚合

use crate::types::{Finding, FindingKind};

/// 对单文件命中进行稳定排序：起始行升序 → 类型（line < block < block_comment）→ 结束行升序
pub(crate) fn sort_findings_stable(findings: &mut [Finding]) {
    findings.sort_by(|a, b| {
        a.start_line
            .cmp(&b.start_line)
            .then(a.kind.cmp(&b.kind))
            .then(a.end_line.cmp(&b.end_line))
    });
}

/// 合并三个检测器拼接后的输出：
/// - 稳定排序并去除完全相同的命中；
/// - `collapse` 为真时，丢弃已被块/块注释命中覆盖的单行命中。
pub fn aggregate(mut findings: Vec<Finding>, collapse: bool) -> Vec<Finding> {
    sort_findings_stable(&mut findings);
    findings.dedup();
    if !collapse {
        return findings;
    }
    let spans: Vec<(usize, usize)> = findings
        .iter()
        .filter(|f| f.kind != FindingKind::Line)
        .map(|f| (f.start_line, f.end_line))
        .collect();
    findings.retain(|f| {
        f.kind != FindingKind::Line
            || !spans.iter().any(|&(s, e)| s <= f.start_line && f.start_line <= e)
    });
    findings
}
