//! 扫描主流程与并行调度
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::engine::{read_source, scan_text};
use crate::error::Result;
use crate::findings::aggregate;
use crate::options::ScanOptions;
use crate::report::ReportWriter;
use crate::types::{Finding, ScanStats};

/// 单个文件的扫描结果
#[derive(Debug)]
enum FileOutcome {
    Scanned(Vec<Finding>),
    Skipped,
    Failed,
}

/// 收集待扫描文件
/// - 文件参数直接加入（不看扩展名，适配 pre-commit 传入的文件列表）；
/// - 目录参数递归遍历，按扩展名过滤并跳过 `exclude` 中的目录；
/// - 不存在的路径记录告警并计入 `files_failed`。
///
/// 结果去重并排序，确保输出顺序可复现。
pub fn collect_targets(paths: &[PathBuf], opts: &ScanOptions, stats: &mut ScanStats) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = vec![];
    for root in paths {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        if !root.is_dir() {
            warn!(path = %root.display(), "path does not exist, skipping");
            stats.files_failed += 1;
            continue;
        }
        let walker = WalkDir::new(root).follow_links(false).into_iter().filter_entry(|e| {
            // 根目录本身不参与排除判断
            e.depth() == 0
                || !(e.file_type().is_dir()
                    && e.file_name().to_str().is_some_and(|n| opts.exclude.iter().any(|x| x == n)))
        });
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "failed to walk directory entry");
                    continue;
                }
            };
            if entry.file_type().is_file() && has_wanted_extension(entry.path(), opts) {
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    files.dedup();
    files
}

fn has_wanted_extension(path: &Path, opts: &ScanOptions) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| opts.extensions.iter().any(|x| x == e))
}

/// 输出中使用的文件标识：尽量取相对当前目录的路径
pub fn display_path(path: &Path, base: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    let rel = rel.strip_prefix(".").unwrap_or(rel);
    rel.to_string_lossy().replace('\\', "/")
}

fn scan_one(path: &Path, base: &Path, opts: &ScanOptions) -> FileOutcome {
    if let Some(max) = opts.max_file_size {
        if let Ok(md) = std::fs::metadata(path) {
            if md.len() > max {
                debug!(path = %path.display(), size = md.len(), "file exceeds max size, skipping");
                return FileOutcome::Skipped;
            }
        }
    }
    match read_source(path) {
        Ok(Some(text)) => {
            let file_id = display_path(path, base);
            FileOutcome::Scanned(aggregate(scan_text(&file_id, &text), opts.collapse))
        }
        Ok(None) => {
            debug!(path = %path.display(), "binary file, skipping");
            FileOutcome::Skipped
        }
        Err(e) => {
            warn!(error = %e, "skipping file");
            FileOutcome::Failed
        }
    }
}

fn emit(outcome: FileOutcome, report: &mut ReportWriter<'_>, stats: &mut ScanStats) -> Result<()> {
    match outcome {
        FileOutcome::Scanned(findings) => {
            stats.files_scanned += 1;
            for f in &findings {
                stats.findings += 1;
                report.write_finding(f)?;
            }
        }
        FileOutcome::Skipped => stats.files_skipped += 1,
        FileOutcome::Failed => stats.files_failed += 1,
    }
    Ok(())
}

/// 扫描给定路径并把报告流式写入 `out`
///
/// 稳定性保证：文件按路径排序；文件内命中按（起始行, 类型, 结束行）排序。
/// 无论串行还是并行，输出完全一致。
pub fn scan_and_report(paths: &[PathBuf], out: &mut dyn Write, opts: &ScanOptions) -> Result<ScanStats> {
    let base = std::env::current_dir().unwrap_or_default();
    scan_and_report_from(paths, &base, out, opts)
}

/// 同 [`scan_and_report`]，文件标识相对于 `base` 计算
pub fn scan_and_report_from(
    paths: &[PathBuf],
    base: &Path,
    out: &mut dyn Write,
    opts: &ScanOptions,
) -> Result<ScanStats> {
    let mut stats = ScanStats::default();
    let default_roots = [PathBuf::from(".")];
    let roots = if paths.is_empty() { &default_roots[..] } else { paths };
    let files = collect_targets(roots, opts, &mut stats);
    debug!(files = files.len(), "collected scan targets");

    let mut report = ReportWriter::begin(out, opts.format)?;

    // 决策：线程数>1 且文件数>1 时走并行调度；否则串行
    let threads = opts.threads.unwrap_or_else(num_cpus::get);
    if threads > 1 && files.len() > 1 {
        scan_parallel(files, base, opts, &mut report, &mut stats, threads)?;
    } else {
        for path in &files {
            emit(scan_one(path, base, opts), &mut report, &mut stats)?;
        }
    }

    report.finish()?;
    Ok(stats)
}

/// 并行调度：
/// - Rayon 线程池并行扫描，结果带上文件下标经通道送回；
/// - 当前线程作为唯一 Writer，按下标重排后流式输出，保证顺序稳定。
fn scan_parallel(
    files: Vec<PathBuf>,
    base: &Path,
    opts: &ScanOptions,
    report: &mut ReportWriter<'_>,
    stats: &mut ScanStats,
    threads: usize,
) -> Result<()> {
    use crossbeam_channel as channel;
    use rayon::prelude::*;
    use std::collections::BTreeMap;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;

    type Msg = (usize /*idx*/, FileOutcome);
    let (tx, rx) = channel::bounded::<Msg>(256);

    // 为防止 report 的跨线程所有权问题，Writer 保持在当前线程
    // 扫描在后台线程内的 Rayon 线程池执行
    let base = Arc::new(base.to_path_buf());
    let opts = Arc::new(opts.clone());
    let scan_thread = std::thread::spawn(move || {
        pool.install(|| {
            files.par_iter().enumerate().for_each_with(tx, |tx, (idx, path)| {
                let _ = tx.send((idx, scan_one(path, &base, &opts)));
            });
        });
        // 结束后 Sender 全部被丢弃，Receiver 将收到关闭信号
    });

    // Writer：维护 next_idx 与缓存，按序输出
    let mut next_idx: usize = 0;
    let mut pending: BTreeMap<usize, FileOutcome> = BTreeMap::new();
    let mut write_result = Ok(());
    while let Ok((idx, outcome)) = rx.recv() {
        pending.insert(idx, outcome);
        while let Some(outcome) = pending.remove(&next_idx) {
            if write_result.is_ok() {
                write_result = emit(outcome, report, stats);
            }
            next_idx += 1;
        }
    }

    if scan_thread.join().is_err() {
        warn!("scan worker panicked");
    }
    write_result
}
