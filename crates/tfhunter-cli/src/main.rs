use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tfhunter_core::{load_config, scan_and_report, OutputFormat, ScanOptions, SUMMARY_CLEAN, SUMMARY_FOUND};
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "tfhunter", version, about = "Detect commented-out Terraform code")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 扫描文件或目录中被注释掉的 Terraform 配置
    Scan {
        /// 待扫描的文件或目录（默认当前目录）
        paths: Vec<PathBuf>,

        /// 输出格式
        #[arg(long, value_enum)]
        format: Option<Format>,

        /// 输出文件（默认标准输出）
        #[arg(long)]
        output: Option<PathBuf>,

        /// 配置文件路径（TOML），默认 ./.tfhunter.toml（若存在）
        #[arg(long)]
        config: Option<PathBuf>,

        /// 线程数（"auto"=CPU 核心数）
        #[arg(long)]
        threads: Option<String>,

        /// 最大扫描文件大小（单位字节）
        #[arg(long)]
        max_file_size: Option<u64>,

        /// 遍历目录时保留的扩展名，可重复（默认 tf）
        #[arg(long = "ext")]
        extensions: Vec<String>,

        /// 遍历目录时跳过的目录名，可重复（默认 .terraform、.git）
        #[arg(long)]
        exclude: Vec<String>,

        /// 折叠已被块命中覆盖的单行命中
        #[arg(long)]
        collapse: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Scan { paths, format, output, config, threads, max_file_size, extensions, exclude, collapse } => {
            let cwd = std::env::current_dir().context("resolve current directory")?;

            // 默认值 < 配置文件 < 命令行参数
            let mut opts = ScanOptions::default();
            if let Some((path, cfg)) = load_config(config.as_deref(), &cwd).context("load config")? {
                info!(config = %path.display(), "loaded config");
                cfg.apply(&mut opts);
            }
            if let Some(f) = format {
                opts.format = f.into();
            }
            if let Some(t) = threads {
                opts.threads = parse_threads(&t);
            }
            if max_file_size.is_some() {
                opts.max_file_size = max_file_size;
            }
            if !extensions.is_empty() {
                opts.extensions = extensions.iter().map(|e| e.trim_start_matches('.').to_string()).collect();
            }
            if !exclude.is_empty() {
                opts.exclude = exclude;
            }
            opts.collapse |= collapse;

            info!(?paths, ?opts, "starting scan");

            let mut out: Box<dyn Write> = match &output {
                Some(p) => Box::new(BufWriter::new(File::create(p).context("create output file")?)),
                None => Box::new(BufWriter::new(io::stdout().lock())),
            };
            let stats = scan_and_report(&paths, &mut out, &opts).context("scan and report failed")?;

            // 文本模式下在报告末尾追加总结行；JSON 保持纯数组
            if opts.format == OutputFormat::Text {
                writeln!(out, "{}", if stats.findings > 0 { SUMMARY_FOUND } else { SUMMARY_CLEAN })?;
            }
            out.flush().context("flush report")?;

            info!(
                files_scanned = stats.files_scanned,
                files_skipped = stats.files_skipped,
                files_failed = stats.files_failed,
                findings = stats.findings,
                "scan finished"
            );
            Ok(if stats.findings > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS })
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到 stderr，标准输出只留给报告；默认仅输出 warn 及以上
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 解析线程参数
fn parse_threads(s: &str) -> Option<usize> {
    if s.eq_ignore_ascii_case("auto") { return None; }
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}
