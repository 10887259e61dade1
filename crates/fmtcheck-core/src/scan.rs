//! 检查主流程与并行调度
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::discover::discover_files;
use crate::engine_bytes::check_file;
use crate::engine_fused::check_file_fused;
use crate::error::{CheckError, ConfigError};
use crate::findings::{sort_findings_stable, Finding};
use crate::options::{CheckEngine, CheckOptions, CheckStats, OutputFormat};
use crate::rules::{normalize_rules, RuleKind};
use crate::types::OutputItem;

/// 一次检查的结果：按 (文件, 规则) 排好序的失败项与统计
#[derive(Debug, Default)]
pub struct CheckReport {
    pub findings: Vec<Finding>,
    pub stats: CheckStats,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// 对每个路径按顺序各调用一次 `rule`
/// - 某个文件失败不影响后续文件
/// - 返回所有失败（各自带路径），空即全部通过
pub fn run_all_rules<P, F>(paths: &[P], rule: F) -> Vec<CheckError>
where
    P: AsRef<Path>,
    F: FnMut(&Path) -> Result<(), CheckError>,
{
    run_indexed(paths, rule).into_iter().map(|(_, e)| e).collect()
}

fn run_indexed<P, F>(paths: &[P], mut rule: F) -> Vec<(usize, CheckError)>
where
    P: AsRef<Path>,
    F: FnMut(&Path) -> Result<(), CheckError>,
{
    paths
        .iter()
        .enumerate()
        .filter_map(|(idx, p)| rule(p.as_ref()).err().map(|e| (idx, e)))
        .collect()
}

/// 对给定文件列表运行所有启用的规则
/// 稳定性保证：失败项按 (输入下标, 规则固定顺序) 排序，串行与并行结果一致
/// tab_size 为 0 时在扫描前返回 `ConfigError::InvalidTabSize`
pub fn check_paths(paths: &[PathBuf], opts: &CheckOptions) -> Result<CheckReport> {
    let tab_size = NonZeroUsize::new(opts.tab_size).ok_or(ConfigError::InvalidTabSize)?;
    let rules = normalize_rules(&opts.rules);
    let mut stats = CheckStats::default();

    // 大小过滤；metadata 失败的文件保留，由规则报告 Io 错误
    let mut files: Vec<(usize, PathBuf)> = Vec::with_capacity(paths.len());
    for (idx, path) in paths.iter().enumerate() {
        if let Some(max) = opts.max_file_size {
            if let Ok(md) = std::fs::metadata(path) {
                if md.len() > max {
                    warn!(path = %path.display(), size = md.len(), max, "file too large, skipped");
                    stats.files_skipped += 1;
                    continue;
                }
            }
        }
        files.push((idx, path.clone()));
    }

    let threads = opts.threads.unwrap_or_else(num_cpus::get);
    let mut findings = if threads > 1 && files.len() > 1 {
        check_parallel(files.clone(), &rules, opts, tab_size, threads)?
    } else {
        check_serial(&files, &rules, opts, tab_size)
    };
    sort_findings_stable(&mut findings);

    stats.files_checked = files.len();
    stats.checks_run = files.len() * rules.len();
    stats.failures = findings.len();
    Ok(CheckReport { findings, stats })
}

/// 串行路径
/// - PerRule：逐条规则跑完整个文件列表
/// - Fused：逐文件单遍
fn check_serial(files: &[(usize, PathBuf)], rules: &[RuleKind], opts: &CheckOptions, tab_size: NonZeroUsize) -> Vec<Finding> {
    let mut findings = Vec::new();
    match opts.engine {
        CheckEngine::PerRule => {
            let paths: Vec<&Path> = files.iter().map(|(_, p)| p.as_path()).collect();
            for &rule in rules {
                debug!(%rule, files = paths.len(), "running rule");
                for (pos, error) in run_indexed(&paths, |p| check_file(p, rule, tab_size)) {
                    findings.push(Finding { file_index: files[pos].0, rule, error });
                }
            }
        }
        CheckEngine::Fused => {
            for (idx, path) in files {
                findings.extend(check_one_file(*idx, path, rules, opts.engine, tab_size));
            }
        }
    }
    findings
}

/// 单个文件上运行所有规则（并行任务与 Fused 串行路径共用）
fn check_one_file(idx: usize, path: &Path, rules: &[RuleKind], engine: CheckEngine, tab_size: NonZeroUsize) -> Vec<Finding> {
    debug!(path = %path.display(), "checking file");
    let results: Vec<(RuleKind, Result<(), CheckError>)> = match engine {
        CheckEngine::PerRule => rules.iter().map(|&r| (r, check_file(path, r, tab_size))).collect(),
        CheckEngine::Fused => check_file_fused(path, rules, tab_size),
    };
    results
        .into_iter()
        .filter_map(|(rule, res)| res.err().map(|error| Finding { file_index: idx, rule, error }))
        .collect()
}

/// 并行调度：
/// - Rayon 线程池按文件并行检查
/// - 当前线程按 idx 重排收集，保证稳定顺序
fn check_parallel(
    files: Vec<(usize, PathBuf)>,
    rules: &[RuleKind],
    opts: &CheckOptions,
    tab_size: NonZeroUsize,
    threads: usize,
) -> Result<Vec<Finding>> {
    use crossbeam_channel as channel;
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("build rayon pool")?;

    // 通道用于 worker → collector 传递结果
    type Msg = (usize /*position*/, Vec<Finding>);
    let (tx, rx) = channel::bounded::<Msg>(256);

    let rules = rules.to_vec();
    let engine = opts.engine;
    let total = files.len();

    let scan_thread = std::thread::spawn(move || {
        pool.install(|| {
            files.par_iter().enumerate().for_each(|(pos, (idx, path))| {
                let found = check_one_file(*idx, path, &rules, engine, tab_size);
                let _ = tx.send((pos, found));
            });
        });
        // 结束后 Sender 被丢弃，Receiver 收到关闭信号
    });

    // 维护 next 与缓存，按序收集
    let mut next: usize = 0;
    let mut buffer: BTreeMap<usize, Vec<Finding>> = BTreeMap::new();
    let mut findings = Vec::new();
    while let Ok((pos, found)) = rx.recv() {
        buffer.insert(pos, found);
        while let Some(found) = buffer.remove(&next) {
            findings.extend(found);
            next += 1;
        }
    }

    if scan_thread.join().is_err() {
        anyhow::bail!("check worker panicked");
    }
    if next != total {
        anyhow::bail!("check worker finished early ({next} of {total} files)");
    }
    Ok(findings)
}

/// 扫描目录（或单个文件）并将报告写入 `out`
pub fn check_and_write(input: &Path, out: &mut dyn Write, opts: &CheckOptions) -> Result<CheckStats> {
    let files = discover_files(input, &opts.extensions);
    info!(input = %input.display(), files = files.len(), "discovered files");

    let report = check_paths(&files, opts)?;
    write_report(out, &report.findings, opts.format).context("write report")?;
    Ok(report.stats)
}

/// 写出报告：Text 每行一条消息；Json 为流式数组
pub fn write_report(out: &mut dyn Write, findings: &[Finding], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for f in findings {
                writeln!(out, "{}", f.error)?;
            }
        }
        OutputFormat::Json => {
            write!(out, "[")?;
            let mut first = true;
            for f in findings {
                if !first { write!(out, ",")?; } else { first = false; }
                serde_json::to_writer(&mut *out, &OutputItem::from(f))?;
            }
            writeln!(out, "]")?;
        }
    }
    Ok(())
}
