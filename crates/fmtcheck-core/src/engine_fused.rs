//! 单遍引擎：每个文件只读一次，同时驱动所有启用的规则
use std::fs::File;
use std::io::{BufReader, Read};
use std::num::NonZeroUsize;
use std::path::Path;

use crate::detectors::detector_for;
use crate::error::CheckError;
use crate::rules::RuleKind;

/// 对单个文件运行多条规则，返回 (规则, 结果)，顺序与 `rules` 一致
/// - 每条规则仍只报告首个违规，报告后该规则退出本次扫描
/// - 所有规则都已退出时提前结束读取
/// - 读取失败时，尚未得出结论的规则都记为 Io 错误
pub fn check_file_fused(path: &Path, rules: &[RuleKind], tab_size: NonZeroUsize) -> Vec<(RuleKind, Result<(), CheckError>)> {
    match File::open(path) {
        Ok(file) => check_reader_fused(path, BufReader::new(file), rules, tab_size),
        Err(e) => io_for_all(path, rules, &e),
    }
}

pub fn check_reader_fused<R: Read>(
    path: &Path,
    reader: R,
    rules: &[RuleKind],
    tab_size: NonZeroUsize,
) -> Vec<(RuleKind, Result<(), CheckError>)> {
    let mut detectors: Vec<_> = rules.iter().map(|&r| detector_for(r, path, tab_size)).collect();
    let mut results: Vec<Option<Result<(), CheckError>>> = rules.iter().map(|_| None).collect();
    let mut pending = rules.len();

    for byte in reader.bytes() {
        if pending == 0 {
            break;
        }
        let byte = match byte {
            Ok(b) => b,
            Err(e) => {
                for slot in results.iter_mut().filter(|s| s.is_none()) {
                    *slot = Some(Err(CheckError::io(path, clone_io(&e))));
                }
                pending = 0;
                break;
            }
        };
        for (det, slot) in detectors.iter_mut().zip(results.iter_mut()) {
            if slot.is_some() {
                continue;
            }
            if let Some(v) = det.feed(byte) {
                *slot = Some(Err(v.into()));
                pending -= 1;
            }
        }
    }

    if pending > 0 {
        for (det, slot) in detectors.iter_mut().zip(results.iter_mut()) {
            if slot.is_none() {
                *slot = Some(det.finish().map_or(Ok(()), |v| Err(v.into())));
            }
        }
    }

    rules.iter().copied().zip(results.into_iter().map(|r| r.unwrap_or(Ok(())))).collect()
}

fn io_for_all(path: &Path, rules: &[RuleKind], e: &std::io::Error) -> Vec<(RuleKind, Result<(), CheckError>)> {
    rules.iter().map(|&r| (r, Err(CheckError::io(path, clone_io(e))))).collect()
}

// io::Error 不可 Clone，保留 kind 与消息
fn clone_io(e: &std::io::Error) -> std::io::Error {
    std::io::Error::new(e.kind(), e.to_string())
}
