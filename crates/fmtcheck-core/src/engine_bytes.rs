//! 逐规则字节流引擎：每个 (规则, 文件) 独立打开一次文件
use std::fs::File;
use std::io::{BufReader, Read};
use std::num::NonZeroUsize;
use std::path::Path;

use crate::detectors::detector_for;
use crate::error::CheckError;
use crate::rules::RuleKind;

/// 对单个文件运行单条规则
/// - 文件句柄在函数返回时释放（包括首个违规提前返回）
/// - 首个违规即返回，不继续读取
pub fn check_file(path: &Path, rule: RuleKind, tab_size: NonZeroUsize) -> Result<(), CheckError> {
    let file = File::open(path).map_err(|e| CheckError::io(path, e))?;
    check_reader(path, BufReader::new(file), rule, tab_size)
}

/// 在任意字节流上运行单条规则；`path` 只用于报告
pub fn check_reader<R: Read>(path: &Path, reader: R, rule: RuleKind, tab_size: NonZeroUsize) -> Result<(), CheckError> {
    let mut detector = detector_for(rule, path, tab_size);
    for byte in reader.bytes() {
        let byte = byte.map_err(|e| CheckError::io(path, e))?;
        if let Some(v) = detector.feed(byte) {
            return Err(v.into());
        }
    }
    match detector.finish() {
        Some(v) => Err(v.into()),
        None => Ok(()),
    }
}
