//! 公共类型（对外暴露）
use serde::Serialize;

use crate::error::CheckError;
use crate::findings::Finding;

/// 输出项结构（JSON 报告的单个元素）
#[derive(Debug, Clone, Serialize)]
pub struct OutputItem<'a> {
    pub path: String,
    pub rule: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// 仅 final-newline 规则：实际的末尾 LF 个数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub message: String,
}

impl<'a> From<&'a Finding> for OutputItem<'a> {
    fn from(f: &'a Finding) -> Self {
        let count = match f.error.violation() {
            Some(crate::error::Violation::FinalNewlineCount { actual_count, .. }) => Some(*actual_count),
            _ => None,
        };
        let line = match &f.error {
            CheckError::Violation(v) => v.line(),
            CheckError::Io { .. } => None,
        };
        Self {
            path: f.error.path().display().to_string(),
            rule: f.rule.id(),
            line,
            count,
            message: f.error.to_string(),
        }
    }
}
