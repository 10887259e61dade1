//! 失败项（对外暴露）与稳定排序
use crate::error::CheckError;
use crate::rules::RuleKind;

/// 单次 (规则, 文件) 检查失败，`CheckReport` 按 (文件, 规则) 顺序持有
#[derive(Debug)]
pub struct Finding {
    /// 文件在输入列表中的下标
    pub file_index: usize,
    pub rule: RuleKind,
    pub error: CheckError,
}

/// 稳定排序：文件下标升序 → 规则固定顺序
pub(crate) fn sort_findings_stable(findings: &mut [Finding]) {
    findings.sort_by(|a, b| a.file_index.cmp(&b.file_index).then(a.rule.cmp(&b.rule)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;

    fn finding(file_index: usize, rule: RuleKind) -> Finding {
        let error = Violation::FinalNewlineCount { path: format!("{file_index}.cs").into(), actual_count: 0 }.into();
        Finding { file_index, rule, error }
    }

    #[test]
    fn sorts_by_file_then_rule() {
        let mut v = vec![
            finding(1, RuleKind::Tabs),
            finding(0, RuleKind::PlainAscii),
            finding(1, RuleKind::LineEndings),
            finding(0, RuleKind::LineEndings),
        ];
        sort_findings_stable(&mut v);
        let keys: Vec<_> = v.iter().map(|f| (f.file_index, f.rule)).collect();
        assert_eq!(
            keys,
            vec![(0, RuleKind::LineEndings), (0, RuleKind::PlainAscii), (1, RuleKind::LineEndings), (1, RuleKind::Tabs)]
        );
    }
}
