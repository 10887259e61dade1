//! 规则种类（固定 6 条，顺序即报告顺序）
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    /// 禁止 CR（Windows 换行）
    LineEndings,
    /// 禁止 TAB
    Tabs,
    /// 行首空格数必须是 tab_size 的整数倍
    Indentation,
    /// 换行前不能有空格
    TrailingWhitespace,
    /// 文件必须以且仅以一个 LF 结尾
    FinalNewline,
    /// 只允许 < 128 的字节
    PlainAscii,
}

impl RuleKind {
    pub const ALL: [RuleKind; 6] = [
        RuleKind::LineEndings,
        RuleKind::Tabs,
        RuleKind::Indentation,
        RuleKind::TrailingWhitespace,
        RuleKind::FinalNewline,
        RuleKind::PlainAscii,
    ];

    pub fn id(self) -> &'static str {
        match self {
            RuleKind::LineEndings => "line-endings",
            RuleKind::Tabs => "tabs",
            RuleKind::Indentation => "indentation",
            RuleKind::TrailingWhitespace => "trailing-whitespace",
            RuleKind::FinalNewline => "final-newline",
            RuleKind::PlainAscii => "plain-ascii",
        }
    }

    /// 人类可读的说明（`fmtcheck rules` 输出）
    pub fn title(self) -> &'static str {
        match self {
            RuleKind::LineEndings => "lines end with LF only, no carriage return",
            RuleKind::Tabs => "no tab characters",
            RuleKind::Indentation => "indentation is a multiple of the tab size",
            RuleKind::TrailingWhitespace => "no spaces before a line feed",
            RuleKind::FinalNewline => "exactly one line feed at end of file",
            RuleKind::PlainAscii => "only ASCII bytes",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for RuleKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleKind::ALL
            .into_iter()
            .find(|r| r.id() == s)
            .ok_or_else(|| ConfigError::UnknownRule(s.to_string()))
    }
}

/// 去重并按固定顺序排列
pub(crate) fn normalize_rules(rules: &[RuleKind]) -> Vec<RuleKind> {
    let mut out = rules.to_vec();
    out.sort();
    out.dedup();
    out
}
