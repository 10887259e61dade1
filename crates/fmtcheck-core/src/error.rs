//! 错误与违规类型
use std::path::{Path, PathBuf};

use crate::rules::RuleKind;

/// 单条格式违规（每个 (文件, 规则) 最多产生一条）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("File '{}' has Windows style line ending in line {line}", .path.display())]
    WindowsLineEnding { path: PathBuf, line: usize },

    #[error("File '{}' has a tab character in line {line}", .path.display())]
    TabCharacterPresent { path: PathBuf, line: usize },

    #[error("File '{}' is not using {expected_unit} spaces for indentation in line {line}", .path.display())]
    BadIndentationWidth { path: PathBuf, expected_unit: usize, line: usize },

    #[error("File '{}' has trailing whitespace in line {line}", .path.display())]
    TrailingWhitespace { path: PathBuf, line: usize },

    /// actual_count 只可能是 0 或 >= 2
    #[error("File '{}' must end with exactly one new line character (found {actual_count})", .path.display())]
    FinalNewlineCount { path: PathBuf, actual_count: usize },

    #[error("File '{}' has a non-ASCII character in line {line}", .path.display())]
    NonAsciiByte { path: PathBuf, line: usize },
}

impl Violation {
    /// 产生该违规的规则
    pub fn rule(&self) -> RuleKind {
        match self {
            Violation::WindowsLineEnding { .. } => RuleKind::LineEndings,
            Violation::TabCharacterPresent { .. } => RuleKind::Tabs,
            Violation::BadIndentationWidth { .. } => RuleKind::Indentation,
            Violation::TrailingWhitespace { .. } => RuleKind::TrailingWhitespace,
            Violation::FinalNewlineCount { .. } => RuleKind::FinalNewline,
            Violation::NonAsciiByte { .. } => RuleKind::PlainAscii,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Violation::WindowsLineEnding { path, .. }
            | Violation::TabCharacterPresent { path, .. }
            | Violation::BadIndentationWidth { path, .. }
            | Violation::TrailingWhitespace { path, .. }
            | Violation::FinalNewlineCount { path, .. }
            | Violation::NonAsciiByte { path, .. } => path,
        }
    }

    /// 违规所在行号；final-newline 规则没有行号
    pub fn line(&self) -> Option<usize> {
        match self {
            Violation::WindowsLineEnding { line, .. }
            | Violation::TabCharacterPresent { line, .. }
            | Violation::BadIndentationWidth { line, .. }
            | Violation::TrailingWhitespace { line, .. }
            | Violation::NonAsciiByte { line, .. } => Some(*line),
            Violation::FinalNewlineCount { .. } => None,
        }
    }
}

/// 单次 (规则, 文件) 检查的失败原因
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Violation(#[from] Violation),

    #[error("File '{}' could not be read: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CheckError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        CheckError::Io { path: path.to_path_buf(), source }
    }

    pub fn path(&self) -> &Path {
        match self {
            CheckError::Violation(v) => v.path(),
            CheckError::Io { path, .. } => path,
        }
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            CheckError::Violation(v) => Some(v),
            CheckError::Io { .. } => None,
        }
    }
}

/// 配置文件加载错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}'", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}'", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("tab_size must be at least 1")]
    InvalidTabSize,

    #[error("unknown rule '{0}'")]
    UnknownRule(String),
}
