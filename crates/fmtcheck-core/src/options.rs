//! 检查选项与统计信息（模块）
use crate::config::Config;
use crate::rules::RuleKind;

/// 检查引擎类型
/// - PerRule：每条规则对每个文件单独开流扫描，首个违规即停。
/// - Fused：每个文件只读一遍，同时驱动所有规则；结果与 PerRule 一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckEngine {
    PerRule,
    Fused,
}

/// 报告输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// 每行一条 `File '<path>' ...` 消息
    Text,
    /// JSON 数组
    Json,
}

/// 检查选项
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// 缩进单位（空格数），必须 >= 1；为 0 时 `check_paths` 返回 `ConfigError::InvalidTabSize`
    pub tab_size: usize,
    /// 启用的规则（按固定顺序）
    pub rules: Vec<RuleKind>,
    /// 参与扫描的扩展名（小写，不带点）
    pub extensions: Vec<String>,
    /// 最大文件大小（字节）；超过则跳过
    pub max_file_size: Option<u64>,
    pub engine: CheckEngine,
    pub format: OutputFormat,
    /// 线程数：None 表示自动（等于 CPU 核数）；Some(1) 走串行
    pub threads: Option<usize>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl CheckOptions {
    /// 以配置文件内容为基础构造选项，其余字段取默认值
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            tab_size: cfg.tab_size,
            rules: cfg.rules.clone(),
            extensions: cfg.extensions.clone(),
            max_file_size: None,
            engine: CheckEngine::PerRule,
            format: OutputFormat::Text,
            threads: None,
        }
    }
}

/// 检查统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckStats {
    pub files_checked: usize,
    pub files_skipped: usize,
    pub checks_run: usize,
    pub failures: usize,
}
