//! 配置文件加载（TOML）
//!
//! ```toml
//! tab_size = 4
//! extensions = ["cs", "shader", "cginc"]
//! rules = ["line-endings", "tabs", "indentation"]
//! ```
use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;
use crate::rules::{normalize_rules, RuleKind};

/// 缩进单位默认值
pub const DEFAULT_TAB_SIZE: usize = 4;

/// 默认扫描的脚本与着色器扩展名
pub const DEFAULT_EXTENSIONS: &[&str] = &["cs", "shader", "cginc", "hlsl", "hlslinc", "glsl", "compute"];

/// 顶层配置文件结构（所有字段可省略）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    tab_size: Option<usize>,
    #[serde(default)]
    extensions: Option<Vec<String>>,
    #[serde(default)]
    rules: Option<Vec<String>>,
}

/// 归一化后的配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tab_size: usize,
    pub extensions: Vec<String>,
    pub rules: Vec<RuleKind>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            rules: RuleKind::ALL.to_vec(),
        }
    }
}

impl Config {
    /// 从 TOML 文本解析；缺省字段取默认值
    pub fn from_toml_str(txt: &str, origin: &Path) -> Result<Self, ConfigError> {
        let parsed: ConfigFile = toml::from_str(txt)
            .map_err(|source| ConfigError::Parse { path: origin.to_path_buf(), source })?;
        let mut cfg = Config::default();

        if let Some(n) = parsed.tab_size {
            if n == 0 {
                return Err(ConfigError::InvalidTabSize);
            }
            cfg.tab_size = n;
        }
        if let Some(exts) = parsed.extensions {
            // 兼容 ".cs" 与 "cs" 两种写法
            cfg.extensions = exts.into_iter().map(|e| e.trim_start_matches('.').to_ascii_lowercase()).collect();
        }
        if let Some(ids) = parsed.rules {
            let rules = ids.iter().map(|id| id.parse::<RuleKind>()).collect::<Result<Vec<_>, _>>()?;
            cfg.rules = normalize_rules(&rules);
        }
        Ok(cfg)
    }
}

/// 从 TOML 配置文件加载
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let txt = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    Config::from_toml_str(&txt, path)
}
