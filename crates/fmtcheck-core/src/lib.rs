//! 源文件格式检查库
//!
//! 设计要点：
//! - 文件一律视为字节流，不做任何语法解析。
//! - 6 条规则各自是一个小状态机，首个违规即结束该 (文件, 规则) 的检查。
//! - 单个文件的失败不影响其它文件；报告顺序固定为 (文件, 规则)。
//! - 文件发现与规则引擎分离：`run_all_rules` / `check_paths` 只接收路径列表。

mod options;
mod types;
mod findings;
mod detectors;
mod rules;
mod config;
mod discover;
mod error;
mod engine_bytes;
mod engine_fused;
mod scan;

pub use config::{load_config, Config, DEFAULT_EXTENSIONS, DEFAULT_TAB_SIZE};
pub use discover::discover_files;
pub use engine_bytes::{check_file, check_reader};
pub use engine_fused::{check_file_fused, check_reader_fused};
pub use error::{CheckError, ConfigError, Violation};
pub use findings::Finding;
pub use options::{CheckEngine, CheckOptions, CheckStats, OutputFormat};
pub use rules::RuleKind;
pub use scan::{check_and_write, check_paths, run_all_rules, write_report, CheckReport};
pub use types::OutputItem;
