use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fmtcheck_core::{check_and_write, load_config, CheckEngine, CheckOptions, Config, OutputFormat, RuleKind};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};

/// 未指定 --config 时尝试加载的文件
const DEFAULT_CONFIG: &str = "./fmtcheck.toml";

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "fmtcheck", version, about = "Check line endings, indentation and encoding of script and shader sources")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 检查目录（或单个文件）
    Check {
        /// 输入目录或文件
        #[arg(long, default_value = ".")]
        input: PathBuf,

        /// 报告输出文件；缺省写到 stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// 报告格式
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// 线程数（"auto"=CPU 核心数，1=串行）
        #[arg(long, default_value = "auto")]
        threads: String,

        /// 检查引擎：per-rule 或 fused
        #[arg(long, default_value = "per-rule", value_parser = ["per-rule", "fused"])]
        engine: String,

        /// 配置文件路径（TOML），默认 ./fmtcheck.toml（存在时）
        #[arg(long)]
        config: Option<PathBuf>,

        /// 覆盖配置中的缩进单位
        #[arg(long)]
        tab_size: Option<usize>,

        /// 只运行指定规则（可重复）
        #[arg(long = "rule")]
        rules: Vec<String>,

        /// 最大检查文件大小（字节），超过则跳过
        #[arg(long)]
        max_file_size: Option<u64>,
    },
    /// 列出所有规则
    Rules,
}

fn main() -> Result<ExitCode> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { input, output, format, threads, engine, config, tab_size, rules, max_file_size } => {
            info!(?input, ?output, "starting check");

            let cfg = resolve_config(config.as_deref())?;
            let mut opts = CheckOptions::from_config(&cfg);
            if let Some(n) = tab_size {
                anyhow::ensure!(n >= 1, "--tab-size must be at least 1");
                opts.tab_size = n;
            }
            if !rules.is_empty() {
                opts.rules = rules
                    .iter()
                    .map(|r| r.parse::<RuleKind>())
                    .collect::<Result<Vec<_>, _>>()
                    .context("invalid --rule")?;
            }
            opts.engine = match engine.as_str() {
                "fused" => CheckEngine::Fused,
                _ => CheckEngine::PerRule,
            };
            opts.format = match format.as_str() {
                "json" => OutputFormat::Json,
                _ => OutputFormat::Text,
            };
            opts.threads = parse_threads(&threads)?;
            opts.max_file_size = max_file_size;

            let stats = match &output {
                Some(path) => {
                    let mut out = BufWriter::new(File::create(path).context("create output file")?);
                    let stats = check_and_write(&input, &mut out, &opts).context("check failed")?;
                    out.flush().context("flush output file")?;
                    stats
                }
                None => {
                    let stdout = io::stdout();
                    let mut out = BufWriter::new(stdout.lock());
                    let stats = check_and_write(&input, &mut out, &opts).context("check failed")?;
                    out.flush().ok();
                    stats
                }
            };

            info!(
                files_checked = stats.files_checked,
                files_skipped = stats.files_skipped,
                checks_run = stats.checks_run,
                failures = stats.failures,
                "check finished"
            );
            if stats.failures > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Rules => {
            for rule in RuleKind::ALL {
                println!("{:<20} {}", rule.id(), rule.title());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写 stderr，stdout 只留给报告
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).with_writer(io::stderr).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 显式指定的配置必须存在；默认路径不存在时使用内置默认值
fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config(path).context("load config");
    }
    let default = Path::new(DEFAULT_CONFIG);
    if default.is_file() {
        return load_config(default).context("load config");
    }
    debug!("no config file found, using defaults");
    Ok(Config::default())
}

/// 解析线程参数："auto" 表示自动；其他必须是 >= 1 的整数
fn parse_threads(s: &str) -> Result<Option<usize>> {
    if s.eq_ignore_ascii_case("auto") { return Ok(None); }
    let n = s.parse::<usize>().with_context(|| format!("invalid --threads value '{s}'"))?;
    anyhow::ensure!(n >= 1, "--threads must be at least 1 or \"auto\"");
    Ok(Some(n))
}
