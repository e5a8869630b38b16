use std::path::{Path, PathBuf};

use descent_config::AppConfig;
use descent_frontend::CliOptions;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    let mut args = std::env::args().skip(1);
    let mut options = CliOptions::default();
    let mut config_override: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => options.json = true,
            "--permissive" => options.permissive = true,
            "--config" => {
                let Some(path) = args.next() else {
                    eprintln!("`--config` 需要提供配置文件路径");
                    std::process::exit(1);
                };
                config_override = Some(PathBuf::from(path));
            }
            other if other.starts_with("--") => {
                eprintln!("未知参数：{other}");
                std::process::exit(1);
            }
            path => {
                if options.input.is_some() {
                    eprintln!("只能指定一个 DXF 文件：{path}");
                    std::process::exit(1);
                }
                options.input = Some(PathBuf::from(path));
            }
        }
    }

    let (config, config_warning) = load_configuration(config_override.as_deref());
    init_logging(&config);
    if let Some(warning) = config_warning {
        warn!("{warning}，使用内建默认值");
    }
    info!("启动 Descent DXF 查看器");

    if let Err(err) = descent_frontend::run_cli(&options, &config) {
        error!(error = %err, "加载或输出场景失败");
        std::process::exit(1);
    }
}

/// 读取配置。失败时返回默认配置与一条待日志系统就绪后输出的警告。
fn load_configuration(override_path: Option<&Path>) -> (AppConfig, Option<String>) {
    let result = match override_path {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::discover(),
    };
    match result {
        Ok(cfg) => (cfg, None),
        Err(err) => (AppConfig::default(), Some(err.to_string())),
    }
}

fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_new(config.logging.level.clone()).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(filter);
    if subscriber.try_init().is_err() {
        // 已初始化，忽略
    }
}
