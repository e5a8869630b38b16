pub mod cli;
pub mod errors;
pub mod loader;

use std::path::PathBuf;

use descent_config::AppConfig;
use errors::FrontendError;
use tracing::info;

/// 命令行传入的选项。
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub input: Option<PathBuf>,
    pub json: bool,
    pub permissive: bool,
}

/// 加载 DXF 并打印场景概览。
pub fn run_cli(options: &CliOptions, config: &AppConfig) -> Result<(), FrontendError> {
    info!("启动 CLI 前端");
    let loader_options = loader::loader_options(config, options.permissive);
    let loaded = loader::load_scene(options.input.as_deref(), config, loader_options)?;
    cli::print_scene(&loaded, options.json)
}
