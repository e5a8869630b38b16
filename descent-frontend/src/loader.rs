use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use descent_config::{AppConfig, NumericPolicyConfig};
use descent_engine::scene::SceneRoot;
use descent_io::{DxfLoader, LoaderOptions, NumericPolicy};
use tracing::{info, warn};

use crate::errors::FrontendError;

/// 未在命令行指定文件时读取的 DXF 路径。
pub const SAMPLE_DXF_ENV: &str = "DESCENT_SAMPLE_DXF";

const BUILTIN_SAMPLE: &str = include_str!("../assets/sample.dxf");

/// 文档来源，便于前端呈现加载信息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Dxf(PathBuf),
    Builtin,
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Dxf(path) => write!(f, "{}", path.display()),
            DocumentSource::Builtin => f.write_str("内置示例"),
        }
    }
}

/// 统一封装加载后的场景与元信息。
#[derive(Debug)]
pub struct LoadedScene {
    pub scene: SceneRoot,
    pub source: DocumentSource,
}

pub fn loader_options(config: &AppConfig, force_permissive: bool) -> LoaderOptions {
    let numeric_policy = if force_permissive {
        NumericPolicy::Permissive
    } else {
        match config.loader.numeric_policy {
            NumericPolicyConfig::Strict => NumericPolicy::Strict,
            NumericPolicyConfig::Permissive => NumericPolicy::Permissive,
        }
    };
    LoaderOptions { numeric_policy }
}

/// 加载场景。显式路径失败时直接返回错误；
/// 来自环境变量 `DESCENT_SAMPLE_DXF` 或配置的路径失败时回退到内置示例。
pub fn load_scene(
    explicit: Option<&Path>,
    config: &AppConfig,
    options: LoaderOptions,
) -> Result<LoadedScene, FrontendError> {
    let mut loader = DxfLoader::with_options(options);

    if let Some(path) = explicit {
        return load_file(&mut loader, path);
    }

    let implicit = env::var_os(SAMPLE_DXF_ENV)
        .map(PathBuf::from)
        .or_else(|| config.input.sample_dxf.clone());
    if let Some(path) = implicit {
        match load_file(&mut loader, &path) {
            Ok(loaded) => return Ok(loaded),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "加载 DXF 失败，回退到内置示例");
            }
        }
    }

    load_builtin(&mut loader)
}

fn load_file(loader: &mut DxfLoader, path: &Path) -> Result<LoadedScene, FrontendError> {
    let text = fs::read_to_string(path).map_err(|source| FrontendError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let scene = loader.load(&text).map_err(|source| FrontendError::Load {
        origin: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), meshes = scene.len(), "从 DXF 加载场景成功");
    Ok(LoadedScene {
        scene,
        source: DocumentSource::Dxf(path.to_path_buf()),
    })
}

fn load_builtin(loader: &mut DxfLoader) -> Result<LoadedScene, FrontendError> {
    let scene = loader
        .load(BUILTIN_SAMPLE)
        .map_err(|source| FrontendError::Load {
            origin: DocumentSource::Builtin.to_string(),
            source,
        })?;
    Ok(LoadedScene {
        scene,
        source: DocumentSource::Builtin,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn builtin_sample_parses() {
        let mut loader = DxfLoader::new();
        let loaded = load_builtin(&mut loader).expect("内置示例应能解析");
        assert_eq!(loaded.source, DocumentSource::Builtin);
        assert_eq!(loaded.scene.len(), 1);
        assert_eq!(loaded.scene.meshes()[0].layer_names(), vec!["GROUND", "MARKER"]);
    }

    #[test]
    fn explicit_path_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        write!(file, "{BUILTIN_SAMPLE}").unwrap();

        let loaded = load_scene(
            Some(file.path()),
            &AppConfig::default(),
            LoaderOptions::default(),
        )
        .expect("load explicit file");
        assert_eq!(loaded.source, DocumentSource::Dxf(file.path().to_path_buf()));
        assert_eq!(loaded.scene.vertex_count(), 8);
    }

    #[test]
    fn explicit_path_errors_are_reported() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let missing = dir.path().join("missing.dxf");
        let err = load_scene(Some(missing.as_path()), &AppConfig::default(), LoaderOptions::default())
            .unwrap_err();
        assert!(matches!(err, FrontendError::Read { .. }));

        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        write!(file, "0\nSECTION\n2\nENTITIES\n").unwrap();
        let err = load_scene(
            Some(file.path()),
            &AppConfig::default(),
            LoaderOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FrontendError::Load { .. }));
    }

    #[test]
    fn permissive_flag_overrides_config() {
        let config = AppConfig::default();
        assert_eq!(
            loader_options(&config, false).numeric_policy,
            NumericPolicy::Strict
        );
        assert_eq!(
            loader_options(&config, true).numeric_policy,
            NumericPolicy::Permissive
        );
    }
}
