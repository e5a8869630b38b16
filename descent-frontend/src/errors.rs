use std::path::PathBuf;

use descent_io::DxfError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("读取 DXF 文件 {path:?} 失败: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("解析 DXF（{origin}）失败: {source}")]
    Load {
        origin: String,
        #[source]
        source: DxfError,
    },
    #[error("序列化场景失败: {0}")]
    Serialize(#[from] serde_json::Error),
}
