//! DXF 3DFACE 网格加载器。
//!
//! 只识别 SECTION / ENTITIES / 3DFACE / ENDSEC / EOF 这几类记录，
//! 每个 ENTITIES…ENDSEC 段生成一个可渲染网格。

mod face;
mod mesh;
mod reader;

use descent_engine::scene::{RetainedScene, SceneBuilder, SceneRoot};
use thiserror::Error;
use tracing::{debug, warn};

pub use face::FaceRecord;
pub use mesh::MeshAccumulator;

use reader::LineCursor;

/// 组码 0：实体 / 段标记。
pub(crate) const GROUP_ENTITY: &str = "0";
/// 组码 2：段名称。
pub(crate) const GROUP_NAME: &str = "2";

#[derive(Debug, Error)]
pub enum DxfError {
    #[error("文件在第 {line} 行提前结束（缺少 EOF 标记或值行）")]
    OutOfInput { line: usize },
    #[error("第 {line} 行的数值 \"{value}\"（组码 {code}）无法解析")]
    MalformedNumeric {
        line: usize,
        code: String,
        value: String,
    },
}

/// 坐标或颜色值无法解析时的处理方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericPolicy {
    /// 立即返回 `MalformedNumeric`。
    #[default]
    Strict,
    /// 坐标写入 NaN，颜色回退为白色，继续解析。
    Permissive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoaderOptions {
    pub numeric_policy: NumericPolicy,
}

/// DXF 加载器。实例只保存可重置的暂存状态，多次 `load` 互不影响。
#[derive(Debug, Default)]
pub struct DxfLoader {
    options: LoaderOptions,
    accumulator: MeshAccumulator,
}

impl DxfLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LoaderOptions) -> Self {
        Self {
            options,
            accumulator: MeshAccumulator::new(),
        }
    }

    #[inline]
    pub fn options(&self) -> LoaderOptions {
        self.options
    }

    /// 解析整份 DXF 文本，返回内存场景根节点。
    pub fn load(&mut self, text: &str) -> Result<SceneRoot, DxfError> {
        let mut builder = RetainedScene::new();
        self.load_into(text, &mut builder)
    }

    /// 解析 DXF 文本，并通过给定的场景后端创建容器与网格。
    pub fn load_into<B: SceneBuilder>(
        &mut self,
        text: &str,
        builder: &mut B,
    ) -> Result<B::Container, DxfError> {
        self.accumulator.reset();
        let mut cursor = LineCursor::new(text);
        let mut root = builder.create_container();
        self.read_records(&mut cursor, builder, &mut root)?;
        Ok(root)
    }

    fn read_records<B: SceneBuilder>(
        &mut self,
        cursor: &mut LineCursor<'_>,
        builder: &mut B,
        root: &mut B::Container,
    ) -> Result<(), DxfError> {
        let mut meshes = 0usize;
        loop {
            let code = cursor.next_line()?;
            match code {
                GROUP_ENTITY => match cursor.next_line()? {
                    "SECTION" => {}
                    "ENDSEC" => {
                        let mesh = self.accumulator.finalize();
                        debug!(
                            faces = mesh.face_count(),
                            vertices = mesh.geometry.vertex_count(),
                            "ENDSEC：生成网格"
                        );
                        let surface = builder.create_surface(mesh);
                        builder.attach(root, surface);
                        meshes += 1;
                    }
                    "3DFACE" => {
                        let face = face::read_face(cursor, self.options.numeric_policy)?;
                        self.accumulator.append(face);
                    }
                    "EOF" => break,
                    _ => {}
                },
                GROUP_NAME => {
                    if cursor.next_line()? == "ENTITIES" {
                        debug!(line = cursor.line_number(), "进入 ENTITIES 段，重置网格缓冲");
                        self.accumulator.reset();
                    }
                }
                _ => {
                    // 其余组码连同值行一并跳过
                    cursor.next_line()?;
                }
            }
        }
        debug!(meshes, lines = cursor.line_number(), "DXF 解析完成");
        Ok(())
    }
}

pub(crate) fn parse_coordinate(
    raw: &str,
    code: &str,
    line: usize,
    policy: NumericPolicy,
) -> Result<f64, DxfError> {
    match raw.trim().parse::<f64>() {
        Ok(value) => Ok(value),
        Err(_) => match policy {
            NumericPolicy::Strict => Err(malformed(raw, code, line)),
            NumericPolicy::Permissive => {
                warn!(line, code, value = raw, "坐标无法解析，按 NaN 处理");
                Ok(f64::NAN)
            }
        },
    }
}

/// 宽松模式下无法解析的颜色索引返回 `None`，由调用方回退为白色。
pub(crate) fn parse_color_index(
    raw: &str,
    code: &str,
    line: usize,
    policy: NumericPolicy,
) -> Result<Option<i32>, DxfError> {
    match raw.trim().parse::<i32>() {
        Ok(value) => Ok(Some(value)),
        Err(_) => match policy {
            NumericPolicy::Strict => Err(malformed(raw, code, line)),
            NumericPolicy::Permissive => {
                warn!(line, code, value = raw, "颜色索引无法解析，使用白色");
                Ok(None)
            }
        },
    }
}

fn malformed(raw: &str, code: &str, line: usize) -> DxfError {
    DxfError::MalformedNumeric {
        line,
        code: code.to_string(),
        value: raw.to_string(),
    }
}
