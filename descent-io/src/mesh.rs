use descent_core::surface::{MeshSurface, SurfaceGeometry, SurfaceMaterial};

use crate::face::FaceRecord;

/// ENTITIES 段内的网格累加器。
///
/// 每个 3DFACE 追加 4 个顶点与两个三角形 `(i, i+1, i+2)`、`(i, i+2, i+3)`，
/// 即固定沿顶点 0 与顶点 2 的对角线剖分。颜色按面片平铺到 4 个顶点。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshAccumulator {
    positions: Vec<f32>,
    colors: Vec<f32>,
    indices: Vec<u32>,
    face_layers: Vec<String>,
    next_index: u32,
}

impl MeshAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, face: FaceRecord) {
        let base = self.next_index;
        for point in &face.points {
            self.positions.extend_from_slice(&point.to_f32_array());
        }
        let color = face.color.to_f32_array();
        for _ in 0..face.points.len() {
            self.colors.extend_from_slice(&color);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        self.face_layers.push(face.layer);
        self.next_index += 4;
    }

    /// 以当前缓冲构造可渲染网格，不清空累加器。
    pub fn finalize(&self) -> MeshSurface {
        MeshSurface::new(
            SurfaceGeometry::from_buffers(
                self.positions.clone(),
                self.colors.clone(),
                self.indices.clone(),
            ),
            SurfaceMaterial::unlit_vertex_colors(),
            self.face_layers.clone(),
        )
    }

    pub fn reset(&mut self) {
        self.positions.clear();
        self.colors.clear();
        self.indices.clear();
        self.face_layers.clear();
        self.next_index = 0;
    }

    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    #[inline]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// 下一个面片的起始顶点下标。
    #[inline]
    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.face_layers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.face_layers.is_empty()
    }
}
