pub mod geometry {
    use glam::DVec3;
    use serde::{Deserialize, Serialize};

    /// 坐标轴标识，DXF 组码按轴逐个写入顶点分量。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum Axis {
        X,
        Y,
        Z,
    }

    /// 三维点，内部以 `glam::DVec3` 表示，解析阶段保持双精度。
    #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
    pub struct Point3(pub DVec3);

    impl Point3 {
        pub const ORIGIN: Self = Self(DVec3::ZERO);

        #[inline]
        pub fn new(x: f64, y: f64, z: f64) -> Self {
            Self(DVec3::new(x, y, z))
        }

        #[inline]
        pub fn x(self) -> f64 {
            self.0.x
        }

        #[inline]
        pub fn y(self) -> f64 {
            self.0.y
        }

        #[inline]
        pub fn z(self) -> f64 {
            self.0.z
        }

        /// 覆盖单个分量，其余分量保持不变。
        #[inline]
        pub fn set_axis(&mut self, axis: Axis, value: f64) {
            match axis {
                Axis::X => self.0.x = value,
                Axis::Y => self.0.y = value,
                Axis::Z => self.0.z = value,
            }
        }

        #[inline]
        pub fn as_vec3(self) -> DVec3 {
            self.0
        }

        /// 转换为 GPU 缓冲使用的单精度分量。
        #[inline]
        pub fn to_f32_array(self) -> [f32; 3] {
            self.0.as_vec3().to_array()
        }
    }

    impl From<DVec3> for Point3 {
        fn from(value: DVec3) -> Self {
            Self(value)
        }
    }

    /// 三维轴对齐边界框，用于估算网格范围。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Bounds3D {
        min: Point3,
        max: Point3,
    }

    impl Bounds3D {
        #[inline]
        pub fn new(min: Point3, max: Point3) -> Self {
            Self { min, max }
        }

        #[inline]
        pub fn empty() -> Self {
            Self {
                min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
                max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            }
        }

        #[inline]
        pub fn is_empty(&self) -> bool {
            self.min.x() > self.max.x() || self.min.y() > self.max.y() || self.min.z() > self.max.z()
        }

        #[inline]
        pub fn min(&self) -> Point3 {
            self.min
        }

        #[inline]
        pub fn max(&self) -> Point3 {
            self.max
        }

        /// 纳入一个点。包含 NaN 分量的点被忽略。
        pub fn include_point(&mut self, point: Point3) {
            if point.as_vec3().is_nan() {
                return;
            }
            if self.is_empty() {
                self.min = point;
                self.max = point;
                return;
            }
            self.min = Point3(self.min.as_vec3().min(point.as_vec3()));
            self.max = Point3(self.max.as_vec3().max(point.as_vec3()));
        }

        pub fn include_bounds(&mut self, other: &Bounds3D) {
            if other.is_empty() {
                return;
            }
            self.include_point(other.min);
            self.include_point(other.max);
        }

        #[inline]
        pub fn center(&self) -> Point3 {
            debug_assert!(!self.is_empty());
            Point3((self.min.as_vec3() + self.max.as_vec3()) * 0.5)
        }
    }
}

pub mod color {
    use serde::{Deserialize, Serialize};

    /// 8 位 RGB 颜色。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Rgb {
        pub r: u8,
        pub g: u8,
        pub b: u8,
    }

    impl Rgb {
        pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF);

        #[inline]
        pub const fn new(r: u8, g: u8, b: u8) -> Self {
            Self { r, g, b }
        }

        /// 由 `0xRRGGBB` 形式的整数构造。
        #[inline]
        pub const fn from_hex(hex: u32) -> Self {
            Self {
                r: ((hex >> 16) & 0xFF) as u8,
                g: ((hex >> 8) & 0xFF) as u8,
                b: (hex & 0xFF) as u8,
            }
        }

        #[inline]
        pub const fn to_hex(self) -> u32 {
            ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
        }

        /// 归一化到 `0.0..=1.0`，与顶点颜色缓冲的布局一致。
        #[inline]
        pub fn to_f32_array(self) -> [f32; 3] {
            [
                f32::from(self.r) / 255.0,
                f32::from(self.g) / 255.0,
                f32::from(self.b) / 255.0,
            ]
        }
    }

    impl Default for Rgb {
        fn default() -> Self {
            Self::WHITE
        }
    }

    /// AutoCAD 颜色索引（ACI）查表。仅收录模型中实际出现的几个索引，
    /// 其余索引一律回退为白色；扩充只需增加分支。
    pub fn aci_color(index: i32) -> Rgb {
        match index {
            30 => Rgb::from_hex(0xFF7F00),
            250 => Rgb::from_hex(0x333333),
            251 => Rgb::from_hex(0x505050),
            253 => Rgb::from_hex(0x828282),
            _ => Rgb::WHITE,
        }
    }
}

pub mod surface {
    use glam::Vec3;
    use serde::{Deserialize, Serialize};

    use crate::geometry::{Bounds3D, Point3};

    /// 可直接提交给 GPU 的三角网格缓冲。
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    pub struct SurfaceGeometry {
        positions: Vec<f32>,
        colors: Vec<f32>,
        normals: Vec<f32>,
        indices: Vec<u32>,
    }

    impl SurfaceGeometry {
        /// 使用位置、逐顶点颜色与索引构造网格，并计算顶点法线。
        pub fn from_buffers(positions: Vec<f32>, colors: Vec<f32>, indices: Vec<u32>) -> Self {
            let normals = compute_vertex_normals(&positions, &indices);
            Self {
                positions,
                colors,
                normals,
                indices,
            }
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
        pub fn normals(&self) -> &[f32] {
            &self.normals
        }

        #[inline]
        pub fn indices(&self) -> &[u32] {
            &self.indices
        }

        #[inline]
        pub fn vertex_count(&self) -> usize {
            self.positions.len() / 3
        }

        #[inline]
        pub fn triangle_count(&self) -> usize {
            self.indices.len() / 3
        }

        #[inline]
        pub fn is_empty(&self) -> bool {
            self.positions.is_empty()
        }

        pub fn bounds(&self) -> Option<Bounds3D> {
            let mut bounds = Bounds3D::empty();
            for chunk in self.positions.chunks_exact(3) {
                bounds.include_point(Point3::new(
                    f64::from(chunk[0]),
                    f64::from(chunk[1]),
                    f64::from(chunk[2]),
                ));
            }
            if bounds.is_empty() { None } else { Some(bounds) }
        }
    }

    /// 按三角形面积加权累加面法线，再逐顶点归一化。
    /// 退化（零面积或含 NaN）的累加结果输出零向量；越界索引的三角形被跳过。
    pub fn compute_vertex_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
        let vertex_count = positions.len() / 3;
        let mut accumulated = vec![Vec3::ZERO; vertex_count];
        let vertex = |index: usize| Vec3::from_slice(&positions[index * 3..index * 3 + 3]);

        for triangle in indices.chunks_exact(3) {
            let [a, b, c] = [
                triangle[0] as usize,
                triangle[1] as usize,
                triangle[2] as usize,
            ];
            if a >= vertex_count || b >= vertex_count || c >= vertex_count {
                continue;
            }
            let origin = vertex(a);
            let normal = (vertex(b) - origin).cross(vertex(c) - origin);
            accumulated[a] += normal;
            accumulated[b] += normal;
            accumulated[c] += normal;
        }

        accumulated
            .into_iter()
            .flat_map(|normal| normal.normalize_or_zero().to_array())
            .collect()
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Side {
        Front,
        Back,
        Double,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Shading {
        /// 不响应光照，直接输出顶点颜色。
        Unlit,
        Lit,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SurfaceMaterial {
        pub vertex_colors: bool,
        pub side: Side,
        pub shading: Shading,
    }

    impl SurfaceMaterial {
        /// DXF 面片使用的材质：逐顶点着色、双面、无光照。
        pub const fn unlit_vertex_colors() -> Self {
            Self {
                vertex_colors: true,
                side: Side::Double,
                shading: Shading::Unlit,
            }
        }
    }

    /// 一个完成的可渲染网格及其面片图层标记。
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct MeshSurface {
        pub geometry: SurfaceGeometry,
        pub material: SurfaceMaterial,
        /// 每个面片所在图层，顺序与面片写入顺序一致。
        #[serde(default)]
        pub face_layers: Vec<String>,
    }

    impl MeshSurface {
        pub fn new(
            geometry: SurfaceGeometry,
            material: SurfaceMaterial,
            face_layers: Vec<String>,
        ) -> Self {
            Self {
                geometry,
                material,
                face_layers,
            }
        }

        #[inline]
        pub fn face_count(&self) -> usize {
            self.face_layers.len()
        }

        /// 去重后的图层名，保持首次出现的顺序。
        pub fn layer_names(&self) -> Vec<&str> {
            let mut names: Vec<&str> = Vec::new();
            for layer in &self.face_layers {
                if !names.contains(&layer.as_str()) {
                    names.push(layer);
                }
            }
            names
        }
    }
}
