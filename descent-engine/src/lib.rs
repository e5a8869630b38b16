pub mod scene {
    use descent_core::geometry::Bounds3D;
    use descent_core::surface::MeshSurface;
    use serde::{Deserialize, Serialize};
    use tracing::debug;

    /// 加载器所依赖的最小场景能力：创建容器、创建可渲染表面、把表面挂到容器上。
    /// 外部渲染引擎实现该 trait 即可直接接收 DXF 网格。
    pub trait SceneBuilder {
        type Container;
        type Surface;

        fn create_container(&mut self) -> Self::Container;

        fn create_surface(&mut self, mesh: MeshSurface) -> Self::Surface;

        fn attach(&mut self, container: &mut Self::Container, surface: Self::Surface);
    }

    /// 一次加载得到的场景根节点，按 ENDSEC 出现顺序保存网格。
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct SceneRoot {
        meshes: Vec<MeshSurface>,
    }

    impl SceneRoot {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add(&mut self, mesh: MeshSurface) {
            self.meshes.push(mesh);
        }

        #[inline]
        pub fn meshes(&self) -> &[MeshSurface] {
            &self.meshes
        }

        #[inline]
        pub fn len(&self) -> usize {
            self.meshes.len()
        }

        #[inline]
        pub fn is_empty(&self) -> bool {
            self.meshes.is_empty()
        }

        pub fn vertex_count(&self) -> usize {
            self.meshes
                .iter()
                .map(|mesh| mesh.geometry.vertex_count())
                .sum()
        }

        pub fn triangle_count(&self) -> usize {
            self.meshes
                .iter()
                .map(|mesh| mesh.geometry.triangle_count())
                .sum()
        }

        /// 所有网格的联合范围；没有有效顶点时返回 None。
        pub fn bounds(&self) -> Option<Bounds3D> {
            let mut bounds = Bounds3D::empty();
            let mut has = false;
            for mesh in &self.meshes {
                if let Some(mesh_bounds) = mesh.geometry.bounds() {
                    bounds.include_bounds(&mesh_bounds);
                    has = true;
                }
            }
            if has { Some(bounds) } else { None }
        }
    }

    /// 内存中的保留模式场景，作为默认的 `SceneBuilder` 实现。
    #[derive(Debug, Default)]
    pub struct RetainedScene {
        surfaces_created: usize,
    }

    impl RetainedScene {
        pub fn new() -> Self {
            Self::default()
        }

        /// 本实例累计创建过的表面数量。
        #[inline]
        pub fn surfaces_created(&self) -> usize {
            self.surfaces_created
        }
    }

    impl SceneBuilder for RetainedScene {
        type Container = SceneRoot;
        type Surface = MeshSurface;

        fn create_container(&mut self) -> SceneRoot {
            SceneRoot::new()
        }

        fn create_surface(&mut self, mesh: MeshSurface) -> MeshSurface {
            self.surfaces_created += 1;
            debug!(
                vertices = mesh.geometry.vertex_count(),
                triangles = mesh.geometry.triangle_count(),
                "创建可渲染表面"
            );
            mesh
        }

        fn attach(&mut self, container: &mut SceneRoot, surface: MeshSurface) {
            container.add(surface);
        }
    }

    #[cfg(test)]
    mod tests {
        use descent_core::geometry::Point3;
        use descent_core::surface::{SurfaceGeometry, SurfaceMaterial};

        use super::*;

        fn quad(offset: f32) -> MeshSurface {
            let positions = vec![
                offset, 0.0, 0.0, //
                offset + 1.0, 0.0, 0.0, //
                offset + 1.0, 1.0, 0.0, //
                offset, 1.0, 0.0,
            ];
            MeshSurface::new(
                SurfaceGeometry::from_buffers(positions, vec![1.0; 12], vec![0, 1, 2, 0, 2, 3]),
                SurfaceMaterial::unlit_vertex_colors(),
                vec!["0".to_string()],
            )
        }

        #[test]
        fn retained_scene_attaches_surfaces_in_order() {
            let mut builder = RetainedScene::new();
            let mut root = builder.create_container();
            assert!(root.is_empty());

            let first = builder.create_surface(quad(0.0));
            builder.attach(&mut root, first);
            let second = builder.create_surface(quad(5.0));
            builder.attach(&mut root, second);

            assert_eq!(builder.surfaces_created(), 2);
            assert_eq!(root.len(), 2);
            assert_eq!(root.meshes()[1].geometry.positions()[0], 5.0);
            assert_eq!(root.vertex_count(), 8);
            assert_eq!(root.triangle_count(), 4);
        }

        #[test]
        fn scene_bounds_cover_all_meshes() {
            let mut root = SceneRoot::new();
            assert!(root.bounds().is_none());
            root.add(quad(-2.0));
            root.add(quad(3.0));
            let bounds = root.bounds().expect("scene should have bounds");
            assert_eq!(bounds.min(), Point3::new(-2.0, 0.0, 0.0));
            assert_eq!(bounds.max(), Point3::new(4.0, 1.0, 0.0));
        }
    }
}
