use std::fmt::Write as _;

use descent_core::geometry::Point3;
use descent_engine::scene::SceneRoot;
use tracing::info;

use crate::errors::FrontendError;
use crate::loader::LoadedScene;

/// 打印场景概览，或在 `json` 为真时输出完整的 JSON 缓冲。
pub fn print_scene(loaded: &LoadedScene, json: bool) -> Result<(), FrontendError> {
    info!(
        meshes = loaded.scene.len(),
        vertices = loaded.scene.vertex_count(),
        triangles = loaded.scene.triangle_count(),
        "CLI 场景统计"
    );
    if json {
        println!("{}", render_json(&loaded.scene)?);
    } else {
        print!("{}", render_summary(loaded));
    }
    Ok(())
}

pub fn render_json(scene: &SceneRoot) -> Result<String, FrontendError> {
    Ok(serde_json::to_string_pretty(scene)?)
}

pub fn render_summary(loaded: &LoadedScene) -> String {
    let scene = &loaded.scene;
    let mut out = String::new();
    let _ = writeln!(out, "Descent DXF 网格概览");
    let _ = writeln!(out, "来源：{}", loaded.source);
    let _ = writeln!(
        out,
        "网格数={}, 顶点数={}, 三角形数={}",
        scene.len(),
        scene.vertex_count(),
        scene.triangle_count()
    );
    match scene.bounds() {
        Some(bounds) => {
            let _ = writeln!(
                out,
                "范围：{} -> {}",
                format_point(bounds.min()),
                format_point(bounds.max())
            );
        }
        None => {
            let _ = writeln!(out, "范围：（空）");
        }
    }

    for (index, mesh) in scene.meshes().iter().enumerate() {
        let layers = mesh.layer_names();
        let _ = writeln!(
            out,
            "  - 网格 #{index}: 面片={}, 顶点={}, 三角形={}, 图层=[{}]",
            mesh.face_count(),
            mesh.geometry.vertex_count(),
            mesh.geometry.triangle_count(),
            layers.join(", ")
        );
    }
    out
}

fn format_point(point: Point3) -> String {
    format!("({:.2}, {:.2}, {:.2})", point.x(), point.y(), point.z())
}
