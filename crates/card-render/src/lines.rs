use card_core::constants::DEBUG_COLOR;
use card_core::Scene;
use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl LineVertex {
    pub const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }

    fn new(p: Vec3, color: [f32; 3]) -> Self {
        Self {
            position: p.to_array(),
            color,
        }
    }
}

/// Flatten the rope polyline and, when enabled, the debug wireframe into a
/// line-list vertex stream (two vertices per segment).
pub fn build_line_vertices(scene: &Scene, out: &mut Vec<LineVertex>) {
    out.clear();
    let rope = &scene.rope;
    for pair in rope.points.windows(2) {
        out.push(LineVertex::new(pair[0], rope.color));
        out.push(LineVertex::new(pair[1], rope.color));
    }
    if scene.show_debug {
        for [a, b] in &scene.debug_lines {
            out.push(LineVertex::new(*a, DEBUG_COLOR));
            out.push(LineVertex::new(*b, DEBUG_COLOR));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_core::{CardRig, SceneConfig};

    #[test]
    fn rope_becomes_one_segment_per_neighbor_pair() {
        let cfg = SceneConfig::default().with_segments(4).unwrap();
        let rig = CardRig::build(&cfg);
        let scene = Scene::new(&cfg, &rig);
        let mut out = Vec::new();
        build_line_vertices(&scene, &mut out);
        // anchor + 4 segments + attach point = 6 points, 5 segments
        assert_eq!(out.len(), 10);
        assert_eq!(out[0].position, cfg.anchor.to_array());
        assert_eq!(out[1], out[2]);
    }

    #[test]
    fn debug_lines_only_when_enabled() {
        let mut cfg = SceneConfig::default();
        cfg.debug = true;
        let rig = CardRig::build(&cfg);
        let mut scene = Scene::new(&cfg, &rig);
        let mut out = Vec::new();
        build_line_vertices(&scene, &mut out);
        let rope_only = (scene.rope.points.len() - 1) * 2;
        assert_eq!(out.len(), rope_only + scene.debug_lines.len() * 2);
        assert!(out.len() > rope_only);

        scene.show_debug = false;
        build_line_vertices(&scene, &mut out);
        assert_eq!(out.len(), rope_only);
    }
}
