use crate::helpers;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
pub const SHADOW_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
pub const SHADOW_MAP_SIZE: u32 = 2048;

/// Offscreen attachments: the screen-sized depth buffer (rebuilt on resize)
/// and the fixed-size shadow map.
pub struct RenderTargets {
    pub depth_tex: wgpu::Texture,
    pub depth_view: wgpu::TextureView,
    pub shadow_tex: wgpu::Texture,
    pub shadow_view: wgpu::TextureView,
}

impl RenderTargets {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (depth_tex, depth_view) = helpers::create_depth_texture(
            device,
            "depth_tex",
            width,
            height,
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        let (shadow_tex, shadow_view) = helpers::create_depth_texture(
            device,
            "shadow_map",
            SHADOW_MAP_SIZE,
            SHADOW_MAP_SIZE,
            SHADOW_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        Self {
            depth_tex,
            depth_view,
            shadow_tex,
            shadow_view,
        }
    }

    /// Only the depth buffer follows the surface size.
    pub fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let (depth_tex, depth_view) = helpers::create_depth_texture(
            device,
            "depth_tex",
            width,
            height,
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        self.depth_tex = depth_tex;
        self.depth_view = depth_view;
    }
}
