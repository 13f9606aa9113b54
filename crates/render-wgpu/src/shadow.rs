use glam::UVec2;
use shadowbox_scene::CubeFace;

/// Depth cube for a point light, stored as a six-layer 2D array in
/// [`CubeFace::ALL`] order.
pub(crate) struct ShadowMap {
    /// One render-target view per face.
    pub face_views: Vec<wgpu::TextureView>,
    /// All six layers, read with `textureLoad` as unfilterable float.
    pub sampled_view: wgpu::TextureView,
    pub size: UVec2,
}

impl ShadowMap {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    pub fn new(device: &wgpu::Device, size: UVec2) -> Self {
        let size = size.max(UVec2::ONE);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("shadow_cube_texture"),
            size: wgpu::Extent3d {
                width: size.x,
                height: size.y,
                depth_or_array_layers: CubeFace::ALL.len() as u32,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let face_views = CubeFace::ALL
            .iter()
            .map(|face| {
                texture.create_view(&wgpu::TextureViewDescriptor {
                    label: Some("shadow_face_view"),
                    dimension: Some(wgpu::TextureViewDimension::D2),
                    aspect: wgpu::TextureAspect::DepthOnly,
                    base_array_layer: face.index() as u32,
                    array_layer_count: Some(1),
                    ..Default::default()
                })
            })
            .collect();

        let sampled_view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("shadow_cube_sampled_view"),
            dimension: Some(wgpu::TextureViewDimension::D2Array),
            aspect: wgpu::TextureAspect::DepthOnly,
            base_array_layer: 0,
            array_layer_count: Some(CubeFace::ALL.len() as u32),
            ..Default::default()
        });

        Self {
            face_views,
            sampled_view,
            size,
        }
    }

    pub fn memory_bytes(&self) -> u64 {
        // Depth32Float, six layers
        self.size.x as u64 * self.size.y as u64 * 4 * CubeFace::ALL.len() as u64
    }
}
