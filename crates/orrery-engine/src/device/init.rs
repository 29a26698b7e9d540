/// How the viewer asks for its adapter, device and surface.
#[derive(Debug, Clone)]
pub struct GpuInit {
    pub power_preference: wgpu::PowerPreference,

    /// Prefer an sRGB surface. Textures are uploaded as sRGB, so this keeps
    /// the shaded output gamma-correct.
    pub prefer_srgb: bool,

    pub present_mode: wgpu::PresentMode,

    /// Falls back to the surface's first supported mode when unsupported.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Depth attachment format. `None` renders without depth testing.
    pub depth_format: Option<wgpu::TextureFormat>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Hint only; backends may ignore it.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::HighPerformance,
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            depth_format: Some(wgpu::TextureFormat::Depth32Float),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

impl GpuInit {
    pub fn with_present_mode(mut self, mode: wgpu::PresentMode) -> Self {
        self.present_mode = mode;
        self
    }

    pub fn with_power_preference(mut self, preference: wgpu::PowerPreference) -> Self {
        self.power_preference = preference;
        self
    }

    pub fn without_depth(mut self) -> Self {
        self.depth_format = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_renders_with_depth_and_vsync() {
        let init = GpuInit::default();
        assert_eq!(init.depth_format, Some(wgpu::TextureFormat::Depth32Float));
        assert_eq!(init.present_mode, wgpu::PresentMode::Fifo);
        assert!(init.prefer_srgb);
    }

    #[test]
    fn builders_override_single_fields() {
        let init = GpuInit::default()
            .without_depth()
            .with_present_mode(wgpu::PresentMode::Immediate);
        assert_eq!(init.depth_format, None);
        assert_eq!(init.present_mode, wgpu::PresentMode::Immediate);
        assert_eq!(init.power_preference, wgpu::PowerPreference::HighPerformance);
    }
}
