use winit::dpi::PhysicalSize;

use crate::frame::{FrameSink, SurfaceBounds};
use crate::gpu::context::GpuContext;
use crate::gpu::pipeline::EffectPipeline;
use crate::gpu::uniforms::EffectUniforms;

struct MultisampleTarget {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl MultisampleTarget {
    fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        size: PhysicalSize<u32>,
        sample_count: u32,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("msaa color target"),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}

/// Owns every GPU resource needed to present a frame.
///
/// After construction the only mutation each tick performs is the uniform
/// rewrite; buffers, pipeline, and the optional MSAA target are static.
/// `GpuState` is handed to the clock thread behind the `FrameState` mutex,
/// which serializes it against the supervisor's stop sequence.
pub struct GpuState {
    context: GpuContext,
    pipeline: EffectPipeline,
    uniforms: EffectUniforms,
    multisample_target: Option<MultisampleTarget>,
    frame_count: u64,
}

impl GpuState {
    pub fn new(context: GpuContext, pipeline: EffectPipeline) -> Self {
        let uniforms = EffectUniforms::new(SurfaceBounds::new(
            context.size.width,
            context.size.height,
        ));
        let multisample_target = (context.sample_count > 1).then(|| {
            MultisampleTarget::new(
                &context.device,
                context.surface_format,
                context.size,
                context.sample_count,
            )
        });
        Self {
            context,
            pipeline,
            uniforms,
            multisample_target,
            frame_count: 0,
        }
    }

    /// Records and submits one frame at `seconds` of elapsed time.
    ///
    /// Uniforms first, then acquire the swapchain texture, one clear, one
    /// indexed draw, submit, present. A surface error aborts this frame only.
    fn render_frame(
        &mut self,
        bounds: SurfaceBounds,
        seconds: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        self.uniforms.set_frame(bounds, seconds);
        self.context.queue.write_buffer(
            &self.pipeline.uniform_buffer,
            0,
            bytemuck::bytes_of(&self.uniforms),
        );

        let frame = self.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("overlay encoder"),
                });

        let (attachment_view, resolve_target) = match &self.multisample_target {
            Some(msaa) => (&msaa.view, Some(&view)),
            None => (&view, None),
        };

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("overlay pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: attachment_view,
                    depth_slice: None,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_pipeline(&self.pipeline.pipeline);
            render_pass.set_bind_group(0, &self.pipeline.uniform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.pipeline.vertex_buffer.slice(..));
            render_pass.set_index_buffer(
                self.pipeline.index_buffer.slice(..),
                wgpu::IndexFormat::Uint16,
            );
            render_pass.draw_indexed(0..EffectPipeline::INDEX_COUNT, 0, 0..1);
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        self.frame_count = self.frame_count.saturating_add(1);
        tracing::trace!(
            frame = self.frame_count,
            time = seconds,
            "presented overlay frame"
        );
        Ok(())
    }
}

impl FrameSink for GpuState {
    fn submit(&mut self, bounds: SurfaceBounds, seconds: f32) -> Result<(), wgpu::SurfaceError> {
        self.render_frame(bounds, seconds)
    }
}
