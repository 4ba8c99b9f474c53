use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::DrawList;

use super::common::{
    create_viewport_ubo, quad_pipeline, viewport_layout_entry, write_viewport, InstanceBuffer,
    UnitQuad,
};

/// Renderer for `DrawCmd::Circle` (solid fill, AA edge).
///
/// Like [`LineRenderer`](super::line::LineRenderer), instances follow the
/// draw list revision.
#[derive(Default)]
pub struct CircleRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    quad: Option<UnitQuad>,
    instances: Option<InstanceBuffer<CircleInstance>>,
    uploaded_revision: Option<u64>,
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
    ) {
        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);

        let quad = self
            .quad
            .get_or_insert_with(|| UnitQuad::new(ctx, "dial circle quad"));
        let instances = self
            .instances
            .get_or_insert_with(|| InstanceBuffer::new("dial circle instances"));

        if self.uploaded_revision != Some(draw_list.revision()) {
            instances.upload(ctx, &circle_instances(draw_list));
            self.uploaded_revision = Some(draw_list.revision());
        }

        let Some(instance_vbo) = instances.buffer() else {
            return;
        };
        let Some(pipeline) = self.pipeline.as_ref() else {
            return;
        };
        let Some(bind_group) = self.bind_group.as_ref() else {
            return;
        };
        let Some(ubo) = self.viewport_ubo.as_ref() else {
            return;
        };

        write_viewport(ctx, ubo);

        let mut rpass = target.begin_load_pass("dial circle pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..UnitQuad::INDEX_COUNT, 0, 0..instances.len());
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bgl = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("dial circle bgl"),
                entries: &[viewport_layout_entry(0)],
            });

        let pipeline = quad_pipeline(
            ctx,
            "dial circle pipeline",
            include_str!("shaders/circle.wgsl"),
            &bgl,
            CircleInstance::layout(),
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else {
            return;
        };

        let ubo = create_viewport_ubo(ctx, "dial circle viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("dial circle bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
    }
}

fn circle_instances(draw_list: &DrawList) -> Vec<CircleInstance> {
    draw_list
        .items()
        .iter()
        .filter_map(|cmd| cmd.as_circle())
        .filter(|c| c.radius > 0.0 && c.center.is_finite() && c.color.is_finite())
        .map(|c| CircleInstance {
            center: [c.center.x, c.center.y],
            radius: c.radius,
            color: c.color.to_array(),
        })
        .collect()
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (28 bytes):
///
///  offset  0  center  [f32; 2]   loc 1
///  offset  8  radius  f32        loc 2
///  offset 12  color   [f32; 4]   loc 3
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radius: f32,
    color: [f32; 4],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32,   // radius
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    #[test]
    fn zero_radius_circles_are_skipped() {
        let mut dl = DrawList::new();
        dl.push_solid_circle(Vec2::new(5.0, 5.0), 0.0, Color::BLACK);
        dl.push_solid_circle(Vec2::new(5.0, 5.0), 4.0, Color::BLACK);

        let inst = circle_instances(&dl);
        assert_eq!(inst.len(), 1);
        assert_eq!(inst[0].radius, 4.0);
        assert_eq!(std::mem::size_of::<CircleInstance>(), 28);
    }
}
