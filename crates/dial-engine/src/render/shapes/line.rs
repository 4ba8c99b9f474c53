use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::DrawList;

use super::common::{
    create_viewport_ubo, quad_pipeline, viewport_layout_entry, write_viewport, InstanceBuffer,
    UnitQuad,
};

/// Renderer for `DrawCmd::Line`.
///
/// Each segment becomes one quad spanning the segment length and the stroke
/// width plus a small feather; the fragment shader resolves the AA edge.
/// Instance data is re-uploaded only when the draw list revision changes,
/// so one renderer should be fed one list.
#[derive(Default)]
pub struct LineRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    quad: Option<UnitQuad>,
    instances: Option<InstanceBuffer<LineInstance>>,
    uploaded_revision: Option<u64>,
}

impl LineRenderer {
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
            .get_or_insert_with(|| UnitQuad::new(ctx, "dial line quad"));
        let instances = self
            .instances
            .get_or_insert_with(|| InstanceBuffer::new("dial line instances"));

        if self.uploaded_revision != Some(draw_list.revision()) {
            instances.upload(ctx, &line_instances(draw_list));
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

        let mut rpass = target.begin_load_pass("dial line pass");
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
                label: Some("dial line bgl"),
                entries: &[viewport_layout_entry(0)],
            });

        let pipeline = quad_pipeline(
            ctx,
            "dial line pipeline",
            include_str!("shaders/line.wgsl"),
            &bgl,
            LineInstance::layout(),
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

        let ubo = create_viewport_ubo(ctx, "dial line viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("dial line bind group"),
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

/// Collects the non-degenerate line commands of `draw_list` in paint order.
fn line_instances(draw_list: &DrawList) -> Vec<LineInstance> {
    draw_list
        .items()
        .iter()
        .filter_map(|cmd| cmd.as_line())
        .filter(|line| !line.is_degenerate())
        .map(|line| LineInstance {
            p0: [line.from.x, line.from.y],
            p1: [line.to.x, line.to.y],
            width: line.width,
            color: line.color.to_array(),
        })
        .collect()
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (36 bytes):
///
///  offset  0  p0     [f32; 2]   loc 1
///  offset  8  p1     [f32; 2]   loc 2
///  offset 16  width  f32        loc 3
///  offset 20  color  [f32; 4]   loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct LineInstance {
    p0: [f32; 2],
    p1: [f32; 2],
    width: f32,
    color: [f32; 4],
}

impl LineInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // p0
        2 => Float32x2, // p1
        3 => Float32,   // width
        4 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineInstance>() as u64,
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
    fn instance_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<LineInstance>(), 36);
    }

    #[test]
    fn degenerate_lines_and_other_shapes_are_skipped() {
        let mut dl = DrawList::new();
        dl.push_line(Vec2::zero(), Vec2::new(10.0, 0.0), 2.0, Color::WHITE);
        dl.push_line(Vec2::zero(), Vec2::zero(), 2.0, Color::WHITE);
        dl.push_solid_circle(Vec2::zero(), 3.0, Color::WHITE);

        let inst = line_instances(&dl);
        assert_eq!(inst.len(), 1);
        assert_eq!(inst[0].p1, [10.0, 0.0]);
        assert_eq!(inst[0].width, 2.0);
    }
}
