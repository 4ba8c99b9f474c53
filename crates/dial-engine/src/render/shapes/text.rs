use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::shapes::text::{aligned_origin, TextCmd};
use crate::scene::DrawList;
use crate::text::FontSystem;

use super::common::{
    create_viewport_ubo, quad_pipeline, viewport_layout_entry, write_viewport, InstanceBuffer,
    UnitQuad,
};

// ── atlas constants ────────────────────────────────────────────────────────

const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1; // pixels between glyphs in the atlas

/// Raster scales are quantised so fractional DPI changes reuse glyphs.
fn quantize_scale(scale: f32) -> f32 {
    ((scale.max(0.25) * 4.0).round() / 4.0).max(0.25)
}

// ── cached glyph ──────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone)]
struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Shelf packer state for the glyph atlas.
#[derive(Debug)]
struct Shelf {
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
}

impl Default for Shelf {
    fn default() -> Self {
        Self {
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
        }
    }
}

impl Shelf {
    /// Reserves a `w × h` slot, or `None` when the atlas is full.
    fn allocate(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if w + 2 * GLYPH_PADDING > ATLAS_SIZE || h + 2 * GLYPH_PADDING > ATLAS_SIZE {
            return None;
        }
        if self.cursor_x + w + GLYPH_PADDING > ATLAS_SIZE {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }
        if self.cursor_y + h + GLYPH_PADDING > ATLAS_SIZE {
            return None;
        }
        let slot = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(slot)
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Renderer for `DrawCmd::Text`.
///
/// Glyphs are rasterized by fontdue at physical size on first use and packed
/// into a 2048 × 2048 R8 atlas. When the atlas fills up (many distinct sizes
/// after repeated resizes) it is wiped and refilled from the current frame.
pub struct TextRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,

    atlas_texture: Option<wgpu::Texture>,
    atlas_view: Option<wgpu::TextureView>,
    shelf: Shelf,
    glyph_cache: HashMap<GlyphRasterConfig, CachedGlyph>,

    quad: Option<UnitQuad>,
    instances: InstanceBuffer<GlyphInstance>,
    /// `(draw list revision, raster scale bits)` of the uploaded instances.
    uploaded: Option<(u64, u32)>,

    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            sampler: None,
            atlas_texture: None,
            atlas_view: None,
            shelf: Shelf::default(),
            glyph_cache: HashMap::new(),
            quad: None,
            instances: InstanceBuffer::new("dial text instances"),
            uploaded: None,
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders all `DrawCmd::Text` entries in `draw_list`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
        font_system: &FontSystem,
    ) {
        self.ensure_pipeline(ctx);
        self.ensure_atlas(ctx);
        self.ensure_bindings(ctx);
        if self.quad.is_none() {
            self.quad = Some(UnitQuad::new(ctx, "dial text quad"));
        }

        let scale = quantize_scale(ctx.scale_factor);
        let key = (draw_list.revision(), scale.to_bits());
        if self.uploaded != Some(key) {
            let glyphs = match self.build_instances(ctx, draw_list, font_system, scale) {
                Some(glyphs) => glyphs,
                None => {
                    log::debug!("text atlas full; clearing and re-rasterizing");
                    self.reset_atlas();
                    self.build_instances(ctx, draw_list, font_system, scale)
                        .unwrap_or_else(|| {
                            log::warn!("text does not fit in a fresh {ATLAS_SIZE}px atlas");
                            Vec::new()
                        })
                }
            };
            self.instances.upload(ctx, &glyphs);
            self.uploaded = Some(key);
        }

        let Some(instance_vbo) = self.instances.buffer() else {
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
        let Some(quad) = self.quad.as_ref() else {
            return;
        };

        write_viewport(ctx, ubo);

        let mut rpass = target.begin_load_pass("dial text pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..UnitQuad::INDEX_COUNT, 0, 0..self.instances.len());
    }

    /// Lays out every text command and makes sure its glyphs are in the atlas.
    ///
    /// Returns `None` if the atlas ran out of room part-way.
    fn build_instances(
        &mut self,
        ctx: &RenderCtx<'_>,
        draw_list: &DrawList,
        font_system: &FontSystem,
        scale: f32,
    ) -> Option<Vec<GlyphInstance>> {
        let mut out = Vec::new();

        for cmd in draw_list.items().iter().filter_map(|c| c.as_text()) {
            let Some(font) = font_system.get(cmd.font) else {
                log::warn!("TextRenderer: unknown {:?}, skipping", cmd.font);
                continue;
            };
            if cmd.text.is_empty() || !(cmd.size > 0.0) {
                continue;
            }

            let origin = snapped_origin(cmd, font_system, scale);
            let phys_size = cmd.size * scale;

            self.layout.reset(&LayoutSettings::default());
            self.layout.append(&[font], &TextStyle::new(&cmd.text, phys_size, 0));

            // Copy glyph positions out so the borrow on `self.layout` ends
            // before `place_glyph` needs `&mut self`.
            let placed: Vec<(GlyphRasterConfig, f32, f32, usize, usize)> = self
                .layout
                .glyphs()
                .iter()
                .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
                .map(|g| (g.key, g.x, g.y, g.width, g.height))
                .collect();

            let color = cmd.color.to_array();
            for (key, gx, gy, w, h) in placed {
                let cached = match self.glyph_cache.get(&key) {
                    Some(c) => *c,
                    None => {
                        let (metrics, bitmap) = font.rasterize_config(key);
                        if metrics.width == 0 || metrics.height == 0 {
                            continue;
                        }
                        let c = self.place_glyph(
                            ctx,
                            &bitmap,
                            metrics.width as u32,
                            metrics.height as u32,
                        )?;
                        self.glyph_cache.insert(key, c);
                        c
                    }
                };

                let min = Vec2::new(origin.x + gx, origin.y + gy) / scale;
                let max = Vec2::new(origin.x + gx + w as f32, origin.y + gy + h as f32) / scale;
                out.push(GlyphInstance {
                    dst_min: [min.x, min.y],
                    dst_max: [max.x, max.y],
                    uv_min: cached.uv_min,
                    uv_max: cached.uv_max,
                    color,
                });
            }
        }

        Some(out)
    }

    fn place_glyph(
        &mut self,
        ctx: &RenderCtx<'_>,
        bitmap: &[u8],
        w: u32,
        h: u32,
    ) -> Option<CachedGlyph> {
        let (gx, gy) = self.shelf.allocate(w, h)?;
        let atlas = self.atlas_texture.as_ref()?;

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: atlas,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: gx,
                    y: gy,
                    z: 0,
                },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );

        let atlas_f = ATLAS_SIZE as f32;
        Some(CachedGlyph {
            uv_min: [gx as f32 / atlas_f, gy as f32 / atlas_f],
            uv_max: [(gx + w) as f32 / atlas_f, (gy + h) as f32 / atlas_f],
        })
    }

    /// Forgets every cached glyph; the texture itself is reused.
    fn reset_atlas(&mut self) {
        self.glyph_cache.clear();
        self.shelf = Shelf::default();
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bgl = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("dial text bgl"),
                entries: &[
                    viewport_layout_entry(0),
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline = quad_pipeline(
            ctx,
            "dial text pipeline",
            include_str!("shaders/text.wgsl"),
            &bgl,
            GlyphInstance::layout(),
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.bind_group = None;
    }

    fn ensure_atlas(&mut self, ctx: &RenderCtx<'_>) {
        if self.atlas_texture.is_some() {
            return;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("dial text atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.atlas_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.atlas_texture = Some(texture);
        self.reset_atlas();
        self.bind_group = None;
        self.uploaded = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }

        let sampler = self.sampler.get_or_insert_with(|| {
            ctx.device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("dial text sampler"),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                mipmap_filter: wgpu::MipmapFilterMode::Nearest,
                ..Default::default()
            })
        });
        let Some(bgl) = self.bind_group_layout.as_ref() else {
            return;
        };
        let Some(atlas_view) = self.atlas_view.as_ref() else {
            return;
        };

        let ubo = self
            .viewport_ubo
            .take()
            .unwrap_or_else(|| create_viewport_ubo(ctx, "dial text viewport ubo"));

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("dial text bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        self.viewport_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
    }
}

/// Top-left of the laid-out line in physical pixels, snapped to the pixel grid.
fn snapped_origin(cmd: &TextCmd, font_system: &FontSystem, scale: f32) -> Vec2 {
    let advance = font_system.measure_advance(&cmd.text, cmd.font, cmd.size, scale);
    let extent = font_system.line_extent(cmd.font, cmd.size);
    let logical = aligned_origin(cmd.anchor, advance, extent, cmd.align, cmd.baseline);
    Vec2::new((logical.x * scale).round(), (logical.y * scale).round())
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_quantized_to_quarters() {
        assert_eq!(quantize_scale(1.0), 1.0);
        assert_eq!(quantize_scale(1.1), 1.0);
        assert_eq!(quantize_scale(1.2), 1.25);
        assert_eq!(quantize_scale(0.0), 0.25);
    }

    #[test]
    fn shelf_wraps_rows_then_fills_up() {
        let mut shelf = Shelf::default();
        let first = shelf.allocate(1000, 10).unwrap();
        let second = shelf.allocate(1000, 20).unwrap();
        let third = shelf.allocate(1000, 5).unwrap();

        assert_eq!(first, (GLYPH_PADDING, GLYPH_PADDING));
        assert_eq!(second.1, GLYPH_PADDING);
        // Third glyph no longer fits on row one; row height is the taller of the two.
        assert_eq!(third, (GLYPH_PADDING, GLYPH_PADDING + 20 + GLYPH_PADDING));

        let mut full = Shelf::default();
        let mut placed = 0;
        while full.allocate(500, 500).is_some() {
            placed += 1;
        }
        assert_eq!(placed, 16);
    }

    #[test]
    fn oversized_glyph_never_fits() {
        assert!(Shelf::default().allocate(ATLAS_SIZE, 1).is_none());
    }
}
