use globe_core::constants::{
    rgb_from_hex, ATMOSPHERE_COLOR, ATMOSPHERE_OPACITY, CLEAR_COLOR, GRID_COLOR, GRID_OPACITY,
};
use globe_core::{project, FrameSink, FrameSnapshot, MarkerInstance};
use glam::{Quat, Vec3};
use wgpu::util::DeviceExt;

const GLOBE_BANDS: u32 = 48;
const GLOBE_COLOR: [f32; 3] = [0.08, 0.09, 0.22];
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    #[inline]
    fn new(pos: Vec3, color: [f32; 4]) -> Self {
        Self {
            pos: pos.to_array(),
            color,
        }
    }
}

/// Unit-sphere triangle list scaled to `radius`, in globe-local space.
fn globe_triangles(radius: f32) -> Vec<Vec3> {
    let mut out = Vec::with_capacity((GLOBE_BANDS * GLOBE_BANDS * 6) as usize);
    let lat = |i: u32| -90.0 + 180.0 * i as f32 / GLOBE_BANDS as f32;
    let lng = |j: u32| -180.0 + 360.0 * j as f32 / GLOBE_BANDS as f32;
    for i in 0..GLOBE_BANDS {
        for j in 0..GLOBE_BANDS {
            let a = project(lat(i), lng(j), radius);
            let b = project(lat(i + 1), lng(j), radius);
            let c = project(lat(i + 1), lng(j + 1), radius);
            let d = project(lat(i), lng(j + 1), radius);
            out.extend_from_slice(&[a, b, c, a, c, d]);
        }
    }
    out
}

/// Translucent shell around the globe. Only its inner (far) side is drawn.
fn atmosphere_vertices(radius: f32) -> Vec<Vertex> {
    let [r, g, b] = rgb_from_hex(ATMOSPHERE_COLOR);
    let color = [r, g, b, ATMOSPHERE_OPACITY];
    globe_triangles(radius)
        .into_iter()
        .map(|p| Vertex::new(p, color))
        .collect()
}

const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 3), (3, 2), (2, 0),
    (4, 5), (5, 7), (7, 6), (6, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 1, 3, 2],
    [4, 6, 7, 5],
    [0, 4, 5, 1],
    [2, 3, 7, 6],
    [0, 2, 6, 4],
    [1, 5, 7, 3],
];

fn cube_corners(m: &MarkerInstance) -> [Vec3; 8] {
    let h = m.size * m.scale * 0.5;
    let mut corners = [Vec3::ZERO; 8];
    for (i, c) in corners.iter_mut().enumerate() {
        let local = Vec3::new(
            if i & 1 == 0 { -h } else { h },
            if i & 2 == 0 { -h } else { h },
            if i & 4 == 0 { -h } else { h },
        );
        *c = m.position + m.rotation * local;
    }
    corners
}

fn marker_color(m: &MarkerInstance) -> [f32; 4] {
    let glow = 0.7 + m.emissive;
    let [r, g, b] = m.color_rgb.map(|c| (c * glow).min(1.0));
    [r, g, b, 1.0]
}

/// Line and triangle vertices for one frame.
pub fn build_frame_geometry(
    frame: &FrameSnapshot<'_>,
    globe: &[Vec3],
    lines: &mut Vec<Vertex>,
    tris: &mut Vec<Vertex>,
) {
    lines.clear();
    tris.clear();
    let rot: Quat = frame.globe_rotation;

    let light_dir = frame.lights.directional_position.normalize_or_zero();
    let ambient = frame.lights.ambient;
    let key = frame.lights.directional * 0.5;
    let tint = frame.lights.point_a.color_rgb;
    let tint_amt = frame.lights.point_a.intensity * 0.1;
    for p in globe {
        let world = rot * *p;
        let n = world.normalize_or_zero();
        let lambert = n.dot(light_dir).max(0.0);
        let shade = ambient + key * lambert;
        let color = [
            GLOBE_COLOR[0] * shade + tint[0] * tint_amt,
            GLOBE_COLOR[1] * shade + tint[1] * tint_amt,
            GLOBE_COLOR[2] * shade + tint[2] * tint_amt,
            1.0,
        ];
        tris.push(Vertex::new(world, color));
    }

    // Lift the grid a hair off the surface so it wins the depth test.
    let lift = 1.002;
    let [gr, gg, gb] = rgb_from_hex(GRID_COLOR);
    let grid_color = [gr, gg, gb, GRID_OPACITY];
    for line in frame.grid.lines() {
        for pair in line.windows(2) {
            lines.push(Vertex::new(rot * (pair[0] * lift), grid_color));
            lines.push(Vertex::new(rot * (pair[1] * lift), grid_color));
        }
    }

    for m in frame.markers {
        let corners = cube_corners(m);
        let color = marker_color(m);
        for (a, b) in CUBE_EDGES {
            lines.push(Vertex::new(corners[a], color));
            lines.push(Vertex::new(corners[b], color));
        }
        if !m.wireframe {
            for [a, b, c, d] in CUBE_FACES {
                for i in [a, b, c, a, c, d] {
                    tris.push(Vertex::new(corners[i], color));
                }
            }
        }
    }
}

pub struct GpuState<'w> {
    pub window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    line_pipeline: wgpu::RenderPipeline,
    tri_pipeline: wgpu::RenderPipeline,
    atmosphere_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    line_vb: wgpu::Buffer,
    tri_vb: wgpu::Buffer,
    atmosphere_vb: wgpu::Buffer,
    atmosphere_len: u32,
    atmosphere_radius: f32,
    globe: Vec<Vec3>,
    lines: Vec<Vertex>,
    tris: Vec<Vertex>,
    pub last_error: Option<wgpu::SurfaceError>,
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_vertex_buffer(device: &wgpu::Device, label: &str, vertices: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (std::mem::size_of::<Vertex>() * vertices.max(1)) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl<'w> GpuState<'w> {
    pub async fn new(window: &'w winit::window::Window, globe_radius: f32) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lines"),
            source: wgpu::ShaderSource::Wgsl(globe_core::LINES_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniforms"),
            contents: bytemuck::bytes_of(&Uniforms {
                view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_layout = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }];

        let make_pipeline = |label: &str,
                             topology: wgpu::PrimitiveTopology,
                             cull_mode: Option<wgpu::Face>,
                             depth_write_enabled: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &vertex_layout,
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    topology,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            })
        };
        let line_pipeline =
            make_pipeline("line_pipeline", wgpu::PrimitiveTopology::LineList, None, true);
        let tri_pipeline =
            make_pipeline("tri_pipeline", wgpu::PrimitiveTopology::TriangleList, None, true);
        // Sphere triangles wind clockwise seen from outside, so culling back
        // faces leaves only the far side of the shell.
        let atmosphere_pipeline = make_pipeline(
            "atmosphere_pipeline",
            wgpu::PrimitiveTopology::TriangleList,
            Some(wgpu::Face::Back),
            false,
        );

        let globe = globe_triangles(globe_radius);
        let depth_view = create_depth_view(&device, config.width, config.height);
        let line_vb = create_vertex_buffer(&device, "line_vb", 1 << 16);
        let tri_vb = create_vertex_buffer(&device, "tri_vb", globe.len() + 1024);
        let atmosphere_vb = create_vertex_buffer(&device, "atmosphere_vb", globe.len());

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            line_pipeline,
            tri_pipeline,
            atmosphere_pipeline,
            uniform_buffer,
            bind_group,
            depth_view,
            line_vb,
            tri_vb,
            atmosphere_vb,
            atmosphere_len: 0,
            atmosphere_radius: 0.0,
            globe,
            lines: Vec::new(),
            tris: Vec::new(),
            last_error: None,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, new_size.width, new_size.height);
    }

    fn ensure_capacity(&mut self) {
        let line_cap = self.line_vb.size() as usize / std::mem::size_of::<Vertex>();
        if self.lines.len() > line_cap {
            self.line_vb = create_vertex_buffer(&self.device, "line_vb", self.lines.len() * 2);
        }
        let tri_cap = self.tri_vb.size() as usize / std::mem::size_of::<Vertex>();
        if self.tris.len() > tri_cap {
            self.tri_vb = create_vertex_buffer(&self.device, "tri_vb", self.tris.len() * 2);
        }
    }

    /// Rebuild the shell only when the snapshot asks for a different radius.
    fn sync_atmosphere(&mut self, radius: f32) {
        if radius == self.atmosphere_radius {
            return;
        }
        let vertices = atmosphere_vertices(radius);
        let cap = self.atmosphere_vb.size() as usize / std::mem::size_of::<Vertex>();
        if vertices.len() > cap {
            self.atmosphere_vb =
                create_vertex_buffer(&self.device, "atmosphere_vb", vertices.len());
        }
        self.queue
            .write_buffer(&self.atmosphere_vb, 0, bytemuck::cast_slice(&vertices));
        self.atmosphere_len = vertices.len() as u32;
        self.atmosphere_radius = radius;
    }

    fn draw(&mut self, frame: &FrameSnapshot<'_>) -> Result<(), wgpu::SurfaceError> {
        let target = self.surface.get_current_texture()?;
        let view = target
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: frame.camera.view_proj().to_cols_array_2d(),
            }),
        );

        let mut lines = std::mem::take(&mut self.lines);
        let mut tris = std::mem::take(&mut self.tris);
        build_frame_geometry(frame, &self.globe, &mut lines, &mut tris);
        self.lines = lines;
        self.tris = tris;
        self.ensure_capacity();
        self.sync_atmosphere(frame.atmosphere_radius);
        self.queue
            .write_buffer(&self.line_vb, 0, bytemuck::cast_slice(&self.lines));
        self.queue
            .write_buffer(&self.tri_vb, 0, bytemuck::cast_slice(&self.tris));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: CLEAR_COLOR[0],
                            g: CLEAR_COLOR[1],
                            b: CLEAR_COLOR[2],
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_pipeline(&self.tri_pipeline);
            rpass.set_vertex_buffer(0, self.tri_vb.slice(..));
            rpass.draw(0..self.tris.len() as u32, 0..1);
            rpass.set_pipeline(&self.line_pipeline);
            rpass.set_vertex_buffer(0, self.line_vb.slice(..));
            rpass.draw(0..self.lines.len() as u32, 0..1);
            rpass.set_pipeline(&self.atmosphere_pipeline);
            rpass.set_vertex_buffer(0, self.atmosphere_vb.slice(..));
            rpass.draw(0..self.atmosphere_len, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        target.present();
        Ok(())
    }
}

impl FrameSink for GpuState<'_> {
    fn render(&mut self, frame: &FrameSnapshot<'_>) {
        self.last_error = self.draw(frame).err();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atmosphere_shell_sits_at_the_requested_radius() {
        let shell = atmosphere_vertices(5.25);
        assert_eq!(shell.len(), (GLOBE_BANDS * GLOBE_BANDS * 6) as usize);
        for v in &shell {
            assert!((Vec3::from(v.pos).length() - 5.25).abs() < 1e-4);
            assert_eq!(v.color[3], ATMOSPHERE_OPACITY);
        }
    }

    #[test]
    fn sphere_triangles_wind_clockwise_from_outside() {
        let tris = globe_triangles(1.0);
        // skip the degenerate polar band
        let first = GLOBE_BANDS as usize * 6;
        let [a, b, c] = [tris[first], tris[first + 1], tris[first + 2]];
        let normal = (b - a).cross(c - a);
        assert!(normal.dot(a) < 0.0);
    }
}
