//! OpenGL 3.3 core device
//!
//! Every raw `gl` call in the crate lives in this file. Handles handed out
//! are the GL object names themselves.

use std::collections::HashMap;
use std::ffi::{c_void, CString};
use std::ptr;

use gl::types::{GLchar, GLenum, GLint, GLsizei, GLsizeiptr, GLuint};

use super::device::{
    Capability, CullFace, DepthFunc, DeviceError, DeviceResult, GraphicsDevice, ProgramHandle, TextureHandle,
    TextureTarget, UniformValue, VertexArrayHandle, VertexLayout,
};
use crate::assets::ImageData;
use crate::foundation::math::{self, Vec3, Vec4};
use crate::ui::backend::{FontAtlasHandle, UIRenderBackend};
use crate::ui::rendering::{BatchDraw, PanelVertex, UIVertex};
use crate::ui::text::FontAtlas;

/// Pixel format for an 8-bit image with `channels` channels
pub fn pixel_format(channels: u8) -> Option<GLenum> {
    match channels {
        1 => Some(gl::RED),
        3 => Some(gl::RGB),
        4 => Some(gl::RGBA),
        _ => None,
    }
}

/// Wrap mode for a 2D texture of `format`
///
/// Transparent textures clamp so that alpha at one edge never bleeds into
/// the opposite edge of a billboard.
pub fn wrap_mode(format: GLenum) -> GLenum {
    if format == gl::RGBA {
        gl::CLAMP_TO_EDGE
    } else {
        gl::REPEAT
    }
}

fn capability_enum(capability: Capability) -> GLenum {
    match capability {
        Capability::Multisample => gl::MULTISAMPLE,
        Capability::CullFace => gl::CULL_FACE,
        Capability::DepthTest => gl::DEPTH_TEST,
        Capability::Blend => gl::BLEND,
    }
}

/// Buffers and programs used by overlay passes
struct OverlayPipeline {
    panel_program: GLuint,
    text_program: GLuint,
    panel_vao: GLuint,
    panel_vbo: GLuint,
    text_vao: GLuint,
    text_vbo: GLuint,
    font_texture: Option<GLuint>,
    /// Depth, cull and blend state before the pass
    saved: [bool; 3],
}

/// Graphics device backed by the current OpenGL context
pub struct GlDevice {
    uniform_locations: HashMap<GLuint, HashMap<String, GLint>>,
    vertex_buffers: HashMap<GLuint, Vec<GLuint>>,
    overlay: Option<OverlayPipeline>,
}

impl GlDevice {
    /// Load GL entry points through `loader`
    ///
    /// The context the loader belongs to must be current on this thread.
    pub fn load<F>(loader: F) -> DeviceResult<Self>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);
        if !gl::Viewport::is_loaded() || !gl::CreateProgram::is_loaded() {
            return Err(DeviceError::LoaderFailed("core profile entry points missing".to_string()));
        }

        // Single-channel rows are not 4-byte aligned in general
        unsafe {
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
        }

        log::info!("Loaded OpenGL entry points");
        Ok(Self {
            uniform_locations: HashMap::new(),
            vertex_buffers: HashMap::new(),
            overlay: None,
        })
    }

    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> GLint {
        let locations = self.uniform_locations.entry(program.0).or_default();
        if let Some(&location) = locations.get(name) {
            return location;
        }

        let location = match CString::new(name) {
            Ok(c_name) => unsafe { gl::GetUniformLocation(program.0, c_name.as_ptr()) },
            Err(_) => {
                log::warn!("Uniform name {:?} contains a NUL byte", name);
                -1
            }
        };
        if location < 0 {
            log::trace!("Uniform '{}' not active in program {}", name, program.0);
        }
        locations.insert(name.to_string(), location);
        location
    }

    fn compile_stage(program: &str, stage: &'static str, kind: GLenum, source: &str) -> DeviceResult<GLuint> {
        let c_source = CString::new(source).map_err(|_| DeviceError::ShaderCompile {
            program: program.to_string(),
            stage,
            log: "source contains a NUL byte".to_string(),
        })?;

        unsafe {
            let shader = gl::CreateShader(kind);
            gl::ShaderSource(shader, 1, &c_source.as_ptr(), ptr::null());
            gl::CompileShader(shader);

            let mut status = GLint::from(gl::FALSE);
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
            if status != GLint::from(gl::TRUE) {
                let mut len = 0;
                gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
                let log = read_info_log(len, |capacity, buffer| {
                    gl::GetShaderInfoLog(shader, capacity, ptr::null_mut(), buffer);
                });
                gl::DeleteShader(shader);
                log::error!("ERROR::SHADER_COMPILATION_ERROR of type: {}\n{}", stage, log);
                return Err(DeviceError::ShaderCompile {
                    program: program.to_string(),
                    stage,
                    log,
                });
            }
            Ok(shader)
        }
    }

    fn upload_vertices<T: bytemuck::Pod>(vao: GLuint, vbo: GLuint, data: &[T]) {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        unsafe {
            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                bytes.len() as GLsizeiptr,
                bytes.as_ptr().cast(),
                gl::DYNAMIC_DRAW,
            );
        }
    }

    /// Attach the programs used to draw overlay batches
    ///
    /// Panel vertices are a vec2 position at location 0; text vertices add a
    /// vec2 atlas coordinate at location 1.
    pub fn attach_overlay_programs(&mut self, panel: ProgramHandle, text: ProgramHandle) {
        self.detach_overlay();

        let mut names = [0; 2];
        let mut buffers = [0; 2];
        unsafe {
            gl::GenVertexArrays(2, names.as_mut_ptr());
            gl::GenBuffers(2, buffers.as_mut_ptr());

            let panel_stride = std::mem::size_of::<PanelVertex>() as GLsizei;
            gl::BindVertexArray(names[0]);
            gl::BindBuffer(gl::ARRAY_BUFFER, buffers[0]);
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(0, 2, gl::FLOAT, gl::FALSE, panel_stride, ptr::null());

            let text_stride = std::mem::size_of::<UIVertex>() as GLsizei;
            let uv_offset = std::mem::size_of::<[f32; 2]>();
            gl::BindVertexArray(names[1]);
            gl::BindBuffer(gl::ARRAY_BUFFER, buffers[1]);
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(0, 2, gl::FLOAT, gl::FALSE, text_stride, ptr::null());
            gl::EnableVertexAttribArray(1);
            gl::VertexAttribPointer(1, 2, gl::FLOAT, gl::FALSE, text_stride, uv_offset as *const c_void);

            gl::BindVertexArray(0);
        }

        self.overlay = Some(OverlayPipeline {
            panel_program: panel.0,
            text_program: text.0,
            panel_vao: names[0],
            panel_vbo: buffers[0],
            text_vao: names[1],
            text_vbo: buffers[1],
            font_texture: None,
            saved: [false; 3],
        });
    }

    /// Release overlay buffers and the font texture; programs stay with their owner
    pub fn detach_overlay(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            unsafe {
                gl::DeleteVertexArrays(2, [overlay.panel_vao, overlay.text_vao].as_ptr());
                gl::DeleteBuffers(2, [overlay.panel_vbo, overlay.text_vbo].as_ptr());
                if let Some(texture) = overlay.font_texture {
                    gl::DeleteTextures(1, &texture);
                }
            }
        }
    }

    fn set_overlay_color(&mut self, program: GLuint, color: Vec4) {
        let location = self.uniform_location(ProgramHandle(program), "color");
        unsafe {
            gl::Uniform4f(location, color.x, color.y, color.z, color.w);
        }
    }
}

unsafe fn read_info_log(len: GLint, read: impl FnOnce(GLsizei, *mut GLchar)) -> String {
    let mut buffer = vec![0u8; len.max(1) as usize];
    read(buffer.len() as GLsizei, buffer.as_mut_ptr().cast());
    String::from_utf8_lossy(&buffer)
        .trim_end_matches('\0')
        .trim_end()
        .to_string()
}

impl GraphicsDevice for GlDevice {
    fn set_capability(&mut self, capability: Capability, enabled: bool) {
        let cap = capability_enum(capability);
        unsafe {
            if enabled {
                gl::Enable(cap);
            } else {
                gl::Disable(cap);
            }
        }
    }

    fn set_cull_face(&mut self, face: CullFace) {
        let mode = match face {
            CullFace::Front => gl::FRONT,
            CullFace::Back => gl::BACK,
        };
        unsafe { gl::CullFace(mode) }
    }

    fn set_depth_func(&mut self, func: DepthFunc) {
        let func = match func {
            DepthFunc::Less => gl::LESS,
            DepthFunc::LessEqual => gl::LEQUAL,
        };
        unsafe { gl::DepthFunc(func) }
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        unsafe { gl::Viewport(0, 0, width as GLsizei, height as GLsizei) }
    }

    fn clear(&mut self, color: Vec3) {
        unsafe {
            gl::ClearColor(color.x, color.y, color.z, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }

    fn use_program(&mut self, program: ProgramHandle) {
        unsafe { gl::UseProgram(program.0) }
    }

    fn set_uniform(&mut self, program: ProgramHandle, name: &str, value: UniformValue) {
        let location = self.uniform_location(program, name);
        unsafe {
            match value {
                UniformValue::Int(v) => gl::Uniform1i(location, v),
                UniformValue::Float(v) => gl::Uniform1f(location, v),
                UniformValue::Vec3(v) => gl::Uniform3f(location, v.x, v.y, v.z),
                UniformValue::Mat4(m) => {
                    let columns = math::to_column_array(&m);
                    gl::UniformMatrix4fv(location, 1, gl::FALSE, columns.as_ptr().cast());
                }
            }
        }
    }

    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        unsafe { gl::BindVertexArray(vertex_array.0) }
    }

    fn active_texture(&mut self, unit: u32) {
        unsafe { gl::ActiveTexture(gl::TEXTURE0 + unit) }
    }

    fn bind_texture(&mut self, target: TextureTarget, texture: TextureHandle) {
        let target = match target {
            TextureTarget::Texture2D => gl::TEXTURE_2D,
            TextureTarget::CubeMap => gl::TEXTURE_CUBE_MAP,
        };
        unsafe { gl::BindTexture(target, texture.0) }
    }

    fn draw_arrays(&mut self, first: u32, count: u32) {
        unsafe { gl::DrawArrays(gl::TRIANGLES, first as GLint, count as GLsizei) }
    }

    fn draw_elements(&mut self, count: u32) {
        unsafe { gl::DrawElements(gl::TRIANGLES, count as GLsizei, gl::UNSIGNED_INT, ptr::null()) }
    }

    fn create_program(&mut self, name: &str, vertex_source: &str, fragment_source: &str) -> DeviceResult<ProgramHandle> {
        let vertex = Self::compile_stage(name, "vertex", gl::VERTEX_SHADER, vertex_source)?;
        let fragment = match Self::compile_stage(name, "fragment", gl::FRAGMENT_SHADER, fragment_source) {
            Ok(fragment) => fragment,
            Err(e) => {
                unsafe { gl::DeleteShader(vertex) };
                return Err(e);
            }
        };

        unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vertex);
            gl::AttachShader(program, fragment);
            gl::LinkProgram(program);
            gl::DeleteShader(vertex);
            gl::DeleteShader(fragment);

            let mut status = GLint::from(gl::FALSE);
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
            if status != GLint::from(gl::TRUE) {
                let mut len = 0;
                gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
                let log = read_info_log(len, |capacity, buffer| {
                    gl::GetProgramInfoLog(program, capacity, ptr::null_mut(), buffer);
                });
                gl::DeleteProgram(program);
                log::error!("ERROR::PROGRAM_LINKING_ERROR of '{}'\n{}", name, log);
                return Err(DeviceError::ProgramLink {
                    program: name.to_string(),
                    log,
                });
            }
            Ok(ProgramHandle(program))
        }
    }

    fn create_vertex_array(&mut self, vertices: &[f32], layout: &VertexLayout) -> VertexArrayHandle {
        self.create_indexed_vertex_array(vertices, &[], layout)
    }

    fn create_indexed_vertex_array(&mut self, vertices: &[f32], indices: &[u32], layout: &VertexLayout) -> VertexArrayHandle {
        let float_size = std::mem::size_of::<f32>();
        let stride = (layout.stride * float_size) as GLsizei;
        let mut vao = 0;
        let mut buffers = Vec::with_capacity(2);

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);

            let mut vbo = 0;
            gl::GenBuffers(1, &mut vbo);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            let vertex_bytes: &[u8] = bytemuck::cast_slice(vertices);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                vertex_bytes.len() as GLsizeiptr,
                vertex_bytes.as_ptr().cast(),
                gl::STATIC_DRAW,
            );
            buffers.push(vbo);

            if !indices.is_empty() {
                let mut ebo = 0;
                gl::GenBuffers(1, &mut ebo);
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
                let index_bytes: &[u8] = bytemuck::cast_slice(indices);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    index_bytes.len() as GLsizeiptr,
                    index_bytes.as_ptr().cast(),
                    gl::STATIC_DRAW,
                );
                buffers.push(ebo);
            }

            for attribute in &layout.attributes {
                gl::EnableVertexAttribArray(attribute.location);
                gl::VertexAttribPointer(
                    attribute.location,
                    attribute.components as GLint,
                    gl::FLOAT,
                    gl::FALSE,
                    stride,
                    (attribute.offset * float_size) as *const c_void,
                );
            }

            gl::BindVertexArray(0);
        }

        self.vertex_buffers.insert(vao, buffers);
        VertexArrayHandle(vao)
    }

    fn create_texture_2d(&mut self, image: Option<&ImageData>) -> TextureHandle {
        let mut texture = 0;
        unsafe {
            gl::GenTextures(1, &mut texture);
        }

        let Some(image) = image else {
            return TextureHandle(texture);
        };
        let Some(format) = pixel_format(image.channels) else {
            log::warn!("Unsupported channel count {} for 2D texture", image.channels);
            return TextureHandle(texture);
        };

        let wrap = wrap_mode(format) as GLint;
        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, texture);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                format as GLint,
                image.width as GLsizei,
                image.height as GLsizei,
                0,
                format,
                gl::UNSIGNED_BYTE,
                image.data.as_ptr().cast(),
            );
            gl::GenerateMipmap(gl::TEXTURE_2D);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, wrap);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, wrap);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR_MIPMAP_LINEAR as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);
        }
        TextureHandle(texture)
    }

    fn create_cubemap(&mut self, faces: &[Option<ImageData>; 6]) -> TextureHandle {
        let mut texture = 0;
        unsafe {
            gl::GenTextures(1, &mut texture);
            gl::BindTexture(gl::TEXTURE_CUBE_MAP, texture);
        }

        for (i, face) in faces.iter().enumerate() {
            let Some(image) = face else {
                continue;
            };
            let Some(format) = pixel_format(image.channels) else {
                log::warn!("Unsupported channel count {} for cube map face {}", image.channels, i);
                continue;
            };
            unsafe {
                gl::TexImage2D(
                    gl::TEXTURE_CUBE_MAP_POSITIVE_X + i as GLenum,
                    0,
                    format as GLint,
                    image.width as GLsizei,
                    image.height as GLsizei,
                    0,
                    format,
                    gl::UNSIGNED_BYTE,
                    image.data.as_ptr().cast(),
                );
            }
        }

        unsafe {
            gl::TexParameteri(gl::TEXTURE_CUBE_MAP, gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint);
            gl::TexParameteri(gl::TEXTURE_CUBE_MAP, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);
            gl::TexParameteri(gl::TEXTURE_CUBE_MAP, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as GLint);
            gl::TexParameteri(gl::TEXTURE_CUBE_MAP, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as GLint);
            gl::TexParameteri(gl::TEXTURE_CUBE_MAP, gl::TEXTURE_WRAP_R, gl::CLAMP_TO_EDGE as GLint);
        }
        TextureHandle(texture)
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.uniform_locations.remove(&program.0);
        unsafe { gl::DeleteProgram(program.0) }
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        let buffers = self.vertex_buffers.remove(&vertex_array.0).unwrap_or_default();
        unsafe {
            gl::DeleteVertexArrays(1, &vertex_array.0);
            if !buffers.is_empty() {
                gl::DeleteBuffers(buffers.len() as GLsizei, buffers.as_ptr());
            }
        }
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        unsafe { gl::DeleteTextures(1, &texture.0) }
    }
}

impl UIRenderBackend for GlDevice {
    fn begin_ui_pass(&mut self) {
        let Some(overlay) = &mut self.overlay else {
            return;
        };
        unsafe {
            overlay.saved = [
                gl::IsEnabled(gl::DEPTH_TEST) == gl::TRUE,
                gl::IsEnabled(gl::CULL_FACE) == gl::TRUE,
                gl::IsEnabled(gl::BLEND) == gl::TRUE,
            ];
            gl::Disable(gl::DEPTH_TEST);
            gl::Disable(gl::CULL_FACE);
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
        }
    }

    fn render_panel_batch(&mut self, vertices: &[PanelVertex], draws: &[BatchDraw]) {
        let Some((program, vao, vbo)) = self.overlay.as_ref().map(|o| (o.panel_program, o.panel_vao, o.panel_vbo)) else {
            return;
        };
        Self::upload_vertices(vao, vbo, vertices);
        unsafe { gl::UseProgram(program) };

        for &(first, count, color) in draws {
            self.set_overlay_color(program, color);
            unsafe { gl::DrawArrays(gl::TRIANGLES, first as GLint, count as GLsizei) };
        }
    }

    fn render_text_batch(&mut self, vertices: &[UIVertex], draws: &[BatchDraw]) {
        let Some((program, vao, vbo, texture)) = self
            .overlay
            .as_ref()
            .map(|o| (o.text_program, o.text_vao, o.text_vbo, o.font_texture.unwrap_or(0)))
        else {
            return;
        };
        Self::upload_vertices(vao, vbo, vertices);

        let atlas_location = self.uniform_location(ProgramHandle(program), "glyphAtlas");
        unsafe {
            gl::UseProgram(program);
            gl::Uniform1i(atlas_location, 0);
            gl::ActiveTexture(gl::TEXTURE0);
            gl::BindTexture(gl::TEXTURE_2D, texture);
        }

        for &(first, count, color) in draws {
            self.set_overlay_color(program, color);
            unsafe { gl::DrawArrays(gl::TRIANGLES, first as GLint, count as GLsizei) };
        }
    }

    fn end_ui_pass(&mut self) {
        let Some(overlay) = &self.overlay else {
            return;
        };
        let [depth, cull, blend] = overlay.saved;
        unsafe {
            gl::BindVertexArray(0);
            for (cap, enabled) in [(gl::DEPTH_TEST, depth), (gl::CULL_FACE, cull), (gl::BLEND, blend)] {
                if enabled {
                    gl::Enable(cap);
                } else {
                    gl::Disable(cap);
                }
            }
        }
    }

    fn upload_font_atlas(&mut self, atlas: &FontAtlas) -> FontAtlasHandle {
        let TextureHandle(texture) = self.create_texture_2d(Some(atlas.image()));
        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, texture);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint);
        }

        match &mut self.overlay {
            Some(overlay) => {
                if let Some(previous) = overlay.font_texture.replace(texture) {
                    unsafe { gl::DeleteTextures(1, &previous) };
                }
            }
            None => log::warn!("Font atlas uploaded before overlay programs were attached"),
        }
        log::debug!("Uploaded font atlas ({} glyphs) as texture {}", atlas.glyph_count(), texture);
        FontAtlasHandle(texture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_format_follows_channel_count() {
        assert_eq!(pixel_format(1), Some(gl::RED));
        assert_eq!(pixel_format(3), Some(gl::RGB));
        assert_eq!(pixel_format(4), Some(gl::RGBA));
        assert_eq!(pixel_format(2), None);
    }

    #[test]
    fn test_only_transparent_textures_clamp() {
        assert_eq!(wrap_mode(gl::RGBA), gl::CLAMP_TO_EDGE);
        assert_eq!(wrap_mode(gl::RGB), gl::REPEAT);
        assert_eq!(wrap_mode(gl::RED), gl::REPEAT);
    }

    #[test]
    fn test_every_capability_has_a_gl_enum() {
        let all = [Capability::Multisample, Capability::CullFace, Capability::DepthTest, Capability::Blend];
        let enums: Vec<GLenum> = all.iter().map(|&c| capability_enum(c)).collect();
        assert_eq!(enums, vec![gl::MULTISAMPLE, gl::CULL_FACE, gl::DEPTH_TEST, gl::BLEND]);
    }
}
