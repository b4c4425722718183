//! OBJ file loader for 3D models
//!
//! Produces one mesh per `usemtl`/`o`/`g` group with interleaved
//! position/normal/uv vertices and a triangle index list. Polygons are fan
//! triangulated, repeated vertex references are shared, texture V is flipped
//! to match top-row-first image data, and vertices without a normal get a
//! smooth area-weighted one.

use std::collections::HashMap;
use std::path::Path;

use crate::assets::AssetError;
use crate::foundation::math::Vec3;

/// Floats per interleaved vertex: position(3) normal(3) uv(2)
pub const FLOATS_PER_VERTEX: usize = 8;

/// One material group of an OBJ file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjMesh {
    /// Object or group name
    pub name: String,
    /// Material selected by `usemtl`
    pub material: Option<String>,
    /// Interleaved vertex data
    pub vertices: Vec<f32>,
    /// Triangle list
    pub indices: Vec<u32>,
}

impl ObjMesh {
    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }
}

/// Parsed OBJ file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjModel {
    /// Non-empty meshes in file order
    pub meshes: Vec<ObjMesh>,
    /// Material libraries named by `mtllib`
    pub material_libraries: Vec<String>,
}

/// Wavefront OBJ loader
pub struct ObjLoader;

impl ObjLoader {
    /// Load and parse an OBJ file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ObjModel, AssetError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| AssetError::io(path, e))?;
        let model = Self::parse(&contents)?;
        log::info!(
            "Loaded OBJ {} ({} meshes, {} vertices)",
            path.display(),
            model.meshes.len(),
            model.meshes.iter().map(ObjMesh::vertex_count).sum::<usize>()
        );
        Ok(model)
    }

    /// Parse OBJ text
    pub fn parse(contents: &str) -> Result<ObjModel, AssetError> {
        let mut positions: Vec<Vec3> = Vec::new();
        let mut normals: Vec<Vec3> = Vec::new();
        let mut tex_coords: Vec<[f32; 2]> = Vec::new();

        let mut model = ObjModel::default();
        let mut builder = MeshBuilder::new(String::new(), None);

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let Some(command) = parts.next() else { continue };
            let args: Vec<&str> = parts.collect();

            match command {
                "v" => positions.push(parse_vec3(&args, line_num)?),
                "vn" => normals.push(parse_vec3(&args, line_num)?),
                "vt" => {
                    let u = parse_float(args.first(), line_num)?;
                    let v = parse_float(args.get(1), line_num)?;
                    tex_coords.push([u, 1.0 - v]);
                }
                "f" => {
                    if args.len() < 3 {
                        return Err(invalid(line_num, "face needs at least three vertices"));
                    }
                    let mut corners = Vec::with_capacity(args.len());
                    for arg in &args {
                        let key = parse_face_vertex(arg, positions.len(), tex_coords.len(), normals.len(), line_num)?;
                        corners.push(builder.vertex(key, &positions, &tex_coords, &normals));
                    }
                    for i in 1..corners.len() - 1 {
                        builder.indices.extend_from_slice(&[corners[0], corners[i], corners[i + 1]]);
                    }
                }
                "usemtl" => {
                    let material = args.first().map(|s| s.to_string());
                    let name = builder.name.clone();
                    builder.finish_into(&mut model);
                    builder = MeshBuilder::new(name, material);
                }
                "o" | "g" => {
                    let name = args.join(" ");
                    let material = builder.material.clone();
                    builder.finish_into(&mut model);
                    builder = MeshBuilder::new(name, material);
                }
                "mtllib" => {
                    let library = line[command.len()..].trim();
                    if !library.is_empty() {
                        model.material_libraries.push(library.to_string());
                    }
                }
                _ => {}
            }
        }
        builder.finish_into(&mut model);

        if model.meshes.is_empty() {
            return Err(AssetError::InvalidData("No faces found in OBJ file".to_string()));
        }
        Ok(model)
    }
}

/// Resolved indices of one face corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VertexKey {
    position: usize,
    tex_coord: Option<usize>,
    normal: Option<usize>,
}

struct MeshBuilder {
    name: String,
    material: Option<String>,
    vertices: Vec<f32>,
    indices: Vec<u32>,
    lookup: HashMap<VertexKey, u32>,
    position_of: Vec<usize>,
    missing_normals: Vec<u32>,
}

impl MeshBuilder {
    fn new(name: String, material: Option<String>) -> Self {
        Self {
            name,
            material,
            vertices: Vec::new(),
            indices: Vec::new(),
            lookup: HashMap::new(),
            position_of: Vec::new(),
            missing_normals: Vec::new(),
        }
    }

    fn vertex(&mut self, key: VertexKey, positions: &[Vec3], tex_coords: &[[f32; 2]], normals: &[Vec3]) -> u32 {
        if let Some(&index) = self.lookup.get(&key) {
            return index;
        }

        let index = (self.vertices.len() / FLOATS_PER_VERTEX) as u32;
        let position = positions[key.position];
        let normal = key.normal.map(|n| normals[n]);
        let uv = key.tex_coord.map(|t| tex_coords[t]).unwrap_or([0.0, 0.0]);
        let n = normal.unwrap_or_else(Vec3::zeros);

        self.vertices.extend_from_slice(&[position.x, position.y, position.z, n.x, n.y, n.z, uv[0], uv[1]]);
        self.position_of.push(key.position);
        if normal.is_none() {
            self.missing_normals.push(index);
        }
        self.lookup.insert(key, index);
        index
    }

    fn finish_into(mut self, model: &mut ObjModel) {
        if self.indices.is_empty() {
            return;
        }
        if !self.missing_normals.is_empty() {
            self.generate_smooth_normals();
        }
        model.meshes.push(ObjMesh {
            name: self.name,
            material: self.material,
            vertices: self.vertices,
            indices: self.indices,
        });
    }

    /// Area-weighted face normals accumulated per shared position
    fn generate_smooth_normals(&mut self) {
        let position = |v: &[f32], i: u32| {
            let base = i as usize * FLOATS_PER_VERTEX;
            Vec3::new(v[base], v[base + 1], v[base + 2])
        };

        let mut accumulated: HashMap<usize, Vec3> = HashMap::new();
        for triangle in self.indices.chunks_exact(3) {
            let a = position(&self.vertices, triangle[0]);
            let b = position(&self.vertices, triangle[1]);
            let c = position(&self.vertices, triangle[2]);
            let face = (b - a).cross(&(c - a));
            for &i in triangle {
                *accumulated.entry(self.position_of[i as usize]).or_insert_with(Vec3::zeros) += face;
            }
        }

        for &i in &self.missing_normals {
            let sum = accumulated.get(&self.position_of[i as usize]).copied().unwrap_or_else(Vec3::zeros);
            let normal = sum.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::y);
            let base = i as usize * FLOATS_PER_VERTEX + 3;
            self.vertices[base..base + 3].copy_from_slice(normal.as_slice());
        }
    }
}

fn invalid(line_num: usize, message: &str) -> AssetError {
    AssetError::InvalidData(format!("OBJ line {}: {}", line_num + 1, message))
}

fn parse_float(token: Option<&&str>, line_num: usize) -> Result<f32, AssetError> {
    token
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| invalid(line_num, "expected a number"))
}

fn parse_vec3(args: &[&str], line_num: usize) -> Result<Vec3, AssetError> {
    Ok(Vec3::new(
        parse_float(args.first(), line_num)?,
        parse_float(args.get(1), line_num)?,
        parse_float(args.get(2), line_num)?,
    ))
}

/// Resolve a 1-based (or negative, relative) OBJ index against `len`
fn resolve_index(token: &str, len: usize, line_num: usize) -> Result<usize, AssetError> {
    let raw: i64 = token
        .parse()
        .map_err(|_| invalid(line_num, &format!("bad index '{}'", token)))?;
    let resolved = match raw {
        0 => None,
        r if r > 0 => Some(r as usize - 1),
        r => (len as i64 + r).try_into().ok(),
    };
    resolved
        .filter(|&i| i < len)
        .ok_or_else(|| invalid(line_num, &format!("index {} out of range", raw)))
}

fn parse_face_vertex(
    token: &str,
    position_count: usize,
    tex_coord_count: usize,
    normal_count: usize,
    line_num: usize,
) -> Result<VertexKey, AssetError> {
    let mut fields = token.split('/');
    let position = resolve_index(fields.next().unwrap_or(""), position_count, line_num)?;
    let tex_coord = match fields.next() {
        Some(t) if !t.is_empty() => Some(resolve_index(t, tex_coord_count, line_num)?),
        _ => None,
    };
    let normal = match fields.next() {
        Some(n) if !n.is_empty() => Some(resolve_index(n, normal_count, line_num)?),
        _ => None,
    };
    Ok(VertexKey {
        position,
        tex_coord,
        normal,
    })
}
