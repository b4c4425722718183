//! MTL (Material Template Library) file parser
//!
//! Only the Phong terms and texture maps the lit shaders consume are kept.

use std::collections::HashMap;

use crate::assets::AssetError;
use crate::foundation::math::Vec3;

/// Parsed MTL material
#[derive(Debug, Clone, PartialEq)]
pub struct MtlData {
    /// Material name
    pub name: String,
    /// Diffuse colour (Kd)
    pub diffuse: Vec3,
    /// Specular colour (Ks)
    pub specular: Vec3,
    /// Specular exponent (Ns)
    pub specular_exponent: f32,
    /// Diffuse texture maps (map_Kd), in file order
    pub diffuse_maps: Vec<String>,
    /// Specular texture maps (map_Ks), in file order
    pub specular_maps: Vec<String>,
}

impl MtlData {
    fn named(name: String) -> Self {
        Self {
            name,
            diffuse: Vec3::new(0.8, 0.8, 0.8),
            specular: Vec3::new(0.5, 0.5, 0.5),
            specular_exponent: 32.0,
            diffuse_maps: Vec::new(),
            specular_maps: Vec::new(),
        }
    }
}

/// MTL file parser
pub struct MtlParser;

impl MtlParser {
    /// Parse MTL text into a map of material name to data
    pub fn parse(contents: &str) -> Result<HashMap<String, MtlData>, AssetError> {
        let mut materials = HashMap::new();
        let mut current: Option<MtlData> = None;

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let Some(command) = tokens.next() else { continue };

            if command == "newmtl" {
                if let Some(mat) = current.take() {
                    materials.insert(mat.name.clone(), mat);
                }
                let name = tokens
                    .next()
                    .ok_or_else(|| invalid(line_num, "newmtl missing material name"))?;
                current = Some(MtlData::named(name.to_string()));
                continue;
            }

            let Some(mat) = current.as_mut() else { continue };
            match command {
                "Kd" => mat.diffuse = parse_vec3(&mut tokens, line_num, command)?,
                "Ks" => mat.specular = parse_vec3(&mut tokens, line_num, command)?,
                "Ns" => mat.specular_exponent = parse_f32(tokens.next(), line_num, command)?,
                "map_Kd" => mat.diffuse_maps.push(texture_path(line, line_num, command)?),
                "map_Ks" => mat.specular_maps.push(texture_path(line, line_num, command)?),
                _ => {}
            }
        }

        if let Some(mat) = current {
            materials.insert(mat.name.clone(), mat);
        }
        Ok(materials)
    }
}

fn invalid(line_num: usize, message: &str) -> AssetError {
    AssetError::InvalidData(format!("MTL line {}: {}", line_num + 1, message))
}

fn parse_f32(token: Option<&str>, line_num: usize, command: &str) -> Result<f32, AssetError> {
    token
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| invalid(line_num, &format!("{} expects a number", command)))
}

fn parse_vec3<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    line_num: usize,
    command: &str,
) -> Result<Vec3, AssetError> {
    let x = parse_f32(tokens.next(), line_num, command)?;
    let y = parse_f32(tokens.next(), line_num, command)?;
    let z = parse_f32(tokens.next(), line_num, command)?;
    Ok(Vec3::new(x, y, z))
}

/// Last token of the line; map options such as `-bm 1.0` precede it
fn texture_path(line: &str, line_num: usize, command: &str) -> Result<String, AssetError> {
    line.split_whitespace()
        .skip(1)
        .last()
        .map(str::to_string)
        .ok_or_else(|| invalid(line_num, &format!("{} missing texture path", command)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOAL_MTL: &str = "\
# goal materials
newmtl net
Ns 10.0
Kd 0.9 0.9 0.9
map_Kd net_diffuse.jpg

newmtl frame
Ks 1 1 1
map_Kd -bm 0.5 frame.png
map_Ks frame_spec.png
";

    #[test]
    fn test_parses_materials_and_maps() {
        let materials = MtlParser::parse(GOAL_MTL).unwrap();
        assert_eq!(materials.len(), 2);

        let net = &materials["net"];
        assert_eq!(net.specular_exponent, 10.0);
        assert_eq!(net.diffuse_maps, vec!["net_diffuse.jpg".to_string()]);
        assert!(net.specular_maps.is_empty());

        let frame = &materials["frame"];
        assert_eq!(frame.diffuse_maps, vec!["frame.png".to_string()]);
        assert_eq!(frame.specular_maps, vec!["frame_spec.png".to_string()]);
        assert_eq!(frame.specular, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_statements_before_newmtl_are_ignored() {
        let materials = MtlParser::parse("Kd 1 0 0\nnewmtl a\n").unwrap();
        assert_eq!(materials["a"].diffuse, Vec3::new(0.8, 0.8, 0.8));
    }

    #[test]
    fn test_bad_number_reports_line() {
        let err = MtlParser::parse("newmtl a\nKd 1 nope 0\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
