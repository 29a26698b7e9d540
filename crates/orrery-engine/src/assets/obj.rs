use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::SplitWhitespace;

use glam::{Vec2, Vec3};
use thiserror::Error;

use super::mesh::{MeshData, MeshError};

#[derive(Debug, Error)]
pub enum ObjError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid mesh: {0}")]
    InvalidMesh(#[from] MeshError),
}

fn parse_error(line: usize, message: impl Into<String>) -> ObjError {
    ObjError::Parse {
        line,
        message: message.into(),
    }
}

/// Wavefront OBJ reader producing non-indexed triangles.
///
/// Understands `v`, `vt`, `vn` and `f` in the `p`, `p/t`, `p//n` and `p/t/n` forms,
/// with 1-based or negative (relative) indices. Polygons are fan-triangulated.
/// Corners without a texture coordinate get `(0, 0)`; corners without a normal
/// get the flat normal of their triangle. `v` is flipped so texture rows run top
/// to bottom. Other statements (`o`, `g`, `s`, `usemtl`, `mtllib`) are ignored.
pub struct ObjLoader;

#[derive(Debug, Copy, Clone)]
struct Corner {
    position: usize,
    uv: Option<usize>,
    normal: Option<usize>,
}

#[derive(Default)]
struct Attributes {
    positions: Vec<Vec3>,
    uvs: Vec<Vec2>,
    normals: Vec<Vec3>,
}

impl ObjLoader {
    pub fn load(path: impl AsRef<Path>) -> Result<MeshData, ObjError> {
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    pub fn parse<R: BufRead>(reader: R) -> Result<MeshData, ObjError> {
        let mut attrs = Attributes::default();
        let mut out = Attributes::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;

            let content = match line.split_once('#') {
                Some((before, _)) => before,
                None => line.as_str(),
            };
            let mut parts = content.split_whitespace();
            let Some(tag) = parts.next() else {
                continue;
            };

            match tag {
                "v" => {
                    let [x, y, z] = parse_floats::<3>(&mut parts, line_no)?;
                    attrs.positions.push(Vec3::new(x, y, z));
                }
                "vt" => {
                    let [u, v] = parse_floats::<2>(&mut parts, line_no)?;
                    attrs.uvs.push(Vec2::new(u, 1.0 - v));
                }
                "vn" => {
                    let [x, y, z] = parse_floats::<3>(&mut parts, line_no)?;
                    attrs.normals.push(Vec3::new(x, y, z));
                }
                "f" => {
                    let corners = parts
                        .map(|token| parse_corner(token, &attrs, line_no))
                        .collect::<Result<Vec<_>, _>>()?;
                    if corners.len() < 3 {
                        return Err(parse_error(
                            line_no,
                            format!("face has {} corners, need at least 3", corners.len()),
                        ));
                    }

                    for i in 1..corners.len() - 1 {
                        emit_triangle(&attrs, [corners[0], corners[i], corners[i + 1]], &mut out);
                    }
                }
                _ => {}
            }
        }

        Ok(MeshData::new(out.positions, out.uvs, out.normals)?)
    }
}

fn parse_floats<const N: usize>(
    parts: &mut SplitWhitespace<'_>,
    line: usize,
) -> Result<[f32; N], ObjError> {
    let mut values = [0.0; N];
    for (i, slot) in values.iter_mut().enumerate() {
        let token = parts
            .next()
            .ok_or_else(|| parse_error(line, format!("expected {N} numbers, found {i}")))?;
        *slot = token
            .parse()
            .map_err(|_| parse_error(line, format!("`{token}` is not a number")))?;
    }
    Ok(values)
}

fn parse_corner(token: &str, attrs: &Attributes, line: usize) -> Result<Corner, ObjError> {
    let mut fields = token.split('/');

    let position = match fields.next() {
        Some(raw) if !raw.is_empty() => resolve_index(raw, attrs.positions.len(), line, "position")?,
        _ => return Err(parse_error(line, format!("face corner `{token}` has no position"))),
    };

    let uv = match fields.next() {
        Some(raw) if !raw.is_empty() => Some(resolve_index(raw, attrs.uvs.len(), line, "uv")?),
        _ => None,
    };

    let normal = match fields.next() {
        Some(raw) if !raw.is_empty() => {
            Some(resolve_index(raw, attrs.normals.len(), line, "normal")?)
        }
        _ => None,
    };

    Ok(Corner {
        position,
        uv,
        normal,
    })
}

/// Converts a 1-based (or negative, relative-to-end) OBJ index to a 0-based one.
fn resolve_index(raw: &str, len: usize, line: usize, what: &str) -> Result<usize, ObjError> {
    let value: i64 = raw
        .parse()
        .map_err(|_| parse_error(line, format!("`{raw}` is not a {what} index")))?;

    let resolved = match value {
        v if v > 0 => Some(v as usize - 1),
        v if v < 0 => len.checked_sub(v.unsigned_abs() as usize),
        _ => None,
    };

    resolved
        .filter(|&i| i < len)
        .ok_or_else(|| parse_error(line, format!("{what} index {value} out of range ({len} defined)")))
}

fn emit_triangle(attrs: &Attributes, corners: [Corner; 3], out: &mut Attributes) {
    let p = corners.map(|c| attrs.positions[c.position]);
    let flat = (p[1] - p[0]).cross(p[2] - p[0]).normalize_or_zero();

    for (corner, position) in corners.into_iter().zip(p) {
        out.positions.push(position);
        out.uvs
            .push(corner.uv.map_or(Vec2::ZERO, |i| attrs.uvs[i]));
        out.normals
            .push(corner.normal.map_or(flat, |i| attrs.normals[i]));
    }
}
