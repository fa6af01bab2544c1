// Copyright @yucwang 2023

use crate::math::constants::{Float, Vector3f};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use wavefront_obj::{obj, ParseError};

#[derive(Debug, Error)]
pub enum ObjLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("obj parse error: {0}")]
    Parse(ParseError),
    #[error("object `{object}` references vertex {index} but has {count} vertices")]
    VertexIndex {
        object: String,
        index: usize,
        count: usize,
    },
    #[error("obj contains no triangles")]
    Empty,
}

impl From<ParseError> for ObjLoadError {
    fn from(err: ParseError) -> Self {
        ObjLoadError::Parse(err)
    }
}

/// Parses OBJ text, fanning polygons with more than three corners into
/// triangles first.
pub fn load_obj_from_str<S: AsRef<str>>(input: S) -> Result<obj::ObjSet, ParseError> {
    let triangulated = triangulate_faces(input.as_ref());
    obj::parse(triangulated)
}

pub fn load_obj_from_file<P: AsRef<Path>>(path: P) -> Result<obj::ObjSet, ObjLoadError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| ObjLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Loading OBJ mesh from: {}.", path.display());
    Ok(load_obj_from_str(data)?)
}

/// Flattens every triangle of every object into world-space corner triples.
pub fn triangles_from_obj_set(obj_set: &obj::ObjSet) -> Result<Vec<[Vector3f; 3]>, ObjLoadError> {
    let mut triangles = Vec::new();
    for object in &obj_set.objects {
        let vertex = |index: usize| -> Result<Vector3f, ObjLoadError> {
            object
                .vertices
                .get(index)
                .map(|v| Vector3f::new(v.x as Float, v.y as Float, v.z as Float))
                .ok_or_else(|| ObjLoadError::VertexIndex {
                    object: object.name.clone(),
                    index,
                    count: object.vertices.len(),
                })
        };

        for geometry in &object.geometry {
            for shape in &geometry.shapes {
                if let obj::Primitive::Triangle(a, b, c) = &shape.primitive {
                    triangles.push([vertex(a.0)?, vertex(b.0)?, vertex(c.0)?]);
                }
            }
        }
    }

    if triangles.is_empty() {
        return Err(ObjLoadError::Empty);
    }
    Ok(triangles)
}

fn triangulate_faces(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 4);
    for line in input.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("f ") || trimmed.starts_with("f\t") {
            let parts: Vec<&str> = trimmed.split_whitespace().collect();
            if parts.len() > 4 {
                let base = parts[1];
                for pair in parts[2..].windows(2) {
                    out.push_str(&format!("f {} {} {}\n", base, pair[0], pair[1]));
                }
                continue;
            }
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}
