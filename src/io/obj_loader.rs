use crate::core::geometry::Vertex;
use crate::error::{Error, Result};
use crate::scene::mesh::Mesh;
use crate::scene::node::SceneNode;
use log::{info, warn};
use nalgebra::{Point3, Vector2, Vector3};
use std::path::Path;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true, // Important: Unifies indices for Position/Normal/UV
        ..Default::default()
    }
}

/// Loads an OBJ file into a scene node with one child per OBJ object.
///
/// Materials are ignored; previews only need geometry.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<SceneNode> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::AssetNotFound(path.display().to_string()));
    }

    info!("Loading OBJ file: {}", path.display());

    let (models, _materials) =
        tobj::load_obj(path, &load_options()).map_err(|source| Error::Obj {
            path: path.display().to_string(),
            source,
        })?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "asset".to_string());
    let node = build_node(name, models);

    info!(
        "OBJ loaded successfully. Parts: {}, total vertices: {}",
        node.children.len(),
        node.vertex_count()
    );

    Ok(node)
}

/// Parses OBJ source held in memory. `mtllib` references are not resolved.
pub fn parse_obj(name: &str, source: &str) -> Result<SceneNode> {
    let mut reader = source.as_bytes();
    let (models, _materials) =
        tobj::load_obj_buf(&mut reader, &load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })
        .map_err(|source| Error::Obj {
            path: name.to_string(),
            source,
        })?;

    Ok(build_node(name.to_string(), models))
}

fn build_node(name: String, models: Vec<tobj::Model>) -> SceneNode {
    let mut root = SceneNode::group(name);
    for model in models {
        let part_name = if model.name.is_empty() {
            format!("part{}", root.children.len())
        } else {
            model.name.clone()
        };
        root.add_child(SceneNode::with_mesh(part_name, convert_mesh(&model)));
    }
    root
}

fn convert_mesh(model: &tobj::Model) -> Mesh {
    let mesh = &model.mesh;
    let num_vertices = mesh.positions.len() / 3;

    let has_normals = !mesh.normals.is_empty();
    let has_texcoords = !mesh.texcoords.is_empty();

    if !has_normals {
        warn!(
            "Mesh '{}' is missing normals. Using default (0, 1, 0).",
            model.name
        );
    }

    let vertices = (0..num_vertices)
        .map(|i| {
            let position = Point3::new(
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2],
            );
            let normal = if has_normals {
                Vector3::new(
                    mesh.normals[i * 3],
                    mesh.normals[i * 3 + 1],
                    mesh.normals[i * 3 + 2],
                )
            } else {
                Vector3::y()
            };
            let texcoord = if has_texcoords {
                Vector2::new(mesh.texcoords[i * 2], mesh.texcoords[i * 2 + 1])
            } else {
                Vector2::zeros()
            };
            Vertex::new(position, normal, texcoord)
        })
        .collect();

    Mesh::new(vertices, mesh.indices.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PARTS: &str = "\
o cup
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
o handle
v 2 0 0
v 3 0 0
v 3 1 1
f 5 6 7
";

    #[test]
    fn objects_become_children() {
        let node = parse_obj("mug", TWO_PARTS).unwrap();
        assert_eq!(node.name, "mug");
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].name, "cup");
        assert_eq!(node.children[1].name, "handle");

        // The quad is triangulated.
        let cup = node.children[0].mesh.as_ref().unwrap();
        assert_eq!(cup.indices.len(), 6);
    }

    #[test]
    fn bounds_cover_all_parts() {
        let node = parse_obj("mug", TWO_PARTS).unwrap();
        let aabb = node.world_bounds();
        assert_eq!(aabb.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(aabb.max, Point3::new(3.0, 1.0, 1.0));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_obj("does/not/exist.obj").unwrap_err();
        assert!(matches!(err, Error::AssetNotFound(_)));
    }

    #[test]
    fn missing_normals_default_up() {
        let node = parse_obj("mug", TWO_PARTS).unwrap();
        let handle = node.children[1].mesh.as_ref().unwrap();
        assert!(handle.vertices.iter().all(|v| v.normal == Vector3::y()));
    }
}
