//! Bevy mesh attachment for laid out text
//!
//! Each [`MeshSnippet`] becomes one triangle-list `Mesh` with 16-bit
//! indices. Channels 1 and 2 use Bevy's two built-in UV slots; channels 3
//! to 5 are custom `Float32x2` attributes a text material can read.

use crate::layout::{MeshSnippet, TextBlockMesh};
use bevy::prelude::Component;
use bevy::render::mesh::{Indices, Mesh, MeshVertexAttribute, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::VertexFormat;

/// Per-character UV (channel 3)
pub const ATTRIBUTE_UV_CHARACTER: MeshVertexAttribute =
    MeshVertexAttribute::new("Meshtext_Uv_Character", 988_540_917, VertexFormat::Float32x2);

/// Per-line UV (channel 4)
pub const ATTRIBUTE_UV_LINE: MeshVertexAttribute =
    MeshVertexAttribute::new("Meshtext_Uv_Line", 988_540_918, VertexFormat::Float32x2);

/// Per-block UV (channel 5)
pub const ATTRIBUTE_UV_BLOCK: MeshVertexAttribute =
    MeshVertexAttribute::new("Meshtext_Uv_Block", 988_540_919, VertexFormat::Float32x2);

/// Draw position of a snippet mesh within its text block
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SnippetDrawOrder(pub usize);

/// Build the render mesh for one snippet
pub fn snippet_to_mesh(snippet: &MeshSnippet) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, snippet.positions.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, snippet.uv1.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_1, snippet.uv2.clone());
    mesh.insert_attribute(ATTRIBUTE_UV_CHARACTER, snippet.uv3.clone());
    mesh.insert_attribute(ATTRIBUTE_UV_LINE, snippet.uv4.clone());
    mesh.insert_attribute(ATTRIBUTE_UV_BLOCK, snippet.uv5.clone());
    mesh.insert_indices(Indices::U16(snippet.indices.clone()));
    mesh
}

/// Render meshes for every snippet of a block, paired with their draw order
pub fn text_block_meshes(block: &TextBlockMesh) -> Vec<(Mesh, SnippetDrawOrder)> {
    block
        .snippets
        .iter()
        .map(|snippet| (snippet_to_mesh(snippet), SnippetDrawOrder(snippet.draw_order)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{GlyphPosition, TextSnippet};
    use bevy::render::mesh::VertexAttributeValues;

    fn triangle_snippet(draw_order: usize) -> MeshSnippet {
        MeshSnippet {
            draw_order,
            range: TextSnippet {
                start: GlyphPosition::new(0, 0),
                end: GlyphPosition::new(1, 0),
                vertex_count: 3,
                index_count: 3,
                vertex_offset: 0,
            },
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            uv1: vec![[0.0, 0.0], [10.0, 0.0], [0.0, 10.0]],
            uv2: vec![[1.0, 0.0]; 3],
            uv3: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
            uv4: vec![[0.5, 0.5]; 3],
            uv5: vec![[0.25, 0.75]; 3],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn snippet_becomes_u16_triangle_list() {
        let mesh = snippet_to_mesh(&triangle_snippet(0));
        assert_eq!(mesh.primitive_topology(), PrimitiveTopology::TriangleList);
        assert_eq!(mesh.count_vertices(), 3);
        assert!(matches!(mesh.indices(), Some(Indices::U16(indices)) if indices == &vec![0, 1, 2]));

        match mesh.attribute(ATTRIBUTE_UV_BLOCK) {
            Some(VertexAttributeValues::Float32x2(values)) => assert_eq!(values[0], [0.25, 0.75]),
            other => panic!("unexpected block uv attribute {other:?}"),
        }
        match mesh.attribute(Mesh::ATTRIBUTE_UV_0) {
            Some(VertexAttributeValues::Float32x2(values)) => assert_eq!(values[1], [10.0, 0.0]),
            other => panic!("unexpected uv0 attribute {other:?}"),
        }
    }

    #[test]
    fn block_meshes_keep_draw_order() {
        let block = TextBlockMesh {
            snippets: vec![triangle_snippet(0), triangle_snippet(1)],
            width: 1.0,
            height: 1.0,
            line_widths: vec![1.0],
        };
        let meshes = text_block_meshes(&block);
        let orders: Vec<SnippetDrawOrder> = meshes.iter().map(|(_, order)| *order).collect();
        assert_eq!(orders, vec![SnippetDrawOrder(0), SnippetDrawOrder(1)]);
    }
}
