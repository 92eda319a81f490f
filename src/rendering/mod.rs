//! Renderer attachment
//!
//! Hands laid out text to Bevy as ready-made meshes. Uploading, materials
//! and shaders stay with the host application.

pub mod bevy_mesh;

pub use bevy_mesh::{
    snippet_to_mesh, text_block_meshes, SnippetDrawOrder, ATTRIBUTE_UV_BLOCK,
    ATTRIBUTE_UV_CHARACTER, ATTRIBUTE_UV_LINE,
};
