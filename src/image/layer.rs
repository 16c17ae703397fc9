use std::rc::Rc;

use crate::texture::{Texture2D, TextureFormat};

/// GPU representation of a single image layer: one texture.
#[derive(Debug)]
pub struct LayerGl {
    texture: Texture2D,
}

impl LayerGl {
    /// Wraps the texture backing a layer.
    pub fn new(texture: Texture2D) -> LayerGl {
        LayerGl { texture }
    }

    /// The backing texture.
    pub fn texture(&self) -> &Texture2D {
        &self.texture
    }

    /// Width and height in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.texture.dimensions()
    }

    /// The pixel format of the backing texture.
    pub fn format(&self) -> TextureFormat {
        self.texture.format()
    }
}

/// One layer of an image as seen by its owner.
///
/// The owner side decides how representations are stored and when they are
/// re-created; [`ImageGl::update`](crate::image::ImageGl::update) only asks
/// for the current one. `representation` must not invalidate other
/// representations of the layer, `editable_representation` marks the
/// returned one as the authoritative copy.
pub trait LayerSource {
    /// The current GPU representation, for read-only use.
    fn representation(&self) -> Rc<LayerGl>;

    /// The current GPU representation, about to be written to.
    fn editable_representation(&mut self) -> Rc<LayerGl>;

    /// Changes the format the next representation will be created with.
    fn set_format(&mut self, format: TextureFormat);

    /// Changes the dimensions the next representation will be created with.
    fn set_dimensions(&mut self, dimensions: (u32, u32));
}

/// An image as seen by its owner: some color layers, an optional depth
/// layer and an optional picking layer.
pub trait ImageSource {
    /// Number of color layers.
    fn color_layer_count(&self) -> usize;

    /// The `index`-th color layer. Layer 0 is the primary one.
    fn color_layer_mut(&mut self, index: usize) -> &mut dyn LayerSource;

    /// The depth layer, if the image has one.
    fn depth_layer_mut(&mut self) -> Option<&mut dyn LayerSource>;

    /// The picking (object-id) layer, if the image has one.
    fn picking_layer_mut(&mut self) -> Option<&mut dyn LayerSource>;
}
