//! UI text node

use crate::actions::Action;
use scene_engine::assets::Font;
use scene_engine::foundation::math::Mat3;
use scene_engine::render::{DrawCommand, RenderTarget, Visual};
use scene_engine::scene::{Category, SceneNode};

/// A line of text at the node's position
#[derive(Debug, Clone)]
pub struct TextNode {
    font: Font,
    string: String,
    character_size: u32,
}

impl TextNode {
    /// Create an empty text node
    pub fn new(font: Font, character_size: u32) -> Self {
        Self {
            font,
            string: String::new(),
            character_size,
        }
    }

    /// Current string
    pub fn string(&self) -> &str {
        &self.string
    }

    /// Replace the displayed string
    pub fn set_string(&mut self, string: impl Into<String>) {
        self.string = string.into();
    }
}

impl SceneNode<Action> for TextNode {
    fn category(&self) -> Category {
        Category::TEXT
    }

    fn draw_current(&self, transform: &Mat3, target: &mut dyn RenderTarget) {
        if self.string.is_empty() {
            return;
        }
        target.submit(DrawCommand::new(
            *transform,
            Visual::Text {
                font: self.font.clone(),
                string: self.string.clone(),
                character_size: self.character_size,
            },
        ));
    }
}
