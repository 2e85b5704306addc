//! Virtual scrolling document: named blocks stacked top to bottom, each sized
//! in viewport heights, plus the clamped scroll offset over them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named block of the document, `height_vh` viewport heights tall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub height_vh: f32,
}

impl Block {
    pub fn new(id: impl Into<String>, height_vh: f32) -> Self {
        Self {
            id: id.into(),
            height_vh,
        }
    }
}

/// Element that a trigger is anchored to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// The whole document (the page body)
    Document,
    /// A block looked up by id
    Block(String),
}

impl Anchor {
    pub fn block(id: impl Into<String>) -> Self {
        Anchor::Block(id.into())
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Document => f.write_str("document"),
            Anchor::Block(id) => f.write_str(id),
        }
    }
}

/// Vertical extent in document pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    blocks: Vec<Block>,
}

impl PageLayout {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    pub fn document_height(&self, viewport_height: f32) -> f32 {
        self.blocks.iter().map(|b| b.height_vh).sum::<f32>() * viewport_height
    }

    pub fn max_scroll(&self, viewport_height: f32) -> f32 {
        (self.document_height(viewport_height) - viewport_height).max(0.0)
    }

    pub fn block_bounds(&self, index: usize, viewport_height: f32) -> Option<Bounds> {
        let block = self.blocks.get(index)?;
        let top = self.blocks[..index].iter().map(|b| b.height_vh).sum::<f32>() * viewport_height;
        Some(Bounds {
            top,
            bottom: top + block.height_vh * viewport_height,
        })
    }

    /// Bounds of `anchor`, looked up by id; `None` if the layout has no such block
    pub fn bounds(&self, anchor: &Anchor, viewport_height: f32) -> Option<Bounds> {
        match anchor {
            Anchor::Document => Some(Bounds {
                top: 0.0,
                bottom: self.document_height(viewport_height),
            }),
            Anchor::Block(id) => self.block_bounds(self.position(id)?, viewport_height),
        }
    }

    /// Id of the block under document position `y`
    pub fn block_at(&self, y: f32, viewport_height: f32) -> Option<&str> {
        let mut top = 0.0;
        for block in &self.blocks {
            let bottom = top + block.height_vh * viewport_height;
            if y >= top && y < bottom {
                return Some(&block.id);
            }
            top = bottom;
        }
        self.blocks.last().map(|b| b.id.as_str())
    }

    /// Check ids are unique and non-empty and heights are positive
    pub fn validate(&self) -> Result<(), String> {
        if self.blocks.is_empty() {
            return Err("page layout has no blocks".to_string());
        }
        for (i, block) in self.blocks.iter().enumerate() {
            if block.id.trim().is_empty() {
                return Err(format!("block {} has an empty id", i));
            }
            if !block.height_vh.is_finite() || block.height_vh <= 0.0 {
                return Err(format!(
                    "block '{}' has invalid height {}",
                    block.id, block.height_vh
                ));
            }
            if self.blocks[..i].iter().any(|b| b.id == block.id) {
                return Err(format!("duplicate block id '{}'", block.id));
            }
        }
        Ok(())
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new(vec![
            Block::new("intro", 1.0),
            Block::new("section1", 1.0),
            Block::new("section2", 1.0),
            Block::new("section3", 1.0),
            Block::new("outro", 0.5),
        ])
    }
}

/// Scroll offset in logical pixels, kept within `[0, max]`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    offset: f32,
    max: f32,
}

impl ScrollState {
    pub fn new(max: f32) -> Self {
        Self {
            offset: 0.0,
            max: max.max(0.0),
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Returns true if the offset changed
    pub fn scroll_to(&mut self, offset: f32) -> bool {
        let clamped = if offset.is_nan() {
            self.offset
        } else {
            offset.clamp(0.0, self.max)
        };
        let changed = clamped != self.offset;
        self.offset = clamped;
        changed
    }

    pub fn scroll_by(&mut self, delta: f32) -> bool {
        self.scroll_to(self.offset + delta)
    }

    /// Update the scroll range, re-clamping the current offset
    pub fn set_max(&mut self, max: f32) {
        self.max = max.max(0.0);
        self.offset = self.offset.min(self.max);
    }

    /// Whole-document scroll fraction in [0, 1]
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.offset / self.max
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_heights() {
        let page = PageLayout::default();
        assert!(page.validate().is_ok());
        assert_eq!(page.document_height(800.0), 3600.0);
        assert_eq!(page.max_scroll(800.0), 2800.0);
    }

    #[test]
    fn test_block_bounds_stack() {
        let page = PageLayout::default();
        let s1 = page.bounds(&Anchor::block("section1"), 800.0).unwrap();
        assert_eq!(s1, Bounds { top: 800.0, bottom: 1600.0 });
        let s3 = page.bounds(&Anchor::block("section3"), 800.0).unwrap();
        assert_eq!(s3.top, 2400.0);
        assert_eq!(s3.height(), 800.0);
        assert!(page.bounds(&Anchor::block("missing"), 800.0).is_none());
    }

    #[test]
    fn test_document_bounds() {
        let page = PageLayout::default();
        let body = page.bounds(&Anchor::Document, 100.0).unwrap();
        assert_eq!(body.top, 0.0);
        assert_eq!(body.bottom, 450.0);
    }

    #[test]
    fn test_block_at() {
        let page = PageLayout::default();
        assert_eq!(page.block_at(0.0, 100.0), Some("intro"));
        assert_eq!(page.block_at(150.0, 100.0), Some("section1"));
        assert_eq!(page.block_at(420.0, 100.0), Some("outro"));
        assert_eq!(page.block_at(10_000.0, 100.0), Some("outro"));
    }

    #[test]
    fn test_validate_rejects_bad_layouts() {
        assert!(PageLayout::new(vec![]).validate().is_err());
        assert!(PageLayout::new(vec![Block::new("", 1.0)]).validate().is_err());
        assert!(PageLayout::new(vec![Block::new("a", 0.0)]).validate().is_err());
        assert!(PageLayout::new(vec![Block::new("a", f32::NAN)]).validate().is_err());
        let dup = PageLayout::new(vec![Block::new("a", 1.0), Block::new("a", 1.0)]);
        assert!(dup.validate().unwrap_err().contains("duplicate"));
    }

    #[test]
    fn test_scroll_clamps() {
        let mut scroll = ScrollState::new(1000.0);
        assert!(!scroll.scroll_by(-50.0));
        assert_eq!(scroll.offset(), 0.0);

        assert!(scroll.scroll_by(400.0));
        assert_eq!(scroll.fraction(), 0.4);

        scroll.scroll_to(5000.0);
        assert_eq!(scroll.offset(), 1000.0);
        assert_eq!(scroll.fraction(), 1.0);
    }

    #[test]
    fn test_set_max_reclamps_offset() {
        let mut scroll = ScrollState::new(1000.0);
        scroll.scroll_to(900.0);
        scroll.set_max(600.0);
        assert_eq!(scroll.offset(), 600.0);

        scroll.set_max(2000.0);
        assert_eq!(scroll.offset(), 600.0);
    }

    #[test]
    fn test_fraction_of_unscrollable_page() {
        let scroll = ScrollState::new(0.0);
        assert_eq!(scroll.fraction(), 0.0);
    }
}
