//! Per-element layout attributes.

use liftgrid_core::geometry::{Point, Rect, Size, Transform3D};
use liftgrid_core::index_path::IndexPath;
use serde::{Deserialize, Serialize};

/// What kind of element an attribute set describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementCategory {
    Cell,
    SupplementaryView,
    DecorationView,
}

/// Geometry and appearance of one element, as the renderer consumes it.
///
/// `frame` is authoritative; `center` is derived from it. The transform is
/// applied around the element's center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutAttributes {
    pub index_path: IndexPath,
    pub category: ElementCategory,
    pub frame: Rect,
    pub alpha: f64,
    pub transform: Transform3D,
    #[serde(default)]
    pub z_index: i32,
}

impl LayoutAttributes {
    /// Opaque, untransformed cell attributes.
    #[must_use]
    pub fn cell(index_path: IndexPath, frame: Rect) -> Self {
        Self {
            index_path,
            category: ElementCategory::Cell,
            frame,
            alpha: 1.0,
            transform: Transform3D::IDENTITY,
            z_index: 0,
        }
    }

    /// Opaque supplementary-view attributes (headers, footers).
    #[must_use]
    pub fn supplementary(index_path: IndexPath, frame: Rect) -> Self {
        Self {
            category: ElementCategory::SupplementaryView,
            ..Self::cell(index_path, frame)
        }
    }

    #[inline]
    #[must_use]
    pub fn center(&self) -> Point {
        self.frame.center()
    }

    /// Move the frame so its center lands on `center`.
    pub fn set_center(&mut self, center: Point) {
        self.frame = self.frame.with_center(center);
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> Size {
        self.frame.size()
    }

    #[inline]
    #[must_use]
    pub fn is_cell(&self) -> bool {
        self.category == ElementCategory::Cell
    }

    #[inline]
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.alpha <= 0.0
    }
}
