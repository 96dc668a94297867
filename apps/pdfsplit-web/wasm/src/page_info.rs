//! Per-page metadata for the page-grid preview
//!
//! The split UI renders a grid of page tiles; each tile needs the page's
//! dimensions and rotation before any thumbnail is available.

use lopdf::{Dictionary, Document, Object};
use serde::Serialize;

/// Metadata for one page of the loaded document
#[derive(Debug, Clone, Serialize)]
pub struct PageInfo {
    /// Page number (1-indexed)
    pub page_num: u32,
    /// Width in points
    pub width: f32,
    /// Height in points
    pub height: f32,
    /// Rotation in degrees: 0, 90, 180 or 270
    pub rotation: i32,
    pub orientation: PageOrientation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PageOrientation {
    Portrait,
    Landscape,
    Square,
}

impl PageInfo {
    pub fn from_document(doc: &Document, page_num: u32) -> Result<Self, String> {
        let pages = doc.get_pages();
        let page_id = pages
            .get(&page_num)
            .ok_or_else(|| format!("Page {} not found", page_num))?;

        let page_dict = doc
            .objects
            .get(page_id)
            .and_then(|obj| obj.as_dict().ok())
            .ok_or_else(|| format!("Page {} is not a dictionary", page_num))?;

        // MediaBox and Rotate are inheritable page attributes; walk up the
        // page tree until one is found
        let media_box = inherited_attr(doc, page_dict, b"MediaBox")
            .and_then(|obj| box_coords(&obj))
            .unwrap_or([0.0, 0.0, 612.0, 792.0]);

        let rotation = inherited_attr(doc, page_dict, b"Rotate")
            .and_then(|obj| obj.as_i64().ok())
            .map(|angle| (angle as i32).rem_euclid(360))
            .unwrap_or(0);

        let (width, height) = (media_box[2] - media_box[0], media_box[3] - media_box[1]);

        // Swap the axes for sideways pages before judging orientation
        let (display_w, display_h) = if rotation == 90 || rotation == 270 {
            (height, width)
        } else {
            (width, height)
        };

        let orientation = if (display_w - display_h).abs() < 1.0 {
            PageOrientation::Square
        } else if display_w > display_h {
            PageOrientation::Landscape
        } else {
            PageOrientation::Portrait
        };

        Ok(Self {
            page_num,
            width: width as f32,
            height: height as f32,
            rotation,
            orientation,
        })
    }

    /// Infos for every page, in page order; unreadable pages become errors
    /// in place so the grid can still render the rest.
    pub fn all_from_document(doc: &Document) -> Vec<Result<Self, String>> {
        let page_count = doc.get_pages().len() as u32;
        (1..=page_count)
            .map(|page_num| Self::from_document(doc, page_num))
            .collect()
    }
}

/// Look up an inheritable attribute on a page dictionary, following Parent
/// references up the page tree. Bounded to guard against reference cycles.
fn inherited_attr(doc: &Document, page_dict: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut dict = page_dict.clone();
    for _ in 0..16 {
        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }
        let parent_id = dict.get(b"Parent").ok()?.as_reference().ok()?;
        dict = doc.objects.get(&parent_id)?.as_dict().ok()?.clone();
    }
    None
}

/// Coordinates of a box array [x1, y1, x2, y2]
fn box_coords(obj: &Object) -> Option<[f64; 4]> {
    let array = obj.as_array().ok()?;
    if array.len() != 4 {
        return None;
    }

    let mut coords = [0.0; 4];
    for (slot, element) in coords.iter_mut().zip(array) {
        *slot = match element {
            Object::Integer(n) => *n as f64,
            Object::Real(n) => *n as f64,
            _ => return None,
        };
    }
    Some(coords)
}
