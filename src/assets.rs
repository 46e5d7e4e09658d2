//! Sprite and background images
//!
//! All five images load asynchronously and count as ready only once every
//! one of them decodes. Any failure leaves the renderer on solid-color
//! primitives for the rest of the session.

/// Every image the renderer knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Player,
    Kebab,
    Bomb,
    /// Far background layer
    Layer1,
    /// Near background layer
    Layer2,
}

impl SpriteId {
    pub const ALL: [SpriteId; 5] = [
        SpriteId::Player,
        SpriteId::Kebab,
        SpriteId::Bomb,
        SpriteId::Layer1,
        SpriteId::Layer2,
    ];

    /// Path relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            SpriteId::Player => "sprites/player.svg",
            SpriteId::Kebab => "sprites/kebab.svg",
            SpriteId::Bomb => "sprites/bomb.svg",
            SpriteId::Layer1 => "background/layer1.svg",
            SpriteId::Layer2 => "background/layer2.svg",
        }
    }

    /// On-screen size in canvas pixels
    pub fn draw_size(&self) -> (f32, f32) {
        match self {
            SpriteId::Player => (96.0, 64.0),
            SpriteId::Kebab => (28.0, 28.0),
            SpriteId::Bomb => (32.0, 32.0),
            SpriteId::Layer1 | SpriteId::Layer2 => (
                crate::consts::CANVAS_WIDTH,
                crate::consts::CANVAS_HEIGHT,
            ),
        }
    }

    /// Pixel size the vector image is rasterized at before upload.
    ///
    /// Sprites get 2x for high-DPI screens; backgrounds stay at canvas size.
    pub fn raster_size(&self) -> (u32, u32) {
        let (w, h) = self.draw_size();
        let scale = match self {
            SpriteId::Layer1 | SpriteId::Layer2 => 1.0,
            _ => 2.0,
        };
        ((w * scale) as u32, (h * scale) as u32)
    }

    pub fn index(&self) -> usize {
        match self {
            SpriteId::Player => 0,
            SpriteId::Kebab => 1,
            SpriteId::Bomb => 2,
            SpriteId::Layer1 => 3,
            SpriteId::Layer2 => 4,
        }
    }
}

/// Decoded RGBA pixels ready for GPU upload
#[derive(Debug, Clone)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl TextureData {
    /// Pixel buffer matches the stated dimensions
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0 && self.data.len() == (self.width * self.height * 4) as usize
    }
}

/// The complete image set, only constructed when every image decoded
#[derive(Debug, Clone)]
pub struct SpriteSet {
    textures: Vec<TextureData>,
}

impl SpriteSet {
    /// Assemble the set from per-image results; any gap or bad image means
    /// no set at all.
    pub fn from_results(results: Vec<(SpriteId, Option<TextureData>)>) -> Option<Self> {
        let mut slots: Vec<Option<TextureData>> = vec![None; SpriteId::ALL.len()];
        for (id, texture) in results {
            slots[id.index()] = texture.filter(TextureData::is_valid);
        }
        let textures = slots.into_iter().collect::<Option<Vec<_>>>()?;
        Some(Self { textures })
    }

    pub fn texture(&self, id: SpriteId) -> &TextureData {
        &self.textures[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpriteId, &TextureData)> {
        SpriteId::ALL.iter().map(move |&id| (id, self.texture(id)))
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::load_sprites;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

    use super::{SpriteId, SpriteSet, TextureData};

    /// Load and rasterize every image. `None` if any of them fails.
    pub async fn load_sprites() -> Option<SpriteSet> {
        let mut results = Vec::with_capacity(SpriteId::ALL.len());
        for id in SpriteId::ALL {
            let texture = load_one(id).await;
            if texture.is_none() {
                log::warn!("Asset {} unavailable, using primitive fallback", id.path());
                return None;
            }
            results.push((id, texture));
        }
        let set = SpriteSet::from_results(results);
        if set.is_some() {
            log::info!("All {} assets loaded", SpriteId::ALL.len());
        }
        set
    }

    async fn load_one(id: SpriteId) -> Option<TextureData> {
        let img = HtmlImageElement::new().ok()?;
        img.set_src(id.path());
        JsFuture::from(img.decode()).await.ok()?;

        let (width, height) = id.raster_size();
        let document = web_sys::window()?.document()?;
        let canvas: HtmlCanvasElement = document.create_element("canvas").ok()?.dyn_into().ok()?;
        canvas.set_width(width);
        canvas.set_height(height);
        let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
        ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &img,
            0.0,
            0.0,
            width as f64,
            height as f64,
        )
        .ok()?;
        let pixels = ctx
            .get_image_data(0.0, 0.0, width as f64, height as f64)
            .ok()?;

        Some(TextureData {
            data: pixels.data().0,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(id: SpriteId) -> TextureData {
        let (width, height) = id.raster_size();
        TextureData {
            data: vec![255; (width * height * 4) as usize],
            width,
            height,
        }
    }

    #[test]
    fn test_complete_set() {
        let results = SpriteId::ALL.iter().map(|&id| (id, Some(solid(id)))).collect();
        let set = SpriteSet::from_results(results).unwrap();
        assert_eq!(set.texture(SpriteId::Player).width, 192);
        assert_eq!(set.iter().count(), 5);
    }

    #[test]
    fn test_one_failure_means_no_set() {
        let results = SpriteId::ALL
            .iter()
            .map(|&id| (id, (id != SpriteId::Bomb).then(|| solid(id))))
            .collect();
        assert!(SpriteSet::from_results(results).is_none());
    }

    #[test]
    fn test_missing_entry_means_no_set() {
        let results = vec![(SpriteId::Player, Some(solid(SpriteId::Player)))];
        assert!(SpriteSet::from_results(results).is_none());
    }

    #[test]
    fn test_truncated_pixels_rejected() {
        let mut results: Vec<_> = SpriteId::ALL.iter().map(|&id| (id, Some(solid(id)))).collect();
        if let Some(tex) = results[1].1.as_mut() {
            tex.data.truncate(4);
        }
        assert!(SpriteSet::from_results(results).is_none());
    }

    #[test]
    fn test_paths_and_sizes() {
        assert_eq!(SpriteId::Layer2.path(), "background/layer2.svg");
        assert_eq!(SpriteId::Kebab.draw_size(), (28.0, 28.0));
        assert_eq!(SpriteId::Layer1.raster_size(), (420, 720));
    }
}
