use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, OnceLock},
};

use ab_glyph::{Font, FontArc, FontVec, PxScale, ScaleFont};
use anyhow::Context;

use crate::{
    assets::bitmap::BitmapFont,
    foundation::error::{MemeError, MemeResult},
};

/// Paths tried when `FontConfig::well_known_paths` is set.
const WELL_KNOWN_FONT_PATHS: &[&str] = &[
    "assets/Impact.ttf",
    "fonts/Impact.ttf",
    "C:\\Windows\\Fonts\\impact.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Impact.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Impact.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
];

/// Families queried from the system font database, in order.
const SYSTEM_FAMILIES: &[&str] = &[
    "Impact",
    "Anton",
    "DejaVu Sans",
    "Liberation Sans",
    "Arial",
    "Helvetica",
    "Noto Sans",
];

/// Where fonts are looked up, in priority order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Explicit font files.
    pub font_files: Vec<PathBuf>,
    /// Directories scanned for `.ttf`/`.otf`/`.ttc` files (an `impact.*` file wins).
    pub font_dirs: Vec<PathBuf>,
    /// Try a fixed list of common Impact and sans-serif font locations.
    pub well_known_paths: bool,
    /// Query the system font database.
    pub system_fonts: bool,
    /// Fall back to the built-in bitmap font when nothing else loads.
    pub builtin_fallback: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            font_files: Vec::new(),
            font_dirs: vec![PathBuf::from("fonts"), PathBuf::from("assets")],
            well_known_paths: true,
            system_fonts: true,
            builtin_fallback: true,
        }
    }
}

impl FontConfig {
    /// Skip every external source and use the bitmap font. Fully reproducible across machines.
    pub fn builtin_only() -> Self {
        Self {
            font_files: Vec::new(),
            font_dirs: Vec::new(),
            well_known_paths: false,
            system_fonts: false,
            builtin_fallback: true,
        }
    }
}

/// Outline font loaded from TrueType/OpenType bytes.
#[derive(Clone)]
pub struct OutlineFont {
    font: FontArc,
    bytes: Arc<Vec<u8>>,
}

impl std::fmt::Debug for OutlineFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFont")
            .field("font_bytes_len", &self.bytes.len())
            .finish()
    }
}

impl OutlineFont {
    /// Parse font bytes; `.ttc` collections use their first face unless `index` says otherwise.
    pub fn from_bytes(bytes: Vec<u8>, index: u32) -> MemeResult<Self> {
        let font = FontVec::try_from_vec_and_index(bytes.clone(), index)
            .map_err(|e| MemeError::font_unavailable(format!("invalid font data: {e}")))?;
        Ok(Self {
            font: FontArc::new(font),
            bytes: Arc::new(bytes),
        })
    }
}

/// A resolved font: either an outline font or the built-in bitmap fallback.
#[derive(Clone, Debug)]
pub enum FontFace {
    Outline {
        font: OutlineFont,
        /// Path or family the font came from.
        source: String,
    },
    Bitmap(BitmapFont),
}

impl FontFace {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Outline { .. } => "outline",
            Self::Bitmap(_) => "bitmap",
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Self::Outline { source, .. } => source,
            Self::Bitmap(_) => "builtin:5x7",
        }
    }

    /// Bytes identifying the font, for diagnostics digests.
    pub fn identity_bytes(&self) -> Vec<u8> {
        match self {
            Self::Outline { font, .. } => font.bytes.as_ref().clone(),
            Self::Bitmap(b) => b.table_bytes(),
        }
    }

    /// Height of one line at `px`.
    pub fn line_height(&self, px: u32) -> u32 {
        match self {
            Self::Outline { font, .. } => {
                let scaled = font.font.as_scaled(PxScale::from(px as f32));
                (scaled.ascent() - scaled.descent()).ceil().max(1.0) as u32
            }
            Self::Bitmap(b) => b.line_height(px),
        }
    }

    /// Mean advance of `A`..`Z` at `px`.
    pub fn avg_advance(&self, px: u32) -> f32 {
        match self {
            Self::Outline { font, .. } => {
                let scaled = font.font.as_scaled(PxScale::from(px as f32));
                let total: f32 = ('A'..='Z')
                    .map(|ch| scaled.h_advance(scaled.glyph_id(ch)))
                    .sum();
                total / 26.0
            }
            Self::Bitmap(b) => b.advance(px) as f32,
        }
    }

    /// Pixel width of a single line of text.
    pub fn measure(&self, text: &str, px: u32) -> u32 {
        match self {
            Self::Outline { font, .. } => {
                let scaled = font.font.as_scaled(PxScale::from(px as f32));
                let mut caret = 0.0f32;
                let mut prev = None;
                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(p) = prev {
                        caret += scaled.kern(p, id);
                    }
                    caret += scaled.h_advance(id);
                    prev = Some(id);
                }
                caret.ceil().max(0.0) as u32
            }
            Self::Bitmap(b) => b.measure(text, px),
        }
    }

    /// Rasterize one line with its line box top-left at `(x, y)`, reporting glyph coverage.
    pub fn draw_line(
        &self,
        text: &str,
        px: u32,
        x: i32,
        y: i32,
        plot: &mut dyn FnMut(i32, i32, f32),
    ) {
        match self {
            Self::Outline { font, .. } => {
                let scale = PxScale::from(px as f32);
                let scaled = font.font.as_scaled(scale);
                let baseline = y as f32 + scaled.ascent();
                let mut caret = x as f32;
                let mut prev = None;
                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(p) = prev {
                        caret += scaled.kern(p, id);
                    }
                    let glyph = id.with_scale_and_position(scale, ab_glyph::point(caret, baseline));
                    if let Some(outlined) = font.font.outline_glyph(glyph) {
                        let bounds = outlined.px_bounds();
                        let (ox, oy) = (bounds.min.x as i32, bounds.min.y as i32);
                        outlined.draw(|gx, gy, coverage| {
                            plot(ox + gx as i32, oy + gy as i32, coverage);
                        });
                    }
                    caret += scaled.h_advance(id);
                    prev = Some(id);
                }
            }
            Self::Bitmap(b) => b.draw(text, px, x, y, plot),
        }
    }
}

/// Resolve a font from `cfg` without touching the process-wide cache.
pub fn resolve_font(cfg: &FontConfig) -> MemeResult<FontFace> {
    for path in &cfg.font_files {
        match load_font_file(path) {
            Ok(face) => return Ok(face),
            Err(err) => tracing::debug!(path = %path.display(), %err, "font file rejected"),
        }
    }

    for dir in &cfg.font_dirs {
        if let Some(face) = load_font_from_dir(dir) {
            return Ok(face);
        }
    }

    if cfg.well_known_paths {
        for path in WELL_KNOWN_FONT_PATHS {
            let path = Path::new(path);
            if !path.is_file() {
                continue;
            }
            match load_font_file(path) {
                Ok(face) => return Ok(face),
                Err(err) => tracing::debug!(path = %path.display(), %err, "font file rejected"),
            }
        }
    }

    if cfg.system_fonts
        && let Some(face) = load_system_font()
    {
        return Ok(face);
    }

    if cfg.builtin_fallback {
        tracing::warn!("no outline font found, using built-in bitmap font");
        return Ok(FontFace::Bitmap(BitmapFont::builtin()));
    }

    Err(MemeError::font_unavailable(
        "no font could be loaded and the built-in fallback is disabled",
    ))
}

/// Resolve a font once per distinct configuration and share it process-wide.
pub fn cached_font(cfg: &FontConfig) -> MemeResult<Arc<FontFace>> {
    static FONT_CACHE: OnceLock<Mutex<HashMap<FontConfig, Arc<FontFace>>>> = OnceLock::new();

    let cache = FONT_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut guard = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(face) = guard.get(cfg) {
        return Ok(Arc::clone(face));
    }

    let face = Arc::new(resolve_font(cfg)?);
    guard.insert(cfg.clone(), Arc::clone(&face));
    Ok(face)
}

fn load_font_file(path: &Path) -> MemeResult<FontFace> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read font file '{}'", path.display()))?;
    let font = OutlineFont::from_bytes(bytes, 0)?;
    Ok(FontFace::Outline {
        font,
        source: path.display().to_string(),
    })
}

fn load_font_from_dir(dir: &Path) -> Option<FontFace> {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return None;
    };

    let mut candidates: Vec<PathBuf> = rd
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_font_file(path))
        .collect();
    // Impact first, then a stable name order.
    candidates.sort_by_key(|path| {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        (stem != "impact", path.clone())
    });

    candidates.iter().find_map(|path| match load_font_file(path) {
        Ok(face) => Some(face),
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "font file rejected");
            None
        }
    })
}

fn is_font_file(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    ext == "ttf" || ext == "otf" || ext == "ttc"
}

fn load_system_font() -> Option<FontFace> {
    use usvg::fontdb;

    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let by_name = SYSTEM_FAMILIES.iter().find_map(|name| {
        let families = [fontdb::Family::Name(name)];
        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        db.query(&query)
    });
    let id = by_name.or_else(|| db.faces().next().map(|f| f.id))?;

    let family = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_else(|| "unknown".to_string());
    let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;

    match OutlineFont::from_bytes(bytes, index) {
        Ok(font) => Some(FontFace::Outline {
            font,
            source: format!("system:{family}"),
        }),
        Err(err) => {
            tracing::debug!(%family, %err, "system font rejected");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
