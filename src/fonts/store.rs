use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::Context;

use crate::foundation::error::{SublineError, SublineResult};

/// RGBA8 brush color attached to shaped glyph runs.
///
/// Parley requires a brush type parameter on layouts; the compositor sets the
/// actual paint per draw pass (stroke vs. fill), so this carries the style
/// fill as a default only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphBrush {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// A font file loaded into memory, shared read-only across render workers.
#[derive(Clone, Debug)]
pub struct LoadedFont {
    /// Family name as requested from the store.
    pub family: String,
    /// File the bytes were read from.
    pub path: PathBuf,
    /// Raw font file bytes.
    pub font_bytes: Arc<Vec<u8>>,
}

/// Process-wide font cache: resolves family names to font files, reads each
/// file once, and hands out shared [`LoadedFont`]s.
///
/// Construct one store per process (or per render service) and share it via
/// `Arc`; font objects are expensive to load and immutable afterwards. A
/// missing font is a fatal configuration error reporting every probed path,
/// never a silent substitution.
#[derive(Debug, Default)]
pub struct FontStore {
    extra_dirs: Vec<PathBuf>,
    cache: Mutex<HashMap<String, Arc<LoadedFont>>>,
}

impl FontStore {
    /// Store probing only the platform font directories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store probing `dirs` before the platform font directories.
    pub fn with_dirs(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            extra_dirs: dirs.into_iter().collect(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve and load a font family, reusing a previously loaded file.
    pub fn load_family(&self, family: &str) -> SublineResult<Arc<LoadedFont>> {
        let key = normalize_family(family);
        if key.is_empty() {
            return Err(SublineError::validation("font family must be non-empty"));
        }
        if let Some(hit) = self.cache_get(&key) {
            return Ok(hit);
        }

        let mut attempted = Vec::new();
        let mut dirs = self.extra_dirs.clone();
        dirs.extend(platform_font_dirs());

        for dir in &dirs {
            for name in candidate_file_names(family) {
                let path = dir.join(&name);
                if path.is_file() {
                    return self.load_at(family, path);
                }
                attempted.push(path);
            }
        }

        // Last resort for user-supplied directories: accept any font file
        // whose stem matches the family name.
        for dir in &self.extra_dirs {
            if let Some(path) = scan_dir_for_family(dir, family) {
                return self.load_at(family, path);
            }
            attempted.push(dir.clone());
        }

        Err(SublineError::Font {
            family: family.to_string(),
            attempted,
            platform: std::env::consts::OS,
        })
    }

    /// Load a specific font file, bypassing family resolution.
    pub fn load_file(&self, path: impl Into<PathBuf>) -> SublineResult<Arc<LoadedFont>> {
        let path = path.into();
        let family = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();
        self.load_at(&family, path)
    }

    /// Load the first resolvable family from `families`, in order.
    ///
    /// Returns the error for the last candidate when none resolve.
    pub fn load_any(&self, families: &[&str]) -> SublineResult<Arc<LoadedFont>> {
        let mut last_err = SublineError::validation("load_any requires at least one family");
        for family in families {
            match self.load_family(family) {
                Ok(font) => return Ok(font),
                Err(e) => last_err = e,
            }
        }
        Err(last_err)
    }

    fn load_at(&self, family: &str, path: PathBuf) -> SublineResult<Arc<LoadedFont>> {
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read font file '{}'", path.display()))
            .map_err(SublineError::from)?;
        tracing::debug!(family, path = %path.display(), "loaded font");
        let font = Arc::new(LoadedFont {
            family: family.to_string(),
            path,
            font_bytes: Arc::new(bytes),
        });
        self.cache_put(normalize_family(family), font.clone());
        Ok(font)
    }

    fn cache_get(&self, key: &str) -> Option<Arc<LoadedFont>> {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.get(key).cloned()
    }

    fn cache_put(&self, key: String, font: Arc<LoadedFont>) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.insert(key, font);
    }
}

fn normalize_family(family: &str) -> String {
    family.trim().to_ascii_lowercase()
}

fn platform_font_dirs() -> Vec<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let mut dirs = Vec::new();
    if cfg!(target_os = "macos") {
        dirs.push(PathBuf::from("/System/Library/Fonts"));
        dirs.push(PathBuf::from("/Library/Fonts"));
        if let Some(h) = &home {
            dirs.push(h.join("Library/Fonts"));
        }
    } else if cfg!(target_os = "windows") {
        dirs.push(PathBuf::from("C:\\Windows\\Fonts"));
    } else {
        dirs.push(PathBuf::from("/usr/share/fonts"));
        dirs.push(PathBuf::from("/usr/local/share/fonts"));
        if let Some(h) = &home {
            dirs.push(h.join(".fonts"));
            dirs.push(h.join(".local/share/fonts"));
        }
    }
    dirs
}

/// Known file names per family, including the metric-compatible faces common
/// Linux images ship in place of the proprietary ones, then generic patterns
/// derived from the family name.
fn candidate_file_names(family: &str) -> Vec<String> {
    let mut names: Vec<String> = match normalize_family(family).as_str() {
        "arial bold" => vec![
            "Arial Bold.ttf",
            "Arial-Bold.ttf",
            "arialbd.ttf",
            "LiberationSans-Bold.ttf",
            "truetype/liberation/LiberationSans-Bold.ttf",
        ],
        "arial" => vec![
            "Arial.ttf",
            "arial.ttf",
            "LiberationSans-Regular.ttf",
            "truetype/liberation/LiberationSans-Regular.ttf",
        ],
        "impact" => vec!["Impact.ttf", "impact.ttf", "Anton-Regular.ttf"],
        "georgia" => vec![
            "Georgia.ttf",
            "georgia.ttf",
            "LiberationSerif-Regular.ttf",
            "truetype/liberation/LiberationSerif-Regular.ttf",
        ],
        "dejavu sans" => vec!["DejaVuSans.ttf", "truetype/dejavu/DejaVuSans.ttf"],
        "liberation sans" => vec![
            "LiberationSans-Regular.ttf",
            "truetype/liberation/LiberationSans-Regular.ttf",
        ],
        _ => vec![],
    }
    .into_iter()
    .map(String::from)
    .collect();

    let trimmed = family.trim();
    for base in [trimmed.to_string(), trimmed.replace(' ', ""), trimmed.replace(' ', "-")] {
        for ext in ["ttf", "otf"] {
            let name = format!("{base}.{ext}");
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

fn scan_dir_for_family(dir: &Path, family: &str) -> Option<PathBuf> {
    let wanted = compact_family(family);
    let rd = std::fs::read_dir(dir).ok()?;
    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if compact_family(stem) == wanted {
            return Some(path);
        }
    }
    None
}

fn compact_family(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Stateful helper for shaping single caption words with Parley.
///
/// Owns the font and layout contexts, so one engine lives per render worker;
/// font registration happens once per font file and is remembered.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<GlyphBrush>,
    families: HashMap<PathBuf, String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    /// Shape and lay out one caption word (a single unwrapped line).
    pub fn layout_word(
        &mut self,
        text: &str,
        font: &LoadedFont,
        size_px: f32,
        brush: GlyphBrush,
    ) -> SublineResult<parley::Layout<GlyphBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SublineError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = match self.families.get(&font.path) {
            Some(name) => name.clone(),
            None => {
                let families = self.font_ctx.collection.register_fonts(
                    parley::fontique::Blob::from(font.font_bytes.as_ref().clone()),
                    None,
                );
                let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                    SublineError::validation(format!(
                        "no font families registered from '{}'",
                        font.path.display()
                    ))
                })?;
                let name = self
                    .font_ctx
                    .collection
                    .family_name(family_id)
                    .ok_or_else(|| {
                        SublineError::validation("registered font family has no name")
                    })?
                    .to_string();
                self.families.insert(font.path.clone(), name.clone());
                name
            }
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<GlyphBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Normalized `(width, height)` extent of a shaped layout.
///
/// Font measurement APIs disagree about advance width vs. bounding box; this
/// collapses the Parley line metrics to one pair the layout code can rely
/// on: widest line advance by summed line heights.
pub fn measure_layout(layout: &parley::Layout<GlyphBrush>) -> (f64, f64) {
    let mut w = 0.0f64;
    let mut h = 0.0f64;
    for line in layout.lines() {
        let m = line.metrics();
        w = w.max(f64::from(m.advance));
        h += f64::from(m.ascent + m.descent + m.leading);
    }
    (w.max(1.0), h.max(1.0))
}

#[cfg(test)]
#[path = "../../tests/unit/fonts/store.rs"]
mod tests;
