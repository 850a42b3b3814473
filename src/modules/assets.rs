use crate::error::AssetError;
use crate::modules::layout::{BACKDROP_HEIGHT, BACKDROP_WIDTH};
use crate::style::{ColorPalette, ThemeFonts};
use ab_glyph::FontArc;
use eframe::egui;
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

pub const FALLBACK_FONT_SIZE: f32 = 12.0;
pub const LOGO_PLACEHOLDER: (u32, u32) = (150, 40);
pub const ICON_SIZE: u32 = 32;

const INTER_BLACK: &[&str] = &["lib/fonts/Inter_18pt-Black.ttf", "fonts/Inter_18pt-Black.ttf"];
const INTER_SEMIBOLD: &[&str] = &["lib/fonts/Inter_18pt-SemiBold.ttf", "fonts/Inter_18pt-SemiBold.ttf"];
const INTER_BOLD: &[&str] = &["lib/fonts/Inter_18pt-Bold.ttf", "fonts/Inter_18pt-Bold.ttf"];
const INTER_MEDIUM: &[&str] = &["lib/fonts/Inter_18pt-Medium.ttf", "fonts/Inter_18pt-Medium.ttf"];
const INTER_REGULAR: &[&str] = &["lib/fonts/Inter_18pt-Regular.ttf", "fonts/Inter_18pt-Regular.ttf"];

const BACKDROP: &[&str] = &["resources/images/Landing-Backdrop.png"];
const HEADER_LOGO: &[&str] = &[
    "resources/images/Candidate Search/HeaderLogo.png",
    "resources/images/HeaderLogo.png",
    "HeaderLogo.png",
    "images/HeaderLogo.png",
    "images/Candidate Search/HeaderLogo.png",
    "../resources/images/Candidate Search/HeaderLogo.png",
];
const ARROW_DOWN: &[&str] = &[
    "resources/images/candidate search/arrow_down.png",
    "resources/images/Candidate Search/arrow_down.png",
    "resources/images/arrow_down.png",
    "arrow_down.png",
];
const CHECKMARK: &[&str] = &[
    "resources/images/candidate search/checkmark.png",
    "resources/images/Candidate Search/checkmark.png",
    "resources/images/checkmark.png",
];
const INFO_ICON: &[&str] = &["resources/images/info.png", "resources/images/Notification/info.png"];
const WARNING_ICON: &[&str] = &["resources/images/warning.png", "resources/images/Notification/warning.png"];
const ERROR_ICON: &[&str] = &["resources/images/error.png", "resources/images/Notification/error.png"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Medium,
    SemiBold,
    Bold,
    Black,
}

/// A decoded font, or the system default standing in for one.
#[derive(Clone)]
pub enum FontAsset {
    Loaded {
        name: String,
        path: PathBuf,
        bytes: Vec<u8>,
        font: FontArc,
    },
    Fallback {
        weight: FontWeight,
        size: f32,
    },
}

impl std::fmt::Debug for FontAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontAsset::Loaded { name, path, .. } => {
                f.debug_struct("Loaded").field("name", name).field("path", path).finish()
            }
            FontAsset::Fallback { weight, size } => {
                f.debug_struct("Fallback").field("weight", weight).field("size", size).finish()
            }
        }
    }
}

impl FontAsset {
    #[cfg(test)]
    pub fn is_fallback(&self) -> bool {
        matches!(self, FontAsset::Fallback { .. })
    }

    pub fn family(&self) -> egui::FontFamily {
        match self {
            FontAsset::Loaded { name, .. } => egui::FontFamily::Name(name.as_str().into()),
            FontAsset::Fallback { .. } => egui::FontFamily::Proportional,
        }
    }

    pub fn glyph_count(&self) -> usize {
        match self {
            FontAsset::Loaded { font, .. } => ab_glyph::Font::glyph_count(font),
            FontAsset::Fallback { .. } => 0,
        }
    }
}

/// What to synthesize when none of an image's candidates decode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placeholder {
    Transparent { width: u32, height: u32 },
    /// Lavender sheet with a translucent blue inset.
    Backdrop { width: u32, height: u32 },
}

impl Placeholder {
    pub fn render(&self) -> RgbaImage {
        match *self {
            Placeholder::Transparent { width, height } => {
                RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]))
            }
            Placeholder::Backdrop { width, height } => {
                let base = ColorPalette::LAVENDER;
                let inset = blend_over([base.r(), base.g(), base.b()], [0x2F, 0x39, 0x8E], 100);
                let border = 20;
                RgbaImage::from_fn(width, height, |x, y| {
                    let inside = x >= border
                        && y >= border
                        && x + border < width
                        && y + border < height;
                    if inside {
                        Rgba([inset[0], inset[1], inset[2], 255])
                    } else {
                        Rgba([base.r(), base.g(), base.b(), 255])
                    }
                })
            }
        }
    }
}

fn blend_over(dst: [u8; 3], src: [u8; 3], alpha: u8) -> [u8; 3] {
    let a = alpha as f32 / 255.0;
    let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
    [mix(src[0], dst[0]), mix(src[1], dst[1]), mix(src[2], dst[2])]
}

#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub image: RgbaImage,
    pub source: Option<PathBuf>,
}

impl ImageAsset {
    pub fn is_placeholder(&self) -> bool {
        self.source.is_none()
    }

    pub fn size(&self) -> [usize; 2] {
        [self.image.width() as usize, self.image.height() as usize]
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(self.size(), self.image.as_raw())
    }
}

/// Resolves assets from ordered candidate lists under a root directory.
/// Loading never fails: the last resort is a synthesized placeholder.
pub struct AssetLoader {
    root: PathBuf,
}

impl AssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, candidate: &str) -> PathBuf {
        let path = Path::new(candidate);
        if path.is_absolute() { path.to_path_buf() } else { self.root.join(path) }
    }

    pub fn load_font(&self, candidates: &[&str], weight: FontWeight) -> FontAsset {
        for candidate in candidates {
            let path = self.resolve(candidate);
            match read_font(&path) {
                Ok((bytes, font)) => {
                    let name = path
                        .file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_else(|| format!("{weight:?}"));
                    log::debug!("Loaded font {name} from {}", path.display());
                    return FontAsset::Loaded { name, path, bytes, font };
                }
                Err(e) => log::debug!("{e}"),
            }
        }
        log::warn!("No usable font among {candidates:?}; using the system default ({weight:?})");
        FontAsset::Fallback { weight, size: FALLBACK_FONT_SIZE }
    }

    pub fn load_image(&self, candidates: &[&str], placeholder: Placeholder) -> ImageAsset {
        for candidate in candidates {
            let path = self.resolve(candidate);
            match read_image(&path) {
                Ok(image) => {
                    log::debug!("Loaded image {}", path.display());
                    return ImageAsset { image, source: Some(path) };
                }
                Err(e) => log::debug!("{e}"),
            }
        }
        log::warn!("No usable image among {candidates:?}; using {placeholder:?}");
        ImageAsset { image: placeholder.render(), source: None }
    }
}

fn read_font(path: &Path) -> Result<(Vec<u8>, FontArc), AssetError> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => AssetError::NotFound(path.to_path_buf()),
        _ => AssetError::Io { path: path.to_path_buf(), source },
    })?;
    let font = FontArc::try_from_vec(bytes.clone())
        .map_err(|_| AssetError::InvalidFont(path.to_path_buf()))?;
    Ok((bytes, font))
}

fn read_image(path: &Path) -> Result<RgbaImage, AssetError> {
    if !path.is_file() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }
    let image = image::open(path)
        .map_err(|source| AssetError::Decode { path: path.to_path_buf(), source })?;
    Ok(image.to_rgba8())
}

#[derive(Debug, Clone)]
pub struct InterFonts {
    pub black: FontAsset,
    pub semibold: FontAsset,
    pub bold: FontAsset,
    pub medium: FontAsset,
    pub regular: FontAsset,
}

/// Everything the admin window paints with, loaded once at start-up.
#[derive(Debug, Clone)]
pub struct AssetBundle {
    pub fonts: InterFonts,
    pub backdrop: ImageAsset,
    pub header_logo: ImageAsset,
    pub arrow_down: ImageAsset,
    pub checkmark: ImageAsset,
    pub info_icon: ImageAsset,
    pub warning_icon: ImageAsset,
    pub error_icon: ImageAsset,
}

impl AssetBundle {
    pub fn load(root: impl Into<PathBuf>) -> Self {
        let loader = AssetLoader::new(root);
        let icon = Placeholder::Transparent { width: ICON_SIZE, height: ICON_SIZE };
        Self {
            fonts: InterFonts {
                black: loader.load_font(INTER_BLACK, FontWeight::Black),
                semibold: loader.load_font(INTER_SEMIBOLD, FontWeight::SemiBold),
                bold: loader.load_font(INTER_BOLD, FontWeight::Bold),
                medium: loader.load_font(INTER_MEDIUM, FontWeight::Medium),
                regular: loader.load_font(INTER_REGULAR, FontWeight::Regular),
            },
            backdrop: loader.load_image(
                BACKDROP,
                Placeholder::Backdrop { width: BACKDROP_WIDTH as u32, height: BACKDROP_HEIGHT as u32 },
            ),
            header_logo: loader.load_image(
                HEADER_LOGO,
                Placeholder::Transparent { width: LOGO_PLACEHOLDER.0, height: LOGO_PLACEHOLDER.1 },
            ),
            arrow_down: loader.load_image(ARROW_DOWN, Placeholder::Transparent { width: 20, height: 20 }),
            checkmark: loader.load_image(CHECKMARK, Placeholder::Transparent { width: 11, height: 11 }),
            info_icon: loader.load_image(INFO_ICON, icon),
            warning_icon: loader.load_image(WARNING_ICON, icon),
            error_icon: loader.load_image(ERROR_ICON, icon),
        }
    }

    pub fn theme_fonts(&self) -> ThemeFonts {
        ThemeFonts {
            black: self.fonts.black.family(),
            semibold: self.fonts.semibold.family(),
            bold: self.fonts.bold.family(),
            medium: self.fonts.medium.family(),
            regular: self.fonts.regular.family(),
        }
    }

    /// Registers every decoded font as a named family that falls back to the
    /// default proportional fonts for missing glyphs.
    pub fn install_fonts(&self, ctx: &egui::Context) {
        let mut defs = egui::FontDefinitions::default();
        let proportional = defs
            .families
            .get(&egui::FontFamily::Proportional)
            .cloned()
            .unwrap_or_default();

        let fonts = &self.fonts;
        for asset in [&fonts.black, &fonts.semibold, &fonts.bold, &fonts.medium, &fonts.regular] {
            if let FontAsset::Loaded { name, bytes, .. } = asset {
                log::debug!("Registering font family {name} ({} glyphs)", asset.glyph_count());
                defs.font_data.insert(name.clone(), egui::FontData::from_owned(bytes.clone()).into());
                let mut chain = vec![name.clone()];
                chain.extend(proportional.iter().cloned());
                defs.families.insert(asset.family(), chain);
            }
        }
        ctx.set_fonts(defs);
    }

    pub fn upload(&self, ctx: &egui::Context) -> Textures {
        let upload = |name: &str, asset: &ImageAsset| {
            ctx.load_texture(name, asset.to_color_image(), egui::TextureOptions::LINEAR)
        };
        // Placeholders for glyph-like images are drawn as vectors instead.
        let upload_real = |name: &str, asset: &ImageAsset| {
            (!asset.is_placeholder()).then(|| upload(name, asset))
        };
        Textures {
            backdrop: upload("backdrop", &self.backdrop),
            header_logo: upload("header_logo", &self.header_logo),
            arrow_down: upload_real("arrow_down", &self.arrow_down),
            checkmark: upload_real("checkmark", &self.checkmark),
            info_icon: upload_real("info_icon", &self.info_icon),
            warning_icon: upload_real("warning_icon", &self.warning_icon),
            error_icon: upload_real("error_icon", &self.error_icon),
        }
    }
}

/// GPU-side copies of the bundle's images.
#[derive(Clone)]
pub struct Textures {
    pub backdrop: egui::TextureHandle,
    pub header_logo: egui::TextureHandle,
    pub arrow_down: Option<egui::TextureHandle>,
    pub checkmark: Option<egui::TextureHandle>,
    pub info_icon: Option<egui::TextureHandle>,
    pub warning_icon: Option<egui::TextureHandle>,
    pub error_icon: Option<egui::TextureHandle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_image_yields_sized_transparent_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new(dir.path());
        let asset = loader.load_image(
            &["nope.png", "also/nope.png"],
            Placeholder::Transparent { width: 150, height: 40 },
        );

        assert!(asset.is_placeholder());
        assert_eq!(asset.size(), [150, 40]);
        assert!(asset.image.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn missing_font_yields_system_default() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new(dir.path());
        let font = loader.load_font(INTER_BLACK, FontWeight::Black);

        assert!(font.is_fallback());
        assert_eq!(font.family(), egui::FontFamily::Proportional);
        assert!(matches!(font, FontAsset::Fallback { weight: FontWeight::Black, size } if size == FALLBACK_FONT_SIZE));
    }

    #[test]
    fn corrupt_files_fall_through_to_the_next_candidate() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.png"), b"not a png").unwrap();
        RgbaImage::from_pixel(4, 2, Rgba([255, 0, 0, 255]))
            .save(dir.path().join("good.png"))
            .unwrap();
        std::fs::write(dir.path().join("broken.ttf"), b"not a font").unwrap();

        let loader = AssetLoader::new(dir.path());
        let image = loader.load_image(
            &["missing.png", "broken.png", "good.png"],
            Placeholder::Transparent { width: 1, height: 1 },
        );
        assert_eq!(image.source, Some(dir.path().join("good.png")));
        assert_eq!(image.size(), [4, 2]);

        let font = loader.load_font(&["broken.ttf"], FontWeight::Regular);
        assert!(font.is_fallback());
    }

    #[test]
    fn backdrop_placeholder_has_an_inset() {
        let sheet = Placeholder::Backdrop { width: 64, height: 48 }.render();
        let edge = sheet.get_pixel(0, 0).0;
        let centre = sheet.get_pixel(32, 24).0;
        assert_eq!(edge, [230, 230, 250, 255]);
        assert_ne!(centre, edge);
        assert_eq!(centre[3], 255);
    }

    #[test]
    fn bundle_loads_with_an_empty_asset_root() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = AssetBundle::load(dir.path());

        assert!(bundle.backdrop.is_placeholder());
        assert_eq!(bundle.backdrop.size(), [BACKDROP_WIDTH as usize, BACKDROP_HEIGHT as usize]);
        assert_eq!(bundle.header_logo.size(), [150, 40]);
        assert!(bundle.checkmark.is_placeholder());
        assert_eq!(bundle.theme_fonts(), ThemeFonts::default());
    }
}
