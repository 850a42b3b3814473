//! Responsive layout arithmetic for the admin window.
//!
//! Every fixed pixel value below is authored against the reference window
//! size and scaled down (never up) to the current size.

use eframe::egui;

pub const REFERENCE_WIDTH: f32 = 1411.0;
pub const REFERENCE_HEIGHT: f32 = 970.0;

pub const BACKDROP_WIDTH: f32 = 2555.0;
pub const BACKDROP_HEIGHT: f32 = 2154.0;
pub const BACKDROP_X: f32 = 206.0;
pub const BACKDROP_Y: f32 = -242.0;
pub const BACKDROP_OPACITY: f32 = 0.03;

pub const TITLE_X: f32 = 140.0;
pub const TITLE_Y: f32 = 181.0;
pub const PARAGRAPH_WIDTH: f32 = 1154.0;
pub const ELEMENT_SPACING: f32 = -5.0;

pub const TITLE_FONT_SIZE: f32 = 70.0;
pub const TITLE_FONT_MIN: f32 = 40.0;
pub const PARAGRAPH_FONT_SIZE: f32 = 18.0;
pub const PARAGRAPH_FONT_MIN: f32 = 14.0;
/// -5% letter spacing, as a fraction of the font size.
pub const TEXT_TRACKING: f32 = -0.05;

pub const PANEL_GAP: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowGeometry {
    pub width: f32,
    pub height: f32,
    pub width_scale: f32,
    pub height_scale: f32,
}

impl WindowGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            width_scale: (width / REFERENCE_WIDTH).min(1.0),
            height_scale: (height / REFERENCE_HEIGHT).min(1.0),
        }
    }

    pub fn from_size(size: egui::Vec2) -> Self {
        Self::new(size.x, size.y)
    }

    pub fn uniform_scale(&self) -> f32 {
        self.width_scale.min(self.height_scale)
    }

    pub fn scale_x(&self, value: f32) -> f32 {
        value * self.width_scale
    }

    pub fn scale_y(&self, value: f32) -> f32 {
        value * self.height_scale
    }

    pub fn scale_uniform(&self, value: f32) -> f32 {
        value * self.uniform_scale()
    }

    /// Font sizes follow the width scale but never drop below `min`.
    pub fn scaled_font(&self, base: f32, min: f32) -> f32 {
        self.scale_x(base).max(min)
    }

    /// Backdrop image rect relative to the content origin: position follows
    /// the per-axis scales, size the uniform one.
    pub fn backdrop_rect(&self) -> egui::Rect {
        egui::Rect::from_min_size(
            egui::pos2(self.scale_x(BACKDROP_X), self.scale_y(BACKDROP_Y)),
            egui::vec2(self.scale_uniform(BACKDROP_WIDTH), self.scale_uniform(BACKDROP_HEIGHT)),
        )
    }

    pub fn heading(&self) -> HeadingLayout {
        let side_margin = 2.0 * self.scale_x(TITLE_X);
        let paragraph_width = self
            .scale_x(PARAGRAPH_WIDTH)
            .min(self.width - side_margin)
            .max(0.0);
        HeadingLayout {
            x: (self.width - paragraph_width) / 2.0,
            title_y: self.scale_y(TITLE_Y),
            spacing: self.scale_y(ELEMENT_SPACING),
            paragraph_width,
            title_size: self.scaled_font(TITLE_FONT_SIZE, TITLE_FONT_MIN),
            paragraph_size: self.scaled_font(PARAGRAPH_FONT_SIZE, PARAGRAPH_FONT_MIN),
        }
    }
}

/// Where the "Admin Panel." title and its paragraph go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingLayout {
    pub x: f32,
    /// Baseline of the title.
    pub title_y: f32,
    pub spacing: f32,
    pub paragraph_width: f32,
    pub title_size: f32,
    pub paragraph_size: f32,
}

impl HeadingLayout {
    /// The paragraph overlaps into the lower half of the title line.
    pub fn paragraph_y(&self, title_line_height: f32) -> f32 {
        self.title_y + title_line_height / 2.0 + self.spacing
    }
}

/// Centres two panels side by side in `available_width`, keeping each
/// panel's own vertical position.
pub fn center_pair(available_width: f32, left: egui::Rect, right: egui::Rect, gap: f32) -> (egui::Rect, egui::Rect) {
    let total = left.width() + right.width() + gap;
    let start_x = (available_width - total) / 2.0;
    let left = egui::Rect::from_min_size(egui::pos2(start_x, left.min.y), left.size());
    let right = egui::Rect::from_min_size(
        egui::pos2(start_x + left.width() + gap, right.min.y),
        right.size(),
    );
    (left, right)
}

/// Greedy word wrap. Words are split on whitespace; a word wider than
/// `max_width` gets a line of its own and is never broken.
pub fn wrap_words<F>(text: &str, max_width: f32, mut measure: F) -> Vec<String>
where
    F: FnMut(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mono(s: &str) -> f32 {
        s.chars().count() as f32 * 10.0
    }

    #[test]
    fn reference_size_is_unscaled() {
        let geo = WindowGeometry::new(REFERENCE_WIDTH, REFERENCE_HEIGHT);
        assert_eq!(geo.width_scale, 1.0);
        assert_eq!(geo.height_scale, 1.0);
        assert_eq!(geo.backdrop_rect().min, egui::pos2(BACKDROP_X, BACKDROP_Y));
    }

    #[test]
    fn larger_windows_cap_at_one() {
        let geo = WindowGeometry::new(2800.0, 1800.0);
        assert_eq!(geo.uniform_scale(), 1.0);
        assert_eq!(geo.scale_x(PARAGRAPH_WIDTH), PARAGRAPH_WIDTH);
    }

    #[test]
    fn smaller_windows_never_exceed_reference_dimensions() {
        for (w, h) in [(1280.0, 800.0), (700.0, 970.0), (1411.0, 400.0), (300.0, 200.0)] {
            let geo = WindowGeometry::new(w, h);
            let s = geo.uniform_scale();
            assert!(s <= 1.0);
            assert_eq!(s, (w / REFERENCE_WIDTH).min(h / REFERENCE_HEIGHT));

            let backdrop = geo.backdrop_rect();
            assert!(backdrop.width() <= BACKDROP_WIDTH);
            assert!(backdrop.height() <= BACKDROP_HEIGHT);
            assert!(geo.scale_x(TITLE_X) <= TITLE_X);
            assert!(geo.scale_y(TITLE_Y) <= TITLE_Y);
            assert!(geo.heading().paragraph_width <= PARAGRAPH_WIDTH);
        }
    }

    #[test]
    fn fonts_respect_their_floor() {
        let small = WindowGeometry::new(600.0, 500.0).heading();
        assert_eq!(small.title_size, TITLE_FONT_MIN);
        assert_eq!(small.paragraph_size, PARAGRAPH_FONT_MIN);

        let full = WindowGeometry::new(REFERENCE_WIDTH, REFERENCE_HEIGHT).heading();
        assert_eq!(full.title_size, TITLE_FONT_SIZE);
        assert_eq!(full.paragraph_size, PARAGRAPH_FONT_SIZE);
    }

    #[test]
    fn heading_is_centred_on_the_paragraph() {
        let geo = WindowGeometry::new(REFERENCE_WIDTH, REFERENCE_HEIGHT);
        let heading = geo.heading();
        // 1411 - 280 = 1131 is narrower than the 1154 paragraph.
        assert_eq!(heading.paragraph_width, 1131.0);
        assert_eq!(heading.x, 140.0);
        assert_eq!(heading.paragraph_y(80.0), 181.0 + 40.0 - 5.0);
    }

    #[test]
    fn pair_is_centred_and_keeps_vertical_position() {
        let left = egui::Rect::from_min_size(egui::pos2(0.0, 290.0), egui::vec2(400.0, 500.0));
        let right = egui::Rect::from_min_size(egui::pos2(0.0, 300.0), egui::vec2(600.0, 480.0));
        let (l, r) = center_pair(1440.0, left, right, PANEL_GAP);

        assert_eq!(l.min, egui::pos2(215.0, 290.0));
        assert_eq!(r.min, egui::pos2(625.0, 300.0));
        assert_eq!(l.size(), left.size());
        assert_eq!(r.size(), right.size());
        assert_eq!(1440.0 - r.max.x, l.min.x);
    }

    #[test]
    fn wrap_keeps_every_word_once() {
        let text = "Administrator control panel for managing candidate data, user access, and application settings.";
        let lines = wrap_words(text, 200.0, mono);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(mono(line) <= 200.0, "{line:?} overflows");
        }
        let rejoined = lines.join(" ");
        let words: Vec<_> = text.split_whitespace().collect();
        assert_eq!(rejoined.split(' ').collect::<Vec<_>>(), words);
    }

    #[test]
    fn overlong_word_sits_alone() {
        let lines = wrap_words("a incomprehensibilities b", 50.0, mono);
        assert_eq!(lines, vec!["a", "incomprehensibilities", "b"]);
    }

    #[test]
    fn wrap_is_stable_and_ignores_extra_whitespace() {
        let text = "  one   two\tthree\nfour ";
        let first = wrap_words(text, 90.0, mono);
        assert_eq!(first, vec!["one two", "three", "four"]);
        assert_eq!(first, wrap_words(text, 90.0, mono));
        assert!(wrap_words("   ", 90.0, mono).is_empty());
    }
}
