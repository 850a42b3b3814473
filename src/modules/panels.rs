use eframe::egui;
use std::time::Instant;
use super::assets::Textures;
use crate::style::Theme;

mod pn_details;
mod pn_directory;
mod pn_store;

pub use pn_details::{CandidateDetailsPanel, DETAILS_SIZE};
pub use pn_directory::{CandidateDirectoryPanel, DIRECTORY_SIZE};
pub use pn_store::{Candidate, CandidateStore};

pub const PANEL_TOP: f32 = 320.0;
pub const PANEL_CORNER_RADIUS: f32 = 12.0;
pub const PANEL_MARGIN: f32 = 20.0;

/// Everything a panel reads while drawing one frame.
pub struct PanelContext<'a> {
    pub theme: &'a Theme,
    pub textures: &'a Textures,
    pub store: &'a CandidateStore,
    pub now: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    CandidateSelected(String),
    RemoveRequested(String),
    RefreshRequested,
}

/// A fixed-size card placed by the window at absolute bounds.
pub trait Panel {
    fn bounds(&self) -> egui::Rect;
    fn set_bounds(&mut self, bounds: egui::Rect);
    fn size(&self) -> egui::Vec2 {
        self.bounds().size()
    }
    fn ui(&mut self, ui: &mut egui::Ui, cx: &PanelContext<'_>) -> Option<PanelEvent>;
}

fn paint_card(painter: &egui::Painter, bounds: egui::Rect, theme: &Theme) {
    painter.rect(
        bounds,
        PANEL_CORNER_RADIUS,
        theme.panel_fill,
        egui::Stroke::new(1.0, theme.panel_border),
        egui::StrokeKind::Inside,
    );
}
