use eframe::egui;
use super::{paint_card, Candidate, Panel, PanelContext, PanelEvent, PANEL_MARGIN, PANEL_TOP};
use crate::modules::layout::wrap_words;
use crate::style;

pub const DETAILS_SIZE: egui::Vec2 = egui::vec2(620.0, 560.0);
const SUMMARY_FONT_SIZE: f32 = 15.0;

pub struct CandidateDetailsPanel {
    bounds: egui::Rect,
    candidate: Option<Candidate>,
}

impl CandidateDetailsPanel {
    pub fn new() -> Self {
        Self {
            bounds: egui::Rect::from_min_size(egui::pos2(0.0, PANEL_TOP), DETAILS_SIZE),
            candidate: None,
        }
    }

    pub fn show_candidate(&mut self, candidate: Option<Candidate>) {
        self.candidate = candidate;
    }

    #[cfg(test)]
    pub fn candidate(&self) -> Option<&Candidate> {
        self.candidate.as_ref()
    }

    #[cfg(test)]
    pub fn clear(&mut self) {
        self.candidate = None;
    }

    fn empty_ui(ui: &mut egui::Ui, cx: &PanelContext<'_>) {
        let theme = cx.theme;
        ui.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new("Select a candidate to see their details.")
                    .font(theme.font(&theme.fonts.regular, 16.0))
                    .color(theme.paragraph),
            );
        });
    }
}

impl Default for CandidateDetailsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for CandidateDetailsPanel {
    fn bounds(&self) -> egui::Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: egui::Rect) {
        self.bounds = bounds;
    }

    fn ui(&mut self, ui: &mut egui::Ui, cx: &PanelContext<'_>) -> Option<PanelEvent> {
        let theme = cx.theme;
        paint_card(ui.painter(), self.bounds, theme);
        let inner = self.bounds.shrink(PANEL_MARGIN);

        ui.scope_builder(egui::UiBuilder::new().max_rect(inner), |ui| {
            let Some(candidate) = &self.candidate else {
                Self::empty_ui(ui, cx);
                return None;
            };

            ui.label(
                egui::RichText::new(&candidate.name)
                    .font(theme.font(&theme.fonts.black, 26.0))
                    .color(theme.title),
            );
            ui.label(
                egui::RichText::new(format!("{} · {}", candidate.position, candidate.partylist))
                    .font(theme.font(&theme.fonts.medium, 15.0))
                    .color(theme.text_dark),
            );
            ui.add_space(8.0);

            if !candidate.issues.is_empty() {
                ui.horizontal_wrapped(|ui| {
                    for issue in &candidate.issues {
                        egui::Frame::new()
                            .fill(theme.item_hover)
                            .corner_radius(10.0)
                            .inner_margin(egui::Margin::symmetric(10, 4))
                            .show(ui, |ui| {
                                ui.label(
                                    egui::RichText::new(issue)
                                        .font(theme.font(&theme.fonts.medium, 12.0))
                                        .color(theme.item_text),
                                );
                            });
                    }
                });
                ui.add_space(8.0);
            }

            let font = theme.font(&theme.fonts.regular, SUMMARY_FONT_SIZE);
            let width = ui.available_width();
            let lines = wrap_words(&candidate.summary, width, |text| {
                ui.fonts_mut(|f| f.layout_no_wrap(text.to_owned(), font.clone(), theme.paragraph).size().x)
            });

            let button_height = 30.0 + ui.spacing().item_spacing.y;
            egui::ScrollArea::vertical()
                .max_height((ui.available_height() - button_height).max(0.0))
                .show(ui, |ui| {
                    for line in &lines {
                        ui.label(egui::RichText::new(line).font(font.clone()).color(theme.paragraph));
                    }
                });

            let mut event = None;
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Max), |ui| {
                if style::primary_button(ui, "Remove candidate", theme).clicked() {
                    event = Some(PanelEvent::RemoveRequested(candidate.name.clone()));
                }
            });
            event
        })
        .inner
    }
}
