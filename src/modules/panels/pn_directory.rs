use eframe::egui;
use std::time::Duration;
use super::{paint_card, Candidate, CandidateStore, Panel, PanelContext, PanelEvent, PANEL_MARGIN, PANEL_TOP};
use crate::modules::dropdown::{FilterDropdown, FilterField, TRIGGER_SIZE};
use crate::style::{self, Theme};

pub const DIRECTORY_SIZE: egui::Vec2 = egui::vec2(520.0, 560.0);

pub struct CandidateDirectoryPanel {
    bounds: egui::Rect,
    query: String,
    filter: Option<FilterField>,
    dropdown: FilterDropdown,
    selected: Option<String>,
}

impl CandidateDirectoryPanel {
    pub fn new(theme: &Theme, debounce: Duration) -> Self {
        Self {
            bounds: egui::Rect::from_min_size(egui::pos2(0.0, PANEL_TOP), DIRECTORY_SIZE),
            query: String::new(),
            filter: None,
            dropdown: FilterDropdown::new(theme, debounce),
            selected: None,
        }
    }

    pub fn dropdown(&self) -> &FilterDropdown {
        &self.dropdown
    }

    pub fn dropdown_mut(&mut self) -> &mut FilterDropdown {
        &mut self.dropdown
    }

    #[cfg(test)]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[cfg(test)]
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    #[cfg(test)]
    pub fn filter(&self) -> Option<FilterField> {
        self.filter
    }

    /// Takes the label the dropdown reported; unknown labels clear the filter.
    pub fn apply_filter(&mut self, label: Option<&str>) {
        self.filter = label.and_then(FilterField::from_label);
        if label.is_some() && self.filter.is_none() {
            log::warn!("Unknown filter label {label:?}; searching every field");
        }
        log::debug!("Directory filter is now {:?}", self.filter);
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, name: Option<String>) {
        self.selected = name;
    }

    pub fn visible<'a>(&'a self, store: &'a CandidateStore) -> Vec<&'a Candidate> {
        store.filtered(&self.query, self.filter).collect()
    }

    fn header_ui(&self, ui: &mut egui::Ui, cx: &PanelContext<'_>) -> bool {
        let theme = cx.theme;
        let mut refresh = false;
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new("Candidate Directory")
                    .font(theme.font(&theme.fonts.bold, 20.0))
                    .color(theme.title),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                refresh = style::secondary_button(ui, "Refresh", theme).clicked();
            });
        });
        if let Some(stamp) = cx.store.refreshed_at() {
            ui.label(
                egui::RichText::new(format!("Last refreshed {}", stamp.format("%b %d, %H:%M:%S")))
                    .font(theme.font(&theme.fonts.regular, 12.0))
                    .color(theme.paragraph),
            );
        }
        refresh
    }

    fn list_ui(&self, ui: &mut egui::Ui, cx: &PanelContext<'_>) -> Option<String> {
        let theme = cx.theme;
        let visible = self.visible(cx.store);
        let mut clicked = None;

        ui.label(
            egui::RichText::new(format!("{} of {} candidates", visible.len(), cx.store.len()))
                .font(theme.font(&theme.fonts.medium, 13.0))
                .color(theme.text_dark),
        );

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if visible.is_empty() {
                    ui.label(
                        egui::RichText::new("No candidates match.")
                            .font(theme.font(&theme.fonts.regular, 14.0))
                            .color(theme.paragraph),
                    );
                }
                for candidate in visible {
                    let is_selected = self.selected.as_deref() == Some(candidate.name.as_str());
                    let mut job = egui::text::LayoutJob::default();
                    job.append(
                        &candidate.name,
                        0.0,
                        egui::TextFormat::simple(theme.font(&theme.fonts.semibold, 15.0), theme.item_text),
                    );
                    job.append(
                        &format!("\n{} · {}", candidate.position, candidate.partylist),
                        0.0,
                        egui::TextFormat::simple(theme.font(&theme.fonts.regular, 12.0), theme.paragraph),
                    );
                    let response = ui.add_sized(
                        [ui.available_width(), 44.0],
                        egui::Button::selectable(is_selected, job),
                    );
                    if response.clicked() {
                        clicked = Some(candidate.name.clone());
                    }
                }
            });
        clicked
    }
}

impl Panel for CandidateDirectoryPanel {
    fn bounds(&self) -> egui::Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: egui::Rect) {
        self.bounds = bounds;
    }

    fn ui(&mut self, ui: &mut egui::Ui, cx: &PanelContext<'_>) -> Option<PanelEvent> {
        paint_card(ui.painter(), self.bounds, cx.theme);
        let inner = self.bounds.shrink(PANEL_MARGIN);

        ui.scope_builder(egui::UiBuilder::new().max_rect(inner), |ui| {
            let mut event = None;
            if self.header_ui(ui, cx) {
                event = Some(PanelEvent::RefreshRequested);
            }
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                let search_width = ui.available_width() - TRIGGER_SIZE.x - ui.spacing().item_spacing.x;
                ui.add_sized(
                    [search_width, TRIGGER_SIZE.y],
                    egui::TextEdit::singleline(&mut self.query)
                        .hint_text("Search candidates...")
                        .font(cx.theme.font(&cx.theme.fonts.regular, 15.0))
                        .vertical_align(egui::Align::Center),
                );
                self.dropdown.ui(ui, cx.theme, cx.textures, cx.now);
            });
            ui.add_space(6.0);

            if let Some(name) = self.list_ui(ui, cx) {
                self.selected = Some(name.clone());
                event = Some(PanelEvent::CandidateSelected(name));
            }
            event
        })
        .inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn store() -> (tempfile::TempDir, CandidateStore) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("candidates.json");
        fs::write(
            &path,
            r#"[
                {"name": "Maria Santos", "partylist": "Bayan Muna", "position": "Senator", "issues": ["Education"]},
                {"name": "Jose Reyes", "partylist": "Akbayan", "position": "Mayor", "issues": ["Senior care"]}
            ]"#,
        )
        .unwrap();
        let store = CandidateStore::open(&path);
        (dir, store)
    }

    fn names<'a>(list: Vec<&'a Candidate>) -> Vec<&'a str> {
        list.into_iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn filter_follows_the_reported_label() {
        let mut panel = CandidateDirectoryPanel::new(&Theme::default(), Duration::ZERO);
        panel.apply_filter(Some("Issue"));
        assert_eq!(panel.filter(), Some(FilterField::Issue));
        panel.apply_filter(None);
        assert_eq!(panel.filter(), None);
        panel.apply_filter(Some("Nickname"));
        assert_eq!(panel.filter(), None);
    }

    #[test]
    fn visible_list_respects_query_and_filter() {
        let (_dir, store) = store();
        let mut panel = CandidateDirectoryPanel::new(&Theme::default(), Duration::ZERO);
        assert_eq!(names(panel.visible(&store)).len(), 2);

        panel.set_query("sen");
        assert_eq!(names(panel.visible(&store)), vec!["Maria Santos", "Jose Reyes"]);

        panel.apply_filter(Some("Position"));
        assert_eq!(names(panel.visible(&store)), vec!["Maria Santos"]);

        panel.apply_filter(Some("Issue"));
        assert_eq!(names(panel.visible(&store)), vec!["Jose Reyes"]);
    }

    #[test]
    fn bounds_are_replaced_wholesale() {
        let mut panel = CandidateDirectoryPanel::new(&Theme::default(), Duration::ZERO);
        assert_eq!(panel.size(), DIRECTORY_SIZE);
        let moved = egui::Rect::from_min_size(egui::pos2(215.0, 300.0), DIRECTORY_SIZE);
        panel.set_bounds(moved);
        assert_eq!(panel.bounds(), moved);
    }
}
