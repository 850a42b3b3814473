use eframe::egui;
use std::sync::mpsc::{sync_channel, Receiver};
use std::time::Instant;
use crate::config::AppConfig;
use crate::modules::assets::{AssetBundle, Textures};
use crate::modules::dialog::{DialogOutcome, NoticeKind, NotificationDialog};
use crate::modules::layout::{self, center_pair, wrap_words, WindowGeometry, PANEL_GAP};
use crate::modules::panels::{
    CandidateDetailsPanel, CandidateDirectoryPanel, CandidateStore, Panel, PanelContext, PanelEvent,
    DETAILS_SIZE, DIRECTORY_SIZE, PANEL_MARGIN, PANEL_TOP,
};
use crate::style::{self, Theme};

const TITLE_TEXT: &str = "Admin Panel.";
const PARAGRAPH_TEXT: &str = "Administrator control panel for managing candidate data, \
    user access, and application settings. This panel provides tools for content \
    management and system administration.";

const LOGO_POS: egui::Vec2 = egui::vec2(30.0, 20.0);
const LOGO_HEIGHT: f32 = 40.0;
/// Share of a line's height that sits above the baseline.
const BASELINE_RATIO: f32 = 0.8;

#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingAction {
    Exit,
    RemoveCandidate(String),
}

pub struct AdminPanelApp {
    config: AppConfig,
    theme: Theme,
    textures: Textures,
    store: CandidateStore,
    directory: CandidateDirectoryPanel,
    details: CandidateDetailsPanel,
    geometry: Option<WindowGeometry>,
    layout_rect: Option<egui::Rect>,
    dialog: Option<NotificationDialog>,
    pending_action: Option<PendingAction>,
    filter_rx: Receiver<Option<String>>,
}

impl AdminPanelApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let bundle = AssetBundle::load(&config.assets.root);
        bundle.install_fonts(&cc.egui_ctx);
        let theme = Theme::new(bundle.theme_fonts());
        style::apply_theme(&cc.egui_ctx, &theme);
        let textures = bundle.upload(&cc.egui_ctx);

        let store = CandidateStore::open(config.candidates_path());

        let (tx, rx) = sync_channel(16);
        let mut directory = CandidateDirectoryPanel::new(&theme, config.filter.debounce());
        directory.set_bounds(initial_panel_rect(DIRECTORY_SIZE, config.window.initial_height));
        let mut details = CandidateDetailsPanel::new();
        details.set_bounds(initial_panel_rect(DETAILS_SIZE, config.window.initial_height));
        directory.dropdown_mut().set_on_selection_changed(Box::new(move |label: Option<&str>| {
            if tx.try_send(label.map(str::to_owned)).is_err() {
                log::warn!("Dropping filter change {label:?}: receiver is gone or full");
            }
        }));

        Self {
            config,
            theme,
            textures,
            store,
            directory,
            details,
            geometry: None,
            layout_rect: None,
            dialog: None,
            pending_action: None,
            filter_rx: rx,
        }
    }

    fn relayout(&mut self, screen: egui::Rect) {
        if self.layout_rect == Some(screen) {
            return;
        }
        let geometry = WindowGeometry::from_size(screen.size());
        let (directory, details) = panel_bounds(screen, &self.directory, &self.details);
        self.directory.set_bounds(directory);
        self.details.set_bounds(details);
        log::debug!(
            "Relayout for {}x{} (scale {:.3}), panels {:?} and {:?}",
            screen.width(),
            screen.height(),
            geometry.uniform_scale(),
            self.directory.size(),
            self.details.size()
        );
        self.geometry = Some(geometry);
        self.layout_rect = Some(screen);
    }

    fn open_dialog(&mut self, dialog: NotificationDialog, action: Option<PendingAction>) {
        self.directory.dropdown_mut().close();
        self.dialog = Some(dialog);
        self.pending_action = action;
    }

    fn on_dialog_closed(&mut self, ctx: &egui::Context, outcome: DialogOutcome) {
        match (self.pending_action.take(), outcome) {
            (Some(PendingAction::Exit), DialogOutcome::Confirmed(true)) => {
                log::info!("Closing admin panel");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            (Some(PendingAction::RemoveCandidate(name)), DialogOutcome::Confirmed(true)) => {
                self.remove_candidate(&name);
            }
            (Some(action), _) => log::debug!("{action:?} cancelled"),
            (None, _) => {}
        }
    }

    fn handle_panel_event(&mut self, event: PanelEvent) {
        match event {
            PanelEvent::CandidateSelected(name) => {
                self.details.show_candidate(self.store.get(&name).cloned());
            }
            PanelEvent::RemoveRequested(name) => {
                let message = format!("Remove {name} from the candidate list?");
                self.open_dialog(
                    NotificationDialog::confirm(message, "Confirm Delete"),
                    Some(PendingAction::RemoveCandidate(name)),
                );
            }
            PanelEvent::RefreshRequested => self.refresh_candidates(),
        }
    }

    fn remove_candidate(&mut self, name: &str) {
        match self.store.delete(name) {
            Ok(Some(_)) => {}
            Ok(None) => {
                log::warn!("Candidate {name} vanished before it could be removed");
                return;
            }
            Err(e) => {
                log::error!("{e}");
                self.open_dialog(
                    NotificationDialog::notify(e.to_string(), "Save Failed", NoticeKind::Error),
                    None,
                );
                return;
            }
        }
        log::info!("Removed candidate {name}");
        self.refresh_candidates();
        self.open_dialog(
            NotificationDialog::notify(format!("{name} was removed."), "Candidate Removed", NoticeKind::Info),
            None,
        );
    }

    /// Reloads the store and drops selections that no longer resolve.
    fn refresh_candidates(&mut self) {
        self.store.refresh();
        let selected = self.directory.selected().and_then(|name| self.store.get(name)).cloned();
        if selected.is_none() {
            self.directory.select(None);
        }
        self.details.show_candidate(selected);
    }

    fn paint_backdrop(&self, ui: &egui::Ui, screen: egui::Rect) {
        let Some(geometry) = self.geometry else { return };
        if !self.config.assets.show_backdrop {
            return;
        }
        let alpha = (layout::BACKDROP_OPACITY * 255.0).round() as u8;
        ui.painter().image(
            self.textures.backdrop.id(),
            geometry.backdrop_rect().translate(screen.min.to_vec2()),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::from_white_alpha(alpha),
        );
    }

    /// Returns true when the logo was clicked.
    fn logo_ui(&self, ui: &mut egui::Ui, screen: egui::Rect) -> bool {
        let texture = &self.textures.header_logo;
        let size = texture.size_vec2();
        let width = if size.y > 0.0 { size.x / size.y * LOGO_HEIGHT } else { 0.0 };
        let rect = egui::Rect::from_min_size(screen.min + LOGO_POS, egui::vec2(width, LOGO_HEIGHT));

        ui.painter().image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
        ui.interact(rect, egui::Id::new("header_logo"), egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand)
            .on_hover_text("Close the admin panel")
            .clicked()
    }

    fn paint_heading(&self, ui: &egui::Ui, screen: egui::Rect) {
        let Some(geometry) = self.geometry else { return };
        let heading = geometry.heading();
        let painter = ui.painter();
        let theme = &self.theme;

        let title_format = tracked(theme.font(&theme.fonts.black, heading.title_size), theme.title);
        let title = painter.layout_job(egui::text::LayoutJob::single_section(TITLE_TEXT.to_owned(), title_format));
        let title_height = title.size().y;
        painter.galley(
            screen.min + egui::vec2(heading.x, heading.title_y - title_height * BASELINE_RATIO),
            title,
            theme.title,
        );

        let format = tracked(theme.font(&theme.fonts.semibold, heading.paragraph_size), theme.paragraph);
        let layout_line = |text: &str| {
            painter.layout_job(egui::text::LayoutJob::single_section(text.to_owned(), format.clone()))
        };
        let lines = wrap_words(PARAGRAPH_TEXT, heading.paragraph_width, |text| layout_line(text).size().x);

        let mut baseline = heading.paragraph_y(title_height);
        for line in &lines {
            let galley = layout_line(line);
            let line_height = galley.size().y;
            painter.galley(
                screen.min + egui::vec2(heading.x, baseline - line_height * BASELINE_RATIO),
                galley,
                theme.paragraph,
            );
            baseline += line_height;
        }
    }
}

impl eframe::App for AdminPanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.directory.dropdown_mut().tick(now);
        while let Ok(label) = self.filter_rx.try_recv() {
            self.directory.apply_filter(label.as_deref());
        }

        let screen = ctx.content_rect();
        self.relayout(screen);

        let mut events = Vec::new();
        let mut logo_clicked = false;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.theme.background))
            .show(ctx, |ui| {
                if self.dialog.is_some() {
                    ui.disable();
                }
                self.paint_backdrop(ui, screen);
                logo_clicked = self.logo_ui(ui, screen);
                self.paint_heading(ui, screen);

                let cx = PanelContext {
                    theme: &self.theme,
                    textures: &self.textures,
                    store: &self.store,
                    now,
                };
                events.extend(self.directory.ui(ui, &cx));
                events.extend(self.details.ui(ui, &cx));
            });

        if logo_clicked && self.dialog.is_none() {
            self.open_dialog(
                NotificationDialog::confirm("Are you sure you want to close the admin panel?", "Exit"),
                Some(PendingAction::Exit),
            );
        }
        for event in events {
            self.handle_panel_event(event);
        }

        if let Some(dialog) = &self.dialog {
            if let Some(outcome) = dialog.show(ctx, &self.theme, &self.textures) {
                self.dialog = None;
                self.on_dialog_closed(ctx, outcome);
            }
        }

        if let Some(deadline) = self.directory.dropdown().next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }
    }
}

fn tracked(font_id: egui::FontId, color: egui::Color32) -> egui::TextFormat {
    egui::TextFormat {
        extra_letter_spacing: font_id.size * layout::TEXT_TRACKING,
        font_id,
        color,
        ..Default::default()
    }
}

/// Starting bounds for a panel, clipped once to the window it opens in.
fn initial_panel_rect(size: egui::Vec2, window_height: f32) -> egui::Rect {
    let height = size.y.min(window_height - PANEL_TOP - PANEL_MARGIN).max(0.0);
    egui::Rect::from_min_size(egui::pos2(0.0, PANEL_TOP), egui::vec2(size.x, height))
}

/// Centres the pair horizontally in `screen`. Each panel keeps its current
/// vertical position and size.
fn panel_bounds(screen: egui::Rect, left: &impl Panel, right: &impl Panel) -> (egui::Rect, egui::Rect) {
    let (left, right) = center_pair(screen.width(), left.bounds(), right.bounds(), PANEL_GAP);
    let offset = egui::vec2(screen.min.x, 0.0);
    (left.translate(offset), right.translate(offset))
}
