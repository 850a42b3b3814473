//! Filter dropdown: a clickable trigger that toggles a floating list of
//! search fields, with a debounced selection notification.

use super::assets::Textures;
use super::scheduler::{TaskQueue, TaskToken};
use crate::style::Theme;
use eframe::egui;
use std::time::{Duration, Instant};

pub const ITEM_COUNT: usize = 4;
pub const ITEM_WIDTH: f32 = 168.0;
pub const ITEM_HEIGHT: f32 = 32.0;
pub const ITEM_SPACING: f32 = 2.0;
pub const POPUP_PADDING: f32 = 16.0;
pub const POPUP_BODY_WIDTH: f32 = 200.0;
pub const SHADOW_SIZE: f32 = 4.0;
pub const SHADOW_OFFSET: f32 = 3.0;
const SHADOW_OPACITY: f32 = 0.15;
const CORNER_RADIUS: f32 = 5.0;

pub const TRIGGER_SIZE: egui::Vec2 = egui::vec2(217.0, 45.0);
const TRIGGER_PADDING: f32 = 10.0;
const TRIGGER_PLACEHOLDER: &str = "Filter Search";

const CHECKMARK_PADDING: f32 = 16.0;
const TEXT_PADDING: f32 = 40.0;
const CHECKMARK_HEIGHT: f32 = 14.0;
const FALLBACK_CHECKMARK: f32 = 11.0;
const ITEM_FONT_SIZE: f32 = 14.0;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(50);

/// Candidate attribute a search can be narrowed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Name,
    Partylist,
    Issue,
    Position,
}

impl FilterField {
    pub const ALL: [FilterField; ITEM_COUNT] = [
        FilterField::Name,
        FilterField::Partylist,
        FilterField::Issue,
        FilterField::Position,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterField::Name => "Name",
            FilterField::Partylist => "Partylist",
            FilterField::Issue => "Issue",
            FilterField::Position => "Position",
        }
    }

    pub fn tooltip(self) -> &'static str {
        match self {
            FilterField::Name => "Search by candidate name",
            FilterField::Partylist => "Search by political party affiliation",
            FilterField::Issue => {
                "Search through issues, stances, and social positions (SOGIE, divorce, ROTC, etc.)"
            }
            FilterField::Position => "Search by political position",
        }
    }
}

/// Geometry of the open popup, in the same coordinates as the trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupView {
    pub rect: egui::Rect,
    pub item_rects: [egui::Rect; ITEM_COUNT],
}

impl PopupView {
    pub fn content_height() -> f32 {
        let n = ITEM_COUNT as f32;
        POPUP_PADDING + n * ITEM_HEIGHT + (n - 1.0) * ITEM_SPACING + POPUP_PADDING
    }

    /// Centred under `trigger`, widened by the shadow margins.
    pub fn below(trigger: egui::Rect) -> Self {
        let width = POPUP_BODY_WIDTH + SHADOW_SIZE * 2.0;
        let height = Self::content_height() + SHADOW_SIZE * 2.0 + SHADOW_OFFSET;
        let min = egui::pos2(trigger.center().x - width / 2.0, trigger.max.y);
        let rect = egui::Rect::from_min_size(min, egui::vec2(width, height));

        let start_x = rect.min.x + (POPUP_BODY_WIDTH - ITEM_WIDTH) / 2.0 + SHADOW_SIZE;
        let start_y = rect.min.y + POPUP_PADDING + SHADOW_SIZE;
        let item_rects = std::array::from_fn(|i| {
            egui::Rect::from_min_size(
                egui::pos2(start_x, start_y + (ITEM_HEIGHT + ITEM_SPACING) * i as f32),
                egui::vec2(ITEM_WIDTH, ITEM_HEIGHT),
            )
        });
        Self { rect, item_rects }
    }

    pub fn body_rect(&self) -> egui::Rect {
        self.rect.shrink(SHADOW_SIZE)
    }

    /// The same popup moved by `delta`, items included.
    pub fn translated(&self, delta: egui::Vec2) -> Self {
        Self {
            rect: self.rect.translate(delta),
            item_rects: self.item_rects.map(|r| r.translate(delta)),
        }
    }

    #[cfg(test)]
    pub fn item_at(&self, pos: egui::Pos2) -> Option<usize> {
        self.item_rects.iter().position(|r| r.contains(pos))
    }
}

/// One visual state of a list item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemFace {
    pub fill: egui::Color32,
    pub checked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ItemFaces {
    normal: ItemFace,
    hover: ItemFace,
}

/// Most recent selection that the owner has not been told about yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingFilterChange {
    pub value: Option<FilterField>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DropdownTask {
    CloseAfterSelect,
    FlushChange,
}

/// Receives the selected label, or `None` when the filter was cleared.
/// Called at most once per debounce window, after the popup has closed.
pub type SelectionCallback = Box<dyn FnMut(Option<&str>)>;

pub struct FilterDropdown {
    trigger_rect: egui::Rect,
    popup: Option<PopupView>,
    selection: Option<FilterField>,
    pending: Option<PendingFilterChange>,
    debounce: Duration,
    tasks: TaskQueue<DropdownTask>,
    debounce_token: Option<TaskToken>,
    close_token: Option<TaskToken>,
    faces: [ItemFaces; ITEM_COUNT],
    item_fill: egui::Color32,
    item_hover: egui::Color32,
    hovered_item: Option<usize>,
    on_selection_changed: Option<SelectionCallback>,
}

impl FilterDropdown {
    pub fn new(theme: &Theme, debounce: Duration) -> Self {
        let mut dropdown = Self {
            trigger_rect: egui::Rect::from_min_size(egui::Pos2::ZERO, TRIGGER_SIZE),
            popup: None,
            selection: None,
            pending: None,
            debounce,
            tasks: TaskQueue::new(),
            debounce_token: None,
            close_token: None,
            faces: [ItemFaces {
                normal: ItemFace { fill: theme.item_bg, checked: false },
                hover: ItemFace { fill: theme.item_hover, checked: false },
            }; ITEM_COUNT],
            item_fill: theme.item_bg,
            item_hover: theme.item_hover,
            hovered_item: None,
            on_selection_changed: None,
        };
        dropdown.rebuild_faces();
        dropdown
    }

    pub fn set_on_selection_changed(&mut self, callback: SelectionCallback) {
        self.on_selection_changed = Some(callback);
    }

    pub fn is_open(&self) -> bool {
        self.popup.is_some()
    }

    #[cfg(test)]
    pub fn popup(&self) -> Option<&PopupView> {
        self.popup.as_ref()
    }

    #[cfg(test)]
    pub fn trigger_rect(&self) -> egui::Rect {
        self.trigger_rect
    }

    /// Moves the trigger; an open popup follows it.
    pub fn set_trigger_rect(&mut self, rect: egui::Rect) {
        if rect == self.trigger_rect {
            return;
        }
        self.trigger_rect = rect;
        if self.popup.is_some() {
            self.popup = Some(PopupView::below(rect));
        }
    }

    pub fn toggle(&mut self) {
        if let Some(token) = self.close_token.take() {
            self.tasks.cancel(token);
        }
        if self.popup.take().is_none() {
            self.popup = Some(PopupView::below(self.trigger_rect));
            log::debug!("Filter dropdown opened");
        } else {
            self.hovered_item = None;
            log::debug!("Filter dropdown closed");
        }
    }

    pub fn close(&mut self) {
        if self.is_open() {
            self.toggle();
        }
    }

    #[cfg(test)]
    pub fn selected_field(&self) -> Option<FilterField> {
        self.selection
    }

    #[cfg(test)]
    pub fn selected_index(&self) -> Option<usize> {
        self.selection.map(FilterField::index)
    }

    pub fn selected_label(&self) -> Option<&'static str> {
        self.selection.map(FilterField::label)
    }

    pub fn trigger_text(&self) -> &'static str {
        self.selected_label().unwrap_or(TRIGGER_PLACEHOLDER)
    }

    /// Clicking the active item clears the selection; any other item
    /// replaces it. The popup closes on the next tick.
    pub fn select_item(&mut self, index: usize, now: Instant) -> bool {
        let Some(field) = FilterField::from_index(index) else {
            log::warn!("Ignoring selection of unknown filter index {index}");
            return false;
        };
        self.selection = if self.selection == Some(field) { None } else { Some(field) };
        self.notify_change(self.selection, now);
        self.rebuild_faces();

        if let Some(token) = self.close_token.take() {
            self.tasks.cancel(token);
        }
        self.close_token = Some(self.tasks.schedule(now, DropdownTask::CloseAfterSelect));
        true
    }

    /// Replaces any unflushed value and restarts the debounce window.
    pub fn notify_change(&mut self, value: Option<FilterField>, now: Instant) {
        self.pending = Some(PendingFilterChange { value });
        if let Some(token) = self.debounce_token.take() {
            self.tasks.cancel(token);
        }
        self.debounce_token = Some(self.tasks.schedule(now + self.debounce, DropdownTask::FlushChange));
    }

    #[cfg(test)]
    pub fn pending_change(&self) -> Option<PendingFilterChange> {
        self.pending
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.next_due()
    }

    /// Runs whatever timers have expired by `now`.
    pub fn tick(&mut self, now: Instant) {
        for (token, task) in self.tasks.take_due(now) {
            match task {
                DropdownTask::CloseAfterSelect => {
                    if self.close_token == Some(token) {
                        self.close_token = None;
                    }
                    self.close();
                }
                DropdownTask::FlushChange => {
                    if self.debounce_token == Some(token) {
                        self.debounce_token = None;
                    }
                    self.flush();
                }
            }
        }
    }

    fn flush(&mut self) {
        let Some(change) = self.pending.take() else { return };
        let label = change.value.map(FilterField::label);
        log::debug!("Filter changed to {label:?}");
        if let Some(callback) = self.on_selection_changed.as_mut() {
            callback(label);
        }
    }

    fn rebuild_faces(&mut self) {
        for (i, faces) in self.faces.iter_mut().enumerate() {
            let checked = self.selection.map(FilterField::index) == Some(i);
            faces.normal = ItemFace { fill: self.item_fill, checked };
            faces.hover = ItemFace { fill: self.item_hover, checked };
        }
    }

    pub fn item_face(&self, index: usize, hovered: bool) -> ItemFace {
        let faces = &self.faces[index.min(ITEM_COUNT - 1)];
        if hovered { faces.hover } else { faces.normal }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, theme: &Theme, textures: &Textures, now: Instant) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(TRIGGER_SIZE, egui::Sense::click());
        self.set_trigger_rect(rect);
        let response = response.on_hover_cursor(egui::CursorIcon::PointingHand);

        if ui.is_rect_visible(rect) {
            self.paint_trigger(ui.painter(), theme, textures, response.hovered());
        }
        if response.clicked() {
            self.toggle();
        }

        if let Some(popup) = self.popup {
            self.popup_ui(ui.ctx(), ui.id().with("filter_popup"), popup, theme, textures, now);

            let clicked_outside = ui.input(|i| {
                i.pointer.any_click()
                    && i.pointer.interact_pos().is_some_and(|p| {
                        !popup.rect.contains(p) && !self.trigger_rect.contains(p)
                    })
            });
            if clicked_outside {
                self.close();
            }
        }
        response
    }

    fn paint_trigger(&self, painter: &egui::Painter, theme: &Theme, textures: &Textures, hovered: bool) {
        let rect = self.trigger_rect;
        let fill = if hovered { theme.trigger_hover } else { theme.trigger };
        painter.rect_filled(rect, CORNER_RADIUS, fill);

        let font_size = (rect.height() * 0.35).min(16.0);
        painter.text(
            egui::pos2(rect.min.x + TRIGGER_PADDING, rect.center().y),
            egui::Align2::LEFT_CENTER,
            self.trigger_text(),
            theme.font(&theme.fonts.medium, font_size),
            egui::Color32::WHITE,
        );

        match &textures.arrow_down {
            Some(texture) => {
                let size = (rect.height() - 10.0).min(20.0);
                let icon = egui::Rect::from_min_size(
                    egui::pos2(rect.max.x - size - TRIGGER_PADDING, rect.center().y - size / 2.0),
                    egui::vec2(size, size),
                );
                painter.image(
                    texture.id(),
                    icon,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            None => {
                let size = (rect.height() / 4.0).clamp(6.0, 10.0);
                let x = rect.max.x - size - TRIGGER_PADDING;
                let y = rect.center().y;
                painter.add(egui::Shape::convex_polygon(
                    vec![
                        egui::pos2(x, y - size / 2.0),
                        egui::pos2(x + size, y - size / 2.0),
                        egui::pos2(x + size / 2.0, y + size / 2.0),
                    ],
                    egui::Color32::WHITE,
                    egui::Stroke::NONE,
                ));
            }
        }
    }

    fn popup_ui(
        &mut self,
        ctx: &egui::Context,
        id: egui::Id,
        popup: PopupView,
        theme: &Theme,
        textures: &Textures,
        now: Instant,
    ) {
        egui::Area::new(id)
            .order(egui::Order::Foreground)
            .fixed_pos(popup.rect.min)
            .constrain(false)
            .show(ctx, |ui| {
                let (area_rect, painter) = ui.allocate_painter(popup.rect.size(), egui::Sense::hover());
                // Paint and hit-test from where the area actually landed.
                let popup = popup.translated(area_rect.rect.min - popup.rect.min);
                paint_popup_body(&painter, &popup);

                let mut hovered_item = None;
                let mut clicked_item = None;
                for (i, item_rect) in popup.item_rects.iter().enumerate() {
                    let field = FilterField::ALL[i];
                    let response = ui
                        .interact(*item_rect, id.with(i), egui::Sense::click())
                        .on_hover_cursor(egui::CursorIcon::PointingHand)
                        .on_hover_text(field.tooltip());
                    if response.hovered() {
                        hovered_item = Some(i);
                    }
                    if response.clicked() {
                        clicked_item = Some(i);
                    }

                    let face = self.item_face(i, self.hovered_item == Some(i));
                    paint_item(&painter, *item_rect, face, field.label(), theme, textures);
                }

                self.hovered_item = hovered_item;
                if let Some(i) = clicked_item {
                    self.select_item(i, now);
                }
            });
    }
}

impl Drop for FilterDropdown {
    fn drop(&mut self) {
        if let Some(change) = self.pending.take() {
            log::debug!("Discarding unflushed filter change {:?}", change.value);
        }
    }
}

/// Checkmark size for a texture of `texture_size`, scaled to the item's
/// checkmark height. Without a texture the vector tick is 11x11.
pub fn checkmark_size(texture_size: Option<egui::Vec2>) -> egui::Vec2 {
    match texture_size {
        Some(size) if size.y > 0.0 => {
            egui::vec2((size.x / size.y * CHECKMARK_HEIGHT).floor(), CHECKMARK_HEIGHT)
        }
        _ => egui::vec2(FALLBACK_CHECKMARK, FALLBACK_CHECKMARK),
    }
}

fn paint_popup_body(painter: &egui::Painter, popup: &PopupView) {
    let rect = popup.rect;
    for i in 0..SHADOW_SIZE as usize {
        let inset = SHADOW_SIZE - i as f32;
        let opacity = SHADOW_OPACITY * (1.0 - i as f32 / SHADOW_SIZE);
        let shadow = egui::Rect::from_min_size(
            egui::pos2(rect.min.x + inset, rect.min.y + inset + SHADOW_OFFSET),
            egui::vec2(rect.width() - 2.0 * inset, rect.height() - 2.0 * inset),
        );
        painter.rect_filled(
            shadow,
            CORNER_RADIUS,
            egui::Color32::from_black_alpha((255.0 * opacity) as u8),
        );
    }
    painter.rect_filled(popup.body_rect(), CORNER_RADIUS, egui::Color32::WHITE);
}

fn paint_item(
    painter: &egui::Painter,
    rect: egui::Rect,
    face: ItemFace,
    label: &str,
    theme: &Theme,
    textures: &Textures,
) {
    painter.rect_filled(rect, CORNER_RADIUS, face.fill);

    if face.checked {
        let size = checkmark_size(textures.checkmark.as_ref().map(|t| t.size_vec2()));
        let min = egui::pos2(rect.min.x + CHECKMARK_PADDING, rect.center().y - size.y / 2.0);
        match &textures.checkmark {
            Some(texture) => {
                painter.image(
                    texture.id(),
                    egui::Rect::from_min_size(min, size),
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            None => {
                let x1 = rect.min.x + CHECKMARK_PADDING;
                let y1 = rect.center().y;
                painter.line(
                    vec![
                        egui::pos2(x1, y1),
                        egui::pos2(x1 + 5.0, y1 + 5.0),
                        egui::pos2(x1 + 10.0, y1 - 5.0),
                    ],
                    egui::Stroke::new(2.0, theme.trigger),
                );
            }
        }
    }

    painter.text(
        egui::pos2(rect.min.x + TEXT_PADDING, rect.center().y),
        egui::Align2::LEFT_CENTER,
        label,
        theme.font(&theme.fonts.regular, ITEM_FONT_SIZE),
        theme.item_text,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn dropdown() -> FilterDropdown {
        FilterDropdown::new(&Theme::default(), DEFAULT_DEBOUNCE)
    }

    fn recording(dropdown: &mut FilterDropdown) -> Rc<RefCell<Vec<Option<String>>>> {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        dropdown.set_on_selection_changed(Box::new(move |label| {
            sink.borrow_mut().push(label.map(str::to_string));
        }));
        calls
    }

    #[test]
    fn double_toggle_returns_to_closed_without_a_popup() {
        let mut dd = dropdown();
        dd.toggle();
        assert!(dd.is_open());
        assert!(dd.popup().is_some());
        dd.toggle();
        assert!(!dd.is_open());
        assert!(dd.popup().is_none());
    }

    #[test]
    fn popup_is_centred_below_the_trigger() {
        let mut dd = dropdown();
        dd.set_trigger_rect(egui::Rect::from_min_size(egui::pos2(100.0, 50.0), TRIGGER_SIZE));
        dd.toggle();
        let popup = *dd.popup().unwrap();

        assert_eq!(PopupView::content_height(), 166.0);
        assert_eq!(popup.rect.size(), egui::vec2(208.0, 177.0));
        assert_eq!(popup.rect.center().x, dd.trigger_rect().center().x);
        assert_eq!(popup.rect.min.y, 95.0);
        assert_eq!(popup.item_rects[0].min, egui::pos2(popup.rect.min.x + 20.0, 115.0));
        assert_eq!(popup.item_rects[3].min.y, 115.0 + 3.0 * 34.0);
        assert!(popup.item_rects.iter().all(|r| popup.body_rect().contains_rect(*r)));
        assert_eq!(popup.item_at(popup.item_rects[2].center()), Some(2));
    }

    #[test]
    fn shifted_popup_keeps_items_aligned_with_the_body() {
        let popup = PopupView::below(egui::Rect::from_min_size(egui::pos2(1200.0, 700.0), TRIGGER_SIZE));
        let delta = egui::vec2(-64.0, -120.0);
        let shifted = popup.translated(delta);

        assert_eq!(shifted.rect, popup.rect.translate(delta));
        for (moved, original) in shifted.item_rects.iter().zip(popup.item_rects.iter()) {
            assert_eq!(moved.min - shifted.rect.min, original.min - popup.rect.min);
            assert!(shifted.body_rect().contains_rect(*moved));
        }
        let old_center = popup.item_rects[1].center();
        assert_eq!(popup.item_at(old_center), Some(1));
        assert_ne!(shifted.item_at(old_center), Some(1));
        assert_eq!(shifted.item_at(old_center + delta), Some(1));
    }

    #[test]
    fn open_popup_follows_the_trigger() {
        let mut dd = dropdown();
        dd.toggle();
        let moved = egui::Rect::from_min_size(egui::pos2(400.0, 300.0), TRIGGER_SIZE);
        dd.set_trigger_rect(moved);
        assert_eq!(dd.popup().unwrap().rect.min.y, moved.max.y);
        assert_eq!(dd.popup().unwrap().rect.center().x, moved.center().x);
    }

    #[test]
    fn selecting_the_active_item_clears_it() {
        let t0 = Instant::now();
        let mut dd = dropdown();
        dd.select_item(2, t0);
        assert_eq!(dd.selected_index(), Some(2));
        assert_eq!(dd.selected_label(), Some("Issue"));
        dd.select_item(2, t0);
        assert_eq!(dd.selected_index(), None);
        assert_eq!(dd.selected_label(), None);
        assert_eq!(dd.trigger_text(), "Filter Search");
    }

    #[test]
    fn selecting_another_item_replaces_it() {
        let t0 = Instant::now();
        let mut dd = dropdown();
        dd.select_item(1, t0);
        dd.select_item(3, t0);
        assert_eq!(dd.selected_index(), Some(3));
        assert_eq!(dd.selected_field(), Some(FilterField::Position));
    }

    #[test]
    fn unknown_index_is_ignored() {
        let t0 = Instant::now();
        let mut dd = dropdown();
        assert!(!dd.select_item(4, t0));
        assert_eq!(dd.selected_index(), None);
        assert!(dd.pending_change().is_none());
        assert!(dd.next_deadline().is_none());
    }

    #[test]
    fn burst_of_selections_notifies_once_with_the_last() {
        let t0 = Instant::now();
        let mut dd = dropdown();
        let calls = recording(&mut dd);

        dd.toggle();
        dd.select_item(0, t0);
        dd.tick(t0 + ms(10));
        dd.toggle();
        dd.select_item(1, t0 + ms(20));
        dd.tick(t0 + ms(60));
        assert!(calls.borrow().is_empty(), "first selection must not flush");

        dd.tick(t0 + ms(70));
        assert_eq!(*calls.borrow(), vec![Some("Partylist".to_string())]);
        assert!(dd.pending_change().is_none());

        dd.tick(t0 + ms(500));
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn clearing_notifies_none() {
        let t0 = Instant::now();
        let mut dd = dropdown();
        let calls = recording(&mut dd);
        dd.select_item(0, t0);
        dd.tick(t0 + ms(50));
        dd.select_item(0, t0 + ms(100));
        dd.tick(t0 + ms(150));
        assert_eq!(*calls.borrow(), vec![Some("Name".to_string()), None]);
    }

    #[test]
    fn popup_is_closed_by_the_time_the_owner_hears() {
        let t0 = Instant::now();
        let mut dd = dropdown();
        let calls = recording(&mut dd);
        dd.toggle();
        dd.select_item(3, t0);
        assert!(dd.is_open(), "close is deferred to the next tick");

        dd.tick(t0 + ms(100));
        assert!(!dd.is_open());
        assert_eq!(*calls.borrow(), vec![Some("Position".to_string())]);
        assert!(dd.next_deadline().is_none());
    }

    #[test]
    fn deferred_close_runs_on_the_next_tick() {
        let t0 = Instant::now();
        let mut dd = dropdown();
        dd.toggle();
        dd.select_item(1, t0);
        assert!(dd.is_open());
        assert_eq!(dd.next_deadline(), Some(t0));
        dd.tick(t0);
        assert!(!dd.is_open());
        assert!(dd.pending_change().is_some());
    }

    #[test]
    fn toggle_cancels_a_pending_close() {
        let t0 = Instant::now();
        let mut dd = dropdown();
        dd.toggle();
        dd.select_item(1, t0);
        dd.toggle();
        assert!(!dd.is_open());
        dd.toggle();
        dd.tick(t0 + ms(1));
        assert!(dd.is_open(), "stale close must not hit the reopened popup");
    }

    #[test]
    fn dropping_discards_pending_notification() {
        let t0 = Instant::now();
        let calls = {
            let mut dd = dropdown();
            let calls = recording(&mut dd);
            dd.select_item(2, t0);
            calls
        };
        assert!(calls.borrow().is_empty());
        assert_eq!(Rc::strong_count(&calls), 1);
    }

    #[test]
    fn faces_track_the_selection() {
        let t0 = Instant::now();
        let theme = Theme::default();
        let mut dd = FilterDropdown::new(&theme, DEFAULT_DEBOUNCE);
        dd.select_item(1, t0);

        assert!(dd.item_face(1, false).checked);
        assert!(dd.item_face(1, true).checked);
        assert!(!dd.item_face(0, false).checked);
        assert_eq!(dd.item_face(0, false).fill, theme.item_bg);
        assert_eq!(dd.item_face(0, true).fill, theme.item_hover);

        dd.select_item(1, t0);
        assert!(!dd.item_face(1, false).checked);
    }

    #[test]
    fn checkmark_keeps_aspect_or_falls_back() {
        assert_eq!(checkmark_size(Some(egui::vec2(20.0, 14.0))), egui::vec2(20.0, 14.0));
        assert_eq!(checkmark_size(Some(egui::vec2(64.0, 48.0))), egui::vec2(18.0, 14.0));
        assert_eq!(checkmark_size(None), egui::vec2(11.0, 11.0));
    }

    #[test]
    fn fields_round_trip_through_labels() {
        for field in FilterField::ALL {
            assert_eq!(FilterField::from_label(field.label()), Some(field));
            assert_eq!(FilterField::from_index(field.index()), Some(field));
            assert!(!field.tooltip().is_empty());
        }
    }
}
