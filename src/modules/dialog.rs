use super::assets::Textures;
use crate::style::{self, Theme};
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogButton {
    Ok,
    Yes,
    No,
    /// Escape or any other way of walking away from the dialog.
    Dismiss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Acknowledged,
    Confirmed(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Notify,
    Confirm,
}

/// A modal message box. Built per use and dropped once it resolves; the
/// owner keeps it around while it is open and skips its own input.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationDialog {
    title: String,
    message: String,
    kind: NoticeKind,
    variant: Variant,
}

impl NotificationDialog {
    pub fn notify(message: impl Into<String>, title: impl Into<String>, kind: NoticeKind) -> Self {
        Self { title: title.into(), message: message.into(), kind, variant: Variant::Notify }
    }

    pub fn confirm(message: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: NoticeKind::Warning,
            variant: Variant::Confirm,
        }
    }

    #[cfg(test)]
    pub fn kind(&self) -> NoticeKind {
        self.kind
    }

    pub fn buttons(&self) -> &'static [DialogButton] {
        match self.variant {
            Variant::Notify => &[DialogButton::Ok],
            Variant::Confirm => &[DialogButton::Yes, DialogButton::No],
        }
    }

    /// The outcome `button` produces, or `None` when it does not belong to
    /// this dialog.
    pub fn resolve(&self, button: DialogButton) -> Option<DialogOutcome> {
        match (self.variant, button) {
            (Variant::Notify, DialogButton::Ok | DialogButton::Dismiss) => Some(DialogOutcome::Acknowledged),
            (Variant::Confirm, DialogButton::Yes) => Some(DialogOutcome::Confirmed(true)),
            (Variant::Confirm, DialogButton::No | DialogButton::Dismiss) => Some(DialogOutcome::Confirmed(false)),
            _ => None,
        }
    }

    pub fn size(&self) -> egui::Vec2 {
        match self.variant {
            Variant::Notify => egui::vec2(340.0, 140.0),
            Variant::Confirm => egui::vec2(360.0, 150.0),
        }
    }

    pub fn accent(&self, theme: &Theme) -> egui::Color32 {
        match self.kind {
            NoticeKind::Info => theme.title,
            NoticeKind::Warning => theme.warning,
            NoticeKind::Error => theme.error,
        }
    }

    fn icon<'a>(&self, textures: &'a Textures) -> Option<&'a egui::TextureHandle> {
        match self.kind {
            NoticeKind::Info => textures.info_icon.as_ref(),
            NoticeKind::Warning => textures.warning_icon.as_ref(),
            NoticeKind::Error => textures.error_icon.as_ref(),
        }
    }

    pub fn show(&self, ctx: &egui::Context, theme: &Theme, textures: &Textures) -> Option<DialogOutcome> {
        egui::Area::new(egui::Id::new("dialog_overlay"))
            .fixed_pos(egui::pos2(0.0, 0.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let screen = ctx.content_rect();
                // Swallow pointer input meant for the window underneath.
                ui.allocate_rect(screen, egui::Sense::click_and_drag());
                ui.painter().rect_filled(screen, 0.0, egui::Color32::from_black_alpha(90));
            });

        let margin = 20.0;
        let inner = self.size() - egui::vec2(margin * 2.0, margin * 2.0);
        let mut pressed = None;

        egui::Window::new(self.title.as_str())
            .id(egui::Id::new("notification_dialog"))
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .fixed_size(inner)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .order(egui::Order::Tooltip)
            .frame(egui::Frame::new()
                .fill(theme.panel_fill)
                .stroke(egui::Stroke::new(1.0, theme.trigger))
                .corner_radius(9.0)
                .inner_margin(margin))
            .show(ctx, |ui| {
                ui.horizontal_top(|ui| {
                    let (icon_rect, _) = ui.allocate_exact_size(egui::vec2(32.0, 32.0), egui::Sense::hover());
                    if let Some(texture) = self.icon(textures) {
                        ui.painter().image(
                            texture.id(),
                            icon_rect,
                            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                            egui::Color32::WHITE,
                        );
                    }
                    ui.add_space(12.0);
                    ui.vertical(|ui| {
                        ui.label(
                            egui::RichText::new(&self.title)
                                .font(theme.font(&theme.fonts.bold, 18.0))
                                .color(self.accent(theme)),
                        );
                        ui.add(egui::Label::new(
                            egui::RichText::new(&self.message)
                                .font(theme.font(&theme.fonts.regular, 15.0))
                                .color(theme.text_dark),
                        ).wrap());
                    });
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Max), |ui| {
                    ui.spacing_mut().item_spacing.x = 10.0;
                    // Right to left: the last button in the list comes first.
                    for button in self.buttons().iter().rev() {
                        let response = match button {
                            DialogButton::No => style::secondary_button(ui, "No", theme),
                            DialogButton::Yes => style::primary_button(ui, "Yes", theme),
                            _ => style::primary_button(ui, "OK", theme),
                        };
                        if response.clicked() {
                            pressed = Some(*button);
                        }
                    }
                });
            });

        if pressed.is_none() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            pressed = Some(DialogButton::Dismiss);
        }
        pressed.and_then(|button| self.resolve(button))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_yes_is_true_everything_else_false() {
        let dialog = NotificationDialog::confirm("Remove this candidate?", "Confirm Delete");
        assert_eq!(dialog.resolve(DialogButton::Yes), Some(DialogOutcome::Confirmed(true)));
        assert_eq!(dialog.resolve(DialogButton::No), Some(DialogOutcome::Confirmed(false)));
        assert_eq!(dialog.resolve(DialogButton::Dismiss), Some(DialogOutcome::Confirmed(false)));
        assert_eq!(dialog.resolve(DialogButton::Ok), None);
        assert_eq!(dialog.kind(), NoticeKind::Warning);
    }

    #[test]
    fn notify_only_ends_on_its_own_controls() {
        let dialog = NotificationDialog::notify("Saved.", "Success", NoticeKind::Info);
        assert_eq!(dialog.buttons(), &[DialogButton::Ok]);
        assert_eq!(dialog.resolve(DialogButton::Ok), Some(DialogOutcome::Acknowledged));
        assert_eq!(dialog.resolve(DialogButton::Dismiss), Some(DialogOutcome::Acknowledged));
        assert_eq!(dialog.resolve(DialogButton::Yes), None);
        assert_eq!(dialog.resolve(DialogButton::No), None);
    }

    #[test]
    fn accent_follows_kind() {
        let theme = Theme::default();
        let accent = |kind| NotificationDialog::notify("m", "t", kind).accent(&theme);
        assert_eq!(accent(NoticeKind::Info), theme.title);
        assert_eq!(accent(NoticeKind::Warning), theme.warning);
        assert_eq!(accent(NoticeKind::Error), theme.error);
        assert_eq!(NotificationDialog::confirm("m", "t").accent(&theme), theme.warning);
    }

    #[test]
    fn sizes_match_variant() {
        assert_eq!(NotificationDialog::notify("m", "t", NoticeKind::Error).size(), egui::vec2(340.0, 140.0));
        assert_eq!(NotificationDialog::confirm("m", "t").size(), egui::vec2(360.0, 150.0));
    }
}
