use egui::{Align, Color32, Key, Layout, RichText, TextEdit};

use crate::card::{ActionResult, CardAction, CardState, can_switch};
use crate::model::ExerciseLog;

const ACCENT: Color32 = Color32::from_rgb(16, 185, 129);
const SWITCH_CLOSED: &str = "🔄";
const SWITCH_OPEN: &str = "🔃";

/// The set-logging card for one exercise slot.
///
/// ```ignore
/// WorkoutCard::new(egui::Id::new(("slot", i)), &log, &mut state)
///     .locked(settings.lock_exercises)
///     .show(ui, |next| session.apply_update(i, next));
/// ```
pub struct WorkoutCard<'a> {
    id: egui::Id,
    log: &'a ExerciseLog,
    state: &'a mut CardState,
    locked: bool,
    unit: &'a str,
    // Reserved for an owner-driven "replace this exercise" flow. No control
    // on the card invokes it.
    #[allow(dead_code)]
    on_replace: Option<Box<dyn FnMut() + 'a>>,
}

impl<'a> WorkoutCard<'a> {
    pub fn new(id: egui::Id, log: &'a ExerciseLog, state: &'a mut CardState) -> Self {
        Self {
            id,
            log,
            state,
            locked: false,
            unit: "KG",
            on_replace: None,
        }
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn unit_label(mut self, unit: &'a str) -> Self {
        self.unit = unit;
        self
    }

    pub fn on_replace(mut self, f: impl FnMut() + 'a) -> Self {
        self.on_replace = Some(Box::new(f));
        self
    }

    /// Draw the card. `on_update` receives the next snapshot whenever the
    /// user changes the log, within the same frame as the interaction.
    pub fn show(
        self,
        ui: &mut egui::Ui,
        on_update: impl FnOnce(ExerciseLog),
    ) -> egui::Response {
        let WorkoutCard {
            id,
            log,
            state,
            locked,
            unit,
            ..
        } = self;
        state.sync(log, locked);
        let weight_id = id.with("weight");
        let reps_id = id.with("reps");
        let mut action = None;

        let response = egui::Frame::group(ui.style())
            .rounding(12.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());

                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&log.name).heading().strong());
                        if let Some(group) = log.group_label() {
                            ui.label(
                                RichText::new(group.to_uppercase())
                                    .small()
                                    .strong()
                                    .weak(),
                            );
                        }
                    });
                    if can_switch(log, locked) {
                        ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
                            let glyph = if state.options_open() {
                                SWITCH_OPEN
                            } else {
                                SWITCH_CLOSED
                            };
                            if ui
                                .button(RichText::new(glyph).color(ACCENT))
                                .on_hover_text("Switch exercise")
                                .clicked()
                            {
                                action = Some(CardAction::ToggleOptions);
                            }
                        });
                    }
                });

                if state.options_open() {
                    ui.add_space(6.0);
                    egui::Frame::group(ui.style()).rounding(8.0).show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        for (index, option) in log.available_exercises.iter().enumerate() {
                            let active = index == log.selected_index;
                            let label = egui::SelectableLabel::new(
                                active,
                                RichText::new(&option.name).strong(),
                            );
                            if ui.add_sized([ui.available_width(), 28.0], label).clicked() {
                                action = Some(CardAction::SelectExercise(index));
                            }
                        }
                    });
                }

                ui.add_space(8.0);
                for (idx, set) in log.sets.iter().enumerate() {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("✔").color(ACCENT));
                        ui.label(RichText::new(format!("Set {}", idx + 1)).strong().weak());
                        ui.label(RichText::new(format!("{} {unit}", set.weight)).strong());
                        if let Some(reps) = set.display_reps() {
                            ui.label(RichText::new(format!("{reps} REPS")).strong());
                        }
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            if ui.small_button("🗑").on_hover_text("Remove set").clicked() {
                                action = Some(CardAction::RemoveSet(idx));
                            }
                        });
                    });
                }

                if !state.input_open() {
                    let text = format!("Tap to log set {}", log.sets.len() + 1);
                    if ui
                        .add_sized(
                            [ui.available_width(), 32.0],
                            egui::Button::new(RichText::new(text).weak()),
                        )
                        .clicked()
                    {
                        action = Some(CardAction::OpenInput);
                    }
                } else {
                    ui.horizontal(|ui| {
                        let weight = ui.add(
                            TextEdit::singleline(&mut state.weight)
                                .id(weight_id)
                                .hint_text(unit)
                                .desired_width(ui.available_width() - 120.0),
                        );
                        let reps = ui.add(
                            TextEdit::singleline(&mut state.reps)
                                .id(reps_id)
                                .hint_text("REPS")
                                .desired_width(64.0),
                        );
                        let submitted = (weight.lost_focus() || reps.lost_focus())
                            && ui.input(|i| i.key_pressed(Key::Enter));
                        let confirmed = ui
                            .button(RichText::new("✔").color(ACCENT))
                            .on_hover_text("Log set")
                            .clicked();
                        if confirmed || submitted {
                            action = Some(CardAction::CommitSet);
                        }
                    });
                }
            })
            .response;

        if let Some(action) = action {
            if action == CardAction::CommitSet {
                // Dismiss the keyboard before the input row goes away.
                ui.memory_mut(|m| {
                    m.surrender_focus(weight_id);
                    m.surrender_focus(reps_id);
                });
            }
            match state.apply(log, locked, action, on_update) {
                ActionResult::MissingWeight => ui.memory_mut(|m| m.request_focus(weight_id)),
                ActionResult::PanelChanged if state.input_open() => {
                    ui.memory_mut(|m| m.request_focus(weight_id))
                }
                _ => {}
            }
            ui.ctx().request_repaint();
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Panel;
    use crate::model::tests::{sample_log, set};
    use egui::{Event, Modifiers, RawInput};

    fn card_id() -> egui::Id {
        egui::Id::new("card")
    }

    /// Run one frame of `ctx` with `events` and return the logs handed to
    /// the owner.
    fn frame(
        ctx: &egui::Context,
        events: Vec<Event>,
        log: &ExerciseLog,
        state: &mut CardState,
        locked: bool,
    ) -> Vec<ExerciseLog> {
        let mut updates = Vec::new();
        let input = RawInput {
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                WorkoutCard::new(card_id(), log, &mut *state)
                    .locked(locked)
                    .on_replace(|| {})
                    .show(ui, |next| updates.push(next));
            });
        });
        updates
    }

    fn render(log: &ExerciseLog, state: &mut CardState, locked: bool) -> Vec<ExerciseLog> {
        frame(&egui::Context::default(), Vec::new(), log, state, locked)
    }

    fn enter() -> Event {
        Event::Key {
            key: Key::Enter,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: Modifiers::NONE,
        }
    }

    fn text(s: &str) -> Event {
        Event::Text(s.to_owned())
    }

    /// Open the input row and put keyboard focus on `field`.
    fn focus_field(ctx: &egui::Context, log: &ExerciseLog, state: &mut CardState, field: &str) {
        state.open_input();
        frame(ctx, Vec::new(), log, state, false);
        ctx.memory_mut(|m| m.request_focus(card_id().with(field)));
        frame(ctx, Vec::new(), log, state, false);
        assert_eq!(ctx.memory(|m| m.focused()), Some(card_id().with(field)));
    }

    fn empty_log() -> ExerciseLog {
        ExerciseLog {
            sets: Vec::new(),
            ..sample_log()
        }
    }

    #[test]
    fn drawing_without_input_emits_no_updates() {
        let log = sample_log();
        let mut state = CardState::default();
        assert!(render(&log, &mut state, false).is_empty());
        assert_eq!(state.panel, Panel::Idle);
    }

    #[test]
    fn drawing_open_panels_keeps_them_open() {
        let log = sample_log();
        let mut state = CardState::default();
        state.toggle_options(&log, false);
        assert!(render(&log, &mut state, false).is_empty());
        assert!(state.options_open());

        state.open_input();
        state.weight = "70".into();
        assert!(render(&log, &mut state, false).is_empty());
        assert!(state.input_open());
        assert_eq!(state.weight, "70");
    }

    #[test]
    fn drawing_locked_closes_options() {
        let log = sample_log();
        let mut state = CardState::default();
        state.toggle_options(&log, false);
        render(&log, &mut state, true);
        assert_eq!(state.panel, Panel::Idle);
    }

    #[test]
    fn enter_on_blank_weight_refocuses_weight() {
        let ctx = egui::Context::default();
        let log = empty_log();
        let mut state = CardState::default();
        focus_field(&ctx, &log, &mut state, "weight");

        let updates = frame(&ctx, vec![enter()], &log, &mut state, false);
        assert!(updates.is_empty());
        assert!(state.input_open());
        assert_eq!(ctx.memory(|m| m.focused()), Some(card_id().with("weight")));
    }

    #[test]
    fn typed_weight_and_reps_commit_on_enter() {
        let ctx = egui::Context::default();
        let log = empty_log();
        let mut state = CardState::default();
        focus_field(&ctx, &log, &mut state, "weight");

        assert!(frame(&ctx, vec![text("80")], &log, &mut state, false).is_empty());
        assert_eq!(state.weight, "80");

        ctx.memory_mut(|m| m.request_focus(card_id().with("reps")));
        let updates = frame(&ctx, vec![text("5"), enter()], &log, &mut state, false);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].sets, vec![set(80.0, Some(5.0))]);
        assert!(state.weight.is_empty());
        assert!(state.reps.is_empty());
        assert_eq!(state.panel, Panel::Idle);
        assert_ne!(ctx.memory(|m| m.focused()), Some(card_id().with("reps")));
    }

    #[test]
    fn enter_in_weight_commits_without_reps() {
        let ctx = egui::Context::default();
        let log = sample_log();
        let mut state = CardState::default();
        focus_field(&ctx, &log, &mut state, "weight");

        let updates = frame(&ctx, vec![text("62.5"), enter()], &log, &mut state, false);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].sets.len(), 4);
        assert_eq!(updates[0].sets[3], set(62.5, None));
        assert_eq!(updates[0].sets[..3], log.sets[..]);
    }
}
