//! Main application logic and persistent user settings.

use dirs_next as dirs;
use eframe::{App, Frame, NativeOptions, egui};
use rfd::FileDialog;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use log::{error, info};

mod card;
use card::CardState;
mod catalog;
mod export;
use export::{save_session_csv, save_session_json};
mod model;
mod parse;
mod session;
use session::WorkoutSession;
mod widget;
use widget::WorkoutCard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightUnit {
    Kg,
    Lbs,
}

impl WeightUnit {
    fn label(self) -> &'static str {
        match self {
            WeightUnit::Kg => "KG",
            WeightUnit::Lbs => "LBS",
        }
    }
}

/// Persistent configuration for user preferences.
///
/// Stored as JSON in the platform config directory. Fields added after the
/// first release carry `#[serde(default)]` so older files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Settings {
    weight_unit: WeightUnit,
    /// Hide the exercise switch on every card.
    #[serde(default)]
    lock_exercises: bool,
    #[serde(default)]
    auto_load_last: bool,
    last_plan: Option<String>,
}

impl Settings {
    const FILE: &'static str = "set_logger_settings.json";

    fn path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|p| p.join(Self::FILE))
    }

    /// Load settings from the JSON configuration file, falling back to the
    /// defaults when the file is missing or unreadable.
    fn load() -> Self {
        if let Some(path) = Self::path() {
            if let Ok(data) = std::fs::read_to_string(&path) {
                if let Ok(cfg) = serde_json::from_str(&data) {
                    return cfg;
                }
            }
        }
        Self::default()
    }

    fn save(&self) {
        if let Some(path) = Self::path() {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(data) = serde_json::to_string_pretty(self) {
                let _ = std::fs::write(path, data);
            }
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            weight_unit: WeightUnit::Kg,
            lock_exercises: false,
            auto_load_last: true,
            last_plan: None,
        }
    }
}

struct SetLoggerApp {
    session: WorkoutSession,
    cards: Vec<CardState>,
    settings: Settings,
    settings_dirty: bool,
    show_settings: bool,
    status: Option<(String, Instant)>,
}

impl Default for SetLoggerApp {
    fn default() -> Self {
        let settings = Settings::load();
        let mut app = Self {
            session: WorkoutSession::default(),
            cards: Vec::new(),
            settings,
            settings_dirty: false,
            show_settings: false,
            status: None,
        };

        if app.settings.auto_load_last {
            if let Some(path) = app.settings.last_plan.clone() {
                if std::path::Path::new(&path).exists() {
                    app.open_plan(std::path::Path::new(&path));
                }
            }
        }
        app.reset_cards();
        app
    }
}

impl SetLoggerApp {
    fn reset_cards(&mut self) {
        self.cards = vec![CardState::default(); self.session.logs.len()];
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some((msg.into(), Instant::now()));
    }

    fn open_plan(&mut self, path: &std::path::Path) {
        match WorkoutSession::load_plan(path) {
            Ok(session) => {
                info!(
                    "Loaded plan with {} exercises from {}",
                    session.logs.len(),
                    path.display()
                );
                self.session = session;
                self.reset_cards();
                self.settings.last_plan = Some(path.display().to_string());
                self.settings_dirty = true;
                self.set_status(format!("Loaded {}", path.display()));
            }
            Err(err) => {
                error!("Failed to load plan {}: {err}", path.display());
                self.set_status(err.to_string());
            }
        }
    }

    fn export(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .add_filter("JSON", &["json"])
            .save_file()
        else {
            return;
        };
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let result = if is_json {
            save_session_json(&path, &self.session).map_err(|e| e.to_string())
        } else {
            save_session_csv(&path, &self.session).map_err(|e| e.to_string())
        };
        match result {
            Ok(()) => {
                info!("Exported {} sets to {}", self.session.total_sets(), path.display());
                self.set_status(format!("Exported to {}", path.display()));
            }
            Err(err) => {
                error!("Failed to export session: {err}");
                self.set_status(format!("Export failed: {err}"));
            }
        }
    }

    fn draw_menu(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New Workout").clicked() {
                    self.session = WorkoutSession::default();
                    self.reset_cards();
                    ui.close_menu();
                }
                if ui.button("Open Plan").clicked() {
                    let picked = FileDialog::new().add_filter("JSON", &["json"]).pick_file();
                    if let Some(path) = picked {
                        self.open_plan(&path);
                    }
                    ui.close_menu();
                }
                if ui.button("Save Plan").clicked() {
                    let picked = FileDialog::new().add_filter("JSON", &["json"]).save_file();
                    if let Some(path) = picked {
                        match self.session.save_plan(&path) {
                            Ok(()) => self.set_status(format!("Saved {}", path.display())),
                            Err(err) => {
                                error!("Failed to save plan: {err}");
                                self.set_status(err.to_string());
                            }
                        }
                    }
                    ui.close_menu();
                }
                if ui.button("Export Sets").clicked() {
                    self.export();
                    ui.close_menu();
                }
                if ui.button("Settings").clicked() {
                    self.show_settings = true;
                    ui.close_menu();
                }
            });
            ui.separator();
            ui.label(format!(
                "{} \u{2013} {}",
                self.session.title,
                self.session.date.format("%a %d %b %Y")
            ));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("{} sets", self.session.total_sets()));
            });
        });
    }

    fn draw_settings(&mut self, ctx: &egui::Context) {
        let mut open = self.show_settings;
        egui::Window::new("Settings")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Weight unit:");
                    for unit in [WeightUnit::Kg, WeightUnit::Lbs] {
                        if ui
                            .selectable_value(&mut self.settings.weight_unit, unit, unit.label())
                            .changed()
                        {
                            self.settings_dirty = true;
                        }
                    }
                });
                if ui
                    .checkbox(&mut self.settings.lock_exercises, "Lock exercise choice")
                    .changed()
                {
                    self.settings_dirty = true;
                }
                if ui
                    .checkbox(&mut self.settings.auto_load_last, "Open last plan on start")
                    .changed()
                {
                    self.settings_dirty = true;
                }
            });
        self.show_settings = open;
    }

    fn draw_cards(&mut self, ui: &mut egui::Ui) {
        // Plans can be swapped between frames; keep one card state per slot.
        if self.cards.len() != self.session.logs.len() {
            self.cards.resize_with(self.session.logs.len(), CardState::default);
        }
        let unit = self.settings.weight_unit.label();
        let locked = self.settings.lock_exercises;
        let mut updates = Vec::new();
        let mut replace_requested = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            let slots = self.session.logs.iter().zip(&mut self.cards).enumerate();
            for (slot, (log, state)) in slots {
                WorkoutCard::new(egui::Id::new(("slot", slot)), log, state)
                    .locked(locked)
                    .unit_label(unit)
                    .on_replace(|| replace_requested = Some(slot))
                    .show(ui, |next| updates.push((slot, next)));
                ui.add_space(12.0);
            }
        });

        for (slot, next) in updates {
            self.session.apply_update(slot, next);
        }
        if let Some(slot) = replace_requested {
            info!("Replace requested for slot {slot}");
            self.set_status("Replacing exercises is not available in this workout");
        }
    }
}

impl App for SetLoggerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| self.draw_menu(ui));

        let expired = self
            .status
            .as_ref()
            .map_or(false, |(_, start)| start.elapsed() >= Duration::from_secs(4));
        if expired {
            self.status = None;
        }
        if let Some((msg, _)) = &self.status {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                ui.label(msg.as_str());
            });
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        egui::CentralPanel::default().show(ctx, |ui| self.draw_cards(ui));

        if self.show_settings {
            self.draw_settings(ctx);
        }

        if self.settings_dirty {
            self.settings.save();
            self.settings_dirty = false;
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.settings.save();
    }
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([420.0, 820.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Set Logger",
        options,
        Box::new(|_cc| Box::new(SetLoggerApp::default())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn with_config_dir<F: FnOnce(&std::path::Path)>(f: F) {
        use std::env;

        let _guard = ENV_MUTEX.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let prev_config = env::var_os("XDG_CONFIG_HOME");
        unsafe {
            env::set_var("XDG_CONFIG_HOME", dir.path());
        }

        f(dir.path());

        if let Some(val) = prev_config {
            unsafe {
                env::set_var("XDG_CONFIG_HOME", val);
            }
        } else {
            unsafe {
                env::remove_var("XDG_CONFIG_HOME");
            }
        }
    }

    #[test]
    fn settings_roundtrip() {
        let s = Settings {
            weight_unit: WeightUnit::Lbs,
            lock_exercises: true,
            auto_load_last: false,
            last_plan: Some("/tmp/plan.json".into()),
        };
        let json = serde_json::to_string(&s).unwrap();
        let loaded: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(s, loaded);
    }

    #[test]
    fn settings_missing_fields_default() {
        let loaded: Settings =
            serde_json::from_str(r#"{"weight_unit":"Lbs","last_plan":null}"#).unwrap();
        assert_eq!(loaded.weight_unit, WeightUnit::Lbs);
        assert!(!loaded.lock_exercises);
        assert!(!loaded.auto_load_last);
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn settings_persist_in_config_dir() {
        with_config_dir(|_| {
            let mut s = Settings::default();
            s.lock_exercises = true;
            s.save();
            assert!(Settings::load().lock_exercises);

            std::fs::write(Settings::path().unwrap(), "garbage").unwrap();
            assert_eq!(Settings::load(), Settings::default());
        });
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn app_reopens_last_plan() {
        with_config_dir(|dir| {
            let plan = dir.join("plan.json");
            let mut session = WorkoutSession::default();
            session.title = "Push".into();
            session.logs.truncate(2);
            session.save_plan(&plan).unwrap();

            let mut s = Settings::default();
            s.last_plan = Some(plan.display().to_string());
            s.save();

            let app = SetLoggerApp::default();
            assert_eq!(app.session.title, "Push");
            assert_eq!(app.cards.len(), 2);
        });
    }

    #[test]
    fn card_updates_reach_the_session() {
        let mut app = SetLoggerApp {
            session: WorkoutSession::default(),
            cards: Vec::new(),
            settings: Settings::default(),
            settings_dirty: false,
            show_settings: false,
            status: None,
        };
        app.reset_cards();

        let log = app.session.logs[0].clone();
        let mut state = app.cards[0].clone();
        state.open_input();
        state.weight = "100".into();
        state.reps = "5".into();
        assert!(state.commit(&log, |next| {
            assert!(app.session.apply_update(0, next));
        }));
        assert_eq!(app.session.total_sets(), 1);

        let ctx = egui::Context::default();
        let _ = ctx.run(Default::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| app.draw_cards(ui));
        });
        assert_eq!(app.session.total_sets(), 1);
        assert_eq!(app.cards.len(), app.session.logs.len());
    }
}
