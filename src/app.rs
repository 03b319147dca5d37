use std::path::PathBuf;

use ganttview::chart::GanttData;
use ganttview::io::{self, LoadedProject};
use ganttview::model::{
    ApiDateRange, DateRange, DependsOnRef, GanttPayload, LayoutConfig, RawTask, TaskPayload,
    ZoomLevel,
};
use ganttview::prefs::Prefs;

use crate::ui;

/// Main application state.
pub struct GanttApp {
    pub project_name: String,
    /// Raw records of the most recent ingest; the pipeline re-runs over
    /// these on every zoom or scale change.
    pub raw_tasks: Vec<RawTask>,
    pub server_range: Option<DateRange>,
    pub data: GanttData,

    pub zoom: ZoomLevel,
    pub config: LayoutConfig,
    pub selected_task: Option<String>,
    pub file_path: Option<PathBuf>,

    // Dialog state
    pub show_about: bool,
    pub show_format_help: bool,

    // Status message
    pub status_message: String,

    prefs: Prefs,
}

impl GanttApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let prefs = Prefs::load();
        let mut config = LayoutConfig::default();
        if let Some(ppu) = prefs.pixels_per_unit {
            if ppu.is_finite() {
                config.pixels_per_unit =
                    ppu.clamp(LayoutConfig::MIN_PIXELS_PER_UNIT, LayoutConfig::MAX_PIXELS_PER_UNIT);
            }
        }

        let mut app = Self {
            project_name: String::new(),
            raw_tasks: Vec::new(),
            server_range: None,
            data: GanttData::empty(),
            zoom: prefs.zoom,
            config,
            selected_task: None,
            file_path: None,
            show_about: false,
            show_format_help: false,
            status_message: "Ready".to_string(),
            prefs,
        };

        // Reopen the previous payload when possible, otherwise start on the
        // built-in sample.
        match app.prefs.last_file.clone() {
            Some(path) if path.exists() => match io::load_payload(&path) {
                Ok(project) => {
                    app.adopt(project, Some(path));
                    app.status_message = "Reopened last payload".to_string();
                }
                Err(e) => {
                    eprintln!("Could not reopen {}: {}", path.display(), e);
                    app.load_sample();
                }
            },
            _ => app.load_sample(),
        }

        app
    }

    /// Re-run the whole pipeline over the current raw records.
    pub fn recompute(&mut self) {
        self.data = GanttData::prepare_with_fallback(
            &self.raw_tasks,
            self.server_range,
            self.zoom,
            &self.config,
        );
        if let Some(selected) = &self.selected_task {
            if !self.data.tasks.iter().any(|t| &t.id == selected) {
                self.selected_task = None;
            }
        }
    }

    fn adopt(&mut self, project: LoadedProject, path: Option<PathBuf>) {
        self.project_name = project.name;
        self.raw_tasks = project.tasks;
        self.server_range = project.server_range;
        self.file_path = path.clone();
        self.selected_task = None;
        self.recompute();

        self.prefs.last_file = path;
        self.prefs.save();
    }

    pub fn set_zoom(&mut self, zoom: ZoomLevel) {
        if self.zoom != zoom {
            self.zoom = zoom;
            self.recompute();
            self.save_view_prefs();
        }
    }

    pub fn save_view_prefs(&mut self) {
        self.prefs.zoom = self.zoom;
        self.prefs.pixels_per_unit = Some(self.config.pixels_per_unit);
        self.prefs.save();
    }

    // --- File operations ---

    pub fn open_payload(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Task Payload", &["json"])
            .pick_file()
        {
            match io::load_payload(&path) {
                Ok(project) => {
                    let count = project.tasks.len();
                    self.adopt(project, Some(path));
                    self.status_message = format!("Loaded {} tasks", count);
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    /// Re-ingest the current source from disk.
    pub fn reload(&mut self) {
        match self.file_path.clone() {
            Some(path) => match io::load_payload(&path) {
                Ok(project) => {
                    let count = project.tasks.len();
                    self.adopt(project, Some(path));
                    self.status_message = format!("Reloaded {} tasks", count);
                }
                Err(e) => {
                    self.status_message = format!("Reload failed: {}", e);
                }
            },
            None => {
                self.load_sample();
                self.status_message = "Reloaded sample data".to_string();
            }
        }
    }

    pub fn import_csv(&mut self) {
        // Guard: if a payload is already loaded, confirm before replacing
        if !self.raw_tasks.is_empty() {
            let confirm = rfd::MessageDialog::new()
                .set_title("Import CSV")
                .set_description("This will replace the currently loaded tasks. Continue?")
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            if confirm != rfd::MessageDialogResult::Yes {
                return;
            }
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match io::csv_import::import_csv(&path) {
                Ok((tasks, skipped)) => {
                    let name = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("Imported Project")
                        .to_string();
                    let count = tasks.len();

                    self.adopt(
                        LoadedProject {
                            name,
                            tasks,
                            server_range: None,
                        },
                        None,
                    );

                    if skipped > 0 {
                        self.status_message =
                            format!("Imported {} tasks ({} rows skipped)", count, skipped);
                    } else {
                        self.status_message = format!("Imported {} tasks", count);
                    }
                }
                Err(e) => {
                    self.status_message = format!("CSV import failed: {}", e);
                }
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.data.tasks.is_empty() {
            self.status_message = "Nothing to export — no tasks loaded".to_string();
            return;
        }

        let default_name = format!("{}.csv", self.project_name);
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        {
            match io::csv_export::export_csv(&self.data.tasks, &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {} tasks to CSV", count);
                }
                Err(e) => {
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    pub fn load_sample(&mut self) {
        let project = io::project_from_payload(sample_payload(), "Sample");
        self.adopt(project, None);
        self.status_message = "Sample data loaded".to_string();
    }
}

/// Built-in demo payload in the Gantt-endpoint shape, so the viewer opens
/// onto a populated chart.
fn sample_payload() -> TaskPayload {
    let today = chrono::Local::now().date_naive();
    let day = |offset: i64| (today + chrono::Duration::days(offset)).format("%Y-%m-%d").to_string();

    let task = |id: &str,
                subject: &str,
                status: &str,
                progress: f64,
                start: Option<i64>,
                end: Option<i64>,
                parent: Option<&str>,
                is_group: bool,
                deps: &[&str]| RawTask {
        id: id.to_string(),
        subject: Some(subject.to_string()),
        status: Some(status.to_string()),
        priority: None,
        progress: Some(progress),
        exp_start_date: start.map(day),
        exp_end_date: end.map(day),
        assigned_to: None,
        parent_task_id: parent.map(str::to_string),
        is_group,
        depends_on: deps
            .iter()
            .map(|d| DependsOnRef {
                dependent_task_id: d.to_string(),
            })
            .collect(),
    };

    let mut tasks = vec![
        task("TASK-0001", "Discovery", "Working", 60.0, Some(-5), Some(8), None, true, &[]),
        task(
            "TASK-0002",
            "Stakeholder Interviews",
            "Completed",
            100.0,
            Some(-5),
            Some(-2),
            Some("TASK-0001"),
            false,
            &[],
        ),
        task(
            "TASK-0003",
            "Requirements Workshop",
            "Working",
            55.0,
            Some(-2),
            Some(5),
            Some("TASK-0001"),
            false,
            &["TASK-0002"],
        ),
        task(
            "TASK-0004",
            "Process Mapping",
            "Open",
            0.0,
            Some(3),
            Some(8),
            Some("TASK-0001"),
            false,
            &["TASK-0003"],
        ),
        task("TASK-0005", "Implementation", "Open", 0.0, Some(6), Some(30), None, true, &[]),
        task(
            "TASK-0006",
            "Chart of Accounts Setup",
            "Open",
            0.0,
            Some(6),
            Some(14),
            Some("TASK-0005"),
            false,
            &["TASK-0004"],
        ),
        task(
            "TASK-0007",
            "Inventory Migration",
            "Open",
            0.0,
            Some(10),
            Some(24),
            Some("TASK-0005"),
            false,
            &["TASK-0006"],
        ),
        task(
            "TASK-0008",
            "User Acceptance Testing",
            "Open",
            0.0,
            Some(22),
            Some(30),
            Some("TASK-0005"),
            false,
            &["TASK-0007"],
        ),
        task("TASK-0009", "Training Plan", "Open", 0.0, None, None, None, false, &[]),
    ];
    tasks[1].assigned_to = Some("ops@example.com".to_string());
    tasks[2].priority = Some("High".to_string());
    tasks[7].priority = Some("Urgent".to_string());

    TaskPayload::Gantt(GanttPayload {
        project: Some("ERP Rollout".to_string()),
        tasks,
        date_range: Some(ApiDateRange {
            min_date: Some(day(-5)),
            max_date: Some(day(30)),
        }),
    })
}

impl eframe::App for GanttApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::R)) {
            self.reload();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_sub())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Tasks: {} · Links: {}",
                                self.data.tasks.len(),
                                self.data.dependencies.len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(format!("Scale: {}", self.zoom.label()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: task table
        let mut table_action = ui::task_table::TaskTableAction::None;
        egui::SidePanel::left("task_panel")
            .default_width(340.0)
            .min_width(240.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(6.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                table_action = ui::task_table::show_task_table(
                    &self.data.tasks,
                    self.selected_task.as_deref(),
                    ui,
                );
            });

        if let ui::task_table::TaskTableAction::Select(id) = table_action {
            self.selected_task = Some(id);
        }

        // Central panel: Gantt chart
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let interaction = ui::gantt_chart::show_gantt_chart(
                &self.data,
                self.zoom,
                &mut self.config,
                &mut self.selected_task,
                ui,
            );
            if interaction.zoom_changed {
                self.recompute();
                self.save_view_prefs();
            }
        });

        // Dialogs
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.show_format_help {
            ui::dialogs::show_format_help_dialog(self, ctx);
        }
    }
}
