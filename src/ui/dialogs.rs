use egui::{Context, RichText, Window};

use crate::app::GanttApp;
use crate::ui::theme;

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut GanttApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Gantt Viewer").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("A Gantt chart viewer for ERP project tasks,");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

/// Render the data-format help dialog: the accepted JSON payload shapes and
/// CSV columns.
pub fn show_format_help_dialog(app: &mut GanttApp, ctx: &Context) {
    let mut should_close = false;

    Window::new(RichText::new("Data Formats").strong().size(14.0))
        .resizable(true)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_size([560.0, 520.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(4.0);

                ui.label(RichText::new("JSON Payloads").strong());
                ui.label(
                    "Two shapes are accepted and detected automatically: the \
                     dedicated Gantt endpoint response, and the generic task-list \
                     response (reshaped locally, first 500 rows).",
                );
                ui.add_space(4.0);

                let gantt_example = r#"{
  "project": "ERP Rollout",
  "tasks": [
    {
      "id": "TASK-0001",
      "subject": "Requirements Workshop",
      "status": "Working",
      "priority": "High",
      "progress": 40,
      "exp_start_date": "2025-06-02",
      "exp_end_date": "2025-06-13",
      "assigned_to": "jane@example.com",
      "parent_task_id": "TASK-0000",
      "is_group": 0,
      "depends_on": [{"dependent_task_id": "TASK-0002"}]
    }
  ],
  "date_range": {"min_date": "2025-06-01", "max_date": "2025-08-31"}
}"#;
                code_block(ui, gantt_example);
                ui.add_space(4.0);
                ui.label("Task-list shape: the same task records under a \"data\" key.");
                code_block(ui, r#"{"data": [ ...tasks... ], "total": 137, "limit": 500}"#);
                ui.add_space(8.0);

                ui.label(RichText::new("Field Notes").strong());
                ui.add_space(2.0);
                let notes = [
                    "• Only \"id\" is required; every other field has a default.",
                    "• Unparseable dates are treated as missing, never rejected.",
                    "• A task missing one of its two dates gets a single-day span.",
                    "• \"is_group\" may be a boolean or a 0/1 integer.",
                    "• Unknown parent ids make the task a top-level row.",
                    "• Dependency entries pointing at unknown ids are ignored.",
                ];
                for note in &notes {
                    ui.label(RichText::new(*note).small());
                }
                ui.add_space(8.0);

                ui.label(RichText::new("CSV Columns").strong());
                ui.label(
                    "Header matching is case-insensitive and ignores spaces, hyphens \
                     and underscores. The delimiter (comma, semicolon, tab) is \
                     auto-detected. Only a subject column is required.",
                );
                ui.add_space(2.0);
                egui::Grid::new("csv_columns")
                    .num_columns(2)
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Column").underline());
                        ui.label(RichText::new("Accepted headers").underline());
                        ui.end_row();

                        for (column, headers) in [
                            ("ID", "ID, Task ID, Key, Ref"),
                            ("Subject", "Subject, Name, Task Name, Label, Title, Activity"),
                            ("Start", "Start, Start Date, Exp Start Date, From, Begin"),
                            ("End", "End, End Date, Exp End Date, To, Finish, Due"),
                            ("Status", "Status, State, Stage"),
                            ("Priority", "Priority, Pri, Importance"),
                            ("Progress", "Progress, Done, Percent Complete"),
                            ("Assignee", "Assigned To, Assignee, Owner, Responsible"),
                            ("Parent", "Parent, Parent Task, Parent Task ID, Subtask Of"),
                            ("Group", "Is Group, Group, Container, Phase"),
                            ("Depends On", "Depends On, Dependencies, Deps, Predecessors"),
                        ] {
                            ui.label(RichText::new(column).strong());
                            ui.label(headers);
                            ui.end_row();
                        }
                    });
                ui.add_space(4.0);
                ui.label(
                    RichText::new(
                        "• Dependency cells hold task ids separated by commas or semicolons.\n\
                         • Rows without a subject are skipped; rows without an id get a \
                         generated ROW-nnnn id.",
                    )
                    .small(),
                );
                ui.add_space(8.0);
            });

            ui.separator();
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.add_sized([80.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_format_help = false;
    }
}

fn code_block(ui: &mut egui::Ui, text: &str) {
    egui::Frame::dark_canvas(ui.style()).show(ui, |ui| {
        ui.add(
            egui::TextEdit::multiline(&mut text.to_string())
                .font(egui::TextStyle::Monospace)
                .desired_width(f32::INFINITY)
                .interactive(false),
        );
    });
}
