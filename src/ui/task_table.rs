use egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use ganttview::model::GanttTask;

use crate::ui::theme;

/// Actions that the task table can request.
pub enum TaskTableAction {
    None,
    Select(String),
}

/// Render the left-side task table panel. Rows follow the chart's render
/// order, with children indented under their group.
pub fn show_task_table(
    tasks: &[GanttTask],
    selected_task: Option<&str>,
    ui: &mut Ui,
) -> TaskTableAction {
    let mut action = TaskTableAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Tasks")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", tasks.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);
    ui.separator();
    ui.add_space(2.0);

    TableBuilder::new(ui)
        .striped(true)
        .sense(egui::Sense::click())
        .column(Column::remainder().at_least(120.0).clip(true))
        .column(Column::auto().at_least(64.0))
        .column(Column::auto().at_least(52.0))
        .column(Column::auto().at_least(44.0))
        .column(Column::auto().at_least(44.0))
        .header(18.0, |mut header| {
            for title in ["TASK", "STATUS", "DONE", "START", "END"] {
                header.col(|ui| {
                    ui.label(RichText::new(title).size(9.0).color(theme::TEXT_DIM).strong());
                });
            }
        })
        .body(|mut body| {
            for task in tasks {
                let is_selected = selected_task == Some(task.id.as_str());
                body.row(22.0, |mut row| {
                    row.set_selected(is_selected);

                    row.col(|ui| {
                        ui.horizontal(|ui| {
                            ui.spacing_mut().item_spacing.x = 4.0;
                            ui.add_space(task.depth as f32 * 12.0);

                            // Status dot; groups get a caret instead
                            if task.is_group {
                                ui.label(
                                    RichText::new("▾").size(10.0).color(theme::TEXT_SECONDARY),
                                );
                            } else {
                                let (dot_rect, _) = ui.allocate_exact_size(
                                    egui::vec2(6.0, 6.0),
                                    egui::Sense::hover(),
                                );
                                ui.painter().circle_filled(
                                    dot_rect.center(),
                                    3.0,
                                    theme::status_color(task.status),
                                );
                            }

                            let label = RichText::new(&task.label).size(12.0).color(
                                if is_selected {
                                    egui::Color32::WHITE
                                } else {
                                    theme::TEXT_PRIMARY
                                },
                            );
                            ui.add(egui::Label::new(label).truncate());
                        });
                    });

                    row.col(|ui| {
                        ui.label(
                            RichText::new(task.status.label())
                                .size(10.0)
                                .color(theme::priority_color(task.priority)),
                        )
                        .on_hover_text(format!("Priority: {}", task.priority.label()));
                    });

                    row.col(|ui| {
                        let pbar = egui::ProgressBar::new(task.progress)
                            .desired_width(44.0)
                            .fill(theme::status_color(task.status))
                            .rounding(egui::Rounding::same(3.0));
                        ui.add(pbar);
                    });

                    row.col(|ui| {
                        ui.label(date_cell(task.start));
                    });
                    row.col(|ui| {
                        ui.label(date_cell(task.end));
                    });

                    if row.response().clicked() {
                        action = TaskTableAction::Select(task.id.clone());
                    }
                });
            }
        });

    action
}

fn date_cell(date: Option<chrono::NaiveDate>) -> RichText {
    match date {
        Some(d) => RichText::new(d.format("%m/%d").to_string())
            .size(10.0)
            .color(theme::TEXT_SECONDARY),
        None => RichText::new("—").size(10.0).color(theme::TEXT_DIM),
    }
}
