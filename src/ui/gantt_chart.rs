use chrono::{Datelike, NaiveDate};
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use ganttview::chart::{GanttData, GanttLayout};
use ganttview::model::{GanttTask, LayoutConfig, ZoomLevel};

use crate::ui::theme;

const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;

/// Result details from interactions in the Gantt chart.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    /// The user changed the horizontal scale; the layout must be rebuilt.
    pub zoom_changed: bool,
}

/// Render the chart area (central panel). Pure presentation: all geometry
/// comes precomputed in `data.layout`.
pub fn show_gantt_chart(
    data: &GanttData,
    zoom: ZoomLevel,
    config: &mut LayoutConfig,
    selected_task: &mut Option<String>,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();

    let Some(layout) = &data.layout else {
        ui.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new("No tasks to display")
                    .size(14.0)
                    .color(theme::TEXT_DIM),
            );
        });
        return interaction;
    };

    let available = ui.available_size();
    let chart_width = layout.width.max(available.x);
    let chart_height = HEADER_HEIGHT + layout.height + 40.0;

    // Ctrl+scroll adjusts the pixels-per-unit scale
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        if scroll_delta.y > 0.0 {
            config.zoom_in();
            interaction.zoom_changed = true;
        } else if scroll_delta.y < 0.0 {
            config.zoom_out();
            interaction.zoom_changed = true;
        }
    }

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::click(),
            );
            let origin = response.rect.min;
            let mut consumed_click = false;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            draw_timeline_header(&painter, origin, layout, zoom, chart_width);
            draw_today_line(&painter, origin, layout, chart_height);

            // Alternating row backgrounds
            for (i, row) in layout.rows.iter().enumerate() {
                let y = origin.y + HEADER_HEIGHT + row.y;
                let row_bg = if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };
                painter.rect_filled(
                    Rect::from_min_size(
                        Pos2::new(origin.x, y),
                        Vec2::new(chart_width, layout.row_height),
                    ),
                    0.0,
                    row_bg,
                );
                painter.line_segment(
                    [
                        Pos2::new(origin.x, y + layout.row_height),
                        Pos2::new(origin.x + chart_width, y + layout.row_height),
                    ],
                    Stroke::new(0.5, theme::BORDER_SUBTLE),
                );
            }

            draw_connectors(&painter, origin, layout, data);

            // Task bars
            for (row, task) in layout.rows.iter().zip(&data.tasks) {
                let y = origin.y + HEADER_HEIGHT + row.y;
                let is_selected = selected_task.as_deref() == Some(task.id.as_str());

                let hit_rect = match row.bar {
                    Some(bar) => {
                        let rect = bar_rect(origin, layout, bar.x, bar.width, y);
                        if row.is_group {
                            draw_group_bar(&painter, rect, task, is_selected);
                        } else {
                            draw_task_bar(&painter, rect, task, is_selected);
                        }
                        rect
                    }
                    None => draw_dateless_label(&painter, origin, layout, task, y, is_selected),
                };

                let bar_response = ui.interact(
                    hit_rect.expand(2.0),
                    ui.make_persistent_id(("task-bar", &task.id)),
                    Sense::click(),
                );
                if bar_response.clicked() {
                    *selected_task = Some(task.id.clone());
                    consumed_click = true;
                }
                if bar_response.hovered() {
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        egui::Id::new(("task-tip", &task.id)),
                        |ui| {
                            ui.strong(&task.label);
                            if let (Some(start), Some(end)) = (task.start, task.end) {
                                ui.label(format!(
                                    "{} → {}",
                                    start.format("%d/%m/%Y"),
                                    end.format("%d/%m/%Y"),
                                ));
                            } else {
                                ui.label("Unscheduled");
                            }
                            ui.label(format!(
                                "{} · Progress: {}%",
                                task.status.label(),
                                (task.progress * 100.0) as i32
                            ));
                            if let Some(assignee) = &task.assignee {
                                ui.label(format!("Assigned to {}", assignee));
                            }
                        },
                    );
                }
            }

            // Empty click on background clears selection
            if response.clicked() && !consumed_click {
                *selected_task = None;
            }
        });

    interaction
}

fn bar_rect(origin: Pos2, layout: &GanttLayout, x: f32, width: f32, y: f32) -> Rect {
    let inset = layout.bar_inset + 2.0;
    Rect::from_min_size(
        Pos2::new(origin.x + x, y + inset),
        Vec2::new(width.max(6.0), layout.row_height - inset * 2.0),
    )
}

fn draw_timeline_header(
    painter: &egui::Painter,
    origin: Pos2,
    layout: &GanttLayout,
    zoom: ZoomLevel,
    width: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let mut date = layout.range.start;
    let end = layout.range.end;

    match zoom {
        ZoomLevel::Day => {
            while date <= end {
                let x = origin.x + layout.x_of(date);
                grid_line(painter, x, origin.y);

                if layout.pixels_per_day >= 20.0 {
                    let is_weekend = date.weekday().num_days_from_monday() >= 5;
                    let day_color = if is_weekend {
                        theme::TEXT_DIM
                    } else {
                        theme::TEXT_SECONDARY
                    };
                    painter.text(
                        Pos2::new(x + 3.0, origin.y + 28.0),
                        egui::Align2::LEFT_CENTER,
                        date.format("%d").to_string(),
                        theme::font_sub(),
                        day_color,
                    );
                }

                if date.day() == 1 {
                    painter.text(
                        Pos2::new(x + 3.0, origin.y + 12.0),
                        egui::Align2::LEFT_CENTER,
                        date.format("%b %Y").to_string(),
                        theme::font_header(),
                        theme::TEXT_PRIMARY,
                    );
                }

                date += chrono::Duration::days(1);
            }
        }
        ZoomLevel::Week => {
            let weekday = date.weekday().num_days_from_monday();
            date -= chrono::Duration::days(weekday as i64);

            while date <= end {
                let x = origin.x + layout.x_of(date);
                grid_line(painter, x, origin.y);

                painter.text(
                    Pos2::new(x + 3.0, origin.y + 28.0),
                    egui::Align2::LEFT_CENTER,
                    date.format("W%V").to_string(),
                    theme::font_sub(),
                    theme::TEXT_SECONDARY,
                );

                if date.day() <= 7 {
                    painter.text(
                        Pos2::new(x + 3.0, origin.y + 12.0),
                        egui::Align2::LEFT_CENTER,
                        date.format("%b %Y").to_string(),
                        theme::font_header(),
                        theme::TEXT_PRIMARY,
                    );
                }

                date += chrono::Duration::days(7);
            }
        }
        ZoomLevel::Month => {
            date = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);

            while date <= end {
                let x = origin.x + layout.x_of(date);
                grid_line(painter, x, origin.y);

                painter.text(
                    Pos2::new(x + 5.0, origin.y + 18.0),
                    egui::Align2::LEFT_CENTER,
                    date.format("%b %Y").to_string(),
                    theme::font_header(),
                    theme::TEXT_PRIMARY,
                );

                let (y, m) = if date.month() == 12 {
                    (date.year() + 1, 1)
                } else {
                    (date.year(), date.month() + 1)
                };
                date = NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(date + chrono::Duration::days(30));
            }
        }
    }
}

fn grid_line(painter: &egui::Painter, x: f32, top: f32) {
    painter.line_segment(
        [
            Pos2::new(x, top + HEADER_HEIGHT),
            Pos2::new(x, top + 2000.0),
        ],
        Stroke::new(0.5, theme::GRID_LINE),
    );
}

fn draw_today_line(painter: &egui::Painter, origin: Pos2, layout: &GanttLayout, height: f32) {
    let today = chrono::Local::now().date_naive();
    if today < layout.range.start || today > layout.range.end {
        return;
    }
    let x = origin.x + layout.x_of(today);

    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_task_bar(painter: &egui::Painter, bar_rect: Rect, task: &GanttTask, is_selected: bool) {
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let color = theme::status_color(task.status);

    // Soft shadow
    let shadow_rect = bar_rect.translate(Vec2::new(1.0, 2.0));
    painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));

    painter.rect_filled(bar_rect, rounding, color);
    // Lighter top highlight
    let highlight_rect = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(bar_rect.width(), (bar_rect.height() * 0.45).max(4.0)),
    );
    painter.rect_filled(
        highlight_rect,
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );

    // Progress fill (darkened overlay)
    if task.progress > 0.0 {
        let progress_width = bar_rect.width() * task.progress.clamp(0.0, 1.0);
        let progress_rect =
            Rect::from_min_size(bar_rect.min, Vec2::new(progress_width, bar_rect.height()));
        painter.rect_filled(progress_rect, rounding, theme::PROGRESS_OVERLAY);

        if task.progress < 0.98 {
            let tick_x = bar_rect.left() + progress_width;
            painter.line_segment(
                [
                    Pos2::new(tick_x, bar_rect.top() + 2.0),
                    Pos2::new(tick_x, bar_rect.bottom() - 2.0),
                ],
                Stroke::new(1.0, Color32::from_white_alpha(60)),
            );
        }
    }

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // Task label on bar (single line, clipped to bar bounds)
    if bar_rect.width() > 30.0 {
        let galley =
            painter.layout_no_wrap(task.label.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let clipped = painter.with_clip_rect(bar_rect);
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }
}

/// Rollup bar for a group task: thin strip with drop caps at both ends.
fn draw_group_bar(painter: &egui::Painter, bar_rect: Rect, task: &GanttTask, is_selected: bool) {
    let strip = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(bar_rect.width(), (bar_rect.height() * 0.45).max(7.0)),
    );
    painter.rect_filled(strip, Rounding::same(2.0), theme::GROUP_BAR);

    let cap = |x: f32| {
        vec![
            Pos2::new(x - 4.0, strip.bottom()),
            Pos2::new(x + 4.0, strip.bottom()),
            Pos2::new(x, strip.bottom() + 6.0),
        ]
    };
    painter.add(egui::Shape::convex_polygon(
        cap(strip.left() + 4.0),
        theme::GROUP_BAR,
        Stroke::NONE,
    ));
    painter.add(egui::Shape::convex_polygon(
        cap(strip.right() - 4.0),
        theme::GROUP_BAR,
        Stroke::NONE,
    ));

    if is_selected {
        painter.rect_stroke(
            strip.expand(1.5),
            Rounding::same(3.0),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    painter.text(
        Pos2::new(strip.left() + 2.0, strip.bottom() + 8.0),
        egui::Align2::LEFT_TOP,
        &task.label,
        theme::font_small(),
        theme::TEXT_SECONDARY,
    );
}

/// Row content for a task with no dates: a dimmed label at the left edge.
fn draw_dateless_label(
    painter: &egui::Painter,
    origin: Pos2,
    layout: &GanttLayout,
    task: &GanttTask,
    y: f32,
    is_selected: bool,
) -> Rect {
    let pos = Pos2::new(origin.x + 8.0, y + layout.row_height / 2.0);
    let color = if is_selected {
        theme::TEXT_PRIMARY
    } else {
        theme::TEXT_DIM
    };
    let rect = painter.text(
        pos,
        egui::Align2::LEFT_CENTER,
        format!("{} (unscheduled)", task.label),
        theme::font_bar(),
        color,
    );
    rect.expand2(Vec2::new(4.0, 2.0))
}

/// Connector lines for dependency edges: from the end of the source bar to
/// the start of the target bar.
fn draw_connectors(painter: &egui::Painter, origin: Pos2, layout: &GanttLayout, data: &GanttData) {
    let stroke = Stroke::new(1.2, theme::CONNECTOR);
    let elbow = theme::CONNECTOR_ELBOW;

    for edge in &data.dependencies {
        let (Some(from_row), Some(to_row)) = (layout.row(&edge.from), layout.row(&edge.to)) else {
            continue;
        };
        let (Some(from_bar), Some(to_bar)) = (from_row.bar, to_row.bar) else {
            continue;
        };

        let start = Pos2::new(
            origin.x + from_bar.x + from_bar.width.max(6.0),
            origin.y + HEADER_HEIGHT + from_row.y + layout.row_height / 2.0,
        );
        let end = Pos2::new(
            origin.x + to_bar.x,
            origin.y + HEADER_HEIGHT + to_row.y + layout.row_height / 2.0,
        );

        let mut points = vec![start, Pos2::new(start.x + elbow, start.y)];
        if start.x + elbow * 2.0 <= end.x {
            points.push(Pos2::new(start.x + elbow, end.y));
        } else {
            // Target starts left of the source end; route around via the
            // gap between the two rows.
            let lane = if end.y >= start.y {
                origin.y + HEADER_HEIGHT + to_row.y
            } else {
                origin.y + HEADER_HEIGHT + to_row.y + layout.row_height
            };
            points.push(Pos2::new(start.x + elbow, lane));
            points.push(Pos2::new(end.x - elbow, lane));
            points.push(Pos2::new(end.x - elbow, end.y));
        }
        points.push(end);

        for pair in points.windows(2) {
            painter.line_segment([pair[0], pair[1]], stroke);
        }

        // Arrowhead into the target bar
        let tip = end;
        painter.add(egui::Shape::convex_polygon(
            vec![
                tip,
                Pos2::new(tip.x - 6.0, tip.y - 3.5),
                Pos2::new(tip.x - 6.0, tip.y + 3.5),
            ],
            theme::CONNECTOR,
            Stroke::NONE,
        ));
    }
}
