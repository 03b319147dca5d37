use egui::{menu, RichText, Ui};

use ganttview::model::ZoomLevel;
use ganttview::prefs::Prefs;

use crate::app::GanttApp;
use crate::ui::theme;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut GanttApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui
                .button(format!("{}  Open Payload...", egui_phosphor::regular::FOLDER_OPEN))
                .clicked()
            {
                app.open_payload();
                ui.close_menu();
            }
            if ui
                .button(format!(
                    "{}  Reload              Ctrl+R",
                    egui_phosphor::regular::ARROWS_CLOCKWISE
                ))
                .clicked()
            {
                app.reload();
                ui.close_menu();
            }
            ui.separator();
            if ui
                .button(format!("{}  Import CSV...", egui_phosphor::regular::FILE_CSV))
                .clicked()
            {
                app.import_csv();
                ui.close_menu();
            }
            if ui
                .button(format!("{}  Export CSV...", egui_phosphor::regular::FILE_CSV))
                .clicked()
            {
                app.export_csv();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Load Sample Data").clicked() {
                app.load_sample();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui
                .button(format!(
                    "{}  Zoom In        Ctrl+Scroll ↑",
                    egui_phosphor::regular::MAGNIFYING_GLASS_PLUS
                ))
                .clicked()
            {
                app.config.zoom_in();
                app.recompute();
                app.save_view_prefs();
                ui.close_menu();
            }
            if ui
                .button(format!(
                    "{}  Zoom Out      Ctrl+Scroll ↓",
                    egui_phosphor::regular::MAGNIFYING_GLASS_MINUS
                ))
                .clicked()
            {
                app.config.zoom_out();
                app.recompute();
                app.save_view_prefs();
                ui.close_menu();
            }
            ui.separator();
            ui.label(RichText::new("Timeline Scale").small().weak());
            for zoom in ZoomLevel::ALL {
                if ui.radio(app.zoom == zoom, zoom.label()).clicked() {
                    app.set_zoom(zoom);
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui.button("  Open Preferences Folder").clicked() {
                if let Some(dir) = Prefs::config_dir() {
                    let _ = open::that(&dir);
                }
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("Data Formats...").clicked() {
                app.show_format_help = true;
                ui.close_menu();
            }
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned project name and source file
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let source = match &app.file_path {
                Some(path) => path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("?")
                    .to_string(),
                None => "sample data".to_string(),
            };
            ui.label(
                RichText::new(format!("{} — {}", app.project_name, source))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
