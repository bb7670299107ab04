use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender};
use eframe::egui;
use shared::domain::UploadedFileRecord;

mod backend_bridge;
mod controller;

use backend_bridge::commands::BackendCommand;
use controller::events::{err_label, UiErrorContext, UiEvent};
use controller::orchestration::dispatch_backend_command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

fn human_readable_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        return format!("{bytes} B");
    }
    let formatted = format!("{value:.1}");
    let formatted = formatted.trim_end_matches(".0");
    format!("{} {}", formatted, UNITS[unit])
}

struct UploaderApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    backend_ready: bool,
    selected_file: Option<(String, Option<u64>)>,
    uploading: bool,
    uploaded_files: Vec<UploadedFileRecord>,

    status: String,
    status_banner: Option<StatusBanner>,
}

impl UploaderApp {
    fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            backend_ready: false,
            selected_file: None,
            uploading: false,
            uploaded_files: Vec::new(),
            status: "Backend worker starting...".to_string(),
            status_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendReady => {
                    self.backend_ready = true;
                    self.status = "Ready".to_string();
                }
                UiEvent::FileSelected { name, size } => {
                    self.status = format!("Selected {name}");
                    self.selected_file = Some((name, size));
                }
                UiEvent::PickCancelled => {
                    self.status = "File selection cancelled".to_string();
                }
                UiEvent::UploadStarted { name } => {
                    self.uploading = true;
                    self.status = format!("Uploading {name}...");
                }
                UiEvent::UploadSucceeded { record } => {
                    self.uploading = false;
                    self.selected_file = None;
                    self.status = format!("Uploaded {}", record.name);
                    self.status_banner = Some(StatusBanner {
                        severity: StatusBannerSeverity::Info,
                        message: "File uploaded successfully!".to_string(),
                    });
                    self.uploaded_files.push(record);
                }
                UiEvent::UploadFailed { message } => {
                    self.uploading = false;
                    self.status = message.clone();
                    self.status_banner = Some(StatusBanner {
                        severity: StatusBannerSeverity::Error,
                        message,
                    });
                }
                UiEvent::Error(err) => {
                    self.status = format!("{} error: {}", err_label(err.category()), err.message());
                    if err.context() == UiErrorContext::BackendStartup {
                        self.backend_ready = false;
                    }
                    self.status_banner = Some(StatusBanner {
                        severity: StatusBannerSeverity::Error,
                        message: self.status.clone(),
                    });
                }
            }
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let color = match banner.severity {
                StatusBannerSeverity::Info => egui::Color32::from_rgb(67, 181, 129),
                StatusBannerSeverity::Error => egui::Color32::from_rgb(175, 96, 96),
            };
            ui.group(|ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.colored_label(color, &banner.message);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.status_banner = None;
                        }
                    });
                });
            });
            ui.add_space(6.0);
        }
    }
}

impl eframe::App for UploaderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Upload a PDF File");
            });
            ui.add_space(8.0);
            self.show_status_banner(ui);

            ui.horizontal(|ui| {
                let pick = ui.add_enabled(self.backend_ready, egui::Button::new("Choose File"));
                if pick.clicked() {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::PickFile,
                        &mut self.status,
                    );
                }

                let can_upload =
                    self.backend_ready && self.selected_file.is_some() && !self.uploading;
                let upload = ui.add_enabled(can_upload, egui::Button::new("Upload File"));
                if upload.clicked() {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::UploadFile,
                        &mut self.status,
                    );
                }
            });

            if let Some((name, size)) = &self.selected_file {
                ui.add_space(6.0);
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.label("Selected File:");
                        ui.strong(name);
                        if let Some(size) = size {
                            ui.weak(human_readable_bytes(*size));
                        }
                    });
                });
            }

            if self.uploading {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Uploading...");
                });
            }

            ui.add_space(12.0);
            ui.separator();

            if !self.uploaded_files.is_empty() {
                ui.strong("Uploaded Files");
                ui.add_space(4.0);
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for (index, record) in self.uploaded_files.iter().enumerate() {
                        ui.group(|ui| {
                            ui.horizontal(|ui| {
                                ui.strong(format!("File {}", index + 1));
                                ui.label(&record.name);
                            });
                        });
                    }
                });
            }
        });

        // Backend events arrive on a channel, so keep polling at a gentle
        // cadence even without input.
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(32);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("PDF Uploader")
            .with_inner_size([480.0, 640.0])
            .with_min_inner_size([380.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "PDF Uploader",
        options,
        Box::new(|_cc| Ok(Box::new(UploaderApp::new(cmd_tx, ui_rx)))),
    )
}

#[cfg(test)]
mod tests {
    use super::human_readable_bytes;
    use crate::controller::events::{
        upload_failure_notice, UiError, UiErrorCategory, UiErrorContext,
    };
    use upload_core::UploadError;

    #[test]
    fn formats_file_sizes_readably() {
        assert_eq!(human_readable_bytes(0), "0 B");
        assert_eq!(human_readable_bytes(1023), "1023 B");
        assert_eq!(human_readable_bytes(1024), "1 KB");
        assert_eq!(human_readable_bytes(1536), "1.5 KB");
        assert_eq!(human_readable_bytes(2 * 1024 * 1024), "2 MB");
        assert_eq!(human_readable_bytes(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn classifies_connection_failures_as_transport_errors() {
        let err = UiError::from_message(
            UiErrorContext::PickFile,
            "upload transport failure: connection refused",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn classifies_server_rejections_by_status_keyword() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "server rejected upload with status 500",
        );
        assert_eq!(err.category(), UiErrorCategory::Rejection);
    }

    #[test]
    fn failure_notices_match_the_error_class() {
        assert_eq!(
            upload_failure_notice(&UploadError::NoFileSelected),
            "No file selected. Please choose a file first."
        );
        assert_eq!(
            upload_failure_notice(&UploadError::Rejected { status: 500 }),
            "Upload failed: server responded with 500"
        );
        assert_eq!(
            upload_failure_notice(&UploadError::Transport("boom".to_string())),
            "Something went wrong during upload."
        );
    }
}
