//! Backend worker: owns the tokio runtime and the upload controller, and
//! services UI commands serially so no two session operations overlap.

use crossbeam_channel::{Receiver, Sender};
use shared::domain::PlatformClass;
use upload_core::{load_settings, UploadController};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{upload_failure_notice, UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let platform = PlatformClass::detect();
            let settings = load_settings(platform);
            tracing::info!(
                platform = platform.label(),
                base_url = %settings.base_url,
                "backend worker ready"
            );

            let picker = file_access::select_picker(platform);
            let controller = UploadController::new(settings.base_url, picker);
            let _ = ui_tx.try_send(UiEvent::BackendReady);

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::PickFile => {
                        tracing::info!("backend: pick_file");
                        match controller.pick_file().await {
                            Ok(Some(file)) => {
                                let _ = ui_tx.try_send(UiEvent::FileSelected {
                                    name: file.name,
                                    size: file.size,
                                });
                            }
                            Ok(None) => {
                                let _ = ui_tx.try_send(UiEvent::PickCancelled);
                            }
                            Err(err) => {
                                tracing::error!("backend: pick_file failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::PickFile,
                                    err.to_string(),
                                )));
                            }
                        }
                    }
                    BackendCommand::UploadFile => {
                        tracing::info!("backend: upload_file");
                        let snapshot = controller.snapshot().await;
                        if let Some(name) = snapshot.selected_name {
                            if !snapshot.in_flight {
                                let _ = ui_tx.try_send(UiEvent::UploadStarted { name });
                            }
                        }

                        match controller.upload_file().await {
                            Ok(record) => {
                                let _ = ui_tx.try_send(UiEvent::UploadSucceeded { record });
                            }
                            Err(err) => {
                                tracing::error!("backend: upload_file failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::UploadFailed {
                                    message: upload_failure_notice(&err),
                                });
                            }
                        }
                    }
                }
            }
        });
    });
}
