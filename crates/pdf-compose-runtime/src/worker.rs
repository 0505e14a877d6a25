use crate::{ConvertCommand, ConvertUpdate};
use pdf_compose::{
    ComposeOptions, calculate_statistics, convert_images_with_progress, list_pdfs, probe_files,
};
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Start a worker on the current tokio runtime.
///
/// Returns the command sender and the update receiver. The worker stops once
/// every command sender is dropped.
pub fn spawn_worker() -> (
    mpsc::UnboundedSender<ConvertCommand>,
    mpsc::UnboundedReceiver<ConvertUpdate>,
) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    tokio::spawn(worker_task(command_rx, update_tx));
    (command_tx, update_rx)
}

/// Async worker task that processes commands one at a time and sends updates
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<ConvertCommand>,
    update_tx: mpsc::UnboundedSender<ConvertUpdate>,
) {
    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &update_tx).await;
    }
    log::debug!("Command channel closed, worker exiting");
}

async fn process_command(cmd: ConvertCommand, update_tx: &mpsc::UnboundedSender<ConvertUpdate>) {
    match cmd {
        ConvertCommand::Convert {
            images,
            options,
            output,
        } => handle_convert(images, options, output, update_tx).await,
        ConvertCommand::Stats { images, options } => {
            handle_stats(images, options, update_tx).await
        }
        ConvertCommand::ListOutputs { dir } => handle_list(dir, update_tx).await,
    }
}

async fn handle_convert(
    images: Vec<PathBuf>,
    options: ComposeOptions,
    output: PathBuf,
    update_tx: &mpsc::UnboundedSender<ConvertUpdate>,
) {
    let progress_tx = update_tx.clone();
    let progress = move |current, total| {
        let _ = progress_tx.send(ConvertUpdate::Progress { current, total });
    };

    match convert_images_with_progress(&images, &options, &output, progress).await {
        Ok(report) => {
            let _ = update_tx.send(ConvertUpdate::Converted { report });
        }
        Err(e) => {
            log::error!("Conversion failed: {}", e);
            let _ = update_tx.send(ConvertUpdate::Error {
                message: format!("Failed to create PDF: {e}"),
            });
        }
    }
}

async fn handle_stats(
    images: Vec<PathBuf>,
    options: ComposeOptions,
    update_tx: &mpsc::UnboundedSender<ConvertUpdate>,
) {
    let result = match probe_files(&images).await {
        Ok((specs, skipped)) => {
            calculate_statistics(&specs, &options).map(|stats| (stats, skipped))
        }
        Err(e) => Err(e),
    };

    let update = match result {
        Ok((stats, skipped)) => ConvertUpdate::Stats { stats, skipped },
        Err(e) => ConvertUpdate::Error {
            message: format!("Failed to calculate statistics: {e}"),
        },
    };
    let _ = update_tx.send(update);
}

async fn handle_list(dir: PathBuf, update_tx: &mpsc::UnboundedSender<ConvertUpdate>) {
    let update = match list_pdfs(&dir).await {
        Ok(entries) => ConvertUpdate::Outputs { entries },
        Err(e) => ConvertUpdate::Error {
            message: format!("Failed to list {}: {e}", dir.display()),
        },
    };
    let _ = update_tx.send(update);
}
