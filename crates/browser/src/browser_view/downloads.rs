use crate::downloads::{self, DownloadId, DownloadRequest};
use crate::engine::HostServices;

use super::{BrowserView, DownloadRow};

impl BrowserView {
    /// Asks the user about a transfer the engine wants to start. Declining
    /// either dialog cancels it.
    pub(super) fn handle_download_request(
        &mut self,
        mut request: DownloadRequest,
        host: &mut dyn HostServices,
    ) {
        let file_name = request.file_name();
        if !host.confirm(
            "Download File",
            &format!("Do you want to download {file_name}?"),
        ) {
            log::info!("[browser] download of {} declined", request.url);
            request.handle.cancel();
            return;
        }

        let directory =
            downloads::default_download_directory(self.shared.settings.download_dir.as_deref());
        let suggested = downloads::unique_download_path(&directory, &file_name);
        let Some(destination) = host.choose_download_path(&suggested) else {
            log::info!("[browser] no destination chosen for {}", request.url);
            request.handle.cancel();
            return;
        };

        self.shared.downloads.start(request, destination);
        self.download_center_visible = true;
    }

    pub(super) fn cancel_download(&mut self, id: DownloadId) -> bool {
        let cancelled = self.shared.downloads.cancel(id);
        if !cancelled {
            log::debug!("[browser] download {id} is not cancellable");
        }
        cancelled
    }

    pub(super) fn toggle_download_center(&mut self) -> bool {
        self.download_center_visible = !self.download_center_visible;
        true
    }

    pub fn download_center_visible(&self) -> bool {
        self.download_center_visible
    }

    /// Rows of the downloads popover, oldest first.
    pub fn download_rows(&self) -> Vec<DownloadRow> {
        self.shared
            .downloads
            .records()
            .map(|(id, record)| DownloadRow {
                id,
                file_name: record.file_name.clone(),
                status_line: record.status_line(),
                progress: record.progress,
                can_cancel: record.can_cancel(),
            })
            .collect()
    }
}
