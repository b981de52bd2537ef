use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use crate::editor::download::{cv_filename, materialize, DocumentSink};
use crate::editor::recent::RecentList;
use crate::editor::request::RequestState;
use crate::errors::{EditorError, Operation};
use crate::form::{Entry, EntryList, FormError, PayloadMemo};
use crate::gateway::GatewayError;
use crate::models::payload::Payload;
use crate::models::portfolio::PortfolioSummary;
use crate::models::profile::{
    EducationField, ExperienceField, FormState, ProfileField, ProjectField, SocialChannel,
};
use crate::photo::{PhotoSlot, PhotoTicket};

/// A document request that has been started and is waiting for the backend.
#[derive(Debug, Clone)]
pub struct DownloadJob {
    pub payload: Arc<Payload>,
    /// Derived from the name at the moment the download was requested.
    pub filename: String,
}

/// Owns all profile form state and the progress of each backend operation.
///
/// Network work is split into `begin_*` and `finish_*` halves so the caller
/// can run the request elsewhere and keep editing in the meantime.
#[derive(Debug, Default)]
pub struct ProfileEditor {
    form: FormState,
    memo: PayloadMemo,
    photo: PhotoSlot,
    save: RequestState<String>,
    saved_id: Option<String>,
    download: RequestState<PathBuf>,
    recent: RecentList,
}

impl ProfileEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Submission payload for the current form, reassembled only when the
    /// form changed since the last call.
    pub fn payload(&mut self) -> Arc<Payload> {
        self.memo.get(&self.form)
    }

    #[cfg(test)]
    pub fn payload_recomputations(&self) -> u64 {
        self.memo.recomputations()
    }

    // ── Field editing ──────────────────────────────────────────────────────

    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) {
        self.form = self.form.with_field(field, value);
    }

    pub fn set_social(&mut self, channel: SocialChannel, value: impl Into<String>) {
        self.form = self.form.with_social(channel, value);
    }

    pub fn add_education(&mut self) -> usize {
        self.form.education = self.form.education.append();
        self.form.education.len()
    }

    pub fn update_education(
        &mut self,
        index: usize,
        field: EducationField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        self.form.education = self.form.education.update(index, field, value)?;
        Ok(())
    }

    pub fn remove_education(&mut self, index: usize) -> Result<bool, FormError> {
        remove_from(&mut self.form.education, index)
    }

    pub fn add_experience(&mut self) -> usize {
        self.form.experience = self.form.experience.append();
        self.form.experience.len()
    }

    pub fn update_experience(
        &mut self,
        index: usize,
        field: ExperienceField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        self.form.experience = self.form.experience.update(index, field, value)?;
        Ok(())
    }

    pub fn remove_experience(&mut self, index: usize) -> Result<bool, FormError> {
        remove_from(&mut self.form.experience, index)
    }

    pub fn add_project(&mut self) -> usize {
        self.form.projects = self.form.projects.append();
        self.form.projects.len()
    }

    pub fn update_project(
        &mut self,
        index: usize,
        field: ProjectField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        self.form.projects = self.form.projects.update(index, field, value)?;
        Ok(())
    }

    pub fn remove_project(&mut self, index: usize) -> Result<bool, FormError> {
        remove_from(&mut self.form.projects, index)
    }

    // ── Photo ──────────────────────────────────────────────────────────────

    /// Starts a new photo selection. Any read still running for an earlier
    /// selection will be ignored when it completes.
    pub fn select_photo(&mut self) -> PhotoTicket {
        self.photo.select()
    }

    /// Applies a finished photo read. Returns whether the photo changed.
    pub fn finish_photo(&mut self, ticket: PhotoTicket, result: Result<String, std::io::Error>) -> bool {
        match self.photo.accept(ticket, result) {
            Some(data_url) => {
                self.form = self.form.with_photo(data_url);
                true
            }
            None => false,
        }
    }

    pub fn clear_photo(&mut self) {
        self.form = self.form.with_photo(String::new());
    }

    pub fn photo_pending(&self) -> bool {
        self.photo.is_pending()
    }

    // ── Save ───────────────────────────────────────────────────────────────

    pub fn save_state(&self) -> &RequestState<String> {
        &self.save
    }

    /// Id of the last successful save, if any.
    pub fn saved_id(&self) -> Option<&str> {
        self.saved_id.as_deref()
    }

    pub fn begin_save(&mut self) -> Result<Arc<Payload>, EditorError> {
        if self.save.is_in_flight() {
            return Err(EditorError::AlreadyInFlight(Operation::Save));
        }
        self.save = RequestState::InFlight;
        Ok(self.payload())
    }

    /// Records the outcome of a save. On failure the returned message is
    /// meant to be shown to the user.
    pub fn finish_save(&mut self, result: Result<String, GatewayError>) -> Result<String, String> {
        match result {
            Ok(id) => {
                info!(%id, "Save confirmed");
                self.saved_id = Some(id.clone());
                self.save = RequestState::Succeeded(id.clone());
                Ok(id)
            }
            Err(e) => {
                let message = EditorError::from(e).user_message(Operation::Save);
                warn!("{message}");
                self.save = RequestState::Failed(message.clone());
                Err(message)
            }
        }
    }

    // ── Download ───────────────────────────────────────────────────────────

    pub fn download_state(&self) -> &RequestState<PathBuf> {
        &self.download
    }

    pub fn begin_download(&mut self) -> Result<DownloadJob, EditorError> {
        if self.download.is_in_flight() {
            return Err(EditorError::AlreadyInFlight(Operation::Download));
        }
        self.download = RequestState::InFlight;
        Ok(DownloadJob {
            payload: self.payload(),
            filename: cv_filename(&self.form.name),
        })
    }

    /// Materializes a downloaded document through `sink`. Nothing is staged
    /// when the request itself failed.
    pub fn finish_download<S: DocumentSink>(
        &mut self,
        sink: &mut S,
        filename: &str,
        result: Result<Bytes, GatewayError>,
    ) -> Result<PathBuf, String> {
        let outcome = result
            .map_err(EditorError::from)
            .and_then(|document| materialize(sink, &document, filename).map_err(EditorError::from));

        match outcome {
            Ok(path) => {
                self.download = RequestState::Succeeded(path.clone());
                Ok(path)
            }
            Err(e) => {
                let message = e.user_message(Operation::Download);
                warn!("{message}");
                self.download = RequestState::Failed(message.clone());
                Err(message)
            }
        }
    }

    // ── Recent list ────────────────────────────────────────────────────────

    pub fn recent(&self) -> &RecentList {
        &self.recent
    }

    pub fn begin_recent(&mut self) {
        self.recent.begin();
    }

    pub fn finish_recent(
        &mut self,
        result: Result<Vec<PortfolioSummary>, GatewayError>,
    ) {
        self.recent.finish(result);
    }
}

/// Returns `Ok(false)` when the list kept its only entry.
fn remove_from<T: Entry>(list: &mut EntryList<T>, index: usize) -> Result<bool, FormError> {
    let before = list.len();
    *list = list.remove(index)?;
    Ok(list.len() < before)
}
