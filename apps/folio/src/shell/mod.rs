//! Line-oriented editor session.
//!
//! The event loop owns the `ProfileEditor` and is its only mutator. Backend
//! calls and photo reads run on spawned tasks that hold nothing but a gateway
//! handle and an owned payload, and report back over a channel. Results that
//! arrive after the session ends are dropped with the channel.

pub mod command;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use bytes::Bytes;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::editor::{FileSink, ProfileEditor, RequestState};
use crate::errors::Operation;
use crate::gateway::{GatewayError, RECENT_LIMIT};
use crate::models::portfolio::PortfolioSummary;
use crate::photo::{read_as_data_url, PhotoTicket};
use crate::preview::render_preview;
use crate::state::AppState;

use command::{Command, EntryField, Section, HELP};

/// Completion of a background task.
enum Event {
    Saved(Result<String, GatewayError>),
    Downloaded {
        filename: String,
        result: Result<Bytes, GatewayError>,
    },
    PhotoRead {
        ticket: PhotoTicket,
        result: Result<String, std::io::Error>,
    },
    Recent(Result<Vec<PortfolioSummary>, GatewayError>),
}

enum Flow {
    Continue,
    Wait,
    Quit,
}

struct Session<W> {
    state: AppState,
    editor: ProfileEditor,
    sink: FileSink,
    events: mpsc::UnboundedSender<Event>,
    pending: usize,
    out: W,
}

/// Runs the editor until `quit` or end of input. At end of input, requests
/// still running are awaited so piped scripts see their results; `quit`
/// abandons them.
pub async fn run<R, W>(state: AppState, input: R, out: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let sink = FileSink::new(state.config.download_dir.clone());
    let mut session = Session {
        state,
        editor: ProfileEditor::new(),
        sink,
        events: tx,
        pending: 0,
        out,
    };

    writeln!(session.out, "Backend: {}", session.state.config.backend_url)?;
    writeln!(session.out, "Type 'help' for commands.")?;
    session.spawn_recent();

    let mut lines = input.lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match session.handle_line(&line)? {
                    Flow::Continue => {}
                    Flow::Wait => session.drain(&mut rx).await?,
                    Flow::Quit => {
                        if session.pending > 0 {
                            info!(pending = session.pending, "Leaving with requests still running");
                        }
                        return Ok(());
                    }
                }
            }
            Some(event) = rx.recv() => session.apply(event)?,
        }
    }

    session.drain(&mut rx).await
}

impl<W: Write> Session<W> {
    fn spawn_recent(&mut self) {
        self.editor.begin_recent();
        self.pending += 1;
        let gateway = self.state.gateway.clone();
        let tx = self.events.clone();
        tokio::spawn(async move {
            let result = gateway.list_recent(RECENT_LIMIT).await;
            let _ = tx.send(Event::Recent(result));
        });
    }

    async fn drain(&mut self, rx: &mut mpsc::UnboundedReceiver<Event>) -> Result<()> {
        while self.pending > 0 {
            match rx.recv().await {
                Some(event) => self.apply(event)?,
                None => break,
            }
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(self.out, "{e}")?;
                return Ok(Flow::Continue);
            }
        };
        debug!(?command, "Command");

        match command {
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Show => write!(self.out, "{}", render_preview(self.editor.form()))?,
            Command::Payload => {
                let payload = self.editor.payload();
                writeln!(self.out, "{}", serde_json::to_string_pretty(&*payload)?)?;
            }
            Command::Status => self.print_status()?,
            Command::Recent => self.print_recent()?,
            Command::Save => self.start_save()?,
            Command::Download => self.start_download()?,
            Command::Wait => return Ok(Flow::Wait),
            Command::Quit => return Ok(Flow::Quit),
            Command::Set(field, value) => self.editor.set_field(field, value),
            Command::Social(channel, value) => self.editor.set_social(channel, value),
            Command::Add(section) => {
                let count = match section {
                    Section::Education => self.editor.add_education(),
                    Section::Experience => self.editor.add_experience(),
                    Section::Projects => self.editor.add_project(),
                };
                writeln!(self.out, "Added entry {count}")?;
            }
            Command::Edit { index, field, value } => {
                let result = match field {
                    EntryField::Education(f) => self.editor.update_education(index, f, value),
                    EntryField::Experience(f) => self.editor.update_experience(index, f, value),
                    EntryField::Project(f) => self.editor.update_project(index, f, value),
                };
                if let Err(e) = result {
                    writeln!(self.out, "{e}")?;
                }
            }
            Command::Remove(section, index) => {
                let result = match section {
                    Section::Education => self.editor.remove_education(index),
                    Section::Experience => self.editor.remove_experience(index),
                    Section::Projects => self.editor.remove_project(index),
                };
                match result {
                    Ok(true) => writeln!(self.out, "Removed entry {}", index + 1)?,
                    Ok(false) => writeln!(self.out, "At least one entry must remain")?,
                    Err(e) => writeln!(self.out, "{e}")?,
                }
            }
            Command::Photo(path) => self.start_photo(path),
            Command::ClearPhoto => self.editor.clear_photo(),
        }
        Ok(Flow::Continue)
    }

    fn start_save(&mut self) -> Result<()> {
        let payload = match self.editor.begin_save() {
            Ok(payload) => payload,
            Err(e) => {
                writeln!(self.out, "{}", e.user_message(Operation::Save))?;
                return Ok(());
            }
        };
        writeln!(self.out, "Saving...")?;
        self.pending += 1;
        let gateway = self.state.gateway.clone();
        let tx = self.events.clone();
        tokio::spawn(async move {
            let result = gateway.save_portfolio(&payload).await;
            let _ = tx.send(Event::Saved(result));
        });
        Ok(())
    }

    fn start_download(&mut self) -> Result<()> {
        let job = match self.editor.begin_download() {
            Ok(job) => job,
            Err(e) => {
                writeln!(self.out, "{}", e.user_message(Operation::Download))?;
                return Ok(());
            }
        };
        writeln!(self.out, "Preparing...")?;
        self.pending += 1;
        let gateway = self.state.gateway.clone();
        let tx = self.events.clone();
        tokio::spawn(async move {
            let result = gateway.download_document(&job.payload).await;
            let _ = tx.send(Event::Downloaded {
                filename: job.filename,
                result,
            });
        });
        Ok(())
    }

    fn start_photo(&mut self, path: PathBuf) {
        let ticket = self.editor.select_photo();
        self.pending += 1;
        let tx = self.events.clone();
        tokio::spawn(async move {
            let result = read_as_data_url(&path).await;
            let _ = tx.send(Event::PhotoRead { ticket, result });
        });
    }

    fn apply(&mut self, event: Event) -> Result<()> {
        self.pending = self.pending.saturating_sub(1);
        match event {
            Event::Saved(result) => match self.editor.finish_save(result) {
                Ok(_) => writeln!(self.out, "Saved ✓")?,
                Err(message) => writeln!(self.out, "{message}")?,
            },
            Event::Downloaded { filename, result } => {
                match self.editor.finish_download(&mut self.sink, &filename, result) {
                    Ok(path) => writeln!(self.out, "Downloaded {}", path.display())?,
                    Err(message) => writeln!(self.out, "{message}")?,
                }
            }
            Event::PhotoRead { ticket, result } => {
                if self.editor.finish_photo(ticket, result) {
                    writeln!(self.out, "Photo updated")?;
                }
            }
            Event::Recent(result) => {
                self.editor.finish_recent(result);
                if !self.editor.recent().cards().is_empty() {
                    self.print_recent()?;
                }
            }
        }
        Ok(())
    }

    fn print_status(&mut self) -> Result<()> {
        let save = match self.editor.save_state() {
            RequestState::Idle => "idle".to_string(),
            RequestState::InFlight => "saving...".to_string(),
            RequestState::Succeeded(id) => format!("saved ({id})"),
            RequestState::Failed(message) => message.clone(),
        };
        let download = match self.editor.download_state() {
            RequestState::Idle => "idle".to_string(),
            RequestState::InFlight => "preparing...".to_string(),
            RequestState::Succeeded(path) => format!("written to {}", path.display()),
            RequestState::Failed(message) => message.clone(),
        };
        writeln!(self.out, "Save: {save}")?;
        if let Some(id) = self.editor.saved_id() {
            writeln!(self.out, "Last saved id: {id}")?;
        }
        writeln!(self.out, "Download: {download}")?;
        if self.editor.photo_pending() {
            writeln!(self.out, "Photo: reading...")?;
        }
        Ok(())
    }

    fn print_recent(&mut self) -> Result<()> {
        writeln!(self.out, "Recently saved portfolios")?;
        if self.editor.recent().is_loading() {
            writeln!(self.out, "  Loading...")?;
            return Ok(());
        }
        for card in self.editor.recent().cards() {
            writeln!(self.out, "  {}", card.name)?;
            if !card.title.is_empty() {
                writeln!(self.out, "    {}", card.title)?;
            }
            if let Some(skills) = &card.skills {
                writeln!(self.out, "    {skills}")?;
            }
        }
        Ok(())
    }
}
