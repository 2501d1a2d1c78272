use crate::app::{Action, App, Effect};
use crate::clipboard::ClipboardSink;
use crate::executor::{ExecError, ExecRequest};
use std::collections::VecDeque;
use std::time::Instant;
use tokio::sync::mpsc;

/// Performs the effects returned by [`App::dispatch`] and feeds their
/// outcomes back as actions.
pub struct Runtime<C: ClipboardSink> {
    exec_tx: mpsc::Sender<ExecRequest>,
    clipboard: C,
    open_url: fn(&str) -> std::io::Result<()>,
}

impl<C: ClipboardSink> Runtime<C> {
    pub fn new(exec_tx: mpsc::Sender<ExecRequest>, clipboard: C) -> Self {
        Runtime {
            exec_tx,
            clipboard,
            open_url: webbrowser::open,
        }
    }

    pub fn with_url_opener(mut self, open_url: fn(&str) -> std::io::Result<()>) -> Self {
        self.open_url = open_url;
        self
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Dispatches `action` and runs every effect it causes, transitively.
    pub fn dispatch(&mut self, app: &mut App, action: Action) {
        let mut pending: VecDeque<Effect> = app.dispatch(action).into();

        while let Some(effect) = pending.pop_front() {
            if let Some(follow_up) = self.perform(effect) {
                pending.extend(app.dispatch(follow_up));
            }
        }
    }

    fn perform(&mut self, effect: Effect) -> Option<Action> {
        match effect {
            Effect::Execute(request) => {
                let id = request.id.clone();
                match self.exec_tx.try_send(request) {
                    Ok(()) => None,
                    Err(e) => {
                        log::error!("could not queue execution of {}: {}", id, e);
                        Some(Action::Settle {
                            id,
                            outcome: Err(ExecError::Network("executor unavailable".to_string())),
                        })
                    }
                }
            }
            Effect::WriteClipboard(text) => {
                let ok = match self.clipboard.write_text(&text) {
                    Ok(()) => true,
                    Err(e) => {
                        log::warn!("copy failed: {}", e);
                        false
                    }
                };
                Some(Action::CopyFinished {
                    ok,
                    at: Instant::now(),
                })
            }
            Effect::OpenUrl(url) => match (self.open_url)(&url) {
                Ok(()) => Some(Action::Notify(format!("Opened {}", url))),
                Err(e) => {
                    log::warn!("failed to open {}: {}", url, e);
                    Some(Action::Notify(format!("Could not open {}: {}", url, e)))
                }
            },
        }
    }
}
