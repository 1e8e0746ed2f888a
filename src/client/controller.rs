use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::StateStore;
use crate::client::{Clipboard, HistoryStore, Reveal, REVEAL_TICK_MS};
use crate::domain::{DomainError, Theme};

/// Storage key for the persisted theme preference.
pub const THEME_KEY: &str = "ai_theme";

const COPY_ACK_MS: u64 = 1200;
const SAVE_ACK_MS: u64 = 1100;
/// Loader animation advances one frame roughly every 300 ms worth of ticks.
const LOADER_FRAME_TICKS: u64 = 300 / REVEAL_TICK_MS;

const fn ack_ticks(ms: u64) -> u32 {
    (ms / REVEAL_TICK_MS) as u32
}

/// Submission lifecycle phase. Exactly one request is in flight at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Revealing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Transient acknowledgment ("Copied!", "Saved!").
    Info,
    /// Stays up until replaced — the alert analog.
    Warning,
}

#[derive(Debug, Clone)]
pub struct Notice {
    text: String,
    kind: NoticeKind,
    ticks_left: Option<u32>,
}

impl Notice {
    fn info(text: impl Into<String>, ms: u64) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Info,
            ticks_left: Some(ack_ticks(ms)),
        }
    }

    fn warning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Warning,
            ticks_left: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> NoticeKind {
        self.kind
    }
}

/// Handed out by [`SearchController::submit`]: the query to send and the
/// generation the eventual result must present to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub generation: u64,
    pub query: String,
}

/// Owns the query-submission lifecycle, the progressive reveal, the bounded
/// history, and the theme preference.
///
/// The controller is synchronous: the front end dispatches the relay call,
/// then feeds the outcome back through [`resolve`](Self::resolve) together
/// with the ticket's generation. A result whose generation is no longer the
/// latest is discarded, so a slow response can never overwrite a newer one.
/// Time advances only through [`tick`](Self::tick).
pub struct SearchController {
    store: Arc<dyn StateStore>,
    history: HistoryStore,
    theme: Theme,

    phase: Phase,
    input: String,
    cursor: usize,
    shown_answer: String,
    panel_visible: bool,
    reveal: Option<Reveal>,
    generation: u64,
    pending_query: Option<String>,

    notice: Option<Notice>,
    confirm_clear: bool,
    loader_frame: u8,
    tick_count: u64,
}

impl SearchController {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        let theme = match store.get(THEME_KEY) {
            Ok(Some(value)) => Theme::parse(&value),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("Could not read theme: {e}");
                Theme::default()
            }
        };
        let history = HistoryStore::load(store.clone());

        Self {
            store,
            history,
            theme,
            phase: Phase::Idle,
            input: String::new(),
            cursor: 0,
            shown_answer: String::new(),
            panel_visible: false,
            reveal: None,
            generation: 0,
            pending_query: None,
            notice: None,
            confirm_clear: false,
            loader_frame: 0,
            tick_count: 0,
        }
    }

    // ── Submission lifecycle ──

    /// Start a submission for the current input. Returns `None` when the
    /// trimmed input is empty; otherwise the controller enters `Loading`,
    /// hides the previous answer, drops any in-progress reveal, and hands
    /// back the ticket the front end uses to dispatch the relay call.
    pub fn submit(&mut self) -> Option<SubmitTicket> {
        let query = self.input.trim().to_string();
        if query.is_empty() {
            return None;
        }

        self.confirm_clear = false;
        self.generation += 1;
        self.phase = Phase::Loading;
        self.panel_visible = false;
        self.shown_answer.clear();
        self.reveal = None;
        self.loader_frame = 0;
        self.pending_query = Some(query.clone());

        Some(SubmitTicket {
            generation: self.generation,
            query,
        })
    }

    /// Feed back the outcome of the relay call issued for `generation`.
    /// Stale generations are ignored.
    pub fn resolve(&mut self, generation: u64, outcome: Result<String, DomainError>) {
        if generation != self.generation {
            debug!("Discarding stale response for generation {generation}");
            return;
        }

        match outcome {
            Ok(answer) => {
                self.phase = Phase::Revealing;
                self.panel_visible = true;
                self.shown_answer.clear();
                self.reveal = Some(Reveal::new(&answer));

                let query = self.pending_query.take().unwrap_or_default();
                if let Err(e) = self.history.record(query, answer) {
                    warn!("Could not persist history entry: {e}");
                }
            }
            Err(e) => {
                self.phase = Phase::Idle;
                self.panel_visible = true;
                self.reveal = None;
                self.pending_query = None;
                self.shown_answer = format!("Error: {}", e.detail());
            }
        }
    }

    /// Advance time by one tick: reveal one more character, age the loader
    /// animation, expire transient notices.
    pub fn tick(&mut self) {
        self.tick_count += 1;

        if self.phase == Phase::Loading {
            self.loader_frame = ((self.tick_count / LOADER_FRAME_TICKS) % 3) as u8;
        }

        if self.phase == Phase::Revealing {
            if let Some(reveal) = &mut self.reveal {
                reveal.advance();
                self.shown_answer = reveal.visible();
                if reveal.is_complete() {
                    self.phase = Phase::Idle;
                    self.reveal = None;
                }
            }
        }

        let notice_expired = match &mut self.notice {
            Some(Notice {
                ticks_left: Some(ticks),
                ..
            }) => {
                *ticks = ticks.saturating_sub(1);
                *ticks == 0
            }
            _ => false,
        };
        if notice_expired {
            self.notice = None;
        }
    }

    // ── History operations ──

    /// Display a stored entry: populate the input and reveal the stored
    /// answer. No network call is made; any in-flight response is
    /// invalidated by bumping the generation.
    pub fn select_history(&mut self, index: usize) {
        let Some(entry) = self.history.get(index).cloned() else {
            return;
        };

        self.generation += 1;
        self.pending_query = None;
        self.input = entry.query().to_string();
        self.cursor = self.input.chars().count();
        self.phase = Phase::Revealing;
        self.panel_visible = true;
        self.shown_answer.clear();
        self.reveal = Some(Reveal::new(entry.answer()));
    }

    /// Manually save the current query and displayed answer.
    pub fn save_current(&mut self) {
        let query = self.input.trim().to_string();
        if query.is_empty() || self.shown_answer.is_empty() {
            self.notice = Some(Notice::warning("No query/response to save"));
            return;
        }

        match self.history.record(query, self.shown_answer.clone()) {
            Ok(()) => self.notice = Some(Notice::info("Saved!", SAVE_ACK_MS)),
            Err(e) => self.notice = Some(Notice::warning(e.detail())),
        }
    }

    /// Ask for confirmation before wiping the history.
    pub fn request_clear_history(&mut self) {
        self.confirm_clear = true;
    }

    pub fn confirm_clear_history(&mut self, confirmed: bool) {
        if confirmed {
            if let Err(e) = self.history.clear() {
                warn!("Could not clear history: {e}");
            }
        }
        self.confirm_clear = false;
    }

    // ── Supplementary operations ──

    /// Copy the currently displayed answer text — possibly a partially
    /// revealed prefix — to the clipboard.
    pub fn copy_answer(&mut self, clipboard: &dyn Clipboard) {
        match clipboard.write(&self.shown_answer) {
            Ok(()) => self.notice = Some(Notice::info("Copied!", COPY_ACK_MS)),
            Err(e) => {
                self.notice = Some(Notice::warning(format!("Copy failed: {}", e.detail())))
            }
        }
    }

    /// Flip the theme and persist it immediately.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        if let Err(e) = self.store.set(THEME_KEY, self.theme.as_str()) {
            warn!("Could not persist theme: {e}");
        }
    }

    // ── Input editing ──

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.input.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.input.remove(at);
        self.cursor -= 1;
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let len = self.input.chars().count();
        if self.cursor < len {
            self.cursor += 1;
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    // ── Accessors ──

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn shown_answer(&self) -> &str {
        &self.shown_answer
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn loader_frame(&self) -> u8 {
        self.loader_frame
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn confirm_clear_pending(&self) -> bool {
        self.confirm_clear
    }
}
