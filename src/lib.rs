pub mod application;
pub mod client;
pub mod connector;
pub mod domain;

pub use application::{
    AnswerQueryUseCase, AnswerSource, CompletionClient, StateStore, QUERY_REQUIRED,
};

pub use client::{
    Clipboard, HistoryStore, Notice, NoticeKind, OsClipboard, Phase, Reveal, SearchController,
    SubmitTicket, HISTORY_KEY, REVEAL_TICK_MS, THEME_KEY,
};

pub use connector::{
    router, serve, FileStateStore, MemoryStateStore, MockCompletion, OpenAiClient, RelayClient,
    RelayConfig, RelayState, DEFAULT_PORT,
};

pub use domain::{DomainError, HistoryEntry, HistoryLog, Theme, HISTORY_CAPACITY};
