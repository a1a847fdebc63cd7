//! 类型定义模块

mod config;
mod domain;
mod note;
mod notice;
mod outcome;
mod share;

pub use config::{
    PluginConfig, DEFAULT_DOMAIN_ID_KEY, DOMAINS_KEY, LEGACY_CUSTOM_DOMAIN_KEY, PLUGIN_NAME,
};
pub use domain::Domain;
pub use note::{NoteListFilter, NoteSnapshot, ShareNoteRequest, ShareNoteResponse};
pub use notice::{Notice, NoticeLevel};
pub use outcome::Outcome;
pub use share::{
    CreatedShare, ShareLink, ShareOption, ShareRequest, ShareSession, ORIGINAL_OPTION_ID,
    ORIGINAL_OPTION_NAME,
};
