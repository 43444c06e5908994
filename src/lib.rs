//! Root crate facade for the snipbin server and core.

pub use snipbin_core::{
    factory, AppError, Mode, SnippetFields, SnippetView, StoreError, StoreErrorKind,
    ValidationError,
};
pub use snipbin_server::{
    config, create_app, db, error, handlers, models, reaper, serve_router, AppState, Config,
    Database, Snippet, SnippetFactory, SnippetStore,
};
