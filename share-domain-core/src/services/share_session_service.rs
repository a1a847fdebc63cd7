//! Remote share session
//!
//! Wraps the host's `notes.shareNote` / `notes.list` endpoints. Share state is
//! owned by the host: every operation returns a [`ShareSession`] that the
//! caller merges back into its note, nothing is written in place.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{
    CreatedShare, NoteListFilter, NoteSnapshot, Outcome, ShareLink, ShareNoteRequest,
    ShareRequest, ShareSession,
};
use crate::utils::url::build_share_url;

/// Default bound on every host call
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Share session settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Host origin used for canonical share URLs, e.g. `https://blinko.example`
    pub origin: String,
    pub request_timeout: Duration,
    /// Filter used when re-fetching a note's share state
    pub refresh_filter_size: u32,
}

impl SessionOptions {
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            refresh_filter_size: NoteListFilter::default().size,
        }
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Share / cancel calls in flight; released on drop
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Remote share session service
pub struct ShareSessionService {
    ctx: Arc<ServiceContext>,
    options: SessionOptions,
    busy: AtomicBool,
}

impl ShareSessionService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>, options: SessionOptions) -> Self {
        Self {
            ctx,
            options,
            busy: AtomicBool::new(false),
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Whether a share or cancel request is currently in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Creates (or refreshes) the share for `note`.
    ///
    /// Host failures never propagate: the result is then the deterministic
    /// fallback `<origin>/share/<note.id>` tagged as [`Outcome::Fallback`], and
    /// the returned session is the note's current one.
    ///
    /// Returns `None` without calling the host when another share or cancel
    /// request is still in flight.
    pub async fn create_share(
        &self,
        note: &NoteSnapshot,
        request: &ShareRequest,
    ) -> Option<Outcome<CreatedShare>> {
        let Some(_guard) = self.try_begin() else {
            log::warn!("Share request for note {} ignored: another request is in flight", note.id);
            return None;
        };

        log::info!("Creating share for note {}", note.id);
        let api_request = ShareNoteRequest::create(&note.id, &request.password, request.expire_at);

        let response = match self.call(self.ctx.note_api().share_note(&api_request)).await {
            Ok(Some(response)) => response,
            Ok(None) => return Some(self.fallback(note, "host returned no share data")),
            Err(e) => {
                log::warn!("Share creation failed for note {}: {e}", note.id);
                return Some(self.fallback(note, e.to_string()));
            }
        };

        let Some(token) = response.share_encrypted_url.filter(|t| !t.is_empty()) else {
            return Some(self.fallback(note, "host response has no share token"));
        };
        let password = response.share_password.filter(|p| !p.is_empty());

        let url = build_share_url(&self.options.origin, &token, password.as_deref());
        log::debug!("Share created for note {}: token {token}", note.id);

        let session = ShareSession::shared(token.clone(), password.clone().unwrap_or_default());
        Some(Outcome::success(CreatedShare {
            link: ShareLink {
                url,
                token,
                password,
            },
            session,
        }))
    }

    /// Cancels the share for `note`.
    ///
    /// Returns the cleared session on confirmed success, `None` on any failure
    /// (including a request already in flight).
    pub async fn cancel_share(&self, note: &NoteSnapshot) -> Option<ShareSession> {
        let Some(_guard) = self.try_begin() else {
            log::warn!("Cancel for note {} ignored: another request is in flight", note.id);
            return None;
        };

        log::info!("Canceling share for note {}", note.id);
        match self
            .call(self.ctx.note_api().share_note(&ShareNoteRequest::cancel(&note.id)))
            .await
        {
            Ok(Some(_)) => Some(ShareSession::cleared()),
            Ok(None) => {
                log::warn!("Cancel share for note {} not confirmed by host", note.id);
                None
            }
            Err(e) => {
                log::warn!("Failed to cancel share for note {}: {e}", note.id);
                None
            }
        }
    }

    /// Re-fetches the note from the host, preferring it over `note`.
    ///
    /// Falls back to the caller's snapshot when the listing fails or does not
    /// contain the note.
    pub async fn refresh_note(&self, note: &NoteSnapshot) -> NoteSnapshot {
        let filter = NoteListFilter {
            size: self.options.refresh_filter_size,
            ..NoteListFilter::default()
        };

        match self.call(self.ctx.note_api().list_notes(&filter)).await {
            Ok(notes) => {
                if let Some(latest) = notes.into_iter().find(|n| n.id == note.id) {
                    log::debug!(
                        "Latest share state for note {}: shared={}, token={:?}",
                        latest.id,
                        latest.is_share,
                        latest.share_encrypted_url
                    );
                    return latest;
                }
                log::debug!("Note {} not in listing, using provided snapshot", note.id);
            }
            Err(e) => {
                log::info!("Failed to fetch latest note {}, using provided snapshot: {e}", note.id);
            }
        }
        note.clone()
    }

    /// Canonical link of an existing share, if the session holds one
    pub fn existing_share(&self, session: &ShareSession) -> Option<ShareLink> {
        let token = session.active_token()?;
        let password = Some(session.share_password.clone()).filter(|p| !p.is_empty());
        Some(ShareLink {
            url: build_share_url(&self.options.origin, token, password.as_deref()),
            token: token.to_string(),
            password,
        })
    }

    /// Deterministic link used when the host could not create a share
    pub fn fallback_link(&self, note: &NoteSnapshot) -> ShareLink {
        ShareLink {
            url: build_share_url(&self.options.origin, &note.id, None),
            token: note.id.clone(),
            password: None,
        }
    }

    fn fallback(&self, note: &NoteSnapshot, reason: impl Into<String>) -> Outcome<CreatedShare> {
        let reason = reason.into();
        log::warn!("Using fallback share URL for note {}: {reason}", note.id);
        Outcome::fallback(
            CreatedShare {
                link: self.fallback_link(note),
                session: note.session(),
            },
            reason,
        )
    }

    fn try_begin(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(&self.busy))
    }

    /// Bounds a host call by the configured timeout; expiry is a network error.
    async fn call<T>(&self, fut: impl Future<Output = CoreResult<T>>) -> CoreResult<T> {
        let timeout = self.options.request_timeout;
        tokio::time::timeout(timeout, fut).await.map_err(|_| {
            CoreError::NetworkError(format!(
                "host request timed out after {}s",
                timeout.as_secs_f32()
            ))
        })?
    }
}
