//! Slug derivation and allocation.
//!
//! A slug is the URL-safe identifier a listing is reachable under
//! (`/listings/slug/{slug}`). It is derived from the title by [`slugify`]
//! and made unique among stored listings by [`allocate`], which appends a
//! numeric suffix on collision.
//!
//! # Concurrency
//!
//! [`allocate`] only reads: it asks the repository whether a candidate is
//! taken and returns the first free one. Between that check and the caller's
//! insert/replace there is a window in which a concurrent writer can commit
//! the same slug. The unique index on `slug` is the source of truth: the
//! losing write fails with [`ListingError::DuplicateSlug`], and the caller
//! re-invokes [`allocate`], which now observes the committed slug and picks
//! the next suffix. `ListingService::create_listing` and `update_listing`
//! implement that retry loop.

use crate::error::ListingResult;
use crate::repository::ListingRepository;

/// Slug used when a title normalizes to nothing (whitespace- or symbol-only).
pub const FALLBACK_SLUG: &str = "untitled";

/// Derive the base slug candidate from a title.
///
/// Lower-cases, trims, drops every character that is not an ASCII letter,
/// digit, underscore, or hyphen (whitespace is kept as a separator), then
/// collapses each whitespace run into a single hyphen. Hyphens left at
/// either edge by removed characters are trimmed. Empty results fall back
/// to [`FALLBACK_SLUG`].
///
/// Already-normalized input passes through unchanged, so re-slugifying a
/// slug is a no-op.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();

    let mut cleaned = String::with_capacity(lowered.len());
    for c in lowered.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c.is_whitespace() {
            cleaned.push(c);
        }
    }

    let mut slug = String::with_capacity(cleaned.len());
    let mut in_whitespace = false;
    for c in cleaned.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
        } else {
            slug.push(c);
            in_whitespace = false;
        }
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Allocate a slug for `title` that no stored listing currently holds.
///
/// Starts from the base candidate and probes `base`, `base-1`, `base-2`, …
/// until the repository reports a free one. The suffix strictly increases
/// and every candidate is distinct, so the loop terminates as soon as it
/// passes the highest suffix in use; no retry cap is needed.
///
/// Read-only: the commit belongs to the caller, which must treat a
/// duplicate-slug write error as a cue to call this again (see module docs).
/// Repository failures propagate unmodified.
pub async fn allocate<R>(repository: &R, title: &str) -> ListingResult<String>
where
    R: ListingRepository + ?Sized,
{
    let base = slugify(title);

    let mut candidate = base.clone();
    let mut suffix: u32 = 1;

    while repository.find_by_slug(&candidate).await?.is_some() {
        candidate = format!("{}-{}", base, suffix);
        suffix += 1;
    }

    Ok(candidate)
}
