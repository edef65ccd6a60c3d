//! Action handlers for the Exchange connector
//!
//! Triggers, searches, and creates against contacts, calendars, and
//! mail. Each handler builds one request, runs it through the shared
//! middleware pipeline in `mailbridge-common`, and shapes the payload
//! for the host platform. No retries, no pagination beyond a single
//! page; that policy lives in the host.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod actions;
pub mod helpers;

pub use actions::calendar::{create_calendar_event, list_calendars, EventInput};
pub use actions::contacts::{
    create_contact, find_contact, list_contact_folders, new_contacts, update_contact,
    ContactInput, ContactQuery,
};
pub use actions::mail::{create_draft_email, send_email, AttachmentInput, BodyFormat, EmailInput};
