//! Trigger, search, and create actions

pub mod calendar;
pub mod contacts;
pub mod mail;
