//! Payload-shaping helpers shared by the contact actions
//!
//! Deterministic data transforms between the flat field surface the
//! host platform exposes and the nested shapes Graph expects, plus the
//! reverse cleanup that makes Graph entries mappable field-by-field.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Flat address group as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "postalCode", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(rename = "countryOrRegion", skip_serializing_if = "Option::is_none")]
    pub country_or_region: Option<String>,
}

impl AddressInput {
    /// True when at least one field of the group was filled in.
    #[must_use]
    pub fn any_field_set(&self) -> bool {
        self.street.is_some()
            || self.city.is_some()
            || self.state.is_some()
            || self.postal_code.is_some()
            || self.country_or_region.is_some()
    }
}

/// Build the `emailAddresses` array Graph expects from a flat list of
/// email strings. Every entry carries the contact's display name
/// ("First Last"). An empty input list yields an empty array, which
/// Graph accepts.
#[must_use]
pub fn format_contact_emails(
    given_name: Option<&str>,
    surname: Option<&str>,
    email_addresses: &[String],
) -> Vec<Value> {
    let name = match (given_name, surname) {
        (Some(given), Some(last)) => format!("{given} {last}"),
        (Some(given), None) => given.to_string(),
        (None, Some(last)) => last.to_string(),
        (None, None) => String::new(),
    };

    email_addresses
        .iter()
        .map(|address| json!({ "name": name, "address": address }))
        .collect()
}

/// Convert an optional address group into the Graph address object.
/// `None` (or a group with nothing filled in) becomes an empty object,
/// which Graph accepts.
#[must_use]
pub fn format_contact_address(address: Option<&AddressInput>) -> Value {
    match address {
        Some(address) => serde_json::to_value(address).unwrap_or_else(|_| json!({})),
        None => json!({}),
    }
}

/// Clean one Graph contact entry for the host platform.
///
/// Strips the `@odata.*` bookkeeping tags and unwraps the phone/email
/// arrays into `businessPhones_1`-style scalar keys so users can map
/// each value individually.
#[must_use]
pub fn clean_contact_entries(mut entry: Value) -> Value {
    let Some(map) = entry.as_object_mut() else {
        return entry;
    };

    map.remove("@odata.etag");
    map.remove("@odata.context");

    let mut unwrapped = Map::new();

    for key in ["businessPhones", "homePhones"] {
        if let Some(numbers) = map.get(key).and_then(Value::as_array) {
            for (index, number) in numbers.iter().enumerate() {
                unwrapped.insert(format!("{}_{}", key, index + 1), number.clone());
            }
        }
    }

    if let Some(emails) = map.get("emailAddresses").and_then(Value::as_array) {
        for (index, email) in emails.iter().enumerate() {
            if let Some(address) = email.get("address") {
                unwrapped.insert(format!("emailAddresses_{}", index + 1), address.clone());
            }
        }
    }

    map.extend(unwrapped);
    entry
}

/// Contact collection URL: folder-scoped when the user picked a
/// folder, default Contacts folder otherwise.
#[must_use]
pub fn contact_request_url(api_base: &str, contact_folder_id: Option<&str>) -> String {
    match contact_folder_id {
        Some(folder_id) => format!("{api_base}/me/contactFolders/{folder_id}/contacts"),
        None => format!("{api_base}/me/contacts"),
    }
}

/// Single-contact URL used by the update action.
#[must_use]
pub fn update_contact_request_url(
    api_base: &str,
    contact_folder_id: Option<&str>,
    contact_id: &str,
) -> String {
    format!("{}/{contact_id}", contact_request_url(api_base, contact_folder_id))
}
