//! Contact triggers, search, and create/update actions
//!
//! Listing uses OData query parameters (`$top`, `$filter`,
//! `$orderby`); every call returns at most one page of 50 entries and
//! the host platform handles deduplication from there.

use mailbridge_common::{GraphClient, GraphRequest};
use mailbridge_domain::{BridgeError, Credential, GraphCollection, Result};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::helpers::{
    clean_contact_entries, contact_request_url, format_contact_address, format_contact_emails,
    update_contact_request_url, AddressInput,
};

const PAGE_SIZE: &str = "50";

/// Fields for creating or updating a contact.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactInput {
    pub contact_folder_id: Option<String>,
    pub given_name: Option<String>,
    pub surname: Option<String>,
    /// Microsoft caps contacts at three email addresses.
    #[serde(default)]
    pub email_addresses: Vec<String>,
    /// Microsoft caps contacts at two business phone numbers.
    #[serde(default)]
    pub business_phones: Vec<String>,
    /// Microsoft caps contacts at two home phone numbers.
    #[serde(default)]
    pub home_phones: Vec<String>,
    pub mobile_phone: Option<String>,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub department: Option<String>,
    pub business_home_page: Option<String>,
    pub file_as: Option<String>,
    pub personal_notes: Option<String>,
    pub business_address: Option<AddressInput>,
    pub home_address: Option<AddressInput>,
    pub other_address: Option<AddressInput>,
}

/// Search criteria for [`find_contact`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactQuery {
    pub contact_folder_id: Option<String>,
    pub given_name: Option<String>,
    pub surname: Option<String>,
    pub email_address: Option<String>,
}

/// Trigger: newest contacts first, cleaned for deduplication.
pub async fn new_contacts(
    client: &GraphClient,
    api_base: &str,
    credential: &Credential,
    contact_folder_id: Option<&str>,
) -> Result<Vec<Value>> {
    let request = GraphRequest::get(contact_request_url(api_base, contact_folder_id))
        .query("$orderby", "createdDateTime desc")
        .query("$top", PAGE_SIZE)
        .error_prefix("Unable to retrieve the list of contacts");

    let response = client.execute(Some(&credential.access_token), request).await?;
    let collection: GraphCollection<Value> = response.json().map_err(|err| {
        BridgeError::Network(format!("Unable to retrieve the list of contacts: {err}"))
    })?;

    Ok(collection.value.into_iter().map(clean_contact_entries).collect())
}

/// Search: find contacts matching any combination of email, first
/// name, and last name. At least one criterion is required.
pub async fn find_contact(
    client: &GraphClient,
    api_base: &str,
    credential: &Credential,
    query: &ContactQuery,
) -> Result<Vec<Value>> {
    let mut filters = Vec::new();

    if let Some(email) = &query.email_address {
        filters.push(format!("emailAddresses/any(a:a/address eq '{email}')"));
    }
    if let Some(given_name) = &query.given_name {
        filters.push(format!("givenName eq '{given_name}'"));
    }
    if let Some(surname) = &query.surname {
        filters.push(format!("surname eq '{surname}'"));
    }

    if filters.is_empty() {
        return Err(BridgeError::recoverable(
            "Please enter a value in one of the search action input fields",
        ));
    }

    let request =
        GraphRequest::get(contact_request_url(api_base, query.contact_folder_id.as_deref()))
            .query("$top", PAGE_SIZE)
            .query("$filter", filters.join(" and "))
            .error_prefix("Unable to retrieve the list of contacts");

    let response = client.execute(Some(&credential.access_token), request).await?;
    let collection: GraphCollection<Value> = response.json().map_err(|err| {
        BridgeError::Network(format!("Unable to retrieve the list of contacts: {err}"))
    })?;

    Ok(collection.value.into_iter().map(clean_contact_entries).collect())
}

/// Create a contact in the chosen folder (default Contacts folder when
/// none was picked).
pub async fn create_contact(
    client: &GraphClient,
    api_base: &str,
    credential: &Credential,
    input: &ContactInput,
) -> Result<Value> {
    let request =
        GraphRequest::post(contact_request_url(api_base, input.contact_folder_id.as_deref()))
            .json(contact_body(input))
            .error_prefix("Unable to create a contact");

    let response = client.execute(Some(&credential.access_token), request).await?;
    let created: Value = response
        .json()
        .map_err(|err| BridgeError::Network(format!("Unable to create a contact: {err}")))?;

    Ok(clean_contact_entries(created))
}

/// Update an existing contact.
///
/// Graph treats an empty array or object in a PATCH body as "delete
/// everything in this field", so email and address groups the user
/// left untouched are omitted from the body entirely.
pub async fn update_contact(
    client: &GraphClient,
    api_base: &str,
    credential: &Credential,
    contact_id: &str,
    input: &ContactInput,
) -> Result<Value> {
    let mut body = contact_body(input);
    if let Some(map) = body.as_object_mut() {
        // fileAs is create-only on the platform's field surface.
        map.remove("fileAs");

        if input.email_addresses.is_empty() {
            map.remove("emailAddresses");
        }
        for (key, address) in [
            ("businessAddress", &input.business_address),
            ("homeAddress", &input.home_address),
            ("otherAddress", &input.other_address),
        ] {
            if !address.as_ref().is_some_and(AddressInput::any_field_set) {
                map.remove(key);
            }
        }
    }

    let request = GraphRequest::patch(update_contact_request_url(
        api_base,
        input.contact_folder_id.as_deref(),
        contact_id,
    ))
    .json(body)
    .error_prefix("Unable to update the specified contact");

    let response = client.execute(Some(&credential.access_token), request).await?;
    let updated: Value = response.json().map_err(|err| {
        BridgeError::Network(format!("Unable to update the specified contact: {err}"))
    })?;

    Ok(clean_contact_entries(updated))
}

/// Hidden trigger powering the contact-folder dropdown.
pub async fn list_contact_folders(
    client: &GraphClient,
    api_base: &str,
    credential: &Credential,
) -> Result<Vec<Value>> {
    let request = GraphRequest::get(format!("{api_base}/me/contactFolders"))
        .error_prefix("Unable to retrieve the list of folders");

    let response = client.execute(Some(&credential.access_token), request).await?;
    let collection: GraphCollection<Value> = response.json().map_err(|err| {
        BridgeError::Network(format!("Unable to retrieve the list of folders: {err}"))
    })?;

    Ok(collection.value)
}

fn contact_body(input: &ContactInput) -> Value {
    json!({
        "givenName": input.given_name,
        "surname": input.surname,
        "emailAddresses": format_contact_emails(
            input.given_name.as_deref(),
            input.surname.as_deref(),
            &input.email_addresses,
        ),
        "businessPhones": input.business_phones,
        "homePhones": input.home_phones,
        "mobilePhone": input.mobile_phone,
        "jobTitle": input.job_title,
        "companyName": input.company_name,
        "department": input.department,
        "businessHomePage": input.business_home_page,
        "fileAs": input.file_as,
        "personalNotes": input.personal_notes,
        "businessAddress": format_contact_address(input.business_address.as_ref()),
        "homeAddress": format_contact_address(input.home_address.as_ref()),
        "otherAddress": format_contact_address(input.other_address.as_ref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> ContactInput {
        ContactInput {
            given_name: Some("Ada".to_string()),
            surname: Some("Lovelace".to_string()),
            email_addresses: vec!["ada@example.com".to_string()],
            business_phones: vec!["555-555-5555".to_string()],
            ..ContactInput::default()
        }
    }

    #[test]
    fn contact_body_nests_emails_with_display_name() {
        let body = contact_body(&sample_input());

        assert_eq!(body["givenName"], "Ada");
        assert_eq!(body["emailAddresses"][0]["name"], "Ada Lovelace");
        assert_eq!(body["emailAddresses"][0]["address"], "ada@example.com");
        assert_eq!(body["businessAddress"], json!({}));
    }

    #[test]
    fn contact_body_serializes_phone_lists_verbatim() {
        let body = contact_body(&sample_input());

        assert_eq!(body["businessPhones"], json!(["555-555-5555"]));
        assert_eq!(body["homePhones"], json!([]));
    }
}
