//! Filter projection over the contact list.

use crate::model::contact::Contact;

/// Returns contacts whose name contains `filter`, ignoring case.
///
/// Order follows `contacts`. An empty filter matches everything.
pub fn filter_contacts<'a>(contacts: &'a [Contact], filter: &str) -> Vec<&'a Contact> {
    let normalized_filter = filter.to_lowercase();
    contacts
        .iter()
        .filter(|contact| contact.name().to_lowercase().contains(&normalized_filter))
        .collect()
}
