use serde::Deserialize;

/// Identity-provider lifecycle event, as delivered by the signed webhook.
/// Only `user.created` carries state we act on; the payload shape is the
/// provider's, not ours.
#[derive(Debug, Deserialize)]
pub struct ProvisioningEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: EventData,
}

#[derive(Debug, Deserialize)]
pub struct EventData {
    pub id: String,
    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,
    pub primary_email_address_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailAddress {
    pub id: String,
    pub email_address: String,
}

impl EventData {
    /// The event lists every address plus the id of the primary one;
    /// cross-reference to find it.
    pub fn primary_email(&self) -> Option<&str> {
        let primary_id = self.primary_email_address_id.as_deref()?;
        self.email_addresses
            .iter()
            .find(|email| email.id == primary_id)
            .map(|email| email.email_address.as_str())
    }
}
