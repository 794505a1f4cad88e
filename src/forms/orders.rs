use serde::Deserialize;

/// JSON body of `POST /orders`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordOrderForm {
    /// Whether the shopper sent the prepared WhatsApp message.
    #[serde(default)]
    pub whatsapp_message_sent: bool,
}
