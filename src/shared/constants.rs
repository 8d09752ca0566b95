// =============================================================================
// REMINDERS
// =============================================================================

/// Base of WhatsApp click-to-chat links
pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Greeting used when a member has no usable first name
pub const FALLBACK_FIRST_NAME: &str = "Irmão";
