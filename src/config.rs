use log::Level;

/// EmailJS public key. Safe to ship, it only identifies the account.
pub const EMAILJS_PUBLIC_KEY: &str = "NV2ee11W2OkaqLW8d";
pub const EMAILJS_SERVICE_ID: &str = "service_nsj53ot";
pub const EMAILJS_TEMPLATE_ID: &str = "template_g67hmra";

/// Trailing window applied to every window scroll listener.
pub const SCROLL_THROTTLE_MS: u32 = 16;

/// How long the submit button shows "Sent" or "Error" before resetting.
pub const SUBMIT_RESULT_DISPLAY_MS: u32 = 2000;

pub fn get_email_api_url() -> &'static str {
    "https://api.emailjs.com/api/v1.0/email/send"
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose console while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
