//! User-Agent string shared by catalog and download requests.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/workshop-dl";

/// Default User-Agent for every request the tool makes.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("workshop-dl/{version} (+{PROJECT_UA_URL})")
}
