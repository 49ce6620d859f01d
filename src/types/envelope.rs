use serde::Deserialize;

pub const FALLBACK_FAILURE: &str = "Request failed";

/// Wrapper every backend response uses: `{success, data?, error?, message?}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    // `error` carries the detail, `message` the summary; either may be absent
    pub fn failure_text(&self) -> String {
        let text = [self.error.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|text| !text.is_empty());

        match text {
            Some(text) => text.to_string(),
            None => FALLBACK_FAILURE.to_string(),
        }
    }
}
