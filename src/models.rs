use serde::{Deserialize, Serialize};

// One inbound tunnel call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub target_url: String,
    pub client_id: String,
}

// Upstream outcome - filled in even when the fetch failed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FetchStatus {
    pub url: String,
    pub content_type: String,
    pub http_code: u16,
}

// Envelope returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FetchResult {
    pub contents: String,
    pub status: FetchStatus,
}

impl FetchResult {
    // empty contents, no content type, http_code 500
    pub fn internal_failure(url: &str) -> Self {
        Self {
            contents: String::new(),
            status: FetchStatus {
                url: url.to_string(),
                content_type: String::new(),
                http_code: 500,
            },
        }
    }
}

// Query string of GET /get
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TunnelParams {
    pub url: String,
    pub callback: String,
}

impl TunnelParams {
    // First occurrence wins when a key repeats; missing keys stay empty
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        let (mut seen_url, mut seen_callback) = (false, false);

        for (key, value) in pairs {
            match key.as_str() {
                "url" if !seen_url => {
                    params.url = value;
                    seen_url = true;
                }
                "callback" if !seen_callback => {
                    params.callback = value;
                    seen_callback = true;
                }
                _ => {}
            }
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_uses_wire_field_names() {
        let result = FetchResult {
            contents: "hello".to_string(),
            status: FetchStatus {
                url: "http://example.com".to_string(),
                content_type: "text/plain".to_string(),
                http_code: 200,
            },
        };

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"contents":"hello","status":{"url":"http://example.com","content_type":"text/plain","http_code":200}}"#
        );
    }

    #[test]
    fn internal_failure_is_empty_500() {
        let result = FetchResult::internal_failure("not a url");

        assert_eq!(result.contents, "");
        assert_eq!(result.status.url, "not a url");
        assert_eq!(result.status.content_type, "");
        assert_eq!(result.status.http_code, 500);
    }

    #[test]
    fn params_take_first_occurrence() {
        let params = TunnelParams::from_pairs(vec![
            ("callback".to_string(), "cb".to_string()),
            ("url".to_string(), "http://a".to_string()),
            ("url".to_string(), "http://b".to_string()),
            ("other".to_string(), "x".to_string()),
        ]);

        assert_eq!(params.url, "http://a");
        assert_eq!(params.callback, "cb");
    }

    #[test]
    fn params_default_to_empty() {
        assert_eq!(TunnelParams::from_pairs(Vec::new()), TunnelParams::default());
    }
}
