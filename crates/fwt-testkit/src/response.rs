//! Materialized HTTP responses and the assertions made on them

use std::collections::BTreeMap;

use fwt_validate::{AssertionCollector, AssertionFailure};
use serde_json::Value;

use crate::error::{Result, TestkitError};

/// Status, headers and body of a response, read eagerly
///
/// Header names are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResponse {
    url: String,
    status: u16,
    headers: BTreeMap<String, String>,
    body: String,
}

impl TestResponse {
    pub fn new<U: Into<String>, B: Into<String>>(url: U, status: u16, body: B) -> Self {
        Self {
            url: url.into(),
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    pub(crate) async fn read(url: &str, response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().await.map_err(|e| TestkitError::Request {
            url: url.to_string(),
            source: e,
        })?;
        Ok(Self {
            url: url.to_string(),
            status,
            headers,
            body,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body).map_err(|e| TestkitError::Decode {
            url: self.url.clone(),
            source: e,
        })
    }

    /// Fail with [`TestkitError::Status`] unless the status is 2xx
    pub fn error_for_status(self) -> Result<Self> {
        if (200..300).contains(&self.status) {
            Ok(self)
        } else {
            Err(TestkitError::Status {
                url: self.url,
                status: self.status,
                body: self.body,
            })
        }
    }
}

#[track_caller]
pub fn assert_response_code_is(
    response: &TestResponse,
    status: u16,
    context: &str,
) -> std::result::Result<(), AssertionFailure> {
    if response.status == status {
        return Ok(());
    }
    Err(AssertionFailure::new(format!(
        "Status codes are not the same: {} vs {status}",
        response.status
    ))
    .with_context(context))
}

#[track_caller]
pub fn assert_response_code_is_not(
    response: &TestResponse,
    status: u16,
    context: &str,
) -> std::result::Result<(), AssertionFailure> {
    if response.status != status {
        return Ok(());
    }
    Err(AssertionFailure::new(format!("Status code should not be {status}")).with_context(context))
}

#[track_caller]
pub fn assert_response_body_contains(
    response: &TestResponse,
    text: &str,
    context: &str,
) -> std::result::Result<(), AssertionFailure> {
    if response.body.contains(text) {
        return Ok(());
    }
    Err(AssertionFailure::new(format!(
        "Text '{text}' is not part of response body: {}",
        response.body
    ))
    .with_context(context))
}

#[track_caller]
pub fn assert_response_header_contains(
    response: &TestResponse,
    header: &str,
    value: &str,
    context: &str,
) -> std::result::Result<(), AssertionFailure> {
    let Some(actual) = response.header(header) else {
        return Err(AssertionFailure::new(format!(
            "Header '{header}' is not part of response headers: {:?}",
            response.headers
        ))
        .with_context(context));
    };
    if actual.contains(value) {
        return Ok(());
    }
    Err(AssertionFailure::new(format!(
        "Header '{header}' does not contain '{value}' but '{actual}'"
    ))
    .with_context(context))
}

/// Soft response checks on an [`AssertionCollector`]
pub trait ResponseAssertions {
    fn soft_assert_response_code_is(
        &mut self,
        response: &TestResponse,
        status: u16,
        context: &str,
    ) -> bool;

    fn soft_assert_response_code_is_not(
        &mut self,
        response: &TestResponse,
        status: u16,
        context: &str,
    ) -> bool;

    fn soft_assert_response_body_contains(
        &mut self,
        response: &TestResponse,
        text: &str,
        context: &str,
    ) -> bool;

    fn soft_assert_response_header_contains(
        &mut self,
        response: &TestResponse,
        header: &str,
        value: &str,
        context: &str,
    ) -> bool;
}

impl ResponseAssertions for AssertionCollector {
    #[track_caller]
    fn soft_assert_response_code_is(
        &mut self,
        response: &TestResponse,
        status: u16,
        context: &str,
    ) -> bool {
        let result = assert_response_code_is(response, status, context);
        self.check(result).is_some()
    }

    #[track_caller]
    fn soft_assert_response_code_is_not(
        &mut self,
        response: &TestResponse,
        status: u16,
        context: &str,
    ) -> bool {
        let result = assert_response_code_is_not(response, status, context);
        self.check(result).is_some()
    }

    #[track_caller]
    fn soft_assert_response_body_contains(
        &mut self,
        response: &TestResponse,
        text: &str,
        context: &str,
    ) -> bool {
        let result = assert_response_body_contains(response, text, context);
        self.check(result).is_some()
    }

    #[track_caller]
    fn soft_assert_response_header_contains(
        &mut self,
        response: &TestResponse,
        header: &str,
        value: &str,
        context: &str,
    ) -> bool {
        let result = assert_response_header_contains(response, header, value, context);
        self.check(result).is_some()
    }
}
