// Records written by the gateway: request logs and blocked requests

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A request-log document, returned as stored.
///
/// The gateway owns the schema (timestamp, ipAddress, userAgent, geoLocation,
/// httpHeaders, urlPath, queryParameters, connectionDuration, referrer, cookies,
/// protocolType, portNumber, trafficVolume, sessionId, requestMethod,
/// responseTime, statusCode, requestPayloadSize); nothing here interprets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestLogRecord(Map<String, Value>);

impl RequestLogRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// A blocked-request document. Only `ipAddress` is relied on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedRequestRecord {
    pub ip_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl BlockedRequestRecord {
    pub fn new(ip_address: impl Into<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
            blocked_at: None,
            reason: None,
            request_url: None,
            user_agent: None,
        }
    }
}
