// Shared test helpers: a scripted in-memory transport and canned backend
// documents used across the protocol-level integration tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use bag_status::{StatusTransport, TransportError, TransportReply};

/// One captured lookup POST: target URL, headers as sent, and the JSON body.
#[allow(dead_code)] // Used by other test files
pub struct RecordedPost {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: serde_json::Value,
}

/// Scripted transport: pops one canned reply per POST (in order) and serves
/// a single canned catalog reply for GETs. Records every request so tests
/// can assert on the protocol.
#[derive(Default)]
pub struct FakeTransport {
    post_replies: Mutex<VecDeque<TransportReply>>,
    catalog_reply: Mutex<Option<TransportReply>>,
    pub posts: Mutex<Vec<RecordedPost>>,
    pub gets: Mutex<Vec<String>>,
}

#[allow(dead_code)] // Used by other test files
impl FakeTransport {
    pub fn with_posts(replies: Vec<TransportReply>) -> Self {
        Self {
            post_replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    pub fn and_catalog(self, reply: TransportReply) -> Self {
        *self.catalog_reply.lock().unwrap() = Some(reply);
        self
    }

    pub fn post_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    pub fn get_count(&self) -> usize {
        self.gets.lock().unwrap().len()
    }

    /// Validator values of the recorded lookup attempts, in order.
    pub fn validators(&self) -> Vec<i64> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .filter_map(|post| post.body["WTR_ReadRecordRQ"]["Validator"].as_i64())
            .collect()
    }

    /// Value of a recorded header on the first POST, if any.
    pub fn first_post_header(&self, name: &str) -> Option<String> {
        self.posts.lock().unwrap().first().and_then(|post| {
            post.headers
                .iter()
                .find(|(header, _)| header == name)
                .map(|(_, value)| value.clone())
        })
    }
}

#[async_trait]
impl StatusTransport for FakeTransport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: &serde_json::Value,
    ) -> Result<TransportReply, TransportError> {
        self.posts.lock().unwrap().push(RecordedPost {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
            body: body.clone(),
        });
        self.post_replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError::Other("no scripted reply left".into()))
    }

    async fn get(
        &self,
        url: &str,
        _headers: &[(&str, String)],
    ) -> Result<TransportReply, TransportError> {
        self.gets.lock().unwrap().push(url.to_string());
        self.catalog_reply
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| TransportError::Other("catalog fetch refused".into()))
    }
}

/// Shorthand for a canned reply.
#[allow(dead_code)] // Used by other test files
pub fn reply(status: u16, body: &str) -> TransportReply {
    TransportReply {
        status,
        body: body.to_string(),
    }
}

/// A minimal successful lookup body with one bag item.
#[allow(dead_code)] // Used by other test files
pub fn success_body(tracing_status: &str, bags_updated: i64) -> String {
    serde_json::json!({
        "WTR_ReadRecordRS": {
            "WTR_DelayedBagRecReadRS": {
                "RecordStatus": "OPEN",
                "DelayedBagGroup": {
                    "DelayedBags": {
                        "noOfBagsUpdated": bags_updated,
                        "DelayedBag": [
                            {
                                "Seq": 1,
                                "tracingStatus": tracing_status,
                                "BagTag": {"AirlineCode": "OS", "TagSequence": "22525"}
                            }
                        ]
                    }
                }
            }
        }
    })
    .to_string()
}

/// A catalog asset with display texts for `BTS_205`.
#[allow(dead_code)] // Used by other test files
pub fn catalog_body() -> String {
    serde_json::json!({
        "dynamicMessages": {
            "bag_status": {
                "BTS_205": {
                    "BTS_ACCopen_1_head": "Bag received",
                    "BTS_ACCopen_2_head": "Out for delivery",
                    "BTS_ACCclose_head": "Out for delivery"
                }
            },
            "notification_mszs": {
                "BTS_205": {"delayed": {"body": "Your bag is out for delivery."}}
            }
        }
    })
    .to_string()
}
