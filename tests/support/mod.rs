//! In-memory stand-in for the classified-ads service.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use adprobe::ClientError;
use adprobe::api::{AdsApi, ApiVersion, NewItem};
use adprobe::extract::find_uuid;
use adprobe::http::ApiResponse;
use async_trait::async_trait;
use serde_json::{Value, json};

/// How the fake reports the id of a created item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdShape {
    /// `{"status": "Сохранили объявление - <uuid>"}`
    Status,
    /// `{"id": "<uuid>"}`
    Direct,
    /// `{"result": "<uuid>"}`
    Result,
    /// `{"status": "Сохранили объявление"}` without an id
    Missing,
}

#[derive(Debug, Clone)]
pub struct Behaviour {
    pub id_shape: IdShape,
    pub reject_zero_statistics: bool,
    /// Every creation answers with this status instead of storing the item.
    pub create_status: Option<u16>,
    /// Hand out the same id for every created item.
    pub constant_id: bool,
    /// Deletions of items owned by this seller answer 500.
    pub refuse_delete_for_seller: Option<i64>,
}

impl Default for Behaviour {
    fn default() -> Self {
        Self {
            id_shape: IdShape::Status,
            reject_zero_statistics: false,
            create_status: None,
            constant_id: false,
            refuse_delete_for_seller: None,
        }
    }
}

#[derive(Debug, Clone)]
struct StoredItem {
    seller_id: i64,
    name: String,
    price: i64,
    statistics: Value,
}

#[derive(Default)]
struct State {
    items: HashMap<String, StoredItem>,
    created: usize,
    deletes: Vec<String>,
}

pub struct FakeAdsService {
    behaviour: Behaviour,
    state: Mutex<State>,
}

impl FakeAdsService {
    pub fn new() -> Self {
        Self::with(Behaviour::default())
    }

    pub fn with(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            state: Mutex::new(State::default()),
        }
    }

    pub fn stored_items(&self) -> usize {
        self.state.lock().unwrap().items.len()
    }

    pub fn created_items(&self) -> usize {
        self.state.lock().unwrap().created
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().deletes.clone()
    }

    fn create_from(&self, body: &Value) -> ApiResponse {
        if let Some(status) = self.behaviour.create_status {
            return respond(status, json!({"result": {"message": "unavailable"}}));
        }

        let name = body.get("name").and_then(Value::as_str);
        let price = body.get("price").and_then(Value::as_i64);
        let seller_id = body.get("sellerID").and_then(Value::as_i64);
        let (Some(name), Some(price), Some(seller_id)) = (name, price, seller_id) else {
            return bad_request("поле обязательно");
        };
        if name.is_empty() {
            return bad_request("name is empty");
        }

        let statistics = body.get("statistics").cloned().unwrap_or_else(|| json!({}));
        if self.behaviour.reject_zero_statistics && statistics.get("likes") == Some(&json!(0)) {
            return bad_request("statistics must be positive");
        }

        let mut state = self.state.lock().unwrap();
        state.created += 1;
        let id = if self.behaviour.constant_id {
            uuid_for(1)
        } else {
            uuid_for(state.created)
        };
        state.items.insert(
            id.clone(),
            StoredItem {
                seller_id,
                name: name.to_string(),
                price,
                statistics,
            },
        );

        let body = match self.behaviour.id_shape {
            IdShape::Status => json!({"status": format!("Сохранили объявление - {id}")}),
            IdShape::Direct => json!({"id": id}),
            IdShape::Result => json!({"result": id}),
            IdShape::Missing => json!({"status": "Сохранили объявление"}),
        };
        respond(200, body)
    }

    /// 404 for well-formed unknown ids, 400 for malformed ones.
    fn missing(id: &str) -> ApiResponse {
        if id.is_empty() || find_uuid(id) == Some(id) {
            respond(404, json!({"result": {"message": "not found"}}))
        } else {
            bad_request("invalid id")
        }
    }
}

#[async_trait]
impl AdsApi for FakeAdsService {
    async fn create_item(&self, item: &NewItem) -> Result<ApiResponse, ClientError> {
        Ok(self.create_from(&serde_json::to_value(item)?))
    }

    async fn create_item_raw(&self, body: &str) -> Result<ApiResponse, ClientError> {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Ok(self.create_from(&value)),
            Err(_) => Ok(bad_request("invalid json")),
        }
    }

    async fn get_item(&self, id: &str) -> Result<ApiResponse, ClientError> {
        let state = self.state.lock().unwrap();
        Ok(match state.items.get(id) {
            Some(item) => respond(200, json!([item_json(id, item)])),
            None => Self::missing(id),
        })
    }

    async fn seller_items(&self, seller: &str) -> Result<ApiResponse, ClientError> {
        let Ok(seller_id) = seller.parse::<i64>() else {
            return Ok(bad_request("invalid seller id"));
        };
        let state = self.state.lock().unwrap();
        let items: Vec<Value> = state
            .items
            .iter()
            .filter(|(_, item)| item.seller_id == seller_id)
            .map(|(id, item)| item_json(id, item))
            .collect();
        Ok(respond(200, Value::Array(items)))
    }

    async fn statistic(&self, version: ApiVersion, id: &str) -> Result<ApiResponse, ClientError> {
        let state = self.state.lock().unwrap();
        Ok(match state.items.get(id) {
            Some(item) if version == ApiVersion::V1 => respond(200, json!([item.statistics])),
            Some(item) => respond(200, item.statistics.clone()),
            None => Self::missing(id),
        })
    }

    async fn delete_item(&self, id: &str) -> Result<ApiResponse, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.deletes.push(id.to_string());

        let owner = state.items.get(id).map(|item| item.seller_id);
        match owner {
            Some(seller) if Some(seller) == self.behaviour.refuse_delete_for_seller => {
                Ok(respond(500, json!({"result": {"message": "internal error"}})))
            }
            Some(_) => {
                state.items.remove(id);
                Ok(respond(200, Value::String(String::new())))
            }
            None => Ok(Self::missing(id)),
        }
    }
}

fn uuid_for(n: usize) -> String {
    format!("{n:08x}-5717-4562-b3fc-{n:012x}")
}

fn item_json(id: &str, item: &StoredItem) -> Value {
    json!({
        "id": id,
        "sellerId": item.seller_id,
        "name": item.name,
        "price": item.price,
        "statistics": item.statistics,
    })
}

fn respond(status: u16, body: Value) -> ApiResponse {
    ApiResponse {
        status,
        status_text: String::new(),
        body: body.to_string(),
        time_ms: 0,
        content_type: "application/json".into(),
    }
}

fn bad_request(message: &str) -> ApiResponse {
    respond(400, json!({"result": {"message": message}, "status": "400"}))
}
