use super::{
    Endpoint, RequestData, decode_object, lenient, lenient_or_default, string_or_number,
};
use crate::error::GatewayError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

// Common

/// Detail for a single game.
///
/// Decoded field by field: a missing or malformed field becomes `None` (or an
/// empty list) instead of failing the whole record.
#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct GameDetail {
    #[serde(default, deserialize_with = "lenient")]
    pub info: Option<GameInfo>,
    #[serde(rename = "cheapestPriceEver", default, deserialize_with = "lenient")]
    pub cheapest_price_ever: Option<CheapestPrice>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub deals: Vec<GameDeal>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct GameInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(rename = "steamAppID", default, deserialize_with = "lenient")]
    pub steam_app_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub thumb: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct CheapestPrice {
    #[serde(default, deserialize_with = "string_or_number")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<i64>,
}

impl CheapestPrice {
    pub fn date_utc(&self) -> Option<DateTime<Utc>> {
        self.date.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}

/// A store offer as listed inside a game's detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDeal {
    #[serde(rename = "storeID")]
    pub store_id: String,
    #[serde(rename = "dealID")]
    pub deal_id: String,
    pub price: String,
    #[serde(rename = "retailPrice", default)]
    pub retail_price: Option<String>,
    #[serde(default)]
    pub savings: Option<String>,
}

// Requests

#[derive(Debug, Clone, Serialize)]
pub struct GetGame {
    id: String,
}

impl GetGame {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Endpoint for GetGame {
    type Query = Self;
    type Response = GameDetail;

    fn endpoint(&self) -> Cow<'_, str> {
        "/games".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }

    fn decode(body: Value) -> Result<GameDetail, GatewayError> {
        decode_object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    #[test]
    fn test_game_detail_decodes() {
        let body = json!({
            "info": {"title": "LEGO Batman", "steamAppID": "21000", "thumb": "https://x/y.jpg"},
            "cheapestPriceEver": {"price": "3.99", "date": 1543028665},
            "deals": [
                {"storeID": "1", "dealID": "abc", "price": "19.99", "retailPrice": "19.99", "savings": "0.000000"}
            ]
        });

        let detail = GetGame::decode(body).unwrap();
        let info = detail.info.unwrap();
        assert_eq!(info.title.as_deref(), Some("LEGO Batman"));
        let cheapest = detail.cheapest_price_ever.unwrap();
        assert_eq!(cheapest.price.as_deref(), Some("3.99"));
        assert_eq!(cheapest.date_utc().map(|d| d.year()), Some(2018));
        assert_eq!(detail.deals.len(), 1);
    }

    #[test]
    fn test_game_detail_degrades_per_field() {
        let body = json!({
            "info": "not an object",
            "cheapestPriceEver": {"price": 3.99, "date": "yesterday"},
            "deals": {"unexpected": true}
        });

        let detail = GetGame::decode(body).unwrap();
        assert_eq!(detail.info, None);
        let cheapest = detail.cheapest_price_ever.unwrap();
        assert_eq!(cheapest.price, None);
        assert_eq!(cheapest.date, None);
        assert!(detail.deals.is_empty());
    }

    #[test]
    fn test_game_detail_rejects_non_object() {
        assert!(matches!(
            GetGame::decode(json!([])),
            Err(GatewayError::DataShape(_))
        ));
    }
}
