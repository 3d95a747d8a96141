use super::{Endpoint, RequestData, decode_list, lenient, raw_text, string_or_number};
use crate::error::GatewayError;
use crate::macros::setter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

pub const PLACEHOLDER_THUMB: &str = "https://placehold.co/600x300?text=Image+Unavailable";

// Common

/// One store's current offer on one game.
///
/// Prices and savings are kept as the raw text the API returns, whether it
/// arrives as a string or a number; numeric views are parsed on demand. Only
/// the identity fields are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    #[serde(rename = "dealID")]
    pub deal_id: String,
    #[serde(rename = "gameID")]
    pub game_id: String,
    #[serde(rename = "storeID")]
    pub store_id: String,
    pub title: String,
    #[serde(rename = "normalPrice", default, deserialize_with = "raw_text")]
    pub normal_price: String,
    #[serde(rename = "salePrice", default, deserialize_with = "raw_text")]
    pub sale_price: String,
    #[serde(default, deserialize_with = "raw_text")]
    pub savings: String,
    #[serde(rename = "dealRating", default, deserialize_with = "string_or_number")]
    pub deal_rating: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub thumb: Option<String>,
    #[serde(rename = "internalName", default, deserialize_with = "lenient")]
    pub internal_name: Option<String>,
    #[serde(rename = "metacriticLink", default, deserialize_with = "lenient")]
    pub metacritic_link: Option<String>,
    #[serde(rename = "metacriticScore", default, deserialize_with = "string_or_number")]
    pub metacritic_score: Option<String>,
    #[serde(rename = "steamRatingText", default, deserialize_with = "lenient")]
    pub steam_rating_text: Option<String>,
    #[serde(rename = "steamRatingPercent", default, deserialize_with = "string_or_number")]
    pub steam_rating_percent: Option<String>,
    #[serde(rename = "steamRatingCount", default, deserialize_with = "string_or_number")]
    pub steam_rating_count: Option<String>,
    #[serde(rename = "steamAppID", default, deserialize_with = "string_or_number")]
    pub steam_app_id: Option<String>,
    #[serde(rename = "releaseDate", default, deserialize_with = "lenient")]
    pub release_date: Option<i64>,
    #[serde(rename = "lastChange", default, deserialize_with = "lenient")]
    pub last_change: Option<i64>,
    #[serde(rename = "isOnSale", default, deserialize_with = "lenient")]
    pub is_on_sale: Option<String>,
}

impl Deal {
    pub fn sale_price_value(&self) -> Option<f64> {
        parse_number(&self.sale_price)
    }

    pub fn normal_price_value(&self) -> Option<f64> {
        parse_number(&self.normal_price)
    }

    pub fn savings_value(&self) -> Option<f64> {
        parse_number(&self.savings)
    }

    pub fn rating_value(&self) -> Option<f64> {
        self.deal_rating.as_deref().and_then(parse_number)
    }

    /// Discount computed from the two prices, rounded to a whole percent.
    /// `None` when either price is unparsable or the normal price is zero.
    pub fn computed_discount(&self) -> Option<i64> {
        let normal = self.normal_price_value()?;
        let sale = self.sale_price_value()?;
        if normal <= 0.0 {
            return None;
        }
        Some(((normal - sale) / normal * 100.0).round() as i64)
    }

    pub fn thumbnail_or_placeholder(&self) -> &str {
        match self.thumb.as_deref() {
            Some(thumb) if !thumb.trim().is_empty() => thumb,
            _ => PLACEHOLDER_THUMB,
        }
    }

    pub fn is_on_sale(&self) -> bool {
        self.is_on_sale.as_deref() == Some("1")
    }

    pub fn released_at(&self) -> Option<DateTime<Utc>> {
        self.release_date
            .filter(|ts| *ts > 0)
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Values accepted by the `sortBy` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "Deal Rating")]
    DealRating,
    #[serde(rename = "Title")]
    Title,
    #[serde(rename = "Savings")]
    Savings,
    #[serde(rename = "Price")]
    Price,
    #[serde(rename = "Reviews")]
    Reviews,
    #[serde(rename = "Release")]
    Release,
    #[serde(rename = "Store")]
    Store,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::DealRating,
        SortKey::Title,
        SortKey::Savings,
        SortKey::Price,
        SortKey::Reviews,
        SortKey::Release,
        SortKey::Store,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::DealRating => "Deal Rating",
            SortKey::Title => "Title",
            SortKey::Savings => "Savings",
            SortKey::Price => "Price",
            SortKey::Reviews => "Reviews",
            SortKey::Release => "Release",
            SortKey::Store => "Store",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Server-side constraints for `GET /deals`.
///
/// Every field is optional; absent fields are left out of the query string
/// entirely rather than sent empty.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DealFilter {
    #[serde(rename = "storeID", skip_serializing_if = "Option::is_none")]
    store_id: Option<String>,
    #[serde(rename = "lowerPrice", skip_serializing_if = "Option::is_none")]
    lower_price: Option<u32>,
    #[serde(rename = "upperPrice", skip_serializing_if = "Option::is_none")]
    upper_price: Option<u32>,
    #[serde(rename = "minSavings", skip_serializing_if = "Option::is_none")]
    min_savings: Option<u32>,
    #[serde(rename = "sortBy", skip_serializing_if = "Option::is_none")]
    sort_by: Option<SortKey>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_flag"
    )]
    desc: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(rename = "pageNumber", skip_serializing_if = "Option::is_none")]
    page_number: Option<u32>,
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    page_size: Option<u32>,
}

fn serialize_flag<S>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(true) => serializer.serialize_str("1"),
        Some(false) => serializer.serialize_str("0"),
        None => serializer.serialize_none(),
    }
}

impl DealFilter {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt store_id: String);
    setter!(opt lower_price: u32);
    setter!(opt upper_price: u32);
    setter!(opt min_savings: u32);
    setter!(opt sort_by: SortKey);
    setter!(opt desc: bool);
    setter!(opt title: String);
    setter!(opt page_number: u32);
    setter!(opt page_size: u32);

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn get_store_id(&self) -> Option<&str> {
        self.store_id.as_deref()
    }

    pub fn get_lower_price(&self) -> Option<u32> {
        self.lower_price
    }

    pub fn get_upper_price(&self) -> Option<u32> {
        self.upper_price
    }

    pub fn get_min_savings(&self) -> Option<u32> {
        self.min_savings
    }

    pub fn get_sort_by(&self) -> Option<SortKey> {
        self.sort_by
    }

    pub fn get_title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct ListDeals {
    filter: DealFilter,
}

impl ListDeals {
    pub fn new(filter: DealFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &DealFilter {
        &self.filter
    }
}

impl Endpoint for ListDeals {
    type Query = DealFilter;
    type Response = Vec<Deal>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/deals".into()
    }

    fn data(&self) -> RequestData<&DealFilter> {
        if self.filter.is_empty() {
            RequestData::Empty
        } else {
            RequestData::Query(&self.filter)
        }
    }

    fn decode(body: Value) -> Result<Vec<Deal>, GatewayError> {
        decode_list(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_deal() -> Value {
        json!({
            "internalName": "DEUSEXHUMANREVOLUTIONDIRECTORSCUT",
            "title": "Deus Ex: Human Revolution - Director's Cut",
            "metacriticLink": "/game/pc/deus-ex-human-revolution---directors-cut",
            "dealID": "HhzMJAgQYGZ%2B%2BFPpBG%2BRFcuUQZJO3KXvlnyYYGwGUfU%3D",
            "storeID": "1",
            "gameID": "102249",
            "salePrice": "2.99",
            "normalPrice": "19.99",
            "isOnSale": "1",
            "savings": "85.042521",
            "metacriticScore": "91",
            "steamRatingText": "Very Positive",
            "steamRatingPercent": "92",
            "steamRatingCount": "17993",
            "steamAppID": "238010",
            "releaseDate": 1382400000,
            "lastChange": 1621536418,
            "dealRating": "9.6",
            "thumb": "https://cdn.cloudflare.steamstatic.com/steam/apps/238010/capsule_sm_120.jpg"
        })
    }

    fn query_string(filter: &DealFilter) -> String {
        let client = reqwest::Client::new();
        let request = client
            .get("http://localhost/deals")
            .query(filter)
            .build()
            .unwrap();
        request.url().query().unwrap_or_default().to_string()
    }

    #[test]
    fn test_deal_decodes_api_payload() {
        let deal: Deal = serde_json::from_value(sample_deal()).unwrap();
        assert_eq!(deal.game_id, "102249");
        assert_eq!(deal.store_id, "1");
        assert_eq!(deal.sale_price_value(), Some(2.99));
        assert_eq!(deal.rating_value(), Some(9.6));
        assert_eq!(deal.computed_discount(), Some(85));
        assert!(deal.is_on_sale());
        assert_eq!(deal.steam_rating_text.as_deref(), Some("Very Positive"));
    }

    #[test]
    fn test_deal_tolerates_odd_optional_fields() {
        let mut value = sample_deal();
        value["steamAppID"] = Value::Null;
        value["dealRating"] = json!(7);
        value["metacriticScore"] = json!(91);
        value["releaseDate"] = json!("soon");
        value.as_object_mut().unwrap().remove("thumb");
        value["someNewField"] = json!({"nested": true});

        let deal: Deal = serde_json::from_value(value).unwrap();
        assert_eq!(deal.steam_app_id, None);
        assert_eq!(deal.deal_rating.as_deref(), Some("7"));
        assert_eq!(deal.rating_value(), Some(7.0));
        assert_eq!(deal.metacritic_score.as_deref(), Some("91"));
        assert_eq!(deal.release_date, None);
        assert_eq!(deal.thumbnail_or_placeholder(), PLACEHOLDER_THUMB);
    }

    #[test]
    fn test_deal_missing_identity_fails() {
        let mut value = sample_deal();
        value.as_object_mut().unwrap().remove("gameID");
        assert!(serde_json::from_value::<Deal>(value).is_err());
    }

    #[test]
    fn test_numeric_and_null_prices_degrade_per_field() {
        let mut value = sample_deal();
        value["salePrice"] = json!(4.99);
        value["normalPrice"] = json!(10);
        value["savings"] = Value::Null;

        let deal: Deal = serde_json::from_value(value).unwrap();
        assert_eq!(deal.sale_price, "4.99");
        assert_eq!(deal.sale_price_value(), Some(4.99));
        assert_eq!(deal.normal_price, "10");
        assert_eq!(deal.savings, "");
        assert_eq!(deal.savings_value(), None);
        assert_eq!(deal.computed_discount(), Some(50));
    }

    #[test]
    fn test_mixed_page_keeps_decodable_deals() {
        let mut good = sample_deal();
        good["dealID"] = json!("a");
        let mut odd = sample_deal();
        odd["dealID"] = json!("b");
        odd["salePrice"] = json!(4.99);
        odd["savings"] = Value::Null;
        let mut anonymous = sample_deal();
        anonymous.as_object_mut().unwrap().remove("dealID");
        let mut no_game = sample_deal();
        no_game.as_object_mut().unwrap().remove("gameID");

        let deals = ListDeals::decode(json!([good, odd, anonymous, no_game])).unwrap();

        let ids: Vec<&str> = deals.iter().map(|d| d.deal_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(deals[1].sale_price, "4.99");
    }

    #[test]
    fn test_unparsable_prices_have_no_numeric_value() {
        let mut deal: Deal = serde_json::from_value(sample_deal()).unwrap();
        deal.sale_price = "free-ish".to_string();
        assert_eq!(deal.sale_price_value(), None);
        assert_eq!(deal.computed_discount(), None);

        deal.sale_price = "0.00".to_string();
        deal.normal_price = "0.00".to_string();
        assert_eq!(deal.computed_discount(), None);
    }

    #[test]
    fn test_empty_filter_sends_no_query() {
        let request = ListDeals::new(DealFilter::new());
        assert_eq!(request.data(), RequestData::Empty);
    }

    #[test]
    fn test_filter_query_omits_absent_fields() {
        let filter = DealFilter::new().store_id("1").min_savings(50u32);
        assert_eq!(query_string(&filter), "storeID=1&minSavings=50");
    }

    #[test]
    fn test_filter_query_encodes_sort_and_flags() {
        let filter = DealFilter::new()
            .upper_price(15u32)
            .sort_by(SortKey::DealRating)
            .desc(true)
            .title("half life")
            .page_number(0u32);
        assert_eq!(
            query_string(&filter),
            "upperPrice=15&sortBy=Deal+Rating&desc=1&title=half+life&pageNumber=0"
        );
    }

    #[test]
    fn test_filter_is_empty() {
        assert!(DealFilter::new().is_empty());
        assert!(!DealFilter::new().title("x").is_empty());
    }
}
