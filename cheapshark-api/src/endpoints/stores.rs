use super::{Endpoint, RequestData, decode_list, lenient_or_default};
use crate::error::GatewayError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    #[serde(rename = "storeID")]
    pub store_id: String,
    #[serde(rename = "storeName")]
    pub store_name: String,
    #[serde(rename = "isActive", default, deserialize_with = "lenient_or_default")]
    pub is_active: u8,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub images: StoreImages,
}

impl Store {
    pub fn active(&self) -> bool {
        self.is_active == 1
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreImages {
    #[serde(default)]
    pub banner: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub icon: String,
}

// Requests

#[derive(Default, Debug, Clone, Copy)]
pub struct ListStores;

impl ListStores {
    pub fn new() -> Self {
        Self
    }
}

impl Endpoint for ListStores {
    type Query = ();
    type Response = Vec<Store>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/stores".into()
    }

    fn data(&self) -> RequestData<&()> {
        RequestData::Empty
    }

    fn decode(body: Value) -> Result<Vec<Store>, GatewayError> {
        decode_list(body)
    }
}
