use serde::{Deserialize, Serialize};

use super::booking::Booking;

/// The whole fixture document. Every collection is optional in the source JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MockData {
    #[serde(default)]
    pub users: Vec<serde_json::Value>,
    #[serde(default)]
    pub entrepreneurs: Vec<Entrepreneur>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

impl MockData {
    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        Self {
            bookings,
            ..Self::default()
        }
    }

    pub fn service(&self, id: i64) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn entrepreneur(&self, id: i64) -> Option<&Entrepreneur> {
        self.entrepreneurs.iter().find(|e| e.id == id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub duration: String,
    pub category: String,
    pub entrepreneur_id: Option<i64>,
    pub image: String,
    pub features: Vec<String>,
    pub rating: f64,
    pub review_count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Entrepreneur {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub bio: String,
    pub rating: f64,
    pub review_count: i64,
    pub specialties: Vec<String>,
    pub avatar: String,
}

/// A service together with the entrepreneur offering it. The entrepreneur is
/// `None` when the service names no provider or an unknown one.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetails {
    pub service: Service,
    pub entrepreneur: Option<Entrepreneur>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sparse_document() {
        let doc: MockData =
            serde_json::from_str(r#"{"services":[{"id":2,"title":"Corte","price":45}]}"#).unwrap();
        assert!(doc.bookings.is_empty());
        assert!(doc.users.is_empty());
        assert_eq!(doc.services[0].price, 45.0);
        assert_eq!(doc.services[0].entrepreneur_id, None);
        assert_eq!(doc.service(2).map(|s| s.title.as_str()), Some("Corte"));
        assert!(doc.service(3).is_none());
    }

    #[test]
    fn test_users_are_kept_verbatim() {
        let json = r#"{"users":[{"id":7,"name":"Ana","extra":{"x":1}}],"categories":["Beleza"]}"#;
        let doc: MockData = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&doc).unwrap();
        assert_eq!(back["users"][0]["extra"]["x"], 1);
        assert_eq!(back["categories"][0], "Beleza");
    }
}
