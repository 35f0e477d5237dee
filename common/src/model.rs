use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// Decimal columns come back either as JSON numbers or as strings depending on
// how the server serializes them
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// Film row as returned by the top-five and search endpoints
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilmSummary {
    pub film_id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "name")]
    pub category_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<u32>,
    #[serde(default)]
    pub rental_count: Option<u32>,
}

impl FilmSummary {
    pub fn label(&self) -> String {
        match self.title.is_empty() {
            true => match &self.category_name {
                Some(category) => format!("Film #{} ({category})", self.film_id),
                None => format!("Film #{}", self.film_id),
            },
            false => self.title.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilmDetails {
    #[serde(default)]
    pub film_id: Option<u32>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_year: Option<u32>,
    #[serde(default, alias = "category_name")]
    pub category: Option<String>,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub special_features: Option<String>,
    #[serde(default)]
    pub rental_duration: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rental_rate: Option<String>,
    #[serde(default, alias = "available")]
    pub total_available: Option<u32>,
    #[serde(default)]
    pub inventory_id: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorSummary {
    pub actor_id: u32,
    pub first_name: String,
    pub last_name: String,
}

impl ActorSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One joined row of an actor's film history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorFilm {
    pub actor_id: u32,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub film_id: Option<u32>,
    #[serde(alias = "title")]
    pub film_title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_year: Option<u32>,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: u32,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub store_id: Option<u32>,
    #[serde(default)]
    pub address_id: Option<u32>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One joined row of a customer's rental history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomerRental {
    pub customer_id: u32,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub rental_id: Option<u32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rental_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub return_date: Option<String>,
}

impl CustomerRental {
    pub fn is_returned(&self) -> bool {
        self.return_date.is_some()
    }

    pub fn return_label(&self) -> String {
        match &self.return_date {
            Some(date) => date.clone(),
            None => String::from("not yet returned"),
        }
    }
}

/// Writable customer attributes, sent exactly as entered
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerFields {
    pub store_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewRental {
    pub inventory_id: u32,
    pub customer_id: String,
    pub staff_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RentalConfirmation {
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "filmId")]
    pub film_id: u32,
}
