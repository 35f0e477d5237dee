use common::mock::MockTransport;
use common::model::{CustomerFields, NewRental, RentalConfirmation};
use common::{ApiCall, ApiClient, ApiError, Endpoint, Reply};
use serde_json::json;
use std::sync::Arc;

fn client() -> (ApiClient, Arc<MockTransport>) {
    let mock = Arc::new(MockTransport::new());

    (ApiClient::new(mock.clone()), mock)
}

#[tokio::test]
async fn search_by_title_opens_film_envelope() {
    let (client, mock) = client();
    mock.respond(
        "GET /searchByTitle/matrix",
        200,
        json!({ "film": [{ "film_id": 7, "title": "The Matrix" }] }),
    );

    let films = client.search_by_title("matrix").await.unwrap();

    assert_eq!(films.len(), 1);
    assert_eq!(films[0].film_id, 7);
    assert_eq!(films[0].title, "The Matrix");
}

#[tokio::test]
async fn film_details_accepts_string_rate() {
    let (client, mock) = client();
    mock.respond(
        "GET /displayFilmDetails/1",
        200,
        json!({ "film_details": [{
            "film_id": 1,
            "title": "ACADEMY DINOSAUR",
            "description": "An epic drama",
            "release_year": 2006,
            "length": 86,
            "rating": "PG",
            "special_features": "Deleted Scenes,Behind the Scenes",
            "rental_duration": 6,
            "rental_rate": "0.99",
            "total_available": 8
        }] }),
    );

    let details = client.film_details(1).await.unwrap();

    assert_eq!(details[0].rental_rate.as_deref(), Some("0.99"));
    assert_eq!(details[0].total_available, Some(8));
    assert_eq!(details[0].category, None);
}

#[tokio::test]
async fn category_rows_without_title_still_decode() {
    let (client, mock) = client();
    mock.respond(
        "GET /searchByCategory/Action",
        200,
        json!({ "category": [{ "film_id": 19, "category_id": 1, "name": "Action" }] }),
    );

    let films = client.search_by_category("Action").await.unwrap();

    assert_eq!(films[0].category_name.as_deref(), Some("Action"));
    assert_eq!(films[0].label(), "Film #19 (Action)");
}

#[tokio::test]
async fn missing_envelope_key_is_reported() {
    let (client, mock) = client();
    mock.respond("GET /topFiveActors", 200, json!({ "actors": [] }));

    let result = client.top_five_actors().await;

    assert_eq!(result, Err(ApiError::MissingKey("actor")));
}

#[tokio::test]
async fn non_success_status_carries_error_body() {
    let (client, mock) = client();
    mock.respond(
        "POST /returnMovie/5",
        400,
        json!({ "error": "This rental has already been returned" }),
    );
    mock.respond("DELETE /deleteCustomer/999", 404, json!({}));

    assert_eq!(
        client.return_movie("5").await,
        Err(ApiError::Status {
            status: 400,
            message: Some(String::from("This rental has already been returned")),
        })
    );
    assert_eq!(
        client.delete_customer("999").await,
        Err(ApiError::Status {
            status: 404,
            message: None,
        })
    );
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let (client, _mock) = client();

    let result = client.view_customers().await;

    assert!(matches!(result, Err(ApiError::Transport(_))));
}

#[tokio::test]
async fn mutations_send_bodies() {
    let (client, mock) = client();
    mock.respond("POST /addCustomer", 201, json!({ "message": "Customer added" }));
    mock.respond("PATCH /editCustomer/3", 200, json!({ "message": "Customer updated" }));
    mock.respond("POST /addRental", 200, json!({ "message": "Rental added" }));
    mock.respond("POST /confirmRental", 200, json!({ "message": "Rental confirmed" }));

    let fields = CustomerFields {
        store_id: String::from("1"),
        first_name: String::from("MARY"),
        last_name: String::from("SMITH"),
        email: String::from("mary.smith@sakilacustomer.org"),
        address_id: String::from("5"),
    };

    assert_eq!(client.add_customer(&fields).await.unwrap(), "Customer added");
    assert_eq!(
        client.edit_customer("3", &fields).await.unwrap(),
        "Customer updated"
    );
    assert_eq!(
        client
            .add_rental(&NewRental {
                inventory_id: 10,
                customer_id: String::from("3"),
                staff_id: String::from("1"),
            })
            .await
            .unwrap(),
        "Rental added"
    );
    assert_eq!(
        client
            .confirm_rental(&RentalConfirmation {
                full_name: String::from("Mary Smith"),
                film_id: 1,
            })
            .await
            .unwrap(),
        "Rental confirmed"
    );

    let requests = mock.requests();
    assert_eq!(requests.len(), 4);
    assert_eq!(
        requests[0].body,
        Some(json!({
            "store_id": "1",
            "first_name": "MARY",
            "last_name": "SMITH",
            "email": "mary.smith@sakilacustomer.org",
            "address_id": "5"
        }))
    );
    assert_eq!(requests[1].endpoint, Endpoint::EditCustomer(String::from("3")));
    assert_eq!(
        requests[2].body,
        Some(json!({ "inventory_id": 10, "customer_id": "3", "staff_id": "1" }))
    );
    assert_eq!(
        requests[3].body,
        Some(json!({ "fullName": "Mary Smith", "filmId": 1 }))
    );
}

#[tokio::test]
async fn execute_wraps_payloads() {
    let (client, mock) = client();
    mock.respond(
        "GET /viewCustomerDetails/1",
        200,
        json!({ "customer": [{
            "customer_id": 1,
            "first_name": "MARY",
            "last_name": "SMITH",
            "rental_id": 76,
            "title": "PATIENT SISTER",
            "return_date": null
        }] }),
    );

    let reply = client.execute(ApiCall::CustomerDetails(1)).await.unwrap();

    match reply {
        Reply::CustomerDetails(rows) => {
            assert_eq!(rows.len(), 1);
            assert!(!rows[0].is_returned());
            assert_eq!(rows[0].return_label(), "not yet returned");
        }
        other => panic!("unexpected reply {other:?}"),
    }
}

#[test]
fn reply_conversion_checks_kind() {
    let reply = Reply::Message(String::from("ok"));

    assert_eq!(String::try_from(reply.clone()), Ok(String::from("ok")));
    assert_eq!(
        Vec::<common::model::Customer>::try_from(reply),
        Err(ApiError::UnexpectedReply("message"))
    );
}
