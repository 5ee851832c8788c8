// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pin routes against the in-memory store.

use axum::http::StatusCode;

mod common;

#[tokio::test]
async fn test_add_list_clear_pins() {
    let (app, state) = common::create_test_app();

    let (status, json) =
        common::get_json(app.clone(), "/add-pin?uid=alice&lat=41.8&long=-71.4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response_type"], "success");
    assert_eq!(json["pin"]["uid"], "alice");
    assert_eq!(json["pin"]["lat"], 41.8);
    assert_eq!(json["pin"]["long"], -71.4);

    let (status, _) = common::get_json(app.clone(), "/add-pin?uid=bob&lat=10&long=10").await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = common::get_json(app.clone(), "/list-pins?uid=alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pins"].as_array().unwrap().len(), 1);

    let (status, json) = common::get_json(app.clone(), "/clear-user?uid=alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cleared"], 1);

    let (_, json) = common::get_json(app, "/list-pins?uid=alice").await;
    assert!(json["pins"].as_array().unwrap().is_empty());

    // Other users are untouched
    assert_eq!(state.pins.list_pins("bob").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_add_pin_validation() {
    let (app, state) = common::create_test_app();

    for uri in [
        "/add-pin?lat=41.8&long=-71.4",
        "/add-pin?uid=&lat=41.8&long=-71.4",
        "/add-pin?uid=alice&long=-71.4",
        "/add-pin?uid=alice&lat=91&long=-71.4",
        "/add-pin?uid=alice&lat=41.8&long=west",
    ] {
        let (status, json) = common::get_json(app.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {}", uri);
        assert_eq!(json["error"], "bad_request");
    }

    assert!(state.pins.list_pins("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_pins_requires_uid() {
    let (app, _) = common::create_test_app();

    let (status, _) = common::get_json(app.clone(), "/list-pins").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = common::get_json(app, "/clear-user").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_repeated_parameters_answer_with_json() {
    let (app, _) = common::create_test_app();

    let (status, json) = common::get_json(
        app.clone(),
        "/add-pin?uid=alice&uid=carol&lat=41.8&long=-71.4",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pin"]["uid"], "carol");

    let (status, json) =
        common::get_json(app, "/add-pin?uid=carol&lat=41.8&lat=north&long=-71.4").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad_request");
}
