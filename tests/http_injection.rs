use latewire::{
    di::{Arg, SlotSet},
    http::InjectableRouter,
    App, Json,
};

use serde::{Deserialize, Serialize};

use std::time::Duration;

async fn wait_for_server() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("latewire=debug")
        .try_init()
        .ok();
}

#[tokio::test]
async fn it_serves_injected_slot_values() {
    tokio::spawn(async {
        let mut slots = SlotSet::new();
        let answer = slots.declare::<i32>("answer");

        let mut routes = InjectableRouter::with_prefix("/api");
        routes.get("/answer", |n: i32| async move { Json(n) }, (Arg::Slot(answer),));

        let container = slots.builder().bind(answer, || 5).build().unwrap();
        let router = routes.create_router(&container).unwrap();

        let mut app = App::new().bind("127.0.0.1:7920");
        app.include(router);
        app.run().await
    });
    wait_for_server().await;

    let response = reqwest::get("http://127.0.0.1:7920/api/answer").await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(response.json::<i32>().await.unwrap(), 5);
}

#[tokio::test]
async fn it_passes_literal_arguments_through() {
    tokio::spawn(async {
        let slots = SlotSet::new();

        let mut routes = InjectableRouter::new();
        routes.get(
            "/sum",
            |a: i32, b: i32| async move { Json(a + b) },
            (Arg::Value(40), Arg::Value(2)),
        );

        let container = slots.builder().build().unwrap();
        let router = routes.create_router(&container).unwrap();

        let mut app = App::new().bind("127.0.0.1:7921");
        app.include(router);
        app.run().await
    });
    wait_for_server().await;

    let response = reqwest::get("http://127.0.0.1:7921/sum").await.unwrap();

    assert_eq!(response.json::<i32>().await.unwrap(), 42);
}

#[tokio::test]
async fn it_injects_for_every_verb() {
    tokio::spawn(async {
        let mut slots = SlotSet::new();
        let suffix = slots.declare::<String>("suffix");

        let handler = |verb: &'static str, suffix: String| async move {
            format!("{verb}{suffix}")
        };

        let mut routes = InjectableRouter::new();
        routes.get("/res", handler, (Arg::Value("get"), Arg::Slot(suffix)));
        routes.post("/res", handler, (Arg::Value("post"), Arg::Slot(suffix)));
        routes.put("/res", handler, (Arg::Value("put"), Arg::Slot(suffix)));
        routes.patch("/res", handler, (Arg::Value("patch"), Arg::Slot(suffix)));
        routes.delete("/res", handler, (Arg::Value("delete"), Arg::Slot(suffix)));

        let container = slots.builder().bind(suffix, || "!".to_owned()).build().unwrap();
        let router = routes.create_router(&container).unwrap();

        let mut app = App::new().bind("127.0.0.1:7922");
        app.include(router);
        app.run().await
    });
    wait_for_server().await;

    let client = reqwest::Client::new();
    let url = "http://127.0.0.1:7922/res";

    assert_eq!(client.get(url).send().await.unwrap().text().await.unwrap(), "get!");
    assert_eq!(client.post(url).send().await.unwrap().text().await.unwrap(), "post!");
    assert_eq!(client.put(url).send().await.unwrap().text().await.unwrap(), "put!");
    assert_eq!(client.patch(url).send().await.unwrap().text().await.unwrap(), "patch!");
    assert_eq!(client.delete(url).send().await.unwrap().text().await.unwrap(), "delete!");
}

#[tokio::test]
async fn it_returns_404_and_405() {
    tokio::spawn(async {
        let slots = SlotSet::new();

        let mut routes = InjectableRouter::new();
        routes.get("/only-get", || async {}, ());

        let container = slots.builder().build().unwrap();
        let router = routes.create_router(&container).unwrap();

        let mut app = App::new().bind("127.0.0.1:7923");
        app.include(router);
        app.run().await
    });
    wait_for_server().await;

    let client = reqwest::Client::new();

    let missing = client.get("http://127.0.0.1:7923/missing").send().await.unwrap();
    assert_eq!(missing.status(), 404);

    let wrong_verb = client.post("http://127.0.0.1:7923/only-get").send().await.unwrap();
    assert_eq!(wrong_verb.status(), 405);
    assert_eq!(wrong_verb.headers()["allow"], "GET");
}

#[tokio::test]
async fn it_materializes_against_different_containers() {
    tokio::spawn(async {
        let mut slots = SlotSet::new();
        let greeting = slots.declare::<String>("greeting");

        let mut routes = InjectableRouter::new();
        routes.get(
            "/hello",
            |greeting: String| async move { greeting },
            (Arg::Slot(greeting),),
        );

        let staging = slots.builder().bind(greeting, || "hi".to_owned()).build().unwrap();
        let production = slots.builder().bind(greeting, || "hello".to_owned()).build().unwrap();

        let mut staging_routes = InjectableRouter::with_prefix("/staging");
        staging_routes.get(
            "/hello",
            |greeting: String| async move { greeting },
            (Arg::Slot(greeting),),
        );

        let mut app = App::new().bind("127.0.0.1:7924");
        app.include(routes.create_router(&production).unwrap());
        app.include(staging_routes.create_router(&staging).unwrap());
        app.run().await
    });
    wait_for_server().await;

    let live = reqwest::get("http://127.0.0.1:7924/hello").await.unwrap();
    assert_eq!(live.text().await.unwrap(), "hello");

    let staged = reqwest::get("http://127.0.0.1:7924/staging/hello").await.unwrap();
    assert_eq!(staged.text().await.unwrap(), "hi");
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Order {
    id: u32,
    total: i64,
}

#[tokio::test]
async fn it_serves_structured_json_bodies() {
    init_tracing();
    tokio::spawn(async {
        let mut slots = SlotSet::new();
        let order = slots.declare::<Order>("order");

        let mut routes = InjectableRouter::new();
        routes.get("/order", |order: Order| async move { Json(order) }, (Arg::Slot(order),));

        let container = slots
            .builder()
            .bind(order, || Order { id: 7, total: 250 })
            .build()
            .unwrap();
        let router = routes.create_router(&container).unwrap();

        let mut app = App::new().bind("127.0.0.1:7926");
        app.include(router);
        app.run().await
    });
    wait_for_server().await;

    let response = reqwest::get("http://127.0.0.1:7926/order").await.unwrap();

    assert_eq!(
        response.json::<Order>().await.unwrap(),
        Order { id: 7, total: 250 }
    );
}

#[tokio::test]
async fn it_resolves_providers_per_request() {
    tokio::spawn(async {
        use std::sync::atomic::{AtomicI32, Ordering};
        use std::sync::Arc;

        let counter = Arc::new(AtomicI32::new(0));

        let mut slots = SlotSet::new();
        let next = slots.declare::<i32>("next");

        let mut routes = InjectableRouter::new();
        routes.get("/next", |n: i32| async move { Json(n) }, (Arg::Slot(next),));

        let container = slots
            .builder()
            .bind(next, move || counter.fetch_add(1, Ordering::SeqCst))
            .build()
            .unwrap();
        let router = routes.create_router(&container).unwrap();

        let mut app = App::new().bind("127.0.0.1:7925");
        app.include(router);
        app.run().await
    });
    wait_for_server().await;

    let first = reqwest::get("http://127.0.0.1:7925/next").await.unwrap();
    let second = reqwest::get("http://127.0.0.1:7925/next").await.unwrap();

    assert_eq!(first.json::<i32>().await.unwrap(), 0);
    assert_eq!(second.json::<i32>().await.unwrap(), 1);
}
