#[cfg(test)]
mod controller_tests {
    use async_trait::async_trait;
    use nsot::api::{ApiClient, ApiError};
    use nsot::console::MemoryConsole;
    use nsot::controller::{ControllerError, ResourceController};
    use nsot::format::FieldMap;
    use nsot::model::{ListResult, ObjectId, ParamSet, RemoteObject};
    use reqwest::{Method, StatusCode};
    use serde_json::{json, Map, Value};
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// How the fake server answers the next request.
    #[derive(Debug, Clone, Copy)]
    enum Failure {
        Status(StatusCode),
        NoResponse,
    }

    #[derive(Default)]
    struct Store {
        objects: BTreeMap<String, BTreeMap<i64, Map<String, Value>>>,
        next_id: i64,
        calls: Vec<(Method, String)>,
        bodies: Vec<Map<String, Value>>,
        failure: Option<Failure>,
    }

    /// In-memory API with one collection per resource name.
    #[derive(Default)]
    struct FakeApi {
        store: Mutex<Store>,
    }

    impl FakeApi {
        fn seeded(resource: &str, objects: Vec<Value>) -> Self {
            let api = FakeApi::default();
            {
                let mut store = api.store.lock().unwrap();
                for object in objects {
                    let map = object.as_object().unwrap().clone();
                    let id = map["id"].as_i64().unwrap();
                    store.next_id = store.next_id.max(id);
                    store
                        .objects
                        .entry(resource.to_string())
                        .or_default()
                        .insert(id, map);
                }
            }
            api
        }

        fn fail_with(&self, failure: Failure) {
            self.store.lock().unwrap().failure = Some(failure);
        }

        fn calls(&self) -> Vec<(Method, String)> {
            self.store.lock().unwrap().calls.clone()
        }

        fn bodies(&self) -> Vec<Map<String, Value>> {
            self.store.lock().unwrap().bodies.clone()
        }

        fn object(&self, resource: &str, id: i64) -> Option<Map<String, Value>> {
            let store = self.store.lock().unwrap();
            store.objects.get(resource).and_then(|c| c.get(&id)).cloned()
        }

        fn record(&self, method: Method, path: String) -> Result<(), ApiError> {
            let mut store = self.store.lock().unwrap();
            store.calls.push((method, path));
            match store.failure.take() {
                Some(Failure::Status(status)) => Err(ApiError::from_status(status)),
                Some(Failure::NoResponse) => Err(ApiError::InvalidUrl(
                    "http://127.0.0.1:9/api/ (connection refused)".to_string(),
                )),
                None => Ok(()),
            }
        }

        fn numeric(id: &ObjectId) -> i64 {
            id.as_str().parse().unwrap()
        }
    }

    #[async_trait]
    impl ApiClient for FakeApi {
        async fn post(
            &self,
            resource: &str,
            body: &Map<String, Value>,
        ) -> Result<RemoteObject, ApiError> {
            self.record(Method::POST, format!("{}/", resource))?;
            let mut store = self.store.lock().unwrap();
            store.bodies.push(body.clone());
            store.next_id += 1;
            let id = store.next_id;
            let mut object = body.clone();
            object.insert("id".to_string(), json!(id));
            store
                .objects
                .entry(resource.to_string())
                .or_default()
                .insert(id, object.clone());
            Ok(RemoteObject::from(object))
        }

        async fn get(&self, resource: &str, filters: &ParamSet) -> Result<ListResult, ApiError> {
            self.record(Method::GET, format!("{}/", resource))?;
            let store = self.store.lock().unwrap();
            let objects = store
                .objects
                .get(resource)
                .map(|collection| {
                    collection
                        .values()
                        .filter(|object| {
                            filters
                                .present()
                                .all(|(key, value)| object.get(key) == Some(value))
                        })
                        .cloned()
                        .map(RemoteObject::from)
                        .collect()
                })
                .unwrap_or_default();
            Ok(ListResult::new(objects))
        }

        async fn get_object(
            &self,
            resource: &str,
            id: &ObjectId,
        ) -> Result<RemoteObject, ApiError> {
            self.record(Method::GET, format!("{}/{}/", resource, id))?;
            self.object(resource, Self::numeric(id))
                .map(RemoteObject::from)
                .ok_or_else(|| ApiError::from_status(StatusCode::NOT_FOUND))
        }

        async fn put_object(
            &self,
            resource: &str,
            id: &ObjectId,
            body: &Map<String, Value>,
        ) -> Result<RemoteObject, ApiError> {
            self.record(Method::PUT, format!("{}/{}/", resource, id))?;
            let mut store = self.store.lock().unwrap();
            store.bodies.push(body.clone());
            let numeric = Self::numeric(id);
            let mut object = body.clone();
            object.insert("id".to_string(), json!(numeric));
            match store
                .objects
                .get_mut(resource)
                .and_then(|c| c.get_mut(&numeric))
            {
                Some(existing) => {
                    *existing = object.clone();
                    Ok(RemoteObject::from(object))
                }
                None => Err(ApiError::from_status(StatusCode::NOT_FOUND)),
            }
        }

        async fn delete_object(&self, resource: &str, id: &ObjectId) -> Result<(), ApiError> {
            self.record(Method::DELETE, format!("{}/{}/", resource, id))?;
            let mut store = self.store.lock().unwrap();
            store
                .objects
                .get_mut(resource)
                .and_then(|c| c.remove(&Self::numeric(id)))
                .map(|_| ())
                .ok_or_else(|| ApiError::from_status(StatusCode::NOT_FOUND))
        }
    }

    fn controller(api: FakeApi, resource: &str) -> ResourceController<FakeApi, MemoryConsole> {
        ResourceController::new(api, MemoryConsole::new(), resource)
    }

    fn sites() -> Vec<Value> {
        vec![json!({"id": 1, "name": "a", "description": "x"})]
    }

    #[tokio::test]
    async fn test_each_action_issues_its_verb() {
        let mut ctl = controller(FakeApi::seeded("sites", sites()), "sites");

        ctl.create(&ParamSet::new().with("name", "b").with("description", "z"))
            .await
            .unwrap();
        ctl.list(&ParamSet::new(), None).await.unwrap();
        ctl.remove(&ObjectId::from(2), &ParamSet::new().with("id", 2))
            .await
            .unwrap();

        assert_eq!(
            ctl.api().calls(),
            vec![
                (Method::POST, "sites/".to_string()),
                (Method::GET, "sites/".to_string()),
                (Method::DELETE, "sites/2/".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_update_keeps_unspecified_fields() {
        let mut ctl = controller(FakeApi::seeded("sites", sites()), "sites");

        ctl.update(&ParamSet::new().with("id", 1).with("description", "y"))
            .await
            .unwrap();

        assert_eq!(
            ctl.api().calls(),
            vec![
                (Method::GET, "sites/1/".to_string()),
                (Method::PUT, "sites/1/".to_string()),
            ]
        );
        assert_eq!(
            Value::Object(ctl.api().bodies()[0].clone()),
            json!({"name": "a", "description": "y"})
        );
        assert_eq!(
            ctl.console().lines(),
            &["Successfully updated site with args: description=\"y\"!".to_string()]
        );
    }

    #[tokio::test]
    async fn test_update_body_never_carries_identifier() {
        let mut ctl = controller(FakeApi::seeded("sites", sites()), "sites");

        ctl.update(&ParamSet::new().with("id", 1).with("name", Value::Null))
            .await
            .unwrap();

        let body = &ctl.api().bodies()[0];
        assert!(!body.contains_key("id"));
        assert_eq!(body.get("name"), Some(&json!("a")));
    }

    #[tokio::test]
    async fn test_update_without_identifier_fails_before_any_call() {
        let mut ctl = controller(FakeApi::seeded("sites", sites()), "sites");

        let result = ctl.update(&ParamSet::new().with("name", "b")).await;

        assert!(matches!(result, Err(ControllerError::MissingIdentifier(..))));
        assert!(ctl.api().calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_of_missing_object_stops_after_fetch() {
        let mut ctl = controller(FakeApi::seeded("sites", sites()), "sites");

        let error = ctl
            .update(&ParamSet::new().with("id", 9).with("name", "b"))
            .await
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "[FATAL] 404 Not Found trying to update site with args: name=\"b\""
        );
        assert_eq!(ctl.api().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_list_prints_message_only() {
        let mut ctl = controller(FakeApi::default(), "devices");
        let params = ParamSet::new().with("hostname", "nope");

        ctl.list(&params, Some(&["id".to_string(), "hostname".to_string()]))
            .await
            .unwrap();

        // "hostname" has no header, so reaching the formatter would fail.
        assert_eq!(
            ctl.console().lines(),
            &["No device found matching args: hostname=\"nope\"!".to_string()]
        );
    }

    #[tokio::test]
    async fn test_list_with_unmapped_field_fails() {
        let mut ctl = controller(
            FakeApi::seeded("devices", vec![json!({"id": 1, "hostname": "dev1"})]),
            "devices",
        );

        let error = ctl
            .list(&ParamSet::new(), Some(&["id".to_string(), "hostname".to_string()]))
            .await
            .unwrap_err();

        assert!(matches!(error, ControllerError::Formatting(_)));
        assert!(error.to_string().contains("Could not map field \"hostname\""));
    }

    #[tokio::test]
    async fn test_list_prints_table_with_mapped_headers() {
        let api = FakeApi::seeded(
            "devices",
            vec![
                json!({"id": 1, "hostname": "dev1"}),
                json!({"id": 2, "hostname": "dev2"}),
            ],
        );
        let mut ctl = controller(api, "devices")
            .with_fields_map(FieldMap::extended(&[("hostname", "Hostname")]));

        ctl.list(
            &ParamSet::new().with("hostname", "dev2"),
            Some(&["id".to_string(), "hostname".to_string()]),
        )
        .await
        .unwrap();

        let output = ctl.console().output();
        assert!(output.contains("ID"));
        assert!(output.contains("Hostname"));
        assert!(output.contains("dev2"));
        assert!(!output.contains("dev1"));
    }

    #[tokio::test]
    async fn test_rejected_request_reports_status_and_args() {
        let api = FakeApi::default();
        api.fail_with(Failure::Status(StatusCode::CONFLICT));
        let mut ctl = controller(api, "devices");

        let error = ctl
            .create(&ParamSet::new().with("hostname", "dev1"))
            .await
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "[FATAL] 409 Conflict trying to add device with args: hostname=\"dev1\""
        );
        assert!(ctl.console().lines().is_empty());
    }

    #[tokio::test]
    async fn test_request_without_response_reports_underlying_error() {
        let api = FakeApi::default();
        api.fail_with(Failure::NoResponse);
        let mut ctl = controller(api, "devices");

        let error = ctl.list(&ParamSet::new(), None).await.unwrap_err();

        assert!(matches!(error, ControllerError::Unreachable(_)));
        assert_eq!(
            error.to_string(),
            "[FATAL] invalid API url http://127.0.0.1:9/api/ (connection refused)"
        );
    }

    #[tokio::test]
    async fn test_create_sends_only_present_values() {
        let mut ctl = controller(FakeApi::default(), "networks");

        ctl.create(
            &ParamSet::new()
                .with("cidr", "10.0.0.0/8")
                .with("site_id", Value::Null),
        )
        .await
        .unwrap();

        assert_eq!(
            Value::Object(ctl.api().bodies()[0].clone()),
            json!({"cidr": "10.0.0.0/8"})
        );
    }

    #[tokio::test]
    async fn test_add_list_update_remove_scenario() {
        let mut ctl = controller(FakeApi::default(), "sites");

        ctl.create(&ParamSet::new().with("name", "a").with("description", "x"))
            .await
            .unwrap();
        assert_eq!(
            ctl.console().lines().last().unwrap(),
            "Successfully added site with args: name=\"a\", description=\"x\"!"
        );

        ctl.list(&ParamSet::new(), None).await.unwrap();
        let table = ctl.console().lines().last().unwrap().clone();
        assert!(table.contains("Name"));
        assert!(table.contains("Description"));
        assert!(table.contains("x"));

        ctl.update(&ParamSet::new().with("id", 1).with("description", "y"))
            .await
            .unwrap();
        assert_eq!(
            Value::Object(ctl.api().object("sites", 1).unwrap()),
            json!({"name": "a", "description": "y", "id": 1})
        );

        ctl.remove(&ObjectId::from(1), &ParamSet::new().with("id", 1))
            .await
            .unwrap();
        assert_eq!(
            ctl.console().lines().last().unwrap(),
            "Successfully removed site with args: id=1!"
        );

        ctl.list(&ParamSet::new(), None).await.unwrap();
        assert_eq!(
            ctl.console().lines().last().unwrap(),
            "No site found matching args: !"
        );
    }

    #[tokio::test]
    async fn test_device_lifecycle() {
        let mut ctl = controller(FakeApi::default(), "devices")
            .with_fields_map(FieldMap::extended(&[("hostname", "Hostname")]));

        ctl.create(&ParamSet::new().with("hostname", "dev1")).await.unwrap();
        let added = ctl.console().lines().last().unwrap().clone();
        assert!(added.contains("added"));
        assert!(added.contains("hostname=\"dev1\""));

        ctl.list(&ParamSet::new(), None).await.unwrap();
        assert!(ctl.console().lines().last().unwrap().contains("dev1"));

        ctl.update(
            &ParamSet::new()
                .with("id", 1)
                .with("description", "core router"),
        )
        .await
        .unwrap();
        let device = ctl.api().object("devices", 1).unwrap();
        assert_eq!(device.get("hostname"), Some(&json!("dev1")));
        assert_eq!(device.get("description"), Some(&json!("core router")));

        ctl.remove(&ObjectId::from(1), &ParamSet::new().with("id", 1))
            .await
            .unwrap();
        ctl.list(&ParamSet::new(), None).await.unwrap();
        assert_eq!(
            ctl.console().lines().last().unwrap(),
            "No device found matching args: !"
        );
    }
}
